//! Fuzz target for paragraph edit scripts.
//!
//! Replays arbitrary insert/remove/format/split/combine sequences and checks
//! the run partition after each step. Undo records are replayed as well.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use runtext::{AttributeOverrides, AttributedSequence, Element};

#[derive(Arbitrary, Debug)]
enum Op {
    Insert { at: u16, ch: char },
    Remove { at: u16 },
    Format { a: u16, b: u16, bold: Option<bool>, size: Option<u8> },
    Split { at: u16 },
    UndoRemove { at: u16 },
}

fuzz_target!(|ops: Vec<Op>| {
    let mut seq = AttributedSequence::new();
    for op in ops.into_iter().take(256) {
        let len = seq.len();
        match op {
            Op::Insert { at, ch } => {
                let _ = seq.insert(usize::from(at) % len, Element::Char(ch));
            }
            Op::Remove { at } => {
                let _ = seq.remove(usize::from(at));
            }
            Op::Format { a, b, bold, size } => {
                let overrides = AttributeOverrides {
                    bold,
                    size: size.map(u16::from),
                    ..AttributeOverrides::default()
                };
                let _ = seq.apply_format(usize::from(a) % len, usize::from(b) % len, &overrides);
            }
            Op::Split { at } => {
                if let Ok(tail) = seq.split_at(usize::from(at) % len) {
                    seq.check_invariants().expect("head after split");
                    tail.check_invariants().expect("tail after split");
                    seq.combine(tail).expect("combine");
                }
            }
            Op::UndoRemove { at } => {
                let before = seq.clone();
                if let Ok(item) = seq.remove(usize::from(at) % len) {
                    seq.reinsert(item).expect("reinsert");
                    assert_eq!(seq.runs(), before.runs());
                }
            }
        }
        seq.check_invariants().expect("partition");
    }
});
