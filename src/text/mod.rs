//! Paragraph content with style runs.
//!
//! Key types:
//!
//! - [`AttributedSequence`]: Elements plus a style-run partition
//! - [`Element`]: Character, embedded object or the terminator
//! - [`StyleRun`]: Inclusive index range with one attribute set
//! - [`DeletedItem`] / [`RunSnapshot`]: Undo capture records
//!
//! # Examples
//!
//! ## Splitting and rejoining a paragraph
//!
//! ```
//! use runtext::AttributedSequence;
//!
//! let mut para = AttributedSequence::new();
//! for ch in "ABCD".chars() {
//!     para.push_char(ch).unwrap();
//! }
//!
//! let tail = para.split_at(2).unwrap();
//! assert_eq!(para.text(), "AB\r");
//! assert_eq!(tail.text(), "CD\r");
//!
//! let before = para.combine(tail.clone()).unwrap();
//! assert_eq!(para.text(), "ABCD\r");
//!
//! // Undo the combine.
//! para.decompose(&tail, before).unwrap();
//! assert_eq!(para.text(), "AB\r");
//! ```
//!
//! ## Undoing a removal
//!
//! ```
//! use runtext::AttributedSequence;
//!
//! let mut para = AttributedSequence::new();
//! for ch in "abc".chars() {
//!     para.push_char(ch).unwrap();
//! }
//! let item = para.remove(1).unwrap();
//! assert_eq!(para.text(), "ac\r");
//! para.reinsert(item).unwrap();
//! assert_eq!(para.text(), "abc\r");
//! ```

mod element;
mod format;
mod merge;
mod run;
mod sequence;
mod undo;

pub use element::{Element, EmbeddedObject, TERMINATOR_CHAR};
pub use run::StyleRun;
pub use sequence::{AttributedSequence, SequenceOptions};
pub use undo::{DeletedItem, RunSnapshot};
