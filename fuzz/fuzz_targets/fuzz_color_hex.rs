//! Fuzz target for color hex parsing.
//!
//! Tests that Rgb::from_hex handles arbitrary strings without panicking and
//! that every accepted color survives a trip through `to_hex`.

#![no_main]

use libfuzzer_sys::fuzz_target;
use runtext::color::Rgb;

fuzz_target!(|data: &str| {
    if let Some(color) = Rgb::from_hex(data) {
        assert_eq!(Rgb::from_hex(&color.to_hex()), Some(color));
    }

    if !data.starts_with('#') {
        let _ = Rgb::from_hex(&format!("#{data}"));
    }

    // Prefixes and suffixes that land on char boundaries.
    for i in 0..data.len().min(10) {
        if let Some(rest) = data.get(i..) {
            let _ = Rgb::from_hex(rest);
        }
        if let Some(head) = data.get(..data.len() - i) {
            let _ = Rgb::from_hex(head);
        }
    }
});
