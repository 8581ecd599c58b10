//! `runtext` - run-coded attributed text paragraphs
//!
//! A paragraph is a sequence of elements (characters and inline objects)
//! that always ends in a terminator, partitioned into style runs that carry
//! font and color attributes. Every edit keeps the elements and the runs in
//! step and hands back a record an external undo stack can replay.

// Crate-level lint configuration
#![allow(clippy::module_name_repetitions)] // Allow text::TextElement etc
#![allow(clippy::missing_errors_doc)] // Docs WIP
#![allow(clippy::missing_panics_doc)] // Docs WIP
#![allow(clippy::missing_const_for_fn)] // Many functions could be const, not critical
#![allow(clippy::doc_markdown)] // Allow technical names without backticks
#![allow(clippy::use_self)] // Allow explicit type names in impl blocks
#![allow(clippy::must_use_candidate)] // Mutators returning undo records are often ignored in tests
#![allow(clippy::cast_possible_truncation)] // Intentional color packing casts
#![allow(clippy::collapsible_if)] // Sometimes nested ifs are clearer
#![allow(clippy::items_after_statements)] // Common pattern in tests
#![allow(clippy::redundant_clone)] // Clones in tests for clarity are fine

pub mod color;
pub mod error;
pub mod event;
pub mod factory;
pub mod layout;
pub mod style;
pub mod text;

// Re-export core types at crate root
pub use color::Rgb;
pub use error::{Error, Result};
pub use event::{EditEvent, LogLevel, emit_event, emit_log, set_event_callback, set_log_callback};
pub use factory::{DefaultFactory, ElementFactory, FontFactory};
pub use layout::{Compositor, Row};
pub use style::{AttributeOverrides, Attributes, FontFlags};
pub use text::{
    AttributedSequence, DeletedItem, Element, EmbeddedObject, RunSnapshot, SequenceOptions,
    StyleRun,
};
