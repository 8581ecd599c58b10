//! Atomic paragraph content.

use std::fmt;
use unicode_width::UnicodeWidthChar;

/// Character shown for the terminator in plain-text views.
pub const TERMINATOR_CHAR: char = '\r';

/// An inline non-text item such as an image placeholder.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct EmbeddedObject {
    /// Host-assigned identifier.
    pub id: u32,
    /// Columns the object occupies in a row.
    pub width: u16,
}

impl EmbeddedObject {
    #[must_use]
    pub const fn new(id: u32, width: u16) -> Self {
        Self { id, width }
    }
}

/// One unit of paragraph content.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Element {
    /// A character.
    Char(char),
    /// An embedded object.
    Object(EmbeddedObject),
    /// End-of-paragraph marker, always the last element.
    Terminator,
}

impl Element {
    #[must_use]
    pub const fn is_terminator(&self) -> bool {
        matches!(self, Self::Terminator)
    }

    /// The character this element stands for in plain-text views.
    ///
    /// Objects map to U+FFFC (object replacement character).
    #[must_use]
    pub const fn as_char(&self) -> char {
        match self {
            Self::Char(c) => *c,
            Self::Object(_) => '\u{FFFC}',
            Self::Terminator => TERMINATOR_CHAR,
        }
    }

    /// Display width in terminal columns.
    #[must_use]
    pub fn display_width(&self) -> usize {
        match self {
            Self::Char(c) => c.width().unwrap_or(0),
            Self::Object(obj) => usize::from(obj.width),
            Self::Terminator => 0,
        }
    }
}

impl From<char> for Element {
    fn from(c: char) -> Self {
        Self::Char(c)
    }
}

impl From<EmbeddedObject> for Element {
    fn from(obj: EmbeddedObject) -> Self {
        Self::Object(obj)
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Char(c) => write!(f, "{c}"),
            Self::Object(obj) => write!(f, "[obj {}]", obj.id),
            Self::Terminator => f.write_str("\\r"),
        }
    }
}
