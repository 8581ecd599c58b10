//! Element and attribute construction seams.
//!
//! A paragraph never reaches for a global font table or character cache.
//! Hosts pass a factory in, and tests swap in a deterministic one.

use crate::style::{Attributes, DEFAULT_FAMILY, DEFAULT_SIZE};
use crate::text::{Element, TERMINATOR_CHAR};

/// Builds content elements from typed characters.
pub trait ElementFactory {
    /// Element for a raw character code.
    fn create_char(&self, ch: char) -> Element;
}

/// Supplies the attributes new paragraphs start with.
pub trait FontFactory {
    /// Attributes for the initial run and the initial typing style.
    fn default_attributes(&self) -> Attributes;
}

/// Factory with a fixed default font.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DefaultFactory {
    defaults: Attributes,
}

impl Default for DefaultFactory {
    fn default() -> Self {
        Self::new(Attributes::new(DEFAULT_FAMILY, DEFAULT_SIZE))
    }
}

impl DefaultFactory {
    /// Create a factory handing out `defaults` for new paragraphs.
    #[must_use]
    pub fn new(defaults: Attributes) -> Self {
        Self { defaults }
    }
}

impl ElementFactory for DefaultFactory {
    fn create_char(&self, ch: char) -> Element {
        if ch == TERMINATOR_CHAR {
            Element::Terminator
        } else {
            Element::Char(ch)
        }
    }
}

impl FontFactory for DefaultFactory {
    fn default_attributes(&self) -> Attributes {
        self.defaults.clone()
    }
}
