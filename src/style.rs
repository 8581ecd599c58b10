//! Run attributes and partial attribute overrides.
//!
//! - [`FontFlags`]: Bitflags for bold, italic and underline
//! - [`Attributes`]: The complete look of a style run
//! - [`AttributeOverrides`]: A partial update, each field optional
//!
//! # Examples
//!
//! ```
//! use runtext::{AttributeOverrides, Attributes, Rgb};
//!
//! let base = Attributes::default();
//! let heading = AttributeOverrides::builder()
//!     .size(18)
//!     .bold(true)
//!     .color(Rgb::BLUE)
//!     .build();
//!
//! let styled = base.apply(&heading);
//! assert!(styled.is_bold());
//! assert_eq!(styled.size, 18);
//! // Fields without an override are preserved.
//! assert_eq!(styled.family, base.family);
//! ```

use crate::color::Rgb;
use bitflags::bitflags;
use std::fmt;

/// Font family used when no factory supplies one.
pub const DEFAULT_FAMILY: &str = "Serif";
/// Point size used when no factory supplies one.
pub const DEFAULT_SIZE: u16 = 12;

bitflags! {
    /// Font face flags.
    #[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
    pub struct FontFlags: u8 {
        /// Bold weight.
        const BOLD      = 0x01;
        /// Italic slant.
        const ITALIC    = 0x02;
        /// Underlined text.
        const UNDERLINE = 0x04;
    }
}

/// Complete formatting of a style run.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Attributes {
    /// Font family name.
    pub family: String,
    /// Font size in points.
    pub size: u16,
    /// Weight, slant and underline.
    pub flags: FontFlags,
    /// Text color.
    pub color: Rgb,
}

impl Default for Attributes {
    fn default() -> Self {
        Self::new(DEFAULT_FAMILY, DEFAULT_SIZE)
    }
}

impl Attributes {
    /// Plain black text in the given font.
    #[must_use]
    pub fn new(family: impl Into<String>, size: u16) -> Self {
        Self {
            family: family.into(),
            size,
            flags: FontFlags::empty(),
            color: Rgb::BLACK,
        }
    }

    /// Return these attributes with additional font flags.
    #[must_use]
    pub fn with_flags(mut self, flags: FontFlags) -> Self {
        self.flags |= flags;
        self
    }

    /// Return these attributes with the given color.
    #[must_use]
    pub fn with_color(mut self, color: Rgb) -> Self {
        self.color = color;
        self
    }

    #[must_use]
    pub fn is_bold(&self) -> bool {
        self.flags.contains(FontFlags::BOLD)
    }

    #[must_use]
    pub fn is_italic(&self) -> bool {
        self.flags.contains(FontFlags::ITALIC)
    }

    #[must_use]
    pub fn is_underlined(&self) -> bool {
        self.flags.contains(FontFlags::UNDERLINE)
    }

    /// Merge overrides into a copy: set fields replace, unset fields keep
    /// their current value.
    #[must_use]
    pub fn apply(&self, overrides: &AttributeOverrides) -> Self {
        let mut out = self.clone();
        out.apply_in_place(overrides);
        out
    }

    /// In-place form of [`apply`](Self::apply).
    pub fn apply_in_place(&mut self, overrides: &AttributeOverrides) {
        if let Some(family) = &overrides.family {
            self.family.clone_from(family);
        }
        if let Some(size) = overrides.size {
            self.size = size;
        }
        if let Some(bold) = overrides.bold {
            self.flags.set(FontFlags::BOLD, bold);
        }
        if let Some(italic) = overrides.italic {
            self.flags.set(FontFlags::ITALIC, italic);
        }
        if let Some(underlined) = overrides.underlined {
            self.flags.set(FontFlags::UNDERLINE, underlined);
        }
        if let Some(color) = overrides.color {
            self.color = color;
        }
    }
}

impl fmt::Display for Attributes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.family, self.size, self.color)?;
        if self.is_bold() {
            f.write_str(" +b")?;
        }
        if self.is_italic() {
            f.write_str(" +i")?;
        }
        if self.is_underlined() {
            f.write_str(" +u")?;
        }
        Ok(())
    }
}

/// Partial attribute update. `None` leaves the field untouched.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AttributeOverrides {
    pub family: Option<String>,
    pub size: Option<u16>,
    pub bold: Option<bool>,
    pub italic: Option<bool>,
    pub underlined: Option<bool>,
    pub color: Option<Rgb>,
}

impl AttributeOverrides {
    /// Create a new overrides builder.
    #[must_use]
    pub fn builder() -> OverridesBuilder {
        OverridesBuilder::default()
    }

    /// Overrides that set every field to match `attributes`.
    #[must_use]
    pub fn from_attributes(attributes: &Attributes) -> Self {
        Self {
            family: Some(attributes.family.clone()),
            size: Some(attributes.size),
            bold: Some(attributes.is_bold()),
            italic: Some(attributes.is_italic()),
            underlined: Some(attributes.is_underlined()),
            color: Some(attributes.color),
        }
    }

    /// No field is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        !self.changes_font() && self.color.is_none()
    }

    /// Any font-related field (everything but color) is set.
    #[must_use]
    pub fn changes_font(&self) -> bool {
        self.family.is_some()
            || self.size.is_some()
            || self.bold.is_some()
            || self.italic.is_some()
            || self.underlined.is_some()
    }
}

/// Builder for [`AttributeOverrides`].
#[derive(Clone, Debug, Default)]
pub struct OverridesBuilder {
    overrides: AttributeOverrides,
}

impl OverridesBuilder {
    /// Set the font family.
    #[must_use]
    pub fn family(mut self, family: impl Into<String>) -> Self {
        self.overrides.family = Some(family.into());
        self
    }

    /// Set the font size.
    #[must_use]
    pub fn size(mut self, size: u16) -> Self {
        self.overrides.size = Some(size);
        self
    }

    /// Turn bold on or off.
    #[must_use]
    pub fn bold(mut self, bold: bool) -> Self {
        self.overrides.bold = Some(bold);
        self
    }

    /// Turn italic on or off.
    #[must_use]
    pub fn italic(mut self, italic: bool) -> Self {
        self.overrides.italic = Some(italic);
        self
    }

    /// Turn underline on or off.
    #[must_use]
    pub fn underlined(mut self, underlined: bool) -> Self {
        self.overrides.underlined = Some(underlined);
        self
    }

    /// Set the color.
    #[must_use]
    pub fn color(mut self, color: Rgb) -> Self {
        self.overrides.color = Some(color);
        self
    }

    /// Build the final overrides.
    #[must_use]
    pub fn build(self) -> AttributeOverrides {
        self.overrides
    }
}
