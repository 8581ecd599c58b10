//! Style runs over element indices.

use crate::style::Attributes;
use std::fmt;
use std::ops::RangeInclusive;

/// A contiguous index range sharing one attribute set.
///
/// Bounds are inclusive: a run always covers at least one element.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct StyleRun {
    /// First covered element.
    pub start: usize,
    /// Last covered element.
    pub end: usize,
    /// Formatting applied to the covered elements.
    pub attributes: Attributes,
}

impl StyleRun {
    /// Create a run covering `start..=end`.
    #[must_use]
    pub fn new(start: usize, end: usize, attributes: Attributes) -> Self {
        Self {
            start,
            end,
            attributes,
        }
    }

    /// Check if this run covers an element index.
    #[must_use]
    pub fn contains(&self, index: usize) -> bool {
        self.start <= index && index <= self.end
    }

    /// Number of covered elements. Never zero.
    #[must_use]
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.end + 1 - self.start
    }

    /// Covers exactly one element.
    #[must_use]
    pub fn is_singleton(&self) -> bool {
        self.start == self.end
    }

    #[must_use]
    pub fn range(&self) -> RangeInclusive<usize> {
        self.start..=self.end
    }

    /// Move both bounds right.
    pub fn shift_right(&mut self, by: usize) {
        self.start += by;
        self.end += by;
    }

    /// Move both bounds left.
    pub fn shift_left(&mut self, by: usize) {
        self.start -= by;
        self.end -= by;
    }

    /// Copy of this run moved right by `by`.
    #[must_use]
    pub fn shifted_right(mut self, by: usize) -> Self {
        self.shift_right(by);
        self
    }
}

impl fmt::Display for StyleRun {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..={} {}", self.start, self.end, self.attributes)
    }
}
