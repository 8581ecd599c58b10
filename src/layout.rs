//! Compositor boundary.
//!
//! A compositor turns a stale paragraph into visual rows. The paragraph only
//! caches the rows and remembers whether they still match its content; the
//! layout algorithm itself lives on the other side of [`Compositor`].
//!
//! # Examples
//!
//! ```
//! use runtext::layout::{GreedyCompositor, compose_if_stale};
//! use runtext::AttributedSequence;
//!
//! let mut para = AttributedSequence::new();
//! for ch in "hello world".chars() {
//!     para.push_char(ch).unwrap();
//! }
//!
//! let compositor = GreedyCompositor::new(5);
//! assert!(compose_if_stale(&mut para, &compositor));
//! assert_eq!(para.row_count(), 3);
//! // Nothing changed since, so a second pass is skipped.
//! assert!(!compose_if_stale(&mut para, &compositor));
//! ```

use crate::text::AttributedSequence;

/// One visual row: an inclusive element range and its width in columns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Row {
    pub start: usize,
    pub end: usize,
    pub width: usize,
}

impl Row {
    #[must_use]
    pub const fn new(start: usize, end: usize, width: usize) -> Self {
        Self { start, end, width }
    }

    #[must_use]
    pub const fn contains(&self, index: usize) -> bool {
        self.start <= index && index <= self.end
    }
}

/// Produces rows for a paragraph.
pub trait Compositor {
    /// Lay out the whole paragraph. Rows must cover every element in order.
    fn compose(&self, sequence: &AttributedSequence) -> Vec<Row>;
}

/// Re-layout `sequence` if its cached rows are stale.
///
/// Returns whether the compositor ran.
pub fn compose_if_stale<C>(sequence: &mut AttributedSequence, compositor: &C) -> bool
where
    C: Compositor + ?Sized,
{
    if sequence.is_fresh() {
        return false;
    }
    let rows = compositor.compose(sequence);
    sequence.clear_rows();
    for row in rows {
        sequence.append_row(row);
    }
    sequence.mark_fresh();
    true
}

/// Fills each row with elements until the next one would exceed `max_width`.
///
/// No word breaking; a row always takes at least one element so overly wide
/// elements still make progress.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GreedyCompositor {
    max_width: usize,
}

impl GreedyCompositor {
    #[must_use]
    pub fn new(max_width: usize) -> Self {
        Self {
            max_width: max_width.max(1),
        }
    }
}

impl Compositor for GreedyCompositor {
    fn compose(&self, sequence: &AttributedSequence) -> Vec<Row> {
        let mut rows = Vec::new();
        let mut start = 0;
        let mut width = 0;
        for (i, element) in sequence.elements().iter().enumerate() {
            let w = element.display_width();
            if i > start && width + w > self.max_width {
                rows.push(Row::new(start, i - 1, width));
                start = i;
                width = 0;
            }
            width += w;
        }
        rows.push(Row::new(start, sequence.len() - 1, width));
        rows
    }
}
