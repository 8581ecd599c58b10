//! Paragraph storage: elements plus a style-run partition.
//!
//! [`AttributedSequence`] owns an element list that always ends in
//! [`Element::Terminator`] and a run list that covers every element exactly
//! once. The methods in this file keep both in step for single-element edits;
//! range formatting lives in `format.rs` and whole-paragraph split/combine in
//! `merge.rs`.

use crate::error::{Error, Result};
use crate::event::{EditEvent, LogLevel, emit_edit, emit_log};
use crate::factory::{DefaultFactory, ElementFactory, FontFactory};
use crate::layout::Row;
use crate::style::Attributes;
use crate::text::element::{Element, TERMINATOR_CHAR};
use crate::text::run::StyleRun;
use crate::text::undo::{DeletedItem, RunSnapshot, partition_error};
use std::fmt;
use std::fmt::Write as _;

/// Construction options for [`AttributedSequence`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SequenceOptions {
    /// Attributes of the initial run and the initial typing style.
    pub default_attributes: Attributes,
    /// Re-check the run partition after every mutation.
    pub verify_invariants: bool,
}

impl Default for SequenceOptions {
    fn default() -> Self {
        Self {
            default_attributes: DefaultFactory::default().default_attributes(),
            verify_invariants: cfg!(debug_assertions),
        }
    }
}

/// A paragraph: content elements partitioned into style runs.
///
/// # Invariants
///
/// After every public method returns:
///
/// - the last element is the terminator and no other element is
/// - runs are ordered, contiguous and non-empty
/// - the first run starts at 0 and the last ends at `len() - 1`
///
/// Adjacent runs may carry equal attributes; runs are not coalesced eagerly.
///
/// # Examples
///
/// ```
/// use runtext::{AttributeOverrides, AttributedSequence};
///
/// let mut para = AttributedSequence::new();
/// for ch in "Hello".chars() {
///     para.push_char(ch).unwrap();
/// }
/// assert_eq!(para.text(), "Hello\r");
///
/// let before = para
///     .apply_format(0, 1, &AttributeOverrides::builder().bold(true).build())
///     .unwrap();
/// assert_eq!(para.run_count(), 2);
/// assert!(para.attributes_at(0).unwrap().is_bold());
///
/// // The returned snapshot undoes the format.
/// para.restore_runs(before).unwrap();
/// assert_eq!(para.run_count(), 1);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttributedSequence {
    pub(super) elements: Vec<Element>,
    pub(super) runs: Vec<StyleRun>,
    pub(super) current_attributes: Attributes,
    rows: Vec<Row>,
    fresh: bool,
    pub(super) options: SequenceOptions,
}

impl Default for AttributedSequence {
    fn default() -> Self {
        Self::new()
    }
}

impl AttributedSequence {
    /// Create an empty paragraph with default options.
    #[must_use]
    pub fn new() -> Self {
        Self::with_options(SequenceOptions::default())
    }

    /// Create an empty paragraph with default attributes from `fonts`.
    #[must_use]
    pub fn with_factory(fonts: &dyn FontFactory) -> Self {
        Self::with_options(SequenceOptions {
            default_attributes: fonts.default_attributes(),
            ..SequenceOptions::default()
        })
    }

    /// Create an empty paragraph: only the terminator, in one run.
    #[must_use]
    pub fn with_options(options: SequenceOptions) -> Self {
        let attributes = options.default_attributes.clone();
        Self {
            elements: vec![Element::Terminator],
            runs: vec![StyleRun::new(0, 0, attributes.clone())],
            current_attributes: attributes,
            rows: Vec::new(),
            fresh: false,
            options,
        }
    }

    /// Options this paragraph was created with.
    #[must_use]
    pub fn options(&self) -> &SequenceOptions {
        &self.options
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    /// Number of elements, terminator included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Only the terminator is present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.len() == 1
    }

    #[must_use]
    pub fn element(&self, index: usize) -> Option<&Element> {
        self.elements.get(index)
    }

    #[must_use]
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    #[must_use]
    pub fn runs(&self) -> &[StyleRun] {
        &self.runs
    }

    #[must_use]
    pub fn run_count(&self) -> usize {
        self.runs.len()
    }

    /// Index of the run covering element `index`.
    ///
    /// Fails with [`Error::IndexOutOfBounds`] past the terminator, and with
    /// [`Error::InvariantViolation`] if no run covers a valid index.
    pub fn run_index_at(&self, index: usize) -> Result<usize> {
        self.check_index(index)?;
        self.runs
            .iter()
            .position(|run| run.contains(index))
            .ok_or_else(|| {
                let err = Error::InvariantViolation(format!("no run covers element {index}"));
                emit_log(LogLevel::Error, &err.to_string());
                err
            })
    }

    /// The run covering element `index`.
    pub fn run_at(&self, index: usize) -> Result<&StyleRun> {
        let i = self.run_index_at(index)?;
        Ok(&self.runs[i])
    }

    /// Attributes of element `index`. Valid for objects and the terminator
    /// too, even though only characters render with them.
    pub fn attributes_at(&self, index: usize) -> Result<&Attributes> {
        self.run_at(index).map(|run| &run.attributes)
    }

    /// Plain text, terminator shown as `'\r'`.
    #[must_use]
    pub fn text(&self) -> String {
        self.elements.iter().map(Element::as_char).collect()
    }

    /// Plain text without the terminator.
    #[must_use]
    pub fn content_text(&self) -> String {
        self.elements[..self.elements.len() - 1]
            .iter()
            .map(Element::as_char)
            .collect()
    }

    /// Total display width of all elements in columns.
    #[must_use]
    pub fn display_width(&self) -> usize {
        self.elements.iter().map(Element::display_width).sum()
    }

    /// Deep copy of the current run list.
    #[must_use]
    pub fn snapshot_runs(&self) -> RunSnapshot {
        RunSnapshot::new(self.runs.clone())
    }

    // ------------------------------------------------------------------
    // Element edits
    // ------------------------------------------------------------------

    /// Insert `element` before position `index`.
    ///
    /// `index` may be anything up to and including the terminator's index;
    /// inserting there appends to the content. The run covering `index`
    /// grows by one and later runs shift right.
    pub fn insert(&mut self, index: usize, element: Element) -> Result<()> {
        if element.is_terminator() {
            return Err(Error::TerminatorEdit { index });
        }
        let run_index = self.run_index_at(index)?;

        self.elements.insert(index, element);
        self.runs[run_index].end += 1;
        for run in &mut self.runs[run_index + 1..] {
            run.shift_right(1);
        }
        self.mark_stale();
        self.verify()
    }

    /// Insert a character built by `factory`.
    pub fn insert_char(
        &mut self,
        index: usize,
        ch: char,
        factory: &dyn ElementFactory,
    ) -> Result<()> {
        self.insert(index, factory.create_char(ch))
    }

    /// Insert every character of `text` in order, starting at `index`.
    ///
    /// All characters are validated before anything is inserted.
    pub fn insert_str(
        &mut self,
        index: usize,
        text: &str,
        factory: &dyn ElementFactory,
    ) -> Result<()> {
        self.check_index(index)?;
        let elements: Vec<Element> = text.chars().map(|ch| factory.create_char(ch)).collect();
        if let Some(offset) = elements.iter().position(Element::is_terminator) {
            return Err(Error::TerminatorEdit {
                index: index + offset,
            });
        }
        for (offset, element) in elements.into_iter().enumerate() {
            self.insert(index + offset, element)?;
        }
        Ok(())
    }

    /// Append an element just before the terminator.
    pub fn push(&mut self, element: Element) -> Result<()> {
        self.insert(self.terminator_index(), element)
    }

    /// Append a character just before the terminator.
    pub fn push_char(&mut self, ch: char) -> Result<()> {
        if ch == TERMINATOR_CHAR {
            return Err(Error::TerminatorEdit {
                index: self.terminator_index(),
            });
        }
        self.push(Element::Char(ch))
    }

    /// Remove the element at `index`.
    ///
    /// The covering run shrinks by one, or disappears if it covered only this
    /// element; later runs shift left. The returned record restores the
    /// exact previous state through [`reinsert`](Self::reinsert).
    pub fn remove(&mut self, index: usize) -> Result<DeletedItem> {
        if index == self.terminator_index() {
            return Err(Error::TerminatorEdit { index });
        }
        let run_index = self.run_index_at(index)?;

        let element = self.elements.remove(index);
        let run = if self.runs[run_index].is_singleton() {
            Some(self.runs.remove(run_index))
        } else {
            self.runs[run_index].end -= 1;
            None
        };
        let shift_from = if run.is_some() { run_index } else { run_index + 1 };
        for later in &mut self.runs[shift_from..] {
            later.shift_left(1);
        }
        self.mark_stale();
        self.verify()?;

        Ok(DeletedItem {
            element,
            index,
            run_index,
            run,
        })
    }

    /// Undo a [`remove`](Self::remove).
    ///
    /// A run deleted by the removal comes back verbatim instead of the
    /// element being absorbed by a neighbour.
    pub fn reinsert(&mut self, item: DeletedItem) -> Result<()> {
        if item.element.is_terminator() {
            return Err(Error::TerminatorEdit { index: item.index });
        }
        self.check_index(item.index)?;

        match item.run {
            Some(mut run) => {
                // The run that now starts at the old position must follow it.
                let follower = self.runs.get(item.run_index);
                if follower.map(|r| r.start) != Some(item.index) {
                    return Err(Error::snapshot(format!(
                        "no run starts at {} to follow restored run {}",
                        item.index, item.run_index
                    )));
                }
                run.start = item.index;
                run.end = item.index;
                self.elements.insert(item.index, item.element);
                for later in &mut self.runs[item.run_index..] {
                    later.shift_right(1);
                }
                self.runs.insert(item.run_index, run);
            }
            None => {
                let owner = self.runs.get(item.run_index);
                if !owner.is_some_and(|r| r.start <= item.index && item.index <= r.end + 1) {
                    return Err(Error::snapshot(format!(
                        "run {} cannot take element {}",
                        item.run_index, item.index
                    )));
                }
                self.elements.insert(item.index, item.element);
                self.runs[item.run_index].end += 1;
                for later in &mut self.runs[item.run_index + 1..] {
                    later.shift_right(1);
                }
            }
        }
        self.mark_stale();
        self.verify()
    }

    /// Remove `start..=end`, highest index first.
    ///
    /// Records come back in removal order; reinserting them in reverse
    /// restores the range. An empty range (`start > end`) is a no-op.
    pub fn remove_range(&mut self, start: usize, end: usize) -> Result<Vec<DeletedItem>> {
        if start > end {
            return Ok(Vec::new());
        }
        if end >= self.terminator_index() {
            return Err(if end == self.terminator_index() {
                Error::TerminatorEdit { index: end }
            } else {
                Error::IndexOutOfBounds {
                    index: end,
                    len: self.len(),
                }
            });
        }
        (start..=end).rev().map(|i| self.remove(i)).collect()
    }

    /// Replace the run list with a captured snapshot.
    ///
    /// The snapshot must partition the current elements exactly; otherwise
    /// nothing changes.
    pub fn restore_runs(&mut self, snapshot: RunSnapshot) -> Result<()> {
        snapshot.covers(self.len()).map_err(Error::snapshot)?;
        self.runs = snapshot.into_runs();
        self.mark_stale();
        emit_edit(EditEvent::RunsRestored, &self.runs.len().to_string());
        self.verify()
    }

    // ------------------------------------------------------------------
    // Compositor rows
    // ------------------------------------------------------------------

    /// Drop all cached rows.
    pub fn clear_rows(&mut self) {
        self.rows.clear();
    }

    /// Append a row produced by the compositor.
    pub fn append_row(&mut self, row: Row) {
        self.rows.push(row);
    }

    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn row(&self, index: usize) -> Option<&Row> {
        self.rows.get(index)
    }

    #[must_use]
    pub fn row_index_of(&self, row: &Row) -> Option<usize> {
        self.rows.iter().position(|r| r == row)
    }

    #[must_use]
    pub fn is_first_row(&self, row: &Row) -> bool {
        self.rows.first() == Some(row)
    }

    /// Cached rows. Only meaningful once a compositor has run.
    pub fn rows(&self) -> Result<&[Row]> {
        if self.fresh {
            Ok(&self.rows)
        } else {
            Err(Error::Stale)
        }
    }

    /// Cached rows match the content.
    #[must_use]
    pub fn is_fresh(&self) -> bool {
        self.fresh
    }

    pub fn mark_stale(&mut self) {
        self.fresh = false;
    }

    pub fn mark_fresh(&mut self) {
        self.fresh = true;
    }

    // ------------------------------------------------------------------
    // Consistency
    // ------------------------------------------------------------------

    /// Verify the element and run invariants.
    pub fn check_invariants(&self) -> Result<()> {
        match self.elements.iter().position(Element::is_terminator) {
            Some(i) if i + 1 == self.elements.len() => {}
            Some(i) => {
                return Err(Error::InvariantViolation(format!(
                    "terminator at {i} of {}",
                    self.elements.len()
                )));
            }
            None => return Err(Error::InvariantViolation("missing terminator".into())),
        }
        match partition_error(&self.runs, self.elements.len()) {
            Some(msg) => Err(Error::InvariantViolation(msg)),
            None => Ok(()),
        }
    }

    /// Post-mutation check, enabled by [`SequenceOptions::verify_invariants`].
    pub(super) fn verify(&self) -> Result<()> {
        if !self.options.verify_invariants {
            return Ok(());
        }
        self.check_invariants().inspect_err(|err| {
            emit_log(LogLevel::Error, &err.to_string());
            emit_log(LogLevel::Error, &self.describe());
        })
    }

    /// Log a multi-line description at debug level and return it.
    pub fn debug_dump(&self) -> String {
        let dump = self.describe();
        emit_log(LogLevel::Debug, &dump);
        dump
    }

    fn describe(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "paragraph: {} elements", self.elements.len());
        let _ = writeln!(out, "  text: {:?}", self.text());
        if self.fresh {
            let _ = writeln!(out, "  layout: fresh, {} rows", self.rows.len());
            for row in &self.rows {
                let _ = writeln!(out, "    row {}..={} width {}", row.start, row.end, row.width);
            }
        } else {
            let _ = writeln!(out, "  layout: stale");
        }
        let _ = writeln!(out, "  runs:");
        for run in &self.runs {
            let _ = writeln!(out, "    {run}");
        }
        out
    }

    pub(super) fn terminator_index(&self) -> usize {
        self.elements.len() - 1
    }

    pub(super) fn check_index(&self, index: usize) -> Result<()> {
        if index < self.elements.len() {
            Ok(())
        } else {
            Err(Error::IndexOutOfBounds {
                index,
                len: self.elements.len(),
            })
        }
    }
}

impl fmt::Display for AttributedSequence {
    /// Compact run listing: `0..=2 Serif 12 #000000 | 3..=6 ... +b`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, run) in self.runs.iter().enumerate() {
            if i > 0 {
                f.write_str(" | ")?;
            }
            write!(f, "{run}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::{AttributeOverrides, FontFlags};

    fn para(text: &str) -> AttributedSequence {
        let mut seq = AttributedSequence::new();
        seq.insert_str(0, text, &DefaultFactory::default()).unwrap();
        seq
    }

    fn bounds(seq: &AttributedSequence) -> Vec<(usize, usize)> {
        seq.runs().iter().map(|r| (r.start, r.end)).collect()
    }

    #[test]
    fn test_new_is_terminator_only() {
        let seq = AttributedSequence::new();
        assert_eq!(seq.len(), 1);
        assert!(seq.is_empty());
        assert_eq!(seq.element(0), Some(&Element::Terminator));
        assert_eq!(bounds(&seq), vec![(0, 0)]);
        assert_eq!(seq.current_attributes(), &Attributes::default());
        assert!(seq.check_invariants().is_ok());
    }

    #[test]
    fn test_with_factory_defaults() {
        let factory = DefaultFactory::new(Attributes::new("Mono", 8));
        let seq = AttributedSequence::with_factory(&factory);
        assert_eq!(seq.runs()[0].attributes.family, "Mono");
        assert_eq!(seq.current_attributes().size, 8);
    }

    #[test]
    fn test_insert_grows_covering_run() {
        let mut seq = para("abcd");
        seq.apply_format(2, 2, &AttributeOverrides::builder().bold(true).build())
            .unwrap();
        assert_eq!(bounds(&seq), vec![(0, 1), (2, 2), (3, 4)]);

        seq.insert(2, Element::Char('x')).unwrap();
        assert_eq!(seq.text(), "abxcd\r");
        assert_eq!(bounds(&seq), vec![(0, 1), (2, 3), (4, 5)]);
        assert!(seq.attributes_at(2).unwrap().is_bold());
    }

    #[test]
    fn test_insert_at_terminator_appends() {
        let mut seq = para("ab");
        seq.insert(2, Element::Char('c')).unwrap();
        assert_eq!(seq.text(), "abc\r");
    }

    #[test]
    fn test_insert_rejects_bad_input() {
        let mut seq = para("ab");
        assert_eq!(
            seq.insert(4, Element::Char('x')),
            Err(Error::IndexOutOfBounds { index: 4, len: 3 })
        );
        assert_eq!(
            seq.insert(0, Element::Terminator),
            Err(Error::TerminatorEdit { index: 0 })
        );
        assert!(seq.insert_str(0, "a\rb", &DefaultFactory::default()).is_err());
        assert!(seq.push_char('\r').is_err());
        assert_eq!(seq.text(), "ab\r");
    }

    #[test]
    fn test_insert_marks_stale() {
        let mut seq = para("ab");
        seq.mark_fresh();
        seq.push_char('c').unwrap();
        assert!(!seq.is_fresh());
    }

    #[test]
    fn test_remove_shrinks_run() {
        let mut seq = para("abcd");
        let item = seq.remove(1).unwrap();
        assert_eq!(item.element, Element::Char('b'));
        assert_eq!(item.index, 1);
        assert!(!item.removed_run());
        assert_eq!(seq.text(), "acd\r");
        assert_eq!(bounds(&seq), vec![(0, 3)]);
    }

    #[test]
    fn test_remove_singleton_run() {
        let mut seq = para("abcd");
        seq.apply_format(1, 1, &AttributeOverrides::builder().italic(true).build())
            .unwrap();
        let item = seq.remove(1).unwrap();
        assert_eq!(item.run_index, 1);
        let run = item.run.as_ref().unwrap();
        assert!(run.attributes.flags.contains(FontFlags::ITALIC));
        assert_eq!(bounds(&seq), vec![(0, 0), (1, 3)]);
    }

    #[test]
    fn test_remove_terminator_refused() {
        let mut seq = para("ab");
        assert_eq!(seq.remove(2), Err(Error::TerminatorEdit { index: 2 }));
        assert_eq!(
            seq.remove(9),
            Err(Error::IndexOutOfBounds { index: 9, len: 3 })
        );
        assert_eq!(seq.len(), 3);
    }

    #[test]
    fn test_reinsert_restores_deleted_run() {
        let mut seq = para("abcd");
        seq.apply_format(1, 1, &AttributeOverrides::builder().italic(true).build())
            .unwrap();
        let before = seq.clone();

        let item = seq.remove(1).unwrap();
        seq.reinsert(item).unwrap();
        assert_eq!(seq.elements(), before.elements());
        assert_eq!(seq.runs(), before.runs());
    }

    #[test]
    fn test_reinsert_last_element_of_run() {
        let mut seq = para("abcd");
        seq.apply_format(0, 1, &AttributeOverrides::builder().bold(true).build())
            .unwrap();
        let before = seq.runs().to_vec();

        // 'b' ends the bold run; putting it back must not hand it to the next run.
        let item = seq.remove(1).unwrap();
        seq.reinsert(item).unwrap();
        assert_eq!(seq.runs(), before.as_slice());
        assert!(seq.attributes_at(1).unwrap().is_bold());
    }

    #[test]
    fn test_reinsert_rejects_mismatched_record() {
        let mut seq = para("ab");
        let bogus = DeletedItem {
            element: Element::Char('z'),
            index: 1,
            run_index: 3,
            run: None,
        };
        assert!(matches!(seq.reinsert(bogus), Err(Error::InvalidSnapshot { .. })));
        assert_eq!(seq.text(), "ab\r");
    }

    #[test]
    fn test_remove_range_high_to_low() {
        let mut seq = para("abcdef");
        let items = seq.remove_range(1, 3).unwrap();
        assert_eq!(seq.text(), "aef\r");
        let indices: Vec<usize> = items.iter().map(|i| i.index).collect();
        assert_eq!(indices, vec![3, 2, 1]);

        for item in items.into_iter().rev() {
            seq.reinsert(item).unwrap();
        }
        assert_eq!(seq.text(), "abcdef\r");
    }

    #[test]
    fn test_remove_range_edges() {
        let mut seq = para("abc");
        assert!(seq.remove_range(2, 1).unwrap().is_empty());
        assert_eq!(
            seq.remove_range(0, 3),
            Err(Error::TerminatorEdit { index: 3 })
        );
        assert_eq!(seq.text(), "abc\r");
    }

    #[test]
    fn test_restore_runs_validates() {
        let mut seq = para("abc");
        let bad = RunSnapshot::new(vec![StyleRun::new(0, 1, Attributes::default())]);
        assert!(matches!(
            seq.restore_runs(bad),
            Err(Error::InvalidSnapshot { .. })
        ));
        assert_eq!(bounds(&seq), vec![(0, 3)]);
    }

    #[test]
    fn test_rows_require_fresh() {
        let mut seq = para("ab");
        assert_eq!(seq.rows(), Err(Error::Stale));

        let first = Row::new(0, 1, 2);
        let second = Row::new(2, 2, 0);
        seq.clear_rows();
        seq.append_row(first);
        seq.append_row(second);
        seq.mark_fresh();

        assert_eq!(seq.row_count(), 2);
        assert_eq!(seq.rows().unwrap().len(), 2);
        assert_eq!(seq.row_index_of(&second), Some(1));
        assert_eq!(seq.row_index_of(&Row::new(5, 6, 1)), None);
        assert!(seq.is_first_row(&first));
        assert!(!seq.is_first_row(&second));
    }

    #[test]
    fn test_check_invariants_catches_gap() {
        let mut seq = para("abc");
        seq.runs = vec![
            StyleRun::new(0, 0, Attributes::default()),
            StyleRun::new(2, 3, Attributes::default()),
        ];
        assert!(seq.check_invariants().unwrap_err().is_invariant());
        assert!(seq.run_index_at(1).unwrap_err().is_invariant());
    }

    #[test]
    fn test_queries() {
        let mut seq = para("a中");
        seq.push(Element::Object(crate::text::EmbeddedObject::new(7, 3)))
            .unwrap();
        assert_eq!(seq.content_text(), "a中\u{FFFC}");
        assert_eq!(seq.display_width(), 6);
        assert_eq!(seq.run_at(3).unwrap().range(), 0..=3);
        assert!(seq.run_at(4).is_err());
    }

    #[test]
    fn test_debug_dump_lists_runs() {
        let seq = para("hi");
        let dump = seq.debug_dump();
        assert!(dump.contains("3 elements"));
        assert!(dump.contains("stale"));
        assert!(dump.contains("0..=2 Serif 12 #000000"));
    }
}
