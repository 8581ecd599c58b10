//! Whole-paragraph split, combine and its inverse.

use crate::error::{Error, Result};
use crate::event::{EditEvent, LogLevel, emit_edit, emit_log};
use crate::text::sequence::AttributedSequence;
use crate::text::undo::RunSnapshot;

impl AttributedSequence {
    /// Cut the paragraph before element `index`.
    ///
    /// `self` keeps `0..index` and its terminator; the returned sibling gets
    /// `index..` including the original terminator. If trimming leaves the
    /// terminator alone in a trailing run, that run is folded into the one
    /// before it so the terminator continues the preceding style.
    pub fn split_at(&mut self, index: usize) -> Result<Self> {
        self.check_index(index)?;
        let mut sibling = self.detached_copy();

        let last_content = self.terminator_index();
        if index < last_content {
            self.remove_range(index, last_content - 1)?;
        }
        self.absorb_trailing_singleton();

        if index > 0 {
            sibling.remove_range(0, index - 1)?;
        }

        self.mark_stale();
        sibling.mark_stale();
        self.verify()?;
        emit_edit(
            EditEvent::Split,
            &format!("{}+{}", self.len(), sibling.len()),
        );
        Ok(sibling)
    }

    /// Append `next` to this paragraph, dropping this paragraph's terminator.
    ///
    /// Returns the run list as it was before the merge, for
    /// [`decompose`](Self::decompose).
    pub fn combine(&mut self, next: Self) -> Result<RunSnapshot> {
        let previous = self.snapshot_runs();

        if self.is_empty() {
            self.elements.clear();
            self.runs.clear();
        } else {
            self.drop_terminator();
        }

        let offset = self.elements.len();
        self.elements.extend(next.elements);
        self.runs
            .extend(next.runs.into_iter().map(|run| run.shifted_right(offset)));

        self.mark_stale();
        self.verify()?;
        emit_edit(EditEvent::Combine, &offset.to_string());
        Ok(previous)
    }

    /// Revert a [`combine`](Self::combine) of `removed`.
    ///
    /// Strips `removed`'s content from the tail and reinstates
    /// `previous_runs`. If this paragraph holds less content than `removed`,
    /// the call is a no-op. A snapshot that does not fit the remaining
    /// content is rejected without modifying anything.
    pub fn decompose(&mut self, removed: &Self, previous_runs: RunSnapshot) -> Result<()> {
        let content = self.len() - 1;
        let removed_content = removed.len() - 1;
        if content < removed_content {
            emit_log(
                LogLevel::Warn,
                &format!("decompose skipped: {content} elements, asked to strip {removed_content}"),
            );
            return Ok(());
        }

        let kept = self.len() - removed_content;
        previous_runs.covers(kept).map_err(Error::snapshot)?;

        let terminator = self.terminator_index();
        self.elements.drain(kept - 1..terminator);
        self.runs = previous_runs.into_runs();

        self.mark_stale();
        self.verify()?;
        emit_edit(EditEvent::Decompose, &removed_content.to_string());
        Ok(())
    }

    /// Copy content, runs, typing style and options, but no cached rows.
    fn detached_copy(&self) -> Self {
        let mut copy = Self::with_options(self.options.clone());
        copy.elements.clone_from(&self.elements);
        copy.runs.clone_from(&self.runs);
        copy.current_attributes.clone_from(&self.current_attributes);
        copy
    }

    /// Remove the terminator of a non-empty paragraph, leaving its run list
    /// covering the content only.
    fn drop_terminator(&mut self) {
        self.elements.pop();
        let Some(last) = self.runs.last_mut() else {
            return;
        };
        if last.is_singleton() {
            self.runs.pop();
        } else {
            last.end -= 1;
        }
    }

    fn absorb_trailing_singleton(&mut self) {
        let n = self.runs.len();
        if n > 1 && self.runs[n - 1].is_singleton() {
            self.runs.pop();
            self.runs[n - 2].end += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::error::Error;
    use crate::factory::DefaultFactory;
    use crate::style::AttributeOverrides;
    use crate::text::{AttributedSequence, RunSnapshot};

    fn para(text: &str) -> AttributedSequence {
        let mut seq = AttributedSequence::new();
        seq.insert_str(0, text, &DefaultFactory::default()).unwrap();
        seq
    }

    fn bounds(seq: &AttributedSequence) -> Vec<(usize, usize)> {
        seq.runs().iter().map(|r| (r.start, r.end)).collect()
    }

    fn bold(on: bool) -> AttributeOverrides {
        AttributeOverrides::builder().bold(on).build()
    }

    #[test]
    fn test_split_middle() {
        let mut head = para("ABCD");
        let tail = head.split_at(2).unwrap();
        assert_eq!(head.text(), "AB\r");
        assert_eq!(tail.text(), "CD\r");
        assert_eq!(bounds(&head), vec![(0, 2)]);
        assert_eq!(bounds(&tail), vec![(0, 2)]);
        assert!(!head.is_fresh());
        assert!(!tail.is_fresh());
    }

    #[test]
    fn test_split_at_start_and_end() {
        let mut head = para("AB");
        let tail = head.split_at(0).unwrap();
        assert_eq!(head.text(), "\r");
        assert_eq!(tail.text(), "AB\r");

        let mut head = para("AB");
        let tail = head.split_at(2).unwrap();
        assert_eq!(head.text(), "AB\r");
        assert_eq!(tail.text(), "\r");
        assert_eq!(bounds(&tail), vec![(0, 0)]);
    }

    #[test]
    fn test_split_folds_orphaned_terminator_run() {
        let mut head = para("ABCD");
        head.apply_format(2, 3, &bold(true)).unwrap();
        assert_eq!(bounds(&head), vec![(0, 1), (2, 4)]);
        head.apply_format(4, 4, &bold(false)).unwrap();
        head.apply_format(2, 2, &bold(true)).unwrap();

        let tail = head.split_at(2).unwrap();
        assert_eq!(bounds(&head), vec![(0, 2)]);
        assert!(!head.attributes_at(2).unwrap().is_bold());
        assert!(tail.attributes_at(0).unwrap().is_bold());
        assert!(!tail.attributes_at(2).unwrap().is_bold());
    }

    #[test]
    fn test_split_keeps_typing_style_but_not_rows() {
        let mut head = para("ABCD");
        head.change_current_attributes(&bold(true));
        head.append_row(crate::layout::Row::new(0, 4, 4));
        head.mark_fresh();

        let tail = head.split_at(1).unwrap();
        assert!(tail.current_attributes().is_bold());
        assert_eq!(tail.row_count(), 0);
    }

    #[test]
    fn test_split_out_of_bounds() {
        let mut head = para("AB");
        assert_eq!(
            head.split_at(3).unwrap_err(),
            Error::IndexOutOfBounds { index: 3, len: 3 }
        );
        assert_eq!(head.text(), "AB\r");
    }

    #[test]
    fn test_combine_appends_and_shifts_runs() {
        let mut head = para("AB");
        let mut tail = para("CD");
        tail.apply_format(0, 0, &bold(true)).unwrap();

        let previous = head.combine(tail).unwrap();
        assert_eq!(previous.runs().len(), 1);
        assert_eq!(head.text(), "ABCD\r");
        assert_eq!(bounds(&head), vec![(0, 1), (2, 2), (3, 4)]);
        assert!(head.attributes_at(2).unwrap().is_bold());
    }

    #[test]
    fn test_combine_drops_singleton_terminator_run() {
        let mut head = para("AB");
        head.apply_format(2, 2, &bold(true)).unwrap();
        assert_eq!(bounds(&head), vec![(0, 1), (2, 2)]);

        head.combine(para("C")).unwrap();
        assert_eq!(bounds(&head), vec![(0, 1), (2, 3)]);
        assert!(!head.attributes_at(2).unwrap().is_bold());
    }

    #[test]
    fn test_combine_into_empty() {
        let mut head = AttributedSequence::new();
        let previous = head.combine(para("XY")).unwrap();
        assert_eq!(head.text(), "XY\r");
        assert_eq!(bounds(&head), vec![(0, 2)]);
        assert_eq!(previous.len(), 1);
    }

    #[test]
    fn test_combine_with_empty_next() {
        let mut head = para("AB");
        head.combine(AttributedSequence::new()).unwrap();
        assert_eq!(head.text(), "AB\r");
        assert!(head.check_invariants().is_ok());
    }

    #[test]
    fn test_decompose_reverts_combine() {
        let mut head = para("AB");
        head.apply_format(0, 0, &bold(true)).unwrap();
        let before = head.clone();
        let tail = para("CDE");

        let previous = head.combine(tail.clone()).unwrap();
        head.decompose(&tail, previous).unwrap();
        assert_eq!(head.elements(), before.elements());
        assert_eq!(head.runs(), before.runs());
    }

    #[test]
    fn test_decompose_empty_head() {
        let mut head = AttributedSequence::new();
        let tail = para("CD");
        let previous = head.combine(tail.clone()).unwrap();
        head.decompose(&tail, previous).unwrap();
        assert_eq!(head.text(), "\r");
        assert_eq!(bounds(&head), vec![(0, 0)]);
    }

    #[test]
    fn test_decompose_undersized_is_noop() {
        let mut head = para("AB");
        let before = head.clone();
        let big = para("CDEFG");
        head.decompose(&big, RunSnapshot::default()).unwrap();
        assert_eq!(head, before);
    }

    #[test]
    fn test_decompose_rejects_bad_snapshot() {
        let mut head = para("ABCD");
        let before = head.clone();
        let tail = para("CD");
        let wrong = head.snapshot_runs();
        assert!(matches!(
            head.decompose(&tail, wrong),
            Err(Error::InvalidSnapshot { .. })
        ));
        assert_eq!(head, before);
    }
}
