//! Range formatting over the run partition.

use crate::error::Result;
use crate::event::{LogLevel, emit_log};
use crate::style::{AttributeOverrides, Attributes};
use crate::text::run::StyleRun;
use crate::text::sequence::AttributedSequence;
use crate::text::undo::RunSnapshot;

impl AttributedSequence {
    /// Merge `overrides` into the attributes of every element in `a..=b`.
    ///
    /// The bounds may come in either order. A range that stops right before
    /// the terminator is extended over it, so text typed at the end of the
    /// paragraph picks up the new look. Runs straddling a bound are split;
    /// runs inside the range keep their boundaries and only have the
    /// overridden fields replaced.
    ///
    /// Returns the run list as it was before the call.
    pub fn apply_format(
        &mut self,
        a: usize,
        b: usize,
        overrides: &AttributeOverrides,
    ) -> Result<RunSnapshot> {
        self.check_index(a)?;
        self.check_index(b)?;
        let (start, mut end) = if a <= b { (a, b) } else { (b, a) };
        if self.len() >= 2 && end == self.len() - 2 {
            end += 1;
        }

        let first = self.run_index_at(start)?;
        let last = self.run_index_at(end)?;
        let previous = self.snapshot_runs();

        let start_aligned = self.runs[first].start == start;
        let end_aligned = self.runs[last].end == end;

        if first == last {
            self.format_within_run(first, start, end, start_aligned, end_aligned, overrides);
        } else {
            self.format_across_runs(first, last, start, end, start_aligned, end_aligned, overrides);
        }

        self.mark_stale();
        self.verify()?;
        Ok(previous)
    }

    fn format_within_run(
        &mut self,
        index: usize,
        start: usize,
        end: usize,
        start_aligned: bool,
        end_aligned: bool,
        overrides: &AttributeOverrides,
    ) {
        let old = self.runs[index].attributes.clone();
        let styled = old.apply(overrides);
        let run_end = self.runs[index].end;

        match (start_aligned, end_aligned) {
            (false, false) => {
                self.runs[index].end = start - 1;
                self.runs.insert(index + 1, StyleRun::new(start, end, styled));
                self.runs.insert(index + 2, StyleRun::new(end + 1, run_end, old));
                emit_log(
                    LogLevel::Debug,
                    &format!("format: run {index} split in three at {start}..={end}"),
                );
            }
            (false, true) => {
                self.runs[index].end = start - 1;
                self.runs.insert(index + 1, StyleRun::new(start, end, styled));
            }
            (true, false) => {
                self.runs[index].start = end + 1;
                self.runs.insert(index, StyleRun::new(start, end, styled));
            }
            (true, true) => {
                self.runs[index].attributes = styled;
            }
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn format_across_runs(
        &mut self,
        mut first: usize,
        mut last: usize,
        start: usize,
        end: usize,
        start_aligned: bool,
        end_aligned: bool,
        overrides: &AttributeOverrides,
    ) {
        if !start_aligned {
            let head = &mut self.runs[first];
            let tail = StyleRun::new(start, head.end, head.attributes.clone());
            head.end = start - 1;
            self.runs.insert(first + 1, tail);
            first += 1;
            last += 1;
        }
        if !end_aligned {
            let tail = &mut self.runs[last];
            let head = StyleRun::new(tail.start, end, tail.attributes.clone());
            tail.start = end + 1;
            self.runs.insert(last, head);
        }
        for run in &mut self.runs[first..=last] {
            run.attributes.apply_in_place(overrides);
        }
    }

    /// Style that freshly typed text should use.
    #[must_use]
    pub fn current_attributes(&self) -> &Attributes {
        &self.current_attributes
    }

    /// Merge `overrides` into the typing style, returning the previous one.
    pub fn change_current_attributes(&mut self, overrides: &AttributeOverrides) -> Attributes {
        let previous = self.current_attributes.clone();
        self.current_attributes.apply_in_place(overrides);
        previous
    }

    /// Put back a typing style returned by
    /// [`change_current_attributes`](Self::change_current_attributes).
    pub fn restore_current_attributes(&mut self, attributes: Attributes) {
        self.current_attributes = attributes;
    }

    /// The typing style uses a font family other than `family`.
    #[must_use]
    pub fn is_current_attributes_changed(&self, family: &str) -> bool {
        self.current_attributes.family != family
    }
}
