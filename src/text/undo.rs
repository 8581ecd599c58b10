//! Undo capture records.
//!
//! Every value here is an owned deep copy. Later edits to the paragraph
//! never reach into a record handed out earlier.

use crate::text::element::Element;
use crate::text::run::StyleRun;

/// Everything needed to put back one removed element.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeletedItem {
    /// The removed element.
    pub element: Element,
    /// Index the element occupied.
    pub index: usize,
    /// Index of the run that covered the element.
    pub run_index: usize,
    /// The run itself, when removing the element emptied it.
    pub run: Option<StyleRun>,
}

impl DeletedItem {
    /// Removing the element also removed its run.
    #[must_use]
    pub fn removed_run(&self) -> bool {
        self.run.is_some()
    }
}

/// Copy of a paragraph's run list taken before an edit.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunSnapshot {
    runs: Vec<StyleRun>,
}

impl RunSnapshot {
    #[must_use]
    pub fn new(runs: Vec<StyleRun>) -> Self {
        Self { runs }
    }

    #[must_use]
    pub fn runs(&self) -> &[StyleRun] {
        &self.runs
    }

    #[must_use]
    pub fn into_runs(self) -> Vec<StyleRun> {
        self.runs
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.runs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    /// Check that the runs partition `0..len` without gaps or overlap.
    pub(crate) fn covers(&self, len: usize) -> Result<(), String> {
        partition_error(&self.runs, len).map_or(Ok(()), Err)
    }
}

impl From<Vec<StyleRun>> for RunSnapshot {
    fn from(runs: Vec<StyleRun>) -> Self {
        Self::new(runs)
    }
}

impl From<RunSnapshot> for Vec<StyleRun> {
    fn from(snapshot: RunSnapshot) -> Self {
        snapshot.runs
    }
}

impl<'a> IntoIterator for &'a RunSnapshot {
    type Item = &'a StyleRun;
    type IntoIter = std::slice::Iter<'a, StyleRun>;

    fn into_iter(self) -> Self::IntoIter {
        self.runs.iter()
    }
}

/// Describe the first way `runs` fails to partition `0..len`, if any.
pub(crate) fn partition_error(runs: &[StyleRun], len: usize) -> Option<String> {
    let Some(first) = runs.first() else {
        return Some("run list is empty".to_string());
    };
    if first.start != 0 {
        return Some(format!("first run starts at {}", first.start));
    }
    let mut expected = 0;
    for (i, run) in runs.iter().enumerate() {
        if run.start > run.end {
            return Some(format!("run {i} is inverted ({}..={})", run.start, run.end));
        }
        if run.start != expected {
            return Some(format!(
                "run {i} starts at {} but {expected} was expected",
                run.start
            ));
        }
        expected = run.end + 1;
    }
    if expected != len {
        return Some(format!("runs cover {expected} elements, sequence has {len}"));
    }
    None
}
