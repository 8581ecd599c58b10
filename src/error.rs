//! Error types for attributed sequence operations.
//!
//! Two kinds of failure exist. Precondition violations are caller mistakes
//! (bad index, touching the terminator, a snapshot that does not fit) and are
//! reported before anything is modified. Invariant violations mean the run
//! partition itself is broken; they are never recoverable.

use std::fmt;

/// Result type alias for sequence operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for sequence operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// Element index outside the valid range for the operation.
    IndexOutOfBounds { index: usize, len: usize },
    /// Attempt to remove the terminator or to insert a second one.
    TerminatorEdit { index: usize },
    /// A captured run list or undo record does not fit the current content.
    InvalidSnapshot { reason: String },
    /// Cached rows were requested while the layout is stale.
    Stale,
    /// The run partition no longer covers the element sequence.
    InvariantViolation(String),
}

impl Error {
    /// True for caller-side misuse that left the sequence untouched.
    #[must_use]
    pub fn is_precondition(&self) -> bool {
        !self.is_invariant()
    }

    /// True when the run partition algorithm produced a broken state.
    #[must_use]
    pub fn is_invariant(&self) -> bool {
        matches!(self, Self::InvariantViolation(_))
    }

    pub(crate) fn snapshot(reason: impl Into<String>) -> Self {
        Self::InvalidSnapshot {
            reason: reason.into(),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IndexOutOfBounds { index, len } => {
                write!(f, "index {index} out of bounds for sequence of {len} elements")
            }
            Self::TerminatorEdit { index } => {
                write!(f, "terminator cannot be inserted or removed (index {index})")
            }
            Self::InvalidSnapshot { reason } => write!(f, "invalid snapshot: {reason}"),
            Self::Stale => write!(f, "layout rows requested while sequence is stale"),
            Self::InvariantViolation(msg) => write!(f, "run partition invariant violated: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::IndexOutOfBounds { index: 7, len: 3 };
        assert!(err.to_string().contains("index 7"));
        assert!(err.to_string().contains("3 elements"));

        let err = Error::TerminatorEdit { index: 4 };
        assert!(err.to_string().contains("terminator"));

        let err = Error::snapshot("run 2 starts at 9");
        assert!(err.to_string().contains("run 2 starts at 9"));
    }

    #[test]
    fn test_error_classification() {
        assert!(Error::Stale.is_precondition());
        assert!(Error::TerminatorEdit { index: 0 }.is_precondition());
        let bug = Error::InvariantViolation("gap after run 1".into());
        assert!(bug.is_invariant());
        assert!(!bug.is_precondition());
    }
}
