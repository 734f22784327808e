//! Result of a guarded file operation.
//! Operations never raise: a failed precondition is a skip, an OS error is a
//! reported failure. Callers that ignore the value observe the same behavior.

use std::fmt;
use std::io;

use crate::errors::OpKind;

/// Why an operation was not attempted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Skip {
    /// The source (or the path to delete) does not exist.
    SourceMissing,
    /// `copy` refuses to replace an existing destination.
    DestinationExists,
    /// `overwrite` only replaces a destination that already exists.
    DestinationMissing,
    /// `overwrite` was given two paths naming the same item.
    SameItem,
}

impl fmt::Display for Skip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Skip::SourceMissing => "source does not exist",
            Skip::DestinationExists => "destination already exists",
            Skip::DestinationMissing => "destination does not exist",
            Skip::SameItem => "source and destination are the same item",
        };
        f.write_str(s)
    }
}

/// An OS-level failure, already reported to the diagnostic sink.
#[derive(Debug)]
pub struct Failure {
    pub kind: OpKind,
    pub error: io::Error,
}

#[derive(Debug)]
pub enum Outcome {
    Done,
    Skipped(Skip),
    Failed(Failure),
}

impl Outcome {
    pub fn is_done(&self) -> bool {
        matches!(self, Outcome::Done)
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, Outcome::Skipped(_))
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Outcome::Failed(_))
    }

    /// The skip reason, if the operation was skipped.
    pub fn skip_reason(&self) -> Option<Skip> {
        match self {
            Outcome::Skipped(reason) => Some(*reason),
            _ => None,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Done => f.write_str("done"),
            Outcome::Skipped(reason) => write!(f, "skipped: {reason}"),
            Outcome::Failed(failure) => write!(f, "{}: {}", failure.kind, failure.error),
        }
    }
}
