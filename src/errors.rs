//! Typed error definitions for coreos_files.
//! Provides a small set of well-known failure modes for better logs and tests.

use std::fmt;
use std::io;
use thiserror::Error;

/// OS-designated storage locations resolved at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StandardDirectory {
    Documents,
    Cache,
}

impl fmt::Display for StandardDirectory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            StandardDirectory::Documents => "documents",
            StandardDirectory::Cache => "cache",
        };
        f.write_str(s)
    }
}

/// Operation kinds reported to a diagnostic sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpKind {
    Delete,
    Copy,
    Move,
}

impl OpKind {
    /// Short label used in diagnostics.
    pub fn label(self) -> &'static str {
        match self {
            OpKind::Delete => "Error Deleting File",
            OpKind::Copy => "Error Copying File",
            OpKind::Move => "Error Moving File",
        }
    }

    /// Lowercase tag used as a structured log field.
    pub fn tag(self) -> &'static str {
        match self {
            OpKind::Delete => "delete",
            OpKind::Copy => "copy",
            OpKind::Move => "move",
        }
    }
}

impl fmt::Display for OpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Error)]
pub enum FileOpsError {
    #[error("No {0} directory is available on this system")]
    DirectoryUnavailable(StandardDirectory),

    #[error("I/O error during {op}: {source}")]
    Io {
        op: &'static str,
        #[source]
        source: io::Error,
    },
}
