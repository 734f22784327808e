//! Diagnostic sinks for failed file operations.
//! The facade reports each OS-level failure once, then discards it.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::error;

use crate::errors::OpKind;

use super::helpers::describe_io_error;

/// Component tag prefixed to every diagnostic message.
pub const COMPONENT_TAG: &str = "COFileManager";

/// Receives failures from the facade. No return value, no retry.
pub trait DiagnosticSink {
    fn report(&self, kind: OpKind, path: &Path, error: &io::Error);
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for &S {
    fn report(&self, kind: OpKind, path: &Path, error: &io::Error) {
        (**self).report(kind, path, error)
    }
}

/// Build the one-line message shared by every sink.
pub fn diagnostic_message(kind: OpKind, path: &Path, error: &io::Error) -> String {
    format!(
        "{} - {} - {}",
        COMPONENT_TAG,
        kind.label(),
        describe_io_error(kind.tag(), path, error)
    )
}

/// Default sink: emits a structured `tracing` error event.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn report(&self, kind: OpKind, path: &Path, err: &io::Error) {
        error!(
            op = kind.tag(),
            path = %path.display(),
            error = %err,
            "{}",
            diagnostic_message(kind, path, err)
        );
    }
}

/// A recorded report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: OpKind,
    pub path: PathBuf,
    pub message: String,
}

/// Keeps every report in memory; useful for callers that surface errors in their own UI.
#[derive(Debug, Default)]
pub struct MemorySink {
    entries: Mutex<Vec<Diagnostic>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the reports received so far.
    pub fn entries(&self) -> Vec<Diagnostic> {
        match self.entries.lock() {
            Ok(g) => g.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }

    pub fn clear(&self) {
        match self.entries.lock() {
            Ok(mut g) => g.clear(),
            Err(poisoned) => poisoned.into_inner().clear(),
        }
    }
}

impl DiagnosticSink for MemorySink {
    fn report(&self, kind: OpKind, path: &Path, err: &io::Error) {
        let entry = Diagnostic {
            kind,
            path: path.to_path_buf(),
            message: diagnostic_message(kind, path, err),
        };
        match self.entries.lock() {
            Ok(mut g) => g.push(entry),
            Err(poisoned) => poisoned.into_inner().push(entry),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_carries_tag_label_and_path() {
        let err = io::Error::from(io::ErrorKind::PermissionDenied);
        let msg = diagnostic_message(OpKind::Delete, Path::new("/x/y.txt"), &err);
        let expected = "COFileManager - Error Deleting File - delete '/x/y.txt'";
        assert!(msg.starts_with(expected), "msg was: {msg}");
        assert!(msg.contains("permission denied"));
    }

    #[test]
    fn memory_sink_records_through_a_reference() {
        let sink = MemorySink::new();
        let borrowed = &sink;
        borrowed.report(OpKind::Move, Path::new("a"), &io::Error::from(io::ErrorKind::NotFound));
        let entries = sink.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].kind, OpKind::Move);
        assert_eq!(entries[0].path, PathBuf::from("a"));
        sink.clear();
        assert!(sink.is_empty());
    }
}
