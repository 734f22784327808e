//! Filesystem operations: the facade and the collaborators it is built from.

mod bundle;
mod facade;
mod helpers;
mod outcome;
mod provider;
mod sink;

pub use bundle::{Bundle, BundleProvider, OsBundles};
pub use facade::FileManager;
pub use helpers::{describe_io_error, io_error_with_help, io_error_with_help_io};
pub use outcome::{Failure, Outcome, Skip};
pub use provider::{FileSystem, OsFileSystem};
pub use sink::{
    diagnostic_message, Diagnostic, DiagnosticSink, MemorySink, TracingSink, COMPONENT_TAG,
};
