//! Core library for `coreos_files`.
//!
//! Guarded, best-effort file operations for applications: existence checks,
//! copy/move/delete/overwrite, path decomposition, recursive listing and
//! bundle resource lookup, plus a small device/OS metadata reporter.
//!
//! Operations never raise. A failed precondition is skipped, an OS failure
//! is reported to a diagnostic sink; both are visible in the returned
//! [`Outcome`].
//!
//! ```no_run
//! use coreos_files::FileManager;
//!
//! let fm = FileManager::new();
//! let cache = fm.application_cache_directory()?;
//! if let Some(src) = fm.resource_paths("txt").into_iter().next() {
//!     let dest = cache.join(fm.file_name(&src));
//!     fm.copy(&src, &dest);
//! }
//! # Ok::<(), coreos_files::FileOpsError>(())
//! ```

pub mod config;
pub mod errors;
pub mod fs_ops;
pub mod logging;
pub mod output;
pub mod paths;
pub mod platform;
pub mod system_info;

pub use config::{
    create_template_config, default_config_path, load_config_from_xml_path, Config, LogLevel,
};
pub use errors::{FileOpsError, OpKind, StandardDirectory};
pub use fs_ops::{
    Bundle, BundleProvider, Diagnostic, DiagnosticSink, FileManager, FileSystem, MemorySink,
    OsBundles, OsFileSystem, Outcome, Skip, TracingSink,
};
pub use logging::init_tracing;
pub use system_info::{system_information, SystemInfo};
