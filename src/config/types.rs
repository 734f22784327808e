//! Core configuration types.
//! - Config holds the standard-directory layout and logging settings.
//! - LogLevel represents verbosity with simple parsing helpers.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::errors::StandardDirectory;

/// Program-defined verbosity levels exposed to users/config.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Only errors
    Quiet,
    /// Informational output (default)
    #[default]
    Normal,
    /// More info (like verbose)
    Info,
    /// Debug/trace
    Debug,
}

impl LogLevel {
    /// Parse common string names into our LogLevel (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "quiet" | "error" | "none" => Some(LogLevel::Quiet),
            "normal" => Some(LogLevel::Normal),
            "info" | "verbose" | "detailed" => Some(LogLevel::Info),
            "debug" | "trace" => Some(LogLevel::Debug),
            _ => None,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LogLevel::Quiet => "quiet",
            LogLevel::Normal => "normal",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
        };
        f.write_str(s)
    }
}

impl FromStr for LogLevel {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("invalid log level: '{s}'"))
    }
}

/// Runtime configuration for the file manager.
///
/// Every directory is optional; unset ones fall back to what the host reports.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Override for the documents directory
    pub documents_dir: Option<PathBuf>,
    /// Override for the cache directory
    pub cache_dir: Option<PathBuf>,
    /// Resource root of the main bundle
    pub resources_dir: Option<PathBuf>,
    /// Subdirectory appended to host standard directories
    pub app_name: Option<String>,
    /// Console verbosity
    pub log_level: LogLevel,
    /// Optional path to a log file
    pub log_file: Option<PathBuf>,
}

impl Config {
    /// Config whose standard directories are fixed to the given paths.
    pub fn with_directories(documents: impl Into<PathBuf>, cache: impl Into<PathBuf>) -> Self {
        Self {
            documents_dir: Some(documents.into()),
            cache_dir: Some(cache.into()),
            ..Default::default()
        }
    }

    /// Resolve a standard directory.
    ///
    /// An explicit override wins and is used as-is. Otherwise the host
    /// directory is used, with `app_name` appended when set.
    pub fn standard_dir(&self, domain: StandardDirectory) -> Option<PathBuf> {
        let (configured, host) = match domain {
            StandardDirectory::Documents => (&self.documents_dir, dirs::document_dir()),
            StandardDirectory::Cache => (&self.cache_dir, dirs::cache_dir()),
        };
        if let Some(dir) = configured {
            return Some(dir.clone());
        }
        let base = host?;
        Some(match &self.app_name {
            Some(name) => base.join(name),
            None => base,
        })
    }
}
