//! Bundle/resource provider.
//! A bundle is a resource root directory queried for files by type.

use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::config::Config;
use crate::platform::bundle_resources_for_exe;

/// A located bundle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bundle {
    root: PathBuf,
}

impl Bundle {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Resource root of the bundle.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

/// Host bundle services used by the facade.
pub trait BundleProvider {
    /// The application's own bundle.
    fn main_bundle(&self) -> Option<Bundle>;

    /// Bundle rooted at `path`, if one can be located there.
    fn bundle_at(&self, path: &Path) -> Option<Bundle>;

    /// Resource files of type `ext` in `bundle`.
    fn resource_paths(&self, bundle: &Bundle, ext: &str) -> Vec<PathBuf>;
}

/// Directory-backed bundles.
#[derive(Debug, Clone, Default)]
pub struct OsBundles {
    resources_dir: Option<PathBuf>,
}

impl OsBundles {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `dir` as the main bundle's resource root instead of deriving it from the executable.
    pub fn rooted_at(dir: impl Into<PathBuf>) -> Self {
        Self { resources_dir: Some(dir.into()) }
    }

    pub fn from_config(cfg: &Config) -> Self {
        Self { resources_dir: cfg.resources_dir.clone() }
    }
}

impl BundleProvider for OsBundles {
    fn main_bundle(&self) -> Option<Bundle> {
        if let Some(dir) = &self.resources_dir {
            return self.bundle_at(dir);
        }
        let exe = std::env::current_exe().ok()?;
        let root = bundle_resources_for_exe(&exe)?;
        self.bundle_at(&root)
    }

    fn bundle_at(&self, path: &Path) -> Option<Bundle> {
        match fs::metadata(path) {
            Ok(meta) if meta.is_dir() => {
                let root = dunce::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
                Some(Bundle::new(root))
            }
            _ => {
                debug!(path = %path.display(), "No bundle at path");
                None
            }
        }
    }

    fn resource_paths(&self, bundle: &Bundle, ext: &str) -> Vec<PathBuf> {
        let wanted = ext.trim_start_matches('.');
        let entries = match fs::read_dir(bundle.root()) {
            Ok(rd) => rd,
            Err(e) => {
                debug!(root = %bundle.root().display(), error = %e, "Cannot read bundle root");
                return Vec::new();
            }
        };

        let mut found: Vec<PathBuf> = entries
            .filter_map(Result::ok)
            .filter(|e| e.file_type().map(|t| t.is_file()).unwrap_or(false))
            .map(|e| e.path())
            .filter(|p| {
                wanted.is_empty()
                    || p.extension().and_then(|x| x.to_str()) == Some(wanted)
            })
            .collect();
        found.sort();
        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::prelude::*;

    #[test]
    fn resource_paths_filter_by_type() {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child("b.txt").touch().unwrap();
        temp.child("a.txt").touch().unwrap();
        temp.child("c.json").touch().unwrap();
        temp.child("nested").child("d.txt").touch().unwrap();

        let bundles = OsBundles::new();
        let bundle = bundles.bundle_at(temp.path()).unwrap();
        let names: Vec<String> = bundles
            .resource_paths(&bundle, ".txt")
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.txt", "b.txt"]);

        assert_eq!(bundles.resource_paths(&bundle, "").len(), 3);
    }

    #[test]
    fn bundle_at_requires_a_directory() {
        let temp = assert_fs::TempDir::new().unwrap();
        let file = temp.child("plain.txt");
        file.touch().unwrap();
        let bundles = OsBundles::new();
        assert!(bundles.bundle_at(file.path()).is_none());
        assert!(bundles.bundle_at(&temp.path().join("missing")).is_none());
    }

    #[test]
    fn configured_root_is_the_main_bundle() {
        let temp = assert_fs::TempDir::new().unwrap();
        let bundles = OsBundles::rooted_at(temp.path());
        let main = bundles.main_bundle().unwrap();
        assert_eq!(main.root(), dunce::canonicalize(temp.path()).unwrap());
    }
}
