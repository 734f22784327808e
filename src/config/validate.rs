//! Config validation logic.
//! Makes sure the standard directories exist and are writable, and that a
//! configured resource root is a real directory.

use anyhow::{bail, Context, Result};
use std::fs;
use std::path::Path;
use tracing::{debug, error, info};

use crate::errors::StandardDirectory;
use crate::fs_ops::io_error_with_help;

use super::types::Config;

impl Config {
    /// Create missing documents/cache directories and verify they are usable.
    pub fn validate(&self) -> Result<()> {
        for domain in [StandardDirectory::Documents, StandardDirectory::Cache] {
            let Some(dir) = self.standard_dir(domain) else {
                bail!("No {domain} directory is available on this system");
            };
            let name = format!("{domain} directory");
            ensure_dir_is_or_create(&dir, &name)?;
            ensure_writable(&dir, &name)?;
        }

        if let Some(res) = &self.resources_dir {
            if !res.is_dir() {
                error!("resources_dir is not a directory: {}", res.display());
                bail!("resources_dir is not a directory: {}", res.display());
            }
        }

        info!(
            "Config validated: documents='{}' cache='{}' resources='{}'",
            display_opt(self.standard_dir(StandardDirectory::Documents).as_deref()),
            display_opt(self.standard_dir(StandardDirectory::Cache).as_deref()),
            display_opt(self.resources_dir.as_deref()),
        );
        Ok(())
    }
}

fn display_opt(p: Option<&Path>) -> String {
    p.map(|p| p.display().to_string())
        .unwrap_or_else(|| "<none>".into())
}

/// Ensure directory exists (create if missing). If exists, it must be a directory.
fn ensure_dir_is_or_create(path: &Path, name: &str) -> Result<()> {
    if path.exists() {
        if !path.is_dir() {
            error!("{name} exists but isn't a directory: {}", path.display());
            bail!("{name} exists but isn't a directory: {}", path.display());
        }
    } else {
        fs::create_dir_all(path).map_err(io_error_with_help("create directory", path))?;
        info!("Created {name}: {}", path.display());
    }
    Ok(())
}

/// Ensure directory is writable using a non-destructive probe file.
fn ensure_writable(dir: &Path, name: &str) -> Result<()> {
    let probe = dir.join(format!(".coreos_files_probe_{}.tmp", std::process::id()));
    fs::OpenOptions::new()
        .create_new(true)
        .write(true)
        .open(&probe)
        .with_context(|| format!("Cannot write to {name} '{}'; check permissions", dir.display()))?;
    let _ = fs::remove_file(&probe);
    debug!("{name} writable: {}", dir.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn creates_missing_standard_directories() {
        let td = tempdir().unwrap();
        let docs = td.path().join("docs");
        let cache = td.path().join("deep").join("cache");
        let cfg = Config::with_directories(&docs, &cache);

        cfg.validate().unwrap();
        assert!(docs.is_dir());
        assert!(cache.is_dir());
        assert_eq!(fs::read_dir(&docs).unwrap().count(), 0, "probe file left behind");
    }

    #[test]
    fn rejects_file_in_place_of_directory() {
        let td = tempdir().unwrap();
        let docs = td.path().join("docs");
        fs::write(&docs, "not a dir").unwrap();
        let cfg = Config::with_directories(&docs, td.path().join("cache"));
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("isn't a directory"), "err was: {err}");
    }

    #[test]
    fn rejects_missing_resources_dir() {
        let td = tempdir().unwrap();
        let cfg = Config {
            resources_dir: Some(td.path().join("nope")),
            ..Config::with_directories(td.path().join("d"), td.path().join("c"))
        };
        assert!(cfg.validate().is_err());
    }
}
