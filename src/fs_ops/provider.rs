//! OS file-system provider.
//! The facade only talks to the host through this trait, so tests can swap
//! in doubles and no module-wide handle is needed.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::config::Config;
use crate::errors::StandardDirectory;
use crate::platform::copy_symlink;

use super::helpers::io_error_with_help_io;

/// Host file-system services used by the facade.
pub trait FileSystem {
    /// True if any entry (file, directory or symlink) exists at `path`.
    fn exists(&self, path: &Path) -> bool;

    /// Remove a file, symlink or whole directory tree.
    fn remove(&self, path: &Path) -> io::Result<()>;

    /// Copy a file or directory tree. Fails if `to` exists.
    fn copy(&self, from: &Path, to: &Path) -> io::Result<()>;

    /// Move a file or directory. Fails if `to` exists.
    fn rename(&self, from: &Path, to: &Path) -> io::Result<()>;

    /// True if `a` and `b` name the same item.
    fn same_item(&self, a: &Path, b: &Path) -> bool {
        a == b
    }

    /// Recursive listing of `dir`, relative to `dir`.
    fn enumerate(&self, dir: &Path) -> io::Result<Vec<PathBuf>>;

    fn current_dir(&self) -> io::Result<PathBuf>;

    /// First path the host designates for `domain`, if any.
    fn standard_dir(&self, domain: StandardDirectory) -> Option<PathBuf>;
}

/// `std::fs` backed provider. Standard directories come from [`Config`].
#[derive(Debug, Clone, Default)]
pub struct OsFileSystem {
    layout: Config,
}

impl OsFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(cfg: &Config) -> Self {
        Self { layout: cfg.clone() }
    }
}

impl FileSystem for OsFileSystem {
    fn exists(&self, path: &Path) -> bool {
        fs::symlink_metadata(path).is_ok()
    }

    fn remove(&self, path: &Path) -> io::Result<()> {
        remove_entry(path)
    }

    fn copy(&self, from: &Path, to: &Path) -> io::Result<()> {
        refuse_existing(to)?;
        let res = if fs::metadata(from)?.is_dir() {
            refuse_nested(from, to)?;
            copy_tree(from, to)
        } else {
            fs::copy(from, to).map(|_| ())
        };
        if res.is_err() {
            discard_partial(to);
        }
        res
    }

    fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
        refuse_existing(to)?;
        self.rename_with(from, to, |a, b| fs::rename(a, b))
    }

    fn same_item(&self, a: &Path, b: &Path) -> bool {
        match (dunce::canonicalize(a), dunce::canonicalize(b)) {
            (Ok(a), Ok(b)) => a == b,
            _ => a == b,
        }
    }

    fn enumerate(&self, dir: &Path) -> io::Result<Vec<PathBuf>> {
        if !fs::metadata(dir)?.is_dir() {
            return Err(io::Error::new(io::ErrorKind::InvalidInput, "not a directory"));
        }
        let entries = WalkDir::new(dir)
            .min_depth(1)
            .into_iter()
            .filter_map(|res| match res {
                Ok(entry) => Some(entry),
                Err(e) => {
                    debug!(error = %e, "Skipping unreadable entry");
                    None
                }
            })
            .filter_map(|entry| entry.path().strip_prefix(dir).ok().map(Path::to_path_buf))
            .collect();
        Ok(entries)
    }

    fn current_dir(&self) -> io::Result<PathBuf> {
        std::env::current_dir()
    }

    fn standard_dir(&self, domain: StandardDirectory) -> Option<PathBuf> {
        self.layout.standard_dir(domain)
    }
}

impl OsFileSystem {
    /// Run `attempt`; on a cross-device error copy `from` to `to`, then remove `from`.
    ///
    /// A failed copy leaves only `from`. If removing `from` fails after a
    /// complete copy, both remain and the removal error is returned.
    fn rename_with<R>(&self, from: &Path, to: &Path, attempt: R) -> io::Result<()>
    where
        R: FnOnce(&Path, &Path) -> io::Result<()>,
    {
        match attempt(from, to) {
            Ok(()) => Ok(()),
            Err(e) if is_cross_device(&e) => {
                warn!(
                    src = %from.display(),
                    dest = %to.display(),
                    "Rename crosses filesystems, falling back to copy+remove"
                );
                self.copy(from, to)?;
                self.remove(from).inspect_err(|e| {
                    warn!(
                        src = %from.display(),
                        error = %e,
                        "Source left in place after cross-device copy"
                    );
                })
            }
            Err(e) => Err(e),
        }
    }
}

fn remove_entry(path: &Path) -> io::Result<()> {
    let meta = fs::symlink_metadata(path)?;
    if meta.is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    }
}

/// Best-effort removal of whatever a failed copy left at `to`.
fn discard_partial(to: &Path) {
    match remove_entry(to) {
        Ok(()) => debug!(dest = %to.display(), "Removed partial copy"),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => warn!(dest = %to.display(), error = %e, "Could not remove partial copy"),
    }
}

/// `to` with its parent resolved, so it can be compared against canonical paths.
fn resolved_target(to: &Path) -> io::Result<PathBuf> {
    let parent = match to.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let name = to.file_name().ok_or_else(|| {
        io::Error::new(io::ErrorKind::InvalidInput, "destination has no file name")
    })?;
    Ok(dunce::canonicalize(parent)?.join(name))
}

/// A directory cannot be copied into itself.
fn refuse_nested(from: &Path, to: &Path) -> io::Result<()> {
    let root = dunce::canonicalize(from)?;
    if resolved_target(to)?.starts_with(&root) {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("cannot copy '{}' into itself at '{}'", from.display(), to.display()),
        ));
    }
    Ok(())
}

fn refuse_existing(to: &Path) -> io::Result<()> {
    if fs::symlink_metadata(to).is_ok() {
        return Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("'{}' already exists", to.display()),
        ));
    }
    Ok(())
}

#[cfg(unix)]
fn is_cross_device(e: &io::Error) -> bool {
    e.raw_os_error() == Some(libc::EXDEV)
}

#[cfg(windows)]
fn is_cross_device(e: &io::Error) -> bool {
    // ERROR_NOT_SAME_DEVICE
    e.raw_os_error() == Some(17)
}

#[cfg(not(any(unix, windows)))]
fn is_cross_device(_e: &io::Error) -> bool {
    false
}

/// Recreate the directory tree of `src` at `dst`. Files are copied, symlinks
/// are recreated as symlinks (never followed).
fn copy_tree(src: &Path, dst: &Path) -> io::Result<()> {
    for entry in WalkDir::new(src) {
        let entry = entry.map_err(io::Error::from)?;
        let rel = entry
            .path()
            .strip_prefix(src)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
        let target = dst.join(rel);
        let ftype = entry.file_type();
        if ftype.is_dir() {
            fs::create_dir_all(&target)
                .map_err(io_error_with_help_io("create directory", &target))?;
        } else if ftype.is_symlink() {
            copy_symlink(entry.path(), &target)
                .map_err(io_error_with_help_io("copy symlink", entry.path()))?;
        } else {
            fs::copy(entry.path(), &target)
                .map_err(io_error_with_help_io("copy file", entry.path()))?;
        }
    }
    Ok(())
}
