//! File operations facade.
//! Guarded, best-effort operations over an injected file-system provider.
//!
//! Behavior:
//! - A failed precondition skips the operation and returns `Outcome::Skipped`.
//! - An OS failure is reported to the diagnostic sink and returned as
//!   `Outcome::Failed`; nothing is ever raised to the caller.
//! - `copy` never replaces an existing destination, `move_item` does not
//!   check the destination at all. The provider decides what an existing
//!   destination means for a move (the OS provider refuses it).

use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::config::Config;
use crate::errors::{FileOpsError, OpKind, StandardDirectory};
use crate::paths;

use super::bundle::{BundleProvider, OsBundles};
use super::outcome::{Failure, Outcome, Skip};
use super::provider::{FileSystem, OsFileSystem};
use super::sink::{DiagnosticSink, TracingSink};

pub struct FileManager<F = OsFileSystem, B = OsBundles, S = TracingSink> {
    fs: F,
    bundles: B,
    sink: S,
}

impl FileManager {
    /// Host file system, executable-derived bundle, tracing diagnostics.
    pub fn new() -> Self {
        Self::with_parts(OsFileSystem::new(), OsBundles::new(), TracingSink)
    }

    /// Host providers laid out according to `cfg`.
    pub fn from_config(cfg: &Config) -> Self {
        Self::with_parts(OsFileSystem::from_config(cfg), OsBundles::from_config(cfg), TracingSink)
    }
}

impl Default for FileManager {
    fn default() -> Self {
        Self::new()
    }
}

impl<F, B, S> FileManager<F, B, S>
where
    F: FileSystem,
    B: BundleProvider,
    S: DiagnosticSink,
{
    pub fn with_parts(fs: F, bundles: B, sink: S) -> Self {
        Self { fs, bundles, sink }
    }

    pub fn file_system(&self) -> &F {
        &self.fs
    }

    pub fn bundles(&self) -> &B {
        &self.bundles
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn exists(&self, path: impl AsRef<Path>) -> bool {
        self.fs.exists(path.as_ref())
    }

    pub fn current_directory_path(&self) -> Result<PathBuf, FileOpsError> {
        self.fs
            .current_dir()
            .map_err(|source| FileOpsError::Io { op: "current directory", source })
    }

    pub fn application_documents_directory(&self) -> Result<PathBuf, FileOpsError> {
        self.standard_directory(StandardDirectory::Documents)
    }

    pub fn application_cache_directory(&self) -> Result<PathBuf, FileOpsError> {
        self.standard_directory(StandardDirectory::Cache)
    }

    fn standard_directory(&self, domain: StandardDirectory) -> Result<PathBuf, FileOpsError> {
        self.fs
            .standard_dir(domain)
            .ok_or(FileOpsError::DirectoryUnavailable(domain))
    }

    /// Resource root of the main bundle.
    pub fn application_resources_directory(&self) -> Option<PathBuf> {
        self.bundles.main_bundle().map(|b| b.root().to_path_buf())
    }

    /// Remove `path` (recursively for directories). Skipped when nothing is there.
    pub fn delete(&self, path: impl AsRef<Path>) -> Outcome {
        let path = path.as_ref();
        if !self.fs.exists(path) {
            return Outcome::Skipped(Skip::SourceMissing);
        }
        let res = self.fs.remove(path);
        self.settle(OpKind::Delete, path, res)
    }

    /// Copy `source` to `destination`. Never replaces an existing destination.
    pub fn copy(&self, source: impl AsRef<Path>, destination: impl AsRef<Path>) -> Outcome {
        let (src, dest) = (source.as_ref(), destination.as_ref());
        if !self.fs.exists(src) {
            return Outcome::Skipped(Skip::SourceMissing);
        }
        if self.fs.exists(dest) {
            return Outcome::Skipped(Skip::DestinationExists);
        }
        let res = self.fs.copy(src, dest);
        self.settle(OpKind::Copy, src, res)
    }

    /// Replace an existing `destination` with a copy of `source`.
    ///
    /// Only acts when both paths exist: a missing destination is skipped, not
    /// created. Use [`FileManager::copy`] for that case. Two paths naming the
    /// same item are skipped; deleting one would destroy the source.
    pub fn overwrite(&self, source: impl AsRef<Path>, destination: impl AsRef<Path>) -> Outcome {
        let (src, dest) = (source.as_ref(), destination.as_ref());
        if !self.fs.exists(src) {
            return Outcome::Skipped(Skip::SourceMissing);
        }
        if !self.fs.exists(dest) {
            return Outcome::Skipped(Skip::DestinationMissing);
        }
        if self.fs.same_item(src, dest) {
            return Outcome::Skipped(Skip::SameItem);
        }
        match self.delete(dest) {
            failed @ Outcome::Failed(_) => failed,
            _ => self.copy(src, dest),
        }
    }

    /// Move `source` to `destination`.
    ///
    /// Unlike [`FileManager::copy`] the destination is not checked first; if the
    /// provider refuses it, the failure is reported like any other.
    pub fn move_item(&self, source: impl AsRef<Path>, destination: impl AsRef<Path>) -> Outcome {
        let (src, dest) = (source.as_ref(), destination.as_ref());
        if !self.fs.exists(src) {
            return Outcome::Skipped(Skip::SourceMissing);
        }
        let res = self.fs.rename(src, dest);
        self.settle(OpKind::Move, src, res)
    }

    /// Every entry under `dir`, relative to it. Order is whatever the OS yields.
    pub fn list_directory(&self, dir: impl AsRef<Path>) -> Vec<PathBuf> {
        let dir = dir.as_ref();
        self.fs.enumerate(dir).unwrap_or_else(|e| {
            debug!(
                dir = %dir.display(),
                error = %e,
                "Directory not enumerable; returning no entries"
            );
            Vec::new()
        })
    }

    /// Resources of type `ext` in the main bundle.
    pub fn resource_paths(&self, ext: &str) -> Vec<PathBuf> {
        match self.bundles.main_bundle() {
            Some(bundle) => self.bundles.resource_paths(&bundle, ext),
            None => Vec::new(),
        }
    }

    /// Resources of type `ext` in the bundle located at `bundle_root`.
    pub fn resource_paths_in(&self, ext: &str, bundle_root: impl AsRef<Path>) -> Vec<PathBuf> {
        match self.bundles.bundle_at(bundle_root.as_ref()) {
            Some(bundle) => self.bundles.resource_paths(&bundle, ext),
            None => Vec::new(),
        }
    }

    /// `directory/name`, or `None` when `directory` does not exist.
    pub fn join_path(
        &self,
        name: impl AsRef<Path>,
        directory: impl AsRef<Path>,
    ) -> Option<PathBuf> {
        let directory = directory.as_ref();
        if !self.fs.exists(directory) {
            return None;
        }
        Some(directory.join(name))
    }

    pub fn file_name(&self, path: impl AsRef<Path>) -> String {
        paths::file_name(path.as_ref())
    }

    pub fn file_name_without_extension(&self, path: impl AsRef<Path>) -> String {
        paths::file_name_without_extension(path.as_ref())
    }

    pub fn directory(&self, path: impl AsRef<Path>) -> PathBuf {
        paths::directory(path.as_ref())
    }

    fn settle(&self, kind: OpKind, path: &Path, res: io::Result<()>) -> Outcome {
        match res {
            Ok(()) => {
                info!(op = kind.tag(), path = %path.display(), "File operation completed");
                Outcome::Done
            }
            Err(error) => {
                self.sink.report(kind, path, &error);
                Outcome::Failed(Failure { kind, error })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs_ops::sink::MemorySink;
    use assert_fs::prelude::*;
    use std::cell::Cell;

    /// Provider whose mutating calls always fail; queries go to the host.
    struct DenyingFs {
        attempts: Cell<usize>,
    }

    impl DenyingFs {
        fn new() -> Self {
            Self { attempts: Cell::new(0) }
        }

        fn deny(&self) -> io::Result<()> {
            self.attempts.set(self.attempts.get() + 1);
            Err(io::Error::from(io::ErrorKind::PermissionDenied))
        }
    }

    impl FileSystem for DenyingFs {
        fn exists(&self, path: &Path) -> bool {
            path.exists()
        }
        fn remove(&self, _path: &Path) -> io::Result<()> {
            self.deny()
        }
        fn copy(&self, _from: &Path, _to: &Path) -> io::Result<()> {
            self.deny()
        }
        fn rename(&self, _from: &Path, _to: &Path) -> io::Result<()> {
            self.deny()
        }
        fn enumerate(&self, _dir: &Path) -> io::Result<Vec<PathBuf>> {
            Err(io::Error::from(io::ErrorKind::PermissionDenied))
        }
        fn current_dir(&self) -> io::Result<PathBuf> {
            Err(io::Error::from(io::ErrorKind::NotFound))
        }
        fn standard_dir(&self, _domain: StandardDirectory) -> Option<PathBuf> {
            None
        }
    }

    fn denying() -> FileManager<DenyingFs, OsBundles, MemorySink> {
        FileManager::with_parts(DenyingFs::new(), OsBundles::new(), MemorySink::new())
    }

    #[test]
    fn failed_delete_is_reported_not_raised() {
        let temp = assert_fs::TempDir::new().unwrap();
        let f = temp.child("keep.txt");
        f.write_str("x").unwrap();

        let fm = denying();
        let outcome = fm.delete(f.path());
        match outcome {
            Outcome::Failed(Failure { kind, ref error }) => {
                assert_eq!(kind, OpKind::Delete);
                assert_eq!(error.kind(), io::ErrorKind::PermissionDenied);
            }
            other => panic!("expected failure, got {other}"),
        }
        let entries = fm.sink().entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].kind, OpKind::Delete);
        assert!(entries[0].message.contains("Error Deleting File"));
        f.assert("x");
    }

    #[test]
    fn skips_never_reach_the_provider_or_sink() {
        let temp = assert_fs::TempDir::new().unwrap();
        let missing = temp.path().join("missing.txt");
        let present = temp.child("present.txt");
        present.touch().unwrap();

        let fm = denying();
        let present = present.path();
        let skip = |o: Outcome| o.skip_reason();
        assert_eq!(skip(fm.delete(&missing)), Some(Skip::SourceMissing));
        assert_eq!(skip(fm.copy(&missing, temp.path().join("x"))), Some(Skip::SourceMissing));
        assert_eq!(skip(fm.copy(present, present)), Some(Skip::DestinationExists));
        assert_eq!(skip(fm.overwrite(present, &missing)), Some(Skip::DestinationMissing));
        assert_eq!(skip(fm.overwrite(present, present)), Some(Skip::SameItem));
        assert_eq!(skip(fm.move_item(&missing, present)), Some(Skip::SourceMissing));

        assert_eq!(fm.file_system().attempts.get(), 0);
        assert!(fm.sink().is_empty());
    }

    #[test]
    fn overwrite_stops_when_delete_fails() {
        let temp = assert_fs::TempDir::new().unwrap();
        let src = temp.child("src.txt");
        let dest = temp.child("dest.txt");
        src.write_str("new").unwrap();
        dest.write_str("old").unwrap();

        let fm = denying();
        let outcome = fm.overwrite(src.path(), dest.path());
        assert!(outcome.is_failed());
        assert_eq!(fm.file_system().attempts.get(), 1);
        dest.assert("old");
    }

    #[test]
    fn move_failure_is_tagged_as_move() {
        let temp = assert_fs::TempDir::new().unwrap();
        let src = temp.child("src.txt");
        src.touch().unwrap();

        let fm = denying();
        assert!(fm.move_item(src.path(), temp.path().join("dst.txt")).is_failed());
        assert_eq!(fm.sink().entries()[0].kind, OpKind::Move);
    }

    #[test]
    fn unavailable_directories_are_errors_not_panics() {
        let fm = denying();
        assert!(matches!(
            fm.application_documents_directory(),
            Err(FileOpsError::DirectoryUnavailable(StandardDirectory::Documents))
        ));
        assert!(matches!(
            fm.application_cache_directory(),
            Err(FileOpsError::DirectoryUnavailable(StandardDirectory::Cache))
        ));
        assert!(matches!(fm.current_directory_path(), Err(FileOpsError::Io { .. })));
        assert!(fm.list_directory("/").is_empty());
    }

    #[test]
    fn join_path_requires_existing_directory() {
        let temp = assert_fs::TempDir::new().unwrap();
        let fm = FileManager::new();
        assert_eq!(fm.join_path("a.txt", temp.path()), Some(temp.path().join("a.txt")));
        assert_eq!(fm.join_path("a.txt", temp.path().join("nope")), None);
    }

    #[test]
    fn overwrite_of_an_aliased_path_keeps_the_file() {
        let temp = assert_fs::TempDir::new().unwrap();
        let f = temp.child("keep.txt");
        f.write_str("data").unwrap();
        let alias = temp.path().join(".").join("keep.txt");

        let fm = FileManager::with_parts(OsFileSystem::new(), OsBundles::new(), MemorySink::new());
        assert_eq!(fm.overwrite(f.path(), f.path()).skip_reason(), Some(Skip::SameItem));
        assert_eq!(fm.overwrite(f.path(), &alias).skip_reason(), Some(Skip::SameItem));
        f.assert("data");
        assert!(fm.sink().is_empty());
    }
}
