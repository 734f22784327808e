//! Path decomposition helpers.
//! Pure functions over path components; nothing here touches the disk.

use std::path::{Path, PathBuf};

/// Last path component, extension included. Empty when there is none (e.g. `/` or `..`).
pub fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Last path component without its final extension.
///
/// `archive.tar.gz` yields `archive.tar`; dotfiles like `.profile` are kept whole.
pub fn file_name_without_extension(path: &Path) -> String {
    path.file_stem()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Every component before the last one.
///
/// Works on components, so a directory sharing the file's name is never
/// truncated. No trailing separator is kept.
pub fn directory(path: &Path) -> PathBuf {
    path.parent().map(Path::to_path_buf).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_simple_file_path() {
        let p = Path::new("/a/b/test.txt");
        assert_eq!(file_name(p), "test.txt");
        assert_eq!(file_name_without_extension(p), "test");
        assert_eq!(directory(p), PathBuf::from("/a/b"));
    }

    #[test]
    fn only_the_last_extension_is_removed() {
        assert_eq!(file_name_without_extension(Path::new("x/archive.tar.gz")), "archive.tar");
        assert_eq!(file_name_without_extension(Path::new("x/.profile")), ".profile");
        assert_eq!(file_name_without_extension(Path::new("x/README")), "README");
    }

    #[test]
    fn directory_named_like_the_file_is_kept() {
        let p = Path::new("/a/a.txt/a.txt");
        assert_eq!(directory(p), PathBuf::from("/a/a.txt"));
        assert_eq!(directory(p).join(file_name(p)), p);
    }

    #[test]
    fn degenerate_paths_yield_empty_values() {
        assert_eq!(file_name(Path::new("/")), "");
        assert_eq!(directory(Path::new("/")), PathBuf::new());
        assert_eq!(directory(Path::new("plain.txt")), PathBuf::new());
    }

    #[test]
    fn trailing_separator_is_ignored() {
        assert_eq!(file_name(Path::new("/a/b/")), "b");
        assert_eq!(directory(Path::new("/a/b/")), PathBuf::from("/a"));
    }
}
