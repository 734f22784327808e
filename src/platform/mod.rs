//! Platform-specific helpers.
//! This module hides OS differences (Unix/Windows) behind a uniform API so
//! the rest of the codebase can remain platform-agnostic.

use std::path::{Path, PathBuf};

#[cfg(unix)]
mod unix;
#[cfg(not(unix))]
mod windows;

#[cfg(unix)]
pub use unix::{
    copy_symlink, device_model, open_log_file_secure_append, os_version, set_dir_mode_0700,
    set_file_mode_0600, write_config_secure_new_0600,
};

#[cfg(not(unix))]
pub use windows::{
    copy_symlink, device_model, open_log_file_secure_append, os_version, set_dir_mode_0700,
    set_file_mode_0600, write_config_secure_new_0600,
};

/// Human-facing name of the running OS.
pub fn os_name() -> &'static str {
    match std::env::consts::OS {
        "macos" => "macOS",
        "ios" => "iOS",
        "linux" => "Linux",
        "android" => "Android",
        "windows" => "Windows",
        "freebsd" => "FreeBSD",
        other => other,
    }
}

/// Resource root for an application executable.
///
/// Inside a macOS app bundle (`X.app/Contents/MacOS/exe`) this is
/// `X.app/Contents/Resources`; everywhere else it is the executable's directory.
pub fn bundle_resources_for_exe(exe: &Path) -> Option<PathBuf> {
    let dir = exe.parent()?;
    if cfg!(target_os = "macos") && dir.ends_with("Contents/MacOS") {
        if let Some(contents) = dir.parent() {
            let resources = contents.join("Resources");
            if resources.is_dir() {
                return Some(resources);
            }
        }
    }
    Some(dir.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_executable_uses_its_directory() {
        let exe = Path::new("/opt/tool/bin/tool");
        assert_eq!(bundle_resources_for_exe(exe), Some(PathBuf::from("/opt/tool/bin")));
    }

    #[cfg(target_os = "macos")]
    #[test]
    fn app_bundle_maps_to_resources() {
        let td = tempfile::tempdir().unwrap();
        let contents = td.path().join("Demo.app").join("Contents");
        std::fs::create_dir_all(contents.join("MacOS")).unwrap();
        std::fs::create_dir_all(contents.join("Resources")).unwrap();
        let exe = contents.join("MacOS").join("Demo");
        assert_eq!(bundle_resources_for_exe(&exe), Some(contents.join("Resources")));
    }

    #[test]
    fn os_name_is_never_empty() {
        assert!(!os_name().is_empty());
    }
}
