//! I/O error descriptions.
//!
//! Turns an io::Error into a one-line, human-friendly message with the
//! operation, the path and a platform-aware hint. Used by the diagnostic
//! sinks and by the config code paths that return anyhow/io errors.
//!
//! Usage:
//!   fs::create_dir_all(dir).map_err(io_error_with_help("create dir", dir))?;
//!   File::open(p).map_err(io_error_with_help_io("open file", p))?;

use anyhow::anyhow;
use std::io;
use std::path::Path;

/// Hint derived from a raw OS error code.
#[cfg(unix)]
fn hint_for_os_code(code: i32) -> Option<&'static str> {
    match code {
        libc::EACCES | libc::EPERM => {
            Some("permission denied; check ownership and write permissions")
        }
        libc::EXDEV => Some("cross-filesystem; a plain rename is not possible"),
        libc::EBUSY | libc::ETXTBSY => Some("resource busy; the file is in use"),
        libc::ENOENT => Some("path not found; verify it exists"),
        libc::EEXIST => Some("already exists; remove the target first"),
        libc::ENOTEMPTY => Some("directory not empty"),
        libc::ENOSPC => Some("insufficient space on device"),
        libc::EROFS => Some("read-only filesystem; cannot write here"),
        libc::ELOOP => Some("too many symbolic link levels; possible symlink cycle"),
        libc::ENAMETOOLONG => Some("filename or path too long"),
        libc::EMFILE => Some("process file descriptor limit reached"),
        _ => None,
    }
}

/// Hint derived from a raw OS error code.
#[cfg(windows)]
fn hint_for_os_code(code: i32) -> Option<&'static str> {
    match code {
        5 => Some("access denied; check permissions"),   // ERROR_ACCESS_DENIED
        17 => Some("not same device; cross-filesystem move"), // ERROR_NOT_SAME_DEVICE
        32 => Some("sharing violation; the file is in use"), // ERROR_SHARING_VIOLATION
        2 | 3 => Some("path not found; verify it exists"),
        80 | 183 => Some("already exists; remove the target first"),
        112 => Some("insufficient disk space"),
        19 => Some("write protected or read-only media"),
        206 => Some("filename or path too long"),
        _ => None,
    }
}

#[cfg(not(any(unix, windows)))]
fn hint_for_os_code(_code: i32) -> Option<&'static str> {
    None
}

fn hint_for_kind(kind: io::ErrorKind) -> Option<&'static str> {
    match kind {
        io::ErrorKind::PermissionDenied => {
            Some("permission denied; check ownership and write permissions")
        }
        io::ErrorKind::NotFound => Some("path not found; verify it exists"),
        io::ErrorKind::AlreadyExists => Some("already exists; remove the target first"),
        io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut => Some("busy or timed out"),
        _ => None,
    }
}

/// Format `"<op> '<path>': <error> (<hint>) [os code: N]"`.
pub fn describe_io_error(op: &str, path: &Path, e: &io::Error) -> String {
    let mut msg = format!("{} '{}': {}", op, path.display(), e);

    let hint = match e.raw_os_error() {
        Some(code) => hint_for_os_code(code),
        None => hint_for_kind(e.kind()),
    };
    if let Some(h) = hint {
        msg.push_str(" (");
        msg.push_str(h);
        msg.push(')');
    }
    if let Some(code) = e.raw_os_error() {
        msg.push_str(&format!(" [os code: {}]", code));
    }
    msg
}

/// Adapter for anyhow::Result code.
pub fn io_error_with_help<'a>(
    op: &'a str,
    path: &'a Path,
) -> impl FnOnce(io::Error) -> anyhow::Error + 'a {
    move |e: io::Error| anyhow!(describe_io_error(op, path, &e))
}

/// Adapter for io::Result code; keeps the original ErrorKind.
pub fn io_error_with_help_io<'a>(
    op: &'a str,
    path: &'a Path,
) -> impl FnOnce(io::Error) -> io::Error + 'a {
    move |e: io::Error| io::Error::new(e.kind(), describe_io_error(op, path, &e))
}
