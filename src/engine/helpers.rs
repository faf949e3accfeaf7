//! I/O helper utilities.
//!
//! Small adapters that enrich io::Error with the operation, the path and a platform-aware
//! hint, usable with map_err in both io::Result and anyhow::Result code paths.
//!
//! Usage:
//!   // in functions returning anyhow::Result<_>
//!   fs::read_dir(dir).map_err(io_error_with_help("list directory", dir))?;
//!
//!   // in functions returning io::Result<_>
//!   File::open(p).map_err(io_error_with_help_io("open file", p))?;

use anyhow::anyhow;
use std::io;
use std::path::Path;

/// Platform-aware hint for an I/O error, if we have one.
pub fn io_hint(e: &io::Error) -> Option<&'static str> {
    if let Some(code) = e.raw_os_error() {
        #[cfg(unix)]
        {
            let hint = match code {
                libc::EACCES | libc::EPERM => Some("permission denied; check ownership and permissions"),
                libc::EBUSY => Some("resource busy; ensure no other process is writing"),
                libc::ENOENT => Some("path not found; verify it exists"),
                libc::EISDIR => Some("a directory is in the way of the output file"),
                libc::ENOTDIR => Some("a path component is not a directory"),
                libc::ENOSPC => Some("insufficient space on device"),
                libc::EROFS => Some("read-only filesystem; cannot write here"),
                libc::ENAMETOOLONG => Some("filename or path too long; shorten path segments"),
                libc::EMFILE => Some("process file descriptor limit reached; close files or raise limits"),
                _ => None,
            };
            if hint.is_some() {
                return hint;
            }
        }
        #[cfg(windows)]
        {
            let hint = match code {
                5 => Some("access denied; check permissions"),
                32 | 33 => Some("sharing violation; file is in use"),
                2 | 3 => Some("path not found; verify it exists"),
                112 => Some("insufficient disk space"),
                19 => Some("write protected / read-only media"),
                206 => Some("filename or path too long"),
                _ => None,
            };
            if hint.is_some() {
                return hint;
            }
        }
    }
    match e.kind() {
        io::ErrorKind::PermissionDenied => Some("permission denied; check ownership and permissions"),
        io::ErrorKind::NotFound => Some("path not found; verify it exists"),
        io::ErrorKind::AlreadyExists => Some("already exists; remove it or choose another name"),
        io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut => {
            Some("busy/timed out; retry after the current writer finishes")
        }
        _ => None,
    }
}

/// Format a human-friendly message with op/path plus hint and OS code.
fn build_message(op: &str, path: &Path, e: &io::Error) -> String {
    let mut msg = format!("{} '{}': {}", op, path.display(), e);
    if let Some(hint) = io_hint(e) {
        msg.push_str(" (");
        msg.push_str(hint);
        msg.push(')');
    }
    if let Some(code) = e.raw_os_error() {
        msg.push_str(&format!(" [os code: {code}]"));
    }
    msg
}

/// Adapter for anyhow::Result code.
pub fn io_error_with_help<'a>(
    op: &'a str,
    path: &'a Path,
) -> impl FnOnce(io::Error) -> anyhow::Error + 'a {
    move |e: io::Error| anyhow!(build_message(op, path, &e))
}

/// Adapter for io::Result code; keeps the original ErrorKind.
pub fn io_error_with_help_io<'a>(
    op: &'a str,
    path: &'a Path,
) -> impl FnOnce(io::Error) -> io::Error + 'a {
    move |e: io::Error| io::Error::new(e.kind(), build_message(op, path, &e))
}
