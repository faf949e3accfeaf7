use std::io;
use std::path::Path;

use xor_sweep::engine::{io_error_with_help, io_error_with_help_io, io_hint};

#[test]
fn notfound_fallback_hint_includes_path() {
    let p = Path::new("/nonexistent/path/for/test");
    let f = io_error_with_help("open", p);
    let err = f(io::Error::from(io::ErrorKind::NotFound));
    let msg = format!("{}", err);
    assert!(msg.contains("open"));
    assert!(msg.contains(p.to_string_lossy().as_ref()));
    assert!(msg.contains("path not found"));
}

#[cfg(unix)]
#[test]
fn enospc_hint_present() {
    let p = Path::new("/tmp");
    let f = io_error_with_help("write", p);
    let err = f(io::Error::from_raw_os_error(libc::ENOSPC));
    let msg = format!("{}", err);
    assert!(msg.contains("insufficient space"), "msg was: {}", msg);
    assert!(msg.contains("os code"), "should include os code in message");
}

#[cfg(unix)]
#[test]
fn erofs_and_eisdir_hints_present() {
    let p = Path::new("/tmp");
    let m1 = format!("{}", io_error_with_help("write", p)(io::Error::from_raw_os_error(libc::EROFS)));
    let m2 = format!("{}", io_error_with_help("write", p)(io::Error::from_raw_os_error(libc::EISDIR)));
    assert!(m1.contains("read-only filesystem"), "msg was: {}", m1);
    assert!(m2.contains("directory is in the way"), "msg was: {}", m2);
}

#[test]
fn io_variant_keeps_error_kind() {
    let p = Path::new("/tmp/x");
    let f = io_error_with_help_io("remove source", p);
    let err = f(io::Error::from(io::ErrorKind::PermissionDenied));
    assert_eq!(err.kind(), io::ErrorKind::PermissionDenied);
    assert!(err.to_string().contains("remove source"));
    assert!(err.to_string().contains("permission denied"));
}

#[test]
fn unknown_errors_have_no_hint() {
    assert!(io_hint(&io::Error::other("boom")).is_none());
}
