//! Source-file read lock.
//!
//! Before a source is read we take a non-blocking shared lock on it (fs2: `flock` on Unix,
//! `LockFileEx` on Windows). If some other process holds an exclusive lock the file is
//! still being written or otherwise claimed, so the pass skips it instead of reading a
//! half-finished file. The lock is released when the guard drops.

use fs2::FileExt;
use std::fs::File;
use std::io;
use std::path::Path;
use tracing::trace;

/// RAII guard over an opened, share-locked source file.
#[derive(Debug)]
pub struct SourceLock {
    file: File,
}

impl SourceLock {
    pub fn file(&self) -> &File {
        &self.file
    }
}

impl Drop for SourceLock {
    fn drop(&mut self) {
        // Best-effort; closing the handle releases the lock anyway.
        let _ = FileExt::unlock(&self.file);
    }
}

/// Open `path` for reading and take a shared lock without blocking.
/// Returns Ok(None) when another holder has the file exclusively locked.
pub fn try_lock_source(path: &Path) -> io::Result<Option<SourceLock>> {
    let file = File::open(path)?;
    match FileExt::try_lock_shared(&file) {
        Ok(()) => {
            trace!(path = %path.display(), "source lock acquired");
            Ok(Some(SourceLock { file }))
        }
        Err(e) if is_contended(&e) => {
            trace!(path = %path.display(), "source lock would block");
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

fn is_contended(e: &io::Error) -> bool {
    e.kind() == io::ErrorKind::WouldBlock
        || e.raw_os_error() == fs2::lock_contended_error().raw_os_error()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn free_file_locks() {
        let dir = tempdir().unwrap();
        let p = dir.path().join("f.bin");
        fs::write(&p, b"x").unwrap();
        assert!(try_lock_source(&p).unwrap().is_some());
    }

    #[test]
    fn exclusive_holder_blocks_shared_lock() {
        let dir = tempdir().unwrap();
        let p = dir.path().join("f.bin");
        fs::write(&p, b"x").unwrap();
        let holder = File::open(&p).unwrap();
        holder.lock_exclusive().unwrap();

        assert!(try_lock_source(&p).unwrap().is_none());

        FileExt::unlock(&holder).unwrap();
        assert!(try_lock_source(&p).unwrap().is_some());
    }

    #[test]
    fn shared_holders_coexist() {
        let dir = tempdir().unwrap();
        let p = dir.path().join("f.bin");
        fs::write(&p, b"x").unwrap();
        let first = try_lock_source(&p).unwrap();
        let second = try_lock_source(&p).unwrap();
        assert!(first.is_some() && second.is_some());
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempdir().unwrap();
        assert!(try_lock_source(&dir.path().join("nope")).is_err());
    }
}
