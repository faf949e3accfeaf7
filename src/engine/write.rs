//! Safe transform-and-rename:
//! - Streams the XOR transform into a temp file in the destination directory
//! - Fsyncs the temp file before it becomes visible
//! - Renames temp -> dest (Windows overwrite-safe)
//! - Fsyncs the destination directory (Unix, best-effort)
//!
//! A failure at any step removes the temp file and leaves an existing destination alone.

use std::fs::{self, OpenOptions};
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::trace;

use super::transform::{CHUNK_SIZE, transform};
use crate::errors::XorSweepError;

/// Transform everything readable from `src` into `dest`. Returns bytes written.
pub(crate) fn write_transformed<R: Read>(
    src: R,
    dest: &Path,
    mask: u8,
) -> Result<u64, XorSweepError> {
    let dest_dir = dest.parent().unwrap_or_else(|| Path::new("."));
    let tmp_path = unique_temp_path(dest_dir);

    let bytes = match stream_to_temp(src, &tmp_path, mask) {
        Ok(n) => n,
        Err(source) => {
            let _ = fs::remove_file(&tmp_path);
            return Err(XorSweepError::FileAccess {
                path: dest.to_path_buf(),
                op: "write transformed output to",
                source,
            });
        }
    };

    if let Err(source) = rename_over(&tmp_path, dest) {
        let _ = fs::remove_file(&tmp_path);
        return Err(XorSweepError::FileAccess {
            path: dest.to_path_buf(),
            op: "rename transformed output onto",
            source,
        });
    }

    trace!(dest = %dest.display(), bytes, "output committed");
    Ok(bytes)
}

fn stream_to_temp<R: Read>(src: R, tmp_path: &Path, mask: u8) -> io::Result<u64> {
    let tmp = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(tmp_path)?;
    let reader = BufReader::with_capacity(CHUNK_SIZE, src);
    let mut writer = BufWriter::with_capacity(CHUNK_SIZE, tmp);
    let bytes = transform(reader, &mut writer, mask)?;
    writer.flush()?;
    writer.get_ref().sync_all()?;
    Ok(bytes)
}

fn rename_over(src: &Path, dst: &Path) -> io::Result<()> {
    // Windows: rename does not replace an existing file.
    #[cfg(windows)]
    {
        if let Err(e) = fs::remove_file(dst) {
            if e.kind() != io::ErrorKind::NotFound {
                return Err(e);
            }
        }
    }

    fs::rename(src, dst)?;

    #[cfg(unix)]
    if let Some(parent) = dst.parent() {
        // Ignore fsync errors to avoid turning a successful rename into a failure.
        let _ = fs::File::open(parent).and_then(|d| d.sync_all());
    }
    Ok(())
}

static TEMP_SEQ: AtomicU64 = AtomicU64::new(0);

/// Hidden sibling temp name: .xor_sweep.<pid>.<nanos>.<seq>.tmp
fn unique_temp_path(dst_dir: &Path) -> PathBuf {
    let pid = std::process::id();
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);
    let seq = TEMP_SEQ.fetch_add(1, Ordering::Relaxed);
    dst_dir.join(format!(".xor_sweep.{pid}.{nanos}.{seq}.tmp"))
}
