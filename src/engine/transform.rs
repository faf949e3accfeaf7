//! Streaming XOR transform.
//!
//! Reads the source in fixed-size chunks, XORs every byte with a one-byte mask and writes
//! the chunk out. The transform is length-preserving and its own inverse: running it twice
//! with the same mask gives back the original bytes.

use std::io::{self, Read, Write};

/// Chunk size used by [`transform`]. Results never depend on it.
pub const CHUNK_SIZE: usize = 64 * 1024;

/// XOR `src` into `dst` with `mask`. Returns the number of bytes written.
pub fn transform<R: Read, W: Write>(src: R, dst: W, mask: u8) -> io::Result<u64> {
    transform_with_chunk_size(src, dst, mask, CHUNK_SIZE)
}

/// Same as [`transform`] with an explicit chunk size (must be non-zero).
pub fn transform_with_chunk_size<R: Read, W: Write>(
    mut src: R,
    mut dst: W,
    mask: u8,
    chunk_size: usize,
) -> io::Result<u64> {
    if chunk_size == 0 {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "chunk size must be non-zero",
        ));
    }

    let mut buf = vec![0u8; chunk_size];
    let mut total: u64 = 0;
    loop {
        let n = match src.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        xor_in_place(&mut buf[..n], mask);
        dst.write_all(&buf[..n])?;
        total += n as u64;
    }
    dst.flush()?;
    Ok(total)
}

/// XOR every byte of `buf` with `mask`.
#[inline]
pub fn xor_in_place(buf: &mut [u8], mask: u8) {
    if mask == 0 {
        return;
    }
    for b in buf.iter_mut() {
        *b ^= mask;
    }
}
