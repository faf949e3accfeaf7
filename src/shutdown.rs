//! Process-wide shutdown coordination.
//! Provides a flag set by the ctrlc handler so the repeat scheduler can stop between passes.
//!
//! Notes:
//! - Relaxed atomics are sufficient for a one-way "stop" flag.
//! - `request()` is safe to call from signal handlers.

use std::sync::atomic::{AtomicBool, Ordering};

static SHUTDOWN: AtomicBool = AtomicBool::new(false);

/// Request a cooperative shutdown (idempotent).
#[inline]
pub fn request() {
    SHUTDOWN.store(true, Ordering::Relaxed);
}

/// Check whether a shutdown has been requested.
#[inline]
pub fn is_requested() -> bool {
    SHUTDOWN.load(Ordering::Relaxed)
}

/// Test-only: clear the shutdown flag.
#[cfg(test)]
#[inline]
pub fn reset() {
    SHUTDOWN.store(false, Ordering::Relaxed);
}
