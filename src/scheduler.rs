//! Repeat scheduler.
//! Runs one pass, or keeps running passes on a fixed period until asked to stop.
//!
//! Notes:
//! - The stop predicate is polled between passes and during the sleep, never mid-file.
//! - In repeat mode a fatal pass error is logged and the next pass still runs; the output
//!   directory may simply be unmounted for a while.

use std::path::Path;
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, error};

use crate::config::TransformConfig;
use crate::engine::{PassReport, run_pass};
use crate::errors::XorSweepError;

/// Longest single sleep between stop-predicate checks.
const POLL_SLICE: Duration = Duration::from_millis(100);

/// Run passes over `working_dir`. Returns how many passes ran.
///
/// - `every = None`: one pass; a fatal error is returned.
/// - `every = Some(p)`: pass, sleep `p`, repeat until `should_stop()` returns true.
///
/// `on_report` receives the 1-based pass number and its result.
pub fn run_schedule<S, F>(
    config: &TransformConfig,
    working_dir: &Path,
    every: Option<Duration>,
    should_stop: S,
    mut on_report: F,
) -> Result<u64, XorSweepError>
where
    S: Fn() -> bool,
    F: FnMut(u64, &Result<PassReport, XorSweepError>),
{
    let Some(period) = every else {
        let result = run_pass(config, working_dir);
        on_report(1, &result);
        return result.map(|_| 1);
    };

    let mut passes: u64 = 0;
    while !should_stop() {
        passes += 1;
        let result = run_pass(config, working_dir);
        if let Err(e) = &result {
            error!(pass = passes, code = e.code(), kind = e.kind(), error = %e, "pass failed");
        }
        on_report(passes, &result);

        if !sleep_unless_stopped(period, &should_stop) {
            break;
        }
    }
    debug!(passes, "scheduler stopped");
    Ok(passes)
}

/// Sleep for `period` in short slices. Returns false if a stop was requested meanwhile.
fn sleep_unless_stopped<S: Fn() -> bool>(period: Duration, should_stop: &S) -> bool {
    let deadline = Instant::now() + period;
    loop {
        if should_stop() {
            return false;
        }
        let now = Instant::now();
        if now >= deadline {
            return true;
        }
        thread::sleep(POLL_SLICE.min(deadline - now));
    }
}
