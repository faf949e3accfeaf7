//! Tracing initialization.
//! Builds a subscriber with EnvFilter, supports compact or JSON formats, and optional file logging.
//!
//! Behavior:
//! - Log level is driven by LogLevel (no RUST_LOG override here).
//! - JSON/non-JSON formatting is selected via the `json` flag.
//! - If `log_file` is provided and can be opened, a non-blocking file layer is added.

use anyhow::Result;
use chrono::Local;
use std::fmt as stdfmt;
use std::fs::{File, OpenOptions};
use std::io;
use std::path::Path;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::filter::{EnvFilter, LevelFilter};
use tracing_subscriber::fmt as tsfmt;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry;
use tracing_subscriber::util::SubscriberInitExt;

use xor_sweep::LogLevel;
use xor_sweep::engine::io_error_with_help_io;
use xor_sweep::output as out;

/// Human-friendly timestamp formatter (DD/MM/YY HH:MM:SS)
struct LocalHumanTime;
impl FormatTime for LocalHumanTime {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> stdfmt::Result {
        let now = Local::now();
        write!(w, "{}", now.format("%d/%m/%y %H:%M:%S"))
    }
}

#[inline]
fn to_level_filter(lvl: &LogLevel) -> LevelFilter {
    match lvl {
        LogLevel::Quiet => LevelFilter::ERROR,
        LogLevel::Normal => LevelFilter::INFO,
        LogLevel::Info => LevelFilter::DEBUG,
        LogLevel::Debug => LevelFilter::TRACE,
    }
}

fn open_log_file_append(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(io_error_with_help_io("open log file", path))
}

fn maybe_open_non_blocking_writer(path: &Path) -> Option<(NonBlocking, WorkerGuard)> {
    match open_log_file_append(path) {
        Ok(file) => Some(tracing_appender::non_blocking(file)),
        Err(e) => {
            out::print_warn(&format!("{e}; logs will continue to stderr only."));
            None
        }
    }
}

/// Initialize tracing based on LogLevel and format. Returns an optional WorkerGuard
/// if a file appender is created (must be held until shutdown to flush logs).
///
/// Console logs go to stderr so stdout stays free for the per-file result lines.
pub fn init_tracing(
    lvl: &LogLevel,
    log_file: Option<&Path>,
    json: bool,
) -> Result<Option<WorkerGuard>> {
    let env_filter = EnvFilter::default().add_directive(to_level_filter(lvl).into());

    let file = log_file.and_then(maybe_open_non_blocking_writer);
    let (file_writer, guard) = match file {
        Some((w, g)) => (Some(w), Some(g)),
        None => (None, None),
    };

    if json {
        let console = tsfmt::layer()
            .event_format(tsfmt::format().json())
            .with_timer(LocalHumanTime)
            .with_target(true)
            .with_writer(io::stderr);
        let file_layer = file_writer.map(|w| {
            tsfmt::layer()
                .event_format(tsfmt::format().json())
                .with_timer(LocalHumanTime)
                .with_target(true)
                .with_ansi(false)
                .with_writer(w)
        });
        registry()
            .with(env_filter)
            .with(console)
            .with(file_layer)
            .try_init()?;
    } else {
        let console = tsfmt::layer()
            .with_timer(LocalHumanTime)
            .with_target(true)
            .compact()
            .with_writer(io::stderr);
        let file_layer = file_writer.map(|w| {
            tsfmt::layer()
                .with_timer(LocalHumanTime)
                .with_target(true)
                .with_ansi(false)
                .compact()
                .with_writer(w)
        });
        registry()
            .with(env_filter)
            .with(console)
            .with(file_layer)
            .try_init()?;
    }
    Ok(guard)
}
