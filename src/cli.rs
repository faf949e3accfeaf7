//! CLI definition and parsing.
//! Defines Args and provides parse() for command-line handling.
//!
//! Notes:
//! - CLI flags override config file values.
//! - --debug is a shorthand for --log-level debug.

use clap::{Parser, ValueHint};
use std::path::PathBuf;
use std::time::Duration;

use crate::config::types::{Config, LogLevel, parse_collision_policy, parse_xor_mask};
use crate::engine::CollisionPolicy;

/// CLI wrapper for the xor_sweep library.
/// CLI flags override config values (which are loaded from XML if present).
#[derive(Parser, Debug, Clone)]
#[command(
    author,
    version,
    about = "XOR every byte of matching files with a one-byte mask and write the results to another directory"
)]
pub struct Args {
    /// Directory scanned for input files (defaults to the current directory).
    #[arg(long, short = 'w', value_hint = ValueHint::DirPath)]
    pub working_dir: Option<PathBuf>,

    /// Directory receiving the transformed files; must already exist.
    #[arg(long, short = 'o', value_hint = ValueHint::DirPath)]
    pub output_dir: Option<PathBuf>,

    /// Filename suffix selecting input files, matched as the glob `*<MASK>`.
    #[arg(long, short = 'm', value_name = "MASK", allow_hyphen_values = true)]
    pub mask: Option<String>,

    /// Byte XORed into every input byte: 0b101, 0x1f or decimal.
    #[arg(long, short = 'x', value_name = "BYTE", value_parser = parse_mask_arg)]
    pub xor_mask: Option<u8>,

    /// Delete each input after its output has been written.
    #[arg(long)]
    pub remove_source: bool,

    /// What to do when the output name is taken: counter or overwrite.
    #[arg(long, value_name = "POLICY", value_parser = parse_policy_arg)]
    pub on_collision: Option<CollisionPolicy>,

    /// Repeat the pass every N milliseconds until interrupted (0 = run once).
    #[arg(long, value_name = "MS")]
    pub repeat_ms: Option<u64>,

    /// Ask for the transform settings on the terminal instead of taking them from flags/config.
    #[arg(long, short = 'i')]
    pub interactive: bool,

    /// Explicit config file (overrides $XOR_SWEEP_CONFIG and the default location).
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Print where xor_sweep will look for the config file, then exit.
    #[arg(long)]
    pub print_config: bool,

    /// Enable debug logging (equivalent to `--log-level debug`).
    #[arg(short = 'd', long)]
    pub debug: bool,

    /// Set log level. One of: quiet, normal, info, debug.
    #[arg(long, value_name = "LEVEL", value_parser = parse_log_level_arg)]
    pub log_level: Option<LogLevel>,

    /// Also append logs to this file.
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub log_file: Option<PathBuf>,

    /// Emit logs in structured JSON.
    #[arg(long)]
    pub json: bool,
}

fn parse_mask_arg(s: &str) -> Result<u8, String> {
    parse_xor_mask(s).map_err(|e| e.to_string())
}

fn parse_log_level_arg(s: &str) -> Result<LogLevel, String> {
    s.parse::<LogLevel>()
}

fn parse_policy_arg(s: &str) -> Result<CollisionPolicy, String> {
    parse_collision_policy(s).map_err(|e| e.to_string())
}

impl Args {
    /// Effective log level derived from flags.
    /// Precedence: --debug > --log-level value > None (use config default).
    pub fn effective_log_level(&self) -> Option<LogLevel> {
        if self.debug {
            return Some(LogLevel::Debug);
        }
        self.log_level.clone()
    }

    /// Apply CLI overrides to a loaded Config (in-place). No-ops for unset flags.
    pub fn apply_overrides(&self, cfg: &mut Config) {
        if let Some(wd) = &self.working_dir {
            cfg.working_dir = wd.clone();
        }
        if let Some(od) = &self.output_dir {
            cfg.output_dir = Some(od.clone());
        }
        if let Some(mask) = &self.mask {
            cfg.filename_mask = Some(mask.clone());
        }
        if let Some(x) = self.xor_mask {
            cfg.xor_mask = Some(x);
        }
        if self.remove_source {
            cfg.remove_source = true;
        }
        if let Some(policy) = self.on_collision {
            cfg.on_collision = policy;
        }
        if let Some(ms) = self.repeat_ms {
            cfg.repeat_every = (ms > 0).then(|| Duration::from_millis(ms));
        }
        if let Some(level) = self.effective_log_level() {
            cfg.log_level = level;
        }
        if let Some(lf) = &self.log_file {
            cfg.log_file = Some(lf.clone());
        }
    }
}

pub fn parse() -> Args {
    Args::parse()
}
