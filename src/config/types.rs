//! Core configuration types.
//! - Config holds runtime settings gathered from XML, CLI flags and the prompt.
//! - TransformConfig is the immutable, validated view a pass runs against.
//! - LogLevel represents verbosity with simple parsing helpers.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::engine::{CollisionPolicy, SuffixMask};
use crate::errors::XorSweepError;

/// Program-defined verbosity levels exposed to users/config.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Only errors
    Quiet,
    /// Informational output (default)
    #[default]
    Normal,
    /// More info (like verbose)
    Info,
    /// Debug/trace
    Debug,
}

impl LogLevel {
    /// Parse common string names into our LogLevel (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "quiet" | "error" | "none" => Some(LogLevel::Quiet),
            "normal" => Some(LogLevel::Normal),
            "info" | "verbose" | "detailed" => Some(LogLevel::Info),
            "debug" | "trace" => Some(LogLevel::Debug),
            _ => None,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LogLevel::Quiet => "quiet",
            LogLevel::Normal => "normal",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
        };
        f.write_str(s)
    }
}

impl FromStr for LogLevel {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("invalid log level: '{s}'"))
    }
}

/// Parse an XOR mask written as `0b101`, `0x1f` or plain decimal.
pub fn parse_xor_mask(s: &str) -> Result<u8, XorSweepError> {
    let t = s.trim().replace('_', "");
    let (digits, radix) = if let Some(rest) = t.strip_prefix("0b").or_else(|| t.strip_prefix("0B")) {
        (rest, 2)
    } else if let Some(rest) = t.strip_prefix("0x").or_else(|| t.strip_prefix("0X")) {
        (rest, 16)
    } else {
        (t.as_str(), 10)
    };
    parse_mask_radix(digits, radix, s)
}

/// Parse a bare binary string such as `100` (= 4), the format the interactive prompt uses.
pub fn parse_binary_mask(s: &str) -> Result<u8, XorSweepError> {
    let t = s.trim();
    if t.len() > 8 {
        return Err(XorSweepError::invalid(
            "xor_mask",
            format!("'{s}' is longer than 8 bits"),
        ));
    }
    parse_mask_radix(t, 2, s)
}

fn parse_mask_radix(digits: &str, radix: u32, original: &str) -> Result<u8, XorSweepError> {
    if digits.is_empty() {
        return Err(XorSweepError::invalid("xor_mask", "value is empty"));
    }
    let value = u32::from_str_radix(digits, radix).map_err(|e| {
        XorSweepError::invalid("xor_mask", format!("cannot parse '{original}': {e}"))
    })?;
    u8::try_from(value).map_err(|_| {
        XorSweepError::invalid(
            "xor_mask",
            format!("'{original}' = {value} does not fit in one byte (0-255)"),
        )
    })
}

/// Parse a collision policy name as used by the CLI and XML (`counter` / `overwrite`).
pub fn parse_collision_policy(s: &str) -> Result<CollisionPolicy, XorSweepError> {
    match s.trim().to_ascii_lowercase().as_str() {
        "overwrite" | "0" => Ok(CollisionPolicy::Overwrite),
        "counter" | "append-counter" | "append_counter" | "1" => Ok(CollisionPolicy::AppendCounter),
        other => Err(XorSweepError::invalid(
            "on_collision",
            format!("expected 'counter' or 'overwrite', got '{other}'"),
        )),
    }
}

/// Immutable settings for one pass. Built only through [`Config::transform_config`]
/// or [`TransformConfig::new`], both of which validate the mask.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformConfig {
    pub filename_mask: String,
    pub remove_source: bool,
    pub output_dir: PathBuf,
    pub on_collision: CollisionPolicy,
    pub xor_mask: u8,
}

impl TransformConfig {
    /// Construct a TransformConfig; the filename mask must compile as a glob suffix.
    pub fn new(
        filename_mask: impl Into<String>,
        output_dir: impl Into<PathBuf>,
        xor_mask: u8,
        on_collision: CollisionPolicy,
        remove_source: bool,
    ) -> Result<Self, XorSweepError> {
        let filename_mask = filename_mask.into();
        SuffixMask::new(&filename_mask)?;
        Ok(Self {
            filename_mask,
            remove_source,
            output_dir: output_dir.into(),
            on_collision,
            xor_mask,
        })
    }
}

/// Runtime configuration for the whole program.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory scanned for input files
    pub working_dir: PathBuf,
    /// Directory receiving transformed files
    pub output_dir: Option<PathBuf>,
    /// Suffix selecting input files
    pub filename_mask: Option<String>,
    /// Delete inputs after a successful transform
    pub remove_source: bool,
    /// Naming rule when the output name is taken
    pub on_collision: CollisionPolicy,
    /// Byte XORed against every input byte
    pub xor_mask: Option<u8>,
    /// Repeat period; None runs a single pass
    pub repeat_every: Option<Duration>,
    /// Console verbosity
    pub log_level: LogLevel,
    /// Optional path to a log file
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            working_dir: PathBuf::from("."),
            output_dir: None,
            filename_mask: None,
            remove_source: false,
            on_collision: CollisionPolicy::AppendCounter,
            xor_mask: None,
            repeat_every: None,
            log_level: LogLevel::Normal,
            log_file: None,
        }
    }
}

impl Config {
    /// Construct a Config with the required transform settings; other fields use defaults.
    pub fn new(
        working_dir: impl Into<PathBuf>,
        output_dir: impl Into<PathBuf>,
        filename_mask: impl Into<String>,
        xor_mask: u8,
    ) -> Self {
        Self {
            working_dir: working_dir.into(),
            output_dir: Some(output_dir.into()),
            filename_mask: Some(filename_mask.into()),
            xor_mask: Some(xor_mask),
            ..Default::default()
        }
    }

    /// Build the immutable pass settings, failing on anything still unset.
    pub fn transform_config(&self) -> Result<TransformConfig, XorSweepError> {
        let output_dir = self
            .output_dir
            .clone()
            .ok_or_else(|| XorSweepError::invalid("output_dir", "not set"))?;
        let filename_mask = self
            .filename_mask
            .clone()
            .ok_or_else(|| XorSweepError::invalid("filename_mask", "not set"))?;
        let xor_mask = self
            .xor_mask
            .ok_or_else(|| XorSweepError::invalid("xor_mask", "not set"))?;
        TransformConfig::new(
            filename_mask,
            output_dir,
            xor_mask,
            self.on_collision,
            self.remove_source,
        )
    }
}
