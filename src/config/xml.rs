//! XML configuration support (quick_xml + serde).
//!
//! <config>
//!   <working_dir>/data/in</working_dir>
//!   <output_dir>/data/out</output_dir>
//!   <filename_mask>.bin</filename_mask>
//!   <remove_source>false</remove_source>
//!   <on_collision>counter</on_collision>
//!   <xor_mask>0b00000100</xor_mask>
//!   <repeat_ms>0</repeat_ms>
//!   <log_level>normal</log_level>
//!   <log_file>/var/log/xor_sweep.log</log_file>
//! </config>
//!
//! Unknown fields are rejected so typos surface instead of being silently ignored.

use anyhow::{Context, Result};
use quick_xml::de::from_str as from_xml_str;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

use super::paths::default_config_path;
use super::types::{Config, LogLevel, parse_collision_policy, parse_xor_mask};
use super::CONFIG_ENV;

/// Struct mirroring the XML config for deserialization.
#[derive(Debug, Deserialize)]
#[serde(rename = "config")]
#[serde(deny_unknown_fields)]
struct XmlConfig {
    working_dir: Option<String>,
    output_dir: Option<String>,
    filename_mask: Option<String>,
    #[serde(default, deserialize_with = "de_bool_trimmed_opt")]
    remove_source: Option<bool>,
    on_collision: Option<String>,
    xor_mask: Option<String>,
    /// Repeat period in milliseconds; 0 runs once
    #[serde(default, deserialize_with = "de_u64_trimmed_opt")]
    repeat_ms: Option<u64>,
    log_level: Option<String>,
    log_file: Option<String>,
}

// Custom deserializers that trim surrounding whitespace
fn de_u64_trimmed_opt<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    match opt.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => s.parse::<u64>().map(Some).map_err(serde::de::Error::custom),
    }
}

fn de_bool_trimmed_opt<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    match opt.as_deref().map(|s| s.trim().to_ascii_lowercase()) {
        None => Ok(None),
        Some(s) => match s.as_str() {
            "" => Ok(None),
            "true" | "1" | "yes" => Ok(Some(true)),
            "false" | "0" | "no" => Ok(Some(false)),
            other => Err(serde::de::Error::custom(format!("invalid boolean '{other}'"))),
        },
    }
}

fn non_empty(s: Option<String>) -> Option<String> {
    s.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

/// Map XmlConfig onto defaults. Values that fail to parse are errors, not silently dropped.
fn xml_to_config(parsed: XmlConfig) -> Result<Config> {
    let mut cfg = Config::default();

    if let Some(p) = non_empty(parsed.working_dir) {
        cfg.working_dir = PathBuf::from(p);
    }
    cfg.output_dir = non_empty(parsed.output_dir).map(PathBuf::from);
    // The mask is a suffix; surrounding whitespace is kept off but inner text is literal.
    cfg.filename_mask = non_empty(parsed.filename_mask);
    cfg.remove_source = parsed.remove_source.unwrap_or(false);
    if let Some(s) = non_empty(parsed.on_collision) {
        cfg.on_collision = parse_collision_policy(&s)?;
    }
    if let Some(s) = non_empty(parsed.xor_mask) {
        cfg.xor_mask = Some(parse_xor_mask(&s)?);
    }
    cfg.repeat_every = parsed
        .repeat_ms
        .filter(|ms| *ms > 0)
        .map(Duration::from_millis);
    if let Some(s) = non_empty(parsed.log_level) {
        cfg.log_level = s
            .parse::<LogLevel>()
            .map_err(anyhow::Error::msg)?;
    }
    cfg.log_file = non_empty(parsed.log_file).map(PathBuf::from);

    Ok(cfg)
}

/// Load a Config from a specific XML file path.
pub fn load_config_from_xml_path(path: &Path) -> Result<Config> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("read config xml '{}'", path.display()))?;
    let parsed: XmlConfig = from_xml_str(&contents)
        .with_context(|| format!("parse config xml '{}'", path.display()))?;
    let cfg = xml_to_config(parsed)
        .with_context(|| format!("invalid value in config xml '{}'", path.display()))?;
    debug!(path = %path.display(), "loaded config xml");
    Ok(cfg)
}

/// Which config file to use, if any.
///
/// Precedence: explicit path (CLI) > $XOR_SWEEP_CONFIG > platform default when it exists.
/// An explicit path or env value is returned even if missing so the caller reports it.
pub fn resolve_config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(p) = explicit {
        return Some(p.to_path_buf());
    }
    if let Some(p) = env::var_os(CONFIG_ENV).filter(|v| !v.is_empty()) {
        return Some(PathBuf::from(p));
    }
    default_config_path().filter(|p| p.exists())
}
