//! Default path helpers.
//! Determines OS-appropriate config and log file locations.

use dirs::{config_dir, data_dir};
use std::path::PathBuf;

/// OS-appropriate default config path.
pub fn default_config_path() -> Option<PathBuf> {
    if let Some(mut base) = config_dir() {
        base.push("xor_sweep");
        base.push("config.xml");
        Some(base)
    } else {
        std::env::var("HOME").ok().map(|h| {
            PathBuf::from(h)
                .join(".config")
                .join("xor_sweep")
                .join("config.xml")
        })
    }
}

/// OS-appropriate default log file path (data dir). Suggested to users; never forced.
pub fn default_log_path() -> Option<PathBuf> {
    if let Some(mut base) = data_dir() {
        base.push("xor_sweep");
        base.push("xor_sweep.log");
        Some(base)
    } else {
        std::env::var("HOME").ok().map(|h| {
            PathBuf::from(h)
                .join(".local")
                .join("share")
                .join("xor_sweep")
                .join("xor_sweep.log")
        })
    }
}
