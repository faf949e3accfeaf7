//! Config module.
//! Provides configuration types, default paths, XML loading, and validation.

pub mod paths;
pub mod types;
mod validate;
pub mod xml;

pub use paths::{default_config_path, default_log_path};
pub use types::{
    Config, LogLevel, TransformConfig, parse_binary_mask, parse_collision_policy, parse_xor_mask,
};
pub use xml::{load_config_from_xml_path, resolve_config_path};

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "XOR_SWEEP_CONFIG";
