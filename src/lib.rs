//! Core library for `xor_sweep`.
//!
//! Scans a working directory for files whose names end with a mask, XORs every byte of
//! each with a one-byte key, and writes the result into an output directory, optionally
//! removing the sources. `run_pass` performs one such sweep; `run_schedule` repeats it.

pub mod cli;
pub mod config;
pub mod engine;
pub mod errors;
pub mod output;
pub mod prompt;
pub mod scheduler;
pub mod shutdown;

pub use config::{Config, LogLevel, TransformConfig, default_config_path};
pub use engine::{CollisionPolicy, FileFailure, PassReport, resolve_output_name, run_pass, transform};
pub use errors::XorSweepError;
pub use scheduler::run_schedule;
