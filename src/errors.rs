//! Typed error definitions for xor_sweep.
//! Provides the small set of failure modes a pass can report, for better logs and tests.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum XorSweepError {
    /// Pass-fatal: raised before any input file is touched.
    #[error("Configuration error for {path}: {reason}")]
    Configuration { path: PathBuf, reason: String },

    #[error("File is locked by another process: {0}")]
    Locked(PathBuf),

    #[error("Cannot {op} '{path}': {source}")]
    FileAccess {
        path: PathBuf,
        op: &'static str,
        #[source]
        source: io::Error,
    },

    /// The output was written; only the source removal failed.
    #[error("Failed to remove source '{path}' after processing: {source}")]
    Deletion {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid setting `{field}`: {reason}")]
    InvalidSetting { field: &'static str, reason: String },
}

impl XorSweepError {
    /// Stable numeric code for structured logs and exit statuses.
    pub fn code(&self) -> u32 {
        match self {
            XorSweepError::Configuration { .. } => 10,
            XorSweepError::Locked(_) => 20,
            XorSweepError::FileAccess { .. } => 21,
            XorSweepError::Deletion { .. } => 30,
            XorSweepError::InvalidSetting { .. } => 40,
        }
    }

    /// Short machine-friendly kind name, used as the `kind` log field.
    pub fn kind(&self) -> &'static str {
        match self {
            XorSweepError::Configuration { .. } => "configuration",
            XorSweepError::Locked(_) => "locked",
            XorSweepError::FileAccess { .. } => "file_access",
            XorSweepError::Deletion { .. } => "deletion",
            XorSweepError::InvalidSetting { .. } => "invalid_setting",
        }
    }

    /// True for errors that abort a whole pass rather than one file.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            XorSweepError::Configuration { .. } | XorSweepError::InvalidSetting { .. }
        )
    }

    pub(crate) fn configuration(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        XorSweepError::Configuration {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        XorSweepError::InvalidSetting {
            field,
            reason: reason.into(),
        }
    }
}
