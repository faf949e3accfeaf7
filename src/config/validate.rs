//! Config validation logic.
//! Verifies the working directory is readable, the output directory exists and is writable,
//! and that the combination of settings cannot destroy the only copy of a file.

use anyhow::{Context, Result, bail};
use std::fs;
use std::path::Path;
use tracing::{debug, error, info};

use crate::engine::{CollisionPolicy, io_error_with_help};

use super::types::Config;

impl Config {
    /// Validate directories and settings before the first pass.
    pub fn validate(&self) -> Result<()> {
        let transform = self.transform_config()?;
        let wd = &self.working_dir;
        let od = &transform.output_dir;

        // 1) Working dir: must exist, be a directory, and be readable.
        ensure_dir_exists_and_is_dir(wd, "working_dir")?;
        fs::read_dir(wd).map_err(io_error_with_help("read working_dir", wd))?;
        debug!("working_dir readable: {}", wd.display());

        // 2) Output dir: must already exist (never created for the user) and be writable.
        ensure_dir_exists_and_is_dir(od, "output_dir")?;
        ensure_writable(od)?;

        // 3) Overwriting in place and then deleting the "source" would lose the file.
        let wd_real = fs::canonicalize(wd).unwrap_or_else(|_| wd.clone());
        let od_real = fs::canonicalize(od).unwrap_or_else(|_| od.clone());
        if wd_real == od_real
            && transform.remove_source
            && transform.on_collision == CollisionPolicy::Overwrite
        {
            bail!(
                "working_dir and output_dir resolve to the same path '{}'; \
                 remove_source with the overwrite policy would delete the outputs",
                wd_real.display()
            );
        }

        info!(
            "Config validated: working='{}' output='{}' mask='{}' log_file='{}'",
            wd.display(),
            od.display(),
            transform.filename_mask,
            self.log_file
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "<none>".into())
        );
        Ok(())
    }
}

/// Ensure path exists and is a directory; emit clear errors with path context.
fn ensure_dir_exists_and_is_dir(path: &Path, name: &str) -> Result<()> {
    if !path.exists() {
        error!("{name} does not exist: {}", path.display());
        bail!("{name} does not exist: {}", path.display());
    }
    if !path.is_dir() {
        error!("{name} is not a directory: {}", path.display());
        bail!("{name} is not a directory: {}", path.display());
    }
    Ok(())
}

/// Ensure directory is writable using a non-destructive probe file.
fn ensure_writable(dir: &Path) -> Result<()> {
    let probe = dir.join(format!(".xor_sweep_probe_{}.tmp", std::process::id()));
    fs::OpenOptions::new()
        .create_new(true)
        .write(true)
        .open(&probe)
        .with_context(|| format!("Cannot write to output_dir '{}'; check permissions", dir.display()))?;
    let _ = fs::remove_file(&probe);
    debug!("output_dir writable: {}", dir.display());
    Ok(())
}
