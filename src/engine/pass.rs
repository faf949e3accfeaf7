//! One scan-transform-cleanup pass over the working directory.
//!
//! Order of work:
//! 1) fail fast if the output directory is unusable (nothing has been touched yet)
//! 2) snapshot matching inputs and existing outputs
//! 3) per input, in name order: lock, resolve name, transform, optionally delete source
//!
//! Per-file problems are collected into the PassReport; they never stop the pass.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use super::collision::resolve_output_name;
use super::helpers::io_hint;
use super::lock::try_lock_source;
use super::snapshot::{DirectorySnapshot, SuffixMask};
use super::write::write_transformed;
use crate::config::TransformConfig;
use crate::errors::XorSweepError;

/// One per-file failure, in visit order.
#[derive(Debug)]
pub struct FileFailure {
    /// Input file name (relative to the working directory)
    pub file: String,
    pub error: XorSweepError,
}

/// Outcome of a pass.
#[derive(Debug, Default)]
pub struct PassReport {
    /// Inputs whose transformed output was written
    pub processed: usize,
    /// `(input name, output name)` for every written output
    pub outputs: Vec<(String, String)>,
    pub failures: Vec<FileFailure>,
}

impl PassReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Run a single pass: transform every matching file in `working_dir` into the output dir.
pub fn run_pass(config: &TransformConfig, working_dir: &Path) -> Result<PassReport, XorSweepError> {
    let out_dir = &config.output_dir;
    ensure_output_dir(out_dir)?;
    let mask = SuffixMask::new(&config.filename_mask)?;

    let inputs = DirectorySnapshot::matching(working_dir, &mask)?;
    let mut existing: HashSet<String> = DirectorySnapshot::files_in(out_dir)?
        .into_names()
        .into_iter()
        .collect();
    let same_dir = same_directory(working_dir, out_dir);

    debug!(
        working_dir = %working_dir.display(),
        output_dir = %out_dir.display(),
        inputs = inputs.len(),
        existing = existing.len(),
        "pass started"
    );

    let mut report = PassReport::default();
    for name in inputs.names() {
        match process_file(config, working_dir, name, &mut existing, same_dir) {
            Ok(Outcome { output, deletion }) => {
                report.processed += 1;
                report.outputs.push((name.clone(), output));
                if let Some(error) = deletion {
                    record_failure(&mut report, name, error);
                }
            }
            Err(error) => record_failure(&mut report, name, error),
        }
    }

    info!(
        processed = report.processed,
        failed = report.failures.len(),
        "pass completed"
    );
    Ok(report)
}

struct Outcome {
    output: String,
    /// Set when the output was written but removing the source failed.
    deletion: Option<XorSweepError>,
}

fn process_file(
    config: &TransformConfig,
    working_dir: &Path,
    name: &str,
    existing: &mut HashSet<String>,
    same_dir: bool,
) -> Result<Outcome, XorSweepError> {
    let src = working_dir.join(name);
    let lock = try_lock_source(&src)
        .map_err(|source| XorSweepError::FileAccess {
            path: src.clone(),
            op: "open",
            source,
        })?
        .ok_or_else(|| XorSweepError::Locked(src.clone()))?;

    let final_name = resolve_output_name(name, existing, config.on_collision);
    let dest = config.output_dir.join(&final_name);

    let bytes = write_transformed(lock.file(), &dest, config.xor_mask)?;
    drop(lock);
    existing.insert(final_name.clone());
    debug!(src = %src.display(), dest = %dest.display(), bytes, "file transformed");

    let mut deletion = None;
    if config.remove_source {
        if same_dir && final_name == name {
            warn!(path = %src.display(), "output replaced the source in place; not removing it");
        } else if let Err(source) = fs::remove_file(&src) {
            deletion = Some(XorSweepError::Deletion { path: src, source });
        } else {
            debug!(path = %src.display(), "source removed");
        }
    }

    Ok(Outcome {
        output: final_name,
        deletion,
    })
}

fn record_failure(report: &mut PassReport, name: &str, error: XorSweepError) {
    let hint = match &error {
        XorSweepError::FileAccess { source, .. } | XorSweepError::Deletion { source, .. } => {
            io_hint(source).unwrap_or("")
        }
        _ => "",
    };
    warn!(file = name, code = error.code(), kind = error.kind(), hint, error = %error, "file not processed cleanly");
    report.failures.push(FileFailure {
        file: name.to_string(),
        error,
    });
}

fn ensure_output_dir(dir: &Path) -> Result<(), XorSweepError> {
    match fs::metadata(dir) {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(XorSweepError::configuration(dir, "output path is not a directory")),
        Err(e) => Err(XorSweepError::configuration(
            dir,
            format!("output directory is not accessible: {e}"),
        )),
    }
}

fn same_directory(a: &Path, b: &Path) -> bool {
    let canon = |p: &Path| fs::canonicalize(p).unwrap_or_else(|_| PathBuf::from(p));
    canon(a) == canon(b)
}
