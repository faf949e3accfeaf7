//! Interactive settings collection.
//! Asks for each transform setting on `output`, reads answers line by line from `input`,
//! and validates every answer before storing it in the Config.
//!
//! An invalid answer is explained and asked again, up to MAX_ATTEMPTS times.

use anyhow::{Result, bail};
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::time::Duration;
use tracing::debug;

use crate::config::{Config, parse_binary_mask};
use crate::engine::{CollisionPolicy, SuffixMask};
use crate::errors::XorSweepError;

const MAX_ATTEMPTS: usize = 3;

struct Prompter<'a, R, W> {
    input: &'a mut R,
    output: &'a mut W,
}

impl<R: BufRead, W: Write> Prompter<'_, R, W> {
    fn ask<T>(
        &mut self,
        field: &'static str,
        question: &str,
        parse: impl Fn(&str) -> std::result::Result<T, String>,
    ) -> Result<T> {
        let mut last_reason = String::new();
        for _ in 0..MAX_ATTEMPTS {
            write!(self.output, "{question} ")?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                bail!("input closed while waiting for `{field}`");
            }
            match parse(line.trim_end_matches(['\r', '\n'])) {
                Ok(v) => return Ok(v),
                Err(reason) => {
                    writeln!(self.output, "Invalid answer: {reason}")?;
                    last_reason = reason;
                }
            }
        }
        Err(XorSweepError::invalid(
            field,
            format!("no valid answer after {MAX_ATTEMPTS} attempts ({last_reason})"),
        )
        .into())
    }
}

fn parse_flag(s: &str) -> std::result::Result<bool, String> {
    match s.trim() {
        "0" => Ok(false),
        "1" => Ok(true),
        other => Err(format!("expected 0 or 1, got '{other}'")),
    }
}

/// Ask for every transform setting and store the answers in `cfg`.
pub fn collect_settings<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    cfg: &mut Config,
) -> Result<()> {
    let mut p = Prompter { input, output };

    let mask = p.ask("filename_mask", "Filename mask (suffix, e.g. .txt):", |s| {
        let s = s.trim();
        if s.is_empty() {
            return Err("mask cannot be empty".into());
        }
        SuffixMask::new(s).map_err(|e| e.to_string())?;
        Ok(s.to_string())
    })?;

    let remove = p.ask(
        "remove_source",
        "Remove input files after processing? (1 = yes, 0 = no):",
        parse_flag,
    )?;

    let output_dir = p.ask("output_dir", "Directory where results are saved:", |s| {
        let path = PathBuf::from(s.trim());
        if s.trim().is_empty() {
            Err("path cannot be empty".into())
        } else if !path.is_dir() {
            Err(format!("'{}' does not exist or is not a directory", path.display()))
        } else {
            Ok(path)
        }
    })?;

    let policy = p.ask(
        "on_collision",
        "If an output file already exists: 0 = overwrite, 1 = save with a counter in the name:",
        |s| match s.trim() {
            "0" => Ok(CollisionPolicy::Overwrite),
            "1" => Ok(CollisionPolicy::AppendCounter),
            other => Err(format!("expected 0 or 1, got '{other}'")),
        },
    )?;

    let on_timer = p.ask(
        "repeat_every",
        "Repeat on a timer? (1 = yes, 0 = run once):",
        parse_flag,
    )?;
    let repeat_every = if on_timer {
        let ms = p.ask("repeat_every", "Timer period in milliseconds:", |s| {
            match s.trim().parse::<u64>() {
                Ok(0) => Err("period must be greater than zero".into()),
                Ok(ms) => Ok(ms),
                Err(e) => Err(e.to_string()),
            }
        })?;
        Some(Duration::from_millis(ms))
    } else {
        None
    };

    let xor_mask = p.ask(
        "xor_mask",
        "XOR mask in binary, at most 8 bits (e.g. 100 = 4):",
        |s| parse_binary_mask(s).map_err(|e| e.to_string()),
    )?;

    cfg.filename_mask = Some(mask);
    cfg.remove_source = remove;
    cfg.output_dir = Some(output_dir);
    cfg.on_collision = policy;
    cfg.repeat_every = repeat_every;
    cfg.xor_mask = Some(xor_mask);
    debug!(?cfg, "settings collected interactively");
    Ok(())
}
