use owo_colors::OwoColorize;

use crate::engine::PassReport;
use crate::errors::XorSweepError;

/// Small wrapper around stdout/stderr printing to provide consistent, colored
/// user-facing messages. Colors are enabled only when output is a TTY.
fn is_tty() -> bool {
    atty::is(atty::Stream::Stdout)
}

pub fn print_info(msg: &str) {
    if is_tty() {
        println!("{} {}", "info:".cyan().bold(), msg);
    } else {
        println!("info: {}", msg);
    }
}

pub fn print_warn(msg: &str) {
    if is_tty() {
        eprintln!("{} {}", "warn:".yellow().bold(), msg);
    } else {
        eprintln!("warn: {}", msg);
    }
}

pub fn print_error(msg: &str) {
    if is_tty() {
        eprintln!("{} {}", "error:".red().bold(), msg);
    } else {
        eprintln!("error: {}", msg);
    }
}

pub fn print_success(msg: &str) {
    if is_tty() {
        println!("{} {}", "ok:".green().bold(), msg);
    } else {
        println!("ok: {}", msg);
    }
}

/// Print a plain user-facing line (no prefix). Use this for primary outputs
/// such as "a.bin -> a0.bin" which users may script against.
pub fn print_user(msg: &str) {
    println!("{}", msg);
}

/// One summary line for a pass.
pub fn summary_line(pass: u64, report: &PassReport) -> String {
    format!(
        "pass {pass}: {} processed, {} failed",
        report.processed,
        report.failures.len()
    )
}

/// Render a pass result: one line per output, one warning per failure, then a summary.
pub fn print_report(pass: u64, result: &Result<PassReport, XorSweepError>) {
    match result {
        Ok(report) => {
            for (input, output) in &report.outputs {
                print_user(&format!("{input} -> {output}"));
            }
            for failure in &report.failures {
                print_warn(&format!("{}: {}", failure.file, failure.error));
            }
            let line = summary_line(pass, report);
            if report.is_clean() {
                print_success(&line);
            } else {
                print_warn(&line);
            }
        }
        Err(e) => print_error(&format!("pass {pass} aborted: {e}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::FileFailure;
    use std::path::PathBuf;

    #[test]
    fn summary_counts_failures() {
        let report = PassReport {
            processed: 2,
            outputs: vec![("a".into(), "a".into()), ("b".into(), "b0".into())],
            failures: vec![FileFailure {
                file: "c".into(),
                error: XorSweepError::Locked(PathBuf::from("c")),
            }],
        };
        assert_eq!(summary_line(4, &report), "pass 4: 2 processed, 1 failed");
    }
}
