use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

use xor_sweep::cli::Args;
use xor_sweep::config::types::{Config, LogLevel};
use xor_sweep::CollisionPolicy;

#[test]
fn effective_log_level_precedence() {
    let args = Args::parse_from(["xor_sweep", "--debug", "--log-level", "quiet"]);
    assert_eq!(args.effective_log_level().unwrap(), LogLevel::Debug); // --debug wins

    let args = Args::parse_from(["xor_sweep", "--log-level", "info"]);
    assert_eq!(args.effective_log_level().unwrap(), LogLevel::Info);

    let args = Args::parse_from(["xor_sweep", "--log-level", "DEBUG"]);
    assert_eq!(args.effective_log_level().unwrap(), LogLevel::Debug);

    let args = Args::parse_from(["xor_sweep"]);
    assert!(args.effective_log_level().is_none());
}

#[test]
fn apply_overrides_sets_flags() {
    let args = Args::parse_from([
        "xor_sweep",
        "-w",
        "/in",
        "-o",
        "/out",
        "-m",
        ".dat",
        "-x",
        "0b100",
        "--remove-source",
        "--on-collision",
        "overwrite",
        "--repeat-ms",
        "1500",
        "--log-file",
        "/tmp/x.log",
    ]);
    let mut cfg = Config::default();
    args.apply_overrides(&mut cfg);
    assert_eq!(cfg.working_dir, PathBuf::from("/in"));
    assert_eq!(cfg.output_dir, Some(PathBuf::from("/out")));
    assert_eq!(cfg.filename_mask.as_deref(), Some(".dat"));
    assert_eq!(cfg.xor_mask, Some(4));
    assert!(cfg.remove_source);
    assert_eq!(cfg.on_collision, CollisionPolicy::Overwrite);
    assert_eq!(cfg.repeat_every, Some(Duration::from_millis(1500)));
    assert_eq!(cfg.log_file, Some(PathBuf::from("/tmp/x.log")));
}

#[test]
fn unset_flags_leave_config_alone() {
    let mut cfg = Config::new("/in", "/out", ".bin", 9);
    cfg.remove_source = true;
    cfg.repeat_every = Some(Duration::from_secs(5));

    Args::parse_from(["xor_sweep"]).apply_overrides(&mut cfg);

    assert_eq!(cfg.working_dir, PathBuf::from("/in"));
    assert_eq!(cfg.xor_mask, Some(9));
    assert!(cfg.remove_source);
    assert_eq!(cfg.repeat_every, Some(Duration::from_secs(5)));
}

#[test]
fn repeat_zero_means_run_once() {
    let mut cfg = Config {
        repeat_every: Some(Duration::from_secs(1)),
        ..Default::default()
    };
    Args::parse_from(["xor_sweep", "--repeat-ms", "0"]).apply_overrides(&mut cfg);
    assert_eq!(cfg.repeat_every, None);
}

#[test]
fn mask_may_start_with_a_hyphen() {
    let args = Args::parse_from(["xor_sweep", "--mask", "-old"]);
    assert_eq!(args.mask.as_deref(), Some("-old"));
}

#[test]
fn xor_mask_accepts_hex_and_decimal() {
    assert_eq!(Args::parse_from(["xor_sweep", "-x", "0xff"]).xor_mask, Some(255));
    assert_eq!(Args::parse_from(["xor_sweep", "-x", "32"]).xor_mask, Some(32));
}

#[test]
fn bad_values_are_rejected_by_the_parser() {
    assert!(Args::try_parse_from(["xor_sweep", "-x", "256"]).is_err());
    assert!(Args::try_parse_from(["xor_sweep", "-x", "0b2"]).is_err());
    assert!(Args::try_parse_from(["xor_sweep", "--on-collision", "skip"]).is_err());
    assert!(Args::try_parse_from(["xor_sweep", "--log-level", "bogus"]).is_err());
}
