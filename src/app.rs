//! Application orchestrator.
//! Loads/merges config, optionally prompts for settings, initializes logging, installs the
//! signal handler, validates paths, and hands the transform settings to the scheduler.

use anyhow::{Context, Result, bail};
use std::io;
use std::sync::{Arc, Mutex};
use tracing::{debug, error, info};

use xor_sweep::cli::Args;
use xor_sweep::config::{
    CONFIG_ENV, default_config_path, default_log_path, load_config_from_xml_path, resolve_config_path,
};
use xor_sweep::output as out;
use xor_sweep::{Config, prompt, run_schedule, shutdown};

use crate::logging::init_tracing;

/// Run the CLI application.
pub fn run(args: Args) -> Result<()> {
    // Handle --print-config before logging init
    if args.print_config {
        print_config_location(&args);
        return Ok(());
    }

    // Build config: XML (if any) first, then CLI overrides, then interactive answers.
    let cfg_path = resolve_config_path(args.config.as_deref());
    let mut cfg = match cfg_path.as_deref() {
        Some(p) => load_config_from_xml_path(p)?,
        None => Config::default(),
    };
    args.apply_overrides(&mut cfg);

    if args.interactive {
        let stdin = io::stdin();
        let mut input = stdin.lock();
        let mut output = io::stdout();
        prompt::collect_settings(&mut input, &mut output, &mut cfg)?;
    }

    // Initialize logging and keep the guard so buffered file logs are flushed on exit
    let guard_opt = init_tracing(&cfg.log_level, cfg.log_file.as_deref(), args.json).map_err(|e| {
        out::print_error(&format!("Failed to initialize logging: {}", e));
        e
    })?;
    let guard_slot = Arc::new(Mutex::new(guard_opt));
    {
        let guard_slot = Arc::clone(&guard_slot);
        ctrlc::set_handler(move || {
            shutdown::request();
            out::print_warn("Received interrupt; stopping after the current pass...");
            if let Ok(mut g) = guard_slot.lock() {
                let _ = g.take();
            }
        })
        .context("install interrupt handler")?;
    }

    debug!(?args, config_file = ?cfg_path, "starting xor_sweep");

    let result = (|| -> Result<()> {
        cfg.validate()?;
        let transform = cfg.transform_config()?;

        let mut failed_files = 0usize;
        let passes = run_schedule(
            &transform,
            &cfg.working_dir,
            cfg.repeat_every,
            shutdown::is_requested,
            |n, r| {
                out::print_report(n, r);
                if let Ok(report) = r {
                    failed_files += report.failures.len();
                }
            },
        )
        .inspect_err(|e| {
            error!(code = e.code(), kind = e.kind(), error = %e, "pass aborted");
        })?;

        info!(passes, failed_files, "xor_sweep finished");
        if cfg.repeat_every.is_none() && failed_files > 0 {
            bail!("{failed_files} file(s) could not be processed cleanly");
        }
        Ok(())
    })();

    // Ensure logs are flushed before exit
    if let Ok(mut g) = guard_slot.lock() {
        let _ = g.take();
    }

    result
}

fn print_config_location(args: &Args) {
    if let Some(p) = args.config.as_deref() {
        out::print_info(&format!("Using --config (explicit):\n  {}\n", p.display()));
        return;
    }
    if let Ok(cfg_env) = std::env::var(CONFIG_ENV) {
        out::print_info(&format!("Using {CONFIG_ENV} (explicit):\n  {}\n", cfg_env));
        out::print_info(&format!("To override, unset {CONFIG_ENV} or pass --config."));
        return;
    }
    match default_config_path() {
        Some(p) => {
            out::print_info(&format!("Default xor_sweep config path:\n  {}\n", p.display()));
            if p.exists() {
                out::print_info("A config file exists at that location.");
            } else {
                out::print_info("No config file exists there; settings come from flags only.");
            }
        }
        None => out::print_error("Could not determine a default config path"),
    }
    if let Some(log) = default_log_path() {
        out::print_info(&format!(
            "Suggested log file (pass with --log-file or <log_file>):\n  {}",
            log.display()
        ));
    }
}
