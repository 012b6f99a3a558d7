//! [apps/vanity-miner/src/main.rs]
//!
//! Entry point: parses CLI arguments, compiles the prefix pattern
//! table, installs signal handling, and hands control to the
//! coordinator.

mod cli;
mod coordinator;
mod engine;
mod errors;
mod result;

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use cli::Cli;
use coordinator::Coordinator;
use vanity_core_pattern::compile_patterns;
use vanity_core_pattern::difficulty::expected_attempts;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    ignore_sigpipe();

    let available_cpus = num_cpus::get();
    let thread_count = cli.clamped_thread_count(available_cpus);
    info!(
        available_cpus,
        thread_count,
        optimized_arithmetic = vanity_core_math::hardware::is_optimized_arithmetic_supported(),
        "starting up"
    );

    let pattern_table: vanity_core_pattern::table::PatternTable =
        compile_patterns(&cli.prefixes, cli.case_insensitive).map_err(errors::MinerError::Pattern)?;
    let difficulty = expected_attempts(&pattern_table).unwrap_or(f64::INFINITY);

    if cli.verbose {
        for interval in pattern_table.intervals() {
            info!(low = %hex::encode(interval.low), high = %hex::encode(interval.high), "compiled pattern interval");
        }
        info!(difficulty, "estimated expected attempts");
    }

    let stop_flag = Arc::new(AtomicBool::new(false));
    install_termination_handler(Arc::clone(&stop_flag));

    let coordinator = Coordinator::new(
        Arc::new(pattern_table),
        difficulty,
        thread_count,
        cli.max_count,
        cli.keep_going,
        cli.quiet,
    );

    coordinator.run(stop_flag, |hit| {
        let line = result::format_hit(&hit.private_key, &hit.hash160, cli.quiet);
        println!("{line}");
    })?;

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

fn install_termination_handler(stop_flag: Arc<AtomicBool>) {
    let result = ctrlc::set_handler(move || {
        warn!("termination requested, winding down");
        stop_flag.store(true, std::sync::atomic::Ordering::SeqCst);
    });
    if let Err(error) = result {
        warn!(%error, "failed to install termination handler");
    }
}

#[cfg(unix)]
fn ignore_sigpipe() {
    // SAFETY: SIG_IGN is a valid disposition for SIGPIPE; this just
    // replaces the default terminate-on-broken-pipe behavior so a
    // downstream `head`-style consumer surfaces as a normal write error.
    unsafe {
        libc::signal(libc::SIGPIPE, libc::SIG_IGN);
    }
}

#[cfg(not(unix))]
fn ignore_sigpipe() {}
