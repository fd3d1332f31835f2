//! Tracing setup for the CLI.
use anyhow::{Context, Result};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{EnvFilter, filter::Targets, fmt, prelude::*};

/// Storage engine crates, kept at warnings even in verbose mode.
const STORAGE_TARGETS: [&str; 2] = ["fjall", "lsm_tree"];

/// Per-target levels: everything is off unless `verbose`.
pub fn app_targets(verbose: bool) -> Targets {
    let (app, storage) = if verbose {
        (LevelFilter::DEBUG, LevelFilter::WARN)
    } else {
        (LevelFilter::OFF, LevelFilter::OFF)
    };
    Targets::new()
        .with_target("famfund", app)
        .with_targets(STORAGE_TARGETS.map(|target| (target, storage)))
}

/// Installs the global subscriber. Logs go to stderr so reports on stdout stay clean.
pub fn init_logging(verbose: bool) -> Result<()> {
    let level = if verbose { "debug" } else { "off" };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .pretty()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(app_targets(verbose))
        .with(env_filter)
        .try_init()
        .context("Failed to initialize logging")
}
