//! Tracing subscriber initialisation.
//!
//! This is diagnostics only. User-visible application logs go through the
//! `Logger` facade registered in the container; `clikit-core` and
//! `clikit-adapters` only *emit* spans and events and never touch
//! subscribers.
//!
//! | Configuration      | Filter level |
//! |--------------------|--------------|
//! | default            | WARN         |
//! | `-v` / `VERBOSE`   | DEBUG        |
//!
//! `RUST_LOG` overrides both if set.

use std::io::IsTerminal as _;

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use clikit_core::domain::Configuration;

/// Crates whose diagnostics the default filter lets through.
const CRATES: &[&str] = &["clikit", "clikit_core", "clikit_adapters"];

/// Initialise the global tracing subscriber.
///
/// Fails if a subscriber was already installed in this process.
pub fn init_logging(config: &Configuration) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(config.verbose)));

    let use_ansi = std::env::var_os("NO_COLOR").is_none() && std::io::stderr().is_terminal();

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_ansi(use_ansi)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialise tracing: {e}"))?;

    Ok(())
}

fn derive_level(verbose: bool) -> &'static str {
    if verbose { "debug" } else { "warn" }
}

fn default_directives(verbose: bool) -> String {
    let level = derive_level(verbose);
    CRATES
        .iter()
        .map(|krate| format!("{krate}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}
