//! Diagnostic logging on stderr.
//!
//! stdout carries only formatted results, so every `tracing` event goes to
//! stderr. The level comes from `RUST_LOG` and defaults to `warn`, which
//! keeps builder warnings visible without debug noise.

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "warn";

/// Install the stderr subscriber. Safe to call more than once.
pub fn init_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    // Colour only when a human is watching stderr.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(atty::is(atty::Stream::Stderr))
        .without_time()
        .with_target(false)
        .compact()
        .try_init();
}
