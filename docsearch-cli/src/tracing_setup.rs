//! Tracing setup for the docsearch CLI
//!
//! Usage:
//!   docsearch --debug ...                  # Debug logging to stderr
//!   RUST_LOG=docsearch_core=trace docsearch  # Fine-grained log control
//!
//! Logs always go to stderr so query output on stdout stays pipeable.

use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

/// Tracing configuration options
#[derive(Debug, Clone, Default)]
pub struct TracingConfig {
    /// Enable debug logging (sets RUST_LOG=debug if not already set)
    pub debug: bool,
    /// Drop all output below `error` (used while the terminal UI owns the screen)
    pub silent: bool,
}

fn filter(config: &TracingConfig) -> EnvFilter {
    if config.silent {
        return EnvFilter::new("error");
    }
    let fallback = if config.debug { "debug" } else { "info" };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback))
}

/// Initialize tracing with compact console output
pub fn init(config: &TracingConfig) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(filter(config))
        .with_target(config.debug) // Show targets in debug mode
        .with_writer(std::io::stderr)
        .compact()
        .try_init()
        .map_err(|err| anyhow!(err))
}
