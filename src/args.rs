//! Command-line argument parsing for the stats binaries
//!
//! Provides shared argument structures to avoid duplication across binaries.

use crate::constants;
use crate::types::Endpoint;
use clap::Parser;

/// Common command-line arguments for the stats binaries
///
/// Use `#[command(flatten)]` in binary-specific Args to include these fields.
#[derive(Parser, Debug, Clone)]
pub struct CommonArgs {
    /// WebSocket URL of the stats backend (overrides config file and environment)
    ///
    /// `STATS_WEBSOCKET_URL` is read by the config loader, where a blank value
    /// counts as unset.
    #[arg(short, long)]
    pub endpoint: Option<Endpoint>,

    /// Configuration file path
    #[arg(
        short,
        long,
        default_value = constants::config::DEFAULT_PATH,
        env = constants::config::PATH_ENV_VAR
    )]
    pub config: String,
}

impl CommonArgs {
    /// Get effective endpoint (from args or config)
    #[must_use]
    pub fn effective_endpoint(&self, config_endpoint: &Endpoint) -> Endpoint {
        self.endpoint
            .clone()
            .unwrap_or_else(|| config_endpoint.clone())
    }
}
