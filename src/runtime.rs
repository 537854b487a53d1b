//! Tokio runtime setup and common utilities for binary targets
//!
//! This module provides:
//! - The runtime builder shared by both binaries
//! - Shutdown signal handling
//! - Config loading with startup logging

use crate::args::CommonArgs;
use crate::config::{Config, ConfigSource, load_config_with_fallback};
use anyhow::Result;
use tracing::{info, warn};

/// Build the tokio runtime
///
/// The feed is a single actor task plus a consumer; a current-thread runtime
/// is all it needs.
///
/// # Errors
/// Returns error if runtime creation fails
pub fn build_runtime() -> Result<tokio::runtime::Runtime> {
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    Ok(rt)
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM on Unix)
///
/// If a handler can't be installed that source is ignored and a warning logged.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

/// Load configuration, apply the CLI endpoint override, and log the result
///
/// # Errors
/// Returns error if configuration loading fails
pub fn load_and_log_config(args: &CommonArgs) -> Result<(Config, ConfigSource)> {
    let (mut config, source) = load_config_with_fallback(&args.config)?;
    info!("Loaded configuration from {}", source.description());

    let endpoint = args.effective_endpoint(&config.feed.endpoint);
    if endpoint != config.feed.endpoint {
        info!("Using endpoint {} from command line", endpoint);
        config.feed.endpoint = endpoint;
    }

    info!(
        "Stats endpoint: {} (reconnect delay {:?}, connect timeout {:?})",
        config.feed.endpoint, config.feed.reconnect_delay, config.feed.connect_timeout
    );

    Ok((config, source))
}
