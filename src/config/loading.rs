//! Configuration loading from files and environment variables
//!
//! This module handles loading configuration from TOML files and the
//! environment, with `STATS_WEBSOCKET_URL` taking precedence over the
//! endpoint named in the file.

use anyhow::{Context, Result};
use std::path::Path;

use super::types::Config;
use crate::constants::endpoint::ENV_VAR;
use crate::types::Endpoint;

/// Where the effective configuration came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSource {
    /// Read from a TOML file (environment may still override the endpoint)
    File,
    /// No file; endpoint taken from the environment
    Environment,
    /// No file and no environment; built-in defaults
    Default,
}

impl ConfigSource {
    /// Human-readable description for startup logging
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::File => "configuration file",
            Self::Environment => "environment variables",
            Self::Default => "built-in defaults",
        }
    }
}

/// Read the endpoint override from an environment lookup
///
/// An empty value counts as unset.
fn endpoint_from_env<F>(lookup: &F) -> Result<Option<Endpoint>>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(ENV_VAR) {
        Some(raw) if !raw.trim().is_empty() => {
            let endpoint = Endpoint::try_from(raw)
                .with_context(|| format!("Invalid endpoint in environment variable {}", ENV_VAR))?;
            Ok(Some(endpoint))
        }
        _ => Ok(None),
    }
}

/// Load configuration from a TOML file, with environment overrides
///
/// `STATS_WEBSOCKET_URL` replaces `feed.endpoint` from the file when set.
///
/// # Errors
/// Returns error if the file can't be read or parsed, or fails validation
pub fn load_config(config_path: &str) -> Result<Config> {
    load_config_with_env(config_path, |key| std::env::var(key).ok())
}

/// [`load_config`] with an explicit environment lookup
///
/// # Errors
/// Returns error if the file can't be read or parsed, or fails validation
pub fn load_config_with_env<F>(config_path: &str, lookup: F) -> Result<Config>
where
    F: Fn(&str) -> Option<String>,
{
    let config_content = std::fs::read_to_string(config_path)
        .map_err(|e| anyhow::anyhow!("Failed to read config file '{}': {}", config_path, e))?;

    let mut config: Config = toml::from_str(&config_content)
        .map_err(|e| anyhow::anyhow!("Failed to parse config file '{}': {}", config_path, e))?;

    if let Some(endpoint) = endpoint_from_env(&lookup)? {
        tracing::info!(
            "Using endpoint {} from {} (overriding config file)",
            endpoint,
            ENV_VAR
        );
        config.feed.endpoint = endpoint;
    }

    config.validate()?;

    Ok(config)
}

/// Load configuration, falling back when the file is absent
///
/// Order of preference:
/// 1. The file at `config_path` (with environment overrides)
/// 2. Defaults with the endpoint from `STATS_WEBSOCKET_URL`
/// 3. Built-in defaults
///
/// A file that exists but is malformed is an error, never a fallback.
///
/// # Errors
/// Returns error if the file exists but is invalid, or the environment
/// endpoint is malformed
pub fn load_config_with_fallback(config_path: &str) -> Result<(Config, ConfigSource)> {
    load_config_with_fallback_env(config_path, |key| std::env::var(key).ok())
}

/// [`load_config_with_fallback`] with an explicit environment lookup
///
/// # Errors
/// See [`load_config_with_fallback`]
pub fn load_config_with_fallback_env<F>(
    config_path: &str,
    lookup: F,
) -> Result<(Config, ConfigSource)>
where
    F: Fn(&str) -> Option<String>,
{
    if Path::new(config_path).exists() {
        let config = load_config_with_env(config_path, lookup)?;
        return Ok((config, ConfigSource::File));
    }

    if let Some(endpoint) = endpoint_from_env(&lookup)? {
        let mut config = Config::default();
        config.feed.endpoint = endpoint;
        config.validate()?;
        return Ok((config, ConfigSource::Environment));
    }

    tracing::debug!("Config file '{}' not found, using defaults", config_path);
    Ok((create_default_config(), ConfigSource::Default))
}

/// Create a default configuration for examples/testing
#[must_use]
pub fn create_default_config() -> Config {
    Config::default()
}
