//! Validated streaming endpoint URL

use crate::constants::endpoint::{DEFAULT_URL, SCHEMES};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use tokio_tungstenite::tungstenite::http::Uri;

/// Validation errors for value types
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationError {
    #[error("endpoint cannot be empty or whitespace")]
    EmptyEndpoint,

    #[error("invalid endpoint '{url}': {reason}")]
    InvalidEndpoint { url: String, reason: String },

    #[error("unsupported endpoint scheme '{0}' (expected ws or wss)")]
    UnsupportedScheme(String),

    #[error("{field} must be greater than zero")]
    ZeroDuration { field: &'static str },
}

/// A WebSocket URL the feed connects to
///
/// Guaranteed to parse as a URI with a `ws`/`wss` scheme and a host.
///
/// # Examples
/// ```
/// use emoji_stats_feed::types::Endpoint;
///
/// let endpoint = Endpoint::new("ws://localhost:3000".to_string()).unwrap();
/// assert_eq!(endpoint.as_str(), "ws://localhost:3000");
///
/// assert!(Endpoint::new("http://localhost:3000".to_string()).is_err());
/// assert!(Endpoint::new("   ".to_string()).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Endpoint(String);

impl Endpoint {
    /// Create a new Endpoint after validation
    pub fn new(url: String) -> Result<Self, ValidationError> {
        let trimmed = url.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyEndpoint);
        }

        let uri: Uri = trimmed
            .parse()
            .map_err(|e: tokio_tungstenite::tungstenite::http::uri::InvalidUri| {
                ValidationError::InvalidEndpoint {
                    url: trimmed.to_string(),
                    reason: e.to_string(),
                }
            })?;

        let scheme = uri.scheme_str().ok_or_else(|| ValidationError::InvalidEndpoint {
            url: trimmed.to_string(),
            reason: "missing scheme".to_string(),
        })?;
        if !SCHEMES.contains(&scheme) {
            return Err(ValidationError::UnsupportedScheme(scheme.to_string()));
        }

        if uri.host().is_none_or(str::is_empty) {
            return Err(ValidationError::InvalidEndpoint {
                url: trimmed.to_string(),
                reason: "missing host".to_string(),
            });
        }

        Ok(Self(trimmed.to_string()))
    }

    /// Get the endpoint as a string slice
    #[must_use]
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the endpoint requires TLS
    #[must_use]
    pub fn is_secure(&self) -> bool {
        self.0.starts_with("wss://")
    }
}

impl Default for Endpoint {
    fn default() -> Self {
        Self(DEFAULT_URL.to_string())
    }
}

impl AsRef<str> for Endpoint {
    #[inline]
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Endpoint {
    type Error = ValidationError;

    fn try_from(url: String) -> Result<Self, Self::Error> {
        Self::new(url)
    }
}

impl FromStr for Endpoint {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.to_string())
    }
}

impl<'de> Deserialize<'de> for Endpoint {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::new(s).map_err(serde::de::Error::custom)
    }
}
