//! Configuration validation
//!
//! This module provides validation logic for the configuration to ensure
//! all settings are usable before the feed starts.

use anyhow::Result;
use std::time::Duration;

use super::types::{Config, FeedConfig};
use crate::types::ValidationError;

/// Below this the feed would hammer an unavailable backend
const MIN_RECOMMENDED_RECONNECT_DELAY: Duration = Duration::from_millis(100);

impl Config {
    /// Validate configuration for correctness
    ///
    /// The endpoint is already validated by its type at parse time.
    /// This checks the remaining semantic constraints:
    /// - Reconnect delay and connect timeout are non-zero
    /// - Reconnect delay is not so short it becomes a tight loop (warning only)
    pub fn validate(&self) -> Result<()> {
        validate_feed(&self.feed)?;
        Ok(())
    }
}

/// Validate the feed section
fn validate_feed(feed: &FeedConfig) -> Result<()> {
    if feed.reconnect_delay.is_zero() {
        return Err(ValidationError::ZeroDuration {
            field: "feed.reconnect_delay_ms",
        }
        .into());
    }

    if feed.connect_timeout.is_zero() {
        return Err(ValidationError::ZeroDuration {
            field: "feed.connect_timeout_secs",
        }
        .into());
    }

    if feed.reconnect_delay < MIN_RECOMMENDED_RECONNECT_DELAY {
        tracing::warn!(
            "feed.reconnect_delay_ms is {:?} (< {:?}). \
             An unavailable backend will be retried in a tight loop.",
            feed.reconnect_delay,
            MIN_RECOMMENDED_RECONNECT_DELAY
        );
    }

    Ok(())
}
