//! Configuration type definitions
//!
//! This module contains the configuration structures for the feed and
//! the dashboard. Every section and key is optional.

use super::defaults;
use crate::types::{Endpoint, millis_serde, secs_serde};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Main configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct Config {
    /// Streaming connection settings
    #[serde(default)]
    pub feed: FeedConfig,
    /// Terminal dashboard settings
    #[serde(default)]
    pub dashboard: DashboardConfig,
}

/// Streaming connection settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FeedConfig {
    /// WebSocket URL of the stats backend (default: ws://localhost:3000)
    pub endpoint: Endpoint,
    /// Fixed delay before reconnecting after a drop (default: 1000ms)
    #[serde(rename = "reconnect_delay_ms", with = "millis_serde")]
    pub reconnect_delay: Duration,
    /// Upper bound on a single connection attempt (default: 5s)
    #[serde(rename = "connect_timeout_secs", with = "secs_serde")]
    pub connect_timeout: Duration,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            endpoint: defaults::endpoint(),
            reconnect_delay: defaults::reconnect_delay(),
            connect_timeout: defaults::connect_timeout(),
        }
    }
}

/// Terminal dashboard settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DashboardConfig {
    /// Duration of a counter transition (default: 500ms, 0 disables animation)
    #[serde(rename = "animation_ms", with = "millis_serde")]
    pub animation: Duration,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            animation: defaults::animation(),
        }
    }
}
