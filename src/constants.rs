//! Constants used throughout the stats feed
//!
//! This module centralizes magic numbers and default values
//! so the feed, config layer and dashboard agree on them.

use std::time::Duration;

/// Streaming endpoint constants
pub mod endpoint {
    /// Endpoint used when neither config nor environment provides one
    pub const DEFAULT_URL: &str = "ws://localhost:3000";

    /// Environment variable overriding the streaming endpoint
    pub const ENV_VAR: &str = "STATS_WEBSOCKET_URL";

    /// Accepted URI schemes for the streaming endpoint
    pub const SCHEMES: [&str; 2] = ["ws", "wss"];
}

/// Reconnection and connection-attempt timing
pub mod reconnect {
    use super::Duration;

    /// Fixed delay between a dropped connection and the next attempt (1 second)
    ///
    /// Fixed, never backed off.
    pub const DELAY_MS: u64 = 1000;

    /// Reconnect delay as a Duration
    pub const DELAY: Duration = Duration::from_millis(DELAY_MS);

    /// Upper bound on a single connection attempt (5 seconds)
    pub const CONNECT_TIMEOUT_SECS: u64 = 5;

    /// Connection attempt bound as a Duration
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(CONNECT_TIMEOUT_SECS);
}

/// Feed task plumbing
pub mod feed {
    /// Capacity of the control channel between handles and the feed task
    ///
    /// Only start/stop travel on it.
    pub const CONTROL_CHANNEL_CAPACITY: usize = 8;

    /// Upper bound on finishing a close handshake (1 second)
    pub const CLOSE_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(1);
}

/// Dashboard animation constants
pub mod animation {
    /// Duration of a counter transition from previous to current (500ms)
    pub const DURATION_MS: u64 = 500;

    /// Counter transition duration as a Duration
    pub const DURATION: std::time::Duration = std::time::Duration::from_millis(DURATION_MS);
}

/// Configuration file constants
pub mod config {
    /// Default configuration file path
    pub const DEFAULT_PATH: &str = "config.toml";

    /// Environment variable naming the configuration file
    pub const PATH_ENV_VAR: &str = "STATS_CONFIG";
}

/// Logging constants
pub mod logging {
    /// Directory the log file is written to
    pub const LOG_DIR: &str = ".";

    /// Name of the log file written alongside stdout / the TUI buffer
    pub const LOG_FILE: &str = "emoji-stats.log";

    /// Filter used when RUST_LOG is not set
    pub const DEFAULT_FILTER: &str = "info";
}
