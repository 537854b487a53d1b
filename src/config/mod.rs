//! Configuration module
//!
//! This module handles all configuration types and loading
//! for the stats feed and dashboard.

mod defaults;
mod loading;
mod types;
mod validation;

// Re-export public types
pub use loading::{
    ConfigSource, create_default_config, load_config, load_config_with_env,
    load_config_with_fallback, load_config_with_fallback_env,
};
pub use types::{Config, DashboardConfig, FeedConfig};

// Re-export default functions for use in tests and other modules
pub use defaults::{animation, connect_timeout, endpoint, reconnect_delay};
