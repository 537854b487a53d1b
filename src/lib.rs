//! Live emoji index statistics feed
//!
//! Maintains a WebSocket subscription to a stats backend and exposes the
//! latest two accepted [`StatsSnapshot`]s to consumers:
//!
//! - push: [`StatsView`] (from [`StatsFeed::view`]) for renderers that hold
//!   a long-lived connection
//! - pull: [`StatsService::get_latest`] for request/response rendering
//!
//! The connection reconnects after a fixed delay whenever it drops, and
//! all-zero snapshots (the backend's warm-up placeholder) are never shown.

pub mod args;
pub mod config;
pub mod constants;
pub mod consumer;
pub mod error;
pub mod feed;
pub mod formatting;
pub mod logging;
pub mod runtime;
pub mod stats;
pub mod tui;
pub mod types;

pub use args::CommonArgs;
pub use config::{Config, ConfigSource, load_config, load_config_with_fallback};
pub use consumer::{StatsService, StatsView};
pub use error::{DecodeError, FeedError, TransportError};
pub use feed::{FeedOptions, StatsFeed, SyncState};
pub use stats::{Counter, SnapshotPair, StatsSnapshot};
pub use types::{Endpoint, ValidationError};
