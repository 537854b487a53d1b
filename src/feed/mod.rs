//! Connection manager for the live stats feed
//!
//! - [`state`]: the pure [`FeedMachine`] (sync state, reconnect guard, store)
//! - [`transport`]: the [`Connector`]/[`FeedSocket`] seam and the WebSocket implementation
//! - [`manager`]: the task that drives the machine and the [`StatsFeed`] handle

mod manager;
pub mod state;
pub mod transport;


pub use manager::{FeedOptions, StatsFeed};
pub use state::{FeedAction, FeedMachine, MessageOutcome, SyncState};
pub use transport::{Connector, FeedSocket, Frame, WebSocketConnector, WebSocketFeedSocket};
