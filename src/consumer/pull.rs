//! Pull-style accessor for server-side rendering
//!
//! A process creates one [`StatsService`] and shares it; the connection it
//! owns is opened on first use and reused afterwards.

use crate::error::FeedError;
use crate::feed::{FeedOptions, StatsFeed, WebSocketConnector};
use crate::stats::StatsSnapshot;
use crate::types::Endpoint;
use std::time::Duration;
use tracing::error;

/// Owns a feed instance and hands out fresh snapshots on request
#[derive(Debug)]
pub struct StatsService {
    feed: StatsFeed,
    endpoint: Endpoint,
}

impl StatsService {
    /// Create a service backed by a WebSocket feed
    ///
    /// Nothing is connected until the first [`StatsService::get_latest`].
    #[must_use]
    pub fn new(endpoint: Endpoint, options: FeedOptions) -> Self {
        Self::with_feed(StatsFeed::spawn(WebSocketConnector::new(), options), endpoint)
    }

    /// Create a service around an existing (possibly not yet started) feed
    #[must_use]
    pub fn with_feed(feed: StatsFeed, endpoint: Endpoint) -> Self {
        Self { feed, endpoint }
    }

    /// Wait for the next accepted snapshot
    ///
    /// Always waits for a snapshot accepted *after* the call; the value the
    /// store already holds is never returned from cache.
    ///
    /// # Errors
    /// Returns [`FeedError::Stopped`] if the feed is torn down first.
    pub async fn get_latest(&self) -> Result<StatsSnapshot, FeedError> {
        let mut pairs = self.feed.subscribe();
        let _ = pairs.borrow_and_update();

        self.feed.start(self.endpoint.clone())?;

        pairs.changed().await.map_err(|_| FeedError::Stopped)?;
        let current = pairs.borrow().current;
        Ok(current)
    }

    /// [`StatsService::get_latest`] bounded by a deadline
    ///
    /// # Errors
    /// Returns [`FeedError::TimedOut`] if nothing is accepted within `limit`.
    pub async fn get_latest_timeout(&self, limit: Duration) -> Result<StatsSnapshot, FeedError> {
        tokio::time::timeout(limit, self.get_latest())
            .await
            .map_err(|_| FeedError::TimedOut(limit))?
    }

    /// Fetch for rendering: failures are logged and yield the all-zero snapshot
    ///
    /// The renderer shows its loading placeholder for an all-zero snapshot.
    pub async fn get_latest_or_default(&self, limit: Duration) -> StatsSnapshot {
        match self.get_latest_timeout(limit).await {
            Ok(snapshot) => snapshot,
            Err(e) => {
                error!("Error fetching stats: {}", e);
                StatsSnapshot::ZERO
            }
        }
    }

    /// The underlying feed, for diagnostics
    #[must_use]
    pub fn feed(&self) -> &StatsFeed {
        &self.feed
    }

    /// Tear down the owned connection
    pub async fn stop(self) {
        self.feed.stop().await;
    }
}
