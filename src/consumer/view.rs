//! Push-style view of the snapshot pair

use crate::error::FeedError;
use crate::stats::{SnapshotPair, StatsSnapshot};
use tokio::sync::watch;

/// Read-only `(previous, current)` for a renderer
///
/// Cheap to clone; every clone tracks its own "seen" position.
#[derive(Debug, Clone)]
pub struct StatsView {
    pairs: watch::Receiver<SnapshotPair>,
}

impl StatsView {
    /// Wrap a receiver, treating the pair it currently holds as already seen
    #[must_use]
    pub fn new(mut pairs: watch::Receiver<SnapshotPair>) -> Self {
        let _ = pairs.borrow_and_update();
        Self { pairs }
    }

    /// Copy of the latest accepted pair
    #[must_use]
    pub fn pair(&self) -> SnapshotPair {
        *self.pairs.borrow()
    }

    /// Latest accepted snapshot
    #[must_use]
    pub fn current(&self) -> StatsSnapshot {
        self.pairs.borrow().current
    }

    /// Snapshot accepted before the latest one
    #[must_use]
    pub fn previous(&self) -> StatsSnapshot {
        self.pairs.borrow().previous
    }

    /// Whether no snapshot has been accepted yet (show a placeholder)
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.pairs.borrow().is_awaiting_first()
    }

    /// Wait for the next accepted snapshot and return the new pair
    ///
    /// # Errors
    /// Returns [`FeedError::Stopped`] once the feed is torn down and every
    /// accepted pair has been observed.
    pub async fn changed(&mut self) -> Result<SnapshotPair, FeedError> {
        self.pairs.changed().await.map_err(|_| FeedError::Stopped)?;
        Ok(*self.pairs.borrow_and_update())
    }

    /// Non-blocking check for a pair not yet observed by this view
    ///
    /// Used by render loops that tick on their own schedule.
    pub fn poll_update(&mut self) -> Option<SnapshotPair> {
        match self.pairs.has_changed() {
            Ok(true) => Some(*self.pairs.borrow_and_update()),
            _ => None,
        }
    }
}
