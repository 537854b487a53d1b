//! Snapshot store: the single gatekeeper for visible state
//!
//! All filtering lives here so the push and pull consumers can never diverge.

use super::StatsSnapshot;
use tracing::trace;

/// The last two accepted snapshots
///
/// Both start as [`StatsSnapshot::ZERO`]. `previous` is always the value
/// `current` held immediately before the most recent acceptance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SnapshotPair {
    pub previous: StatsSnapshot,
    pub current: StatsSnapshot,
}

impl SnapshotPair {
    /// Whether no snapshot has been accepted yet
    ///
    /// Since degenerate snapshots are never accepted, an all-zero `current`
    /// can only mean the pair is still in its initial state.
    #[must_use]
    #[inline]
    pub const fn is_awaiting_first(&self) -> bool {
        self.current.is_degenerate()
    }
}

/// Holds the snapshot pair and applies the acceptance rule
#[derive(Debug, Default)]
pub struct SnapshotStore {
    pair: SnapshotPair,
    accepted: u64,
    rejected: u64,
}

impl SnapshotStore {
    /// Create a store holding the all-zero pair
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Offer a candidate snapshot
    ///
    /// Returns `false` without touching the pair when every counter is zero.
    /// Otherwise shifts `current` into `previous`, adopts the candidate and
    /// returns `true`.
    pub fn accept(&mut self, candidate: StatsSnapshot) -> bool {
        if candidate.is_degenerate() {
            self.rejected += 1;
            trace!("Dropping degenerate stats snapshot");
            return false;
        }

        self.pair.previous = self.pair.current;
        self.pair.current = candidate;
        self.accepted += 1;
        true
    }

    /// Copy of the current pair
    #[must_use]
    #[inline]
    pub fn pair(&self) -> SnapshotPair {
        self.pair
    }

    /// Number of snapshots accepted so far
    #[must_use]
    #[inline]
    pub fn accepted_count(&self) -> u64 {
        self.accepted
    }

    /// Number of degenerate snapshots dropped so far
    #[must_use]
    #[inline]
    pub fn rejected_count(&self) -> u64 {
        self.rejected
    }
}
