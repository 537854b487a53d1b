//! Stats data model
//!
//! [`StatsSnapshot`] is the wire record, [`SnapshotStore`] owns the
//! `(previous, current)` pair and decides which snapshots become visible.

mod snapshot;
mod store;

pub use snapshot::{Counter, StatsSnapshot};
pub use store::{SnapshotPair, SnapshotStore};
