//! Consumer adapters: how the rendering side sees the snapshot pair
//!
//! Neither adapter filters anything; acceptance is decided by the store
//! inside the feed task.
//!
//! - [`StatsView`]: push style, `(previous, current)` refreshed on every acceptance
//! - [`StatsService`]: pull style, `get_latest()` waits for the next acceptance

mod pull;
mod view;

pub use pull::StatsService;
pub use view::StatsView;
