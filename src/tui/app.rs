//! TUI application state and logic

use crate::consumer::StatsView;
use crate::feed::SyncState;
use crate::stats::{Counter, SnapshotPair};
use crate::tui::animation::CounterSet;
use crate::tui::log_capture::LogBuffer;
use crate::types::Endpoint;
use std::time::{Duration, Instant};
use tokio::sync::watch;

/// TUI application state
pub struct TuiApp {
    /// Accepted snapshot pairs from the feed
    view: StatsView,
    /// Connection state from the feed
    state: watch::Receiver<SyncState>,
    /// Endpoint shown in the title bar
    endpoint: Endpoint,
    /// Latest pair observed by the dashboard
    pair: SnapshotPair,
    /// Animated values for the four counters
    counters: CounterSet,
    /// Captured logs (absent in headless mode)
    log_buffer: Option<LogBuffer>,
    /// Whether the log pane takes the whole screen
    log_fullscreen: bool,
}

impl TuiApp {
    /// Create a dashboard over a running feed
    #[must_use]
    pub fn new(
        view: StatsView,
        state: watch::Receiver<SyncState>,
        endpoint: Endpoint,
        animation: Duration,
    ) -> Self {
        let now = Instant::now();
        let pair = view.pair();
        let mut counters = CounterSet::new(animation, now);
        if !pair.is_awaiting_first() {
            counters.retarget(&pair, now);
        }
        Self {
            view,
            state,
            endpoint,
            pair,
            counters,
            log_buffer: None,
            log_fullscreen: false,
        }
    }

    /// Attach the captured log buffer
    #[must_use]
    pub fn with_log_buffer(mut self, log_buffer: LogBuffer) -> Self {
        self.log_buffer = Some(log_buffer);
        self
    }

    /// Pick up a newly accepted pair, restarting the counter transitions
    ///
    /// Returns true if a new pair arrived.
    pub fn update(&mut self, now: Instant) -> bool {
        match self.view.poll_update() {
            Some(pair) => {
                self.pair = pair;
                self.counters.retarget(&pair, now);
                true
            }
            None => false,
        }
    }

    /// Displayed value of one counter, or None while it shows a placeholder
    #[must_use]
    pub fn counter_value(&self, counter: Counter, now: Instant) -> Option<u64> {
        let animation = self.counters.get(counter);
        (!animation.is_placeholder()).then(|| animation.value_at(now))
    }

    /// Whether a redraw is needed soon to keep animations smooth
    #[must_use]
    pub fn is_animating(&self, now: Instant) -> bool {
        self.counters.is_animating(now)
    }

    /// Whether no snapshot has been accepted yet
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.pair.is_awaiting_first()
    }

    /// Latest pair observed by the dashboard
    #[must_use]
    pub fn pair(&self) -> &SnapshotPair {
        &self.pair
    }

    /// Current connection state
    #[must_use]
    pub fn sync_state(&self) -> SyncState {
        *self.state.borrow()
    }

    /// Endpoint the feed connects to
    #[must_use]
    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// Captured log buffer, if any
    #[must_use]
    pub fn log_buffer(&self) -> Option<&LogBuffer> {
        self.log_buffer.as_ref()
    }

    /// Toggle fullscreen log view
    pub fn toggle_log_fullscreen(&mut self) {
        self.log_fullscreen = !self.log_fullscreen;
    }

    /// Whether the log pane takes the whole screen
    #[must_use]
    pub fn is_log_fullscreen(&self) -> bool {
        self.log_fullscreen
    }
}
