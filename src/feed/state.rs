//! Connection state machine
//!
//! [`FeedMachine`] is a pure update function: every transport event is fed in,
//! the machine mutates [`SyncState`] and the snapshot store, and returns the
//! side effect (connect / arm the reconnect timer) for the driving task to
//! perform. It never touches a socket or a clock, which keeps every transition
//! testable without I/O.

use crate::error::{DecodeError, TransportError};
use crate::stats::{SnapshotPair, SnapshotStore, StatsSnapshot};
use crate::types::Endpoint;
use std::fmt;
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Connection lifecycle state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SyncState {
    /// Not started yet, or torn down
    #[default]
    Disconnected,
    /// A connection attempt is in flight
    Connecting,
    /// Socket is open and delivering messages
    Connected,
    /// Socket closed; exactly one reconnect timer is armed
    ReconnectPending,
}

impl SyncState {
    /// Get a human-readable name for this state
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Disconnected => "disconnected",
            Self::Connecting => "connecting",
            Self::Connected => "connected",
            Self::ReconnectPending => "reconnect pending",
        }
    }
}

impl fmt::Display for SyncState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Side effect requested by the state machine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedAction {
    /// Open a new connection; any armed reconnect timer is void
    Connect(Endpoint),
    /// Arm the reconnect timer
    ScheduleReconnect(Duration),
}

/// What happened to an inbound message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageOutcome {
    /// Snapshot adopted; carries the new pair
    Accepted(SnapshotPair),
    /// All-zero placeholder, dropped by the store
    Degenerate,
    /// Arrived after teardown, not even decoded
    Ignored,
}

/// The connection manager's state and snapshot store
#[derive(Debug)]
pub struct FeedMachine {
    state: SyncState,
    endpoint: Option<Endpoint>,
    store: SnapshotStore,
    reconnect_delay: Duration,
    torn_down: bool,
    connect_attempts: u64,
}

impl FeedMachine {
    /// Create a machine in `Disconnected` with an all-zero pair
    #[must_use]
    pub fn new(reconnect_delay: Duration) -> Self {
        Self {
            state: SyncState::Disconnected,
            endpoint: None,
            store: SnapshotStore::new(),
            reconnect_delay,
            torn_down: false,
            connect_attempts: 0,
        }
    }

    /// Current state
    #[must_use]
    #[inline]
    pub fn state(&self) -> SyncState {
        self.state
    }

    /// Copy of the snapshot pair
    #[must_use]
    #[inline]
    pub fn pair(&self) -> SnapshotPair {
        self.store.pair()
    }

    /// Whether `stop()` has been called
    #[must_use]
    #[inline]
    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// Number of connection attempts requested so far (initial one included)
    #[must_use]
    #[inline]
    pub fn connect_attempts(&self) -> u64 {
        self.connect_attempts
    }

    /// Read access to the store counters
    #[must_use]
    pub fn store(&self) -> &SnapshotStore {
        &self.store
    }

    /// Start (or explicitly re-trigger) the connection
    ///
    /// No-op while a connection is open or an attempt is in flight. From
    /// `ReconnectPending` this reconnects immediately, voiding the timer.
    pub fn start(&mut self, endpoint: Endpoint) -> Option<FeedAction> {
        if self.torn_down {
            debug!("Ignoring start on a stopped feed");
            return None;
        }

        match self.state {
            SyncState::Connecting | SyncState::Connected => {
                debug!("Feed already {}, start is a no-op", self.state);
                None
            }
            SyncState::Disconnected | SyncState::ReconnectPending => {
                self.endpoint = Some(endpoint);
                self.begin_connect()
            }
        }
    }

    /// The socket finished opening
    pub fn on_open(&mut self) {
        if self.torn_down || self.state != SyncState::Connecting {
            return;
        }
        if let Some(endpoint) = &self.endpoint {
            info!("Connected to stats endpoint {}", endpoint);
        }
        self.state = SyncState::Connected;
    }

    /// A message arrived on the socket
    ///
    /// # Errors
    /// Returns the [`DecodeError`] after logging it; neither the state nor the
    /// pair change.
    pub fn on_message(&mut self, raw: &[u8]) -> Result<MessageOutcome, DecodeError> {
        if self.torn_down {
            return Ok(MessageOutcome::Ignored);
        }

        let candidate = StatsSnapshot::decode(raw).inspect_err(|e| {
            warn!("Discarding stats message: {}", e);
        })?;

        if self.store.accept(candidate) {
            let pair = self.store.pair();
            debug!(
                "Accepted stats snapshot: {} emoji in {} packs ({} / {} indexed)",
                pair.current.total_emoji_count,
                pair.current.total_emojipack_count,
                pair.current.indexed_emoji_count,
                pair.current.indexed_emojipack_count
            );
            Ok(MessageOutcome::Accepted(pair))
        } else {
            Ok(MessageOutcome::Degenerate)
        }
    }

    /// The socket closed (or a connection attempt failed)
    ///
    /// Arms the reconnect timer unless one is already armed.
    pub fn on_close(&mut self) -> Option<FeedAction> {
        match self.state {
            _ if self.torn_down => None,
            SyncState::Disconnected | SyncState::ReconnectPending => None,
            SyncState::Connecting | SyncState::Connected => {
                info!(
                    "Stats connection closed, reconnecting in {:?}",
                    self.reconnect_delay
                );
                self.state = SyncState::ReconnectPending;
                Some(FeedAction::ScheduleReconnect(self.reconnect_delay))
            }
        }
    }

    /// The transport failed; handled exactly like a close after logging
    pub fn on_error(&mut self, err: &TransportError) -> Option<FeedAction> {
        if self.torn_down {
            return None;
        }
        error!("Stats connection error: {}", err);
        self.on_close()
    }

    /// The reconnect timer fired
    pub fn on_reconnect_due(&mut self) -> Option<FeedAction> {
        if self.torn_down || self.state != SyncState::ReconnectPending {
            return None;
        }
        self.begin_connect()
    }

    /// Tear down: terminal `Disconnected`, every later event is ignored
    pub fn stop(&mut self) {
        if !self.torn_down {
            debug!("Stopping stats feed (was {})", self.state);
        }
        self.torn_down = true;
        self.state = SyncState::Disconnected;
    }

    fn begin_connect(&mut self) -> Option<FeedAction> {
        let endpoint = self.endpoint.clone()?;
        debug!("Connecting to stats endpoint {}", endpoint);
        self.state = SyncState::Connecting;
        self.connect_attempts += 1;
        Some(FeedAction::Connect(endpoint))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELAY: Duration = Duration::from_millis(1000);
    const ZERO: &[u8] = br#"{"total_emoji_count":0,"total_emojipack_count":0,"indexed_emoji_count":0,"indexed_emojipack_count":0}"#;
    const HUNDRED: &[u8] = br#"{"total_emoji_count":100,"total_emojipack_count":5,"indexed_emoji_count":80,"indexed_emojipack_count":5}"#;
    const ONE_FIFTY: &[u8] = br#"{"total_emoji_count":150,"total_emojipack_count":7,"indexed_emoji_count":120,"indexed_emojipack_count":6}"#;

    fn endpoint() -> Endpoint {
        Endpoint::default()
    }

    fn connected() -> FeedMachine {
        let mut machine = FeedMachine::new(DELAY);
        machine.start(endpoint());
        machine.on_open();
        machine
    }

    #[test]
    fn test_initial_state() {
        let machine = FeedMachine::new(DELAY);
        assert_eq!(machine.state(), SyncState::Disconnected);
        assert!(machine.pair().is_awaiting_first());
        assert_eq!(machine.connect_attempts(), 0);
    }

    #[test]
    fn test_start_connects() {
        let mut machine = FeedMachine::new(DELAY);
        assert_eq!(
            machine.start(endpoint()),
            Some(FeedAction::Connect(endpoint()))
        );
        assert_eq!(machine.state(), SyncState::Connecting);

        machine.on_open();
        assert_eq!(machine.state(), SyncState::Connected);
    }

    #[test]
    fn test_start_is_idempotent_while_open() {
        let mut machine = connected();
        assert_eq!(machine.start(endpoint()), None);
        assert_eq!(machine.state(), SyncState::Connected);
        assert_eq!(machine.connect_attempts(), 1);
    }

    #[test]
    fn test_start_is_idempotent_while_connecting() {
        let mut machine = FeedMachine::new(DELAY);
        machine.start(endpoint());
        assert_eq!(machine.start(endpoint()), None);
        assert_eq!(machine.connect_attempts(), 1);
    }

    #[test]
    fn test_start_from_reconnect_pending_reconnects_now() {
        let mut machine = connected();
        machine.on_close();
        assert_eq!(
            machine.start(endpoint()),
            Some(FeedAction::Connect(endpoint()))
        );
        assert_eq!(machine.state(), SyncState::Connecting);

        // The stale timer firing afterwards must not open a second connection
        assert_eq!(machine.on_reconnect_due(), None);
    }

    #[test]
    fn test_close_schedules_single_reconnect() {
        let mut machine = connected();
        assert_eq!(
            machine.on_close(),
            Some(FeedAction::ScheduleReconnect(DELAY))
        );
        assert_eq!(machine.state(), SyncState::ReconnectPending);

        // Overlapping close before the timer fires
        assert_eq!(machine.on_close(), None);
        assert_eq!(machine.state(), SyncState::ReconnectPending);
    }

    #[test]
    fn test_error_then_close_schedules_single_reconnect() {
        let mut machine = connected();
        let err = TransportError::disconnected("reset by peer");
        assert_eq!(
            machine.on_error(&err),
            Some(FeedAction::ScheduleReconnect(DELAY))
        );
        assert_eq!(machine.on_close(), None);
    }

    #[test]
    fn test_failed_connect_schedules_reconnect() {
        let mut machine = FeedMachine::new(DELAY);
        machine.start(endpoint());
        let err = TransportError::ConnectTimeout(Duration::from_secs(5));
        assert_eq!(
            machine.on_error(&err),
            Some(FeedAction::ScheduleReconnect(DELAY))
        );
    }

    #[test]
    fn test_reconnect_due_connects_again() {
        let mut machine = connected();
        machine.on_close();
        assert_eq!(
            machine.on_reconnect_due(),
            Some(FeedAction::Connect(endpoint()))
        );
        assert_eq!(machine.state(), SyncState::Connecting);
        assert_eq!(machine.connect_attempts(), 2);
    }

    #[test]
    fn test_reconnect_due_without_pending_is_ignored() {
        let mut machine = connected();
        assert_eq!(machine.on_reconnect_due(), None);
        assert_eq!(machine.state(), SyncState::Connected);
    }

    #[test]
    fn test_close_before_start_is_ignored() {
        let mut machine = FeedMachine::new(DELAY);
        assert_eq!(machine.on_close(), None);
        assert_eq!(machine.state(), SyncState::Disconnected);
    }

    #[test]
    fn test_message_acceptance() {
        let mut machine = connected();
        assert_eq!(machine.on_message(ZERO).unwrap(), MessageOutcome::Degenerate);
        assert!(machine.pair().is_awaiting_first());

        let MessageOutcome::Accepted(pair) = machine.on_message(HUNDRED).unwrap() else {
            panic!("expected acceptance");
        };
        assert_eq!(pair.previous, StatsSnapshot::ZERO);
        assert_eq!(pair.current.total_emoji_count, 100);
    }

    #[test]
    fn test_malformed_message_changes_nothing() {
        let mut machine = connected();
        machine.on_message(HUNDRED).unwrap();
        let before = machine.pair();

        assert!(machine.on_message(b"{oops").is_err());
        assert!(machine.on_message(br#"{"total_emoji_count":1}"#).is_err());
        assert!(machine.on_message(b"[150,7,120,6]").is_err());
        assert_eq!(machine.pair(), before);
        assert_eq!(machine.state(), SyncState::Connected);
    }

    #[test]
    fn test_stop_is_terminal() {
        let mut machine = connected();
        machine.on_message(HUNDRED).unwrap();
        machine.stop();
        let before = machine.pair();

        assert_eq!(machine.state(), SyncState::Disconnected);
        assert_eq!(machine.on_message(ONE_FIFTY).unwrap(), MessageOutcome::Ignored);
        assert_eq!(machine.on_close(), None);
        assert_eq!(machine.on_reconnect_due(), None);
        assert_eq!(machine.start(endpoint()), None);
        machine.on_open();

        assert_eq!(machine.state(), SyncState::Disconnected);
        assert_eq!(machine.pair(), before);
    }

    #[test]
    fn test_stop_while_reconnect_pending() {
        let mut machine = connected();
        machine.on_close();
        machine.stop();
        assert_eq!(machine.on_reconnect_due(), None);
        assert_eq!(machine.state(), SyncState::Disconnected);
    }

    #[test]
    fn test_end_to_end_sequence() {
        let mut machine = connected();

        machine.on_message(ZERO).unwrap();
        assert!(machine.pair().is_awaiting_first());

        machine.on_message(HUNDRED).unwrap();
        let hundred = machine.pair().current;

        assert!(machine.on_close().is_some());
        assert!(machine.on_close().is_none());
        assert!(machine.on_reconnect_due().is_some());
        machine.on_open();

        machine.on_message(ONE_FIFTY).unwrap();
        let pair = machine.pair();
        assert_eq!(pair.previous, hundred);
        assert_eq!(pair.current.total_emoji_count, 150);
        assert_eq!(machine.connect_attempts(), 2);
    }

    #[test]
    fn test_state_display() {
        assert_eq!(SyncState::ReconnectPending.to_string(), "reconnect pending");
        assert_eq!(SyncState::default(), SyncState::Disconnected);
    }
}
