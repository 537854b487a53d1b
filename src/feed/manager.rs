//! Feed task and its handle
//!
//! One spawned task per feed instance owns the socket, the reconnect timer
//! and the [`FeedMachine`]. Control messages, socket frames, connection
//! attempts and the timer are multiplexed with `tokio::select!`, so the
//! machine is only ever touched by that task. Consumers observe it through
//! `watch` channels.

use super::state::{FeedAction, FeedMachine, MessageOutcome, SyncState};
use super::transport::{Connector, FeedSocket, Frame, WebSocketConnector};
use crate::config::FeedConfig;
use crate::constants;
use crate::consumer::StatsView;
use crate::error::{FeedError, TransportError};
use crate::stats::SnapshotPair;
use crate::types::Endpoint;
use futures::future::BoxFuture;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, info, warn};

/// Timing knobs for a feed instance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedOptions {
    /// Fixed wait between a drop and the next attempt
    pub reconnect_delay: Duration,
    /// Upper bound on a single connection attempt
    pub connect_timeout: Duration,
}

impl Default for FeedOptions {
    fn default() -> Self {
        Self {
            reconnect_delay: constants::reconnect::DELAY,
            connect_timeout: constants::reconnect::CONNECT_TIMEOUT,
        }
    }
}

impl From<&FeedConfig> for FeedOptions {
    fn from(config: &FeedConfig) -> Self {
        Self {
            reconnect_delay: config.reconnect_delay,
            connect_timeout: config.connect_timeout,
        }
    }
}

#[derive(Debug)]
enum Control {
    Start(Endpoint),
    Stop,
}

/// Handle to a running feed instance
///
/// Dropping the handle tears the feed down as well; call [`StatsFeed::stop`]
/// to also wait until the socket is released.
#[derive(Debug)]
pub struct StatsFeed {
    control: mpsc::Sender<Control>,
    pairs: watch::Receiver<SnapshotPair>,
    state: watch::Receiver<SyncState>,
    task: JoinHandle<()>,
}

impl StatsFeed {
    /// Spawn a feed task using the given transport
    ///
    /// The feed starts in `Disconnected`; nothing is opened until
    /// [`StatsFeed::start`]. Must be called from within a tokio runtime.
    pub fn spawn<C: Connector>(connector: C, options: FeedOptions) -> Self {
        let (control_tx, control_rx) =
            mpsc::channel(constants::feed::CONTROL_CHANNEL_CAPACITY);
        let (pairs_tx, pairs_rx) = watch::channel(SnapshotPair::default());
        let (state_tx, state_rx) = watch::channel(SyncState::Disconnected);

        let task = FeedTask {
            connector: Arc::new(connector),
            machine: FeedMachine::new(options.reconnect_delay),
            connect_timeout: options.connect_timeout,
            control: control_rx,
            pairs: pairs_tx,
            state: state_tx,
        };

        Self {
            control: control_tx,
            pairs: pairs_rx,
            state: state_rx,
            task: tokio::spawn(task.run()),
        }
    }

    /// Spawn a WebSocket-backed feed and start it
    pub fn connect(endpoint: Endpoint, options: FeedOptions) -> Self {
        let feed = Self::spawn(WebSocketConnector::new(), options);
        // A freshly spawned task cannot have a full or closed channel
        let _ = feed.start(endpoint);
        feed
    }

    /// Ask the feed to connect
    ///
    /// Non-blocking and idempotent: a no-op while a connection is open or
    /// being opened.
    ///
    /// # Errors
    /// Returns [`FeedError::Stopped`] if the feed task has already exited.
    pub fn start(&self, endpoint: Endpoint) -> Result<(), FeedError> {
        match self.control.try_send(Control::Start(endpoint)) {
            Ok(()) => Ok(()),
            Err(mpsc::error::TrySendError::Full(_)) => {
                debug!("Feed control queue full, start request dropped");
                Ok(())
            }
            Err(mpsc::error::TrySendError::Closed(_)) => Err(FeedError::Stopped),
        }
    }

    /// Tear the feed down and wait for the socket to be released
    ///
    /// After this returns no snapshot or state change is ever published again.
    pub async fn stop(self) {
        // Closed means the task already exited on its own
        let _ = self.control.send(Control::Stop).await;
        if let Err(e) = self.task.await {
            warn!("Stats feed task ended abnormally: {}", e);
        }
    }

    /// Push-style consumer view of the snapshot pair
    #[must_use]
    pub fn view(&self) -> StatsView {
        StatsView::new(self.pairs.clone())
    }

    /// Raw watch receiver for the snapshot pair
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SnapshotPair> {
        self.pairs.clone()
    }

    /// Copy of the latest accepted pair
    #[must_use]
    pub fn pair(&self) -> SnapshotPair {
        *self.pairs.borrow()
    }

    /// Connection state, for diagnostics
    #[must_use]
    pub fn state(&self) -> SyncState {
        *self.state.borrow()
    }

    /// Watch receiver for connection state, for diagnostics
    #[must_use]
    pub fn state_changes(&self) -> watch::Receiver<SyncState> {
        self.state.clone()
    }
}

type ConnectFuture<S> = BoxFuture<'static, Result<S, TransportError>>;

/// The single writer of a feed instance
struct FeedTask<C: Connector> {
    connector: Arc<C>,
    machine: FeedMachine,
    connect_timeout: Duration,
    control: mpsc::Receiver<Control>,
    pairs: watch::Sender<SnapshotPair>,
    state: watch::Sender<SyncState>,
}

/// In-flight resources owned by the task loop
struct Resources<S> {
    socket: Option<S>,
    connecting: Option<ConnectFuture<S>>,
    reconnect_at: Option<Instant>,
}

impl<C: Connector> FeedTask<C> {
    async fn run(mut self) {
        let mut res = Resources {
            socket: None,
            connecting: None,
            reconnect_at: None,
        };

        loop {
            tokio::select! {
                biased;

                control = self.control.recv() => match control {
                    Some(Control::Start(endpoint)) => {
                        let action = self.machine.start(endpoint);
                        self.apply(action, &mut res);
                    }
                    Some(Control::Stop) | None => break,
                },

                result = pending_connect(&mut res.connecting) => {
                    res.connecting = None;
                    match result {
                        Ok(socket) => {
                            res.socket = Some(socket);
                            self.machine.on_open();
                        }
                        Err(e) => {
                            let action = self.machine.on_error(&e);
                            self.apply(action, &mut res);
                        }
                    }
                }

                frame = next_frame(&mut res.socket) => self.handle_frame(frame, &mut res).await,

                () = reconnect_timer(res.reconnect_at) => {
                    res.reconnect_at = None;
                    let action = self.machine.on_reconnect_due();
                    self.apply(action, &mut res);
                }
            }

            self.publish_state();
        }

        self.machine.stop();
        res.connecting = None;
        res.reconnect_at = None;
        if let Some(socket) = res.socket.take() {
            close_socket(socket).await;
        }
        self.publish_state();
        info!("Stats feed stopped");
    }

    async fn handle_frame(
        &mut self,
        frame: Option<Result<Frame, TransportError>>,
        res: &mut Resources<C::Socket>,
    ) {
        let action = match frame {
            Some(Ok(frame)) => match frame.payload() {
                Some(payload) => {
                    // Decode failures are logged by the machine and otherwise ignored
                    if let Ok(MessageOutcome::Accepted(pair)) = self.machine.on_message(payload) {
                        self.pairs.send_replace(pair);
                    }
                    None
                }
                None => {
                    // Peer close: answer it so the handshake completes
                    if let Some(socket) = res.socket.take() {
                        close_socket(socket).await;
                    }
                    self.machine.on_close()
                }
            },
            Some(Err(e)) => {
                // Dropping the socket forces the transport closed
                res.socket = None;
                self.machine.on_error(&e)
            }
            None => {
                res.socket = None;
                self.machine.on_close()
            }
        };
        self.apply(action, res);
    }

    fn apply(&self, action: Option<FeedAction>, res: &mut Resources<C::Socket>) {
        match action {
            Some(FeedAction::Connect(endpoint)) => {
                res.reconnect_at = None;
                res.socket = None;
                let connector = Arc::clone(&self.connector);
                let timeout = self.connect_timeout;
                res.connecting = Some(Box::pin(async move {
                    tokio::time::timeout(timeout, connector.connect(&endpoint))
                        .await
                        .unwrap_or(Err(TransportError::ConnectTimeout(timeout)))
                }));
            }
            Some(FeedAction::ScheduleReconnect(delay)) => {
                res.reconnect_at = Some(Instant::now() + delay);
            }
            None => {}
        }
    }

    fn publish_state(&self) {
        let state = self.machine.state();
        self.state.send_if_modified(|current| {
            if *current == state {
                false
            } else {
                *current = state;
                true
            }
        });
    }
}

/// Finish the close handshake, giving up after a bounded wait
async fn close_socket<S: FeedSocket>(mut socket: S) {
    let limit = constants::feed::CLOSE_TIMEOUT;
    if tokio::time::timeout(limit, socket.close()).await.is_err() {
        debug!("Close handshake did not finish within {:?}", limit);
    }
}

async fn pending_connect<S>(connecting: &mut Option<ConnectFuture<S>>) -> Result<S, TransportError> {
    match connecting {
        Some(attempt) => attempt.await,
        None => std::future::pending().await,
    }
}

async fn next_frame<S: FeedSocket>(socket: &mut Option<S>) -> Option<Result<Frame, TransportError>> {
    match socket {
        Some(socket) => socket.recv().await,
        None => std::future::pending().await,
    }
}

async fn reconnect_timer(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}
