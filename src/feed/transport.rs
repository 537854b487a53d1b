//! Transport abstraction for the stats feed
//!
//! The feed task only talks to a [`Connector`] and the [`FeedSocket`] it
//! returns, so tests can drive it with an in-memory transport and the
//! production build uses [`WebSocketConnector`].

use crate::error::TransportError;
use crate::types::Endpoint;
use async_trait::async_trait;
use futures::StreamExt;
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::{self, Message};
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};
use tracing::{debug, trace};

/// An application-level frame delivered by the socket
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frame {
    /// UTF-8 text payload
    Text(String),
    /// Binary payload, decoded the same way as text
    Binary(Vec<u8>),
    /// Peer initiated close
    Close,
}

impl Frame {
    /// Raw payload bytes, if this frame carries data
    #[must_use]
    pub fn payload(&self) -> Option<&[u8]> {
        match self {
            Self::Text(text) => Some(text.as_bytes()),
            Self::Binary(data) => Some(data),
            Self::Close => None,
        }
    }
}

/// An open streaming connection
#[async_trait]
pub trait FeedSocket: Send {
    /// Receive the next frame
    ///
    /// `None` means the stream ended. Must be cancel-safe: the feed task
    /// races it against control messages.
    async fn recv(&mut self) -> Option<Result<Frame, TransportError>>;

    /// Close the connection gracefully (best-effort)
    async fn close(&mut self);
}

/// Factory for [`FeedSocket`]s
#[async_trait]
pub trait Connector: Send + Sync + 'static {
    type Socket: FeedSocket + 'static;

    /// Open a connection to the endpoint
    async fn connect(&self, endpoint: &Endpoint) -> Result<Self::Socket, TransportError>;
}

/// Production connector backed by tokio-tungstenite
#[derive(Debug, Clone, Copy, Default)]
pub struct WebSocketConnector;

impl WebSocketConnector {
    /// Create a connector, installing the TLS crypto provider for `wss://`
    #[must_use]
    pub fn new() -> Self {
        // Already installed by someone else is fine
        let _ = rustls::crypto::ring::default_provider().install_default();
        Self
    }
}

#[async_trait]
impl Connector for WebSocketConnector {
    type Socket = WebSocketFeedSocket;

    async fn connect(&self, endpoint: &Endpoint) -> Result<Self::Socket, TransportError> {
        debug!("Opening websocket to {}", endpoint);
        let (stream, response) = tokio_tungstenite::connect_async(endpoint.as_str()).await?;
        debug!("Websocket handshake complete ({})", response.status());
        Ok(WebSocketFeedSocket { stream })
    }
}

/// A live tokio-tungstenite connection
pub struct WebSocketFeedSocket {
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

#[async_trait]
impl FeedSocket for WebSocketFeedSocket {
    async fn recv(&mut self) -> Option<Result<Frame, TransportError>> {
        loop {
            let message = match self.stream.next().await? {
                Ok(message) => message,
                Err(tungstenite::Error::ConnectionClosed | tungstenite::Error::AlreadyClosed) => {
                    return None;
                }
                Err(e) => return Some(Err(e.into())),
            };

            match message {
                Message::Text(text) => return Some(Ok(Frame::Text(text.as_str().to_owned()))),
                Message::Binary(data) => return Some(Ok(Frame::Binary(data.to_vec()))),
                Message::Close(frame) => {
                    debug!("Server closed stats websocket: {:?}", frame);
                    return Some(Ok(Frame::Close));
                }
                // Pongs are queued by tungstenite and flushed on the next read
                Message::Ping(_) | Message::Pong(_) | Message::Frame(_) => {
                    trace!("Skipping control frame");
                }
            }
        }
    }

    async fn close(&mut self) {
        if let Err(e) = self.stream.close(None).await {
            debug!("Websocket close handshake failed: {}", e);
        }
    }
}
