//! Error types for the stats feed
//!
//! None of these reach the presentation layer: decode and transport errors are
//! logged and absorbed by the feed task, and consumers only ever see
//! [`FeedError::Stopped`] once the feed has been torn down.

use std::time::Duration;
use thiserror::Error;
use tokio_tungstenite::tungstenite;

/// A payload that could not be decoded into a stats snapshot
///
/// Covers invalid JSON, non-object payloads, missing fields and counters that
/// are not non-negative integers.
#[derive(Debug, Error)]
#[error("malformed stats payload: {source}")]
pub struct DecodeError {
    #[from]
    source: serde_json::Error,
}

impl DecodeError {
    /// Whether the payload was valid JSON of the wrong shape (as opposed to not JSON at all)
    #[must_use]
    pub fn is_shape_error(&self) -> bool {
        self.source.is_data()
    }
}

/// Errors raised by the underlying streaming connection
///
/// Every variant is handled like a close: the socket is dropped and a single
/// reconnect is scheduled.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TransportError {
    /// WebSocket protocol or I/O failure
    #[error("websocket error: {0}")]
    WebSocket(#[from] tungstenite::Error),

    /// Connection attempt did not complete in time
    #[error("connection attempt timed out after {0:?}")]
    ConnectTimeout(Duration),

    /// Connection dropped for a reason reported by the transport itself
    #[error("connection lost: {reason}")]
    Disconnected { reason: String },
}

impl TransportError {
    /// Convenience constructor for transports that only have a textual reason
    pub fn disconnected(reason: impl Into<String>) -> Self {
        Self::Disconnected {
            reason: reason.into(),
        }
    }
}

/// Errors surfaced to consumers of the feed
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum FeedError {
    /// The feed task has been torn down and will never produce another snapshot
    #[error("stats feed has been stopped")]
    Stopped,

    /// No snapshot was accepted within the caller's deadline
    #[error("no stats snapshot accepted within {0:?}")]
    TimedOut(Duration),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_error_from_invalid_json() {
        let err: DecodeError = serde_json::from_str::<serde_json::Value>("{not json")
            .unwrap_err()
            .into();
        assert!(!err.is_shape_error());
        assert!(err.to_string().starts_with("malformed stats payload"));
    }

    #[test]
    fn test_decode_error_shape() {
        #[derive(Debug, serde::Deserialize)]
        #[allow(dead_code)]
        struct Needs {
            field: u64,
        }
        let err: DecodeError = serde_json::from_str::<Needs>("{}").unwrap_err().into();
        assert!(err.is_shape_error());
        assert!(err.to_string().contains("field"));
    }

    #[test]
    fn test_transport_error_display() {
        let err = TransportError::ConnectTimeout(Duration::from_secs(5));
        assert_eq!(err.to_string(), "connection attempt timed out after 5s");

        let err = TransportError::disconnected("peer reset");
        assert_eq!(err.to_string(), "connection lost: peer reset");
    }

    #[test]
    fn test_feed_error_display() {
        assert_eq!(FeedError::Stopped.to_string(), "stats feed has been stopped");
    }
}
