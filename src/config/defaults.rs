//! Default values for configuration fields
//!
//! This module centralizes all default value functions used by the
//! `Default` impls and serde deserialization.

use crate::constants;
use crate::types::Endpoint;
use std::time::Duration;

/// Default streaming endpoint (`ws://localhost:3000`)
#[inline]
pub fn endpoint() -> Endpoint {
    Endpoint::default()
}

/// Default reconnect delay (1 second, fixed)
#[inline]
pub fn reconnect_delay() -> Duration {
    constants::reconnect::DELAY
}

/// Default bound on a single connection attempt (5 seconds)
#[inline]
pub fn connect_timeout() -> Duration {
    constants::reconnect::CONNECT_TIMEOUT
}

/// Default counter transition duration (500ms)
#[inline]
pub fn animation() -> Duration {
    constants::animation::DURATION
}
