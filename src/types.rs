//! Core value types shared by configuration, the feed and the CLI
//!
//! These types enforce their invariants at construction time so the rest of
//! the crate never re-validates them.

pub mod duration;
pub mod endpoint;

pub use duration::{millis_serde, secs_serde};
pub use endpoint::{Endpoint, ValidationError};
