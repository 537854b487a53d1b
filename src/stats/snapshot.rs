//! Stats snapshot type and decoding
//!
//! A snapshot is one consistent set of the four counters pushed by the
//! backend. It is an immutable `Copy` value; the store keeps two of them.

use crate::error::DecodeError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One set of emoji index counters at a point in time
///
/// Wire format is a JSON object with exactly these four integer fields.
/// Unknown fields are ignored; a missing field is a decode error.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StatsSnapshot {
    pub total_emoji_count: u64,
    pub total_emojipack_count: u64,
    pub indexed_emoji_count: u64,
    pub indexed_emojipack_count: u64,
}

/// Which of the four counters a value belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Counter {
    TotalEmoji,
    TotalEmojipacks,
    IndexedEmoji,
    IndexedEmojipacks,
}

impl Counter {
    /// All counters in display order
    pub const ALL: [Self; 4] = [
        Self::TotalEmojipacks,
        Self::TotalEmoji,
        Self::IndexedEmoji,
        Self::IndexedEmojipacks,
    ];

    /// Human-readable label
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::TotalEmoji => "emoji",
            Self::TotalEmojipacks => "emoji packs",
            Self::IndexedEmoji => "indexed emoji",
            Self::IndexedEmojipacks => "indexed packs",
        }
    }
}

impl StatsSnapshot {
    /// The all-zero snapshot: initial state and backend placeholder
    pub const ZERO: Self = Self {
        total_emoji_count: 0,
        total_emojipack_count: 0,
        indexed_emoji_count: 0,
        indexed_emojipack_count: 0,
    };

    /// Decode a raw message payload
    ///
    /// # Errors
    /// Returns [`DecodeError`] for invalid JSON, a payload that is not an
    /// object, a missing field, or a counter that is not a non-negative integer.
    pub fn decode(raw: &[u8]) -> Result<Self, DecodeError> {
        // The derived impl also accepts positional arrays; only objects are snapshots
        let fields: Map<String, Value> = serde_json::from_slice(raw)?;
        Ok(serde_json::from_value(Value::Object(fields))?)
    }

    /// Whether every counter is zero
    ///
    /// Degenerate snapshots are the backend's warm-up/error placeholder, not a
    /// real zero count, and are never adopted by the store.
    #[must_use]
    #[inline]
    pub const fn is_degenerate(&self) -> bool {
        self.total_emoji_count == 0
            && self.total_emojipack_count == 0
            && self.indexed_emoji_count == 0
            && self.indexed_emojipack_count == 0
    }

    /// Read a single counter
    #[must_use]
    #[inline]
    pub const fn get(&self, counter: Counter) -> u64 {
        match counter {
            Counter::TotalEmoji => self.total_emoji_count,
            Counter::TotalEmojipacks => self.total_emojipack_count,
            Counter::IndexedEmoji => self.indexed_emoji_count,
            Counter::IndexedEmojipacks => self.indexed_emojipack_count,
        }
    }

    /// Share of emoji already indexed, in percent
    ///
    /// Returns 0.0 when the total is zero (avoid division by zero).
    #[must_use]
    pub fn indexed_emoji_percent(&self) -> f64 {
        if self.total_emoji_count == 0 {
            0.0
        } else {
            self.indexed_emoji_count as f64 * 100.0 / self.total_emoji_count as f64
        }
    }
}
