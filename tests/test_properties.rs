//! Property-based tests using proptest
//!
//! These tests verify invariants of the snapshot store, decoding and the
//! counter animation with arbitrary input generation.

use emoji_stats_feed::stats::SnapshotStore;
use emoji_stats_feed::tui::CounterAnimation;
use emoji_stats_feed::{Endpoint, StatsSnapshot};
use proptest::prelude::*;
use std::time::{Duration, Instant};

fn arb_snapshot() -> impl Strategy<Value = StatsSnapshot> {
    // Bias toward zeros so degenerate snapshots show up often
    let counter = prop_oneof![3 => Just(0u64), 1 => 0u64..1_000, 1 => any::<u64>()];
    (counter.clone(), counter.clone(), counter.clone(), counter).prop_map(
        |(emoji, packs, indexed_emoji, indexed_packs)| StatsSnapshot {
            total_emoji_count: emoji,
            total_emojipack_count: packs,
            indexed_emoji_count: indexed_emoji,
            indexed_emojipack_count: indexed_packs,
        },
    )
}

// =============================================================================
// 1. SnapshotStore::accept - filtering and pair shifting
// =============================================================================

proptest! {
    #[test]
    fn prop_store_tracks_last_two_non_degenerate(
        snapshots in prop::collection::vec(arb_snapshot(), 0..40)
    ) {
        let mut store = SnapshotStore::new();
        for snapshot in &snapshots {
            let accepted = store.accept(*snapshot);
            prop_assert_eq!(accepted, !snapshot.is_degenerate());
        }

        let accepted: Vec<_> = snapshots.iter().filter(|s| !s.is_degenerate()).collect();
        let pair = store.pair();

        let expected_current = accepted.last().map_or(StatsSnapshot::ZERO, |s| **s);
        let expected_previous = if accepted.len() >= 2 {
            *accepted[accepted.len() - 2]
        } else {
            StatsSnapshot::ZERO
        };

        prop_assert_eq!(pair.current, expected_current);
        prop_assert_eq!(pair.previous, expected_previous);
        prop_assert_eq!(store.accepted_count(), accepted.len() as u64);
        prop_assert_eq!(
            store.rejected_count(),
            (snapshots.len() - accepted.len()) as u64
        );
    }

    #[test]
    fn prop_current_never_degenerate_after_acceptance(
        snapshots in prop::collection::vec(arb_snapshot(), 1..40)
    ) {
        let mut store = SnapshotStore::new();
        for snapshot in snapshots {
            store.accept(snapshot);
            let pair = store.pair();
            prop_assert!(store.accepted_count() == 0 || !pair.current.is_degenerate());
        }
    }
}

// =============================================================================
// 2. StatsSnapshot::decode - robustness
// =============================================================================

proptest! {
    #[test]
    fn prop_decode_never_panics(bytes in prop::collection::vec(any::<u8>(), 0..256)) {
        let _ = StatsSnapshot::decode(&bytes);
    }

    #[test]
    fn prop_decode_ignores_extra_fields(
        snapshot in arb_snapshot(),
        extra in "[a-z]{1,8}",
        value in any::<i32>()
    ) {
        let mut object = serde_json::to_value(snapshot).unwrap();
        object[format!("x_{}", extra)] = serde_json::json!(value);
        let raw = serde_json::to_vec(&object).unwrap();

        prop_assert_eq!(StatsSnapshot::decode(&raw).unwrap(), snapshot);
    }

    #[test]
    fn prop_decode_rejects_negative_counters(value in i64::MIN..0) {
        let raw = format!(
            r#"{{"total_emoji_count":{},"total_emojipack_count":1,"indexed_emoji_count":1,"indexed_emojipack_count":1}}"#,
            value
        );
        prop_assert!(StatsSnapshot::decode(raw.as_bytes()).is_err());
    }

    #[test]
    fn prop_decode_rejects_positional_arrays(counters in prop::array::uniform4(any::<u64>())) {
        let raw = serde_json::to_vec(&counters).unwrap();
        prop_assert!(StatsSnapshot::decode(&raw).is_err());
    }
}

// =============================================================================
// 3. Endpoint parsing
// =============================================================================

proptest! {
    #[test]
    fn prop_endpoint_parse_never_panics(s in ".*") {
        let _ = s.parse::<Endpoint>();
    }

    #[test]
    fn prop_non_ws_schemes_rejected(scheme in "(http|https|ftp|tcp)", host in "[a-z]{1,12}") {
        let url = format!("{}://{}:3000", scheme, host);
        prop_assert!(url.parse::<Endpoint>().is_err());
    }

    #[test]
    fn prop_ws_hosts_accepted(secure in any::<bool>(), host in "[a-z]{1,12}", port in 1u16..) {
        let scheme = if secure { "wss" } else { "ws" };
        let url = format!("{}://{}:{}", scheme, host, port);
        let endpoint: Endpoint = url.parse().unwrap();
        prop_assert_eq!(endpoint.is_secure(), secure);
    }
}

// =============================================================================
// 4. CounterAnimation - bounded and convergent
// =============================================================================

proptest! {
    #[test]
    fn prop_animation_stays_between_endpoints(
        from in 0u64..10_000_000,
        to in 0u64..10_000_000,
        elapsed_ms in 0u64..1_000
    ) {
        let start = Instant::now();
        let anim = CounterAnimation::new(from, to, start, Duration::from_millis(500));
        let value = anim.value_at(start + Duration::from_millis(elapsed_ms));

        prop_assert!(value >= from.min(to));
        prop_assert!(value <= from.max(to));
        if elapsed_ms >= 500 {
            prop_assert_eq!(value, to);
        }
    }
}
