//! Benchmarks for the per-message hot path: decode then accept

use divan::{Bencher, black_box};
use emoji_stats_feed::StatsSnapshot;
use emoji_stats_feed::stats::SnapshotStore;
use emoji_stats_feed::feed::FeedMachine;
use std::time::Duration;

fn main() {
    divan::main();
}

const SNAPSHOT: &[u8] = br#"{"total_emoji_count":1234567,"total_emojipack_count":4321,"indexed_emoji_count":617283,"indexed_emojipack_count":2000}"#;
const DEGENERATE: &[u8] = br#"{"total_emoji_count":0,"total_emojipack_count":0,"indexed_emoji_count":0,"indexed_emojipack_count":0}"#;
const MALFORMED: &[u8] = br#"{"total_emoji_count":"many"}"#;

mod decode {
    use super::*;

    #[divan::bench]
    fn valid() -> Option<StatsSnapshot> {
        StatsSnapshot::decode(black_box(SNAPSHOT)).ok()
    }

    #[divan::bench]
    fn degenerate() -> Option<StatsSnapshot> {
        StatsSnapshot::decode(black_box(DEGENERATE)).ok()
    }

    #[divan::bench]
    fn malformed() -> bool {
        StatsSnapshot::decode(black_box(MALFORMED)).is_err()
    }
}

mod accept {
    use super::*;

    #[divan::bench(args = [10, 100, 1000])]
    fn alternating(bencher: Bencher, n: u64) {
        let snapshots: Vec<StatsSnapshot> = (0..n)
            .map(|i| StatsSnapshot {
                total_emoji_count: if i % 2 == 0 { i + 1 } else { 0 },
                ..StatsSnapshot::ZERO
            })
            .collect();

        bencher.bench_local(|| {
            let mut store = SnapshotStore::new();
            for snapshot in &snapshots {
                store.accept(black_box(*snapshot));
            }
            store.pair()
        });
    }
}

mod machine {
    use super::*;

    #[divan::bench]
    fn on_message(bencher: Bencher) {
        let mut machine = FeedMachine::new(Duration::from_secs(1));
        let _ = machine.start(emoji_stats_feed::Endpoint::default());
        machine.on_open();

        bencher.bench_local(|| machine.on_message(black_box(SNAPSHOT)).is_ok());
    }
}
