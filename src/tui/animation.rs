//! Counter transitions from the previous snapshot to the current one

use crate::stats::{Counter, SnapshotPair};
use std::time::{Duration, Instant};

/// Cubic ease-out: fast start, settles gently on the target
#[inline]
fn ease_out(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(3)
}

/// One animated counter value
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CounterAnimation {
    from: u64,
    to: u64,
    started: Instant,
    duration: Duration,
}

impl CounterAnimation {
    /// Animation that has already settled on `value`
    #[must_use]
    pub fn settled(value: u64, now: Instant) -> Self {
        Self {
            from: value,
            to: value,
            started: now,
            duration: Duration::ZERO,
        }
    }

    /// Transition from `from` to `to` starting at `now`
    #[must_use]
    pub fn new(from: u64, to: u64, now: Instant, duration: Duration) -> Self {
        Self {
            from,
            to,
            started: now,
            duration,
        }
    }

    /// Target value
    #[must_use]
    pub const fn target(&self) -> u64 {
        self.to
    }

    /// A zero target means nothing has been received yet
    #[must_use]
    pub const fn is_placeholder(&self) -> bool {
        self.to == 0
    }

    /// Whether the transition has reached its target
    #[must_use]
    pub fn is_finished(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.started) >= self.duration
    }

    /// Displayed value at `now`, rounded to a whole number
    #[must_use]
    pub fn value_at(&self, now: Instant) -> u64 {
        if self.duration.is_zero() || self.is_finished(now) {
            return self.to;
        }

        let elapsed = now.saturating_duration_since(self.started);
        let progress = ease_out(elapsed.as_secs_f64() / self.duration.as_secs_f64());
        let from = self.from as f64;
        let to = self.to as f64;
        (from + (to - from) * progress).round() as u64
    }
}

/// The four dashboard counters, in display order
#[derive(Debug, Clone)]
pub struct CounterSet {
    counters: [CounterAnimation; 4],
    duration: Duration,
}

impl CounterSet {
    /// All counters settled at zero (placeholder)
    #[must_use]
    pub fn new(duration: Duration, now: Instant) -> Self {
        Self {
            counters: [CounterAnimation::settled(0, now); 4],
            duration,
        }
    }

    /// Restart every counter for a newly accepted pair
    pub fn retarget(&mut self, pair: &SnapshotPair, now: Instant) {
        for (slot, counter) in self.counters.iter_mut().zip(Counter::ALL) {
            *slot = CounterAnimation::new(
                pair.previous.get(counter),
                pair.current.get(counter),
                now,
                self.duration,
            );
        }
    }

    /// Animation for one counter
    #[must_use]
    pub fn get(&self, counter: Counter) -> &CounterAnimation {
        let index = Counter::ALL
            .iter()
            .position(|c| *c == counter)
            .unwrap_or_default();
        &self.counters[index]
    }

    /// Whether any counter is still moving
    #[must_use]
    pub fn is_animating(&self, now: Instant) -> bool {
        self.counters.iter().any(|c| !c.is_finished(now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::StatsSnapshot;

    const HALF_SECOND: Duration = Duration::from_millis(500);

    #[test]
    fn test_ease_out_endpoints() {
        assert_eq!(ease_out(0.0), 0.0);
        assert_eq!(ease_out(1.0), 1.0);
        assert_eq!(ease_out(2.0), 1.0);
        assert_eq!(ease_out(-1.0), 0.0);
        // Ease-out is ahead of linear at the midpoint
        assert!(ease_out(0.5) > 0.5);
    }

    #[test]
    fn test_value_at_start_and_end() {
        let now = Instant::now();
        let anim = CounterAnimation::new(100, 150, now, HALF_SECOND);
        assert_eq!(anim.value_at(now), 100);
        assert_eq!(anim.value_at(now + HALF_SECOND), 150);
        assert_eq!(anim.value_at(now + Duration::from_secs(10)), 150);
        assert!(anim.is_finished(now + HALF_SECOND));
        assert!(!anim.is_finished(now));
    }

    #[test]
    fn test_value_is_monotonic_while_rising() {
        let now = Instant::now();
        let anim = CounterAnimation::new(0, 1_000, now, HALF_SECOND);
        let mut last = 0;
        for ms in (0..=500).step_by(25) {
            let value = anim.value_at(now + Duration::from_millis(ms));
            assert!(value >= last);
            last = value;
        }
        assert_eq!(last, 1_000);
    }

    #[test]
    fn test_value_falls_when_target_lower() {
        let now = Instant::now();
        let anim = CounterAnimation::new(200, 100, now, HALF_SECOND);
        let mid = anim.value_at(now + Duration::from_millis(250));
        assert!(mid < 200 && mid > 100);
        assert_eq!(anim.value_at(now + HALF_SECOND), 100);
    }

    #[test]
    fn test_midpoint_rounds_to_whole_number() {
        let now = Instant::now();
        let anim = CounterAnimation::new(0, 8, now, HALF_SECOND);
        // 1 - 0.5^3 = 0.875 -> 7.0
        assert_eq!(anim.value_at(now + Duration::from_millis(250)), 7);
    }

    #[test]
    fn test_zero_duration_jumps() {
        let now = Instant::now();
        let anim = CounterAnimation::new(5, 500, now, Duration::ZERO);
        assert_eq!(anim.value_at(now), 500);
    }

    #[test]
    fn test_zero_target_is_placeholder() {
        let now = Instant::now();
        assert!(CounterAnimation::settled(0, now).is_placeholder());
        assert!(!CounterAnimation::new(0, 1, now, HALF_SECOND).is_placeholder());
    }

    #[test]
    fn test_counter_set_retarget() {
        let now = Instant::now();
        let mut set = CounterSet::new(HALF_SECOND, now);
        assert!(set.get(Counter::TotalEmoji).is_placeholder());
        assert!(!set.is_animating(now));

        let pair = SnapshotPair {
            previous: StatsSnapshot {
                total_emoji_count: 100,
                total_emojipack_count: 10,
                indexed_emoji_count: 80,
                indexed_emojipack_count: 8,
            },
            current: StatsSnapshot {
                total_emoji_count: 150,
                total_emojipack_count: 12,
                indexed_emoji_count: 90,
                indexed_emojipack_count: 9,
            },
        };
        set.retarget(&pair, now);

        assert!(set.is_animating(now));
        assert_eq!(set.get(Counter::TotalEmoji).value_at(now), 100);
        assert_eq!(set.get(Counter::TotalEmoji).target(), 150);
        assert_eq!(set.get(Counter::TotalEmojipacks).target(), 12);
        assert_eq!(set.get(Counter::IndexedEmoji).target(), 90);
        assert_eq!(set.get(Counter::IndexedEmojipacks).target(), 9);
        assert!(!set.is_animating(now + HALF_SECOND));
    }
}
