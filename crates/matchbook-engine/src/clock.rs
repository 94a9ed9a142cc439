//! Monotonic millisecond clock for order timestamps.

/// Wall-clock milliseconds forced strictly monotonic.
///
/// An order's identity within its price level is `(timestamp, user, side)`,
/// so two orders accepted in the same millisecond must still receive
/// distinct timestamps. When the wall clock has not advanced past the last
/// issued value, the clock steps forward by one instead.
#[derive(Debug, Default)]
pub struct LogicalClock {
    last: i64,
}

impl LogicalClock {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue the next timestamp.
    pub fn next(&mut self) -> i64 {
        let now = chrono::Utc::now().timestamp_millis();
        self.last = if now > self.last { now } else { self.last + 1 };
        self.last
    }

    /// The most recently issued timestamp, `0` before the first call.
    #[must_use]
    pub fn last(&self) -> i64 {
        self.last
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamps_are_strictly_increasing() {
        let mut clock = LogicalClock::new();
        let mut previous = clock.next();
        for _ in 0..1000 {
            let next = clock.next();
            assert!(next > previous);
            previous = next;
        }
    }

    #[test]
    fn tracks_wall_clock() {
        let mut clock = LogicalClock::new();
        let ts = clock.next();
        let now = chrono::Utc::now().timestamp_millis();
        assert!(ts <= now + 1);
        assert!(ts > now - 60_000, "timestamp should be near current time");
    }
}
