//! A re-armable one-shot timer for cooperative step loops.

use std::time::Duration;

/// Shortest interval a [`StepTimer`] will wait. Keeps a host loop from
/// spinning on zero-length waits.
pub const MIN_INTERVAL: Duration = Duration::from_millis(1);

/// Counts down one interval; the owner re-arms it after every firing.
///
/// The interval is captured when armed: changing the desired interval only
/// takes effect at the next [`rearm`](Self::rearm), never for the wait
/// already in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepTimer {
    armed: Duration,
    remaining: Duration,
}

impl StepTimer {
    /// Create a timer already armed with `interval`.
    pub fn new(interval: Duration) -> Self {
        let armed = interval.max(MIN_INTERVAL);
        Self {
            armed,
            remaining: armed,
        }
    }

    /// Start a fresh wait of `interval`.
    pub fn rearm(&mut self, interval: Duration) {
        *self = Self::new(interval);
    }

    /// Length of the wait in flight.
    pub fn armed(&self) -> Duration {
        self.armed
    }

    /// Time left before the timer fires.
    pub fn remaining(&self) -> Duration {
        self.remaining
    }

    /// Let `dt` pass. When the wait completes, returns the part of `dt`
    /// left over after the firing; the timer then stays at zero until
    /// re-armed.
    pub fn advance(&mut self, dt: Duration) -> Option<Duration> {
        if self.remaining.is_zero() {
            return Some(dt);
        }
        if dt >= self.remaining {
            let left = dt - self.remaining;
            self.remaining = Duration::ZERO;
            Some(left)
        } else {
            self.remaining -= dt;
            None
        }
    }
}
