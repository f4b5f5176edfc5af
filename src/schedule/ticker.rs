use std::time::{Duration, Instant};

/// A fixed-interval deadline.
///
/// `poll` fires at most once per call. When the caller falls behind, the
/// missed ticks are dropped and the next deadline is measured from `now`.
#[derive(Debug, Clone)]
pub struct Ticker {
    interval: Duration,
    next_due: Instant,
    cancelled: bool,
}

impl Ticker {
    /// The first tick is due at `start`.
    pub fn new(interval: Duration, start: Instant) -> Self {
        Self {
            interval: interval.max(Duration::from_millis(1)),
            next_due: start,
            cancelled: false,
        }
    }

    #[cfg(test)]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn poll(&mut self, now: Instant) -> bool {
        if self.cancelled || now < self.next_due {
            return false;
        }
        self.next_due += self.interval;
        if self.next_due <= now {
            self.next_due = now + self.interval;
        }
        true
    }

    /// Time left until the next tick, `None` once cancelled.
    pub fn until_due(&self, now: Instant) -> Option<Duration> {
        if self.cancelled {
            None
        } else {
            Some(self.next_due.saturating_duration_since(now))
        }
    }

    /// Idempotent.
    pub fn cancel(&mut self) {
        self.cancelled = true;
    }

    #[cfg(test)]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }
}
