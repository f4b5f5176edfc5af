use std::time::{Duration, Instant};

use tracing::trace;

use super::PlaybackView;
use super::ticker::Ticker;

/// Receives the elapsed/total pair for a progress indicator.
pub trait DisplaySink {
    fn show_progress(&mut self, elapsed: Duration, total: Duration);
}

/// Pushes the estimated position to a display sink on a fixed cadence.
pub struct RefreshScheduler {
    ticker: Ticker,
}

impl RefreshScheduler {
    pub fn new(interval: Duration, start: Instant) -> Self {
        Self {
            ticker: Ticker::new(interval, start),
        }
    }

    /// Run one refresh if due. Returns whether it ran.
    pub fn tick(
        &mut self,
        now: Instant,
        view: &impl PlaybackView,
        sink: &mut impl DisplaySink,
    ) -> bool {
        if !self.ticker.poll(now) {
            return false;
        }
        let elapsed = view.estimate_position();
        let total = view.duration();
        trace!(?elapsed, ?total, "progress refresh");
        sink.show_progress(elapsed, total);
        true
    }

    pub fn until_due(&self, now: Instant) -> Option<Duration> {
        self.ticker.until_due(now)
    }

    pub fn cancel(&mut self) {
        self.ticker.cancel();
    }

    #[cfg(test)]
    pub fn is_cancelled(&self) -> bool {
        self.ticker.is_cancelled()
    }
}
