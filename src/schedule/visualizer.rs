use std::ops::RangeInclusive;
use std::time::{Duration, Instant};

use rand::Rng;
use rand::rngs::ThreadRng;

use crate::config::RefreshSettings;
use crate::player::PlaybackState;

use super::ticker::Ticker;

/// Receives one frame of bar magnitudes. An empty slice clears the view.
pub trait RenderSink {
    fn show_bars(&mut self, bars: &[u64]);
}

/// Cosmetic bouncing bars: random magnitudes while playing, nothing otherwise.
pub struct Visualizer<R: Rng = ThreadRng> {
    ticker: Ticker,
    rng: R,
    bar_count: usize,
    range: RangeInclusive<u64>,
    frame: Vec<u64>,
}

impl Visualizer<ThreadRng> {
    pub fn new(settings: &RefreshSettings, start: Instant) -> Self {
        Self::with_rng(settings, start, rand::rng())
    }
}

impl<R: Rng> Visualizer<R> {
    pub fn with_rng(settings: &RefreshSettings, start: Instant, rng: R) -> Self {
        let (lo, hi) = if settings.bar_min <= settings.bar_max {
            (settings.bar_min, settings.bar_max)
        } else {
            (settings.bar_max, settings.bar_min)
        };
        Self {
            ticker: Ticker::new(
                Duration::from_millis(settings.visualizer_interval_ms),
                start,
            ),
            rng,
            bar_count: settings.bar_count,
            range: lo..=hi,
            frame: Vec::with_capacity(settings.bar_count),
        }
    }

    /// Emit one frame if due. Returns whether it ran.
    pub fn tick(
        &mut self,
        now: Instant,
        state: PlaybackState,
        sink: &mut impl RenderSink,
    ) -> bool {
        if !self.ticker.poll(now) {
            return false;
        }

        self.frame.clear();
        if state == PlaybackState::Playing {
            for _ in 0..self.bar_count {
                let v = self.rng.random_range(self.range.clone());
                self.frame.push(v);
            }
        }
        sink.show_bars(&self.frame);
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
