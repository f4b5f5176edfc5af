//! Application model: what the terminal view shows.
//!
//! `App` is the display sink of the refresh scheduler and the rendering sink
//! of the visualizer. It mirrors the player after every operation but never
//! drives it.

use std::path::PathBuf;
use std::time::Duration;

use crate::player::{AudioEngine, Clock, PlaybackState, Player};
use crate::schedule::{DisplaySink, RenderSink};

pub struct App {
    /// Paths collected from the command line, in play order.
    pub candidates: Vec<PathBuf>,
    /// Index of the candidate currently loaded, if any.
    pub cursor: Option<usize>,
    pub now_playing: Option<String>,
    pub elapsed: Duration,
    pub total: Duration,
    pub bars: Vec<u64>,
    pub playback: PlaybackState,
    pub volume: f32,
    pub status: Option<String>,
}

impl App {
    pub fn new(candidates: Vec<PathBuf>) -> Self {
        Self {
            candidates,
            cursor: None,
            now_playing: None,
            elapsed: Duration::ZERO,
            total: Duration::ZERO,
            bars: Vec::new(),
            playback: PlaybackState::Stopped,
            volume: 0.0,
            status: None,
        }
    }

    pub fn has_candidates(&self) -> bool {
        !self.candidates.is_empty()
    }

    /// The candidate after the cursor, wrapping to the first one.
    pub fn next_candidate_index(&self) -> Option<usize> {
        if self.candidates.is_empty() {
            return None;
        }
        Some(match self.cursor {
            Some(i) => (i + 1) % self.candidates.len(),
            None => 0,
        })
    }

    /// Copy the player's state, track name and volume.
    ///
    /// Progress is left alone; the refresh scheduler owns it, except on
    /// `Stopped` where the position is known to be zero.
    pub fn sync_from<E: AudioEngine, C: Clock>(&mut self, player: &Player<E, C>) {
        self.playback = player.state();
        self.volume = player.volume();
        self.now_playing = player.track().map(|t| t.display.clone());
        self.total = player.duration();
        if self.playback == PlaybackState::Stopped {
            self.elapsed = Duration::ZERO;
        }
        if self.playback != PlaybackState::Playing {
            self.bars.clear();
        }
    }

    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status = Some(msg.into());
    }

    pub fn clear_status(&mut self) {
        self.status = None;
    }

    /// Fraction of the track already played, in `[0, 1]`.
    pub fn progress_ratio(&self) -> f64 {
        if self.total.is_zero() {
            return 0.0;
        }
        (self.elapsed.as_secs_f64() / self.total.as_secs_f64()).clamp(0.0, 1.0)
    }
}

impl DisplaySink for App {
    fn show_progress(&mut self, elapsed: Duration, total: Duration) {
        self.elapsed = elapsed;
        self.total = total;
    }
}

impl RenderSink for App {
    fn show_bars(&mut self, bars: &[u64]) {
        self.bars.clear();
        self.bars.extend_from_slice(bars);
    }
}
