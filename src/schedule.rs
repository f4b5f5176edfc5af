//! Periodic tasks driven by the event loop.
//!
//! Both tasks read the player and push frames to a sink; neither mutates
//! playback. Timing is expressed as deadlines the event loop polls, so the
//! player never leaves the thread that owns the audio engine.

mod refresh;
mod ticker;
mod visualizer;

use std::time::Duration;

use crate::player::{AudioEngine, Clock, PlaybackState, Player};

pub use refresh::{DisplaySink, RefreshScheduler};
pub use visualizer::{RenderSink, Visualizer};

/// Read-only view of playback used by the periodic tasks.
pub trait PlaybackView {
    fn estimate_position(&self) -> Duration;
    fn duration(&self) -> Duration;
    fn state(&self) -> PlaybackState;
}

impl<E: AudioEngine, C: Clock> PlaybackView for Player<E, C> {
    fn estimate_position(&self) -> Duration {
        Player::estimate_position(self)
    }

    fn duration(&self) -> Duration {
        Player::duration(self)
    }

    fn state(&self) -> PlaybackState {
        Player::state(self)
    }
}

#[cfg(test)]
use ticker::Ticker;
