use super::position::Origin;
use std::time::Instant;

/// The playback state of the player.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PlaybackState {
    Stopped,
    Playing,
    Paused,
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self::Stopped
    }
}

/// Playback state together with the anchors that are only meaningful in it.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Transport {
    Stopped,
    Playing { origin: Origin },
    Paused { origin: Origin, paused_at: Instant },
}

impl Transport {
    pub fn state(&self) -> PlaybackState {
        match self {
            Self::Stopped => PlaybackState::Stopped,
            Self::Playing { .. } => PlaybackState::Playing,
            Self::Paused { .. } => PlaybackState::Paused,
        }
    }
}

impl Default for Transport {
    fn default() -> Self {
        Self::Stopped
    }
}
