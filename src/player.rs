//! The playback core: a state machine that keeps its own clock.
//!
//! The audio backend only takes fire-and-forget commands and is never asked
//! where it is. Elapsed time comes from timing anchors kept next to the
//! playback state (see `position`).

mod backend_rodio;
mod clock;
mod engine;
mod machine;
mod position;
mod types;

pub use backend_rodio::RodioEngine;
pub use clock::Clock;
pub use engine::AudioEngine;
pub use machine::Player;
pub use types::PlaybackState;

#[cfg(test)]
pub(crate) use clock::ManualClock;
#[cfg(test)]
pub(crate) use engine::EngineError;
#[cfg(test)]
use position::{Origin, clamp_seconds, clamp_volume, estimate};
#[cfg(test)]
use types::Transport;
