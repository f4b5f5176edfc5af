//! The audio engine seam.
//!
//! Everything here is a command. There is no way to ask the
//! engine for its position or whether it is still producing sound.

use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("no audio output device: {0}")]
    NoOutputDevice(String),

    #[error("failed to open {}: {source}", path.display())]
    Open { path: PathBuf, source: io::Error },

    #[error("failed to decode {}: {reason}", path.display())]
    Decode { path: PathBuf, reason: String },

    #[error("nothing to resume")]
    NothingToResume,
}

pub trait AudioEngine {
    /// Replace whatever is playing with `path`, starting `start` into it.
    fn load_and_play(&mut self, path: &Path, start: Duration) -> Result<(), EngineError>;

    /// Suspend output in place.
    fn pause(&mut self);

    /// Continue output from where `pause` left it.
    fn unpause(&mut self) -> Result<(), EngineError>;

    /// Halt and drop the current stream.
    fn stop(&mut self);

    /// `level` is already clamped to `[0, 1]`.
    fn set_volume(&mut self, level: f32);
}
