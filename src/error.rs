//! Errors surfaced by the playback core.
//!
//! None of these are fatal: the runtime logs them, shows them in the status
//! line and keeps going.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlayerError {
    /// Play or seek was requested with nothing loaded.
    #[error("no track loaded")]
    NoTrackLoaded,

    /// The metadata resolver could not determine the track duration.
    #[error("unreadable media {}: {reason}", path.display())]
    UnreadableMedia { path: PathBuf, reason: String },

    /// The audio backend rejected a start or resume.
    #[error("audio engine failure: {0}")]
    AudioEngineFailure(String),
}

impl PlayerError {
    pub(crate) fn unreadable(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::UnreadableMedia {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PlayerError>;
