use std::path::Path;
use std::time::Duration;

use tracing::{debug, warn};

use crate::error::{PlayerError, Result};
use crate::media::{self, Track};

use super::clock::{Clock, SystemClock};
use super::engine::{AudioEngine, EngineError};
use super::position::{Origin, clamp_seconds, clamp_volume, estimate};
use super::types::{PlaybackState, Transport};

/// Owns the audio engine, the loaded track and the timing anchors.
///
/// Every operation runs to completion and leaves the transport, the seek
/// offset and the engine in agreement. The engine is never queried.
pub struct Player<E: AudioEngine, C: Clock = SystemClock> {
    engine: E,
    clock: C,
    track: Option<Track>,
    transport: Transport,
    /// Last known elapsed time; the restart point for every `play`.
    seek_offset: Duration,
    volume: f32,
}

impl<E: AudioEngine> Player<E, SystemClock> {
    pub fn new(engine: E, volume: f32) -> Self {
        Self::with_clock(engine, SystemClock, volume)
    }
}

impl<E: AudioEngine, C: Clock> Player<E, C> {
    pub fn with_clock(engine: E, clock: C, volume: f32) -> Self {
        Self {
            engine,
            clock,
            track: None,
            transport: Transport::Stopped,
            seek_offset: Duration::ZERO,
            volume: clamp_volume(volume),
        }
    }

    pub fn state(&self) -> PlaybackState {
        self.transport.state()
    }

    pub fn track(&self) -> Option<&Track> {
        self.track.as_ref()
    }

    /// Total duration of the loaded track, zero when nothing is loaded.
    pub fn duration(&self) -> Duration {
        self.track.as_ref().map_or(Duration::ZERO, |t| t.duration)
    }

    pub fn seek_offset(&self) -> Duration {
        self.seek_offset
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    /// Resolve `path` and load it. On failure the current track stays.
    pub fn open(&mut self, path: &Path) -> Result<&Track> {
        let track = media::resolve(path)?;
        Ok(self.load(track))
    }

    /// Replace the current track. Leaves the player stopped at offset zero.
    pub fn load(&mut self, track: Track) -> &Track {
        if self.transport != Transport::Stopped {
            self.engine.stop();
        }
        debug!(path = %track.path.display(), duration = ?track.duration, "track loaded");
        self.transport = Transport::Stopped;
        self.seek_offset = Duration::ZERO;
        self.track.insert(track)
    }

    /// Start the current track from the seek offset.
    ///
    /// Also used as the restart half of a seek: the engine can only start
    /// from an offset, never jump inside a live stream.
    pub fn play(&mut self) -> Result<()> {
        let Some(track) = self.track.as_ref() else {
            return Err(PlayerError::NoTrackLoaded);
        };

        if let Err(e) = self.engine.load_and_play(&track.path, self.seek_offset) {
            return Err(self.fail(e));
        }
        // The engine forgets volume across loads.
        self.engine.set_volume(self.volume);

        let now = self.clock.now();
        self.transport = Transport::Playing {
            origin: Origin::new(now, self.seek_offset),
        };
        debug!(offset = ?self.seek_offset, "playing");
        Ok(())
    }

    pub fn pause(&mut self) {
        let Transport::Playing { origin } = self.transport else {
            return;
        };

        self.engine.pause();
        let now = self.clock.now();
        self.seek_offset = origin.elapsed(now).min(self.duration());
        self.transport = Transport::Paused {
            origin,
            paused_at: now,
        };
        debug!(offset = ?self.seek_offset, "paused");
    }

    pub fn resume(&mut self) -> Result<()> {
        let Transport::Paused { origin, paused_at } = self.transport else {
            return Ok(());
        };

        if let Err(e) = self.engine.unpause() {
            return Err(self.fail(e));
        }

        // Push the origin forward by the pause so it never counts as playback.
        let now = self.clock.now();
        self.transport = Transport::Playing {
            origin: origin.shifted(now.saturating_duration_since(paused_at)),
        };
        debug!("resumed");
        Ok(())
    }

    pub fn stop(&mut self) {
        self.engine.stop();
        self.transport = Transport::Stopped;
        self.seek_offset = Duration::ZERO;
        debug!("stopped");
    }

    /// Move to `target_secs`, clamped into the track.
    ///
    /// While stopped this only stages the offset for the next `play`;
    /// otherwise playback restarts from the new offset.
    pub fn seek(&mut self, target_secs: f64) -> Result<()> {
        let Some(track) = self.track.as_ref() else {
            return Err(PlayerError::NoTrackLoaded);
        };

        self.seek_offset = clamp_seconds(target_secs, track.duration);
        debug!(target = target_secs, offset = ?self.seek_offset, "seek");

        match self.transport {
            Transport::Stopped => Ok(()),
            Transport::Playing { .. } | Transport::Paused { .. } => self.play(),
        }
    }

    pub fn set_volume(&mut self, level: f32) {
        self.volume = clamp_volume(level);
        self.engine.set_volume(self.volume);
    }

    pub fn estimate_position(&self) -> Duration {
        estimate(
            &self.transport,
            self.seek_offset,
            self.duration(),
            self.clock.now(),
        )
    }

    /// Playing, with the estimate already at the end of the track.
    pub fn reached_end(&self) -> bool {
        self.state() == PlaybackState::Playing
            && self.track.is_some()
            && self.estimate_position() >= self.duration()
    }

    fn fail(&mut self, err: EngineError) -> PlayerError {
        warn!(error = %err, "audio engine failure, falling back to stopped");
        self.engine.stop();
        self.transport = Transport::Stopped;
        self.seek_offset = Duration::ZERO;
        PlayerError::AudioEngineFailure(err.to_string())
    }
}
