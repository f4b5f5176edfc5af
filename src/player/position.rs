//! Position estimation.
//!
//! Pure functions over the transport and a caller-supplied `now`; nothing in
//! here owns state.

use std::time::{Duration, Instant};

use super::types::Transport;

/// The playback origin: the instant playback (re)started and the track
/// offset that instant corresponds to.
///
/// `elapsed(now)` is `offset + (now - at)`, i.e. `now - origin` where
/// `origin = at - offset`. Keeping the offset separate avoids subtracting
/// from an `Instant`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Origin {
    at: Instant,
    offset: Duration,
}

impl Origin {
    pub fn new(at: Instant, offset: Duration) -> Self {
        Self { at, offset }
    }

    pub fn elapsed(&self, now: Instant) -> Duration {
        self.offset + now.saturating_duration_since(self.at)
    }

    /// Move the origin forward, e.g. by the length of a pause.
    pub fn shifted(self, by: Duration) -> Self {
        Self {
            at: self.at + by,
            offset: self.offset,
        }
    }
}

/// Elapsed playback time at `now`.
///
/// Stopped and paused report the stored offset; playing reports the time
/// since the origin, capped at the track duration.
pub fn estimate(
    transport: &Transport,
    seek_offset: Duration,
    duration: Duration,
    now: Instant,
) -> Duration {
    match transport {
        Transport::Playing { origin } => origin.elapsed(now).min(duration),
        Transport::Stopped | Transport::Paused { .. } => seek_offset,
    }
}

/// Clamp a user-supplied seek target (seconds) into `[0, duration]`.
pub fn clamp_seconds(target: f64, duration: Duration) -> Duration {
    if target.is_nan() || target <= 0.0 {
        Duration::ZERO
    } else if target >= duration.as_secs_f64() {
        duration
    } else {
        Duration::from_secs_f64(target)
    }
}

pub fn clamp_volume(level: f32) -> f32 {
    if level.is_nan() {
        0.0
    } else {
        level.clamp(0.0, 1.0)
    }
}
