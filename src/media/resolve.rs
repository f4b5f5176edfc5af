use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Duration;

use lofty::prelude::*;
use rodio::{Decoder, Source};
use tracing::debug;

use crate::error::{PlayerError, Result};

use super::model::Track;

/// How the duration of a container is found.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Probe {
    /// Read the length from embedded stream metadata.
    Tagged,
    /// Decode the whole stream and count frames.
    Decoded,
}

/// Pick the probing strategy for `path` from its extension.
pub fn probe_for(path: &Path) -> Option<Probe> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "mp3" | "flac" | "ogg" => Some(Probe::Tagged),
        "wav" | "wave" => Some(Probe::Decoded),
        _ => None,
    }
}

/// Resolve `path` into a `Track`.
///
/// Pure query: nothing about playback changes here.
pub fn resolve(path: &Path) -> Result<Track> {
    let probe =
        probe_for(path).ok_or_else(|| PlayerError::unreadable(path, "unsupported container"))?;

    let track = match probe {
        Probe::Tagged => resolve_tagged(path)?,
        Probe::Decoded => Track::new(path, decoded_length(path)?),
    };

    debug!(path = %path.display(), duration = ?track.duration, ?probe, "resolved track");
    Ok(track)
}

fn resolve_tagged(path: &Path) -> Result<Track> {
    let tagged = lofty::read_from_path(path).map_err(|e| PlayerError::unreadable(path, e))?;
    let duration = tagged.properties().duration();

    let (title, artist) = match tagged.primary_tag().or_else(|| tagged.first_tag()) {
        Some(tag) => (
            tag.title().map(|v| v.to_string()),
            tag.artist().map(|v| v.to_string()),
        ),
        None => (None, None),
    };

    Ok(Track::new(path, duration).with_tags(title, artist))
}

fn decoded_length(path: &Path) -> Result<Duration> {
    let file = File::open(path).map_err(|e| PlayerError::unreadable(path, e))?;
    let decoder =
        Decoder::new(BufReader::new(file)).map_err(|e| PlayerError::unreadable(path, e))?;

    let channels = u64::from(decoder.channels());
    let rate = u64::from(decoder.sample_rate());
    if channels == 0 || rate == 0 {
        return Err(PlayerError::unreadable(path, "stream reports no channels or no sample rate"));
    }

    let samples = decoder.count() as u64;
    let frames = samples / channels;
    Ok(Duration::from_secs_f64(frames as f64 / rate as f64))
}
