use tracing::{info, warn};

use crate::app::App;
use crate::config;
use crate::error::{PlayerError, Result};
use crate::player::{AudioEngine, Clock, Player};

/// Load the candidate after the cursor, skipping unreadable ones.
///
/// Tries every candidate at most once. On success the cursor points at the
/// loaded file; on failure it is left where it was and the last resolver
/// error is returned.
pub fn open_next<E: AudioEngine, C: Clock>(player: &mut Player<E, C>, app: &mut App) -> Result<()> {
    let Some(start) = app.next_candidate_index() else {
        return Err(PlayerError::NoTrackLoaded);
    };

    let len = app.candidates.len();
    let mut last_err = PlayerError::NoTrackLoaded;
    for step in 0..len {
        let idx = (start + step) % len;
        match player.open(&app.candidates[idx]) {
            Ok(track) => {
                info!(path = %track.path.display(), duration = ?track.duration, "opened");
                app.cursor = Some(idx);
                return Ok(());
            }
            Err(e) => {
                warn!(error = %e, "skipping candidate");
                last_err = e;
            }
        }
    }
    Err(last_err)
}

/// Load the first readable candidate and start it when autoplay is on.
pub fn load_first_candidate<E: AudioEngine, C: Clock>(
    player: &mut Player<E, C>,
    app: &mut App,
    settings: &config::Settings,
) {
    if !app.has_candidates() {
        app.set_status("no audio files given");
    } else {
        let started = open_next(player, app).and_then(|()| {
            if settings.playback.autoplay {
                player.play()
            } else {
                Ok(())
            }
        });
        if let Err(e) = started {
            warn!(error = %e, "startup");
            app.set_status(e.to_string());
        }
    }
    app.sync_from(player);
}
