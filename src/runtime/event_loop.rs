use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::{debug, warn};

use crate::app::App;
use crate::config;
use crate::error::{PlayerError, Result};
use crate::player::{AudioEngine, Clock, PlaybackState, Player};
use crate::runtime::startup::open_next;
use crate::schedule::{RefreshScheduler, Visualizer};
use crate::ui;

/// Upper bound on how long the loop blocks waiting for input.
const MAX_WAIT: Duration = Duration::from_millis(50);

/// User intents the key map produces.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Action {
    Play,
    TogglePause,
    Stop,
    ScrubBack,
    ScrubForward,
    /// Seek to `n` tenths of the track.
    JumpTenth(u32),
    Next,
    VolumeUp,
    VolumeDown,
    Quit,
}

pub fn action_for(key: KeyEvent) -> Option<Action> {
    let action = match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Action::Quit,
        KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
        KeyCode::Enter | KeyCode::Char('p') => Action::Play,
        KeyCode::Char(' ') => Action::TogglePause,
        KeyCode::Char('s') => Action::Stop,
        KeyCode::Char('H') | KeyCode::Left => Action::ScrubBack,
        KeyCode::Char('L') | KeyCode::Right => Action::ScrubForward,
        KeyCode::Char('n') => Action::Next,
        KeyCode::Char('+') | KeyCode::Char('=') | KeyCode::Up => Action::VolumeUp,
        KeyCode::Char('-') | KeyCode::Down => Action::VolumeDown,
        KeyCode::Char(c) => Action::JumpTenth(c.to_digit(10)?),
        _ => return None,
    };
    Some(action)
}

/// Both periodic tasks, owned by the loop.
pub struct EventLoopState {
    pub refresh: RefreshScheduler,
    pub visualizer: Visualizer,
}

impl EventLoopState {
    pub fn new(settings: &config::Settings, start: Instant) -> Self {
        Self {
            refresh: RefreshScheduler::new(
                Duration::from_millis(settings.refresh.progress_interval_ms),
                start,
            ),
            visualizer: Visualizer::new(&settings.refresh, start),
        }
    }

    /// How long to wait for input before the next tick is due.
    pub fn next_wait(&self, now: Instant) -> Duration {
        [self.refresh.until_due(now), self.visualizer.until_due(now)]
            .into_iter()
            .flatten()
            .fold(MAX_WAIT, Duration::min)
    }

    pub fn shutdown(&mut self) {
        self.refresh.cancel();
        self.visualizer.cancel();
    }
}

/// Main terminal event loop: fires due ticks, enforces the end of the
/// track, draws and handles input. Returns `Ok(())` when quit is requested.
pub fn run<E: AudioEngine, C: Clock>(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    player: &mut Player<E, C>,
    app: &mut App,
    state: &mut EventLoopState,
) -> std::result::Result<(), Box<dyn std::error::Error>> {
    let outcome = drive(terminal, settings, player, app, state);

    state.shutdown();
    player.stop();
    outcome
}

fn drive<E: AudioEngine, C: Clock>(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    player: &mut Player<E, C>,
    app: &mut App,
    state: &mut EventLoopState,
) -> std::result::Result<(), Box<dyn std::error::Error>> {
    loop {
        let now = Instant::now();
        state.refresh.tick(now, &*player, app);
        state.visualizer.tick(now, player.state(), app);

        enforce_end(settings, player, app);

        terminal.draw(|f| ui::draw(f, app, &settings.refresh, &settings.controls))?;

        if event::poll(state.next_wait(Instant::now()))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if let Some(action) = action_for(key) {
                    if handle_action(action, settings, player, app) {
                        return Ok(());
                    }
                }
            }
        }
    }
}

/// Stop playback once the estimate has run past the end of the track.
///
/// Returns whether it stopped. With `playback.stop_at_end` off the player
/// keeps reporting the full duration until the user acts.
pub fn enforce_end<E: AudioEngine, C: Clock>(
    settings: &config::Settings,
    player: &mut Player<E, C>,
    app: &mut App,
) -> bool {
    if !settings.playback.stop_at_end || !player.reached_end() {
        return false;
    }
    debug!("end of track");
    player.stop();
    app.sync_from(player);
    true
}

/// Apply one action to the player and mirror the result into `app`.
///
/// Returns `true` when the loop should exit. Core errors never end the
/// loop; they are logged and shown in the status line.
pub fn handle_action<E: AudioEngine, C: Clock>(
    action: Action,
    settings: &config::Settings,
    player: &mut Player<E, C>,
    app: &mut App,
) -> bool {
    if action == Action::Quit {
        return true;
    }

    match apply(action, settings, player, app) {
        Ok(()) => app.clear_status(),
        Err(e) => {
            warn!(?action, error = %e, "action failed");
            app.set_status(e.to_string());
        }
    }
    app.sync_from(player);
    // A restart changes the position at once; do not wait for the next tick.
    app.elapsed = player.estimate_position();
    false
}

fn apply<E: AudioEngine, C: Clock>(
    action: Action,
    settings: &config::Settings,
    player: &mut Player<E, C>,
    app: &mut App,
) -> Result<()> {
    match action {
        Action::Play => player.play(),
        Action::TogglePause => match player.state() {
            PlaybackState::Playing => {
                player.pause();
                Ok(())
            }
            PlaybackState::Paused => player.resume(),
            PlaybackState::Stopped => player.play(),
        },
        Action::Stop => {
            player.stop();
            Ok(())
        }
        Action::ScrubBack | Action::ScrubForward => {
            let step = settings.controls.scrub_seconds as f64;
            let here = player.estimate_position().as_secs_f64();
            let target = if action == Action::ScrubBack {
                here - step
            } else {
                here + step
            };
            ignore_missing_track(player.seek(target))
        }
        Action::JumpTenth(n) => {
            let target = player.duration().as_secs_f64() * f64::from(n) / 10.0;
            ignore_missing_track(player.seek(target))
        }
        Action::Next => {
            open_next(player, app)?;
            player.play()
        }
        Action::VolumeUp => {
            player.set_volume(player.volume() + settings.audio.volume_step);
            Ok(())
        }
        Action::VolumeDown => {
            player.set_volume(player.volume() - settings.audio.volume_step);
            Ok(())
        }
        Action::Quit => Ok(()),
    }
}

/// Seeking with nothing loaded is a no-op from the user's point of view.
fn ignore_missing_track(result: Result<()>) -> Result<()> {
    match result {
        Err(PlayerError::NoTrackLoaded) => Ok(()),
        other => other,
    }
}
