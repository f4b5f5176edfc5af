use super::event_loop::{Action, EventLoopState, action_for, enforce_end, handle_action};
use super::logging;
use super::startup::{load_first_candidate, open_next};
use crate::app::App;
use crate::config::{LoggingSettings, Settings};
use crate::media::Track;
use crate::player::{AudioEngine, EngineError, ManualClock, PlaybackState, Player};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

#[derive(Default)]
struct QuietEngine {
    fail_start: bool,
}

impl AudioEngine for QuietEngine {
    fn load_and_play(&mut self, _: &Path, _: Duration) -> Result<(), EngineError> {
        if self.fail_start {
            Err(EngineError::NoOutputDevice("test".into()))
        } else {
            Ok(())
        }
    }
    fn pause(&mut self) {}
    fn unpause(&mut self) -> Result<(), EngineError> {
        Ok(())
    }
    fn stop(&mut self) {}
    fn set_volume(&mut self, _: f32) {}
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

/// Player with a 200 s track loaded, stopped.
fn loaded() -> (Player<QuietEngine, ManualClock>, ManualClock) {
    let clock = ManualClock::new();
    let mut player = Player::with_clock(QuietEngine::default(), clock.clone(), 0.5);
    player.load(Track::new("/music/long.wav", Duration::from_secs(200)));
    (player, clock)
}

/// 8 kHz mono silence, `secs` long.
fn write_wav(path: &Path, secs: u32) {
    let frames = 8000 * secs;
    let data_len = frames * 2;
    let mut bytes: Vec<u8> = Vec::new();
    bytes.extend_from_slice(b"RIFF");
    bytes.extend_from_slice(&(36 + data_len).to_le_bytes());
    bytes.extend_from_slice(b"WAVEfmt ");
    bytes.extend_from_slice(&16u32.to_le_bytes());
    bytes.extend_from_slice(&1u16.to_le_bytes());
    bytes.extend_from_slice(&1u16.to_le_bytes());
    bytes.extend_from_slice(&8000u32.to_le_bytes());
    bytes.extend_from_slice(&16000u32.to_le_bytes());
    bytes.extend_from_slice(&2u16.to_le_bytes());
    bytes.extend_from_slice(&16u16.to_le_bytes());
    bytes.extend_from_slice(b"data");
    bytes.extend_from_slice(&data_len.to_le_bytes());
    bytes.resize(44 + data_len as usize, 0);
    fs::write(path, bytes).unwrap();
}

#[test]
fn key_map_covers_controls() {
    assert_eq!(action_for(key(KeyCode::Char('q'))), Some(Action::Quit));
    assert_eq!(
        action_for(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
        Some(Action::Quit)
    );
    assert_eq!(action_for(key(KeyCode::Enter)), Some(Action::Play));
    assert_eq!(action_for(key(KeyCode::Char(' '))), Some(Action::TogglePause));
    assert_eq!(action_for(key(KeyCode::Char('s'))), Some(Action::Stop));
    assert_eq!(action_for(key(KeyCode::Char('H'))), Some(Action::ScrubBack));
    assert_eq!(action_for(key(KeyCode::Char('L'))), Some(Action::ScrubForward));
    assert_eq!(action_for(key(KeyCode::Char('0'))), Some(Action::JumpTenth(0)));
    assert_eq!(action_for(key(KeyCode::Char('7'))), Some(Action::JumpTenth(7)));
    assert_eq!(action_for(key(KeyCode::Char('n'))), Some(Action::Next));
    assert_eq!(action_for(key(KeyCode::Char('+'))), Some(Action::VolumeUp));
    assert_eq!(action_for(key(KeyCode::Char('-'))), Some(Action::VolumeDown));
    assert_eq!(action_for(key(KeyCode::Char('x'))), None);
    assert_eq!(action_for(key(KeyCode::Tab)), None);
}

#[test]
fn quit_ends_the_loop_without_touching_playback() {
    let (mut player, _clock) = loaded();
    let mut app = App::new(Vec::new());
    player.play().unwrap();
    assert!(handle_action(Action::Quit, &Settings::default(), &mut player, &mut app));
    assert_eq!(player.state(), PlaybackState::Playing);
}

#[test]
fn toggle_pause_cycles_through_states() {
    let (mut player, clock) = loaded();
    let mut app = App::new(Vec::new());
    let settings = Settings::default();

    assert!(!handle_action(Action::TogglePause, &settings, &mut player, &mut app));
    assert_eq!(app.playback, PlaybackState::Playing);

    clock.advance(Duration::from_secs(12));
    handle_action(Action::TogglePause, &settings, &mut player, &mut app);
    assert_eq!(app.playback, PlaybackState::Paused);
    assert_eq!(app.elapsed, Duration::from_secs(12));

    clock.advance(Duration::from_secs(30));
    handle_action(Action::TogglePause, &settings, &mut player, &mut app);
    assert_eq!(app.playback, PlaybackState::Playing);
    assert_eq!(player.estimate_position(), Duration::from_secs(12));
}

#[test]
fn jump_and_scrub_seek_within_the_track() {
    let (mut player, clock) = loaded();
    let mut app = App::new(Vec::new());
    let settings = Settings::default();

    handle_action(Action::JumpTenth(5), &settings, &mut player, &mut app);
    assert_eq!(player.state(), PlaybackState::Stopped);
    assert_eq!(app.elapsed, Duration::from_secs(100));

    handle_action(Action::Play, &settings, &mut player, &mut app);
    clock.advance(Duration::from_secs(3));
    handle_action(Action::ScrubForward, &settings, &mut player, &mut app);
    assert_eq!(player.estimate_position(), Duration::from_secs(108));

    handle_action(Action::JumpTenth(0), &settings, &mut player, &mut app);
    handle_action(Action::ScrubBack, &settings, &mut player, &mut app);
    assert_eq!(player.estimate_position(), Duration::ZERO);
    assert_eq!(player.state(), PlaybackState::Playing);
}

#[test]
fn seek_keys_without_a_track_are_silent() {
    let clock = ManualClock::new();
    let mut player = Player::with_clock(QuietEngine::default(), clock, 0.5);
    let mut app = App::new(Vec::new());
    let settings = Settings::default();

    handle_action(Action::ScrubForward, &settings, &mut player, &mut app);
    handle_action(Action::JumpTenth(3), &settings, &mut player, &mut app);
    assert!(app.status.is_none());

    handle_action(Action::Play, &settings, &mut player, &mut app);
    assert_eq!(app.status.as_deref(), Some("no track loaded"));
    assert_eq!(app.playback, PlaybackState::Stopped);
}

#[test]
fn volume_keys_step_and_clamp() {
    let (mut player, _clock) = loaded();
    let mut app = App::new(Vec::new());
    let mut settings = Settings::default();
    settings.audio.volume_step = 0.3;

    handle_action(Action::VolumeUp, &settings, &mut player, &mut app);
    assert!((app.volume - 0.8).abs() < 1e-6);
    handle_action(Action::VolumeUp, &settings, &mut player, &mut app);
    assert_eq!(app.volume, 1.0);
    for _ in 0..5 {
        handle_action(Action::VolumeDown, &settings, &mut player, &mut app);
    }
    assert_eq!(app.volume, 0.0);
}

#[test]
fn engine_failure_is_reported_and_stops() {
    let clock = ManualClock::new();
    let engine = QuietEngine { fail_start: true };
    let mut player = Player::with_clock(engine, clock, 0.5);
    player.load(Track::new("/music/a.wav", Duration::from_secs(10)));
    let mut app = App::new(Vec::new());

    handle_action(Action::Play, &Settings::default(), &mut player, &mut app);
    assert_eq!(app.playback, PlaybackState::Stopped);
    let status = app.status.clone().unwrap_or_default();
    assert!(status.starts_with("audio engine failure"), "{status}");

    // A later success clears the message.
    handle_action(Action::Stop, &Settings::default(), &mut player, &mut app);
    assert!(app.status.is_none());
}

#[test]
fn open_next_skips_unreadable_candidates() {
    let dir = tempfile::tempdir().unwrap();
    let bad = dir.path().join("bad.wav");
    let good = dir.path().join("good.wav");
    fs::write(&bad, b"nope").unwrap();
    write_wav(&good, 1);

    let clock = ManualClock::new();
    let mut player = Player::with_clock(QuietEngine::default(), clock, 0.5);
    let mut app = App::new(vec![bad, good.clone()]);

    open_next(&mut player, &mut app).unwrap();
    assert_eq!(app.cursor, Some(1));
    assert_eq!(player.track().map(|t| t.path.clone()), Some(good));

    // Wraps past the broken file back to the same one.
    open_next(&mut player, &mut app).unwrap();
    assert_eq!(app.cursor, Some(1));
}

#[test]
fn open_next_keeps_cursor_when_nothing_is_readable() {
    let dir = tempfile::tempdir().unwrap();
    let bad = dir.path().join("bad.wav");
    fs::write(&bad, b"nope").unwrap();

    let clock = ManualClock::new();
    let mut player = Player::with_clock(QuietEngine::default(), clock, 0.5);
    let mut app = App::new(vec![bad]);

    assert!(open_next(&mut player, &mut app).is_err());
    assert_eq!(app.cursor, None);
    assert!(player.track().is_none());

    let mut empty = App::new(Vec::<PathBuf>::new());
    assert!(open_next(&mut player, &mut empty).is_err());
}

#[test]
fn startup_loads_and_autoplays_first_readable_file() {
    let dir = tempfile::tempdir().unwrap();
    let good = dir.path().join("song.wav");
    write_wav(&good, 2);

    let clock = ManualClock::new();
    let mut player = Player::with_clock(QuietEngine::default(), clock, 0.5);
    let mut app = App::new(vec![good]);
    load_first_candidate(&mut player, &mut app, &Settings::default());
    assert_eq!(app.playback, PlaybackState::Playing);
    assert_eq!(app.now_playing.as_deref(), Some("song"));
    assert_eq!(app.cursor, Some(0));

    let mut settings = Settings::default();
    settings.playback.autoplay = false;
    let mut player = Player::with_clock(QuietEngine::default(), ManualClock::new(), 0.5);
    let mut app = App::new(app.candidates.clone());
    load_first_candidate(&mut player, &mut app, &settings);
    assert_eq!(app.playback, PlaybackState::Stopped);
    assert!(app.now_playing.is_some());
}

#[test]
fn startup_without_candidates_sets_status() {
    let mut player = Player::with_clock(QuietEngine::default(), ManualClock::new(), 0.5);
    let mut app = App::new(Vec::new());
    load_first_candidate(&mut player, &mut app, &Settings::default());
    assert_eq!(app.status.as_deref(), Some("no audio files given"));
    assert_eq!(app.playback, PlaybackState::Stopped);
}

#[test]
fn loop_waits_no_longer_than_next_tick() {
    let t0 = Instant::now();
    let mut state = EventLoopState::new(&Settings::default(), t0);
    assert_eq!(state.next_wait(t0), Duration::ZERO);

    state.refresh.tick(t0, &player_stub(), &mut App::new(Vec::new()));
    state
        .visualizer
        .tick(t0, PlaybackState::Stopped, &mut App::new(Vec::new()));
    assert_eq!(state.next_wait(t0), Duration::from_millis(50));
    assert_eq!(
        state.next_wait(t0 + Duration::from_millis(80)),
        Duration::from_millis(20)
    );

    state.shutdown();
    state.shutdown();
    assert!(state.refresh.is_cancelled());
    assert!(state.visualizer.is_cancelled());
    assert_eq!(state.next_wait(t0), Duration::from_millis(50));
}

fn player_stub() -> Player<QuietEngine, ManualClock> {
    Player::with_clock(QuietEngine::default(), ManualClock::new(), 0.5)
}

#[test]
fn log_filter_falls_back_to_info_on_bad_level() {
    let ok = LoggingSettings {
        level: "debug".into(),
        file: None,
    };
    let bad = LoggingSettings {
        level: "not a [valid filter".into(),
        file: None,
    };
    // Only checks that both build; RUST_LOG may be set in the environment.
    let _ = logging::filter(&ok);
    let _ = logging::filter(&bad);
}

#[test]
fn end_of_track_stops_playback_when_enabled() {
    let (mut player, clock) = loaded();
    let mut app = App::new(Vec::new());
    let settings = Settings::default();
    assert!(settings.playback.stop_at_end);

    player.play().unwrap();
    clock.advance(Duration::from_secs(199));
    assert!(!enforce_end(&settings, &mut player, &mut app));
    assert_eq!(player.state(), PlaybackState::Playing);

    clock.advance(Duration::from_secs(5));
    app.elapsed = player.estimate_position();
    assert!(enforce_end(&settings, &mut player, &mut app));
    assert_eq!(player.state(), PlaybackState::Stopped);
    assert_eq!(player.seek_offset(), Duration::ZERO);
    assert_eq!(app.playback, PlaybackState::Stopped);
    assert_eq!(app.elapsed, Duration::ZERO);

    // Already stopped: nothing more to do.
    assert!(!enforce_end(&settings, &mut player, &mut app));
}

#[test]
fn end_of_track_keeps_playing_when_disabled() {
    let (mut player, clock) = loaded();
    let mut app = App::new(Vec::new());
    let mut settings = Settings::default();
    settings.playback.stop_at_end = false;

    player.play().unwrap();
    clock.advance(Duration::from_secs(260));
    assert!(!enforce_end(&settings, &mut player, &mut app));
    assert_eq!(player.state(), PlaybackState::Playing);
    assert_eq!(player.estimate_position(), Duration::from_secs(200));
}
