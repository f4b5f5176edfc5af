use std::env;
use std::path::PathBuf;
use std::time::Instant;

use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::{info, warn};

use crate::app::App;
use crate::config::Settings;
use crate::player::{Player, RodioEngine};
use crate::source;

mod event_loop;
mod logging;
mod startup;

#[cfg(test)]
mod tests;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let (settings, fallback) = Settings::load_or_default();
    logging::init(&settings.logging);
    if let Some(reason) = fallback {
        eprintln!("playhead: {reason}, using defaults");
        warn!(%reason, "using default settings");
    }

    let mut args: Vec<PathBuf> = env::args_os().skip(1).map(PathBuf::from).collect();
    if args.is_empty() {
        args.push(env::current_dir()?);
    }

    let candidates = source::collect(&args, &settings.source);
    info!(count = candidates.len(), "candidates collected");

    let mut player = Player::new(RodioEngine::new(), settings.audio.initial_volume);
    let mut app = App::new(candidates);
    startup::load_first_candidate(&mut player, &mut app, &settings);

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut state = event_loop::EventLoopState::new(&settings, Instant::now());
    let run_result = event_loop::run(&mut terminal, &settings, &mut player, &mut app, &mut state);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    info!("shutdown");
    run_result
}
