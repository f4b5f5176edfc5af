use std::fs::OpenOptions;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LoggingSettings;

/// Build the filter: `RUST_LOG` when set, otherwise the configured level.
pub fn filter(settings: &LoggingSettings) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(settings.level.trim()))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global subscriber when a log file is configured.
///
/// Stdout is owned by the terminal UI, so without a file nothing is logged.
pub fn init(settings: &LoggingSettings) {
    let Some(path) = settings.file.as_ref() else {
        return;
    };

    let file = match OpenOptions::new().create(true).append(true).open(path) {
        Ok(f) => f,
        Err(e) => {
            eprintln!(
                "playhead: cannot open log file {}, logging disabled: {e}",
                path.display()
            );
            return;
        }
    };

    let result = tracing_subscriber::registry()
        .with(filter(settings))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false),
        )
        .try_init();
    if let Err(e) = result {
        eprintln!("playhead: logging already initialized: {e}");
    }
}
