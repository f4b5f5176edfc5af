use std::path::PathBuf;

use serde::Deserialize;

/// Top-level settings loaded from `config.toml`.
///
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/playhead/config.toml` or
/// `~/.config/playhead/config.toml`.
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `PLAYHEAD__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub audio: AudioSettings,
    pub refresh: RefreshSettings,
    pub controls: ControlsSettings,
    pub playback: PlaybackSettings,
    pub source: SourceSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    /// Volume applied before the first track plays, in `[0, 1]`.
    pub initial_volume: f32,
    /// Volume change per `+` / `-` key press.
    pub volume_step: f32,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            initial_volume: 0.5,
            volume_step: 0.05,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RefreshSettings {
    /// Progress indicator cadence (milliseconds).
    pub progress_interval_ms: u64,
    /// Visualizer cadence (milliseconds).
    pub visualizer_interval_ms: u64,
    /// Number of visualizer bars.
    pub bar_count: usize,
    /// Smallest bar magnitude.
    pub bar_min: u64,
    /// Largest bar magnitude.
    pub bar_max: u64,
}

impl Default for RefreshSettings {
    fn default() -> Self {
        Self {
            progress_interval_ms: 500,
            visualizer_interval_ms: 100,
            bar_count: 32,
            bar_min: 10,
            bar_max: 55,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ControlsSettings {
    /// Number of seconds to scrub when pressing `H` / `L`.
    pub scrub_seconds: u64,
}

impl Default for ControlsSettings {
    fn default() -> Self {
        Self { scrub_seconds: 5 }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlaybackSettings {
    /// Start playing the first track right after it loads.
    pub autoplay: bool,
    /// Stop once the estimated position reaches the end of the track.
    pub stop_at_end: bool,
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            autoplay: true,
            stop_at_end: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SourceSettings {
    /// File extensions to accept (case-insensitive, without dot).
    pub extensions: Vec<String>,
    /// Whether to follow symlinks when walking directories.
    pub follow_links: bool,
    /// Whether to include hidden files/directories (dotfiles).
    pub include_hidden: bool,
    /// Whether to recurse into subdirectories.
    pub recursive: bool,
    /// Optional cap on directory recursion depth.
    pub max_depth: Option<usize>,
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self {
            extensions: vec!["mp3".into(), "wav".into(), "flac".into(), "ogg".into()],
            follow_links: true,
            include_hidden: false,
            recursive: true,
            max_depth: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// `tracing` filter directive; `RUST_LOG` wins when set.
    pub level: String,
    /// Log file. Without one nothing is logged, since the terminal belongs
    /// to the UI.
    pub file: Option<PathBuf>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}
