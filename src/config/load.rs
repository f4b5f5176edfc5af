use std::{env, path::PathBuf};

use super::schema::Settings;

/// Configuration loading helpers.
///
/// `Settings::load` layers environment variables (prefix `PLAYHEAD__`) over
/// an optional config file over struct defaults.
impl Settings {
    /// Load settings from environment and optional config file.
    pub fn load() -> Result<Self, ::config::ConfigError> {
        let config_path = resolve_config_path();

        let mut builder = ::config::Config::builder();

        if let Some(path) = &config_path {
            builder = builder.add_source(::config::File::from(path.as_path()).required(false));
        }

        builder = builder.add_source(
            ::config::Environment::with_prefix("PLAYHEAD")
                .separator("__")
                .try_parsing(true),
        );

        let cfg = builder.build()?;
        let settings: Settings = cfg.try_deserialize()?;
        Ok(settings)
    }

    /// Like `load`, but never fails: a broken or invalid config yields the
    /// defaults together with the reason they were used.
    pub fn load_or_default() -> (Self, Option<String>) {
        match Self::load() {
            Ok(s) => match s.validate() {
                Ok(()) => (s, None),
                Err(msg) => (Self::default(), Some(format!("invalid config: {msg}"))),
            },
            Err(e) => (Self::default(), Some(format!("failed to load config: {e}"))),
        }
    }

    /// Reject values the player cannot run with.
    pub fn validate(&self) -> Result<(), String> {
        if self.refresh.progress_interval_ms == 0 {
            return Err("refresh.progress_interval_ms must be >= 1".to_string());
        }
        if self.refresh.visualizer_interval_ms == 0 {
            return Err("refresh.visualizer_interval_ms must be >= 1".to_string());
        }
        if self.refresh.bar_count == 0 {
            return Err("refresh.bar_count must be >= 1".to_string());
        }
        if self.refresh.bar_min > self.refresh.bar_max {
            return Err("refresh.bar_min must not exceed refresh.bar_max".to_string());
        }
        if !(0.0..=1.0).contains(&self.audio.initial_volume) {
            return Err("audio.initial_volume must be within [0, 1]".to_string());
        }
        if !(self.audio.volume_step > 0.0 && self.audio.volume_step <= 1.0) {
            return Err("audio.volume_step must be within (0, 1]".to_string());
        }
        Ok(())
    }
}

/// Resolve the config path from `PLAYHEAD_CONFIG_PATH` or XDG defaults.
pub fn resolve_config_path() -> Option<PathBuf> {
    if let Some(p) = env::var_os("PLAYHEAD_CONFIG_PATH") {
        return Some(PathBuf::from(p));
    }
    default_config_path()
}

/// `$XDG_CONFIG_HOME/playhead/config.toml`, or `~/.config/playhead/config.toml`
/// when `XDG_CONFIG_HOME` is not set.
pub fn default_config_path() -> Option<PathBuf> {
    let config_home = if let Some(xdg) = env::var_os("XDG_CONFIG_HOME") {
        Some(PathBuf::from(xdg))
    } else {
        env::var_os("HOME").map(|home| PathBuf::from(home).join(".config"))
    };

    config_home.map(|d| d.join("playhead").join("config.toml"))
}
