use std::path::{Path, PathBuf};
use std::time::Duration;

/// A resolved audio file. Never mutated; a new file means a new `Track`.
#[derive(Clone, Debug, PartialEq)]
pub struct Track {
    pub path: PathBuf,
    pub duration: Duration,
    pub title: String,
    pub artist: Option<String>,
    pub display: String,
}

impl Track {
    pub fn new(path: impl Into<PathBuf>, duration: Duration) -> Self {
        let path = path.into();
        let title = default_title(&path);
        let display = title.clone();
        Self {
            path,
            duration,
            title,
            artist: None,
            display,
        }
    }

    /// Attach tag data, rebuilding `display`.
    pub fn with_tags(mut self, title: Option<String>, artist: Option<String>) -> Self {
        if let Some(t) = title.map(|t| t.trim().to_string()).filter(|t| !t.is_empty()) {
            self.title = t;
        }
        self.artist = artist
            .map(|a| a.trim().to_string())
            .filter(|a| !a.is_empty());
        self.display = make_display(&self.title, self.artist.as_deref());
        self
    }
}

fn default_title(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("UNKNOWN")
        .to_string()
}

pub(super) fn make_display(title: &str, artist: Option<&str>) -> String {
    match artist {
        Some(a) if !a.trim().is_empty() => format!("{} - {}", a.trim(), title),
        _ => title.to_string(),
    }
}
