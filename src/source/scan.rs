use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use crate::config::SourceSettings;

pub fn is_audio_file(path: &Path, settings: &SourceSettings) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            settings
                .extensions
                .iter()
                .map(|e| e.trim().trim_start_matches('.'))
                .any(|e| !e.is_empty() && e.eq_ignore_ascii_case(ext))
        })
        .unwrap_or(false)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

fn walk(dir: &Path, settings: &SourceSettings) -> Vec<PathBuf> {
    let mut walker = WalkDir::new(dir).follow_links(settings.follow_links);

    // Non-recursive = only the root directory.
    let depth_cap = if settings.recursive {
        settings.max_depth
    } else {
        Some(1)
    };
    if let Some(d) = depth_cap {
        walker = walker.max_depth(d);
    }

    let mut found: Vec<PathBuf> = walker
        .into_iter()
        .filter_entry(|e| settings.include_hidden || e.depth() == 0 || !is_hidden(e.path()))
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file() || e.path().is_file())
        .map(|e| e.into_path())
        .filter(|p| is_audio_file(p, settings))
        .collect();

    found.sort_by_key(|p| p.to_string_lossy().to_lowercase());
    found
}

/// Expand `args` into candidate paths, in argument order.
///
/// Each directory contributes its audio files sorted case-insensitively.
/// Explicit files are kept when their extension is accepted; anything else
/// (missing paths, other extensions) is skipped.
pub fn collect(args: &[PathBuf], settings: &SourceSettings) -> Vec<PathBuf> {
    let mut candidates = Vec::new();
    for arg in args {
        if arg.is_dir() {
            candidates.extend(walk(arg, settings));
        } else if arg.is_file() && is_audio_file(arg, settings) {
            candidates.push(arg.clone());
        } else {
            debug!(path = %arg.display(), "skipping argument");
        }
    }
    candidates
}
