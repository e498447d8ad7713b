use std::path::{Path, PathBuf};

use tracing::warn;
use walkdir::WalkDir;

use crate::metadata::{AudioFormat, FormatRegistry};

/// Scans the given root directory recursively for audio files.
///
/// Only files whose extension has an extractor in `registry` are yielded
/// (case-insensitive). Entries are visited in file-name order so runs over
/// the same tree are reproducible. Unreadable entries below the root are
/// logged and skipped.
pub fn scan<'a>(
    root: &Path,
    registry: &'a FormatRegistry,
) -> impl Iterator<Item = (PathBuf, AudioFormat)> + 'a {
    WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!(target: "scanner", error = %e, "Skipping unreadable entry");
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .filter_map(move |entry| {
            let path = entry.into_path();
            registry.format_of(&path).map(|format| (path, format))
        })
}
