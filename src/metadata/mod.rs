//! Audio file metadata extraction and identity resolution.
//!
//! Uses the lofty crate for every container it can read, and the id3 crate
//! for the ID3v2 block embedded in DSF files.
//!
//! # Features
//! - Per-container tag extraction dispatched through a [`FormatRegistry`]
//! - Best-effort (title, artist, album, duration) resolution
//! - Filename fallback (`Artist - Title.ext`) when tags are missing

pub(crate) mod dsf;
pub mod extract;
pub mod format;
pub mod resolver;

use std::path::PathBuf;

pub use extract::{FormatRegistry, TagExtractor};
pub use format::AudioFormat;
pub use resolver::MetadataResolver;

/// Raw tag fields as read from a container.
///
/// Every field is optional: a missing frame, an empty value, or a file
/// without any tag container all come back as `None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTags {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub album: Option<String>,
    pub duration_secs: Option<f64>,
}

/// Best-effort identity of a track, produced once per file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrackIdentity {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub album: Option<String>,
    pub duration_secs: Option<f64>,
}

impl TrackIdentity {
    /// The (title, artist) pair used for lyrics lookup.
    ///
    /// Returns `None` unless both are present and non-empty.
    pub fn lookup_key(&self) -> Option<(&str, &str)> {
        let title = self.title.as_deref().filter(|s| !s.trim().is_empty())?;
        let artist = self.artist.as_deref().filter(|s| !s.trim().is_empty())?;
        Some((title, artist))
    }
}

impl From<RawTags> for TrackIdentity {
    fn from(tags: RawTags) -> Self {
        Self {
            title: tags.title,
            artist: tags.artist,
            album: tags.album,
            duration_secs: tags.duration_secs,
        }
    }
}

/// Failure to read a tag container.
///
/// Always recovered by the resolver: the file is treated as having no tags.
#[derive(Debug, thiserror::Error)]
pub enum TagReadError {
    #[error("Failed to open {}: {message}", path.display())]
    Open { path: PathBuf, message: String },

    #[error("Failed to read tags from {}: {message}", path.display())]
    Read { path: PathBuf, message: String },

    #[error("Malformed DSF container {}: {message}", path.display())]
    Dsf { path: PathBuf, message: String },
}

impl TagReadError {
    pub fn open(path: impl Into<PathBuf>, message: impl ToString) -> Self {
        Self::Open {
            path: path.into(),
            message: message.to_string(),
        }
    }

    pub fn read(path: impl Into<PathBuf>, message: impl ToString) -> Self {
        Self::Read {
            path: path.into(),
            message: message.to_string(),
        }
    }

    pub fn dsf(path: impl Into<PathBuf>, message: impl ToString) -> Self {
        Self::Dsf {
            path: path.into(),
            message: message.to_string(),
        }
    }
}

/// Normalize a tag value: trimmed, and `None` when empty.
pub(crate) fn clean_value(value: impl AsRef<str>) -> Option<String> {
    let trimmed = value.as_ref().trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
