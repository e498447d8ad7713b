//! Writing fetched lyrics.
//!
//! Two mutually exclusive strategies, chosen once per run:
//!
//! 1. **Sidecar** - `<audio path without extension>.lrc` next to the file
//! 2. **Embed** - the lyrics field of the file's own tag container
//!
//! Each write either succeeds completely or reports a [`WriteError`]; there
//! is no rollback and no partial-success state.

mod embed;
mod sidecar;

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::lyrics::LyricsPayload;
use crate::metadata::AudioFormat;

pub use embed::EmbedWriter;
pub use sidecar::{SidecarWriter, sidecar_path};

/// Which artifact a run produces.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum OutputMode {
    /// Write `.lrc` files next to the audio
    #[default]
    Sidecar,
    /// Embed lyrics in the audio file's tags (mp3, aiff, flac)
    Embed,
}

impl std::fmt::Display for OutputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputMode::Sidecar => f.write_str("sidecar"),
            OutputMode::Embed => f.write_str("embed"),
        }
    }
}

/// The file a successful write produced or changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputArtifact {
    /// A new (or overwritten) `.lrc` file
    Sidecar(PathBuf),
    /// The audio file itself, with an updated lyrics tag
    Embedded(PathBuf),
}

impl OutputArtifact {
    pub fn path(&self) -> &Path {
        match self {
            OutputArtifact::Sidecar(path) | OutputArtifact::Embedded(path) => path,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum WriteError {
    #[error("Failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to update tags in {}: {message}", path.display())]
    Tag { path: PathBuf, message: String },

    #[error("Embedding lyrics is not supported for {format} files ({})", path.display())]
    UnsupportedFormat { path: PathBuf, format: AudioFormat },
}

/// Strategy for persisting lyrics for one audio file.
pub trait OutputWriter: Send + Sync {
    fn mode(&self) -> OutputMode;

    /// The artifact a write for `audio_path` would produce.
    fn target(&self, audio_path: &Path) -> OutputArtifact;

    /// Whether a write for `audio_path` could succeed, without touching disk.
    ///
    /// Dry runs use this so they count the same files a real run would.
    fn check(&self, _audio_path: &Path, _format: AudioFormat) -> Result<(), WriteError> {
        Ok(())
    }

    fn write(
        &self,
        audio_path: &Path,
        format: AudioFormat,
        lyrics: &LyricsPayload,
    ) -> Result<OutputArtifact, WriteError>;
}

/// The writer for `mode`.
pub fn writer_for(mode: OutputMode) -> Box<dyn OutputWriter> {
    match mode {
        OutputMode::Sidecar => Box::new(SidecarWriter),
        OutputMode::Embed => Box::new(EmbedWriter),
    }
}
