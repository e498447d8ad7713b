//! `.lrc` sidecar files next to the audio file.

use std::path::{Path, PathBuf};

use tracing::info;

use super::{OutputArtifact, OutputMode, OutputWriter, WriteError};
use crate::lyrics::LyricsPayload;
use crate::metadata::AudioFormat;

/// Sidecar path for an audio file: same directory, same stem, `.lrc`.
pub fn sidecar_path(audio_path: &Path) -> PathBuf {
    audio_path.with_extension("lrc")
}

/// Writes lyrics verbatim as UTF-8, replacing any existing sidecar.
#[derive(Debug, Clone, Copy, Default)]
pub struct SidecarWriter;

impl OutputWriter for SidecarWriter {
    fn mode(&self) -> OutputMode {
        OutputMode::Sidecar
    }

    fn target(&self, audio_path: &Path) -> OutputArtifact {
        OutputArtifact::Sidecar(sidecar_path(audio_path))
    }

    fn write(
        &self,
        audio_path: &Path,
        _format: AudioFormat,
        lyrics: &LyricsPayload,
    ) -> Result<OutputArtifact, WriteError> {
        let lrc_path = sidecar_path(audio_path);
        std::fs::write(&lrc_path, lyrics.as_str().as_bytes()).map_err(|source| WriteError::Io {
            path: lrc_path.clone(),
            source,
        })?;

        info!(target: "output::sidecar", path = %lrc_path.display(), "Saved lyrics");
        Ok(OutputArtifact::Sidecar(lrc_path))
    }
}
