//! Extract embedded album art to `cover.jpg`.
//!
//! For every mp3, flac, m4a and aiff file under a root, the front cover (or
//! the first picture) is written to `cover.jpg` in the file's directory,
//! overwriting whatever is there. Ogg and the remaining formats have no
//! standard picture storage and are reported as unsupported.
//!
//! Files are visited in walk order, so when several tracks of one album
//! carry art the last one visited wins.

mod embedded;

use std::path::{Path, PathBuf};

use tracing::{info, warn};

pub use embedded::{EmbeddedPicture, extract_embedded_cover};

use crate::metadata::{AudioFormat, FormatRegistry};
use crate::pipeline::PipelineError;
use crate::scanner;

pub const COVER_FILE_NAME: &str = "cover.jpg";

/// Whether cover extraction is attempted for `format`.
pub fn supports_cover(format: AudioFormat) -> bool {
    matches!(
        format,
        AudioFormat::Mp3 | AudioFormat::Flac | AudioFormat::M4a | AudioFormat::Aiff
    )
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoverOutcome {
    Extracted(PathBuf),
    NoCover,
    Unsupported,
    Failed(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoverSummary {
    pub scanned: usize,
    pub extracted: usize,
    pub missing: usize,
    pub unsupported: usize,
    pub failed: usize,
}

impl CoverSummary {
    fn record(&mut self, outcome: &CoverOutcome) {
        self.scanned += 1;
        match outcome {
            CoverOutcome::Extracted(_) => self.extracted += 1,
            CoverOutcome::NoCover => self.missing += 1,
            CoverOutcome::Unsupported => self.unsupported += 1,
            CoverOutcome::Failed(_) => self.failed += 1,
        }
    }
}

impl std::fmt::Display for CoverSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Files scanned: {}, covers extracted: {}, no cover: {}, unsupported: {}, failed: {}",
            self.scanned, self.extracted, self.missing, self.unsupported, self.failed
        )
    }
}

/// Write the embedded cover of one file to `cover.jpg` beside it.
pub fn extract_cover(path: &Path, format: AudioFormat) -> CoverOutcome {
    if !supports_cover(format) {
        return CoverOutcome::Unsupported;
    }

    let picture = match extract_embedded_cover(path) {
        Ok(Some(picture)) => picture,
        Ok(None) => return CoverOutcome::NoCover,
        Err(e) => return CoverOutcome::Failed(e),
    };

    let output = path
        .parent()
        .unwrap_or_else(|| Path::new("."))
        .join(COVER_FILE_NAME);

    match std::fs::write(&output, &picture.data) {
        Ok(()) => CoverOutcome::Extracted(output),
        Err(e) => CoverOutcome::Failed(format!("{}: {e}", output.display())),
    }
}

/// Extract covers for every supported file under `root`.
pub fn extract_covers(root: &Path, registry: &FormatRegistry) -> Result<CoverSummary, PipelineError> {
    std::fs::read_dir(root).map_err(|source| PipelineError::RootUnreadable {
        path: root.to_path_buf(),
        source,
    })?;

    let mut summary = CoverSummary::default();
    for (path, format) in scanner::scan(root, registry) {
        let outcome = extract_cover(&path, format);
        match &outcome {
            CoverOutcome::Extracted(output) => {
                info!(target: "cover", source = %path.display(), output = %output.display(), "Extracted cover");
            }
            CoverOutcome::NoCover => {
                info!(target: "cover", path = %path.display(), "No cover found");
            }
            CoverOutcome::Unsupported => {
                info!(target: "cover", path = %path.display(), format = %format, "Cover extraction not supported");
            }
            CoverOutcome::Failed(reason) => {
                warn!(target: "cover", path = %path.display(), reason = %reason, "Cover extraction failed");
            }
        }
        summary.record(&outcome);
    }

    Ok(summary)
}
