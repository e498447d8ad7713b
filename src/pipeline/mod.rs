//! Single-pass lyrics pipeline.
//!
//! Per file:
//!
//! ```text
//! Discovered -> MetadataResolved -> MissingIdentity
//!                                -> LyricsFetched -> Written | NoLyricsFound
//!            (any step)          -> Failed
//! ```
//!
//! Files are processed strictly one at a time in walk order. Nothing that
//! happens to one file stops the walk; only an unreadable root directory
//! aborts the run, before any file is touched.

use std::any::Any;
use std::fmt;
use std::panic::AssertUnwindSafe;
use std::path::{Path, PathBuf};

use futures::FutureExt;
use tracing::{debug, info, warn};

use crate::lyrics::LyricsApi;
use crate::metadata::{AudioFormat, MetadataResolver};
use crate::output::{OutputArtifact, OutputWriter};
use crate::scanner;

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Cannot read root directory {}: {source}", path.display())]
    RootUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Terminal state of one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    /// Lyrics were written (or would have been, in a dry run)
    Written(OutputArtifact),
    /// Title or artist could not be determined; no lookup was made
    MissingIdentity,
    /// The lookup failed or came back without synced lyrics
    NoLyricsFound,
    /// Writing failed, or processing panicked
    Failed(String),
}

impl fmt::Display for FileOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileOutcome::Written(artifact) => write!(f, "written to {}", artifact.path().display()),
            FileOutcome::MissingIdentity => f.write_str("skipped (missing title or artist)"),
            FileOutcome::NoLyricsFound => f.write_str("no synced lyrics found"),
            FileOutcome::Failed(reason) => write!(f, "failed: {reason}"),
        }
    }
}

/// A file that failed, kept so the run can be reported on afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileFailure {
    pub path: PathBuf,
    pub reason: String,
}

/// Counters for one run, plus the files that failed.
///
/// `scanned` always equals `written + skipped + no_lyrics + failed`.
/// Other outcomes are logged as they happen and only counted, so memory
/// stays flat however large the library is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub scanned: usize,
    pub written: usize,
    pub skipped: usize,
    pub no_lyrics: usize,
    pub failed: usize,
    /// Nothing was written; `written` counts what would have been
    pub dry_run: bool,
    pub failures: Vec<FileFailure>,
}

impl RunSummary {
    fn record(&mut self, path: PathBuf, outcome: FileOutcome) {
        self.scanned += 1;
        match outcome {
            FileOutcome::Written(_) => self.written += 1,
            FileOutcome::MissingIdentity => self.skipped += 1,
            FileOutcome::NoLyricsFound => self.no_lyrics += 1,
            FileOutcome::Failed(reason) => {
                self.failed += 1;
                self.failures.push(FileFailure { path, reason });
            }
        }
    }

    pub fn failure_for(&self, path: &Path) -> Option<&FileFailure> {
        self.failures.iter().find(|f| f.path == path)
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let written_label = if self.dry_run { "would write" } else { "with lyrics" };
        write!(
            f,
            "Files scanned: {}, {}: {}, skipped: {}, no lyrics: {}, failed: {}",
            self.scanned, written_label, self.written, self.skipped, self.no_lyrics, self.failed
        )
    }
}

/// Walks a directory and runs resolve -> fetch -> write for every audio file.
pub struct PipelineDriver<L> {
    root: PathBuf,
    resolver: MetadataResolver,
    lyrics: L,
    writer: Box<dyn OutputWriter>,
    dry_run: bool,
}

impl<L: LyricsApi> PipelineDriver<L> {
    pub fn new(root: impl Into<PathBuf>, lyrics: L, writer: Box<dyn OutputWriter>) -> Self {
        Self {
            root: root.into(),
            resolver: MetadataResolver::default(),
            lyrics,
            writer,
            dry_run: false,
        }
    }

    pub fn with_resolver(mut self, resolver: MetadataResolver) -> Self {
        self.resolver = resolver;
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn lyrics(&self) -> &L {
        &self.lyrics
    }

    /// Process every supported file under the root.
    pub async fn run(&self) -> Result<RunSummary, PipelineError> {
        std::fs::read_dir(&self.root).map_err(|source| PipelineError::RootUnreadable {
            path: self.root.clone(),
            source,
        })?;

        info!(
            target: "pipeline",
            root = %self.root.display(),
            mode = %self.writer.mode(),
            dry_run = self.dry_run,
            "Starting run"
        );

        let mut summary = RunSummary {
            dry_run: self.dry_run,
            ..Default::default()
        };

        for (path, format) in scanner::scan(&self.root, self.resolver.registry()) {
            let outcome = match AssertUnwindSafe(self.process_file(&path, format))
                .catch_unwind()
                .await
            {
                Ok(outcome) => outcome,
                Err(panic) => FileOutcome::Failed(format!(
                    "unexpected error: {}",
                    panic_message(panic.as_ref())
                )),
            };

            match &outcome {
                FileOutcome::Failed(reason) => {
                    warn!(target: "pipeline", path = %path.display(), reason = %reason, "File failed");
                }
                FileOutcome::Written(artifact) => {
                    info!(
                        target: "pipeline",
                        path = %path.display(),
                        artifact = %artifact.path().display(),
                        dry_run = self.dry_run,
                        "Saved lyrics"
                    );
                }
                other => {
                    debug!(target: "pipeline", path = %path.display(), outcome = %other, "File done");
                }
            }

            summary.record(path, outcome);
            info!(
                target: "pipeline",
                scanned = summary.scanned,
                written = summary.written,
                "Progress"
            );
        }

        info!(
            target: "pipeline",
            scanned = summary.scanned,
            written = summary.written,
            skipped = summary.skipped,
            no_lyrics = summary.no_lyrics,
            failed = summary.failed,
            dry_run = summary.dry_run,
            "Run complete"
        );
        Ok(summary)
    }

    /// Run the resolve -> fetch -> write chain for one file.
    pub async fn process_file(&self, path: &Path, format: AudioFormat) -> FileOutcome {
        let identity = self.resolver.resolve(path);

        if identity.lookup_key().is_none() {
            info!(
                target: "pipeline",
                path = %path.display(),
                title = ?identity.title,
                artist = ?identity.artist,
                "Skipping, missing title or artist"
            );
            return FileOutcome::MissingIdentity;
        }

        let lyrics = match self.lyrics.fetch_lyrics(&identity).await {
            Ok(Some(lyrics)) => lyrics,
            Ok(None) => {
                info!(target: "pipeline", path = %path.display(), "No synced lyrics found");
                return FileOutcome::NoLyricsFound;
            }
            Err(e) => {
                warn!(target: "pipeline", path = %path.display(), error = %e, "Lyrics lookup failed");
                return FileOutcome::NoLyricsFound;
            }
        };

        debug!(
            target: "pipeline",
            path = %path.display(),
            lines = lyrics.synced_line_count(),
            "Fetched synced lyrics"
        );

        if self.dry_run {
            if let Err(e) = self.writer.check(path, format) {
                return FileOutcome::Failed(e.to_string());
            }
            let target = self.writer.target(path);
            info!(target: "pipeline", path = %target.path().display(), "Would write lyrics");
            return FileOutcome::Written(target);
        }

        match self.writer.write(path, format, &lyrics) {
            Ok(artifact) => FileOutcome::Written(artifact),
            Err(e) => FileOutcome::Failed(e.to_string()),
        }
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> &str {
    if let Some(msg) = panic.downcast_ref::<&str>() {
        msg
    } else if let Some(msg) = panic.downcast_ref::<String>() {
        msg
    } else {
        "panic"
    }
}
