//! Application-wide error types.
//!
//! Library modules use specific error types via `thiserror`
//! ([`TagReadError`](crate::metadata::TagReadError),
//! [`LyricsError`](crate::lyrics::LyricsError),
//! [`WriteError`](crate::output::WriteError),
//! [`PipelineError`](crate::pipeline::PipelineError),
//! [`ConfigError`](crate::config::ConfigError)), while the CLI uses `anyhow`
//! for convenient error propagation.
//!
//! [`Error`] covers the checks the CLI makes on a single file path before
//! handing it to the library.
//!
//! # Example
//!
//! ```ignore
//! use lyrics_minder::error::{Result, ResultExt};
//!
//! fn size(path: &Path) -> Result<u64> {
//!     Ok(std::fs::metadata(path).with_context("reading audio file")?.len())
//! }
//! ```

use std::path::PathBuf;

/// Application-wide result type.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// File I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// File is not a supported audio format
    #[error("Unsupported audio file: {}", .0.display())]
    UnsupportedFile(PathBuf),

    /// Generic error with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    pub fn unsupported_file(path: impl Into<PathBuf>) -> Self {
        Self::UnsupportedFile(path.into())
    }

    /// Add context to an error.
    pub fn context(self, ctx: impl Into<String>) -> Self {
        Self::WithContext {
            context: ctx.into(),
            source: Box::new(self),
        }
    }
}

/// Extension trait for adding context to Results.
pub trait ResultExt<T> {
    /// Add context to an error result.
    fn with_context(self, ctx: impl Into<String>) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn with_context(self, ctx: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.into().context(ctx))
    }
}
