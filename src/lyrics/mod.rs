//! Synced lyrics lookup against the LRCLIB index.
//!
//! # Architecture
//!
//! - **Transport** (`transport.rs`) - a minimal GET capability, backed by reqwest
//! - **DTOs** (`dto.rs`) - the exact search result shape returned by the API
//! - **Selection** (`selection.rs`) - which result of a search is used
//! - **Client** (`client.rs`) - the two-tier search (structured, then free text)
//! - **Traits** (`traits.rs`) - the seam the pipeline depends on, plus mocks
//!
//! API docs: https://lrclib.net/docs

pub mod client;
pub mod dto;
pub mod selection;
pub mod traits;
pub mod transport;

pub use client::LrclibClient;
pub use selection::{ResultSelection, SearchHints};
pub use traits::LyricsApi;
pub use transport::{HttpResponse, HttpTransport, ReqwestTransport};

/// Synchronized (LRC) lyrics text, passed through untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LyricsPayload(String);

impl LyricsPayload {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }

    /// Number of timestamped lines (`[mm:ss.xx]...`).
    pub fn synced_line_count(&self) -> usize {
        self.0
            .lines()
            .filter(|line| {
                line.strip_prefix('[')
                    .and_then(|rest| rest.chars().next())
                    .is_some_and(|c| c.is_ascii_digit())
            })
            .count()
    }
}

/// Errors from a lyrics lookup.
///
/// Every variant means "no lyrics" for the file being processed; none of
/// them stops a run.
#[derive(Debug, Clone, thiserror::Error)]
pub enum LyricsError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("HTTP {0}")]
    Status(u16),

    #[error("Failed to parse response: {0}")]
    Parse(String),

    #[error("Failed to build HTTP client: {0}")]
    Client(String),
}
