//! LRCLIB HTTP client
//!
//! Two-tier search against `/api/search`:
//!
//! 1. Structured: `?track_name=<title>&artist_name=<artist>`
//! 2. Only if (1) succeeded with an empty list: free text `?q=<title artist>`
//!
//! A failed request (transport error or non-2xx status) ends the lookup at
//! whichever tier it happens; it is never retried. At most two requests are
//! made per track.

use tracing::debug;

use super::dto::SearchResult;
use super::selection::{ResultSelection, SearchHints};
use super::transport::{HttpTransport, ReqwestTransport};
use super::{LyricsError, LyricsPayload};
use crate::metadata::TrackIdentity;

pub const DEFAULT_BASE_URL: &str = "https://lrclib.net";

const SEARCH_PATH: &str = "/api/search";

/// LRCLIB API client
pub struct LrclibClient<T = ReqwestTransport> {
    transport: T,
    base_url: String,
    selection: ResultSelection,
}

impl LrclibClient<ReqwestTransport> {
    /// Client against the public LRCLIB instance with the given timeout.
    pub fn new(timeout: std::time::Duration) -> Result<Self, LyricsError> {
        Ok(Self::with_transport(
            ReqwestTransport::new(timeout)?,
            DEFAULT_BASE_URL,
        ))
    }
}

impl<T: HttpTransport> LrclibClient<T> {
    pub fn with_transport(transport: T, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            transport,
            base_url,
            selection: ResultSelection::default(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_selection(mut self, selection: ResultSelection) -> Self {
        self.selection = selection;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Structured search URL (first tier).
    pub fn search_url(&self, title: &str, artist: &str) -> String {
        format!(
            "{}{}?track_name={}&artist_name={}",
            self.base_url,
            SEARCH_PATH,
            urlencoding::encode(title),
            urlencoding::encode(artist)
        )
    }

    /// Free-text search URL (fallback tier).
    pub fn fallback_url(&self, title: &str, artist: &str) -> String {
        let query = format!("{} {}", title, artist);
        format!(
            "{}{}?q={}",
            self.base_url,
            SEARCH_PATH,
            urlencoding::encode(&query)
        )
    }

    /// Fetch synced lyrics for a (title, artist) pair.
    ///
    /// `Ok(None)` when both tiers come back empty or the selected result
    /// has no synced lyrics. Later results are never inspected.
    pub async fn fetch_synced_lyrics(
        &self,
        title: &str,
        artist: &str,
    ) -> Result<Option<LyricsPayload>, LyricsError> {
        self.fetch(title, artist, &SearchHints::default()).await
    }

    /// Same as [`fetch_synced_lyrics`](Self::fetch_synced_lyrics), passing
    /// the identity's album and duration to the selection strategy.
    pub async fn fetch_synced_lyrics_for(
        &self,
        identity: &TrackIdentity,
    ) -> Result<Option<LyricsPayload>, LyricsError> {
        let Some((title, artist)) = identity.lookup_key() else {
            return Ok(None);
        };
        self.fetch(title, artist, &SearchHints::from_identity(identity))
            .await
    }

    async fn fetch(
        &self,
        title: &str,
        artist: &str,
        hints: &SearchHints<'_>,
    ) -> Result<Option<LyricsPayload>, LyricsError> {
        let mut results = self.search(&self.search_url(title, artist)).await?;

        if results.is_empty() {
            debug!(
                target: "lyrics::lrclib",
                title, artist,
                "No structured matches, trying free-text search"
            );
            results = self.search(&self.fallback_url(title, artist)).await?;
        }

        let Some(chosen) = self.selection.select(&results, hints) else {
            debug!(target: "lyrics::lrclib", title, artist, "No search results");
            return Ok(None);
        };

        debug!(
            target: "lyrics::lrclib",
            id = ?chosen.id,
            track = ?chosen.track_name,
            artist = ?chosen.artist_name,
            has_synced = chosen.synced().is_some(),
            "Selected search result"
        );

        Ok(chosen.synced().map(LyricsPayload::new))
    }

    async fn search(&self, url: &str) -> Result<Vec<SearchResult>, LyricsError> {
        let response = self.transport.get(url).await?;

        if !response.is_success() {
            return Err(LyricsError::Status(response.status));
        }

        serde_json::from_str(&response.body).map_err(|e| LyricsError::Parse(e.to_string()))
    }
}
