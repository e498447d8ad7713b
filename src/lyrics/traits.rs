//! Trait definitions for the lyrics lookup seam.
//!
//! The pipeline depends on [`LyricsApi`], not on the concrete client, so
//! tests can substitute scripted implementations.
//!
//! # Example
//!
//! ```ignore
//! use lyrics_minder::lyrics::LyricsApi;
//!
//! async fn process<L: LyricsApi>(lyrics: &L, identity: &TrackIdentity) {
//!     if let Ok(Some(payload)) = lyrics.fetch_lyrics(identity).await {
//!         // write it
//!     }
//! }
//! ```

use async_trait::async_trait;

use super::client::LrclibClient;
use super::transport::HttpTransport;
use super::{LyricsError, LyricsPayload};
use crate::metadata::TrackIdentity;

/// Lyrics lookup for a resolved track.
#[async_trait]
pub trait LyricsApi: Send + Sync {
    /// Fetch synced lyrics for `identity`.
    ///
    /// `Ok(None)` means nothing usable was found.
    async fn fetch_lyrics(
        &self,
        identity: &TrackIdentity,
    ) -> Result<Option<LyricsPayload>, LyricsError>;
}

#[async_trait]
impl<T: HttpTransport> LyricsApi for LrclibClient<T> {
    async fn fetch_lyrics(
        &self,
        identity: &TrackIdentity,
    ) -> Result<Option<LyricsPayload>, LyricsError> {
        self.fetch_synced_lyrics_for(identity).await
    }
}
