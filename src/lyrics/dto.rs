//! LRCLIB API response DTOs.
//!
//! These match the exact shape of `/api/search` entries. Only
//! `syncedLyrics` feeds the output; the other fields are kept for the
//! optional best-match selection and for logging.

use serde::Deserialize;

/// One entry of a search response array.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub track_name: Option<String>,
    #[serde(default)]
    pub artist_name: Option<String>,
    #[serde(default)]
    pub album_name: Option<String>,
    /// Track length in seconds
    #[serde(default)]
    pub duration: Option<f64>,
    #[serde(default)]
    pub instrumental: Option<bool>,
    #[serde(default)]
    pub plain_lyrics: Option<String>,
    #[serde(default)]
    pub synced_lyrics: Option<String>,
}

impl SearchResult {
    /// The synced lyrics, if present and not blank.
    pub fn synced(&self) -> Option<&str> {
        self.synced_lyrics
            .as_deref()
            .filter(|text| !text.trim().is_empty())
    }
}
