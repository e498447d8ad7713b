//! Choosing which search result supplies the lyrics.
//!
//! [`ResultSelection::First`] is the standard behavior: the first result
//! of the non-empty search wins, whatever it contains.
//!
//! [`ResultSelection::BestMatch`] is an opt-in extension that ranks results
//! by how well their duration and album agree with the local file. It can
//! pick a different result than `First` would, so it changes which lyrics
//! get written.

use serde::{Deserialize, Serialize};

use super::dto::SearchResult;
use crate::metadata::TrackIdentity;

/// Duration difference (seconds) still counted as the same recording.
pub const DURATION_TOLERANCE_SECS: f64 = 2.0;

const DURATION_SCORE: u8 = 2;
const ALBUM_SCORE: u8 = 1;

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum ResultSelection {
    #[default]
    First,
    BestMatch,
}

/// Local signals available for ranking.
#[derive(Debug, Clone, Copy, Default)]
pub struct SearchHints<'a> {
    pub album: Option<&'a str>,
    pub duration_secs: Option<f64>,
}

impl<'a> SearchHints<'a> {
    pub fn from_identity(identity: &'a TrackIdentity) -> Self {
        Self {
            album: identity.album.as_deref(),
            duration_secs: identity.duration_secs,
        }
    }
}

impl ResultSelection {
    /// Pick one result, or `None` when `results` is empty.
    pub fn select<'r>(
        self,
        results: &'r [SearchResult],
        hints: &SearchHints<'_>,
    ) -> Option<&'r SearchResult> {
        match self {
            ResultSelection::First => results.first(),
            ResultSelection::BestMatch => {
                let mut best: Option<(&SearchResult, u8)> = None;
                for result in results {
                    let score = score(result, hints);
                    // Strictly greater: ties keep the earlier result
                    if best.is_none_or(|(_, top)| score > top) {
                        best = Some((result, score));
                    }
                }
                best.map(|(result, _)| result)
            }
        }
    }
}

fn score(result: &SearchResult, hints: &SearchHints<'_>) -> u8 {
    let mut score = 0;

    if let (Some(remote), Some(local)) = (result.duration, hints.duration_secs)
        && (remote - local).abs() <= DURATION_TOLERANCE_SECS
    {
        score += DURATION_SCORE;
    }

    if let (Some(remote), Some(local)) = (result.album_name.as_deref(), hints.album)
        && remote.trim().eq_ignore_ascii_case(local.trim())
    {
        score += ALBUM_SCORE;
    }

    score
}
