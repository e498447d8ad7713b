//! Resolve a track identity from tags, falling back to the filename.

use std::path::Path;

use tracing::{debug, warn};

use super::{FormatRegistry, TrackIdentity, clean_value};

/// Separator between artist and title in `Artist - Title.ext` filenames.
pub const FILENAME_SEPARATOR: &str = " - ";

/// Combines tag extraction with filename parsing.
pub struct MetadataResolver {
    registry: FormatRegistry,
}

impl MetadataResolver {
    pub fn new(registry: FormatRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &FormatRegistry {
        &self.registry
    }

    /// Resolve the identity of `path`. Never fails.
    ///
    /// Tag read errors are logged and treated as "no tags". If title or
    /// artist is still missing afterwards, the filename fills the gaps
    /// without overriding any tag-derived value. Album and duration have no
    /// fallback.
    pub fn resolve(&self, path: &Path) -> TrackIdentity {
        let tags = match self.registry.format_of(path) {
            Some(format) => match self.registry.extract(path, format) {
                Ok(tags) => tags,
                Err(e) => {
                    warn!(
                        target: "metadata::resolve",
                        path = %path.display(),
                        error = %e,
                        "Could not parse tags, falling back to filename"
                    );
                    Default::default()
                }
            },
            None => Default::default(),
        };

        let mut identity = TrackIdentity::from(tags);
        if identity.title.is_none() || identity.artist.is_none() {
            apply_filename_fallback(&mut identity, path);
        }

        debug!(
            target: "metadata::resolve",
            path = %path.display(),
            title = ?identity.title,
            artist = ?identity.artist,
            album = ?identity.album,
            duration = ?identity.duration_secs,
            "Resolved identity"
        );
        identity
    }
}

impl Default for MetadataResolver {
    fn default() -> Self {
        Self::new(FormatRegistry::with_defaults())
    }
}

/// Parse a file stem into `(artist, title)` candidates.
///
/// `"Artist - Title"` splits on the first separator; anything else is a
/// bare title.
pub fn parse_filename(stem: &str) -> (Option<String>, Option<String>) {
    match stem.split_once(FILENAME_SEPARATOR) {
        Some((artist, title)) => (clean_value(artist), clean_value(title)),
        None => (None, clean_value(stem)),
    }
}

/// Fill still-empty title/artist from the filename of `path`.
pub fn apply_filename_fallback(identity: &mut TrackIdentity, path: &Path) {
    let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
        return;
    };

    let (artist, title) = parse_filename(stem);
    if identity.artist.is_none() {
        identity.artist = artist;
    }
    if identity.title.is_none() {
        identity.title = title;
    }
}
