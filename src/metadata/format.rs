//! Supported audio container formats.

use std::fmt;
use std::path::Path;

/// Audio containers walked by the scanner.
///
/// `Wav` carries no textual tags we read, and `Dsd` is never parsed at all
/// (filename fallback only).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AudioFormat {
    Mp3,
    Flac,
    M4a,
    Ogg,
    Aiff,
    Wav,
    Dsf,
    Dsd,
}

impl AudioFormat {
    pub const ALL: [AudioFormat; 8] = [
        AudioFormat::Mp3,
        AudioFormat::Flac,
        AudioFormat::M4a,
        AudioFormat::Ogg,
        AudioFormat::Aiff,
        AudioFormat::Wav,
        AudioFormat::Dsf,
        AudioFormat::Dsd,
    ];

    /// Lowercase file extension, without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            AudioFormat::Mp3 => "mp3",
            AudioFormat::Flac => "flac",
            AudioFormat::M4a => "m4a",
            AudioFormat::Ogg => "ogg",
            AudioFormat::Aiff => "aiff",
            AudioFormat::Wav => "wav",
            AudioFormat::Dsf => "dsf",
            AudioFormat::Dsd => "dsd",
        }
    }

    /// Case-insensitive extension lookup.
    pub fn from_extension(ext: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|format| format.extension().eq_ignore_ascii_case(ext))
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|s| s.to_str())
            .and_then(Self::from_extension)
    }

    /// Whether lyrics can be embedded in this container's tags.
    pub fn supports_embedding(self) -> bool {
        matches!(self, AudioFormat::Mp3 | AudioFormat::Aiff | AudioFormat::Flac)
    }
}

impl fmt::Display for AudioFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_path_is_case_insensitive() {
        assert_eq!(
            AudioFormat::from_path(Path::new("/music/a.MP3")),
            Some(AudioFormat::Mp3)
        );
        assert_eq!(
            AudioFormat::from_path(Path::new("Track.Flac")),
            Some(AudioFormat::Flac)
        );
        assert_eq!(
            AudioFormat::from_path(Path::new("x.dsd")),
            Some(AudioFormat::Dsd)
        );
    }

    #[test]
    fn test_unsupported_extensions() {
        assert_eq!(AudioFormat::from_path(Path::new("cover.jpg")), None);
        assert_eq!(AudioFormat::from_path(Path::new("song.lrc")), None);
        assert_eq!(AudioFormat::from_path(Path::new("README")), None);
        // Only the long form is recognized
        assert_eq!(AudioFormat::from_path(Path::new("song.aif")), None);
    }

    #[test]
    fn test_embedding_support() {
        let embeddable: Vec<_> = AudioFormat::ALL
            .into_iter()
            .filter(|f| f.supports_embedding())
            .collect();
        assert_eq!(
            embeddable,
            vec![AudioFormat::Mp3, AudioFormat::Flac, AudioFormat::Aiff]
        );
    }
}
