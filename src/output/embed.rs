//! Embed lyrics into the audio file's own tags.
//!
//! - mp3 / aiff: ID3v2 `USLT` frame, language `eng`, empty description
//! - flac: Vorbis `LYRICS` comment
//!
//! Any previous lyrics value is replaced, never duplicated. Other formats
//! are rejected with [`WriteError::UnsupportedFormat`].

use std::path::Path;

use id3::TagLike;
use lofty::config::WriteOptions;
use lofty::file::{TaggedFile, TaggedFileExt};
use lofty::probe::Probe;
use lofty::tag::{ItemKey, ItemValue, Tag, TagExt, TagItem, TagType};
use tracing::{debug, info};

use super::{OutputArtifact, OutputMode, OutputWriter, WriteError};
use crate::lyrics::LyricsPayload;
use crate::metadata::AudioFormat;

/// ISO-639-2 language of the USLT frame.
pub const LYRICS_LANGUAGE: &str = "eng";

#[derive(Debug, Clone, Copy, Default)]
pub struct EmbedWriter;

impl EmbedWriter {
    /// The tag container lyrics go into for `format`.
    pub fn tag_type_for(format: AudioFormat) -> Option<TagType> {
        match format {
            AudioFormat::Mp3 | AudioFormat::Aiff => Some(TagType::Id3v2),
            AudioFormat::Flac => Some(TagType::VorbisComments),
            _ => None,
        }
    }
}

impl OutputWriter for EmbedWriter {
    fn mode(&self) -> OutputMode {
        OutputMode::Embed
    }

    fn target(&self, audio_path: &Path) -> OutputArtifact {
        OutputArtifact::Embedded(audio_path.to_path_buf())
    }

    fn check(&self, audio_path: &Path, format: AudioFormat) -> Result<(), WriteError> {
        Self::tag_type_for(format).map(|_| ()).ok_or_else(|| WriteError::UnsupportedFormat {
            path: audio_path.to_path_buf(),
            format,
        })
    }

    fn write(
        &self,
        audio_path: &Path,
        format: AudioFormat,
        lyrics: &LyricsPayload,
    ) -> Result<OutputArtifact, WriteError> {
        let Some(tag_type) = Self::tag_type_for(format) else {
            return Err(WriteError::UnsupportedFormat {
                path: audio_path.to_path_buf(),
                format,
            });
        };

        // Refuse anything lofty cannot parse as audio before touching it
        let tagged_file = Probe::open(audio_path)
            .map_err(|e| tag_error(audio_path, format!("Failed to open file for embedding: {e}")))?
            .read()
            .map_err(|e| tag_error(audio_path, format!("Failed to read file for embedding: {e}")))?;

        match tag_type {
            TagType::Id3v2 => write_uslt(audio_path, lyrics)?,
            _ => write_generic(tagged_file, tag_type, audio_path, lyrics)?,
        }

        info!(target: "output::embed", path = %audio_path.display(), "Embedded lyrics");
        Ok(OutputArtifact::Embedded(audio_path.to_path_buf()))
    }
}

fn tag_error(audio_path: &Path, message: String) -> WriteError {
    WriteError::Tag {
        path: audio_path.to_path_buf(),
        message,
    }
}

/// Replace every USLT frame with a single `eng` one.
///
/// lofty's generic ID3v2 conversion drops the item language, so the frame
/// is written through `id3` directly. `write_to_path` handles both a bare
/// mp3 and the `ID3 ` chunk of an AIFF container.
fn write_uslt(audio_path: &Path, lyrics: &LyricsPayload) -> Result<(), WriteError> {
    let existing = id3::no_tag_ok(id3::Tag::read_from_path(audio_path))
        .map_err(|e| tag_error(audio_path, format!("Failed to read ID3v2 tag: {e}")))?;
    let mut tag = existing.unwrap_or_else(|| {
        debug!(target: "output::embed", path = %audio_path.display(), "Creating ID3v2 tag");
        id3::Tag::new()
    });

    tag.remove_all_lyrics();
    tag.add_frame(id3::frame::Lyrics {
        lang: LYRICS_LANGUAGE.to_string(),
        description: String::new(),
        text: lyrics.as_str().to_string(),
    });

    tag.write_to_path(audio_path, id3::Version::Id3v24)
        .map_err(|e| tag_error(audio_path, format!("Failed to write tags to file: {e}")))
}

fn write_generic(
    mut tagged_file: TaggedFile,
    tag_type: TagType,
    audio_path: &Path,
    lyrics: &LyricsPayload,
) -> Result<(), WriteError> {
    // Create the container if the file has none yet
    if tagged_file.tag(tag_type).is_none() {
        debug!(
            target: "output::embed",
            path = %audio_path.display(),
            tag_type = ?tag_type,
            "Creating tag container"
        );
        tagged_file.insert_tag(Tag::new(tag_type));
    }

    let tag = tagged_file.tag_mut(tag_type).ok_or_else(|| {
        tag_error(audio_path, format!("File does not support {tag_type:?} tags"))
    })?;

    // `insert` drops every existing item with the same key first
    let item = TagItem::new(ItemKey::Lyrics, ItemValue::Text(lyrics.as_str().to_string()));
    if !tag.insert(item) {
        return Err(tag_error(audio_path, format!("{tag_type:?} tags cannot hold lyrics")));
    }

    tag.save_to_path(audio_path, WriteOptions::default())
        .map_err(|e| tag_error(audio_path, format!("Failed to write tags to file: {e}")))
}
