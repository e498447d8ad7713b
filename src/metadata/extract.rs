//! Per-container tag extraction.
//!
//! Each supported [`AudioFormat`] has exactly one [`TagExtractor`] registered
//! in a [`FormatRegistry`]. Adding a format means registering one more
//! extractor, nothing else changes.
//!
//! | Format | Tag container | title / artist / album |
//! |---|---|---|
//! | mp3, aiff | ID3v2 | `TIT2` / `TPE1` / `TALB` |
//! | flac, ogg | Vorbis comments | `TITLE` / `ARTIST` / `ALBUM` |
//! | m4a | MP4 ilst | `©nam` / `©ART` / `©alb` |
//! | dsf | ID3v2 (trailing block) | `TIT2` / `TPE1` / `TALB` |
//! | wav | none, stream info only | |
//! | dsd | never opened | |

use std::collections::HashMap;
use std::fs::File;
use std::io::{Seek, SeekFrom};
use std::path::Path;

use id3::TagLike;
use lofty::file::{AudioFile, TaggedFileExt};
use lofty::probe::Probe;
use lofty::tag::{Accessor, TagType};
use tracing::debug;

use super::dsf;
use super::{AudioFormat, RawTags, TagReadError, clean_value};

/// Reads raw tag fields from one kind of container.
///
/// Missing fields (or a missing tag container) are not errors; they come
/// back as `None`. Only unreadable or malformed files produce an error.
pub trait TagExtractor: Send + Sync {
    fn extract(&self, path: &Path) -> Result<RawTags, TagReadError>;
}

/// Reads one native tag type through lofty, plus the stream duration.
#[derive(Debug, Clone, Copy)]
pub struct NativeTagExtractor {
    tag_type: TagType,
}

impl NativeTagExtractor {
    pub fn new(tag_type: TagType) -> Self {
        Self { tag_type }
    }

    pub fn tag_type(&self) -> TagType {
        self.tag_type
    }
}

impl TagExtractor for NativeTagExtractor {
    fn extract(&self, path: &Path) -> Result<RawTags, TagReadError> {
        let tagged_file = Probe::open(path)
            .map_err(|e| TagReadError::open(path, e))?
            .guess_file_type()
            .map_err(|e| TagReadError::open(path, e))?
            .read()
            .map_err(|e| TagReadError::read(path, e))?;

        let duration = tagged_file.properties().duration().as_secs_f64();
        let mut tags = RawTags {
            duration_secs: (duration > 0.0).then_some(duration),
            ..Default::default()
        };

        match tagged_file.tag(self.tag_type) {
            Some(tag) => {
                tags.title = tag.title().and_then(clean_value);
                tags.artist = tag.artist().and_then(clean_value);
                tags.album = tag.album().and_then(clean_value);
            }
            None => {
                debug!(
                    target: "metadata::extract",
                    path = %path.display(),
                    tag_type = ?self.tag_type,
                    "No tag container present"
                );
            }
        }

        Ok(tags)
    }
}

/// Reads stream properties only. Used for WAV, whose tags are never parsed.
#[derive(Debug, Clone, Copy, Default)]
pub struct StreamInfoExtractor;

impl TagExtractor for StreamInfoExtractor {
    fn extract(&self, path: &Path) -> Result<RawTags, TagReadError> {
        let tagged_file = Probe::open(path)
            .map_err(|e| TagReadError::open(path, e))?
            .read()
            .map_err(|e| TagReadError::read(path, e))?;

        let duration = tagged_file.properties().duration().as_secs_f64();
        Ok(RawTags {
            duration_secs: (duration > 0.0).then_some(duration),
            ..Default::default()
        })
    }
}

/// Reads the DSF header for duration and the trailing ID3v2 block for tags.
#[derive(Debug, Clone, Copy, Default)]
pub struct DsfExtractor;

impl TagExtractor for DsfExtractor {
    fn extract(&self, path: &Path) -> Result<RawTags, TagReadError> {
        let mut file = File::open(path).map_err(|e| TagReadError::open(path, e))?;
        let header = dsf::read_header(&mut file).map_err(|e| TagReadError::dsf(path, e))?;

        let mut tags = RawTags {
            duration_secs: header.duration_secs(),
            ..Default::default()
        };

        if header.metadata_offset == 0 {
            return Ok(tags);
        }

        file.seek(SeekFrom::Start(header.metadata_offset))
            .map_err(|e| TagReadError::dsf(path, e))?;

        match id3::Tag::read_from2(&mut file) {
            Ok(id3_tag) => {
                tags.title = id3_tag.title().and_then(clean_value);
                tags.artist = id3_tag.artist().and_then(clean_value);
                tags.album = id3_tag.album().and_then(clean_value);
            }
            Err(e) if matches!(e.kind, id3::ErrorKind::NoTag) => {
                debug!(target: "metadata::extract", path = %path.display(), "DSF has no ID3v2 block");
            }
            Err(e) => return Err(TagReadError::read(path, e)),
        }

        Ok(tags)
    }
}

/// Never touches the file. DSD has no tag reader, so identity comes from
/// the filename alone.
#[derive(Debug, Clone, Copy, Default)]
pub struct FilenameOnlyExtractor;

impl TagExtractor for FilenameOnlyExtractor {
    fn extract(&self, _path: &Path) -> Result<RawTags, TagReadError> {
        Ok(RawTags::default())
    }
}

/// Maps each [`AudioFormat`] to its extractor.
pub struct FormatRegistry {
    extractors: HashMap<AudioFormat, Box<dyn TagExtractor>>,
}

impl FormatRegistry {
    pub fn empty() -> Self {
        Self {
            extractors: HashMap::new(),
        }
    }

    /// Registry with one extractor for every supported format.
    pub fn with_defaults() -> Self {
        let mut registry = Self::empty();
        registry.register(AudioFormat::Mp3, NativeTagExtractor::new(TagType::Id3v2));
        registry.register(AudioFormat::Flac, NativeTagExtractor::new(TagType::VorbisComments));
        registry.register(AudioFormat::M4a, NativeTagExtractor::new(TagType::Mp4Ilst));
        registry.register(AudioFormat::Ogg, NativeTagExtractor::new(TagType::VorbisComments));
        registry.register(AudioFormat::Aiff, NativeTagExtractor::new(TagType::Id3v2));
        registry.register(AudioFormat::Wav, StreamInfoExtractor);
        registry.register(AudioFormat::Dsf, DsfExtractor);
        registry.register(AudioFormat::Dsd, FilenameOnlyExtractor);
        registry
    }

    /// Register (or replace) the extractor for a format.
    pub fn register(&mut self, format: AudioFormat, extractor: impl TagExtractor + 'static) {
        self.extractors.insert(format, Box::new(extractor));
    }

    pub fn extractor(&self, format: AudioFormat) -> Option<&dyn TagExtractor> {
        self.extractors.get(&format).map(|e| e.as_ref())
    }

    /// The format of `path`, if it has an extractor registered.
    pub fn format_of(&self, path: &Path) -> Option<AudioFormat> {
        AudioFormat::from_path(path).filter(|f| self.extractors.contains_key(f))
    }

    /// Extract tags with the extractor registered for `format`.
    ///
    /// An unregistered format yields empty tags.
    pub fn extract(&self, path: &Path, format: AudioFormat) -> Result<RawTags, TagReadError> {
        match self.extractor(format) {
            Some(extractor) => extractor.extract(path),
            None => Ok(RawTags::default()),
        }
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
