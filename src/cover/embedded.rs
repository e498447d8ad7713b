//! Read cover art embedded in audio file tags.
//!
//! Uses lofty to read picture data from:
//! - ID3v2 tags (MP3, AIFF)
//! - FLAC picture blocks
//! - MP4 atoms (M4A)

use std::path::Path;

use lofty::file::TaggedFileExt;
use lofty::picture::PictureType;
use lofty::probe::Probe;

/// Picture bytes pulled out of a tag. Always saved as `cover.jpg`,
/// whatever the source format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbeddedPicture {
    pub data: Vec<u8>,
}

/// The front cover of `path`, or its first picture if none is marked as
/// front cover.
///
/// `Ok(None)` when the file carries no pictures at all.
pub fn extract_embedded_cover(path: &Path) -> Result<Option<EmbeddedPicture>, String> {
    let tagged_file = Probe::open(path)
        .map_err(|e| e.to_string())?
        .read()
        .map_err(|e| e.to_string())?;

    let Some(tag) = tagged_file
        .primary_tag()
        .or_else(|| tagged_file.first_tag())
    else {
        return Ok(None);
    };

    let pictures = tag.pictures();
    let Some(picture) = pictures
        .iter()
        .find(|p| p.pic_type() == PictureType::CoverFront)
        .or_else(|| pictures.first())
    else {
        return Ok(None);
    };

    Ok(Some(EmbeddedPicture {
        data: picture.data().to_vec(),
    }))
}
