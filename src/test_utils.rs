//! Test utilities and fixtures for lyrics-minder tests.
//!
//! Builds minimal but structurally valid audio files so extraction and
//! embedding run against real containers, and tags them through lofty.
//!
//! # Example
//!
//! ```ignore
//! use crate::test_utils::{write_mp3, tag_file};
//!
//! let dir = tempfile::tempdir().unwrap();
//! let path = dir.path().join("song.mp3");
//! write_mp3(&path);
//! tag_file(&path, TagType::Id3v2, Some("Title"), Some("Artist"), None);
//! ```

use std::path::Path;

use lofty::config::WriteOptions;
use lofty::picture::{MimeType, Picture, PictureType};
use lofty::tag::{Accessor, Tag, TagExt, TagType};

use crate::metadata::TrackIdentity;

/// MPEG-1 Layer III, 128 kbps, 44.1 kHz, joint stereo, no padding.
const MP3_FRAME_HEADER: [u8; 4] = [0xFF, 0xFB, 0x90, 0x64];
/// 144 * 128000 / 44100
const MP3_FRAME_LEN: usize = 417;

/// Write a silent 16-bit stereo PCM WAV of `seconds` length.
pub fn write_wav(path: &Path, seconds: u32) {
    let sample_rate: u32 = 44_100;
    let channels: u16 = 2;
    let bits: u16 = 16;
    let block_align = channels * bits / 8;
    let byte_rate = sample_rate * block_align as u32;
    let data_len = byte_rate * seconds;

    let mut buf = Vec::with_capacity(44 + data_len as usize);
    buf.extend_from_slice(b"RIFF");
    buf.extend_from_slice(&(36 + data_len).to_le_bytes());
    buf.extend_from_slice(b"WAVE");
    buf.extend_from_slice(b"fmt ");
    buf.extend_from_slice(&16u32.to_le_bytes());
    buf.extend_from_slice(&1u16.to_le_bytes()); // PCM
    buf.extend_from_slice(&channels.to_le_bytes());
    buf.extend_from_slice(&sample_rate.to_le_bytes());
    buf.extend_from_slice(&byte_rate.to_le_bytes());
    buf.extend_from_slice(&block_align.to_le_bytes());
    buf.extend_from_slice(&bits.to_le_bytes());
    buf.extend_from_slice(b"data");
    buf.extend_from_slice(&data_len.to_le_bytes());
    buf.resize(44 + data_len as usize, 0);

    std::fs::write(path, buf).expect("Failed to write WAV fixture");
}

/// Write an untagged MP3 made of silent constant-bitrate frames.
pub fn write_mp3(path: &Path) {
    let frames = 100;
    let mut buf = Vec::with_capacity(frames * MP3_FRAME_LEN);
    for _ in 0..frames {
        let start = buf.len();
        buf.extend_from_slice(&MP3_FRAME_HEADER);
        buf.resize(start + MP3_FRAME_LEN, 0);
    }
    std::fs::write(path, buf).expect("Failed to write MP3 fixture");
}

/// Write an untagged FLAC: STREAMINFO, a trailing PADDING block, then a
/// stub frame. Tag writers expect to find the padding at the end of the
/// metadata blocks.
pub fn write_flac(path: &Path, seconds: u64) {
    let sample_rate: u64 = 44_100;
    let channels: u64 = 2;
    let bits: u64 = 16;
    let total_samples = sample_rate * seconds;

    let mut buf = Vec::new();
    buf.extend_from_slice(b"fLaC");
    // STREAMINFO type (not last), 34 byte body
    buf.push(0x00);
    buf.extend_from_slice(&[0x00, 0x00, 0x22]);
    buf.extend_from_slice(&4096u16.to_be_bytes()); // min block size
    buf.extend_from_slice(&4096u16.to_be_bytes()); // max block size
    buf.extend_from_slice(&[0x00, 0x00, 0x00]); // min frame size (unknown)
    buf.extend_from_slice(&[0x00, 0x00, 0x00]); // max frame size (unknown)
    // 20 bits sample rate, 3 bits channels-1, 5 bits bps-1, 36 bits total samples
    let packed: u64 = (sample_rate << 44)
        | ((channels - 1) << 41)
        | ((bits - 1) << 36)
        | (total_samples & 0x0F_FFFF_FFFF);
    buf.extend_from_slice(&packed.to_be_bytes());
    buf.extend_from_slice(&[0u8; 16]); // MD5 (unset)

    // Last-metadata-block flag + PADDING type, 1024 byte body
    buf.extend_from_slice(&[0x81, 0x00, 0x04, 0x00]);
    buf.resize(buf.len() + 1024, 0);

    // Frame sync code followed by silence
    buf.extend_from_slice(&[0xFF, 0xF8, 0x69, 0x08, 0x00, 0x00]);
    buf.resize(buf.len() + 64, 0);

    std::fs::write(path, buf).expect("Failed to write FLAC fixture");
}

/// Write an untagged 16-bit stereo AIFF of `seconds` length.
pub fn write_aiff(path: &Path, seconds: u32) {
    let channels: u16 = 2;
    let bits: u16 = 16;
    let frames: u32 = 44_100 * seconds;
    let data_len = frames * u32::from(channels) * u32::from(bits / 8);

    let mut comm = Vec::with_capacity(18);
    comm.extend_from_slice(&channels.to_be_bytes());
    comm.extend_from_slice(&frames.to_be_bytes());
    comm.extend_from_slice(&bits.to_be_bytes());
    // 44100.0 as an 80-bit IEEE extended float
    comm.extend_from_slice(&[0x40, 0x0E, 0xAC, 0x44, 0, 0, 0, 0, 0, 0]);

    let ssnd_len = 8 + data_len;
    let form_len = 4 + (8 + comm.len() as u32) + (8 + ssnd_len);

    let mut buf = Vec::with_capacity(8 + form_len as usize);
    buf.extend_from_slice(b"FORM");
    buf.extend_from_slice(&form_len.to_be_bytes());
    buf.extend_from_slice(b"AIFF");
    buf.extend_from_slice(b"COMM");
    buf.extend_from_slice(&(comm.len() as u32).to_be_bytes());
    buf.extend_from_slice(&comm);
    buf.extend_from_slice(b"SSND");
    buf.extend_from_slice(&ssnd_len.to_be_bytes());
    buf.extend_from_slice(&0u32.to_be_bytes()); // offset
    buf.extend_from_slice(&0u32.to_be_bytes()); // block size
    buf.resize(buf.len() + data_len as usize, 0);

    std::fs::write(path, buf).expect("Failed to write AIFF fixture");
}

/// CRC-32 as used by Ogg pages: polynomial 0x04C11DB7, no reflection.
fn ogg_crc(data: &[u8]) -> u32 {
    let mut crc = 0u32;
    for &byte in data {
        crc ^= u32::from(byte) << 24;
        for _ in 0..8 {
            crc = if crc & 0x8000_0000 != 0 {
                (crc << 1) ^ 0x04C1_1DB7
            } else {
                crc << 1
            };
        }
    }
    crc
}

/// One Ogg page holding whole `packets`, each shorter than 255 bytes.
fn ogg_page(flags: u8, granule: u64, sequence: u32, packets: &[&[u8]]) -> Vec<u8> {
    let mut page = Vec::new();
    page.extend_from_slice(b"OggS");
    page.push(0); // version
    page.push(flags);
    page.extend_from_slice(&granule.to_le_bytes());
    page.extend_from_slice(&0x4C59_524Du32.to_le_bytes()); // stream serial
    page.extend_from_slice(&sequence.to_le_bytes());
    page.extend_from_slice(&[0; 4]); // checksum, filled in below
    page.push(packets.len() as u8);
    for packet in packets {
        page.push(packet.len() as u8);
    }
    for packet in packets {
        page.extend_from_slice(packet);
    }

    let crc = ogg_crc(&page);
    page[22..26].copy_from_slice(&crc.to_le_bytes());
    page
}

/// Write an untagged Ogg Vorbis stream of `seconds` length.
///
/// The header packets are well-formed; the single audio packet is not
/// decodable, which is enough for tag and duration reads.
pub fn write_ogg_vorbis(path: &Path, seconds: u64) {
    let mut ident = vec![0x01];
    ident.extend_from_slice(b"vorbis");
    ident.extend_from_slice(&0u32.to_le_bytes()); // version
    ident.push(2); // channels
    ident.extend_from_slice(&44_100u32.to_le_bytes());
    ident.extend_from_slice(&0i32.to_le_bytes()); // bitrate max
    ident.extend_from_slice(&128_000i32.to_le_bytes()); // bitrate nominal
    ident.extend_from_slice(&0i32.to_le_bytes()); // bitrate min
    ident.push(0xB8); // block sizes
    ident.push(0x01); // framing

    let vendor = b"lyrics-minder";
    let mut comment = vec![0x03];
    comment.extend_from_slice(b"vorbis");
    comment.extend_from_slice(&(vendor.len() as u32).to_le_bytes());
    comment.extend_from_slice(vendor);
    comment.extend_from_slice(&0u32.to_le_bytes()); // no comments
    comment.push(0x01); // framing

    let mut setup = vec![0x05];
    setup.extend_from_slice(b"vorbis");
    setup.extend_from_slice(&[0x00; 8]);

    let audio = [0u8; 32];

    let mut buf = ogg_page(0x02, 0, 0, &[&ident]);
    buf.extend(ogg_page(0x00, 0, 1, &[&comment, &setup]));
    buf.extend(ogg_page(0x04, 44_100 * seconds, 2, &[&audio]));

    std::fs::write(path, buf).expect("Failed to write Ogg fixture");
}

fn mp4_atom(name: &[u8; 4], body: &[u8]) -> Vec<u8> {
    let mut atom = Vec::with_capacity(8 + body.len());
    atom.extend_from_slice(&(8 + body.len() as u32).to_be_bytes());
    atom.extend_from_slice(name);
    atom.extend_from_slice(body);
    atom
}

/// Write an untagged M4A with one sound track of `seconds` length.
///
/// Only the atoms a tag reader walks are present: `ftyp`, then
/// `moov.trak.mdia` with `mdhd` and a `soun` handler, then `mdat`.
pub fn write_m4a(path: &Path, seconds: u32) {
    let timescale: u32 = 44_100;

    let mut ftyp = Vec::new();
    ftyp.extend_from_slice(b"M4A ");
    ftyp.extend_from_slice(&0u32.to_be_bytes());
    ftyp.extend_from_slice(b"M4A ");
    ftyp.extend_from_slice(b"isom");

    let mut mdhd = vec![0u8; 4]; // version 0, flags
    mdhd.extend_from_slice(&0u32.to_be_bytes()); // creation time
    mdhd.extend_from_slice(&0u32.to_be_bytes()); // modification time
    mdhd.extend_from_slice(&timescale.to_be_bytes());
    mdhd.extend_from_slice(&(timescale * seconds).to_be_bytes());
    mdhd.extend_from_slice(&0x55C4u16.to_be_bytes()); // "und"
    mdhd.extend_from_slice(&0u16.to_be_bytes());

    let mut hdlr = vec![0u8; 8]; // version, flags, pre-defined
    hdlr.extend_from_slice(b"soun");
    hdlr.extend_from_slice(&[0u8; 12]);
    hdlr.push(0); // empty name

    let mdia = [mp4_atom(b"mdhd", &mdhd), mp4_atom(b"hdlr", &hdlr)].concat();
    let trak = mp4_atom(b"mdia", &mdia);
    let moov = mp4_atom(b"trak", &trak);

    let buf = [
        mp4_atom(b"ftyp", &ftyp),
        mp4_atom(b"moov", &moov),
        mp4_atom(b"mdat", &[0u8; 64]),
    ]
    .concat();

    std::fs::write(path, buf).expect("Failed to write M4A fixture");
}

/// Write a one-second DSF, optionally with a trailing ID3v2 block.
pub fn write_dsf(path: &Path, tags: Option<(&str, &str, &str)>) {
    use crate::metadata::dsf::{DsfHeader, HEADER_LEN, encode_header};

    let sampling_frequency = 2_822_400;
    let audio = vec![0x69u8; 4096];

    let id3_block = tags.map(|(title, artist, album)| {
        use id3::TagLike;
        let mut tag = id3::Tag::new();
        tag.set_title(title);
        tag.set_artist(artist);
        tag.set_album(album);
        let mut out = Vec::new();
        tag.write_to(&mut out, id3::Version::Id3v24)
            .expect("Failed to encode ID3 block");
        out
    });

    let header_len = HEADER_LEN as u64;
    let metadata_offset = match id3_block {
        Some(_) => header_len + audio.len() as u64,
        None => 0,
    };
    let file_size = header_len + audio.len() as u64 + id3_block.as_ref().map_or(0, |b| b.len() as u64);

    let header = DsfHeader {
        metadata_offset,
        sampling_frequency,
        sample_count: sampling_frequency as u64,
    };
    let mut buf = encode_header(&header, file_size);
    buf.extend_from_slice(&audio);
    if let Some(block) = id3_block {
        buf.extend_from_slice(&block);
    }

    std::fs::write(path, buf).expect("Failed to write DSF fixture");
}

/// Replace the `tag_type` tag of an existing file with the given fields.
pub fn tag_file(
    path: &Path,
    tag_type: TagType,
    title: Option<&str>,
    artist: Option<&str>,
    album: Option<&str>,
) {
    let mut tag = Tag::new(tag_type);
    if let Some(title) = title {
        tag.set_title(title.to_string());
    }
    if let Some(artist) = artist {
        tag.set_artist(artist.to_string());
    }
    if let Some(album) = album {
        tag.set_album(album.to_string());
    }
    tag.save_to_path(path, WriteOptions::default())
        .expect("Failed to tag fixture");
}

/// Replace the ID3v2 tag of an mp3 fixture with one holding `pictures`.
pub fn attach_pictures(path: &Path, pictures: &[(PictureType, &[u8])]) {
    let mut tag = Tag::new(TagType::Id3v2);
    for (pic_type, data) in pictures {
        tag.push_picture(Picture::new_unchecked(
            *pic_type,
            Some(MimeType::Jpeg),
            None,
            data.to_vec(),
        ));
    }
    tag.save_to_path(path, WriteOptions::default())
        .expect("Failed to attach pictures");
}

/// A complete identity with sensible defaults.
pub fn mock_identity() -> TrackIdentity {
    TrackIdentity {
        title: Some("Test Track".to_string()),
        artist: Some("Test Artist".to_string()),
        album: Some("Test Album".to_string()),
        duration_secs: Some(180.0),
    }
}

/// A short LRC body.
pub fn sample_lrc(line: &str) -> String {
    format!("[00:01.00]{line}\n[00:05.50]second line\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use lofty::file::{AudioFile, TaggedFileExt};
    use lofty::probe::Probe;
    use tempfile::TempDir;

    #[test]
    fn test_wav_fixture_is_readable() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a.wav");
        write_wav(&path, 1);

        let tagged_file = Probe::open(&path).unwrap().read().unwrap();
        assert_eq!(tagged_file.properties().duration().as_secs(), 1);
    }

    #[test]
    fn test_mp3_fixture_accepts_tags() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a.mp3");
        write_mp3(&path);
        tag_file(&path, TagType::Id3v2, Some("T"), Some("A"), None);

        let tagged_file = Probe::open(&path).unwrap().read().unwrap();
        let tag = tagged_file.tag(TagType::Id3v2).unwrap();
        assert_eq!(tag.title().as_deref(), Some("T"));
    }

    #[test]
    fn test_flac_fixture_accepts_tags() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a.flac");
        write_flac(&path, 3);
        tag_file(&path, TagType::VorbisComments, Some("T"), Some("A"), None);
        tag_file(&path, TagType::VorbisComments, Some("T2"), Some("A"), None);

        let tagged_file = Probe::open(&path).unwrap().read().unwrap();
        assert_eq!(tagged_file.properties().duration().as_secs(), 3);
        let tag = tagged_file.tag(TagType::VorbisComments).unwrap();
        assert_eq!(tag.title().as_deref(), Some("T2"));
    }

    #[test]
    fn test_aiff_fixture_is_readable() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a.aiff");
        write_aiff(&path, 2);

        let tagged_file = Probe::open(&path).unwrap().read().unwrap();
        assert_eq!(tagged_file.file_type(), lofty::file::FileType::Aiff);
        assert_eq!(tagged_file.properties().duration().as_secs(), 2);
    }

    #[test]
    fn test_ogg_fixture_is_readable() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a.ogg");
        write_ogg_vorbis(&path, 4);

        let tagged_file = Probe::open(&path).unwrap().read().unwrap();
        assert_eq!(tagged_file.file_type(), lofty::file::FileType::Vorbis);
        assert_eq!(tagged_file.properties().duration().as_secs(), 4);
    }

    #[test]
    fn test_m4a_fixture_is_readable() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a.m4a");
        write_m4a(&path, 5);

        let tagged_file = Probe::open(&path).unwrap().read().unwrap();
        assert_eq!(tagged_file.file_type(), lofty::file::FileType::Mp4);
        assert_eq!(tagged_file.properties().duration().as_secs(), 5);
    }

    #[test]
    fn test_mock_identity_defaults() {
        let identity = mock_identity();
        assert_eq!(identity.lookup_key(), Some(("Test Track", "Test Artist")));
        assert_eq!(identity.album.as_deref(), Some("Test Album"));
    }
}
