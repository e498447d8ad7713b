//! DSF (DSD Stream File) container header.
//!
//! Layout, all integers little-endian:
//!
//! ```text
//! 0   "DSD "  chunk id
//! 4   u64     chunk size (28)
//! 12  u64     total file size
//! 20  u64     offset of the ID3v2 metadata block (0 = none)
//! 28  "fmt "  chunk id
//! 32  u64     chunk size (52)
//! 40  u32     format version
//! 44  u32     format id
//! 48  u32     channel type
//! 52  u32     channel count
//! 56  u32     sampling frequency
//! 60  u32     bits per sample
//! 64  u64     sample count (per channel)
//! ```

use std::io::{self, Read};

pub(crate) const HEADER_LEN: usize = 72;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct DsfHeader {
    pub metadata_offset: u64,
    pub sampling_frequency: u32,
    pub sample_count: u64,
}

impl DsfHeader {
    pub fn duration_secs(&self) -> Option<f64> {
        if self.sampling_frequency == 0 || self.sample_count == 0 {
            return None;
        }
        Some(self.sample_count as f64 / self.sampling_frequency as f64)
    }
}

pub(crate) fn read_header(reader: &mut impl Read) -> io::Result<DsfHeader> {
    let mut buf = [0u8; HEADER_LEN];
    reader.read_exact(&mut buf)?;

    if &buf[0..4] != b"DSD " {
        return Err(invalid("missing DSD chunk"));
    }
    if &buf[28..32] != b"fmt " {
        return Err(invalid("missing fmt chunk"));
    }

    Ok(DsfHeader {
        metadata_offset: u64_at(&buf, 20),
        sampling_frequency: u32_at(&buf, 56),
        sample_count: u64_at(&buf, 64),
    })
}

fn u32_at(buf: &[u8], offset: usize) -> u32 {
    let mut bytes = [0u8; 4];
    bytes.copy_from_slice(&buf[offset..offset + 4]);
    u32::from_le_bytes(bytes)
}

fn u64_at(buf: &[u8], offset: usize) -> u64 {
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&buf[offset..offset + 8]);
    u64::from_le_bytes(bytes)
}

fn invalid(message: &str) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, message.to_string())
}

/// Serialize a header (test fixtures only).
#[cfg(test)]
pub(crate) fn encode_header(header: &DsfHeader, file_size: u64) -> Vec<u8> {
    let mut buf = Vec::with_capacity(HEADER_LEN);
    buf.extend_from_slice(b"DSD ");
    buf.extend_from_slice(&28u64.to_le_bytes());
    buf.extend_from_slice(&file_size.to_le_bytes());
    buf.extend_from_slice(&header.metadata_offset.to_le_bytes());
    buf.extend_from_slice(b"fmt ");
    buf.extend_from_slice(&52u64.to_le_bytes());
    buf.extend_from_slice(&1u32.to_le_bytes()); // format version
    buf.extend_from_slice(&0u32.to_le_bytes()); // DSD raw
    buf.extend_from_slice(&2u32.to_le_bytes()); // stereo
    buf.extend_from_slice(&2u32.to_le_bytes());
    buf.extend_from_slice(&header.sampling_frequency.to_le_bytes());
    buf.extend_from_slice(&1u32.to_le_bytes());
    buf.extend_from_slice(&header.sample_count.to_le_bytes());
    buf
}
