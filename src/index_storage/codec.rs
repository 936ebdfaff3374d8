//! Binary stream format for a serialized bookmark index
//!
//! ```text
//! magic    [u8; 4]   "BMIX"
//! version  u32       FORMAT_VERSION
//! count    i32       number of entries
//! mode     i32       SearchMode tag
//! count x  { title: string, url: string }
//! ```
//!
//! Integers are fixed-width little-endian; strings are a u64 byte length followed by UTF-8.
//! Decoding validates every header field before trusting it and never pre-allocates more than a
//! small fixed number of entries, so a corrupt or hostile stream is rejected instead of
//! producing a garbage index.

use std::io::{Read, Write};

use bincode::config::{self, Config};
use bincode::error::{DecodeError, EncodeError};
use thiserror::Error;

use crate::models::{BookmarkEntry, SearchMode};

pub const MAGIC: [u8; 4] = *b"BMIX";
pub const FORMAT_VERSION: u32 = 1;

/// Maximum entry count accepted in either direction
pub const MAX_SERIALIZED_ENTRIES: usize = 1_000_000;

/// Maximum encoded size of a single entry (security: bounds allocations driven by string lengths)
const MAX_ENTRY_BYTES: usize = 16 * 1024 * 1024;

/// Entries reserved up front regardless of the declared count
const PREALLOCATE_ENTRIES: usize = 4096;

/// Length prefixes of the two string fields
const ENTRY_OVERHEAD_BYTES: usize = 2 * std::mem::size_of::<u64>();

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("not a bookmark index stream (magic {0:?})")]
    BadMagic([u8; 4]),
    #[error("unsupported bookmark index format version {0}")]
    UnsupportedVersion(u32),
    #[error("invalid bookmark entry count {0}")]
    InvalidEntryCount(i64),
    #[error("invalid search mode tag {0}")]
    InvalidSearchMode(i32),
    #[error("bookmark entry {position} is too large to serialize ({bytes} bytes)")]
    EntryTooLarge { position: usize, bytes: usize },
    #[error("failed to encode bookmark index")]
    Encode(#[from] EncodeError),
    #[error("failed to decode bookmark index")]
    Decode(#[from] DecodeError),
}

/// Result of decoding a stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedIndex {
    pub entries: Vec<BookmarkEntry>,
    pub mode: SearchMode,
}

fn codec_config() -> impl Config {
    config::standard()
        .with_little_endian()
        .with_fixed_int_encoding()
        .with_limit::<MAX_ENTRY_BYTES>()
}

/// Write `entries` and `mode` to `writer`
///
/// # Errors
///
/// Fails without writing anything if there are more than [`MAX_SERIALIZED_ENTRIES`] entries or
/// one entry would not decode again, and with [`CodecError::Encode`] if the writer fails.
pub fn encode_index<W: Write>(
    entries: &[BookmarkEntry],
    mode: SearchMode,
    writer: &mut W,
) -> Result<(), CodecError> {
    if entries.len() > MAX_SERIALIZED_ENTRIES {
        return Err(CodecError::InvalidEntryCount(entries.len() as i64));
    }
    if let Some((position, bytes)) = entries
        .iter()
        .map(|entry| entry.title.len() + entry.url.len() + ENTRY_OVERHEAD_BYTES)
        .enumerate()
        .find(|(_, bytes)| *bytes > MAX_ENTRY_BYTES)
    {
        return Err(CodecError::EntryTooLarge { position, bytes });
    }

    let config = codec_config();
    bincode::encode_into_std_write(MAGIC, writer, config)?;
    bincode::encode_into_std_write(FORMAT_VERSION, writer, config)?;
    bincode::encode_into_std_write(entries.len() as i32, writer, config)?;
    bincode::encode_into_std_write(mode.tag(), writer, config)?;
    for entry in entries {
        bincode::serde::encode_into_std_write(entry, writer, config)?;
    }
    Ok(())
}

/// Read a stream written by [`encode_index`]
///
/// # Errors
///
/// Returns a [`CodecError`] describing the first field that is missing, truncated or out of
/// range.
pub fn decode_index<R: Read>(reader: &mut R) -> Result<DecodedIndex, CodecError> {
    let config = codec_config();

    let magic: [u8; 4] = bincode::decode_from_std_read(reader, config)?;
    if magic != MAGIC {
        return Err(CodecError::BadMagic(magic));
    }

    let version: u32 = bincode::decode_from_std_read(reader, config)?;
    if version != FORMAT_VERSION {
        return Err(CodecError::UnsupportedVersion(version));
    }

    let declared_count: i32 = bincode::decode_from_std_read(reader, config)?;
    let count = usize::try_from(declared_count)
        .ok()
        .filter(|count| *count <= MAX_SERIALIZED_ENTRIES)
        .ok_or(CodecError::InvalidEntryCount(i64::from(declared_count)))?;

    let tag: i32 = bincode::decode_from_std_read(reader, config)?;
    let mode = SearchMode::from_tag(tag).ok_or(CodecError::InvalidSearchMode(tag))?;

    let mut entries = Vec::with_capacity(count.min(PREALLOCATE_ENTRIES));
    for _ in 0..count {
        let entry: BookmarkEntry = bincode::serde::decode_from_std_read(reader, config)?;
        entries.push(entry);
    }

    Ok(DecodedIndex { entries, mode })
}
