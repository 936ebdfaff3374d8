//! Persistent index storage
//!
//! Two layers:
//! - [`codec`]: the binary stream a [`BookmarkIndex`](crate::service::BookmarkIndex) serializes
//!   to and restores from, with a magic/version prefix and bounds-checked reads
//! - [`persistence`]: cache files on disk holding that stream plus JSON metadata used to detect
//!   a changed bookmarks file
//!
//! Cache location: platform-specific cache directories
//! - macOS: `~/Library/Caches/bookmark-index/`
//! - Linux: `~/.cache/bookmark-index/`
//! - Windows: `%LOCALAPPDATA%\bookmark-index\`

pub mod codec;
pub mod metadata;
pub mod persistence;

pub use codec::{CodecError, DecodedIndex, FORMAT_VERSION, MAGIC, MAX_SERIALIZED_ENTRIES};
pub use codec::{decode_index, encode_index};
pub use metadata::{BookmarkFileMetadata, CACHE_VERSION, IndexMetadata};
pub use persistence::{CachedIndex, default_cache_dir, load_index, save_index};
