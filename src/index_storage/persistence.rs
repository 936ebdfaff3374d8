//! Cache persistence: load/save with atomic writes

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::{debug, info};

use super::metadata::{CACHE_VERSION, IndexMetadata};

const CACHE_DIR_NAME: &str = "bookmark-index";
const METADATA_FILENAME: &str = "index-metadata.json";
const INDEX_FILENAME: &str = "bookmark-index.bin";

/// A cached index stream together with its metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedIndex {
    pub metadata: IndexMetadata,
    /// Stream in the [`codec`](super::codec) format
    pub bytes: Vec<u8>,
}

/// Get platform-specific cache directory
pub fn default_cache_dir() -> Result<PathBuf> {
    let cache_base = dirs::cache_dir().context("Failed to get platform cache directory")?;
    Ok(cache_base.join(CACHE_DIR_NAME))
}

/// Load the cached index stream for `bookmark_path`
///
/// Returns `None` if the cache is missing, was written by another cache
/// version, or the bookmarks file changed since it was written (caller should
/// rebuild).
///
/// # Errors
///
/// Returns an error if the cache files exist but cannot be read or the
/// metadata is not valid JSON.
pub fn load_index(cache_dir: &Path, bookmark_path: &Path) -> Result<Option<CachedIndex>> {
    let metadata_path = cache_dir.join(METADATA_FILENAME);
    let index_path = cache_dir.join(INDEX_FILENAME);

    if !metadata_path.exists() || !index_path.exists() {
        debug!("No cached index in {}", cache_dir.display());
        return Ok(None);
    }

    let metadata_json =
        fs::read_to_string(&metadata_path).context("Failed to read metadata file")?;
    let metadata: IndexMetadata =
        serde_json::from_str(&metadata_json).context("Failed to parse metadata JSON")?;

    if metadata.version != CACHE_VERSION {
        info!(
            "Cache version mismatch (expected {}, found {}), rebuilding index",
            CACHE_VERSION, metadata.version
        );
        return Ok(None);
    }

    if metadata.is_stale(bookmark_path) {
        info!("Bookmarks file {} changed since last index, rebuilding", bookmark_path.display());
        return Ok(None);
    }

    let bytes = fs::read(&index_path).context("Failed to read index file")?;
    Ok(Some(CachedIndex { metadata, bytes }))
}

/// Save an index stream and its metadata atomically
pub fn save_index(cache_dir: &Path, metadata: &IndexMetadata, bytes: &[u8]) -> Result<()> {
    fs::create_dir_all(cache_dir).context("Failed to create cache directory")?;

    // Index first: metadata pointing at a half-written stream must never be visible
    let index_path = cache_dir.join(INDEX_FILENAME);
    let index_temp = cache_dir.join(format!("{}.tmp", INDEX_FILENAME));
    fs::write(&index_temp, bytes).context("Failed to write index temp file")?;
    fs::rename(&index_temp, &index_path).context("Failed to rename index temp file")?;

    let metadata_path = cache_dir.join(METADATA_FILENAME);
    let metadata_temp = cache_dir.join(format!("{}.tmp", METADATA_FILENAME));
    let metadata_json =
        serde_json::to_string_pretty(metadata).context("Failed to serialize metadata")?;
    fs::write(&metadata_temp, metadata_json).context("Failed to write metadata temp file")?;
    fs::rename(&metadata_temp, &metadata_path).context("Failed to rename metadata temp file")?;

    debug!("Saved {} cached bookmarks to {}", metadata.entry_count, cache_dir.display());
    Ok(())
}
