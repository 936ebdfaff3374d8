//! Cache metadata for staleness detection

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Cache schema version for invalidation on format changes
pub const CACHE_VERSION: u32 = 1;

/// Top-level cache metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexMetadata {
    pub version: u32,
    /// Bookmarks file the cached index was built from
    pub bookmark_path: PathBuf,
    /// `None` when the bookmarks file did not exist at indexing time
    pub bookmark_file: Option<BookmarkFileMetadata>,
    pub indexed_at: DateTime<Utc>,
    pub entry_count: usize,
}

/// Modification time and size of the bookmarks file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookmarkFileMetadata {
    pub mtime_secs: i64,
    pub size: u64,
}

impl BookmarkFileMetadata {
    /// Create metadata from file path
    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        let metadata = fs::metadata(path)?;
        let mtime = metadata.modified()?;
        let mtime_secs = mtime.duration_since(SystemTime::UNIX_EPOCH)?.as_secs() as i64;

        Ok(Self { mtime_secs, size: metadata.len() })
    }

    /// Check if file has changed (mtime or size differs)
    pub fn is_stale(&self, path: &Path) -> anyhow::Result<bool> {
        let current = Self::from_path(path)?;
        Ok(*self != current)
    }
}

impl IndexMetadata {
    /// Describe an index of `entry_count` bookmarks built from `bookmark_path` just now
    pub fn new(bookmark_path: &Path, entry_count: usize, indexed_at: DateTime<Utc>) -> Self {
        Self {
            version: CACHE_VERSION,
            bookmark_path: bookmark_path.to_path_buf(),
            bookmark_file: BookmarkFileMetadata::from_path(bookmark_path).ok(),
            indexed_at,
            entry_count,
        }
    }

    /// True when the cache no longer describes `bookmark_path`
    ///
    /// That is the case when it was built from a different file, or when the
    /// file appeared, disappeared or changed since indexing.
    pub fn is_stale(&self, bookmark_path: &Path) -> bool {
        if self.bookmark_path != bookmark_path {
            return true;
        }

        match &self.bookmark_file {
            Some(cached) => cached.is_stale(bookmark_path).unwrap_or(true),
            None => bookmark_path.exists(),
        }
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_fresh_metadata_is_not_stale() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("Bookmarks");
        fs::write(&path, "{}").unwrap();

        let metadata = IndexMetadata::new(&path, 0, Utc::now());
        assert_eq!(metadata.version, CACHE_VERSION);
        assert_eq!(metadata.bookmark_file.map(|f| f.size), Some(2));
        assert!(!metadata.is_stale(&path));
    }

    #[test]
    fn test_changed_size_is_stale() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("Bookmarks");
        fs::write(&path, "{}").unwrap();
        let metadata = IndexMetadata::new(&path, 0, Utc::now());

        fs::write(&path, r#"{"roots":{}}"#).unwrap();
        assert!(metadata.is_stale(&path));
    }

    #[test]
    fn test_other_path_is_stale() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("Bookmarks");
        let other = dir.path().join("Other");
        fs::write(&path, "{}").unwrap();
        fs::write(&other, "{}").unwrap();

        let metadata = IndexMetadata::new(&path, 0, Utc::now());
        assert!(metadata.is_stale(&other));
    }

    #[test]
    fn test_missing_file_tracking() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("Bookmarks");

        // Indexed while the file was absent: fresh until it appears
        let metadata = IndexMetadata::new(&path, 0, Utc::now());
        assert!(metadata.bookmark_file.is_none());
        assert!(!metadata.is_stale(&path));

        fs::write(&path, "{}").unwrap();
        assert!(metadata.is_stale(&path));

        // Indexed while present: stale once it disappears
        let present = IndexMetadata::new(&path, 0, Utc::now());
        fs::remove_file(&path).unwrap();
        assert!(present.is_stale(&path));
    }

    #[test]
    fn test_metadata_json_round_trip() {
        let metadata = IndexMetadata {
            version: CACHE_VERSION,
            bookmark_path: PathBuf::from("/home/alice/.config/chromium/Default/Bookmarks"),
            bookmark_file: Some(BookmarkFileMetadata { mtime_secs: 1_700_000_000, size: 1234 }),
            indexed_at: DateTime::from_timestamp(1_700_000_100, 0).unwrap(),
            entry_count: 42,
        };

        let json = serde_json::to_string(&metadata).unwrap();
        let parsed: IndexMetadata = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, metadata);
    }
}
