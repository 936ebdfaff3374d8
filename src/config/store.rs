use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::debug;

type Groups = BTreeMap<String, BTreeMap<String, String>>;

/// Grouped key/value settings storage
///
/// Mirrors a host launcher's settings object: values are strings addressed by
/// a group name and a key. Writes may hit disk and can therefore fail.
pub trait ConfigStore {
    fn get(&self, group: &str, key: &str) -> Option<String>;

    fn set(&mut self, group: &str, key: &str, value: &str) -> Result<()>;
}

impl<T: ConfigStore + ?Sized> ConfigStore for &mut T {
    fn get(&self, group: &str, key: &str) -> Option<String> {
        (**self).get(group, key)
    }

    fn set(&mut self, group: &str, key: &str, value: &str) -> Result<()> {
        (**self).set(group, key, value)
    }
}

/// In-memory settings, never persisted
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryConfigStore {
    groups: Groups,
}

impl MemoryConfigStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ConfigStore for MemoryConfigStore {
    fn get(&self, group: &str, key: &str) -> Option<String> {
        self.groups.get(group).and_then(|values| values.get(key)).cloned()
    }

    fn set(&mut self, group: &str, key: &str, value: &str) -> Result<()> {
        self.groups
            .entry(group.to_string())
            .or_default()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Settings persisted as a JSON object of groups:
///
/// ```json
/// { "BookmarkIndex": { "bookmarkPath": "/home/alice/.config/chromium/Default/Bookmarks" } }
/// ```
///
/// Every `set` rewrites the file atomically (temp file + rename).
#[derive(Debug)]
pub struct JsonConfigStore {
    path: PathBuf,
    groups: Groups,
}

impl JsonConfigStore {
    /// Load settings from `path`; a missing file starts empty
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or is not a JSON
    /// object of string-valued groups.
    pub fn open(path: &Path) -> Result<Self> {
        let groups = if path.exists() {
            let json = fs::read_to_string(path)
                .with_context(|| format!("Failed to read settings file: {}", path.display()))?;
            serde_json::from_str(&json)
                .with_context(|| format!("Failed to parse settings file: {}", path.display()))?
        } else {
            debug!("Settings file {} not found, starting with defaults", path.display());
            Groups::new()
        };

        Ok(Self { path: path.to_path_buf(), groups })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).context("Failed to create settings directory")?;
        }

        let json =
            serde_json::to_string_pretty(&self.groups).context("Failed to serialize settings")?;
        let temp_path = self.path.with_extension("json.tmp");
        fs::write(&temp_path, json).context("Failed to write settings temp file")?;
        fs::rename(&temp_path, &self.path).context("Failed to rename settings temp file")?;
        Ok(())
    }
}

impl ConfigStore for JsonConfigStore {
    fn get(&self, group: &str, key: &str) -> Option<String> {
        self.groups.get(group).and_then(|values| values.get(key)).cloned()
    }

    fn set(&mut self, group: &str, key: &str, value: &str) -> Result<()> {
        self.groups
            .entry(group.to_string())
            .or_default()
            .insert(key.to_string(), value.to_string());
        self.flush()
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_memory_store_get_set() {
        let mut store = MemoryConfigStore::new();
        assert_eq!(store.get("BookmarkIndex", "bookmarkPath"), None);

        store.set("BookmarkIndex", "bookmarkPath", "/tmp/Bookmarks").unwrap();
        assert_eq!(store.get("BookmarkIndex", "bookmarkPath").as_deref(), Some("/tmp/Bookmarks"));

        // Groups are independent namespaces
        assert_eq!(store.get("Other", "bookmarkPath"), None);

        store.set("BookmarkIndex", "bookmarkPath", "/tmp/Other").unwrap();
        assert_eq!(store.get("BookmarkIndex", "bookmarkPath").as_deref(), Some("/tmp/Other"));
    }

    fn write_through<C: ConfigStore>(mut store: C) {
        store.set("g", "k", "v").unwrap();
        assert_eq!(store.get("g", "k").as_deref(), Some("v"));
    }

    #[test]
    fn test_mut_ref_forwards_to_store() {
        let mut store = MemoryConfigStore::new();
        write_through(&mut store);
        assert_eq!(store.get("g", "k").as_deref(), Some("v"));
    }

    #[test]
    fn test_json_store_missing_file_starts_empty() {
        let dir = TempDir::new().unwrap();
        let store = JsonConfigStore::open(&dir.path().join("settings.json")).unwrap();
        assert_eq!(store.get("BookmarkIndex", "searchMode"), None);
    }

    #[test]
    fn test_json_store_persists_across_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("settings.json");

        let mut store = JsonConfigStore::open(&path).unwrap();
        store.set("BookmarkIndex", "searchMode", "fuzzy").unwrap();
        assert!(path.exists(), "set should create the settings file and its directory");
        assert!(!path.with_extension("json.tmp").exists(), "temp file should be renamed away");

        let reopened = JsonConfigStore::open(&path).unwrap();
        assert_eq!(reopened.get("BookmarkIndex", "searchMode").as_deref(), Some("fuzzy"));
    }

    #[test]
    fn test_json_store_rejects_corrupt_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "{ not json").unwrap();

        let err = JsonConfigStore::open(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse settings file"));
    }
}
