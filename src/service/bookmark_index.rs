use std::cell::OnceCell;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use anyhow::Result;
use chrono::{DateTime, Utc};
use log::{debug, info, warn};

use crate::config::{
    BOOKMARK_PATH_KEY, ConfigStore, SEARCH_MODE_KEY, SETTINGS_GROUP, default_bookmark_path,
};
use crate::index_storage::{CodecError, decode_index, encode_index};
use crate::indexer;
use crate::models::{BookmarkEntry, SearchMode};
use crate::search::SearchPreparer;
use crate::widget::{SettingsView, SettingsWidget};

/// Flat, searchable index of browser bookmarks
///
/// Settings are read from and written to the injected [`ConfigStore`]; every
/// change to the corpus or the search mode is forwarded to the
/// [`SearchPreparer`].
///
/// # Lifecycle
///
/// A host calls [`initialize`](Self::initialize) once at load. Later runs can
/// skip parsing by restoring a stream written by [`serialize`](Self::serialize)
/// through [`deserialize`](Self::deserialize).
///
/// # Examples
///
/// ```no_run
/// use bookmark_index::{BookmarkIndex, BookmarkSearcher, MemoryConfigStore};
///
/// let mut index = BookmarkIndex::new(MemoryConfigStore::new(), BookmarkSearcher::new());
/// index.initialize()?;
/// for entry in index.search("rust") {
///     println!("{} {}", entry.title, entry.url);
/// }
/// # Ok::<(), anyhow::Error>(())
/// ```
pub struct BookmarkIndex<C: ConfigStore, P: SearchPreparer> {
    config: C,
    preparer: P,
    entries: Vec<BookmarkEntry>,
    search_mode: SearchMode,
    indexed_at: Option<DateTime<Utc>>,
    default_bookmark_path: Option<PathBuf>,
    widget: OnceCell<SettingsWidget>,
}

impl<C: ConfigStore, P: SearchPreparer> BookmarkIndex<C, P> {
    /// Create an empty index, taking the search mode from `config` if set
    pub fn new(config: C, preparer: P) -> Self {
        let search_mode = match config.get(SETTINGS_GROUP, SEARCH_MODE_KEY) {
            Some(value) => value.parse().unwrap_or_else(|e| {
                warn!("Ignoring configured search mode: {}", e);
                SearchMode::default()
            }),
            None => SearchMode::default(),
        };

        Self {
            config,
            preparer,
            entries: Vec::new(),
            search_mode,
            indexed_at: None,
            default_bookmark_path: default_bookmark_path(),
            widget: OnceCell::new(),
        }
    }

    /// Override the path [`restore_defaults`](Self::restore_defaults) writes
    pub fn with_default_bookmark_path(mut self, path: Option<PathBuf>) -> Self {
        self.default_bookmark_path = path;
        self
    }

    /// Restore default settings, then build the index
    pub fn initialize(&mut self) -> Result<()> {
        self.restore_defaults()?;
        self.build_index();
        Ok(())
    }

    /// Reset the search mode to word-match and the bookmarks file to the default location
    ///
    /// Both values are written to the config store.
    pub fn restore_defaults(&mut self) -> Result<()> {
        self.set_search_mode(SearchMode::WordMatch)?;

        match self.default_bookmark_path.clone() {
            Some(path) => self.set_bookmark_path(&path)?,
            None => warn!("No platform config directory, bookmarks file left unset"),
        }
        Ok(())
    }

    /// Rebuild the index from the configured bookmarks file
    ///
    /// The previous entries are discarded. A missing or unreadable file is
    /// logged and leaves the index empty; it is not an error.
    pub fn build_index(&mut self) {
        let entries = match self.bookmark_path() {
            Some(path) => match indexer::build_index(&path) {
                Ok(entries) => entries,
                Err(e) => {
                    warn!("Could not read bookmarks file {}: {:#}", path.display(), e);
                    Vec::new()
                }
            },
            None => {
                warn!("No bookmarks file configured");
                Vec::new()
            }
        };

        info!("Indexed {} bookmarks", entries.len());
        self.replace_entries(entries);
        self.indexed_at = Some(Utc::now());
    }

    /// Write the entries and search mode as a binary stream
    ///
    /// See [`index_storage::codec`](crate::index_storage::codec) for the layout.
    pub fn serialize<W: Write>(&self, writer: &mut W) -> Result<(), CodecError> {
        encode_index(&self.entries, self.search_mode, writer)
    }

    /// Replace the entries and search mode with those read from `reader`
    ///
    /// On error the index is left unchanged. The restored mode is not written
    /// back to the config store.
    pub fn deserialize<R: Read>(&mut self, reader: &mut R) -> Result<(), CodecError> {
        let decoded = decode_index(reader)?;

        self.search_mode = decoded.mode;
        self.replace_entries(decoded.entries);
        self.indexed_at = None;
        debug!("Loaded {} bookmarks", self.entries.len());
        Ok(())
    }

    /// Switch the matching strategy and persist it
    pub fn set_search_mode(&mut self, mode: SearchMode) -> Result<()> {
        self.config.set(SETTINGS_GROUP, SEARCH_MODE_KEY, mode.as_str())?;

        if mode != self.search_mode {
            self.search_mode = mode;
            self.preparer.prepare(&self.entries, self.search_mode);
        }
        Ok(())
    }

    /// Point the index at another bookmarks file; takes effect on the next rebuild
    pub fn set_bookmark_path(&mut self, path: &Path) -> Result<()> {
        self.config.set(SETTINGS_GROUP, BOOKMARK_PATH_KEY, &path.to_string_lossy())
    }

    /// Record when the current entries were parsed, e.g. after restoring a cache
    pub fn mark_indexed_at(&mut self, indexed_at: DateTime<Utc>) {
        self.indexed_at = Some(indexed_at);
    }

    /// Entries matching `query`, best match first
    pub fn search(&mut self, query: &str) -> Vec<&BookmarkEntry> {
        let positions = self.preparer.search(query);
        positions.into_iter().filter_map(|position| self.entries.get(position)).collect()
    }

    /// The settings widget, created on first use
    pub fn widget(&self) -> &SettingsWidget {
        self.widget.get_or_init(SettingsWidget::new)
    }

    /// Current state for rendering [`widget`](Self::widget)
    pub fn settings_view(&self) -> SettingsView {
        SettingsView {
            bookmark_path: self.bookmark_path(),
            search_mode: self.search_mode,
            entry_count: self.entries.len(),
            indexed_at: self.indexed_at,
        }
    }

    pub fn bookmark_path(&self) -> Option<PathBuf> {
        self.config
            .get(SETTINGS_GROUP, BOOKMARK_PATH_KEY)
            .filter(|path| !path.is_empty())
            .map(PathBuf::from)
    }

    pub fn entries(&self) -> &[BookmarkEntry] {
        &self.entries
    }

    pub fn search_mode(&self) -> SearchMode {
        self.search_mode
    }

    pub fn indexed_at(&self) -> Option<DateTime<Utc>> {
        self.indexed_at
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn config(&self) -> &C {
        &self.config
    }

    pub fn preparer(&self) -> &P {
        &self.preparer
    }

    fn replace_entries(&mut self, entries: Vec<BookmarkEntry>) {
        self.entries = entries;
        self.preparer.prepare(&self.entries, self.search_mode);
    }
}
