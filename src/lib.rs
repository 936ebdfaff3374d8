//! Bookmark Index - Flatten and search Chromium-family browser bookmarks
//!
//! This library turns a browser's `Bookmarks` JSON file into a flat list of titled URLs that a
//! launcher can search. It supports:
//!
//! - Flattening the bookmark tree from every root folder, in a fixed root order
//! - Word-match and fuzzy search over titles and URLs
//! - A compact binary stream for persisting the index between runs
//! - Settings persisted through a pluggable config store
//!
//! # Example
//!
//! ```no_run
//! use bookmark_index::build_index;
//! use std::path::PathBuf;
//!
//! let bookmarks = PathBuf::from("/home/alice/.config/chromium/Default/Bookmarks");
//! let entries = build_index(&bookmarks)?;
//! println!("Indexed {} bookmarks", entries.len());
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod cli;
pub mod clipboard;
pub mod config;
pub mod index_storage;
pub mod indexer;
pub mod models;
pub mod search;
pub mod service;
pub mod utils;
pub mod widget;

// Re-export commonly used types
pub use config::{ConfigStore, JsonConfigStore, MemoryConfigStore};
pub use indexer::build_index;
pub use models::{BookmarkEntry, SearchMode};
pub use search::{BookmarkSearcher, SearchPreparer};
pub use service::BookmarkIndex;
pub use utils::format_path_with_tilde;
