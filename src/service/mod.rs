//! The index store: owns the flattened bookmarks and drives rebuilds, persistence and search.

pub mod bookmark_index;

pub use self::bookmark_index::BookmarkIndex;
