//! Data models for the bookmark index.
//!
//! - [`BookmarkEntry`] - One flattened, searchable URL bookmark
//! - [`SearchMode`] - Matching strategy applied to the indexed entries
//!
//! Bookmark tree nodes are not modelled as structs: the builder walks them as
//! `serde_json::Value` so that malformed nodes can be skipped one at a time.

pub mod bookmark;
pub mod search;

pub use bookmark::BookmarkEntry;
pub use search::{ParseSearchModeError, SearchMode};
