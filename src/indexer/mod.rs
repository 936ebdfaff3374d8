//! Index building for browser bookmark files
//!
//! # Error Handling Strategy
//!
//! The indexer never fails on bad bookmark content:
//!
//! - **File-level errors**: A missing, unreadable or oversized bookmarks file is returned as an
//!   error from [`build_index`]. The index store logs it and continues with an empty index.
//!
//! - **Document-level errors**: Invalid JSON yields an empty document and therefore zero entries.
//!
//! - **Node-level errors**: Nodes without a `type`, with an unknown `type`, or with fields of the
//!   wrong JSON type are skipped or defaulted individually, so one bad node never hides its
//!   siblings.
//!
//! - **Depth bound**: Folders nested deeper than [`MAX_TREE_DEPTH`] are not descended into.
//!   Files whose JSON nests deeper than [`MAX_JSON_NESTING`] are treated as invalid.

pub mod builder;

pub use builder::{
    MAX_JSON_NESTING, MAX_TREE_DEPTH, build_index, flatten_document, parse_bookmarks,
};
