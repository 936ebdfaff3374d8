//! Search structures over the indexed bookmarks
//!
//! The index store does not rank anything itself. After every rebuild (or restore from the
//! binary cache, or mode change) it hands the new corpus to a [`SearchPreparer`], which builds
//! whatever structures its matching strategy needs. Queries then go through the same preparer.
//!
//! [`BookmarkSearcher`] is the bundled preparer:
//!
//! - [`SearchMode::WordMatch`](crate::models::SearchMode::WordMatch): every query word must be
//!   a prefix of some word in the title or the percent-decoded URL
//! - [`SearchMode::Fuzzy`](crate::models::SearchMode::Fuzzy): `nucleo` fuzzy matching, best
//!   score first

pub mod preparer;
pub mod word_match;

pub use preparer::{BookmarkSearcher, searchable_text};
pub use word_match::WordIndex;

use crate::models::{BookmarkEntry, SearchMode};

/// Receives the indexed corpus and answers queries against it
pub trait SearchPreparer {
    /// Rebuild search structures for `entries` using `mode`
    ///
    /// Called every time the corpus or the mode changes; previous structures are discarded.
    fn prepare(&mut self, entries: &[BookmarkEntry], mode: SearchMode);

    /// Positions into the last prepared `entries` that match `query`, best match first
    fn search(&mut self, query: &str) -> Vec<usize>;
}
