use percent_encoding::percent_decode_str;

use super::preparer::searchable_text;
use crate::models::BookmarkEntry;

/// Per-entry word lists for word-match queries
///
/// A query matches an entry when every query word is a prefix of at least one
/// of the entry's words. Words are split on anything that is not alphanumeric
/// and compared case-insensitively.
#[derive(Debug, Clone, Default)]
pub struct WordIndex {
    words: Vec<Vec<String>>,
}

impl WordIndex {
    pub fn new(entries: &[BookmarkEntry]) -> Self {
        let words = entries
            .iter()
            .map(|entry| {
                let mut words = tokenize(&searchable_text(entry));
                words.sort_unstable();
                words.dedup();
                words
            })
            .collect();
        Self { words }
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Matching positions in index order; a query without words matches nothing
    pub fn matches(&self, query: &str) -> Vec<usize> {
        let decoded = percent_decode_str(query).decode_utf8_lossy();
        let terms = tokenize(&decoded);
        if terms.is_empty() {
            return Vec::new();
        }

        self.words
            .iter()
            .enumerate()
            .filter(|(_, words)| {
                terms.iter().all(|term| words.iter().any(|word| word.starts_with(term.as_str())))
            })
            .map(|(position, _)| position)
            .collect()
    }
}

fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(str::to_lowercase)
        .collect()
}
