use std::sync::Arc;

use log::debug;
use nucleo::pattern::{CaseMatching, Normalization};
use nucleo::{Config, Nucleo};
use percent_encoding::percent_decode_str;

use super::SearchPreparer;
use super::word_match::WordIndex;
use crate::models::{BookmarkEntry, SearchMode};

/// Milliseconds per nucleo tick while waiting for a query to finish
const FUZZY_TICK_MS: u64 = 10;

/// Text a bookmark is matched against: its title and its percent-decoded URL
pub fn searchable_text(entry: &BookmarkEntry) -> String {
    let url = percent_decode_str(&entry.url).decode_utf8_lossy();
    if entry.title.is_empty() {
        url.into_owned()
    } else {
        format!("{} {}", entry.title, url)
    }
}

/// Word-match and fuzzy search over the prepared bookmarks
///
/// Only the structures for the current mode are kept: a [`WordIndex`] for
/// word-match, a nucleo matcher for fuzzy.
pub struct BookmarkSearcher {
    mode: SearchMode,
    words: WordIndex,
    fuzzy: Option<Nucleo<usize>>,
}

impl BookmarkSearcher {
    pub fn new() -> Self {
        Self { mode: SearchMode::default(), words: WordIndex::default(), fuzzy: None }
    }

    pub fn mode(&self) -> SearchMode {
        self.mode
    }

    fn build_fuzzy(entries: &[BookmarkEntry]) -> Nucleo<usize> {
        let nucleo = Nucleo::new(Config::DEFAULT, Arc::new(|| {}), None, 1);

        let injector = nucleo.injector();
        for (position, entry) in entries.iter().enumerate() {
            let text = searchable_text(entry);
            injector.push(position, move |_position, cols| {
                cols[0] = text.clone().into();
            });
        }

        nucleo
    }

    fn fuzzy_search(nucleo: &mut Nucleo<usize>, query: &str) -> Vec<usize> {
        nucleo.pattern.reparse(0, query, CaseMatching::Smart, Normalization::Smart, false);

        // Tick until the worker has scored every injected item
        while nucleo.tick(FUZZY_TICK_MS).running {}

        let snapshot = nucleo.snapshot();
        snapshot.matched_items(..snapshot.matched_item_count()).map(|item| *item.data).collect()
    }
}

impl Default for BookmarkSearcher {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchPreparer for BookmarkSearcher {
    fn prepare(&mut self, entries: &[BookmarkEntry], mode: SearchMode) {
        debug!("Preparing {} search structures for {} bookmarks", mode, entries.len());

        self.mode = mode;
        match mode {
            SearchMode::WordMatch => {
                self.words = WordIndex::new(entries);
                self.fuzzy = None;
            }
            SearchMode::Fuzzy => {
                self.words = WordIndex::default();
                self.fuzzy = Some(Self::build_fuzzy(entries));
            }
        }
    }

    fn search(&mut self, query: &str) -> Vec<usize> {
        if query.trim().is_empty() {
            return Vec::new();
        }

        match (self.mode, self.fuzzy.as_mut()) {
            (SearchMode::Fuzzy, Some(nucleo)) => Self::fuzzy_search(nucleo, query),
            (SearchMode::Fuzzy, None) => Vec::new(),
            (SearchMode::WordMatch, _) => self.words.matches(query),
        }
    }
}
