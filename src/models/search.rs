use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Matching strategy used when querying the index
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SearchMode {
    /// Every query word must prefix some word of the entry
    #[default]
    WordMatch,
    /// Fuzzy subsequence matching, ranked by score
    Fuzzy,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown search mode: {0:?} (expected \"word-match\" or \"fuzzy\")")]
pub struct ParseSearchModeError(pub String);

impl SearchMode {
    /// Integer tag written to the serialized index stream
    pub fn tag(self) -> i32 {
        match self {
            SearchMode::WordMatch => 0,
            SearchMode::Fuzzy => 1,
        }
    }

    pub fn from_tag(tag: i32) -> Option<Self> {
        match tag {
            0 => Some(SearchMode::WordMatch),
            1 => Some(SearchMode::Fuzzy),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SearchMode::WordMatch => "word-match",
            SearchMode::Fuzzy => "fuzzy",
        }
    }
}

impl fmt::Display for SearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SearchMode {
    type Err = ParseSearchModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "word-match" => Ok(SearchMode::WordMatch),
            "fuzzy" => Ok(SearchMode::Fuzzy),
            other => Err(ParseSearchModeError(other.to_string())),
        }
    }
}
