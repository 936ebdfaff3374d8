use serde::{Deserialize, Serialize};

/// A single URL bookmark flattened out of the browser's bookmark tree.
///
/// Folders never become entries. `title` is empty when the source node has no
/// `name`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookmarkEntry {
    pub title: String,
    pub url: String,
}

impl BookmarkEntry {
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self { title: title.into(), url: url.into() }
    }
}
