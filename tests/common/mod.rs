//! Shared test utilities for integration tests
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value, json};
use tempfile::TempDir;

/// Builder for bookmark tree nodes
pub enum Node {
    Url { name: String, url: String },
    Folder { name: String, children: Vec<Node> },
}

impl Node {
    pub fn url(name: &str, url: &str) -> Self {
        Node::Url { name: name.to_string(), url: url.to_string() }
    }

    pub fn folder(name: &str, children: Vec<Node>) -> Self {
        Node::Folder { name: name.to_string(), children }
    }

    /// Convert to the browser's JSON node shape
    pub fn to_json(&self) -> Value {
        match self {
            Node::Url { name, url } => json!({ "type": "url", "name": name, "url": url }),
            Node::Folder { name, children } => json!({
                "type": "folder",
                "name": name,
                "children": children.iter().map(Node::to_json).collect::<Vec<_>>(),
            }),
        }
    }
}

/// Builder for a temp directory holding a `Bookmarks` file
pub struct BookmarksFileBuilder {
    temp_dir: TempDir,
    roots: Map<String, Value>,
}

impl BookmarksFileBuilder {
    /// Create a new builder with no roots
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        Self { temp_dir, roots: Map::new() }
    }

    /// Add a root folder with the given children
    pub fn with_root(mut self, key: &str, children: Vec<Node>) -> Self {
        let root = Node::folder(key, children).to_json();
        self.roots.insert(key.to_string(), root);
        self
    }

    /// Path the bookmarks file is written to
    pub fn bookmarks_path(&self) -> PathBuf {
        self.temp_dir.path().join("Bookmarks")
    }

    /// Write the bookmarks file and return the temp directory (consumes self)
    pub fn build(self) -> TempDir {
        let document = json!({ "version": 1, "roots": Value::Object(self.roots.clone()) });
        let content = serde_json::to_string_pretty(&document).expect("Failed to encode bookmarks");
        fs::write(self.bookmarks_path(), content).expect("Failed to write Bookmarks");
        self.temp_dir
    }
}

impl Default for BookmarksFileBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Bookmarks file path inside a directory built by [`BookmarksFileBuilder`]
pub fn bookmarks_in(dir: &Path) -> PathBuf {
    dir.join("Bookmarks")
}

/// A profile with bookmarks in every kind of root
pub fn realistic_bookmarks() -> TempDir {
    BookmarksFileBuilder::new()
        .with_root(
            "bookmark_bar",
            vec![
                Node::url("Rust Programming Language", "https://www.rust-lang.org/"),
                Node::folder(
                    "Docs",
                    vec![
                        Node::url("The Rust Book", "https://doc.rust-lang.org/book/"),
                        Node::url("docs.rs", "https://docs.rs/"),
                    ],
                ),
            ],
        )
        .with_root("other", vec![Node::url("Hacker News", "https://news.ycombinator.com/")])
        .with_root(
            "synced",
            vec![Node::url("Search Results", "https://example.com/search?q=hello%20world")],
        )
        .build()
}
