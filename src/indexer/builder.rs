//! Flattens a Chromium `Bookmarks` file into an ordered list of entries.
//!
//! The file looks like:
//!
//! ```text
//! { "roots": { "bookmark_bar": <node>, "other": <node>, "synced": <node> } }
//! node = { "type": "folder" | "url", "name": ..., "url": ..., "children": [node, ...] }
//! ```
//!
//! Entries come out in depth-first pre-order. Roots are visited in a fixed
//! order: `bookmark_bar`, `other`, `synced`, then any other root by name.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use log::{debug, warn};
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::models::BookmarkEntry;
use crate::utils::validate_file_size;

const ROOTS_KEY: &str = "roots";
const TYPE_KEY: &str = "type";
const CHILDREN_KEY: &str = "children";
const NAME_KEY: &str = "name";
const URL_KEY: &str = "url";

const NODE_TYPE_FOLDER: &str = "folder";
const NODE_TYPE_URL: &str = "url";

/// Roots visited first, in this order
const PREFERRED_ROOTS: [&str; 3] = ["bookmark_bar", "other", "synced"];

/// Maximum folder nesting the walker descends into (security: bound recursion on corrupt input)
///
/// Deeper folders are skipped; the rest of the tree is still indexed.
pub const MAX_TREE_DEPTH: usize = 48;

/// Maximum JSON nesting accepted in a bookmarks file (security: bound parser and drop recursion)
///
/// Each folder level takes two (the node object and its `children` array), so any file the
/// browser writes fits well below this.
pub const MAX_JSON_NESTING: usize = 1024;

/// Read and flatten the bookmarks file at `path`
///
/// # Errors
///
/// Returns an error if the file cannot be opened or read, or is larger than the
/// accepted file size. Invalid JSON is not an error: it yields an empty list.
pub fn build_index(path: &Path) -> Result<Vec<BookmarkEntry>> {
    debug!("Parsing bookmarks file {}", path.display());

    // Open file and validate size on the same handle to avoid TOCTOU races
    let mut file = File::open(path)
        .with_context(|| format!("Failed to open bookmarks file: {}", path.display()))?;
    validate_file_size(&file, path)?;

    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes)
        .with_context(|| format!("Failed to read bookmarks file: {}", path.display()))?;

    let entries = parse_bookmarks(&bytes);
    debug!("Found {} bookmarks in {}", entries.len(), path.display());
    Ok(entries)
}

/// Parse raw file contents, treating invalid JSON as an empty document
///
/// Documents nested deeper than [`MAX_JSON_NESTING`] are treated as invalid.
pub fn parse_bookmarks(bytes: &[u8]) -> Vec<BookmarkEntry> {
    if nesting_exceeds(bytes, MAX_JSON_NESTING) {
        debug!("Bookmarks file nested deeper than {} levels, treating as empty", MAX_JSON_NESTING);
        return Vec::new();
    }

    match parse_document(bytes) {
        Ok(document) => flatten_document(&document),
        Err(e) => {
            debug!("Bookmarks file is not valid JSON, treating as empty: {}", e);
            Vec::new()
        }
    }
}

/// Parse without serde_json's 128-level limit; the stack grows on demand instead
fn parse_document(bytes: &[u8]) -> serde_json::Result<Value> {
    let mut json = serde_json::Deserializer::from_slice(bytes);
    json.disable_recursion_limit();
    let document = Value::deserialize(serde_stacker::Deserializer::new(&mut json))?;
    json.end()?;
    Ok(document)
}

/// True if brackets outside string literals nest deeper than `limit`
fn nesting_exceeds(bytes: &[u8], limit: usize) -> bool {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for &byte in bytes {
        if in_string {
            match byte {
                _ if escaped => escaped = false,
                b'\\' => escaped = true,
                b'"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match byte {
            b'"' => in_string = true,
            b'{' | b'[' => {
                depth += 1;
                if depth > limit {
                    return true;
                }
            }
            b'}' | b']' => depth = depth.saturating_sub(1),
            _ => {}
        }
    }
    false
}

/// Flatten an already parsed bookmarks document
pub fn flatten_document(document: &Value) -> Vec<BookmarkEntry> {
    let Some(roots) = document.get(ROOTS_KEY).and_then(Value::as_object) else {
        return Vec::new();
    };

    let mut entries = Vec::new();
    for root in ordered_roots(roots).filter(|root| root.is_object()) {
        collect_node(root, 0, &mut entries);
    }
    entries
}

fn ordered_roots(roots: &Map<String, Value>) -> impl Iterator<Item = &Value> {
    let preferred = PREFERRED_ROOTS.into_iter().filter_map(|name| roots.get(name));

    // Sort explicitly: Map iteration order depends on serde_json's preserve_order feature
    let mut rest: Vec<(&String, &Value)> =
        roots.iter().filter(|(name, _)| !PREFERRED_ROOTS.contains(&name.as_str())).collect();
    rest.sort_by(|a, b| a.0.cmp(b.0));

    preferred.chain(rest.into_iter().map(|(_, node)| node))
}

fn collect_node(node: &Value, depth: usize, entries: &mut Vec<BookmarkEntry>) {
    // Typeless nodes are dropped together with their subtree
    let Some(node_type) = node.get(TYPE_KEY) else {
        return;
    };

    match node_type.as_str() {
        Some(NODE_TYPE_FOLDER) => {
            if depth >= MAX_TREE_DEPTH {
                warn!(
                    "Skipping bookmark folder {:?}: nested deeper than {} levels",
                    string_field(node, NAME_KEY),
                    MAX_TREE_DEPTH
                );
                return;
            }
            let Some(children) = node.get(CHILDREN_KEY).and_then(Value::as_array) else {
                return;
            };
            for child in children.iter().filter(|child| child.is_object()) {
                collect_node(child, depth + 1, entries);
            }
        }
        Some(NODE_TYPE_URL) => {
            let title = string_field(node, NAME_KEY);
            entries.push(BookmarkEntry::new(title, string_field(node, URL_KEY)));
        }
        _ => {}
    }
}

fn string_field(node: &Value, key: &str) -> String {
    node.get(key).and_then(Value::as_str).unwrap_or_default().to_string()
}
