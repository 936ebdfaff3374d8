//! Configuration storage for the bookmark index
//!
//! The index never touches a global settings object. It is handed a [`ConfigStore`] at
//! construction and reads/writes its keys in the [`SETTINGS_GROUP`] group:
//!
//! - [`BOOKMARK_PATH_KEY`]: path of the browser's `Bookmarks` file
//! - [`SEARCH_MODE_KEY`]: `"word-match"` or `"fuzzy"`
//!
//! [`MemoryConfigStore`] backs tests; [`JsonConfigStore`] persists to a JSON file for the CLI.

pub mod settings;
pub mod store;

pub use settings::{
    BOOKMARK_PATH_KEY, SEARCH_MODE_KEY, SETTINGS_GROUP, default_bookmark_path,
    default_bookmark_path_in, default_config_file,
};
pub use store::{ConfigStore, JsonConfigStore, MemoryConfigStore};
