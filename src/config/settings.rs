use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

pub const SETTINGS_GROUP: &str = "BookmarkIndex";
pub const BOOKMARK_PATH_KEY: &str = "bookmarkPath";
pub const SEARCH_MODE_KEY: &str = "searchMode";

const APP_DIR_NAME: &str = "bookmark-index";
const CONFIG_FILENAME: &str = "settings.json";

/// Default bookmarks file: `<config dir>/chromium/Default/Bookmarks`
///
/// Returns `None` when the platform has no config directory.
pub fn default_bookmark_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| default_bookmark_path_in(&dir))
}

/// Chromium's default-profile bookmarks file under `config_dir`
pub fn default_bookmark_path_in(config_dir: &Path) -> PathBuf {
    config_dir.join("chromium").join("Default").join("Bookmarks")
}

/// Settings file used by the CLI: `<config dir>/bookmark-index/settings.json`
pub fn default_config_file() -> Result<PathBuf> {
    let config_dir = dirs::config_dir().context("Failed to get platform config directory")?;
    Ok(config_dir.join(APP_DIR_NAME).join(CONFIG_FILENAME))
}
