use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use crossterm::tty::IsTty;
use log::{info, warn};
use ratatui::backend::CrosstermBackend;
use ratatui::{Terminal, TerminalOptions, Viewport};

use crate::clipboard::copy_url;
use crate::config::{JsonConfigStore, default_config_file};
use crate::index_storage::{IndexMetadata, default_cache_dir, load_index, save_index};
use crate::models::SearchMode;
use crate::search::{BookmarkSearcher, SearchPreparer};
use crate::service::BookmarkIndex;
use crate::utils::{format_path_with_tilde, strip_ansi_codes};
use crate::widget::{SettingsView, SettingsWidget, format_timestamp};

type CliIndex = BookmarkIndex<JsonConfigStore, BookmarkSearcher>;

/// Width used when the settings panel is printed to a non-terminal
const PLAIN_SETTINGS_WIDTH: u16 = 80;

#[derive(Parser)]
#[command(name = "bookmark-index")]
#[command(version)]
#[command(about = "Index and search browser bookmarks", long_about = None)]
pub struct Cli {
    /// Settings file [default: <config dir>/bookmark-index/settings.json]
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Index cache directory [default: <cache dir>/bookmark-index]
    #[arg(long, global = true, value_name = "DIR")]
    pub cache_dir: Option<PathBuf>,

    /// Neither read nor write the index cache
    #[arg(long, global = true)]
    pub no_cache: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    WordMatch,
    Fuzzy,
}

impl From<ModeArg> for SearchMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::WordMatch => SearchMode::WordMatch,
            ModeArg::Fuzzy => SearchMode::Fuzzy,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show statistics about the index
    Stats,
    /// Search bookmarks by title and URL
    Search {
        /// Query words
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
        /// Matching strategy for this query only [default: configured mode]
        #[arg(long, value_enum)]
        mode: Option<ModeArg>,
        /// Maximum number of results
        #[arg(long, default_value_t = 10)]
        limit: usize,
        /// Copy the best match's URL to the clipboard
        #[arg(long)]
        copy: bool,
    },
    /// Rebuild the index from the bookmarks file
    Reindex,
    /// Reset the bookmarks file and search mode to their defaults
    Reset,
    /// Show the settings panel
    Settings,
    /// Change the bookmarks file or the default search mode
    Config {
        /// Bookmarks file to index
        #[arg(long, value_name = "FILE")]
        bookmarks: Option<PathBuf>,
        /// Default matching strategy
        #[arg(long, value_enum)]
        mode: Option<ModeArg>,
    },
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        Some(Commands::Stats) => show_stats(&cli),
        Some(Commands::Search { query, mode, limit, copy }) => {
            search(&cli, &query.join(" "), mode.map(SearchMode::from), *limit, *copy)
        }
        Some(Commands::Reindex) => reindex(&cli),
        Some(Commands::Reset) => reset(&cli),
        Some(Commands::Settings) => show_settings(&cli),
        Some(Commands::Config { bookmarks, mode }) => {
            configure(&cli, bookmarks.as_deref(), mode.map(SearchMode::from))
        }
        None => {
            println!("Use --help for usage information");
            Ok(())
        }
    }
}

/// Open settings; the first run (no settings file yet) gets the defaults
fn open_index(cli: &Cli) -> Result<CliIndex> {
    let config_path = match &cli.config {
        Some(path) => path.clone(),
        None => default_config_file()?,
    };
    let first_run = !config_path.exists();
    let config = JsonConfigStore::open(&config_path)?;

    let mut index = BookmarkIndex::new(config, BookmarkSearcher::new());
    if first_run {
        info!("No settings file at {}, restoring defaults", config_path.display());
        index.restore_defaults()?;
    }
    Ok(index)
}

fn cache_dir(cli: &Cli) -> Result<PathBuf> {
    match &cli.cache_dir {
        Some(dir) => Ok(dir.clone()),
        None => default_cache_dir(),
    }
}

/// Restore the index from a fresh cache, or rebuild it and refresh the cache
fn load_or_build(cli: &Cli, index: &mut CliIndex) -> Result<()> {
    let Some(bookmark_path) = index.bookmark_path().filter(|_| !cli.no_cache) else {
        index.build_index();
        return Ok(());
    };
    let cache_dir = cache_dir(cli)?;

    match load_index(&cache_dir, &bookmark_path) {
        Ok(Some(cached)) => {
            let configured_mode = index.search_mode();
            match index.deserialize(&mut cached.bytes.as_slice()) {
                Ok(()) => {
                    index.mark_indexed_at(cached.metadata.indexed_at);
                    // Settings win over the mode stored in the cache
                    if index.search_mode() != configured_mode {
                        index.set_search_mode(configured_mode)?;
                    }
                    return Ok(());
                }
                Err(e) => warn!("Discarding unreadable index cache: {}", e),
            }
        }
        Ok(None) => {}
        Err(e) => warn!("Failed to load index cache: {:#}", e),
    }

    index.build_index();
    store_cache(index, &cache_dir, &bookmark_path);
    Ok(())
}

/// Cache failures only cost the next startup a rebuild
fn store_cache(index: &CliIndex, cache_dir: &Path, bookmark_path: &Path) {
    let mut bytes = Vec::new();
    if let Err(e) = index.serialize(&mut bytes) {
        warn!("Failed to serialize index cache: {}", e);
        return;
    }

    let indexed_at = index.indexed_at().unwrap_or_else(chrono::Utc::now);
    let metadata = IndexMetadata::new(bookmark_path, index.len(), indexed_at);
    if let Err(e) = save_index(cache_dir, &metadata, &bytes) {
        warn!("Failed to save index cache: {:#}", e);
    }
}

fn show_stats(cli: &Cli) -> Result<()> {
    let mut index = open_index(cli)?;
    load_or_build(cli, &mut index)?;

    let path = index
        .bookmark_path()
        .map(|path| format_path_with_tilde(&path))
        .unwrap_or_else(|| "(not set)".to_string());

    println!("Bookmark Index Statistics");
    println!("=========================");
    println!("Total bookmarks: {}", index.len());
    println!("Search mode: {}", index.search_mode());
    println!();
    println!("Bookmarks file: {}", path);
    if let Some(indexed_at) = index.indexed_at() {
        println!("Last indexed: {}", format_timestamp(&indexed_at));
    }

    Ok(())
}

fn search(
    cli: &Cli,
    query: &str,
    mode: Option<SearchMode>,
    limit: usize,
    copy: bool,
) -> Result<()> {
    let mut index = open_index(cli)?;
    load_or_build(cli, &mut index)?;

    let results: Vec<(String, String)> = match mode.filter(|mode| *mode != index.search_mode()) {
        // One-off mode: prepare a separate searcher instead of changing settings
        Some(mode) => {
            let mut searcher = BookmarkSearcher::new();
            searcher.prepare(index.entries(), mode);
            searcher
                .search(query)
                .into_iter()
                .filter_map(|position| index.entries().get(position))
                .take(limit)
                .map(|entry| (entry.title.clone(), entry.url.clone()))
                .collect()
        }
        None => index
            .search(query)
            .into_iter()
            .take(limit)
            .map(|entry| (entry.title.clone(), entry.url.clone()))
            .collect(),
    };

    if results.is_empty() {
        println!("No bookmarks match \"{}\"", strip_ansi_codes(query));
        return Ok(());
    }

    for (title, url) in &results {
        let title =
            if title.is_empty() { "(untitled)".to_string() } else { strip_ansi_codes(title) };
        println!("{}\n    {}", title, strip_ansi_codes(url));
    }

    if copy {
        let (_, url) = &results[0];
        copy_url(url)?;
        println!("Copied {} to clipboard", strip_ansi_codes(url));
    }

    Ok(())
}

fn reindex(cli: &Cli) -> Result<()> {
    let mut index = open_index(cli)?;
    index.build_index();

    if let Some(bookmark_path) = index.bookmark_path() {
        if !cli.no_cache {
            store_cache(&index, &cache_dir(cli)?, &bookmark_path);
        }
        let path = format_path_with_tilde(&bookmark_path);
        println!("Indexed {} bookmarks from {}", index.len(), path);
    } else {
        println!("No bookmarks file configured");
    }

    Ok(())
}

fn reset(cli: &Cli) -> Result<()> {
    let mut index = open_index(cli)?;
    index.restore_defaults()?;

    println!("Restored default settings");
    println!("Search mode: {}", index.search_mode());
    match index.bookmark_path() {
        Some(path) => println!("Bookmarks file: {}", format_path_with_tilde(&path)),
        None => println!("Bookmarks file: (not set)"),
    }
    Ok(())
}

fn configure(cli: &Cli, bookmarks: Option<&Path>, mode: Option<SearchMode>) -> Result<()> {
    let mut index = open_index(cli)?;

    if let Some(path) = bookmarks {
        index.set_bookmark_path(path)?;
        println!("Bookmarks file set to {}", format_path_with_tilde(path));
    }
    if let Some(mode) = mode {
        index.set_search_mode(mode)?;
        println!("Search mode set to {}", mode);
    }
    if bookmarks.is_none() && mode.is_none() {
        let path = index
            .bookmark_path()
            .map(|path| format_path_with_tilde(&path))
            .unwrap_or_else(|| "(not set)".to_string());
        println!("Bookmarks file: {}", path);
        println!("Search mode: {}", index.search_mode());
    }
    Ok(())
}

fn show_settings(cli: &Cli) -> Result<()> {
    let mut index = open_index(cli)?;
    load_or_build(cli, &mut index)?;

    let widget = index.widget();
    let mut view = index.settings_view();

    if !io::stdout().is_tty() {
        for line in widget.render_to_lines(&view, PLAIN_SETTINGS_WIDTH) {
            println!("{}", line);
        }
        return Ok(());
    }

    draw_inline(widget, &mut view)
}

/// Draw the settings panel below the cursor without taking over the screen
fn draw_inline(widget: &SettingsWidget, view: &mut SettingsView) -> Result<()> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let backend = CrosstermBackend::new(io::stdout());
    let result = Terminal::with_options(
        backend,
        TerminalOptions { viewport: Viewport::Inline(SettingsWidget::HEIGHT) },
    )
    .and_then(|mut terminal| {
        terminal.draw(|frame| frame.render_stateful_widget(widget, frame.area(), view))?;
        terminal.show_cursor()
    });
    disable_raw_mode().context("Failed to disable raw mode")?;
    result.context("Failed to draw settings panel")?;

    let mut stdout = io::stdout();
    writeln!(stdout)?;
    stdout.flush()?;
    Ok(())
}
