//! Command-line host for the bookmark index
//!
//! Acts the way a launcher would: loads settings, restores the index from the cache when the
//! bookmarks file is unchanged (otherwise rebuilds and refreshes the cache), then runs one
//! command against it.

pub mod commands;

pub use commands::{Cli, Commands, run};
