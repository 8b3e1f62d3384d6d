//! Content loaders for reading game data from files.
//!
//! Levels are JSON, tile maps RON and configuration TOML. Every loader
//! returns [`LoadResult`] with the offending path in the error context.

pub mod catalog;
pub mod config;
pub mod level;
pub mod map;

pub use catalog::{LevelCatalog, LevelEntry};
pub use config::ConfigLoader;
pub use level::{LevelDescriptor, LevelLoader};
pub use map::TileMapLoader;

use std::path::Path;

use anyhow::Context;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read file {}", path.display()))
}
