//! Level data and loaders.
//!
//! This crate reads the files a game install ships with and turns them into
//! `game-core` values:
//! - Level descriptors (`level.json`, one directory per level)
//! - Tile maps (data-driven via RON)
//! - Game configuration (data-driven via TOML)
//!
//! Malformed enemy records are normalized at this boundary so the rules only
//! ever see the fixed three-slot item shape. The only write path is the
//! enemy-roster write-back in [`loaders::LevelLoader::write_roster`].

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{
    ConfigLoader, LevelCatalog, LevelDescriptor, LevelEntry, LevelLoader, LoadResult,
    TileMapLoader,
};
