//! Traits describing read-only world data and sources of randomness.
//!
//! Oracles expose static map geometry and dice entropy so the rules can be
//! exercised without coupling to concrete file formats or clocks.
mod map;
mod rng;

pub use map::{
    MapDimensions, MapError, MapOracle, TerrainKind, TileId, TileLayer, TileMap, TileSet, classify,
};
pub use rng::{PcgRng, RngOracle, ScriptedRng, mix_seed};
