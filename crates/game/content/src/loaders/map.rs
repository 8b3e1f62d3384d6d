//! Tile map loader.
//!
//! Loads layered tile data from RON files. Which tiles block movement is a
//! property of the level, not of the map, so no terrain is decided here.

use std::path::Path;

use game_core::{MapDimensions, TileLayer, TileMap, TileSet};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Tile map structure for RON files.
///
/// ```ron
/// (
///     width: 3,
///     height: 2,
///     tilesets: [(first_gid: 1, tile_count: 16)],
///     layers: [(name: "ground", gids: [1, 1, 1, 1, 5, 1])],
/// )
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
struct TileMapRon {
    width: u32,
    height: u32,
    tilesets: Vec<TileSetRon>,
    layers: Vec<LayerRon>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct TileSetRon {
    first_gid: u32,
    tile_count: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct LayerRon {
    name: String,
    #[serde(default = "visible_by_default")]
    visible: bool,
    gids: Vec<u32>,
}

fn visible_by_default() -> bool {
    true
}

/// Loader for tile maps from RON files.
pub struct TileMapLoader;

impl TileMapLoader {
    pub fn load(path: &Path) -> LoadResult<TileMap> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Failed to load map {}: {}", path.display(), e))
    }

    pub fn parse(content: &str) -> LoadResult<TileMap> {
        let data: TileMapRon = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse map RON: {}", e))?;

        let dimensions = MapDimensions::new(data.width, data.height);
        let tilesets = data
            .tilesets
            .into_iter()
            .map(|tileset| TileSet::new(tileset.first_gid, tileset.tile_count))
            .collect();
        let layers = data
            .layers
            .into_iter()
            .map(|layer| TileLayer {
                name: layer.name,
                visible: layer.visible,
                gids: layer.gids,
            })
            .collect();

        Ok(TileMap::new(dimensions, tilesets, layers)?)
    }
}
