use std::collections::BTreeSet;

use crate::state::Position;

/// Identifier of a tile inside its tileset, as listed in a level's wall set.
///
/// `0` stands for an empty cell (global id 0); real tiles are numbered from 1.
pub type TileId = u32;

/// Static map oracle exposing immutable layout information.
pub trait MapOracle: Send + Sync {
    fn dimensions(&self) -> MapDimensions;

    /// Resolved tile ids at `position`, one per visible layer that has a tile
    /// there. Returns `None` when `position` is outside the map.
    fn tile_stack(&self, position: Position) -> Option<Vec<TileId>>;

    fn contains(&self, position: Position) -> bool {
        self.dimensions().contains(position)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapDimensions {
    pub width: u32,
    pub height: u32,
}

impl MapDimensions {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn contains(&self, position: Position) -> bool {
        position.x >= 0
            && position.y >= 0
            && position.x < self.width as i32
            && position.y < self.height as i32
    }

    pub const fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }

    fn index(&self, position: Position) -> Option<usize> {
        self.contains(position)
            .then(|| position.y as usize * self.width as usize + position.x as usize)
    }
}

/// Canonical terrain classes for map cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TerrainKind {
    Floor,
    Wall,
}

impl TerrainKind {
    pub fn is_passable(self) -> bool {
        matches!(self, TerrainKind::Floor)
    }
}

/// Range of global ids owned by one tileset.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TileSet {
    pub first_gid: u32,
    pub tile_count: u32,
}

impl TileSet {
    pub const fn new(first_gid: u32, tile_count: u32) -> Self {
        Self {
            first_gid,
            tile_count,
        }
    }

    /// Converts a global id into this tileset's 1-based tile id.
    pub fn resolve(&self, gid: u32) -> Option<TileId> {
        (gid >= self.first_gid && gid < self.first_gid + self.tile_count)
            .then(|| gid - self.first_gid + 1)
    }
}

/// One layer of global tile ids stored row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TileLayer {
    pub name: String,
    pub visible: bool,
    pub gids: Vec<u32>,
}

impl TileLayer {
    pub fn new(name: impl Into<String>, gids: Vec<u32>) -> Self {
        Self {
            name: name.into(),
            visible: true,
            gids,
        }
    }

    /// Layer of `area` cells all holding `gid`.
    pub fn filled(name: impl Into<String>, area: usize, gid: u32) -> Self {
        Self::new(name, vec![gid; area])
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum MapError {
    #[error("map has zero width or height")]
    Empty,

    #[error("layer `{layer}` holds {actual} cells, expected {expected}")]
    LayerSizeMismatch {
        layer: String,
        expected: usize,
        actual: usize,
    },
}

/// Layered tile map: the geometry half of a level.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TileMap {
    dimensions: MapDimensions,
    tilesets: Vec<TileSet>,
    layers: Vec<TileLayer>,
}

impl TileMap {
    pub fn new(
        dimensions: MapDimensions,
        tilesets: Vec<TileSet>,
        layers: Vec<TileLayer>,
    ) -> Result<Self, MapError> {
        if dimensions.area() == 0 {
            return Err(MapError::Empty);
        }
        let expected = dimensions.area();
        if let Some(layer) = layers.iter().find(|layer| layer.gids.len() != expected) {
            return Err(MapError::LayerSizeMismatch {
                layer: layer.name.clone(),
                expected,
                actual: layer.gids.len(),
            });
        }

        Ok(Self {
            dimensions,
            tilesets,
            layers,
        })
    }

    /// Single-layer map with one tileset starting at gid 1, every cell set to `gid`.
    pub fn uniform(dimensions: MapDimensions, tile_count: u32, gid: u32) -> Self {
        Self {
            dimensions,
            tilesets: vec![TileSet::new(1, tile_count)],
            layers: vec![TileLayer::filled("ground", dimensions.area(), gid)],
        }
    }

    pub fn layers(&self) -> &[TileLayer] {
        &self.layers
    }

    pub fn tilesets(&self) -> &[TileSet] {
        &self.tilesets
    }

    /// Overwrites one cell of a layer. Returns `false` when either is missing.
    pub fn set_gid(&mut self, layer: usize, position: Position, gid: u32) -> bool {
        let Some(index) = self.dimensions.index(position) else {
            return false;
        };
        match self.layers.get_mut(layer) {
            Some(layer) => {
                layer.gids[index] = gid;
                true
            }
            None => false,
        }
    }

    fn resolve_gid(&self, gid: u32) -> Option<TileId> {
        if gid == 0 {
            return Some(0);
        }
        self.tilesets.iter().find_map(|tileset| tileset.resolve(gid))
    }
}

impl MapOracle for TileMap {
    fn dimensions(&self) -> MapDimensions {
        self.dimensions
    }

    fn tile_stack(&self, position: Position) -> Option<Vec<TileId>> {
        let index = self.dimensions.index(position)?;
        Some(
            self.layers
                .iter()
                .filter(|layer| layer.visible)
                .filter_map(|layer| self.resolve_gid(layer.gids[index]))
                .collect(),
        )
    }
}

/// Classifies a cell against a wall set.
///
/// Every visible layer counts: one wall tile anywhere in the stack blocks the
/// cell. Empty cells block only when `0` is part of the wall set.
pub fn classify(
    map: &(impl MapOracle + ?Sized),
    wall_tiles: &BTreeSet<TileId>,
    position: Position,
) -> Option<TerrainKind> {
    let stack = map.tile_stack(position)?;
    if stack.iter().any(|tile| wall_tiles.contains(tile)) {
        Some(TerrainKind::Wall)
    } else {
        Some(TerrainKind::Floor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn walls(ids: &[TileId]) -> BTreeSet<TileId> {
        ids.iter().copied().collect()
    }

    #[test]
    fn gid_resolves_through_matching_tileset() {
        let tileset = TileSet::new(10, 5);
        assert_eq!(tileset.resolve(9), None);
        assert_eq!(tileset.resolve(10), Some(1));
        assert_eq!(tileset.resolve(14), Some(5));
        assert_eq!(tileset.resolve(15), None);
    }

    #[test]
    fn wall_in_any_visible_layer_blocks() {
        let dims = MapDimensions::new(3, 3);
        let mut map = TileMap::new(
            dims,
            vec![TileSet::new(1, 8)],
            vec![
                TileLayer::filled("ground", dims.area(), 1),
                TileLayer::filled("decor", dims.area(), 0),
            ],
        )
        .unwrap();
        assert!(map.set_gid(1, Position::new(2, 1), 4));

        let wall_set = walls(&[4]);
        assert_eq!(
            classify(&map, &wall_set, Position::new(2, 1)),
            Some(TerrainKind::Wall)
        );
        assert_eq!(
            classify(&map, &wall_set, Position::new(0, 0)),
            Some(TerrainKind::Floor)
        );
        assert_eq!(classify(&map, &wall_set, Position::new(3, 0)), None);
    }

    #[test]
    fn empty_cell_blocks_only_when_zero_is_a_wall() {
        let dims = MapDimensions::new(2, 1);
        let map = TileMap::new(
            dims,
            vec![TileSet::new(1, 4)],
            vec![TileLayer::new("ground", vec![0, 2])],
        )
        .unwrap();

        assert_eq!(
            classify(&map, &walls(&[3]), Position::new(0, 0)),
            Some(TerrainKind::Floor)
        );
        assert_eq!(
            classify(&map, &walls(&[0]), Position::new(0, 0)),
            Some(TerrainKind::Wall)
        );
    }

    #[test]
    fn invisible_layers_are_ignored() {
        let dims = MapDimensions::new(1, 1);
        let mut hidden = TileLayer::new("hidden", vec![3]);
        hidden.visible = false;
        let map = TileMap::new(
            dims,
            vec![TileSet::new(1, 4)],
            vec![TileLayer::new("ground", vec![1]), hidden],
        )
        .unwrap();

        assert_eq!(map.tile_stack(Position::ORIGIN), Some(vec![1]));
    }

    #[test]
    fn rejects_mismatched_layer() {
        let err = TileMap::new(
            MapDimensions::new(2, 2),
            Vec::new(),
            vec![TileLayer::new("short", vec![1, 1, 1])],
        )
        .unwrap_err();
        assert!(matches!(err, MapError::LayerSizeMismatch { expected: 4, actual: 3, .. }));
    }
}
