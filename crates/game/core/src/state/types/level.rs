use std::collections::BTreeSet;

use crate::env::{MapOracle, TerrainKind, TileId, TileMap, classify};

use super::{Enemy, Equipment, Position};

/// Partial character record a level uses to seed the session.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerTemplate {
    pub name: String,
    pub description: String,
    pub items: Equipment,
    pub image: Option<String>,
    pub icon: Option<String>,
    /// Starting health; the configured ceiling when absent.
    pub health: Option<u32>,
}

/// A playable level: map geometry, wall rule, enemy roster and player seed.
///
/// Only the roster changes during play, and only through
/// [`Level::remove_enemy_at`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Level {
    pub id: String,
    pub name: String,
    pub description: String,
    /// Tile-map reference as written in the level file.
    pub map_path: String,
    pub map: TileMap,
    pub wall_tiles: BTreeSet<TileId>,
    pub starting_position: Position,
    pub enemies: Vec<Enemy>,
    pub player: PlayerTemplate,
}

impl Level {
    pub fn enemy_at(&self, position: Position) -> Option<&Enemy> {
        self.enemies.iter().find(|enemy| enemy.position == position)
    }

    /// Removes the first enemy standing on `position`.
    ///
    /// At most one entry leaves the roster even when several share the cell.
    pub fn remove_enemy_at(&mut self, position: Position) -> Option<Enemy> {
        let index = self
            .enemies
            .iter()
            .position(|enemy| enemy.position == position)?;
        Some(self.enemies.remove(index))
    }

    pub fn is_cleared(&self) -> bool {
        self.enemies.is_empty()
    }

    /// Terrain at `position`, or `None` outside the map.
    pub fn terrain_at(&self, position: Position) -> Option<TerrainKind> {
        classify(&self.map, &self.wall_tiles, position)
    }

    pub fn contains(&self, position: Position) -> bool {
        self.map.contains(position)
    }
}
