//! Level descriptor loader.
//!
//! A level lives in its own directory:
//!
//! ```text
//! levels/forest/
//! ├── level.json
//! ├── forest.ron      (tile map named by the `path` field)
//! └── hero.png        (portraits, carried through untouched)
//! ```
//!
//! Enemy records in the wild come in two item shapes, an object keyed by
//! slot or a list of typed entries. Both are normalized here; anything else
//! becomes an empty item set with a warning.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use anyhow::Context;
use game_core::config::EnemyDefaults;
use game_core::{
    Enemy, Equipment, GameConfig, HealthMeter, Item, ItemSlot, Level, PlayerTemplate, Position,
    TileId,
};
use serde::Deserialize;
use serde_json::Value;

use crate::loaders::map::TileMapLoader;
use crate::loaders::{LoadResult, read_file};

/// File name of the descriptor inside a level directory.
pub const LEVEL_FILE: &str = "level.json";

/// Player position used when a level omits `starting_position`.
pub const DEFAULT_STARTING_POSITION: Position = Position { x: 2, y: 2 };

const UNKNOWN_ENEMY: &str = "Unknown Enemy";

/// `level.json` as written on disk.
#[derive(Debug, Clone, Deserialize)]
struct LevelJson {
    #[serde(default)]
    id: Option<String>,
    name: String,
    #[serde(default)]
    description: String,
    path: String,
    #[serde(default)]
    starting_position: Option<Position>,
    #[serde(default)]
    wall_tiles: Vec<TileId>,
    #[serde(default)]
    enemies: Vec<Value>,
    #[serde(default)]
    player: PlayerJson,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct PlayerJson {
    #[serde(default)]
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    items: Value,
    #[serde(default)]
    image: Option<String>,
    #[serde(default)]
    icon: Option<String>,
    #[serde(default)]
    health: Option<u32>,
}

/// Everything in a level file except the tile map.
///
/// Cheap to read, so the catalog keeps one per level for the selection list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelDescriptor {
    pub id: String,
    pub name: String,
    pub description: String,
    /// Directory holding `level.json`; relative asset paths resolve against it.
    pub directory: PathBuf,
    pub map_path: String,
    pub starting_position: Position,
    pub wall_tiles: BTreeSet<TileId>,
    pub enemies: Vec<Enemy>,
    pub player: PlayerTemplate,
}

impl LevelDescriptor {
    pub fn file_path(&self) -> PathBuf {
        self.directory.join(LEVEL_FILE)
    }

    /// Resolves an asset path from the level file against the level directory.
    pub fn asset_path(&self, relative: &str) -> PathBuf {
        self.directory.join(relative)
    }
}

/// Loader for level descriptors from JSON files.
pub struct LevelLoader;

impl LevelLoader {
    /// Reads `level_dir/level.json` and its tile map.
    pub fn load(level_dir: &Path, config: &GameConfig) -> LoadResult<Level> {
        let descriptor = Self::read_descriptor(level_dir, &config.enemy_defaults)?;
        Self::build(&descriptor)
    }

    /// Reads and normalizes `level_dir/level.json` without touching the map.
    pub fn read_descriptor(
        level_dir: &Path,
        defaults: &EnemyDefaults,
    ) -> LoadResult<LevelDescriptor> {
        let path = level_dir.join(LEVEL_FILE);
        let content = read_file(&path)?;
        Self::parse_descriptor(&content, level_dir, defaults)
            .with_context(|| format!("Failed to parse level {}", path.display()))
    }

    /// Parses level JSON text. `level_dir` names the level when `id` is absent.
    pub fn parse_descriptor(
        content: &str,
        level_dir: &Path,
        defaults: &EnemyDefaults,
    ) -> LoadResult<LevelDescriptor> {
        let raw: LevelJson = serde_json::from_str(content)?;

        let id = raw.id.unwrap_or_else(|| {
            level_dir
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| raw.name.clone())
        });

        let enemies = raw
            .enemies
            .iter()
            .enumerate()
            .filter_map(|(index, value)| normalize_enemy(value, defaults, &id, index))
            .collect();

        let player = PlayerTemplate {
            name: raw.player.name,
            description: raw.player.description,
            items: normalize_items(&raw.player.items, &id, "player"),
            image: raw.player.image,
            icon: raw.player.icon,
            health: raw.player.health,
        };

        Ok(LevelDescriptor {
            id,
            name: raw.name,
            description: raw.description,
            directory: level_dir.to_path_buf(),
            map_path: raw.path,
            starting_position: raw.starting_position.unwrap_or(DEFAULT_STARTING_POSITION),
            wall_tiles: raw.wall_tiles.into_iter().collect(),
            enemies,
            player,
        })
    }

    /// Loads the tile map named by `descriptor` and assembles the level.
    pub fn build(descriptor: &LevelDescriptor) -> LoadResult<Level> {
        let map = TileMapLoader::load(&descriptor.asset_path(&descriptor.map_path))?;

        tracing::info!(
            level = %descriptor.id,
            enemies = descriptor.enemies.len(),
            walls = descriptor.wall_tiles.len(),
            "level loaded"
        );

        Ok(Level {
            id: descriptor.id.clone(),
            name: descriptor.name.clone(),
            description: descriptor.description.clone(),
            map_path: descriptor.map_path.clone(),
            map,
            wall_tiles: descriptor.wall_tiles.clone(),
            starting_position: descriptor.starting_position,
            enemies: descriptor.enemies.clone(),
            player: descriptor.player.clone(),
        })
    }

    /// Removes the enemy record standing at `removed_at` from a level file.
    ///
    /// Only the first matching record goes. Every other record, including
    /// ones the loader skipped, keeps its exact on-disk content. Returns
    /// whether a record was removed.
    pub fn write_roster(level_file: &Path, removed_at: Position) -> LoadResult<bool> {
        let content = read_file(level_file)?;
        let mut document: Value = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse level {}", level_file.display()))?;

        let Some(enemies) = document.get_mut("enemies").and_then(Value::as_array_mut) else {
            tracing::warn!(path = %level_file.display(), "level file has no enemy list");
            return Ok(false);
        };
        let Some(index) = enemies
            .iter()
            .position(|record| record_position(record) == Some(removed_at))
        else {
            tracing::warn!(
                path = %level_file.display(),
                position = %removed_at,
                "no enemy record at defeated position"
            );
            return Ok(false);
        };
        enemies.remove(index);
        let remaining = enemies.len();

        let rendered = serde_json::to_string_pretty(&document)?;
        std::fs::write(level_file, rendered)
            .with_context(|| format!("Failed to write level {}", level_file.display()))?;

        tracing::info!(
            path = %level_file.display(),
            position = %removed_at,
            remaining,
            "enemy roster written"
        );
        Ok(true)
    }
}

fn record_position(record: &Value) -> Option<Position> {
    record
        .get("position")
        .and_then(|value| Position::deserialize(value).ok())
}

fn u32_field(record: &Value, key: &str) -> Option<u32> {
    record
        .get(key)
        .and_then(Value::as_u64)
        .and_then(|value| u32::try_from(value).ok())
}

fn string_field(record: &Value, key: &str) -> Option<String> {
    record.get(key).and_then(Value::as_str).map(str::to_owned)
}

/// Builds an enemy from a loosely-typed record, filling gaps from `defaults`.
///
/// Records without a usable position cannot be placed and are dropped.
fn normalize_enemy(
    record: &Value,
    defaults: &EnemyDefaults,
    level_id: &str,
    index: usize,
) -> Option<Enemy> {
    let Some(position) = record_position(record) else {
        tracing::warn!(level = level_id, index, "enemy without a valid position skipped");
        return None;
    };

    let name = string_field(record, "name").unwrap_or_else(|| UNKNOWN_ENEMY.to_owned());
    let health = match u32_field(record, "health") {
        Some(0) => {
            tracing::warn!(
                level = level_id,
                enemy = %name,
                "enemy with zero health reset to default"
            );
            defaults.health
        }
        Some(health) => health,
        None => defaults.health,
    };
    let max_health = u32_field(record, "max_health")
        .filter(|max| *max > 0)
        .unwrap_or(health);
    let items = match record.get("items") {
        Some(items) => normalize_items(items, level_id, &name),
        None => Equipment::empty(),
    };

    Some(Enemy {
        description: string_field(record, "description").unwrap_or_default(),
        health: HealthMeter::new(health, max_health),
        attack: u32_field(record, "attack").unwrap_or(defaults.attack),
        defense: u32_field(record, "defense").unwrap_or(defaults.defense),
        currency: u32_field(record, "currency").unwrap_or(defaults.currency),
        position,
        items,
        image: string_field(record, "image"),
        icon: string_field(record, "icon"),
        name,
    })
}

/// Normalizes an item set given as an object keyed by slot or a list of
/// `{type, name, modifier}` entries.
fn normalize_items(value: &Value, level_id: &str, owner: &str) -> Equipment {
    let mut equipment = Equipment::empty();
    match value {
        Value::Null => {}
        Value::Object(slots) => {
            for (key, entry) in slots {
                match (ItemSlot::from_tag(key), parse_item(entry)) {
                    (Some(slot), Some(item)) => {
                        equipment.equip(slot, item);
                    }
                    _ => tracing::warn!(
                        level = level_id,
                        owner,
                        slot = %key,
                        "unusable item ignored"
                    ),
                }
            }
        }
        Value::Array(entries) => {
            for entry in entries {
                let slot = entry
                    .get("type")
                    .and_then(Value::as_str)
                    .and_then(ItemSlot::from_tag);
                match (slot, parse_item(entry)) {
                    (Some(slot), Some(item)) => {
                        equipment.equip(slot, item);
                    }
                    _ => tracing::warn!(level = level_id, owner, "unusable item entry ignored"),
                }
            }
        }
        other => {
            tracing::warn!(
                level = level_id,
                owner,
                kind = ?other,
                "items must be an object or a list"
            );
        }
    }
    equipment
}

fn parse_item(entry: &Value) -> Option<Item> {
    let name = entry.get("name").and_then(Value::as_str)?;
    let modifier = u32_field(entry, "modifier").unwrap_or(0);
    Some(Item::new(name, modifier))
}
