use std::path::PathBuf;

use game_content::LevelCatalog;
use game_core::{GameConfig, ItemSlot, Position, TerrainKind};

fn levels_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../../levels")
}

#[test]
fn bundled_crypt_loads_and_is_playable() {
    let config = GameConfig::default();
    let catalog = LevelCatalog::scan(levels_dir(), &config).expect("levels directory exists");
    let entry = catalog.find("crypt").expect("crypt is bundled");
    let level = entry.load().expect("crypt loads");

    assert_eq!(level.terrain_at(level.starting_position), Some(TerrainKind::Floor));
    assert_eq!(level.terrain_at(Position::ORIGIN), Some(TerrainKind::Wall));
    assert_eq!(level.enemies.len(), 2);

    for enemy in &level.enemies {
        assert_eq!(
            level.terrain_at(enemy.position),
            Some(TerrainKind::Floor),
            "{} must stand on floor",
            enemy.name
        );
    }

    let keeper = level
        .enemies
        .iter()
        .find(|enemy| enemy.name == "Crypt Keeper")
        .expect("keeper present");
    assert_eq!(keeper.health.maximum(), 6);
    assert_eq!(keeper.attack, config.enemy_defaults.attack);
    assert_eq!(keeper.items.modifier(ItemSlot::Defense), 1);
}
