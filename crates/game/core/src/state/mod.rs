//! Authoritative session state.
//!
//! A [`Session`] is created once per level selection and threaded by mutable
//! reference through the map, combat and loot screens. It is discarded when
//! the run ends and the player returns to level selection.
pub mod types;

pub use types::{
    ActiveItem, Enemy, Equipment, GOLD_PER_ITEM_MODIFIER, HealthMeter, Item, ItemSlot, Level,
    PlayerTemplate, Position,
};

use crate::config::GameConfig;

/// The player's run through one level.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Session {
    pub name: String,
    pub description: String,
    pub health: HealthMeter,
    pub currency: u32,
    pub items: Equipment,
    pub image: Option<String>,
    pub icon: Option<String>,

    /// Current tile coordinates on the level map.
    pub position: Position,

    /// Level being played. Its roster shrinks as enemies fall.
    pub level: Level,

    /// Position of the enemy being fought, if any.
    pub current_enemy: Option<Position>,

    /// Where the player stood when the current encounter began.
    pub pre_combat_position: Option<Position>,

    /// Snapshot of the last defeated enemy while its loot is on offer.
    pub loot_enemy: Option<Enemy>,

    /// Enemies defeated during this run.
    pub enemies_defeated: u32,
}

impl Session {
    /// Seeds a session from the level's player template.
    pub fn seed(level: Level, config: &GameConfig) -> Self {
        let template = level.player.clone();
        let maximum = config.player_max_health;
        let health = HealthMeter::new(template.health.unwrap_or(maximum), maximum);

        tracing::debug!(
            level = %level.id,
            player = %template.name,
            health = %health,
            "session seeded"
        );

        Self {
            name: template.name,
            description: template.description,
            health,
            currency: config.starting_gold,
            items: template.items,
            image: template.image,
            icon: template.icon,
            position: level.starting_position,
            level,
            current_enemy: None,
            pre_combat_position: None,
            loot_enemy: None,
            enemies_defeated: 0,
        }
    }

    /// The enemy currently being fought, looked up in the live roster.
    pub fn current_enemy(&self) -> Option<&Enemy> {
        self.current_enemy
            .and_then(|position| self.level.enemy_at(position))
    }

    /// Records an encounter with the enemy at `enemy_position`.
    ///
    /// The player's own coordinates are snapshotted so they can be restored
    /// when the encounter ends.
    pub fn begin_encounter(&mut self, enemy_position: Position) {
        self.current_enemy = Some(enemy_position);
        self.pre_combat_position = Some(self.position);
    }

    /// Clears encounter bookkeeping and restores the pre-combat position.
    pub fn end_encounter(&mut self) {
        self.current_enemy = None;
        if let Some(position) = self.pre_combat_position.take() {
            self.position = position;
        }
    }

    pub fn is_defeated(&self) -> bool {
        self.health.is_depleted()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::env::{MapDimensions, TileMap};

    fn level() -> Level {
        Level {
            id: "meadow".into(),
            name: "Meadow".into(),
            description: String::new(),
            map_path: "meadow.ron".into(),
            map: TileMap::uniform(MapDimensions::new(5, 5), 2, 1),
            wall_tiles: BTreeSet::new(),
            starting_position: Position::new(2, 2),
            enemies: vec![Enemy::new("Slime", Position::new(3, 2), 3)],
            player: PlayerTemplate {
                name: "Hero".into(),
                items: Equipment::empty().with(ItemSlot::Attack, Item::new("Sword", 2)),
                health: Some(9),
                ..PlayerTemplate::default()
            },
        }
    }

    #[test]
    fn seed_copies_template_and_grants_starting_gold() {
        let config = GameConfig::default();
        let session = Session::seed(level(), &config);

        assert_eq!(session.name, "Hero");
        assert_eq!(session.position, Position::new(2, 2));
        assert_eq!(session.currency, config.starting_gold);
        assert_eq!(session.health.current(), config.player_max_health);
        assert_eq!(session.items.modifier(ItemSlot::Attack), 2);
    }

    #[test]
    fn encounter_bookkeeping_round_trips_position() {
        let mut session = Session::seed(level(), &GameConfig::default());
        session.begin_encounter(Position::new(3, 2));
        assert_eq!(session.current_enemy().map(|e| e.name.as_str()), Some("Slime"));

        session.position = Position::new(4, 4);
        session.end_encounter();
        assert_eq!(session.position, Position::new(2, 2));
        assert!(session.current_enemy.is_none());
        assert!(session.pre_combat_position.is_none());
    }
}
