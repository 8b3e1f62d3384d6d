//! Deterministic game rules and data types shared by the loaders and the client.
//!
//! `game-core` defines the canonical rules (dice, combat, movement, loot) and
//! the screen flow that threads a single [`Session`] through them. It performs
//! no I/O: levels arrive already parsed, randomness comes in through
//! [`RngOracle`], and all state mutation flows through [`engine::GameFlow`].
pub mod action;
pub mod combat;
pub mod config;
pub mod dice;
pub mod engine;
pub mod env;
pub mod error;
pub mod loot;
pub mod state;

pub use action::{CardinalDirection, DirectionKeys, MoveAction, MoveError, MoveOutcome, Navigator};
pub use combat::{
    AttackOutcome, AttackResult, CombatAction, CombatError, CombatLog, CombatState, DamageTier,
    Encounter, EnemyIntent, HealResult, HealTier,
};
pub use config::{EnemyDefaults, GameConfig};
pub use dice::{DIE_SIDES, DiceRoll, roll};
pub use engine::{FlowError, FlowEvent, FlowInput, GameFlow, RunOutcome, Screen, Transition};
pub use env::{
    MapDimensions, MapError, MapOracle, PcgRng, RngOracle, ScriptedRng, TerrainKind, TileId,
    TileLayer, TileMap, TileSet,
};
pub use error::{ErrorSeverity, GameError};
pub use loot::{LootError, LootOffer, LootTable};
pub use state::{
    ActiveItem, Enemy, Equipment, HealthMeter, Item, ItemSlot, Level, PlayerTemplate, Position,
    Session,
};
