/// Game configuration constants and tunable parameters.
///
/// Every field has a default so partial TOML files only override what they name.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct GameConfig {
    /// Delay after a successful step before the next move is accepted.
    pub step_cooldown_ms: u32,
    /// Shorter delay applied after a rejected move (wall or map edge).
    pub blocked_cooldown_ms: u32,
    /// Number of combat log lines retained; older lines are discarded first.
    pub combat_log_capacity: usize,
    /// Health ceiling for the player (health levels, not hit points).
    pub player_max_health: u32,
    /// Gold granted once when a session is seeded from a level.
    pub starting_gold: u32,
    /// Target frame rate of the client loop.
    pub tick_rate_hz: u32,
    /// Display value of a loot offer per point of modifier.
    pub loot_value_multiplier: u32,
    /// Stats substituted for fields missing from enemy records.
    pub enemy_defaults: EnemyDefaults,
}

impl GameConfig {
    // ===== runtime-tunable defaults =====
    pub const DEFAULT_STEP_COOLDOWN_MS: u32 = 150;
    pub const DEFAULT_COMBAT_LOG_CAPACITY: usize = 19;
    pub const DEFAULT_PLAYER_MAX_HEALTH: u32 = 5;
    pub const DEFAULT_STARTING_GOLD: u32 = 100;
    pub const DEFAULT_TICK_RATE_HZ: u32 = 60;
    pub const DEFAULT_LOOT_VALUE_MULTIPLIER: u32 = 20;

    pub fn new() -> Self {
        Self {
            step_cooldown_ms: Self::DEFAULT_STEP_COOLDOWN_MS,
            blocked_cooldown_ms: Self::DEFAULT_STEP_COOLDOWN_MS / 2,
            combat_log_capacity: Self::DEFAULT_COMBAT_LOG_CAPACITY,
            player_max_health: Self::DEFAULT_PLAYER_MAX_HEALTH,
            starting_gold: Self::DEFAULT_STARTING_GOLD,
            tick_rate_hz: Self::DEFAULT_TICK_RATE_HZ,
            loot_value_multiplier: Self::DEFAULT_LOOT_VALUE_MULTIPLIER,
            enemy_defaults: EnemyDefaults::default(),
        }
    }

    /// Milliseconds between two frames of the client loop.
    pub fn frame_interval_ms(&self) -> u64 {
        1000 / u64::from(self.tick_rate_hz.max(1))
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Fallback enemy stats used when a level record omits them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct EnemyDefaults {
    pub health: u32,
    pub attack: u32,
    pub defense: u32,
    pub currency: u32,
}

impl Default for EnemyDefaults {
    fn default() -> Self {
        Self {
            health: 50,
            attack: 8,
            defense: 3,
            currency: 10,
        }
    }
}
