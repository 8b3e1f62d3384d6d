//! Enemy decision policy.

use crate::state::{ActiveItem, HealthMeter, ItemSlot};

/// Health at or below which an enemy holding a heal item tries to recover.
pub const LOW_HEALTH_THRESHOLD: u32 = 2;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnemyIntent {
    Attack,
    Heal,
}

/// Picks the enemy's move for this turn from its health and wielded item.
pub fn choose_intent(health: &HealthMeter, active: &ActiveItem) -> EnemyIntent {
    if health.current() <= LOW_HEALTH_THRESHOLD && active.slot == ItemSlot::Heal {
        EnemyIntent::Heal
    } else {
        EnemyIntent::Attack
    }
}
