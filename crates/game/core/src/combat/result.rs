//! Roll resolution for attacks and heals.

use crate::dice::{DiceRoll, roll};
use crate::env::RngOracle;
use crate::state::HealthMeter;

use super::{DamageTier, HealTier, damage_tier};

/// Outcome of an attack roll.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AttackOutcome {
    /// Defense total beat the attack total.
    Miss,
    /// Attack landed with the given tier.
    Hit(DamageTier),
}

/// Both rolls of a contested attack and their outcome.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttackResult {
    pub attack: DiceRoll,
    pub defense: DiceRoll,
    pub outcome: AttackOutcome,
}

impl AttackResult {
    /// Health levels this attack removes (0 on a miss).
    pub fn damage(&self) -> u32 {
        match self.outcome {
            AttackOutcome::Miss => 0,
            AttackOutcome::Hit(tier) => tier.amount(),
        }
    }

    pub fn is_hit(&self) -> bool {
        matches!(self.outcome, AttackOutcome::Hit(_))
    }
}

/// Rolls attack then defense and compares them.
pub fn resolve_attack(
    rng: &mut (impl RngOracle + ?Sized),
    attack_modifier: u32,
    defense_modifier: u32,
) -> AttackResult {
    let attack = roll(rng, attack_modifier);
    let defense = roll(rng, defense_modifier);
    let outcome = match damage_tier(attack.total, defense.total) {
        Some(tier) => AttackOutcome::Hit(tier),
        None => AttackOutcome::Miss,
    };

    tracing::trace!(%attack, %defense, ?outcome, "attack resolved");

    AttackResult {
        attack,
        defense,
        outcome,
    }
}

/// A heal roll and what it did to the healer's meter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HealResult {
    pub roll: DiceRoll,
    pub tier: HealTier,
    /// Levels actually restored after the ceiling was applied.
    pub restored: u32,
}

impl HealResult {
    /// The roll succeeded but the healer was already at its ceiling.
    pub fn was_wasted(&self) -> bool {
        self.tier != HealTier::Failed && self.restored == 0
    }
}

/// Rolls a heal and applies it to `health`, capped at the meter's maximum.
pub fn resolve_heal(
    rng: &mut (impl RngOracle + ?Sized),
    heal_modifier: u32,
    health: &mut HealthMeter,
) -> HealResult {
    let roll = roll(rng, heal_modifier);
    let tier = HealTier::from_total(roll.total);
    let restored = health.restore(tier.amount());

    tracing::trace!(%roll, ?tier, restored, "heal resolved");

    HealResult {
        roll,
        tier,
        restored,
    }
}
