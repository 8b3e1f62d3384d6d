//! Combat resolution system.
//!
//! Every contested action is a pair of `2d6 + modifier` rolls. The pure
//! helpers here turn rolls into damage and healing tiers; [`Encounter`]
//! strings them into player and enemy turns and applies the results to the
//! session.
//!
//! # Core Functions
//!
//! - `resolve_attack`: attack roll against defense roll, tiered by margin
//! - `resolve_heal`: heal roll applied to a health meter under its ceiling
//! - `choose_intent`: enemy policy for the coming turn

pub mod ai;
pub mod damage;
pub mod encounter;
pub mod heal;
pub mod log;
pub mod result;

pub use ai::{EnemyIntent, LOW_HEALTH_THRESHOLD, choose_intent};
pub use damage::{DamageTier, damage_tier};
pub use encounter::{CombatAction, CombatError, CombatState, Encounter, WELCOME_LINE};
pub use heal::HealTier;
pub use log::CombatLog;
pub use result::{AttackOutcome, AttackResult, HealResult, resolve_attack, resolve_heal};
