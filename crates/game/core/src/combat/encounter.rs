//! Turn-by-turn encounter state machine.
//!
//! The player's action resolves completely, including the victory check,
//! before the enemy gets its turn. Once the encounter reaches a terminal
//! state every further action is rejected.

use crate::env::RngOracle;
use crate::error::{ErrorSeverity, GameError};
use crate::state::{Enemy, ItemSlot, Session};

use super::{CombatLog, EnemyIntent, HealTier, choose_intent, resolve_attack, resolve_heal};
use super::{AttackOutcome, AttackResult};

/// Greeting shown at the top of every combat log.
pub const WELCOME_LINE: &str = "Welcome to Q-Quest! Your adventure begins...";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CombatAction {
    Attack,
    Heal,
    Flee,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CombatState {
    InProgress,
    PlayerWon,
    PlayerLost,
    PlayerFled,
}

impl CombatState {
    pub fn is_terminal(self) -> bool {
        !matches!(self, CombatState::InProgress)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CombatError {
    #[error("encounter already ended ({0:?})")]
    Concluded(CombatState),
}

impl GameError for CombatError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Concluded(_) => "COMBAT_CONCLUDED",
        }
    }
}

/// A single fight between the session's player and one enemy.
///
/// The encounter fights a copy of the roster entry; the roster itself only
/// changes when the enemy falls, at which point exactly one entry matching
/// the enemy's position is removed.
#[derive(Clone, Debug)]
pub struct Encounter {
    enemy: Enemy,
    state: CombatState,
    log: CombatLog,
    gold_awarded: u32,
}

impl Encounter {
    pub fn begin(enemy: Enemy, player_name: &str, log_capacity: usize) -> Self {
        let mut log = CombatLog::new(log_capacity);
        log.push(WELCOME_LINE);
        log.push(format!("You encounter a {}!", enemy.name));

        tracing::debug!(
            player = player_name,
            enemy = %enemy.name,
            weapon = %enemy.active_item().name,
            position = %enemy.position,
            "encounter started"
        );

        Self {
            enemy,
            state: CombatState::InProgress,
            log,
            gold_awarded: 0,
        }
    }

    pub fn enemy(&self) -> &Enemy {
        &self.enemy
    }

    pub fn state(&self) -> CombatState {
        self.state
    }

    pub fn log(&self) -> &CombatLog {
        &self.log
    }

    /// Gold granted by the victory, 0 until the enemy falls.
    pub fn gold_awarded(&self) -> u32 {
        self.gold_awarded
    }

    /// Resolves one player action followed by the enemy's response.
    pub fn act(
        &mut self,
        action: CombatAction,
        session: &mut Session,
        rng: &mut (impl RngOracle + ?Sized),
    ) -> Result<CombatState, CombatError> {
        if self.state.is_terminal() {
            return Err(CombatError::Concluded(self.state));
        }

        match action {
            CombatAction::Flee => {
                self.log
                    .push(format!("{} flees from {}!", session.name, self.enemy.name));
                self.state = CombatState::PlayerFled;
                return Ok(self.state);
            }
            CombatAction::Attack => {
                let hit = self.player_attack(session, rng);
                if hit && self.enemy.is_defeated() {
                    self.claim_victory(session);
                    return Ok(self.state);
                }
            }
            CombatAction::Heal => self.player_heal(session, rng),
        }

        self.enemy_turn(session, rng);
        Ok(self.state)
    }

    /// Returns whether the attack landed.
    fn player_attack(
        &mut self,
        session: &mut Session,
        rng: &mut (impl RngOracle + ?Sized),
    ) -> bool {
        let weapon = session
            .items
            .get(ItemSlot::Attack)
            .map_or("bare hands", |item| item.name.as_str());
        self.log
            .push(format!("{} attacks with {}!", session.name, weapon));

        let result = resolve_attack(
            rng,
            session.items.modifier(ItemSlot::Attack),
            self.enemy.defense_modifier(),
        );
        let name = self.enemy.name.clone();
        self.land(&result, &name, Target::Enemy, session);
        result.is_hit()
    }

    fn player_heal(&mut self, session: &mut Session, rng: &mut (impl RngOracle + ?Sized)) {
        let Some(item) = session.items.get(ItemSlot::Heal).cloned() else {
            self.log.push(format!(
                "{} tries to heal but has no healing item!",
                session.name
            ));
            return;
        };

        self.log
            .push(format!("{} attempts to heal with {}!", session.name, item.name));
        let result = resolve_heal(rng, item.modifier, &mut session.health);
        match result.tier {
            HealTier::Failed => self.log.push(result.tier.headline()),
            tier => self.log.push(format!(
                "{} Restores {} HP!",
                tier.headline(),
                tier.amount()
            )),
        }
        if result.was_wasted() {
            self.log
                .push(format!("{} is already at full health!", session.name));
        }
    }

    fn enemy_turn(&mut self, session: &mut Session, rng: &mut (impl RngOracle + ?Sized)) {
        let active = self.enemy.active_item();
        match choose_intent(&self.enemy.health, &active) {
            EnemyIntent::Heal => {
                let name = self.enemy.name.clone();
                self.log.push(format!("{name} attempts to heal!"));
                let result = resolve_heal(rng, active.modifier, &mut self.enemy.health);
                match result.tier {
                    HealTier::Failed => self.log.push(format!("{name}'s healing attempt fails!")),
                    tier => self.log.push(format!(
                        "{} {name} restores {} HP!",
                        tier.headline(),
                        tier.amount()
                    )),
                }
                if result.was_wasted() {
                    self.log.push(format!("{name} is already at full health!"));
                }
            }
            EnemyIntent::Attack => {
                self.log.push(format!("{} attacks!", self.enemy.name));
                let result = resolve_attack(
                    rng,
                    self.enemy.attack_modifier(),
                    session.items.modifier(ItemSlot::Defense),
                );
                let name = session.name.clone();
                self.land(&result, &name, Target::Player, session);

                if session.is_defeated() {
                    self.log.push(format!("{} has been defeated!", session.name));
                    self.state = CombatState::PlayerLost;
                    tracing::debug!(enemy = %self.enemy.name, "player defeated");
                }
            }
        }
    }

    /// Applies an attack result to its target and narrates it.
    fn land(
        &mut self,
        result: &AttackResult,
        target_name: &str,
        target: Target,
        session: &mut Session,
    ) {
        let tier = match result.outcome {
            AttackOutcome::Miss => {
                self.log
                    .push(format!("Attack fails! {target_name} dodges the attack!"));
                return;
            }
            AttackOutcome::Hit(tier) => tier,
        };

        self.log.push(format!(
            "{} {target_name} takes {} damage!",
            tier.headline(),
            tier.amount()
        ));

        let health = match target {
            Target::Enemy => &mut self.enemy.health,
            Target::Player => &mut session.health,
        };
        health.apply_damage(tier.amount());
        if health.current() == 1 {
            self.log
                .push(format!("{target_name} is critically wounded!"));
        }
    }

    fn claim_victory(&mut self, session: &mut Session) {
        let gold = self.enemy.gold_reward();
        session.currency += gold;
        session.enemies_defeated += 1;
        self.gold_awarded = gold;

        if session.level.remove_enemy_at(self.enemy.position).is_none() {
            tracing::warn!(
                position = %self.enemy.position,
                "defeated enemy was not in the roster"
            );
        }

        self.log.push(format!(
            "{} is defeated! {} gains {gold} gold.",
            self.enemy.name, session.name
        ));
        self.state = CombatState::PlayerWon;

        tracing::debug!(
            enemy = %self.enemy.name,
            gold,
            remaining = session.level.enemies.len(),
            "enemy defeated"
        );
    }
}

#[derive(Clone, Copy)]
enum Target {
    Enemy,
    Player,
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::config::GameConfig;
    use crate::env::{MapDimensions, ScriptedRng, TileMap};
    use crate::state::{Equipment, HealthMeter, Item, Level, PlayerTemplate, Position};

    fn session_with(enemy: Enemy, player_items: Equipment) -> Session {
        let level = Level {
            id: "arena".into(),
            name: "Arena".into(),
            description: String::new(),
            map_path: "arena.ron".into(),
            map: TileMap::uniform(MapDimensions::new(6, 6), 2, 1),
            wall_tiles: BTreeSet::new(),
            starting_position: Position::new(1, 1),
            enemies: vec![enemy],
            player: PlayerTemplate {
                name: "Ayla".into(),
                items: player_items,
                ..PlayerTemplate::default()
            },
        };
        Session::seed(level, &GameConfig::default())
    }

    fn begin(session: &Session) -> Encounter {
        let enemy = session.level.enemies[0].clone();
        Encounter::begin(enemy, &session.name, 19)
    }

    #[test]
    fn opens_with_greeting() {
        let session = session_with(Enemy::new("Orc", Position::new(2, 1), 5), Equipment::empty());
        let encounter = begin(&session);
        let lines: Vec<&str> = encounter.log().iter().collect();
        assert_eq!(lines, vec![WELCOME_LINE, "You encounter a Orc!"]);
    }

    #[test]
    fn attack_then_enemy_reply_in_order() {
        let mut session =
            session_with(Enemy::new("Orc", Position::new(2, 1), 5), Equipment::empty());
        let mut encounter = begin(&session);
        // player 6+6 vs 1+1, enemy 1+1 vs 6+6
        let mut rng = ScriptedRng::new([6, 6, 1, 1, 1, 1, 6, 6]);

        let state = encounter
            .act(CombatAction::Attack, &mut session, &mut rng)
            .unwrap();

        assert_eq!(state, CombatState::InProgress);
        assert_eq!(encounter.enemy().health.current(), 2);
        let lines: Vec<&str> = encounter.log().iter().skip(2).collect();
        assert_eq!(
            lines,
            vec![
                "Ayla attacks with bare hands!",
                "CRITICAL HIT! Orc takes 3 damage!",
                "Orc attacks!",
                "Attack fails! Ayla dodges the attack!",
            ]
        );
    }

    #[test]
    fn victory_awards_gold_and_skips_enemy_turn() {
        let enemy = Enemy::new("Imp", Position::new(2, 1), 2)
            .with_currency(10)
            .with_items(Equipment::empty().with(ItemSlot::Attack, Item::new("Fork", 1)));
        let mut session = session_with(enemy, Equipment::empty());
        let mut encounter = begin(&session);
        let mut rng = ScriptedRng::new([6, 6, 1, 1]);

        let state = encounter
            .act(CombatAction::Attack, &mut session, &mut rng)
            .unwrap();

        assert_eq!(state, CombatState::PlayerWon);
        assert_eq!(rng.consumed(), 4);
        assert_eq!(session.currency, 100 + 15);
        assert_eq!(encounter.gold_awarded(), 15);
        assert_eq!(session.enemies_defeated, 1);
        assert!(session.level.is_cleared());
        assert_eq!(
            encounter.act(CombatAction::Attack, &mut session, &mut rng),
            Err(CombatError::Concluded(CombatState::PlayerWon))
        );
    }

    #[test]
    fn miss_against_zero_health_enemy_changes_nothing() {
        let mut enemy = Enemy::new("Husk", Position::new(2, 1), 3).with_currency(10);
        enemy.health = HealthMeter::new(0, 3);
        let mut session = session_with(enemy, Equipment::empty());
        let mut encounter = begin(&session);
        // player 1+1 vs 6+6 misses, enemy 1+1 vs 6+6 misses
        let mut rng = ScriptedRng::new([1, 1, 6, 6, 1, 1, 6, 6]);

        let state = encounter
            .act(CombatAction::Attack, &mut session, &mut rng)
            .unwrap();

        assert_eq!(state, CombatState::InProgress);
        assert_eq!(encounter.gold_awarded(), 0);
        assert_eq!(session.currency, 100);
        assert_eq!(session.enemies_defeated, 0);
        assert_eq!(session.level.enemies.len(), 1);
    }

    #[test]
    fn heal_without_item_is_a_logged_no_op() {
        let mut session =
            session_with(Enemy::new("Orc", Position::new(2, 1), 5), Equipment::empty());
        session.health = HealthMeter::new(3, 5);
        let mut encounter = begin(&session);
        let mut rng = ScriptedRng::new([1, 1, 1, 1]);

        encounter
            .act(CombatAction::Heal, &mut session, &mut rng)
            .unwrap();

        assert_eq!(
            encounter.log().iter().nth(2),
            Some("Ayla tries to heal but has no healing item!")
        );
        assert_eq!(session.health.current(), 2);
    }

    #[test]
    fn heal_reports_full_health() {
        let items = Equipment::empty().with(ItemSlot::Heal, Item::new("Herb", 1));
        let mut session = session_with(Enemy::new("Orc", Position::new(2, 1), 5), items);
        let mut encounter = begin(&session);
        // heal 6+6+1, then enemy 1+1 vs 6+6 misses
        let mut rng = ScriptedRng::new([6, 6, 1, 1, 6, 6]);

        encounter
            .act(CombatAction::Heal, &mut session, &mut rng)
            .unwrap();

        let lines: Vec<&str> = encounter.log().iter().skip(2).take(3).collect();
        assert_eq!(
            lines,
            vec![
                "Ayla attempts to heal with Herb!",
                "MAJOR HEALING! Restores 3 HP!",
                "Ayla is already at full health!",
            ]
        );
    }

    #[test]
    fn flee_ends_without_rolling() {
        let mut session =
            session_with(Enemy::new("Orc", Position::new(2, 1), 5), Equipment::empty());
        let mut encounter = begin(&session);
        let mut rng = ScriptedRng::new([6]);

        let state = encounter
            .act(CombatAction::Flee, &mut session, &mut rng)
            .unwrap();

        assert_eq!(state, CombatState::PlayerFled);
        assert_eq!(rng.consumed(), 0);
        assert_eq!(session.level.enemies.len(), 1);
    }
}
