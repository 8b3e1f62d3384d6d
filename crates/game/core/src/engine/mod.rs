//! Screen flow controller.
//!
//! [`GameFlow`] owns the session and routes every frontend input to the
//! handler of the screen that currently has control. Handlers return a
//! [`Transition`] which is applied before `handle` returns, so a transition
//! can never fire twice.

mod errors;
mod screen;

pub use errors::FlowError;
pub use screen::{FlowEvent, FlowInput, RunOutcome, Screen, Transition};

use crate::action::{DirectionKeys, MoveOutcome, Navigator};
use crate::combat::{CombatAction, CombatState, Encounter};
use crate::config::GameConfig;
use crate::env::RngOracle;
use crate::loot::LootTable;
use crate::state::{ItemSlot, Level, Session};

/// Finite-state controller over the title, level select, map, combat and
/// loot screens.
#[derive(Clone, Debug)]
pub struct GameFlow {
    config: GameConfig,
    screen: Screen,
    session: Option<Session>,
    navigator: Navigator,
    encounter: Option<Encounter>,
    loot: Option<LootTable>,
    events: Vec<FlowEvent>,
}

impl GameFlow {
    pub fn new(config: GameConfig) -> Self {
        let navigator = Navigator::new(&config);
        Self {
            config,
            screen: Screen::Title,
            session: None,
            navigator,
            encounter: None,
            loot: None,
            events: Vec::new(),
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn encounter(&self) -> Option<&Encounter> {
        self.encounter.as_ref()
    }

    pub fn loot(&self) -> Option<&LootTable> {
        self.loot.as_ref()
    }

    pub fn is_running(&self) -> bool {
        self.screen != Screen::Exit
    }

    /// Takes the events recorded since the last call.
    pub fn drain_events(&mut self) -> Vec<FlowEvent> {
        std::mem::take(&mut self.events)
    }

    /// Routes one input and applies the resulting transition.
    ///
    /// Returns the screen in control afterwards. Errors leave the flow on
    /// the screen it was on.
    pub fn handle(
        &mut self,
        input: FlowInput,
        rng: &mut (impl RngOracle + ?Sized),
    ) -> Result<Screen, FlowError> {
        let screen = self.screen;
        let transition = match (screen, input) {
            (_, FlowInput::Quit) => Transition::Quit,
            (Screen::Title, FlowInput::Start) => Transition::OpenLevelSelect,
            (Screen::LevelSelect, FlowInput::Back) => Transition::ReturnToTitle,
            (Screen::LevelSelect, FlowInput::SelectLevel(level)) => self.select_level(level),
            (Screen::Map, FlowInput::Tick { keys, elapsed_ms }) => {
                self.map_tick(keys, elapsed_ms)?
            }
            (Screen::Combat, FlowInput::Combat(action)) => self.combat_action(action, rng)?,
            (Screen::Loot, FlowInput::TakeLoot(slot)) => self.take_loot(slot)?,
            (Screen::Loot, FlowInput::DismissLoot) => {
                if let Some(table) = self.loot.as_mut() {
                    table.dismiss();
                }
                Transition::ReturnToMap
            }
            (Screen::RunEnded(_), FlowInput::Acknowledge) => Transition::ReturnToLevelSelect,
            (screen, input) => return Err(FlowError::unexpected(screen, input.as_str())),
        };

        self.apply(transition)?;
        Ok(self.screen)
    }

    fn session_mut(&mut self) -> Result<&mut Session, FlowError> {
        self.session.as_mut().ok_or(FlowError::NoSession)
    }

    fn select_level(&mut self, level: Level) -> Transition {
        let session = Session::seed(level, &self.config);
        self.events.push(FlowEvent::SessionStarted {
            level_id: session.level.id.clone(),
        });
        self.session = Some(session);
        Transition::EnterMap
    }

    fn map_tick(&mut self, keys: DirectionKeys, elapsed_ms: u32) -> Result<Transition, FlowError> {
        let session = self.session.as_mut().ok_or(FlowError::NoSession)?;
        let transition = match self.navigator.tick(session, keys, elapsed_ms) {
            MoveOutcome::Idle | MoveOutcome::CoolingDown => Transition::Stay,
            MoveOutcome::Moved(to) => {
                self.events.push(FlowEvent::Moved { to });
                Transition::Stay
            }
            MoveOutcome::Rejected(error) => {
                self.events.push(FlowEvent::MoveRejected(error));
                Transition::Stay
            }
            MoveOutcome::Encounter(enemy) => Transition::StartCombat { enemy },
        };
        Ok(transition)
    }

    fn combat_action(
        &mut self,
        action: CombatAction,
        rng: &mut (impl RngOracle + ?Sized),
    ) -> Result<Transition, FlowError> {
        let session = self.session.as_mut().ok_or(FlowError::NoSession)?;
        let encounter = self.encounter.as_mut().ok_or(FlowError::NoEncounter)?;

        let transition = match encounter.act(action, session, rng)? {
            CombatState::InProgress => Transition::Stay,
            CombatState::PlayerFled => {
                if let Some(restored_to) = session.pre_combat_position {
                    self.events.push(FlowEvent::Fled { restored_to });
                }
                Transition::ReturnToMap
            }
            CombatState::PlayerLost => Transition::EndRun(RunOutcome::Defeat),
            CombatState::PlayerWon => {
                let enemy = encounter.enemy();
                self.events.push(FlowEvent::EnemyDefeated {
                    level_id: session.level.id.clone(),
                    position: enemy.position,
                    gold: encounter.gold_awarded(),
                });

                if session.level.is_cleared() {
                    Transition::EndRun(RunOutcome::Victory)
                } else if enemy.has_loot() {
                    session.loot_enemy = Some(enemy.clone());
                    Transition::ShowLoot
                } else {
                    Transition::ReturnToMap
                }
            }
        };
        Ok(transition)
    }

    fn take_loot(&mut self, slot: ItemSlot) -> Result<Transition, FlowError> {
        let session = self.session.as_mut().ok_or(FlowError::NoSession)?;
        let table = self.loot.as_mut().ok_or(FlowError::NoEncounter)?;

        let item = table
            .offers()
            .iter()
            .find(|offer| offer.slot == slot)
            .map(|offer| offer.item.clone());
        let replaced = table.take(slot, &mut session.items)?;
        if let Some(item) = item {
            self.events.push(FlowEvent::LootTaken {
                slot,
                item,
                replaced,
            });
        }
        Ok(Transition::ReturnToMap)
    }

    fn apply(&mut self, transition: Transition) -> Result<(), FlowError> {
        let next = match transition {
            Transition::Stay => return Ok(()),
            Transition::Quit => Screen::Exit,
            Transition::OpenLevelSelect => Screen::LevelSelect,
            Transition::ReturnToTitle => Screen::Title,
            Transition::EnterMap => {
                self.navigator.reset();
                Screen::Map
            }
            Transition::StartCombat { enemy } => {
                let capacity = self.config.combat_log_capacity;
                let session = self.session_mut()?;
                let Some(opponent) = session.level.enemy_at(enemy).cloned() else {
                    session.end_encounter();
                    return Err(FlowError::MissingEnemy);
                };
                let encounter = Encounter::begin(opponent, &session.name, capacity);
                self.events.push(FlowEvent::EncounterStarted {
                    enemy: encounter.enemy().name.clone(),
                    position: enemy,
                });
                self.encounter = Some(encounter);
                Screen::Combat
            }
            Transition::ShowLoot => {
                let session = self.session_mut()?;
                let table = session
                    .loot_enemy
                    .as_ref()
                    .map(LootTable::from_enemy)
                    .unwrap_or_default();
                self.encounter = None;
                self.loot = Some(table);
                Screen::Loot
            }
            Transition::ReturnToMap => {
                let session = self.session_mut()?;
                session.end_encounter();
                session.loot_enemy = None;
                self.encounter = None;
                self.loot = None;
                self.navigator.reset();
                Screen::Map
            }
            Transition::EndRun(outcome) => {
                let session = self.session_mut()?;
                session.end_encounter();
                let enemies_defeated = session.enemies_defeated;
                self.events.push(FlowEvent::RunEnded {
                    outcome,
                    enemies_defeated,
                });
                Screen::RunEnded(outcome)
            }
            Transition::ReturnToLevelSelect => {
                self.session = None;
                self.encounter = None;
                self.loot = None;
                Screen::LevelSelect
            }
        };

        tracing::debug!(
            from = self.screen.as_str(),
            to = next.as_str(),
            ?transition,
            "screen transition"
        );
        self.screen = next;
        Ok(())
    }
}
