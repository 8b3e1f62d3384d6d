use crate::action::{DirectionKeys, MoveError};
use crate::combat::CombatAction;
use crate::state::{Item, ItemSlot, Level, Position};

/// How a run through a level ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RunOutcome {
    /// Every enemy on the level was defeated.
    Victory,
    /// The player's health reached zero.
    Defeat,
}

/// Screen currently holding control.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Screen {
    Title,
    LevelSelect,
    Map,
    Combat,
    Loot,
    /// End-of-run acknowledgment before returning to level selection.
    RunEnded(RunOutcome),
    Exit,
}

impl Screen {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Screen::Title => "title",
            Screen::LevelSelect => "level_select",
            Screen::Map => "map",
            Screen::Combat => "combat",
            Screen::Loot => "loot",
            Screen::RunEnded(_) => "run_ended",
            Screen::Exit => "exit",
        }
    }
}

/// Pending transition produced by a screen handler.
///
/// The flow applies it in the same step that produced it, so nothing is left
/// to re-trigger on the next input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    Stay,
    OpenLevelSelect,
    EnterMap,
    StartCombat { enemy: Position },
    ShowLoot,
    ReturnToMap,
    EndRun(RunOutcome),
    ReturnToLevelSelect,
    ReturnToTitle,
    Quit,
}

/// Input delivered to the flow by the frontend.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FlowInput {
    /// Leave the title screen.
    Start,
    /// Back out of level selection to the title.
    Back,
    SelectLevel(Level),
    /// One frame on the map with the direction keys held during it.
    Tick { keys: DirectionKeys, elapsed_ms: u32 },
    Combat(CombatAction),
    TakeLoot(ItemSlot),
    DismissLoot,
    /// Confirm the end-of-run screen.
    Acknowledge,
    Quit,
}

impl FlowInput {
    pub const fn as_str(&self) -> &'static str {
        match self {
            FlowInput::Start => "start",
            FlowInput::Back => "back",
            FlowInput::SelectLevel(_) => "select_level",
            FlowInput::Tick { .. } => "tick",
            FlowInput::Combat(_) => "combat",
            FlowInput::TakeLoot(_) => "take_loot",
            FlowInput::DismissLoot => "dismiss_loot",
            FlowInput::Acknowledge => "acknowledge",
            FlowInput::Quit => "quit",
        }
    }
}

/// Notable things that happened while handling input.
///
/// Drained by the frontend for status lines and persistence.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FlowEvent {
    SessionStarted { level_id: String },
    Moved { to: Position },
    MoveRejected(MoveError),
    EncounterStarted { enemy: String, position: Position },
    EnemyDefeated { level_id: String, position: Position, gold: u32 },
    Fled { restored_to: Position },
    LootTaken { slot: ItemSlot, item: Item, replaced: Option<Item> },
    RunEnded { outcome: RunOutcome, enemies_defeated: u32 },
}
