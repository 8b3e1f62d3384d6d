//! Error types for the screen flow.

use crate::combat::CombatError;
use crate::error::{ErrorSeverity, GameError};
use crate::loot::LootError;

use super::Screen;

/// Errors surfaced while routing input through [`super::GameFlow`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum FlowError {
    #[error("input `{input}` does not apply to the {name} screen", name = .screen.as_str())]
    UnexpectedInput {
        screen: Screen,
        input: &'static str,
    },

    #[error("no active session")]
    NoSession,

    #[error("no enemy at the encounter position")]
    MissingEnemy,

    #[error("no encounter in progress")]
    NoEncounter,

    #[error("combat action failed: {0}")]
    Combat(#[from] CombatError),

    #[error("loot action failed: {0}")]
    Loot(#[from] LootError),
}

impl FlowError {
    pub fn unexpected(screen: Screen, input: &'static str) -> Self {
        Self::UnexpectedInput { screen, input }
    }
}

impl GameError for FlowError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::UnexpectedInput { .. } => ErrorSeverity::Validation,
            Self::NoSession | Self::MissingEnemy | Self::NoEncounter => ErrorSeverity::Internal,
            Self::Combat(error) => error.severity(),
            Self::Loot(error) => error.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnexpectedInput { .. } => "FLOW_UNEXPECTED_INPUT",
            Self::NoSession => "FLOW_NO_SESSION",
            Self::MissingEnemy => "FLOW_MISSING_ENEMY",
            Self::NoEncounter => "FLOW_NO_ENCOUNTER",
            Self::Combat(error) => error.error_code(),
            Self::Loot(error) => error.error_code(),
        }
    }
}
