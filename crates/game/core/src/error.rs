//! Error classification shared by every rule module.
//!
//! Each concern owns its error enum (`MoveError` next to movement,
//! `CombatError` next to the encounter, and so on). They all implement
//! [`GameError`] so the frontend can decide how loudly to report a failure
//! without matching on concrete types. No error is ever retried: the caller
//! keeps the current state and carries on.

/// How a rejected input should be treated by whoever sent it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Ordinary play, such as walking into a wall or picking an offer that
    /// is not there. Nothing changed; the player can try something else.
    Recoverable,

    /// The input does not apply to the current screen or encounter state.
    Validation,

    /// The flow reached a state its own transitions should rule out, e.g. a
    /// combat screen with no encounter.
    Internal,

    /// The session cannot continue.
    Fatal,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// True when the failure points at a bug rather than at player input.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Uniform view over the rule errors.
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    /// Stable upper-case code for logs and tests, e.g. `MOVE_BLOCKED`.
    fn error_code(&self) -> &'static str;
}
