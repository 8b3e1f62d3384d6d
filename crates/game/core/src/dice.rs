//! Two-dice resolution: every contested roll in the game is `2d6 + modifier`.

use core::fmt;

use crate::env::RngOracle;

/// Number of faces on each die.
pub const DIE_SIDES: u32 = 6;

/// Both faces of a roll together with the modifier that was added.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DiceRoll {
    pub first: u32,
    pub second: u32,
    pub modifier: u32,
    pub total: u32,
}

impl DiceRoll {
    /// Builds a roll from known faces.
    pub const fn from_faces(first: u32, second: u32, modifier: u32) -> Self {
        Self {
            first,
            second,
            modifier,
            total: first + second + modifier,
        }
    }
}

impl fmt::Display for DiceRoll {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}+{}+{}={}",
            self.first, self.second, self.modifier, self.total
        )
    }
}

/// Rolls two independent six-sided dice and adds `modifier`.
pub fn roll(rng: &mut (impl RngOracle + ?Sized), modifier: u32) -> DiceRoll {
    let first = rng.roll_die(DIE_SIDES);
    let second = rng.roll_die(DIE_SIDES);
    DiceRoll::from_faces(first, second, modifier)
}
