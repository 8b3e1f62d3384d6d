//! Healing tiers derived from a single heal roll.

/// Health levels a heal roll restores before the ceiling is applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HealTier {
    Failed = 0,
    Minor = 1,
    Good = 2,
    Major = 3,
}

impl HealTier {
    pub const fn from_total(total: u32) -> Self {
        if total > 12 {
            HealTier::Major
        } else if total > 9 {
            HealTier::Good
        } else if total > 7 {
            HealTier::Minor
        } else {
            HealTier::Failed
        }
    }

    pub const fn amount(self) -> u32 {
        self as u32
    }

    pub const fn headline(self) -> &'static str {
        match self {
            HealTier::Major => "MAJOR HEALING!",
            HealTier::Good => "Good healing!",
            HealTier::Minor => "Minor healing!",
            HealTier::Failed => "Healing attempt fails!",
        }
    }
}
