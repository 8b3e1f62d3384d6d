//! Damage tiers derived from contested roll margins.

/// Discretized damage dealt by a successful attack.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DamageTier {
    Hit = 1,
    Strong = 2,
    Critical = 3,
}

impl DamageTier {
    /// Margin at or above which a hit is critical.
    pub const CRITICAL_MARGIN: u32 = 6;
    /// Margin at or above which a hit is strong.
    pub const STRONG_MARGIN: u32 = 3;

    pub const fn from_margin(margin: u32) -> Self {
        if margin >= Self::CRITICAL_MARGIN {
            DamageTier::Critical
        } else if margin >= Self::STRONG_MARGIN {
            DamageTier::Strong
        } else {
            DamageTier::Hit
        }
    }

    /// Health levels removed by this tier.
    pub const fn amount(self) -> u32 {
        self as u32
    }

    /// Combat log prefix announcing the tier.
    pub const fn headline(self) -> &'static str {
        match self {
            DamageTier::Critical => "CRITICAL HIT!",
            DamageTier::Strong => "Strong hit!",
            DamageTier::Hit => "Hit!",
        }
    }
}

/// Compares two roll totals.
///
/// Ties favour the attacker. Returns `None` on a miss.
pub fn damage_tier(attack_total: u32, defense_total: u32) -> Option<DamageTier> {
    attack_total
        .checked_sub(defense_total)
        .map(DamageTier::from_margin)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn tiers_follow_margin_bands() {
        assert_eq!(damage_tier(14, 2), Some(DamageTier::Critical));
        assert_eq!(damage_tier(8, 2), Some(DamageTier::Critical));
        assert_eq!(damage_tier(7, 2), Some(DamageTier::Strong));
        assert_eq!(damage_tier(5, 2), Some(DamageTier::Strong));
        assert_eq!(damage_tier(4, 2), Some(DamageTier::Hit));
        assert_eq!(damage_tier(2, 2), Some(DamageTier::Hit));
        assert_eq!(damage_tier(1, 2), None);
    }

    proptest! {
        #[test]
        fn damage_matches_margin(attack in 2u32..=22, defense in 2u32..=22) {
            let expected = if attack < defense {
                0
            } else {
                match attack - defense {
                    0..=2 => 1,
                    3..=5 => 2,
                    _ => 3,
                }
            };
            let actual = damage_tier(attack, defense).map_or(0, DamageTier::amount);
            prop_assert_eq!(actual, expected);
        }
    }
}
