//! Loot offers from a defeated enemy.
//!
//! Each occupied enemy slot becomes an offer. Taking one overwrites the
//! player's slot of the same kind without comparison and concludes the
//! table; dismissing it concludes it without changes.

use crate::error::{ErrorSeverity, GameError};
use crate::state::{Enemy, Equipment, Item, ItemSlot};

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LootOffer {
    pub slot: ItemSlot,
    pub item: Item,
}

impl LootOffer {
    /// Display value in gold.
    pub fn value(&self, multiplier: u32) -> u32 {
        self.item.modifier * multiplier
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LootError {
    #[error("no {0} item on offer")]
    NoOffer(ItemSlot),

    #[error("loot already collected")]
    Concluded,
}

impl GameError for LootError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::NoOffer(_) => ErrorSeverity::Recoverable,
            Self::Concluded => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NoOffer(_) => "LOOT_NO_OFFER",
            Self::Concluded => "LOOT_CONCLUDED",
        }
    }
}

/// Offers in attack, defense, heal order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LootTable {
    offers: Vec<LootOffer>,
    concluded: bool,
}

impl LootTable {
    pub fn from_equipment(items: &Equipment) -> Self {
        let offers = items
            .iter()
            .filter(|(_, item)| !item.name.is_empty())
            .map(|(slot, item)| LootOffer {
                slot,
                item: item.clone(),
            })
            .collect();
        Self {
            offers,
            concluded: false,
        }
    }

    pub fn from_enemy(enemy: &Enemy) -> Self {
        Self::from_equipment(&enemy.items)
    }

    pub fn offers(&self) -> &[LootOffer] {
        &self.offers
    }

    pub fn is_empty(&self) -> bool {
        self.offers.is_empty()
    }

    pub fn is_concluded(&self) -> bool {
        self.concluded
    }

    /// Moves the offer for `slot` into `equipment`, returning the item it replaced.
    pub fn take(
        &mut self,
        slot: ItemSlot,
        equipment: &mut Equipment,
    ) -> Result<Option<Item>, LootError> {
        if self.concluded {
            return Err(LootError::Concluded);
        }
        let index = self
            .offers
            .iter()
            .position(|offer| offer.slot == slot)
            .ok_or(LootError::NoOffer(slot))?;

        let offer = self.offers.remove(index);
        tracing::debug!(%slot, item = %offer.item.name, "loot taken");
        let replaced = equipment.equip(slot, offer.item);
        self.concluded = true;
        Ok(replaced)
    }

    /// Ends the interaction without taking anything.
    pub fn dismiss(&mut self) {
        self.concluded = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enemy_items() -> Equipment {
        Equipment::empty()
            .with(ItemSlot::Heal, Item::new("Salve", 2))
            .with(ItemSlot::Attack, Item::new("Spear", 3))
    }

    #[test]
    fn offers_follow_slot_order() {
        let table = LootTable::from_equipment(&enemy_items());
        let slots: Vec<ItemSlot> = table.offers().iter().map(|offer| offer.slot).collect();
        assert_eq!(slots, vec![ItemSlot::Attack, ItemSlot::Heal]);
        assert_eq!(table.offers()[0].value(20), 60);
    }

    #[test]
    fn take_overwrites_and_concludes() {
        let mut table = LootTable::from_equipment(&enemy_items());
        let mut player = Equipment::empty().with(ItemSlot::Attack, Item::new("Dagger", 5));

        let replaced = table.take(ItemSlot::Attack, &mut player).unwrap();

        assert_eq!(replaced, Some(Item::new("Dagger", 5)));
        assert_eq!(player.get(ItemSlot::Attack), Some(&Item::new("Spear", 3)));
        assert!(table.offers().iter().all(|offer| offer.slot != ItemSlot::Attack));
        assert!(table.is_concluded());
        assert_eq!(
            table.take(ItemSlot::Heal, &mut player),
            Err(LootError::Concluded)
        );
    }

    #[test]
    fn missing_slot_is_recoverable() {
        let mut table = LootTable::from_equipment(&enemy_items());
        let mut player = Equipment::empty();
        let err = table.take(ItemSlot::Defense, &mut player).unwrap_err();

        assert_eq!(err, LootError::NoOffer(ItemSlot::Defense));
        assert!(err.severity().is_recoverable());
        assert!(!table.is_concluded());
    }
}
