//! Equipment system for characters.
//!
//! Every character carries at most one item in each of three fixed slots.
//! The slot decides what the item does: attack items add to attack rolls,
//! defense items to defense rolls, heal items to healing rolls.

use std::borrow::Cow;

/// The three fixed equipment slots.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, strum::Display, strum::EnumIter,
)]
#[strum(serialize_all = "lowercase")]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum ItemSlot {
    Attack,
    Defense,
    Heal,
}

impl ItemSlot {
    pub const ALL: [ItemSlot; 3] = [ItemSlot::Attack, ItemSlot::Defense, ItemSlot::Heal];

    /// Parses a slot tag as written in level files.
    ///
    /// Accepts `attack`, `defense`, `defend` and `heal` in any letter case.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "attack" => Some(ItemSlot::Attack),
            "defense" | "defend" => Some(ItemSlot::Defense),
            "heal" => Some(ItemSlot::Heal),
            _ => None,
        }
    }

    /// Upper-case type label shown on item cards.
    pub const fn label(self) -> &'static str {
        match self {
            ItemSlot::Attack => "ATTACK",
            ItemSlot::Defense => "DEFEND",
            ItemSlot::Heal => "HEAL",
        }
    }
}

/// A named item with a non-negative roll modifier.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Item {
    pub name: String,
    pub modifier: u32,
}

impl Item {
    pub fn new(name: impl Into<String>, modifier: u32) -> Self {
        Self {
            name: name.into(),
            modifier,
        }
    }
}

/// Items held in the three slots. Each slot holds at most one item.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Equipment {
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub attack: Option<Item>,

    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub defense: Option<Item>,

    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub heal: Option<Item>,
}

impl Equipment {
    /// Creates empty equipment.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builder-style helper that fills `slot`.
    #[must_use]
    pub fn with(mut self, slot: ItemSlot, item: Item) -> Self {
        self.equip(slot, item);
        self
    }

    pub fn get(&self, slot: ItemSlot) -> Option<&Item> {
        match slot {
            ItemSlot::Attack => self.attack.as_ref(),
            ItemSlot::Defense => self.defense.as_ref(),
            ItemSlot::Heal => self.heal.as_ref(),
        }
    }

    fn slot_mut(&mut self, slot: ItemSlot) -> &mut Option<Item> {
        match slot {
            ItemSlot::Attack => &mut self.attack,
            ItemSlot::Defense => &mut self.defense,
            ItemSlot::Heal => &mut self.heal,
        }
    }

    /// Modifier of the item in `slot`, or 0 when the slot is empty.
    pub fn modifier(&self, slot: ItemSlot) -> u32 {
        self.get(slot).map_or(0, |item| item.modifier)
    }

    /// Puts `item` into `slot`, returning the item it replaced.
    pub fn equip(&mut self, slot: ItemSlot, item: Item) -> Option<Item> {
        self.slot_mut(slot).replace(item)
    }

    pub fn is_empty(&self) -> bool {
        ItemSlot::ALL.iter().all(|slot| self.get(*slot).is_none())
    }

    /// Occupied slots in attack, defense, heal order.
    pub fn iter(&self) -> impl Iterator<Item = (ItemSlot, &Item)> {
        ItemSlot::ALL
            .into_iter()
            .filter_map(|slot| self.get(slot).map(|item| (slot, item)))
    }
}

/// The single item an enemy wields when choosing what to do.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActiveItem {
    pub name: Cow<'static, str>,
    pub slot: ItemSlot,
    pub modifier: u32,
}

impl ActiveItem {
    /// Wielded when an enemy has no attack item.
    pub const UNARMED: ActiveItem = ActiveItem {
        name: Cow::Borrowed("Fists"),
        slot: ItemSlot::Attack,
        modifier: 0,
    };

    /// The attack item if there is one, otherwise [`ActiveItem::UNARMED`].
    pub fn select(equipment: &Equipment) -> Self {
        match equipment.get(ItemSlot::Attack) {
            Some(item) => Self {
                name: Cow::Owned(item.name.clone()),
                slot: ItemSlot::Attack,
                modifier: item.modifier,
            },
            None => Self::UNARMED,
        }
    }
}
