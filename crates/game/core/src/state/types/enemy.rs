use super::{ActiveItem, Equipment, HealthMeter, ItemSlot, Position};

/// Gold added to the reward per point of the enemy's active item modifier.
pub const GOLD_PER_ITEM_MODIFIER: u32 = 5;

/// An enemy placed on a level map.
///
/// `attack` and `defense` are descriptive stats shown on the combat card;
/// contested rolls only ever use item modifiers.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Enemy {
    pub name: String,
    pub description: String,
    pub health: HealthMeter,
    pub attack: u32,
    pub defense: u32,
    pub currency: u32,
    pub position: Position,
    pub items: Equipment,
    pub image: Option<String>,
    pub icon: Option<String>,
}

impl Enemy {
    /// Enemy at full health with no items and no portraits.
    pub fn new(name: impl Into<String>, position: Position, max_health: u32) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            health: HealthMeter::full(max_health),
            attack: 0,
            defense: 0,
            currency: 0,
            position,
            items: Equipment::empty(),
            image: None,
            icon: None,
        }
    }

    #[must_use]
    pub fn with_items(mut self, items: Equipment) -> Self {
        self.items = items;
        self
    }

    #[must_use]
    pub fn with_currency(mut self, currency: u32) -> Self {
        self.currency = currency;
        self
    }

    pub fn active_item(&self) -> ActiveItem {
        ActiveItem::select(&self.items)
    }

    /// Modifier added to the enemy's attack rolls.
    ///
    /// Only an attack-type active item contributes.
    pub fn attack_modifier(&self) -> u32 {
        let active = self.active_item();
        match active.slot {
            ItemSlot::Attack => active.modifier,
            _ => 0,
        }
    }

    /// Modifier added to the enemy's defense rolls.
    pub fn defense_modifier(&self) -> u32 {
        self.items.modifier(ItemSlot::Defense)
    }

    /// Gold granted to the player when this enemy is defeated.
    pub fn gold_reward(&self) -> u32 {
        self.currency + GOLD_PER_ITEM_MODIFIER * self.active_item().modifier
    }

    /// True when at least one slot holds a named item.
    pub fn has_loot(&self) -> bool {
        self.items.iter().any(|(_, item)| !item.name.is_empty())
    }

    pub fn is_defeated(&self) -> bool {
        self.health.is_depleted()
    }
}
