pub mod common;
pub mod enemy;
pub mod equipment;
pub mod level;

pub use common::{HealthMeter, Position};

pub use enemy::{Enemy, GOLD_PER_ITEM_MODIFIER};

pub use equipment::{ActiveItem, Equipment, Item, ItemSlot};

pub use level::{Level, PlayerTemplate};
