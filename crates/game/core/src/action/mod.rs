//! Player intents on the map screen.
//!
//! Movement is the only map action: held direction keys are reduced to one
//! cardinal step per tick, validated against bounds and walls, and turned
//! into an encounter when the destination holds an enemy.

pub mod movement;

pub use movement::{
    CardinalDirection, DirectionKeys, MoveAction, MoveError, MoveOutcome, Navigator,
};
