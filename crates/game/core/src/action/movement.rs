use bitflags::bitflags;

use crate::config::GameConfig;
use crate::error::{ErrorSeverity, GameError};
use crate::state::{Position, Session};

bitflags! {
    /// Direction inputs held during one tick.
    ///
    /// Several may be active at once; [`DirectionKeys::resolve`] honours only
    /// the first in up, down, left, right order.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct DirectionKeys: u8 {
        const UP    = 1 << 0;
        const DOWN  = 1 << 1;
        const LEFT  = 1 << 2;
        const RIGHT = 1 << 3;
    }
}

impl DirectionKeys {
    pub fn resolve(self) -> Option<CardinalDirection> {
        if self.contains(Self::UP) {
            Some(CardinalDirection::North)
        } else if self.contains(Self::DOWN) {
            Some(CardinalDirection::South)
        } else if self.contains(Self::LEFT) {
            Some(CardinalDirection::West)
        } else if self.contains(Self::RIGHT) {
            Some(CardinalDirection::East)
        } else {
            None
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MoveError {
    #[error("destination {destination} is out of bounds")]
    OutOfBounds { destination: Position },

    #[error("destination {destination} is blocked")]
    Blocked { destination: Position },
}

impl GameError for MoveError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Recoverable
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::OutOfBounds { .. } => "MOVE_OUT_OF_BOUNDS",
            Self::Blocked { .. } => "MOVE_BLOCKED",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CardinalDirection {
    North,
    South,
    East,
    West,
}

impl CardinalDirection {
    /// Screen-space step: north decreases the row index.
    pub fn delta(self) -> (i32, i32) {
        match self {
            CardinalDirection::North => (0, -1),
            CardinalDirection::South => (0, 1),
            CardinalDirection::East => (1, 0),
            CardinalDirection::West => (-1, 0),
        }
    }
}

/// A single one-tile step request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoveAction {
    pub direction: CardinalDirection,
}

impl MoveAction {
    pub fn new(direction: CardinalDirection) -> Self {
        Self { direction }
    }

    pub fn destination_from(&self, origin: Position) -> Position {
        let (dx, dy) = self.direction.delta();
        origin.offset(dx, dy)
    }

    /// Checks bounds and terrain, returning the destination when it is walkable.
    pub fn pre_validate(&self, session: &Session) -> Result<Position, MoveError> {
        let destination = self.destination_from(session.position);
        match session.level.terrain_at(destination) {
            None => Err(MoveError::OutOfBounds { destination }),
            Some(terrain) if !terrain.is_passable() => Err(MoveError::Blocked { destination }),
            Some(_) => Ok(destination),
        }
    }
}

/// Result of one navigation tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    /// No direction held.
    Idle,
    /// A previous step is still cooling down.
    CoolingDown,
    Moved(Position),
    Rejected(MoveError),
    /// The destination holds a live enemy. The player stays put.
    Encounter(Position),
}

/// Debounced grid movement for the map screen.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Navigator {
    step_cooldown_ms: u32,
    blocked_cooldown_ms: u32,
    cooldown_ms: u32,
}

impl Navigator {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            step_cooldown_ms: config.step_cooldown_ms,
            blocked_cooldown_ms: config.blocked_cooldown_ms,
            cooldown_ms: 0,
        }
    }

    pub fn cooldown_ms(&self) -> u32 {
        self.cooldown_ms
    }

    /// Clears any pending cooldown, e.g. when returning to the map.
    pub fn reset(&mut self) {
        self.cooldown_ms = 0;
    }

    /// Advances the cooldown by `elapsed_ms` and attempts at most one step.
    pub fn tick(
        &mut self,
        session: &mut Session,
        keys: DirectionKeys,
        elapsed_ms: u32,
    ) -> MoveOutcome {
        self.cooldown_ms = self.cooldown_ms.saturating_sub(elapsed_ms);
        if self.cooldown_ms > 0 {
            return MoveOutcome::CoolingDown;
        }

        let Some(direction) = keys.resolve() else {
            return MoveOutcome::Idle;
        };

        let action = MoveAction::new(direction);
        let destination = match action.pre_validate(session) {
            Ok(destination) => destination,
            Err(error) => {
                tracing::trace!(%error, "move rejected");
                self.cooldown_ms = self.blocked_cooldown_ms;
                return MoveOutcome::Rejected(error);
            }
        };

        if session.level.enemy_at(destination).is_some() {
            tracing::debug!(from = %session.position, enemy = %destination, "enemy collision");
            session.begin_encounter(destination);
            return MoveOutcome::Encounter(destination);
        }

        session.position = destination;
        self.cooldown_ms = self.step_cooldown_ms;
        tracing::trace!(to = %destination, "moved");
        MoveOutcome::Moved(destination)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::env::{MapDimensions, TileMap};
    use crate::state::{Enemy, Level, PlayerTemplate};

    const WALL_GID: u32 = 2;

    fn session() -> Session {
        let mut map = TileMap::uniform(MapDimensions::new(5, 5), 2, 1);
        map.set_gid(0, Position::new(2, 1), WALL_GID);
        let level = Level {
            id: "yard".into(),
            name: "Yard".into(),
            description: String::new(),
            map_path: "yard.ron".into(),
            map,
            wall_tiles: BTreeSet::from([WALL_GID]),
            starting_position: Position::new(2, 2),
            enemies: vec![Enemy::new("Wolf", Position::new(3, 2), 5)],
            player: PlayerTemplate::default(),
        };
        Session::seed(level, &GameConfig::default())
    }

    #[test]
    fn direction_priority_is_up_down_left_right() {
        let all = DirectionKeys::all();
        assert_eq!(all.resolve(), Some(CardinalDirection::North));
        assert_eq!(
            (DirectionKeys::DOWN | DirectionKeys::LEFT).resolve(),
            Some(CardinalDirection::South)
        );
        assert_eq!(
            (DirectionKeys::RIGHT | DirectionKeys::LEFT).resolve(),
            Some(CardinalDirection::West)
        );
        assert_eq!(DirectionKeys::empty().resolve(), None);
    }

    #[test]
    fn successful_step_starts_cooldown() {
        let mut session = session();
        let mut nav = Navigator::new(&GameConfig::default());

        let outcome = nav.tick(&mut session, DirectionKeys::DOWN, 16);
        assert_eq!(outcome, MoveOutcome::Moved(Position::new(2, 3)));
        assert_eq!(nav.cooldown_ms(), 150);

        assert_eq!(
            nav.tick(&mut session, DirectionKeys::DOWN, 100),
            MoveOutcome::CoolingDown
        );
        assert_eq!(
            nav.tick(&mut session, DirectionKeys::DOWN, 50),
            MoveOutcome::Moved(Position::new(2, 4))
        );
    }

    #[test]
    fn wall_is_rejected_with_short_cooldown() {
        let mut session = session();
        let mut nav = Navigator::new(&GameConfig::default());

        let outcome = nav.tick(&mut session, DirectionKeys::UP, 0);
        assert_eq!(
            outcome,
            MoveOutcome::Rejected(MoveError::Blocked {
                destination: Position::new(2, 1)
            })
        );
        assert_eq!(session.position, Position::new(2, 2));
        assert_eq!(nav.cooldown_ms(), 75);
    }

    #[test]
    fn map_edge_is_rejected() {
        let mut session = session();
        session.position = Position::new(0, 0);
        let mut nav = Navigator::new(&GameConfig::default());

        assert!(matches!(
            nav.tick(&mut session, DirectionKeys::LEFT, 0),
            MoveOutcome::Rejected(MoveError::OutOfBounds { .. })
        ));
        assert_eq!(session.position, Position::ORIGIN);
    }

    #[test]
    fn enemy_collision_triggers_encounter_without_moving() {
        let mut session = session();
        let mut nav = Navigator::new(&GameConfig::default());

        let outcome = nav.tick(&mut session, DirectionKeys::RIGHT, 0);
        assert_eq!(outcome, MoveOutcome::Encounter(Position::new(3, 2)));
        assert_eq!(session.position, Position::new(2, 2));
        assert_eq!(session.current_enemy, Some(Position::new(3, 2)));
        assert_eq!(session.pre_combat_position, Some(Position::new(2, 2)));
    }
}
