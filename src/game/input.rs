//! Input Adapter
//!
//! Turns raw key names and swipe gestures into [`Direction`]s, and records
//! the directions a game was played with so it can be replayed.
//! Nothing here touches the grid; callers hand the result to
//! [`MoveEngine::dispatch`](crate::game::engine::MoveEngine::dispatch).

use serde::{Serialize, Deserialize};

use crate::game::direction::Direction;

/// Gestures shorter than this on both axes are ignored.
pub const MIN_SWIPE_DISTANCE: i32 = 10;

/// Map a key name to a direction.
///
/// Arrow keys and WASD. Anything else is not a move.
pub fn direction_for_key(key: &str) -> Option<Direction> {
    match key {
        "ArrowUp" | "w" => Some(Direction::Up),
        "ArrowRight" | "d" => Some(Direction::Right),
        "ArrowDown" | "s" => Some(Direction::Down),
        "ArrowLeft" | "a" => Some(Direction::Left),
        _ => None,
    }
}

/// Map a swipe displacement to a direction.
///
/// The dominant axis wins; equal displacement counts as vertical.
/// Screen coordinates grow downwards, so a positive `dy` is [`Direction::Down`].
pub fn direction_for_swipe(dx: i32, dy: i32) -> Option<Direction> {
    let abs_dx = dx.unsigned_abs();
    let abs_dy = dy.unsigned_abs();

    if abs_dx.max(abs_dy) < MIN_SWIPE_DISTANCE as u32 {
        return None;
    }

    if abs_dx > abs_dy {
        Some(if dx > 0 { Direction::Right } else { Direction::Left })
    } else {
        Some(if dy > 0 { Direction::Down } else { Direction::Up })
    }
}

// =============================================================================
// MOVE LOG
// =============================================================================

/// Every direction dispatched in one game, in order.
///
/// Together with the seed this is enough to rebuild the game exactly.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveLog {
    /// Seed the game was started with
    pub rng_seed: u64,

    /// Directions in dispatch order, including ones that moved nothing
    moves: Vec<Direction>,
}

impl MoveLog {
    /// Create an empty log for a game seeded with `rng_seed`.
    pub fn new(rng_seed: u64) -> Self {
        Self {
            rng_seed,
            moves: Vec::with_capacity(256),
        }
    }

    /// Record a dispatched direction.
    pub fn record(&mut self, direction: Direction) {
        self.moves.push(direction);
    }

    /// Recorded directions.
    pub fn moves(&self) -> &[Direction] {
        &self.moves
    }

    /// Number of recorded directions.
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    /// Check if nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }
}

// =============================================================================
// TESTS
// =============================================================================
