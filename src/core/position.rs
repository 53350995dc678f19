//! Grid Coordinates
//!
//! Integer cell positions and unit step vectors.
//! Coordinates are signed so that out-of-bounds probes (one step past a wall)
//! are representable without wrapping.

use std::fmt;
use serde::{Serialize, Deserialize};

/// A cell coordinate, 0-indexed, addressed `[x][y]`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    /// Column
    pub x: i32,
    /// Row
    pub y: i32,
}

impl Position {
    /// Top-left cell
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    /// Create a new position.
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Position one step along `vector`.
    #[inline]
    pub fn step(self, vector: Vector) -> Self {
        Self {
            x: self.x + vector.dx,
            y: self.y + vector.dy,
        }
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Unit displacement for one of the four compass moves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Vector {
    /// X displacement (-1, 0 or +1)
    pub dx: i32,
    /// Y displacement (-1, 0 or +1)
    pub dy: i32,
}

impl Vector {
    /// Create a new vector.
    #[inline]
    pub const fn new(dx: i32, dy: i32) -> Self {
        Self { dx, dy }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step() {
        let p = Position::new(1, 1);
        assert_eq!(p.step(Vector::new(1, 0)), Position::new(2, 1));
        assert_eq!(p.step(Vector::new(0, -1)), Position::new(1, 0));
    }

    #[test]
    fn test_step_past_origin_goes_negative() {
        let p = Position::ORIGIN.step(Vector::new(-1, 0));
        assert_eq!(p, Position::new(-1, 0));
    }

    #[test]
    fn test_position_serde_shape() {
        let json = serde_json::to_string(&Position::new(2, 3)).unwrap();
        assert_eq!(json, r#"{"x":2,"y":3}"#);
    }
}
