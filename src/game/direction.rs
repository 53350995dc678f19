//! Move Directions
//!
//! The four compass moves, their unit vectors, and the cell traversal
//! order used when resolving a move.

use std::fmt;
use serde::{Serialize, Deserialize};

use crate::core::position::Vector;

/// A direction to slide tiles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Direction {
    /// Towards y = 0
    Up = 0,
    /// Towards x = size - 1
    Right = 1,
    /// Towards y = size - 1
    Down = 2,
    /// Towards x = 0
    Left = 3,
}

impl Direction {
    /// All directions in index order.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    /// Unit vector for this direction.
    #[inline]
    pub fn vector(self) -> Vector {
        match self {
            Direction::Up => Vector::new(0, -1),
            Direction::Right => Vector::new(1, 0),
            Direction::Down => Vector::new(0, 1),
            Direction::Left => Vector::new(-1, 0),
        }
    }

    /// Numeric index (0-3).
    #[inline]
    pub fn index(self) -> u8 {
        self as u8
    }

    /// Get direction from index (0-3).
    pub fn from_index(index: u8) -> Option<Direction> {
        match index {
            0 => Some(Direction::Up),
            1 => Some(Direction::Right),
            2 => Some(Direction::Down),
            3 => Some(Direction::Left),
            _ => None,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::Up => "up",
            Direction::Right => "right",
            Direction::Down => "down",
            Direction::Left => "left",
        };
        f.write_str(name)
    }
}

/// Order in which cells are visited during a move.
///
/// Cells farthest along the direction of travel come first, so a chain of
/// tiles compacts without a tile sliding into one that has not moved yet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Traversals {
    /// Column order (outer loop)
    pub xs: Vec<usize>,
    /// Row order (inner loop)
    pub ys: Vec<usize>,
}

impl Traversals {
    /// Build traversal order for a grid of `size` moving along `vector`.
    pub fn build(size: usize, vector: Vector) -> Self {
        let mut xs: Vec<usize> = (0..size).collect();
        let mut ys: Vec<usize> = (0..size).collect();

        if vector.dx == 1 {
            xs.reverse();
        }
        if vector.dy == 1 {
            ys.reverse();
        }

        Self { xs, ys }
    }
}
