//! Tiles
//!
//! A numbered piece with its position and merge provenance.

use serde::{Serialize, Deserialize};

use crate::core::position::Position;

/// Largest tile value a snapshot may hold.
///
/// Two tiles of this value still merge into a `u32`.
pub const MAX_TILE_VALUE: u32 = 1 << 30;

/// Stable tile identifier within one grid's arena.
///
/// Allocated from a monotonic counter and never reused, so a stale id can
/// be detected instead of aliasing a newer tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TileId(pub u32);

/// A single tile.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tile {
    /// Arena identifier
    pub id: TileId,

    /// Current cell
    pub position: Position,

    /// Face value (power of two, at least 2)
    pub value: u32,

    /// Cell before the current move (for animation only)
    pub previous_position: Option<Position>,

    /// The two tiles combined into this one during the current move
    pub merged_from: Option<[TileId; 2]>,
}

impl Tile {
    /// Create a new tile. A value of 0 becomes 2.
    pub fn new(id: TileId, position: Position, value: u32) -> Self {
        Self {
            id,
            position,
            value: if value == 0 { 2 } else { value },
            previous_position: None,
            merged_from: None,
        }
    }

    /// Remember the current cell as the animation origin.
    #[inline]
    pub fn save_position(&mut self) {
        self.previous_position = Some(self.position);
    }

    /// Move to `position`. Leaves `previous_position` alone.
    #[inline]
    pub fn update_position(&mut self, position: Position) {
        self.position = position;
    }

    /// Value after merging with an equal tile, or `None` if it would overflow.
    #[inline]
    pub fn merged_value(&self) -> Option<u32> {
        self.value.checked_mul(2)
    }

    /// Whether this tile was produced by a merge this move.
    #[inline]
    pub fn is_merged(&self) -> bool {
        self.merged_from.is_some()
    }
}
