//! Snapshots
//!
//! Two views of a grid:
//! - [`GridState`]: the persisted form. Position and value only, addressed
//!   `[x][y]`, JSON shape `{ "size": n, "cells": [[null | {"position": {"x", "y"}, "value"}]] }`.
//! - [`RenderFrame`]: what a renderer needs after a move, including the
//!   animation-only fields that are never persisted.

use serde::{Serialize, Deserialize};

use crate::core::position::Position;
use crate::error::SnapshotError;
use crate::game::grid::Grid;

// =============================================================================
// PERSISTED STATE
// =============================================================================

/// Persisted form of one tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileState {
    /// Cell the tile occupies
    pub position: Position,
    /// Face value
    pub value: u32,
}

/// Persisted form of a grid.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridState {
    /// Side length
    pub size: usize,
    /// `cells[x][y]`, None for empty slots
    pub cells: Vec<Vec<Option<TileState>>>,
}

impl GridState {
    /// Encode as JSON.
    pub fn to_json(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Decode from JSON and check that it describes a valid grid.
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        let state: GridState = serde_json::from_str(json)?;
        Grid::from_state(&state)?;
        Ok(state)
    }

    /// Encode with bincode.
    pub fn to_bytes(&self) -> Result<Vec<u8>, SnapshotError> {
        Ok(bincode::serialize(self)?)
    }

    /// Decode from bincode and check that it describes a valid grid.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SnapshotError> {
        let state: GridState = bincode::deserialize(bytes)?;
        Grid::from_state(&state)?;
        Ok(state)
    }
}

// =============================================================================
// RENDER FRAME
// =============================================================================

/// One of the two tiles consumed by a merge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct MergeSource {
    /// Cell the source started the move in
    pub previous_position: Option<Position>,
    /// Source value (half the merged value)
    pub value: u32,
}

/// A tile as the renderer sees it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct RenderTile {
    /// Current cell
    pub position: Position,
    /// Face value
    pub value: u32,
    /// Where to animate from. None means the tile just appeared.
    pub previous_position: Option<Position>,
    /// Present when the tile was produced by a merge this move.
    pub merged_from: Option<[MergeSource; 2]>,
}

/// Everything needed to redraw the board after a move.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RenderFrame {
    /// Side length
    pub size: usize,
    /// Occupied cells, x outer, y inner
    pub tiles: Vec<RenderTile>,
}

impl RenderFrame {
    /// Capture the current grid.
    pub fn capture(grid: &Grid) -> Self {
        let source = |id| {
            grid.tile(id).map(|tile| MergeSource {
                previous_position: tile.previous_position,
                value: tile.value,
            })
        };

        let tiles = grid
            .tiles()
            .map(|tile| RenderTile {
                position: tile.position,
                value: tile.value,
                previous_position: tile.previous_position,
                merged_from: tile
                    .merged_from
                    .and_then(|[a, b]| Some([source(a)?, source(b)?])),
            })
            .collect();

        Self { size: grid.size(), tiles }
    }

    /// Value at `position`, if occupied.
    pub fn value_at(&self, position: Position) -> Option<u32> {
        self.tiles
            .iter()
            .find(|tile| tile.position == position)
            .map(|tile| tile.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GridError;

    fn sample_state() -> GridState {
        let mut grid = Grid::new(4);
        grid.add_tile(Position::new(0, 0), 2);
        grid.add_tile(Position::new(2, 3), 16);
        grid.serialize()
    }

    #[test]
    fn test_json_shape() {
        let state = Grid::new(2).serialize();
        assert_eq!(state.to_json().unwrap(), r#"{"size":2,"cells":[[null,null],[null,null]]}"#);

        let mut grid = Grid::new(2);
        grid.add_tile(Position::new(1, 0), 4);
        let json = grid.serialize().to_json().unwrap();
        assert!(json.contains(r#"{"position":{"x":1,"y":0},"value":4}"#));
    }

    #[test]
    fn test_json_roundtrip() {
        let state = sample_state();
        let decoded = GridState::from_json(&state.to_json().unwrap()).unwrap();
        assert_eq!(decoded, state);
    }

    #[test]
    fn test_bytes_roundtrip() {
        let state = sample_state();
        let decoded = GridState::from_bytes(&state.to_bytes().unwrap()).unwrap();
        assert_eq!(decoded, state);
    }

    #[test]
    fn test_from_json_rejects_invalid_grid() {
        let json = r#"{"size":2,"cells":[[{"position":{"x":1,"y":1},"value":2},null],[null,null]]}"#;
        let err = GridState::from_json(json).unwrap_err();
        assert!(matches!(err, SnapshotError::Grid(GridError::MisplacedTile { .. })));
    }

    #[test]
    fn test_from_json_rejects_unmergeable_values() {
        let json = r#"{"size":2,"cells":[[{"position":{"x":0,"y":0},"value":2147483648},null],[{"position":{"x":1,"y":0},"value":2147483648},null]]}"#;
        let err = GridState::from_json(json).unwrap_err();
        assert!(matches!(
            err,
            SnapshotError::Grid(GridError::InvalidValue { value: 2147483648, .. })
        ));
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(matches!(GridState::from_json("{not json"), Err(SnapshotError::Json(_))));
    }

    #[test]
    fn test_render_frame_new_tile_has_no_origin() {
        let mut grid = Grid::new(4);
        grid.add_tile(Position::new(3, 1), 2);

        let frame = RenderFrame::capture(&grid);
        assert_eq!(frame.size, 4);
        assert_eq!(frame.tiles.len(), 1);
        assert!(frame.tiles[0].previous_position.is_none());
        assert!(frame.tiles[0].merged_from.is_none());
        assert_eq!(frame.value_at(Position::new(3, 1)), Some(2));
    }
}
