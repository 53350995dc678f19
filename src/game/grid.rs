//! Grid
//!
//! A size x size matrix of cells, addressed `[x][y]`.
//!
//! Tiles live in an arena keyed by [`TileId`]; a cell stores at most one id.
//! The grid is the only owner of slot occupancy. A tile being moved is
//! detached from its old slot before it is attached to the new one, and
//! [`Grid::remove_tile`] refuses to clear a slot that holds a different tile,
//! so no two slots can ever refer to the same tile.

use std::collections::{BTreeMap, BTreeSet};

use crate::core::hash::{compute_state_hash, StateHash};
use crate::core::position::Position;
use crate::core::rng::DeterministicRng;
use crate::error::GridError;
use crate::game::direction::Direction;
use crate::game::snapshot::{GridState, TileState};
use crate::game::tile::{Tile, TileId, MAX_TILE_VALUE};

/// The playing field.
#[derive(Clone, Debug)]
pub struct Grid {
    /// Side length
    size: usize,

    /// Slot occupancy, `cells[x][y]`
    cells: Vec<Vec<Option<TileId>>>,

    /// Tile arena (BTreeMap for deterministic iteration).
    ///
    /// Holds every tile in a slot plus the sources of this move's merges,
    /// which stay readable until the next move purges them.
    tiles: BTreeMap<TileId, Tile>,

    /// Next tile ID (monotonic counter)
    next_tile_id: u32,
}

impl Grid {
    /// Create an empty grid.
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![vec![None; size]; size],
            tiles: BTreeMap::new(),
            next_tile_id: 0,
        }
    }

    /// Side length.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Check if a position lies on the grid.
    #[inline]
    pub fn within_bounds(&self, position: Position) -> bool {
        let size = self.size as i32;
        position.x >= 0 && position.x < size && position.y >= 0 && position.y < size
    }

    fn slot(&self, position: Position) -> Option<TileId> {
        if self.within_bounds(position) {
            self.cells[position.x as usize][position.y as usize]
        } else {
            None
        }
    }

    fn slot_mut(&mut self, position: Position) -> Option<&mut Option<TileId>> {
        if self.within_bounds(position) {
            Some(&mut self.cells[position.x as usize][position.y as usize])
        } else {
            None
        }
    }

    /// Tile occupying `position`. Out-of-bounds positions are simply empty.
    pub fn cell_content(&self, position: Position) -> Option<&Tile> {
        self.slot(position).and_then(|id| self.tiles.get(&id))
    }

    /// Check if `position` holds a tile.
    #[inline]
    pub fn cell_occupied(&self, position: Position) -> bool {
        self.cell_content(position).is_some()
    }

    /// Check if `position` is free. Out-of-bounds positions count as free;
    /// pair with [`Grid::within_bounds`] when that matters.
    #[inline]
    pub fn cell_available(&self, position: Position) -> bool {
        !self.cell_occupied(position)
    }

    /// Look up a tile by id, attached or not.
    pub fn tile(&self, id: TileId) -> Option<&Tile> {
        self.tiles.get(&id)
    }

    /// Look up a tile mutably by id.
    pub fn tile_mut(&mut self, id: TileId) -> Option<&mut Tile> {
        self.tiles.get_mut(&id)
    }

    /// Visit every cell in row-major order (x outer, y inner).
    pub fn each_cell(&self) -> impl Iterator<Item = (Position, Option<&Tile>)> + '_ {
        (0..self.size).flat_map(move |x| {
            (0..self.size).map(move |y| {
                let position = Position::new(x as i32, y as i32);
                (position, self.cell_content(position))
            })
        })
    }

    /// Every tile currently in a slot, x outer, y inner.
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> + '_ {
        self.each_cell().filter_map(|(_, tile)| tile)
    }

    /// Number of occupied slots.
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().flatten().filter(|slot| slot.is_some()).count()
    }

    /// All empty positions in row-major order (x outer, y inner).
    pub fn available_cells(&self) -> Vec<Position> {
        self.each_cell()
            .filter(|(_, tile)| tile.is_none())
            .map(|(position, _)| position)
            .collect()
    }

    /// Uniformly random empty position, or None if the grid is full.
    pub fn random_available_cell(&self, rng: &mut DeterministicRng) -> Option<Position> {
        rng.choose(&self.available_cells()).copied()
    }

    /// Check if at least one slot is empty.
    pub fn cells_available(&self) -> bool {
        self.cells.iter().flatten().any(|slot| slot.is_none())
    }

    /// Allocate a tile in the arena without placing it.
    pub fn create_tile(&mut self, position: Position, value: u32) -> TileId {
        let id = TileId(self.next_tile_id);
        self.next_tile_id += 1;
        self.tiles.insert(id, Tile::new(id, position, value));
        id
    }

    /// Allocate a tile and place it at `position`.
    pub fn add_tile(&mut self, position: Position, value: u32) -> TileId {
        let id = self.create_tile(position, value);
        self.insert_tile(id);
        id
    }

    /// Place a tile in the slot at its own position, overwriting any occupant.
    ///
    /// Callers must make sure the slot is empty or that the overwrite is a merge.
    /// Returns false if the id is unknown or the position is off the grid.
    pub fn insert_tile(&mut self, id: TileId) -> bool {
        let Some(position) = self.tiles.get(&id).map(|tile| tile.position) else {
            return false;
        };
        match self.slot_mut(position) {
            Some(slot) => {
                *slot = Some(id);
                true
            }
            None => false,
        }
    }

    /// Clear the slot at the tile's position if it still holds that tile.
    ///
    /// The tile itself stays in the arena.
    pub fn remove_tile(&mut self, id: TileId) -> bool {
        let Some(position) = self.tiles.get(&id).map(|tile| tile.position) else {
            return false;
        };
        match self.slot_mut(position) {
            Some(slot) if *slot == Some(id) => {
                *slot = None;
                true
            }
            _ => false,
        }
    }

    /// Detach a tile from its slot, attach it at `to` and update its position.
    pub fn move_tile(&mut self, id: TileId, to: Position) {
        self.remove_tile(id);
        if let Some(tile) = self.tiles.get_mut(&id) {
            tile.update_position(to);
        }
        self.insert_tile(id);
    }

    /// Get ready for a move: drop last move's merge sources, clear merge
    /// provenance and remember every tile's starting cell.
    pub fn prepare_tiles(&mut self) {
        let attached: BTreeSet<TileId> = self.cells.iter().flatten().flatten().copied().collect();
        self.tiles.retain(|id, _| attached.contains(id));

        for tile in self.tiles.values_mut() {
            tile.merged_from = None;
            tile.save_position();
        }
    }

    /// Check if any two 4-adjacent tiles share a value.
    pub fn tile_matches_available(&self) -> bool {
        self.tiles().any(|tile| {
            Direction::ALL.iter().any(|dir| {
                self.cell_content(tile.position.step(dir.vector()))
                    .is_some_and(|other| other.value == tile.value && tile.merged_value().is_some())
            })
        })
    }

    /// Plain snapshot: size plus position and value of every tile.
    pub fn serialize(&self) -> GridState {
        let cells = self
            .cells
            .iter()
            .map(|column| {
                column
                    .iter()
                    .map(|slot| {
                        slot.and_then(|id| self.tiles.get(&id)).map(|tile| TileState {
                            position: tile.position,
                            value: tile.value,
                        })
                    })
                    .collect()
            })
            .collect();

        GridState { size: self.size, cells }
    }

    /// Rebuild a grid from a snapshot with fresh tiles.
    ///
    /// Animation state is not part of a snapshot, so restored tiles have no
    /// previous position and no merge sources.
    pub fn from_state(state: &GridState) -> Result<Self, GridError> {
        let size = state.size;
        if size < 2 {
            return Err(GridError::SizeTooSmall(size));
        }
        if state.cells.len() != size {
            return Err(GridError::ShapeMismatch {
                expected: size,
                columns: state.cells.len(),
                column: 0,
                rows: state.cells.first().map_or(0, Vec::len),
            });
        }
        if let Some((column, rows)) = state
            .cells
            .iter()
            .map(Vec::len)
            .enumerate()
            .find(|(_, rows)| *rows != size)
        {
            return Err(GridError::ShapeMismatch {
                expected: size,
                columns: size,
                column,
                rows,
            });
        }

        let mut grid = Grid::new(size);
        for (x, column) in state.cells.iter().enumerate() {
            for (y, cell) in column.iter().enumerate() {
                let Some(tile) = cell else { continue };
                let slot = Position::new(x as i32, y as i32);
                if tile.position != slot {
                    return Err(GridError::MisplacedTile { slot, claimed: tile.position });
                }
                // 0 is promoted to 2 by Tile::new
                let valid = tile.value == 0
                    || (tile.value >= 2 && tile.value <= MAX_TILE_VALUE && tile.value.is_power_of_two());
                if !valid {
                    return Err(GridError::InvalidValue { position: slot, value: tile.value });
                }
                grid.add_tile(slot, tile.value);
            }
        }

        Ok(grid)
    }

    /// Hash of size and every slot's value, for replay verification.
    pub fn compute_hash(&self) -> StateHash {
        compute_state_hash(self.size, |hasher| {
            for column in &self.cells {
                for slot in column {
                    let value = slot
                        .and_then(|id| self.tiles.get(&id))
                        .map_or(0, |tile| tile.value);
                    hasher.update_u32(value);
                }
            }
        })
    }
}

// =============================================================================
// TESTS
// =============================================================================
