//! Error Types
//!
//! The move path itself never fails. Errors only come from the edges:
//! restoring a snapshot, decoding one, or loading configuration.

use crate::core::position::Position;

/// Errors raised while rebuilding a grid from a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    /// Grid size below the playable minimum.
    #[error("grid size {0} is below the minimum of 2")]
    SizeTooSmall(usize),

    /// Cell matrix does not match the declared size.
    #[error("expected a {expected}x{expected} cell matrix, found {columns} columns with {rows} rows in column {column}")]
    ShapeMismatch {
        /// Declared grid size.
        expected: usize,
        /// Number of columns found.
        columns: usize,
        /// Column whose length was wrong.
        column: usize,
        /// Length of that column.
        rows: usize,
    },

    /// A tile's stored position disagrees with the slot that holds it.
    #[error("tile at slot {slot:?} claims position {claimed:?}")]
    MisplacedTile {
        /// Slot the tile was found in.
        slot: Position,
        /// Position recorded on the tile.
        claimed: Position,
    },

    /// Tile value is not a power of two in the playable range.
    #[error("tile at {position:?} has value {value}, which is not a power of two between 2 and 2^30")]
    InvalidValue {
        /// Slot of the offending tile.
        position: Position,
        /// Offending value.
        value: u32,
    },
}

/// Errors raised while encoding or decoding a snapshot.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    /// JSON codec failure.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Binary codec failure.
    #[error("binary codec error: {0}")]
    Binary(#[from] bincode::Error),

    /// Decoded snapshot describes an invalid grid.
    #[error("invalid grid: {0}")]
    Grid(#[from] GridError),
}

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// Environment variable could not be parsed.
    #[error("{name} must be an unsigned integer, got {value:?}")]
    InvalidNumber {
        /// Variable name.
        name: &'static str,
        /// Raw value.
        value: String,
    },

    /// Grid size below the playable minimum.
    #[error("grid size {0} is below the minimum of 2")]
    GridTooSmall(usize),

    /// More start tiles than cells.
    #[error("{start_tiles} start tiles do not fit on a {grid_size}x{grid_size} grid")]
    TooManyStartTiles {
        /// Requested start tiles.
        start_tiles: usize,
        /// Grid size.
        grid_size: usize,
    },

    /// Probability outside 0..=100.
    #[error("four-tile percent must be at most 100, got {0}")]
    PercentOutOfRange(u32),
}
