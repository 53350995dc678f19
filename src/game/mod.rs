//! Game Logic Module
//!
//! All rules of the puzzle. 100% deterministic for a given seed.
//!
//! ## Module Structure
//!
//! - `tile`: Tiles and their arena ids
//! - `grid`: The board, slot occupancy and spatial queries
//! - `direction`: Move directions and traversal order
//! - `engine`: Move resolution, spawning, end-of-game detection
//! - `events`: Publish/subscribe between input, engine and observers
//! - `snapshot`: Persisted grid state and render frames
//! - `render`: Renderer contract
//! - `input`: Key/swipe mapping and move logs
//! - `replay`: Rebuilding a game from a move log

pub mod tile;
pub mod grid;
pub mod direction;
pub mod engine;
pub mod events;
pub mod snapshot;
pub mod render;
pub mod input;
pub mod replay;

// Re-export key types
pub use tile::{Tile, TileId, MAX_TILE_VALUE};
pub use grid::Grid;
pub use direction::{Direction, Traversals};
pub use engine::MoveEngine;
pub use events::{EventBus, EventKind, GameEvent, HandlerId};
pub use snapshot::{GridState, TileState, RenderFrame, RenderTile, MergeSource};
pub use render::{Renderer, NullRenderer, TextRenderer};
pub use input::{direction_for_key, direction_for_swipe, MoveLog, MIN_SWIPE_DISTANCE};
pub use replay::{replay, ReplaySummary};
