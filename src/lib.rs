//! # Tile Merge
//!
//! Rules engine for a sliding-tile merge puzzle on a square grid.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        TILE MERGE                            │
//! ├─────────────────────────────────────────────────────────────┤
//! │  core/           - Deterministic primitives                  │
//! │  ├── position.rs - Cell coordinates and unit vectors         │
//! │  ├── rng.rs      - Deterministic Xorshift128+ PRNG           │
//! │  └── hash.rs     - State hashing for replay checks           │
//! │                                                              │
//! │  game/           - Game rules (deterministic)                │
//! │  ├── tile.rs     - Tiles and arena ids                       │
//! │  ├── grid.rs     - Board and slot occupancy                  │
//! │  ├── direction.rs- Directions and traversal order            │
//! │  ├── engine.rs   - Move resolution and spawning              │
//! │  ├── events.rs   - Synchronous event bus                     │
//! │  ├── snapshot.rs - Persisted state and render frames         │
//! │  ├── render.rs   - Renderer contract                         │
//! │  ├── input.rs    - Key/swipe mapping, move log               │
//! │  └── replay.rs   - Replay from a move log                    │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Control flow
//!
//! An input source maps a key or swipe to a [`Direction`] and calls
//! [`MoveEngine::dispatch`]. The engine announces the request, resolves it
//! against the grid and, if anything moved, spawns a tile, announces the
//! completion and hands a [`RenderFrame`] to its renderer.
//!
//! ```
//! use tile_merge::{Direction, EngineConfig, MoveEngine, NullRenderer};
//!
//! let mut engine = MoveEngine::new(EngineConfig::default().with_seed(42), NullRenderer).unwrap();
//! engine.dispatch(Direction::Left);
//! assert!(engine.grid().occupied_count() >= 2);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod core;
pub mod game;
pub mod config;
pub mod error;

// Re-export commonly used types
pub use crate::core::position::{Position, Vector};
pub use crate::core::rng::DeterministicRng;
pub use config::EngineConfig;
pub use error::{ConfigError, GridError, SnapshotError};
pub use game::direction::Direction;
pub use game::engine::MoveEngine;
pub use game::events::{EventKind, GameEvent};
pub use game::grid::Grid;
pub use game::render::{NullRenderer, Renderer, TextRenderer};
pub use game::snapshot::{GridState, RenderFrame};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Side length of the classic board
pub const DEFAULT_GRID_SIZE: usize = 4;

/// Tiles placed when a game starts
pub const START_TILES: usize = 2;
