//! Core deterministic primitives.
//!
//! Coordinates, the seeded RNG and state hashing. Nothing here knows about
//! tiles or moves.

pub mod position;
pub mod rng;
pub mod hash;

// Re-export core types
pub use position::{Position, Vector};
pub use rng::DeterministicRng;
pub use hash::{compute_state_hash, StateHash, StateHasher};
