//! Engine Configuration
//!
//! Defaults match the classic 4x4 game. Every field can be overridden
//! from the environment.

use std::str::FromStr;

use crate::error::ConfigError;
use crate::{DEFAULT_GRID_SIZE, START_TILES};

/// Default chance (percent) that a spawned tile is a 4 rather than a 2.
pub const DEFAULT_FOUR_TILE_PERCENT: u32 = 10;

/// Configuration for a game.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EngineConfig {
    /// Side length of the square grid.
    pub grid_size: usize,
    /// Tiles placed when a game starts.
    pub start_tiles: usize,
    /// Chance (percent) that a spawn is a 4.
    pub four_tile_percent: u32,
    /// Seed for tile spawning.
    pub rng_seed: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
            start_tiles: START_TILES,
            four_tile_percent: DEFAULT_FOUR_TILE_PERCENT,
            rng_seed: 0,
        }
    }
}

impl EngineConfig {
    /// Create config from environment variables.
    ///
    /// Unset variables keep their defaults. Set but unparseable
    /// variables are an error rather than silently ignored.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let config = Self {
            grid_size: env_number("TILE_MERGE_GRID_SIZE")?.unwrap_or(defaults.grid_size),
            start_tiles: env_number("TILE_MERGE_START_TILES")?.unwrap_or(defaults.start_tiles),
            four_tile_percent: env_number("TILE_MERGE_FOUR_PERCENT")?
                .unwrap_or(defaults.four_tile_percent),
            rng_seed: env_number("TILE_MERGE_SEED")?.unwrap_or(defaults.rng_seed),
        };
        config.validate()?;
        Ok(config)
    }

    /// Same config with a different seed.
    pub fn with_seed(mut self, rng_seed: u64) -> Self {
        self.rng_seed = rng_seed;
        self
    }

    /// Check that the config describes a playable game.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_size < 2 {
            return Err(ConfigError::GridTooSmall(self.grid_size));
        }
        let cells = self.grid_size.checked_mul(self.grid_size);
        if cells.map_or(true, |cells| self.start_tiles > cells) {
            return Err(ConfigError::TooManyStartTiles {
                start_tiles: self.start_tiles,
                grid_size: self.grid_size,
            });
        }
        if self.four_tile_percent > 100 {
            return Err(ConfigError::PercentOutOfRange(self.four_tile_percent));
        }
        Ok(())
    }
}

fn env_number<T: FromStr>(name: &'static str) -> Result<Option<T>, ConfigError> {
    match std::env::var(name) {
        Ok(value) => parse_number(name, value).map(Some),
        Err(_) => Ok(None),
    }
}

/// Parse into the field's own type, so out-of-range values fail instead of truncating.
fn parse_number<T: FromStr>(name: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidNumber { name, value })
}
