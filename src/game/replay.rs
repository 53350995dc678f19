//! Replay
//!
//! Rebuild a game from its seed and move log.

use tracing::debug;

use crate::config::EngineConfig;
use crate::error::ConfigError;
use crate::game::engine::MoveEngine;
use crate::game::input::MoveLog;
use crate::game::render::Renderer;

/// Outcome counters of a replay.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    /// Directions dispatched
    pub dispatched: usize,
    /// Directions that changed the board
    pub moved: usize,
}

/// Start a fresh game with the log's seed and dispatch every logged direction.
///
/// `config` supplies the grid size and spawn odds; its seed is replaced by the log's.
pub fn replay<R: Renderer>(
    config: &EngineConfig,
    log: &MoveLog,
    renderer: R,
) -> Result<(MoveEngine<R>, ReplaySummary), ConfigError> {
    let config = config.clone().with_seed(log.rng_seed);
    let mut engine = MoveEngine::new(config, renderer)?;
    let mut summary = ReplaySummary::default();

    for &direction in log.moves() {
        summary.dispatched += 1;
        if engine.dispatch(direction) {
            summary.moved += 1;
        }
    }

    debug!(dispatched = summary.dispatched, moved = summary.moved, "replay finished");
    Ok((engine, summary))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::direction::Direction;
    use crate::game::render::NullRenderer;

    #[test]
    fn test_replay_matches_live_game() {
        let config = EngineConfig::default().with_seed(12345);
        let mut live = MoveEngine::new(config.clone(), NullRenderer).unwrap();
        let mut log = MoveLog::new(config.rng_seed);
        let mut moved = 0;

        for i in 0..200 {
            let direction = Direction::ALL[(i * 7 / 3) % 4];
            log.record(direction);
            if live.dispatch(direction) {
                moved += 1;
            }
        }

        let (replayed, summary) = replay(&EngineConfig::default(), &log, NullRenderer).unwrap();
        assert_eq!(replayed.state_hash(), live.state_hash());
        assert_eq!(summary.dispatched, 200);
        assert_eq!(summary.moved, moved);
    }

    #[test]
    fn test_replay_different_seed_diverges() {
        let mut log = MoveLog::new(1);
        for dir in [Direction::Left, Direction::Up, Direction::Right, Direction::Down] {
            log.record(dir);
        }
        let (a, _) = replay(&EngineConfig::default(), &log, NullRenderer).unwrap();

        log.rng_seed = 2;
        let (b, _) = replay(&EngineConfig::default(), &log, NullRenderer).unwrap();

        // Seeds 1 and 2 place different starting tiles
        assert_ne!(a.snapshot(), b.snapshot());
    }

    #[test]
    fn test_empty_log_is_fresh_game() {
        let (engine, summary) = replay(&EngineConfig::default(), &MoveLog::new(9), NullRenderer).unwrap();
        assert_eq!(summary, ReplaySummary::default());
        assert_eq!(engine.grid().occupied_count(), 2);
    }
}
