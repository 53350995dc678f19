//! Tile Merge demo driver
//!
//! Plays one seeded game, either from keys read on stdin (`--interactive`)
//! or with a fixed direction cycle, then verifies the game replays to the
//! same board.

use std::io::{self, BufRead};

use anyhow::Context;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use tile_merge::{
    game::input::{direction_for_key, MoveLog},
    game::replay::replay,
    Direction, EngineConfig, EventKind, GameEvent, MoveEngine, NullRenderer, TextRenderer, VERSION,
};

/// Stop the scripted game after this many requests.
const MAX_SCRIPTED_MOVES: usize = 5000;

/// Scripted play cycle. Favouring one corner keeps games long.
const SCRIPT: [Direction; 4] = [Direction::Left, Direction::Down, Direction::Right, Direction::Down];

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    let interactive = std::env::args().any(|arg| arg == "--interactive");
    let config = EngineConfig::from_env().context("invalid configuration")?;

    info!("Tile Merge v{}", VERSION);
    info!(
        "Grid: {0}x{0}, start tiles: {1}, seed: {2}",
        config.grid_size, config.start_tiles, config.rng_seed
    );

    let mut engine = MoveEngine::new(config.clone(), TextRenderer::new())?;
    engine.on(EventKind::Move, |event| {
        if let GameEvent::Move(direction) = event {
            tracing::debug!(%direction, "move requested");
        }
    });
    engine.on(EventKind::MoveComplete, |_| tracing::debug!("move completed"));

    let log = if interactive {
        play_interactive(&mut engine)?
    } else {
        play_scripted(&mut engine)
    };

    // Final board
    println!("{}", engine.renderer().output());
    info!("Moves requested: {}", log.len());
    info!("Highest tile: {}", engine.grid().tiles().map(|t| t.value).max().unwrap_or(0));
    if engine.is_game_over() {
        info!("No moves left");
    }

    let snapshot = engine.snapshot().to_json()?;
    println!("{snapshot}");

    // Verify determinism by replaying
    info!("=== Verifying Determinism ===");
    let hash = engine.state_hash();
    let (replayed, summary) = replay(&config, &log, NullRenderer)?;
    let replay_hash = replayed.state_hash();

    info!("Final State Hash:  {}", hex::encode(hash));
    info!("Replay State Hash: {}", hex::encode(replay_hash));
    info!("Replay moved {} of {} requests", summary.moved, summary.dispatched);

    if hash == replay_hash {
        info!("DETERMINISM VERIFIED: Hashes match!");
        Ok(())
    } else {
        anyhow::bail!("replay diverged from the live game")
    }
}

/// Cycle through [`SCRIPT`] until the board is stuck or the cap is reached.
fn play_scripted(engine: &mut MoveEngine<TextRenderer>) -> MoveLog {
    let mut log = MoveLog::new(engine.config().rng_seed);
    let mut stalled = 0;

    for i in 0..MAX_SCRIPTED_MOVES {
        if engine.is_game_over() {
            break;
        }

        // Fall back to the other directions when the script is blocked
        let direction = if stalled < SCRIPT.len() {
            SCRIPT[i % SCRIPT.len()]
        } else {
            Direction::ALL[i % Direction::ALL.len()]
        };

        log.record(direction);
        if engine.dispatch(direction) {
            stalled = 0;
        } else {
            stalled += 1;
        }
    }

    log
}

/// Read one key per line from stdin until EOF, `q`, or a stuck board.
fn play_interactive(engine: &mut MoveEngine<TextRenderer>) -> anyhow::Result<MoveLog> {
    let mut log = MoveLog::new(engine.config().rng_seed);
    println!("{}", engine.renderer().output());
    println!("Keys: w/a/s/d or ArrowUp/ArrowLeft/ArrowDown/ArrowRight, q to quit");

    for line in io::stdin().lock().lines() {
        let line = line.context("failed to read stdin")?;
        let key = line.trim();
        if key == "q" {
            break;
        }

        let Some(direction) = direction_for_key(key) else {
            warn!("Ignoring unmapped key {:?}", key);
            continue;
        };

        log.record(direction);
        if engine.dispatch(direction) {
            println!("{}", engine.renderer().output());
        }

        if engine.is_game_over() {
            info!("Game over");
            break;
        }
    }

    Ok(log)
}
