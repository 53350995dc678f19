//! Move Resolution
//!
//! The rules of the game: sliding, merging, spawning and end-of-game
//! detection. Everything here is synchronous and deterministic given the
//! configured seed; a move always runs to completion before anything else
//! touches the grid.
//!
//! ## Move pipeline
//!
//! 1. Prepare: drop last move's merge sources, clear merge provenance,
//!    save every tile's starting cell.
//! 2. Visit cells farthest-first along the direction of travel.
//! 3. Each tile either merges into the next equal, not-yet-merged tile or
//!    slides to the farthest free cell.
//! 4. If any tile ended somewhere other than where it started: spawn a tile,
//!    emit [`GameEvent::MoveComplete`], render.

use tracing::{debug, info, trace};

use crate::config::EngineConfig;
use crate::core::hash::StateHash;
use crate::core::position::{Position, Vector};
use crate::core::rng::DeterministicRng;
use crate::error::{ConfigError, GridError};
use crate::game::direction::{Direction, Traversals};
use crate::game::events::{EventBus, EventKind, GameEvent, HandlerId};
use crate::game::grid::Grid;
use crate::game::render::{NullRenderer, Renderer};
use crate::game::snapshot::{GridState, RenderFrame};

/// Owns the grid and applies moves to it.
///
/// This is the single mutator of the grid. Hosts that receive input on
/// several threads must funnel every move through one owner.
pub struct MoveEngine<R: Renderer = NullRenderer> {
    config: EngineConfig,
    grid: Grid,
    rng: DeterministicRng,
    events: EventBus,
    renderer: R,
}

impl<R: Renderer> MoveEngine<R> {
    /// Create an engine and start a game: fresh grid, starting tiles, first render.
    pub fn new(config: EngineConfig, renderer: R) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut engine = Self {
            grid: Grid::new(config.grid_size),
            rng: DeterministicRng::new(config.rng_seed),
            events: EventBus::new(),
            renderer,
            config,
        };
        engine.setup();
        Ok(engine)
    }

    fn setup(&mut self) {
        self.grid = Grid::new(self.config.grid_size);
        for _ in 0..self.config.start_tiles {
            self.add_random_tile();
        }
        info!(
            size = self.config.grid_size,
            tiles = self.grid.occupied_count(),
            "game started"
        );
        self.actuate();
    }

    /// Throw the current grid away and start over.
    ///
    /// The RNG stream carries on; it is not reseeded.
    pub fn restart(&mut self) {
        info!("restarting game");
        self.setup();
    }

    // =========================================================================
    // MOVES
    // =========================================================================

    /// Input entry point: announce the request, then apply it.
    ///
    /// [`GameEvent::Move`] fires for every request, even ones that move nothing.
    pub fn dispatch(&mut self, direction: Direction) -> bool {
        self.events.emit(&GameEvent::Move(direction));
        self.make_move(direction)
    }

    /// Slide every tile towards `direction`. Returns whether the board changed.
    ///
    /// A tile counts as moved when its final cell differs from the cell it was
    /// visited in. A merge always lands one step or more away, so every merge
    /// counts as movement.
    pub fn make_move(&mut self, direction: Direction) -> bool {
        let vector = direction.vector();
        let traversals = Traversals::build(self.grid.size(), vector);
        let mut moved = false;
        let mut merges = 0u32;

        self.grid.prepare_tiles();

        for &x in &traversals.xs {
            for &y in &traversals.ys {
                let cell = Position::new(x as i32, y as i32);
                let Some(tile) = self.grid.cell_content(cell) else {
                    continue;
                };
                let (id, value, doubled) = (tile.id, tile.value, tile.merged_value());
                let (farthest, next) = self.find_farthest_position(cell, vector);

                // Merged tiles are spent for the rest of this move; a pair
                // whose sum overflows never merges
                let merge_target = doubled.and_then(|doubled| {
                    self.grid
                        .cell_content(next)
                        .filter(|other| other.value == value && !other.is_merged())
                        .map(|other| (other.id, doubled))
                });

                let final_position = match merge_target {
                    Some((next_id, doubled)) => {
                        let merged = self.grid.create_tile(next, doubled);
                        if let Some(tile) = self.grid.tile_mut(merged) {
                            tile.merged_from = Some([id, next_id]);
                        }
                        self.grid.insert_tile(merged);
                        self.grid.remove_tile(id);

                        // Detached now; kept only as a merge source
                        if let Some(tile) = self.grid.tile_mut(id) {
                            tile.update_position(next);
                        }
                        merges += 1;
                        next
                    }
                    None => {
                        self.grid.move_tile(id, farthest);
                        farthest
                    }
                };

                #[cfg(feature = "debug-tracing")]
                trace!(?cell, ?final_position, value, merged = merge_target.is_some(), "tile resolved");

                if final_position != cell {
                    moved = true;
                }
            }
        }

        debug!(%direction, moved, merges, "move resolved");

        if moved {
            self.add_random_tile();
            self.events.emit(&GameEvent::MoveComplete);
            self.actuate();
        }

        moved
    }

    /// Walk from `cell` along `vector` over free cells.
    ///
    /// Returns the last free cell reached and the first cell past it, which
    /// is either off the grid or occupied.
    fn find_farthest_position(&self, cell: Position, vector: Vector) -> (Position, Position) {
        let mut previous = cell;
        let mut next = cell.step(vector);

        while self.grid.within_bounds(next) && self.grid.cell_available(next) {
            previous = next;
            next = next.step(vector);
        }

        (previous, next)
    }

    /// Place a 2 (or a 4, with the configured chance) on a random free cell.
    ///
    /// Does nothing on a full grid.
    fn add_random_tile(&mut self) -> Option<Position> {
        let position = self.grid.random_available_cell(&mut self.rng)?;
        let value = if self.rng.chance(self.config.four_tile_percent) { 4 } else { 2 };
        self.grid.add_tile(position, value);
        trace!(?position, value, "spawned tile");
        Some(position)
    }

    fn actuate(&mut self) {
        let frame = RenderFrame::capture(&self.grid);
        self.renderer.render(&frame);
    }

    // =========================================================================
    // QUERIES
    // =========================================================================

    /// Check if any move can change the board: a free cell, or two
    /// 4-adjacent tiles with equal values.
    pub fn moves_available(&self) -> bool {
        self.grid.cells_available() || self.grid.tile_matches_available()
    }

    /// Inverse of [`MoveEngine::moves_available`]. Informational only; the
    /// engine keeps accepting moves on a stuck board.
    pub fn is_game_over(&self) -> bool {
        !self.moves_available()
    }

    /// Current grid.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Active configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Side length.
    pub fn size(&self) -> usize {
        self.grid.size()
    }

    /// Renderer this engine draws to.
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// What the renderer would be given right now.
    pub fn render_frame(&self) -> RenderFrame {
        RenderFrame::capture(&self.grid)
    }

    /// Hash of the board, for comparing replays.
    pub fn state_hash(&self) -> StateHash {
        self.grid.compute_hash()
    }

    // =========================================================================
    // EVENTS
    // =========================================================================

    /// Subscribe to an event.
    pub fn on<F>(&mut self, kind: EventKind, handler: F) -> HandlerId
    where
        F: FnMut(&GameEvent) + 'static,
    {
        self.events.on(kind, handler)
    }

    /// Unsubscribe a handler.
    pub fn off(&mut self, kind: EventKind, id: HandlerId) -> bool {
        self.events.off(kind, id)
    }

    // =========================================================================
    // SNAPSHOTS
    // =========================================================================

    /// Plain snapshot of the board.
    pub fn snapshot(&self) -> GridState {
        self.grid.serialize()
    }

    /// Replace the board with one rebuilt from `state`, then render it.
    pub fn restore(&mut self, state: &GridState) -> Result<(), GridError> {
        let grid = Grid::from_state(state)?;
        self.load_grid(grid);
        Ok(())
    }

    /// Replace the board wholesale, then render it.
    pub fn load_grid(&mut self, grid: Grid) {
        self.config.grid_size = grid.size();
        self.grid = grid;
        debug!(size = self.grid.size(), tiles = self.grid.occupied_count(), "grid loaded");
        self.actuate();
    }
}

impl<R: Renderer> std::fmt::Debug for MoveEngine<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MoveEngine")
            .field("config", &self.config)
            .field("grid", &self.grid)
            .field("events", &self.events)
            .finish()
    }
}

// =============================================================================
// TESTS
// =============================================================================
