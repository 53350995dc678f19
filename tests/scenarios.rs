//! End-to-end move scenarios on a 4x4 board.

use std::cell::RefCell;
use std::rc::Rc;

use tile_merge::game::direction::Traversals;
use tile_merge::{
    Direction, EngineConfig, EventKind, Grid, GridState, MoveEngine, Position, TextRenderer,
};

fn engine_with(tiles: &[(i32, i32, u32)]) -> MoveEngine<TextRenderer> {
    let mut engine = MoveEngine::new(EngineConfig::default().with_seed(11), TextRenderer::new()).unwrap();
    let mut grid = Grid::new(4);
    for &(x, y, value) in tiles {
        grid.add_tile(Position::new(x, y), value);
    }
    engine.load_grid(grid);
    engine
}

fn value_at(engine: &MoveEngine<TextRenderer>, x: i32, y: i32) -> Option<u32> {
    engine.grid().cell_content(Position::new(x, y)).map(|t| t.value)
}

#[test]
fn pair_merges_against_left_wall() {
    let mut engine = engine_with(&[(0, 0, 2), (1, 0, 2)]);

    assert!(engine.dispatch(Direction::Left));

    let merged = engine.grid().cell_content(Position::new(0, 0)).unwrap();
    assert_eq!(merged.value, 4);
    let [a, b] = merged.merged_from.expect("merged tile keeps its sources");
    let sources = [engine.grid().tile(a).unwrap(), engine.grid().tile(b).unwrap()];
    assert!(sources.iter().all(|t| t.value == 2));
    assert_eq!(
        sources.map(|t| t.previous_position),
        [Some(Position::new(1, 0)), Some(Position::new(0, 0))]
    );

    // Only the merged tile and the fresh spawn remain
    assert_eq!(engine.grid().occupied_count(), 2);
    let spawned: Vec<_> = engine
        .grid()
        .tiles()
        .filter(|t| t.previous_position.is_none() && t.merged_from.is_none())
        .collect();
    assert_eq!(spawned.len(), 1);
}

#[test]
fn distinct_values_slide_right_without_merging() {
    let mut engine = engine_with(&[(0, 0, 2), (1, 0, 4), (2, 0, 2)]);

    assert!(engine.dispatch(Direction::Right));
    assert_eq!(value_at(&engine, 1, 0), Some(2));
    assert_eq!(value_at(&engine, 2, 0), Some(4));
    assert_eq!(value_at(&engine, 3, 0), Some(2));
    assert!(engine.grid().tiles().all(|t| t.merged_from.is_none()));
    assert_eq!(engine.grid().occupied_count(), 4);
}

#[test]
fn right_traversal_compacts_without_gaps() {
    let traversals = Traversals::build(4, Direction::Right.vector());
    assert_eq!(traversals.xs, vec![3, 2, 1, 0]);
    assert_eq!(traversals.ys, vec![0, 1, 2, 3]);

    let mut engine = engine_with(&[(0, 2, 2), (2, 2, 8), (0, 3, 16)]);
    assert!(engine.make_move(Direction::Right));

    assert_eq!(value_at(&engine, 3, 2), Some(8));
    assert_eq!(value_at(&engine, 2, 2), Some(2));
    assert_eq!(value_at(&engine, 3, 3), Some(16));
}

#[test]
fn packed_board_without_pairs_is_game_over() {
    // Checkerboard of 2s and 4s: full, no equal neighbours
    let mut grid = Grid::new(4);
    for x in 0..4 {
        for y in 0..4 {
            let value = if (x + y) % 2 == 0 { 2 } else { 4 };
            grid.add_tile(Position::new(x, y), value);
        }
    }
    let mut engine = MoveEngine::new(EngineConfig::default(), TextRenderer::new()).unwrap();
    engine.load_grid(grid);

    assert!(!engine.moves_available());
    for direction in Direction::ALL {
        assert!(!engine.dispatch(direction));
    }
}

#[test]
fn packed_board_with_one_pair_still_playable() {
    let mut grid = Grid::new(4);
    for x in 0..4 {
        for y in 0..4 {
            let value = if (x + y) % 2 == 0 { 2 } else { 4 };
            grid.add_tile(Position::new(x, y), value);
        }
    }
    // (0,0) becomes 4, matching its neighbour at (1,0)
    let mut state: GridState = grid.serialize();
    state.cells[0][0].as_mut().unwrap().value = 4;

    let mut engine = MoveEngine::new(EngineConfig::default(), TextRenderer::new()).unwrap();
    engine.restore(&state).unwrap();

    assert!(engine.moves_available());
    assert!(engine.dispatch(Direction::Left));
}

#[test]
fn blocked_move_spawns_and_renders_nothing() {
    let mut engine = engine_with(&[(0, 0, 2), (0, 1, 4), (0, 2, 8), (1, 0, 16)]);
    let before = engine.snapshot();
    let frames = engine.renderer().frames();

    let moves = Rc::new(RefCell::new(0));
    let completions = Rc::new(RefCell::new(0));
    let m = Rc::clone(&moves);
    engine.on(EventKind::Move, move |_| *m.borrow_mut() += 1);
    let c = Rc::clone(&completions);
    engine.on(EventKind::MoveComplete, move |_| *c.borrow_mut() += 1);

    assert!(!engine.dispatch(Direction::Up));

    assert_eq!(engine.snapshot(), before);
    assert_eq!(engine.renderer().frames(), frames);
    assert_eq!(*moves.borrow(), 1);
    assert_eq!(*completions.borrow(), 0);
}

#[test]
fn spawn_odds_close_to_one_in_ten() {
    let config = EngineConfig {
        start_tiles: 16,
        ..EngineConfig::default().with_seed(31337)
    };
    let mut engine = MoveEngine::new(config, tile_merge::NullRenderer).unwrap();

    let mut spawns = 0usize;
    let mut fours = 0usize;
    for _ in 0..625 {
        spawns += engine.grid().occupied_count();
        fours += engine.grid().tiles().filter(|t| t.value == 4).count();
        engine.restart();
    }

    assert_eq!(spawns, 10_000);
    let ratio = fours as f64 / spawns as f64;
    assert!((0.08..0.12).contains(&ratio), "four-tile ratio {ratio}");
}

#[test]
fn snapshot_survives_json_roundtrip() {
    let mut engine = engine_with(&[(1, 1, 2), (2, 1, 2), (3, 3, 128)]);
    engine.dispatch(Direction::Left);

    let json = engine.snapshot().to_json().unwrap();
    let restored = GridState::from_json(&json).unwrap();
    let rebuilt = Grid::from_state(&restored).unwrap();

    assert_eq!(rebuilt.compute_hash(), engine.state_hash());
    // Animation-only fields are dropped
    assert!(rebuilt.tiles().all(|t| t.previous_position.is_none() && t.merged_from.is_none()));
}
