use std::collections::HashSet;

use torus_life::patterns::{self, BLOCK, GLIDER};
use torus_life::{Board, BoardPair, CellState, RuleSet, SimulationConfig, SimulationState, TransitionEngine};

fn set_cells(board: &mut Board, cells: &[(usize, usize)]) {
    for &(x, y) in cells {
        board.set(x, y, CellState::Alive).unwrap();
    }
}

fn collect_live(board: &Board) -> HashSet<(usize, usize)> {
    board.alive_cells().collect()
}

/// Updates cells in place, so already updated cells leak into later counts.
fn step_in_place(board: &mut Board, rules: &RuleSet) {
    let (columns, rows) = board.dimensions();
    for x in 0..columns {
        for y in 0..rows {
            let cell = board.get(x, y).unwrap();
            let neighbors = torus_life::count_neighbors(board, x, y);
            let (state, _) = torus_life::next_state(cell, neighbors, rules);
            board.set(x, y, state).unwrap();
        }
    }
}

#[test]
fn glider_translates_after_four_generations() {
    let rules = RuleSet::default();
    let mut boards = BoardPair::new(20, 20);
    patterns::stamp(boards.current_mut(), &GLIDER, (18, 18));
    let start = collect_live(boards.current());

    let mut engine = TransitionEngine::new();
    for _ in 0..4 {
        engine.step(&mut boards, &rules);
    }

    let expected: HashSet<_> = start.iter().map(|&(x, y)| ((x + 1) % 20, (y + 1) % 20)).collect();
    assert_eq!(collect_live(boards.current()), expected);
    assert_eq!(engine.generation(), 4);
}

#[test]
fn block_still_life_never_changes() {
    let rules = RuleSet::default();
    for size in [4, 7] {
        let mut boards = BoardPair::new(size, size);
        patterns::stamp(boards.current_mut(), &BLOCK, (1, 1));
        let start = collect_live(boards.current());

        let mut engine = TransitionEngine::new();
        for _ in 0..25 {
            let (report, stability) = engine.step(&mut boards, &rules);
            assert_eq!(report.births + report.deaths, 0);
            assert_eq!(stability.stable_count(), 4);
        }
        assert_eq!(collect_live(boards.current()), start);
    }
}

#[test]
fn buffered_sweep_ignores_in_progress_writes() {
    let rules = RuleSet::default();
    let row = [(1, 2), (2, 2), (3, 2)];

    let mut boards = BoardPair::new(5, 5);
    set_cells(boards.current_mut(), &row);
    TransitionEngine::new().step(&mut boards, &rules);

    let expected: HashSet<_> = [(2, 1), (2, 2), (2, 3)].into_iter().collect();
    assert_eq!(collect_live(boards.current()), expected);

    let mut naive = Board::new(5, 5);
    set_cells(&mut naive, &row);
    step_in_place(&mut naive, &rules);
    assert_ne!(collect_live(&naive), expected);
}

#[test]
fn blinker_oscillates_with_period_two() {
    let rules = RuleSet::default();
    let mut boards = BoardPair::new(6, 6);
    set_cells(boards.current_mut(), &[(2, 1), (2, 2), (2, 3)]);
    let start = collect_live(boards.current());

    let mut engine = TransitionEngine::new();
    engine.step(&mut boards, &rules);
    assert_ne!(collect_live(boards.current()), start);
    engine.step(&mut boards, &rules);
    assert_eq!(collect_live(boards.current()), start);
}

#[test]
fn malformed_rules_degrade_to_no_op() {
    // no death cause and no reproduction: everything is frozen
    let rules = RuleSet::parse("x", "y", "z");
    let mut boards = BoardPair::new(8, 8);
    set_cells(boards.current_mut(), &[(0, 0), (1, 0), (2, 0), (3, 3), (4, 4), (4, 3)]);
    let start = collect_live(boards.current());

    let mut engine = TransitionEngine::new();
    for _ in 0..3 {
        engine.step(&mut boards, &rules);
    }
    assert_eq!(collect_live(boards.current()), start);
}

#[test]
fn stable_tags_follow_survivors() {
    let config = SimulationConfig::default();
    let mut state = SimulationState::new(6, 6, &config);
    state.apply_pattern(patterns::find("Blinker").unwrap());
    state.step();

    let (cx, cy) = (2, 2);
    assert!(state.stability().is_stable(cx, cy));
    assert_eq!(state.stability().stable_count(), 1);
    assert_eq!(state.last_report().population, 3);
}

#[tokio::test]
async fn cooperative_sweep_matches_synchronous() {
    let config = SimulationConfig::default();
    let mut sync_state = SimulationState::new(16, 12, &config);
    sync_state.apply_pattern(patterns::find("R-pentomino").unwrap());
    let mut async_state = sync_state.clone();

    for _ in 0..10 {
        let expected = sync_state.step();
        let report = async_state.step_cooperative().await;
        assert_eq!(report, expected);
        assert_eq!(async_state.board(), sync_state.board());
        assert_eq!(async_state.stability(), sync_state.stability());
    }
}
