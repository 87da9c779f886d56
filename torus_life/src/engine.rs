// engine.rs - One generation of the toroidal automaton

use tracing::debug;

use crate::grid::{Board, BoardPair, CellState};
use crate::rules::RuleSet;
use crate::stability::Stability;

/// Moore neighbourhood offsets, the cell itself excluded.
pub const NEIGHBOR_OFFSETS: [(isize, isize); 8] = [
    (-1, -1), (0, -1), (1, -1),
    (-1,  0),          (1,  0),
    (-1,  1), (0,  1), (1,  1),
];

/// Why a cell has its next state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Loneliness,
    Overpopulation,
    Reproduction,
    Stasis,
}

/// Summary of one completed generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GenerationReport {
    pub generation: u64,
    pub births: usize,
    pub deaths: usize,
    pub population: usize,
}

impl GenerationReport {
    fn record(&mut self, transition: Transition, next: CellState) {
        match transition {
            Transition::Loneliness | Transition::Overpopulation => self.deaths += 1,
            Transition::Reproduction => self.births += 1,
            Transition::Stasis => {}
        }
        if next.is_alive() {
            self.population += 1;
        }
    }
}

/// Living cells among the eight wrapped neighbours of `(x, y)`.
pub fn count_neighbors(board: &Board, x: usize, y: usize) -> u32 {
    NEIGHBOR_OFFSETS
        .iter()
        .map(|&(dx, dy)| board.get_wrapped(x, y, dx, dy).weight() as u32)
        .sum()
}

/// Applies the rules in precedence order; the first match wins.
pub fn next_state(cell: CellState, neighbors: u32, rules: &RuleSet) -> (CellState, Transition) {
    match cell {
        CellState::Alive if rules.is_survival_lower_breach(neighbors) => {
            (CellState::Dead, Transition::Loneliness)
        }
        CellState::Alive if rules.is_survival_upper_breach(neighbors) => {
            (CellState::Dead, Transition::Overpopulation)
        }
        CellState::Dead if rules.is_reproduction_match(neighbors) => {
            (CellState::Alive, Transition::Reproduction)
        }
        _ => (cell, Transition::Stasis),
    }
}

/// Writes row `y` of `next` from `current`. Only `current` is read.
fn transition_row(
    current: &Board,
    next: &mut Board,
    rules: &RuleSet,
    y: usize,
    report: &mut GenerationReport,
) {
    for x in 0..current.columns() {
        let cell = current.get_wrapped(x, y, 0, 0);
        let neighbors = count_neighbors(current, x, y);
        let (state, transition) = next_state(cell, neighbors, rules);
        // both buffers share dimensions
        next.put(x, y, state);
        report.record(transition, state);
    }
}

/// Advances a `BoardPair` one generation at a time.
#[derive(Debug, Clone, Default)]
pub struct TransitionEngine {
    generation: u64,
}

impl TransitionEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn reset(&mut self) {
        self.generation = 0;
    }

    /// Computes the next generation into the scratch buffer, derives the
    /// stability tags, then swaps the buffers.
    pub fn step(&mut self, boards: &mut BoardPair, rules: &RuleSet) -> (GenerationReport, Stability) {
        let mut report = GenerationReport::default();
        {
            let (current, next) = boards.split();
            for y in 0..current.rows() {
                transition_row(current, next, rules, y, &mut report);
            }
        }
        self.finish(boards, report)
    }

    /// Same sweep as [`step`](Self::step), yielding to the runtime after each row.
    pub async fn step_cooperative(
        &mut self,
        boards: &mut BoardPair,
        rules: &RuleSet,
    ) -> (GenerationReport, Stability) {
        let mut report = GenerationReport::default();
        {
            let (current, next) = boards.split();
            for y in 0..current.rows() {
                transition_row(current, next, rules, y, &mut report);
                tokio::task::yield_now().await;
            }
        }
        self.finish(boards, report)
    }

    fn finish(&mut self, boards: &mut BoardPair, mut report: GenerationReport) -> (GenerationReport, Stability) {
        let stability = Stability::compare(boards.current(), boards.next());
        boards.swap();
        self.generation += 1;
        report.generation = self.generation;
        debug!(
            generation = report.generation,
            births = report.births,
            deaths = report.deaths,
            population = report.population,
            "generation complete"
        );
        (report, stability)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_with(columns: usize, rows: usize, cells: &[(usize, usize)]) -> Board {
        let mut board = Board::new(columns, rows);
        for &(x, y) in cells {
            board.set(x, y, CellState::Alive).unwrap();
        }
        board
    }

    #[test]
    fn corner_cell_wraps_to_every_neighbor() {
        let board = board_with(3, 3, &[(0, 0)]);
        assert_eq!(count_neighbors(&board, 2, 2), 1);
        assert_eq!(count_neighbors(&board, 2, 0), 1);
        assert_eq!(count_neighbors(&board, 0, 2), 1);
        assert_eq!(count_neighbors(&board, 1, 1), 1);
        assert_eq!(count_neighbors(&board, 0, 0), 0);
    }

    #[test]
    fn narrow_board_counts_repeated_offsets() {
        let board = board_with(1, 1, &[(0, 0)]);
        assert_eq!(count_neighbors(&board, 0, 0), 8);
    }

    #[test]
    fn precedence_order() {
        let rules = RuleSet::default();
        assert_eq!(next_state(CellState::Alive, 1, &rules), (CellState::Dead, Transition::Loneliness));
        assert_eq!(next_state(CellState::Alive, 4, &rules), (CellState::Dead, Transition::Overpopulation));
        assert_eq!(next_state(CellState::Alive, 2, &rules), (CellState::Alive, Transition::Stasis));
        assert_eq!(next_state(CellState::Dead, 3, &rules), (CellState::Alive, Transition::Reproduction));
        assert_eq!(next_state(CellState::Dead, 2, &rules), (CellState::Dead, Transition::Stasis));
    }

    #[test]
    fn loneliness_wins_over_overpopulation() {
        // lower 5 and upper 1 overlap at every count
        let rules = RuleSet::parse("5", "1", "3");
        assert_eq!(next_state(CellState::Alive, 3, &rules).1, Transition::Loneliness);
        assert_eq!(next_state(CellState::Alive, 6, &rules).1, Transition::Overpopulation);
    }

    #[test]
    fn step_reports_births_and_deaths() {
        let mut boards = BoardPair::new(5, 5);
        for (x, y) in [(1, 2), (2, 2), (3, 2)] {
            boards.current_mut().set(x, y, CellState::Alive).unwrap();
        }
        let mut engine = TransitionEngine::new();
        let (report, stability) = engine.step(&mut boards, &RuleSet::default());

        assert_eq!(report, GenerationReport { generation: 1, births: 2, deaths: 2, population: 3 });
        assert!(stability.is_stable(2, 2));
        assert!(!stability.is_stable(2, 1));
        assert_eq!(engine.generation(), 1);
    }
}
