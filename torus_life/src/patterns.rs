// patterns.rs - Named seed patterns stamped onto the torus

use crate::grid::{Board, CellState};

pub struct Pattern {
    pub name: &'static str,
    pub cells: &'static [(usize, usize)], // (x, y) relative to the pattern origin
}

impl Pattern {
    /// Bounding box `(width, height)` of the pattern.
    pub fn extent(&self) -> (usize, usize) {
        self.cells
            .iter()
            .fold((0, 0), |(w, h), &(x, y)| (w.max(x + 1), h.max(y + 1)))
    }
}

pub const GLIDER: Pattern = Pattern {
    name: "Glider",
    cells: &[(1, 0), (2, 1), (0, 2), (1, 2), (2, 2)],
};

pub const BLOCK: Pattern = Pattern {
    name: "Block",
    cells: &[(0, 0), (1, 0), (0, 1), (1, 1)],
};

pub const PATTERNS: &[Pattern] = &[
    GLIDER,
    Pattern {
        name: "Blinker",
        cells: &[(0, 0), (1, 0), (2, 0)],
    },
    Pattern {
        name: "Toad",
        cells: &[(1, 0), (2, 0), (3, 0), (0, 1), (1, 1), (2, 1)],
    },
    Pattern {
        name: "Beacon",
        cells: &[(0, 0), (1, 0), (0, 1), (1, 1), (2, 2), (3, 2), (2, 3), (3, 3)],
    },
    BLOCK,
    Pattern {
        name: "R-pentomino",
        cells: &[(1, 0), (2, 0), (0, 1), (1, 1), (1, 2)],
    },
];

pub fn find(name: &str) -> Option<&'static Pattern> {
    PATTERNS.iter().find(|p| p.name.eq_ignore_ascii_case(name))
}

/// Sets the pattern's cells alive at `origin`, wrapping around the torus.
pub fn stamp(board: &mut Board, pattern: &Pattern, origin: (usize, usize)) {
    for &(x, y) in pattern.cells {
        let (px, py) = (x as isize, y as isize);
        let (cx, cy) = wrapped(board, origin, px, py);
        board.put(cx, cy, CellState::Alive);
    }
}

/// Clears the board and stamps the pattern at its centre.
pub fn apply_centered(board: &mut Board, pattern: &Pattern) {
    board.clear();
    let (columns, rows) = board.dimensions();
    let (w, h) = pattern.extent();
    let origin = (columns.saturating_sub(w) / 2, rows.saturating_sub(h) / 2);
    stamp(board, pattern, origin);
}

fn wrapped(board: &Board, origin: (usize, usize), dx: isize, dy: isize) -> (usize, usize) {
    let (columns, rows) = board.dimensions();
    let x = (origin.0 as isize + dx).rem_euclid(columns as isize) as usize;
    let y = (origin.1 as isize + dy).rem_euclid(rows as isize) as usize;
    (x, y)
}
