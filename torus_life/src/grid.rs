// grid.rs - Toroidal board storage and the two-buffer arena

use rand::Rng;
use thiserror::Error;

/// State of a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum CellState {
    #[default]
    Dead,
    Alive,
}

impl CellState {
    pub fn is_alive(self) -> bool {
        self == CellState::Alive
    }

    /// Numeric weight used when summing a neighbourhood.
    pub fn weight(self) -> u8 {
        match self {
            CellState::Alive => 1,
            CellState::Dead  => 0,
        }
    }
}

impl From<bool> for CellState {
    fn from(alive: bool) -> Self {
        if alive { CellState::Alive } else { CellState::Dead }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BoardError {
    #[error("cell ({x}, {y}) is outside the {columns}x{rows} board")]
    OutOfBounds {
        x: usize,
        y: usize,
        columns: usize,
        rows: usize,
    },
}

/// Fixed-size `columns x rows` grid of cells, stored row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    columns: usize,
    rows: usize,
    cells: Vec<CellState>,
}

impl Board {
    /// Builds an all-dead board. Zero extents are clamped to 1.
    pub fn new(columns: usize, rows: usize) -> Self {
        let (columns, rows) = (columns.max(1), rows.max(1));
        Self {
            columns,
            rows,
            cells: vec![CellState::Dead; columns * rows],
        }
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (self.columns, self.rows)
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    fn index(&self, x: usize, y: usize) -> Result<usize, BoardError> {
        if x >= self.columns || y >= self.rows {
            return Err(BoardError::OutOfBounds { x, y, columns: self.columns, rows: self.rows });
        }
        Ok(y * self.columns + x)
    }

    pub fn get(&self, x: usize, y: usize) -> Result<CellState, BoardError> {
        self.index(x, y).map(|i| self.cells[i])
    }

    pub fn set(&mut self, x: usize, y: usize, state: CellState) -> Result<(), BoardError> {
        let i = self.index(x, y)?;
        self.cells[i] = state;
        Ok(())
    }

    /// Writes a cell the caller already knows is on the board.
    pub(crate) fn put(&mut self, x: usize, y: usize, state: CellState) {
        assert!(
            x < self.columns && y < self.rows,
            "cell ({x}, {y}) is outside the {}x{} board",
            self.columns,
            self.rows
        );
        self.cells[y * self.columns + x] = state;
    }

    pub fn is_alive(&self, x: usize, y: usize) -> bool {
        self.get(x, y).is_ok_and(CellState::is_alive)
    }

    /// Reads the cell at `(x + dx, y + dy)`, wrapping on both axes.
    pub fn get_wrapped(&self, x: usize, y: usize, dx: isize, dy: isize) -> CellState {
        let wx = wrap(x, dx, self.columns);
        let wy = wrap(y, dy, self.rows);
        self.cells[wy * self.columns + wx]
    }

    /// Reallocates the storage; every cell becomes dead.
    pub fn resize(&mut self, columns: usize, rows: usize) {
        *self = Board::new(columns, rows);
    }

    pub fn clear(&mut self) {
        self.cells.fill(CellState::Dead);
    }

    /// Sets each cell alive independently with probability `density`.
    pub fn randomize<R: Rng + ?Sized>(&mut self, density: f64, rng: &mut R) {
        let density = if density.is_nan() { 0.0 } else { density.clamp(0.0, 1.0) };
        for cell in self.cells.iter_mut() {
            *cell = rng.gen_bool(density).into();
        }
    }

    pub fn population(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_alive()).count()
    }

    /// Coordinates of every living cell, in row-major order.
    pub fn alive_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let columns = self.columns;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_alive())
            .map(move |(i, _)| (i % columns, i / columns))
    }
}

fn wrap(value: usize, delta: isize, extent: usize) -> usize {
    let extent = extent as isize;
    ((value as isize + delta) % extent + extent) as usize % extent as usize
}

/// Two equally sized boards plus the index of the one currently read.
///
/// `swap` flips the index; no cell data is copied.
#[derive(Debug, Clone)]
pub struct BoardPair {
    buffers: [Board; 2],
    active: usize,
}

impl BoardPair {
    pub fn new(columns: usize, rows: usize) -> Self {
        Self {
            buffers: [Board::new(columns, rows), Board::new(columns, rows)],
            active: 0,
        }
    }

    pub fn dimensions(&self) -> (usize, usize) {
        self.current().dimensions()
    }

    pub fn current(&self) -> &Board {
        &self.buffers[self.active]
    }

    pub fn current_mut(&mut self) -> &mut Board {
        &mut self.buffers[self.active]
    }

    pub fn next(&self) -> &Board {
        &self.buffers[1 - self.active]
    }

    /// Read-only current buffer alongside the writable next buffer.
    pub fn split(&mut self) -> (&Board, &mut Board) {
        let (first, second) = self.buffers.split_at_mut(1);
        if self.active == 0 {
            (&first[0], &mut second[0])
        } else {
            (&second[0], &mut first[0])
        }
    }

    pub fn swap(&mut self) {
        self.active = 1 - self.active;
    }

    /// Reallocates both buffers to the new extent.
    pub fn resize(&mut self, columns: usize, rows: usize) {
        for board in self.buffers.iter_mut() {
            board.resize(columns, rows);
        }
    }

    pub fn clear(&mut self) {
        for board in self.buffers.iter_mut() {
            board.clear();
        }
    }
}
