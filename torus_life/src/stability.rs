// stability.rs - Per-cell display categories derived from consecutive generations

use crate::grid::Board;

/// Display category of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StabilityTag {
    #[default]
    Dead,
    AliveStable,   // alive before and after the last transition
    AliveChanging, // newly born, or set outside a transition
}

impl StabilityTag {
    pub fn classify(before: bool, after: bool) -> Self {
        match (before, after) {
            (true, true) => StabilityTag::AliveStable,
            (_, true)    => StabilityTag::AliveChanging,
            (_, false)   => StabilityTag::Dead,
        }
    }
}

/// Tags for the board currently on display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stability {
    columns: usize,
    tags: Vec<StabilityTag>,
}

impl Stability {
    /// Tags a board that has no previous generation to compare against.
    pub fn fresh(board: &Board) -> Self {
        let (columns, rows) = board.dimensions();
        let mut tags = vec![StabilityTag::Dead; columns * rows];
        for (x, y) in board.alive_cells() {
            tags[y * columns + x] = StabilityTag::AliveChanging;
        }
        Self { columns, tags }
    }

    /// Compares a transition's source and destination buffers before they swap.
    pub fn compare(before: &Board, after: &Board) -> Self {
        debug_assert_eq!(before.dimensions(), after.dimensions());
        let (columns, rows) = after.dimensions();
        let mut tags = Vec::with_capacity(columns * rows);
        for y in 0..rows {
            for x in 0..columns {
                tags.push(StabilityTag::classify(before.is_alive(x, y), after.is_alive(x, y)));
            }
        }
        Self { columns, tags }
    }

    pub fn tag(&self, x: usize, y: usize) -> StabilityTag {
        if x >= self.columns {
            return StabilityTag::Dead;
        }
        self.tags.get(y * self.columns + x).copied().unwrap_or_default()
    }

    pub fn is_stable(&self, x: usize, y: usize) -> bool {
        self.tag(x, y) == StabilityTag::AliveStable
    }

    /// Records a manual activation.
    pub fn mark_painted(&mut self, x: usize, y: usize) {
        if x >= self.columns {
            return;
        }
        if let Some(tag) = self.tags.get_mut(y * self.columns + x) {
            *tag = StabilityTag::AliveChanging;
        }
    }

    pub fn stable_count(&self) -> usize {
        self.tags.iter().filter(|tag| **tag == StabilityTag::AliveStable).count()
    }
}
