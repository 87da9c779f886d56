// interaction.rs - Pointer coordinates to cells, and manual painting

use crate::grid::{Board, CellState};

/// Maps pixel positions on the rendered board to cells.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InteractionLayer {
    unit_length: f32,
}

impl InteractionLayer {
    /// `unit_length` is the edge of one rendered cell in pixels (at least 1).
    pub fn new(unit_length: u32) -> Self {
        Self { unit_length: unit_length.max(1) as f32 }
    }

    pub fn unit_length(&self) -> f32 {
        self.unit_length
    }

    /// The cell under `(pixel_x, pixel_y)`, or `None` outside the board extent.
    pub fn cell_at(&self, board: &Board, pixel_x: f32, pixel_y: f32) -> Option<(usize, usize)> {
        let (columns, rows) = board.dimensions();
        let width = self.unit_length * columns as f32;
        let height = self.unit_length * rows as f32;
        if !(0.0..width).contains(&pixel_x) || !(0.0..height).contains(&pixel_y) {
            return None;
        }
        let x = (pixel_x / self.unit_length).floor() as usize;
        let y = (pixel_y / self.unit_length).floor() as usize;
        // float rounding at the far edge
        Some((x.min(columns - 1), y.min(rows - 1)))
    }

    /// Forces the cell under the pointer alive and returns it for redraw.
    pub fn paint_at(&self, board: &mut Board, pixel_x: f32, pixel_y: f32) -> Option<(usize, usize)> {
        let (x, y) = self.cell_at(board, pixel_x, pixel_y)?;
        board.set(x, y, CellState::Alive).ok()?;
        Some((x, y))
    }
}

/// Number of whole cells fitting a viewport, never less than 1x1.
pub fn grid_dimensions(width_px: f32, height_px: f32, cell_size: u32) -> (usize, usize) {
    let unit = cell_size.max(1) as f32;
    let fit = |extent: f32| {
        if extent.is_finite() && extent > 0.0 { (extent / unit).floor() as usize } else { 0 }
    };
    (fit(width_px).max(1), fit(height_px).max(1))
}
