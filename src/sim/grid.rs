//! Uniform spatial grid
//!
//! Fixed rows x cols bucket grid over the arena. Each cell holds the IDs of
//! the balls whose center currently maps into it, so the 3x3 neighborhood
//! around a ball bounds its possible contacts and the pair scan stays
//! near-linear in ball count.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Bucket grid over the arena, keyed by ball center
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpatialGrid {
    rows: usize,
    cols: usize,
    cell_width: f32,
    cell_height: f32,
    cells: Vec<Vec<u32>>,
}

impl SpatialGrid {
    pub fn new(rows: usize, cols: usize, arena_width: f32, arena_height: f32) -> Self {
        let rows = rows.max(1);
        let cols = cols.max(1);
        Self {
            rows,
            cols,
            cell_width: arena_width / cols as f32,
            cell_height: arena_height / rows as f32,
            cells: vec![Vec::new(); rows * cols],
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Map a position to (row, col), clamped to the grid bounds
    pub fn cell_for(&self, pos: Vec2) -> (usize, usize) {
        let col = ((pos.x / self.cell_width) as isize).clamp(0, self.cols as isize - 1);
        let row = ((pos.y / self.cell_height) as isize).clamp(0, self.rows as isize - 1);
        (row as usize, col as usize)
    }

    /// Record a ball at `pos`. Safe to call twice with the same arguments.
    pub fn assign(&mut self, id: u32, pos: Vec2) {
        let (row, col) = self.cell_for(pos);
        let cell = &mut self.cells[row * self.cols + col];
        if !cell.contains(&id) {
            cell.push(id);
        }
    }

    /// Move a ball's membership from the cell of `old_pos` to the cell of
    /// `new_pos`. A no-op when both map to the same cell.
    pub fn relocate(&mut self, id: u32, old_pos: Vec2, new_pos: Vec2) {
        let old_cell = self.cell_for(old_pos);
        let new_cell = self.cell_for(new_pos);
        if old_cell != new_cell {
            let (row, col) = old_cell;
            let cell = &mut self.cells[row * self.cols + col];
            if let Some(i) = cell.iter().position(|&b| b == id) {
                cell.remove(i);
            }
        }
        self.assign(id, new_pos);
    }

    /// IDs in the 3x3 block of cells around `pos`, own cell included
    pub fn neighborhood(&self, pos: Vec2) -> Vec<u32> {
        let (row, col) = self.cell_for(pos);
        let mut out = Vec::new();
        for r in row.saturating_sub(1)..=(row + 1).min(self.rows - 1) {
            for c in col.saturating_sub(1)..=(col + 1).min(self.cols - 1) {
                out.extend_from_slice(&self.cells[r * self.cols + c]);
            }
        }
        out
    }

    /// Contents of one cell
    pub fn cell(&self, row: usize, col: usize) -> &[u32] {
        &self.cells[row * self.cols + col]
    }

    /// Total memberships across all cells
    pub fn population(&self) -> usize {
        self.cells.iter().map(Vec::len).sum()
    }
}
