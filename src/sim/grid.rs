//! Occupancy grid over the road for pathfinding
//!
//! The road band [LEFT_BOUNDARY, RIGHT_BOUNDARY] x [0, SCREEN_HEIGHT) is cut into
//! square cells of `CELL_SIZE`. A cell is blocked when an obstacle's anchor
//! (top-left corner) lies inside it. Obstacles are exactly one cell wide, so the
//! anchor cell covers the footprint.
//!
//! The grid is only as fresh as its last `rebuild`.

use glam::IVec2;

use super::state::Obstacle;
use crate::consts::*;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpatialGrid {
    columns: i32,
    rows: i32,
    /// Pixel x of column 0
    origin_x: i32,
    /// Row-major occupancy
    blocked: Vec<bool>,
}

impl Default for SpatialGrid {
    fn default() -> Self {
        Self::road()
    }
}

impl SpatialGrid {
    pub fn new(columns: i32, rows: i32, origin_x: i32) -> Self {
        let columns = columns.max(0);
        let rows = rows.max(0);
        Self {
            columns,
            rows,
            origin_x,
            blocked: vec![false; (columns * rows) as usize],
        }
    }

    /// Grid covering the playable road (10 x 12 cells)
    pub fn road() -> Self {
        Self::new(
            (RIGHT_BOUNDARY - LEFT_BOUNDARY) / CELL_SIZE + 1,
            SCREEN_HEIGHT / CELL_SIZE,
            LEFT_BOUNDARY,
        )
    }

    /// Clear every cell, then mark the anchor cell of each obstacle
    pub fn rebuild(&mut self, obstacles: &[Obstacle]) {
        self.blocked.fill(false);
        for obstacle in obstacles {
            let cell = self.cell_at(obstacle.pos);
            // Obstacles more than a cell above the screen map off-grid and are ignored
            self.set_blocked(cell, true);
        }
    }

    /// Pixel position to cell coordinate
    ///
    /// Division truncates toward zero, so the partial cell just above or left
    /// of the grid folds into row or column 0. Anything further out lands on a
    /// negative cell.
    #[inline]
    pub fn cell_at(&self, point: IVec2) -> IVec2 {
        (point - IVec2::new(self.origin_x, 0)) / CELL_SIZE
    }

    #[inline]
    pub fn in_bounds(&self, cell: IVec2) -> bool {
        cell.x >= 0 && cell.x < self.columns && cell.y >= 0 && cell.y < self.rows
    }

    /// True if the cell is off-grid or occupied
    pub fn is_blocked(&self, cell: IVec2) -> bool {
        match self.index(cell) {
            Some(i) => self.blocked[i],
            None => true,
        }
    }

    /// Mark or clear a single cell. Off-grid cells are ignored.
    pub fn set_blocked(&mut self, cell: IVec2, blocked: bool) {
        if let Some(i) = self.index(cell) {
            self.blocked[i] = blocked;
        }
    }

    /// Number of occupied cells
    pub fn blocked_count(&self) -> usize {
        self.blocked.iter().filter(|&&b| b).count()
    }

    fn index(&self, cell: IVec2) -> Option<usize> {
        self.in_bounds(cell)
            .then(|| (cell.y * self.columns + cell.x) as usize)
    }
}
