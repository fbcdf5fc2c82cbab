//! Rectangular grid extent.
//!
//! [`GridBounds`] describes the `[0, width) × [0, height)` cell range a
//! planner operates on, and converts between coordinates and the row-major
//! indices used by the dense per-cell arrays.

use serde::{Deserialize, Serialize};

use super::point::GridCoord;

/// Grid extent in cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridBounds {
    /// Number of columns.
    pub width: usize,
    /// Number of rows.
    pub height: usize,
}

impl GridBounds {
    /// Create bounds for a `width × height` grid.
    #[inline]
    pub const fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    /// Total number of cells.
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.width * self.height
    }

    /// Check if a coordinate lies inside the grid.
    #[inline]
    pub fn contains(&self, coord: GridCoord) -> bool {
        coord.x >= 0
            && coord.y >= 0
            && (coord.x as usize) < self.width
            && (coord.y as usize) < self.height
    }

    /// Row-major index of a coordinate, or `None` if outside the grid.
    #[inline]
    pub fn index(&self, coord: GridCoord) -> Option<usize> {
        if self.contains(coord) {
            Some(coord.y as usize * self.width + coord.x as usize)
        } else {
            None
        }
    }

    /// Coordinate for a row-major index.
    #[inline]
    pub fn coord(&self, index: usize) -> GridCoord {
        GridCoord::new((index % self.width) as i32, (index / self.width) as i32)
    }

    /// Iterate over every coordinate in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = GridCoord> + '_ {
        (0..self.cell_count()).map(|i| self.coord(i))
    }
}
