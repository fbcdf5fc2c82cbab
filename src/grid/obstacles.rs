//! Dense obstacle bitmap.

use crate::core::{GridBounds, GridCoord};

/// Set of blocked cells, stored as one flag per cell in row-major order.
///
/// Coordinates outside the bounds are never members; inserting them is a
/// no-op that reports no change.
#[derive(Clone, Debug)]
pub struct ObstacleSet {
    bounds: GridBounds,
    blocked: Vec<bool>,
    count: usize,
}

impl ObstacleSet {
    /// Create an empty obstacle set covering `bounds`.
    pub fn new(bounds: GridBounds) -> Self {
        Self {
            bounds,
            blocked: vec![false; bounds.cell_count()],
            count: 0,
        }
    }

    /// Create an obstacle set from a list of blocked cells.
    ///
    /// Cells outside the bounds are ignored.
    pub fn from_cells<I>(bounds: GridBounds, cells: I) -> Self
    where
        I: IntoIterator<Item = GridCoord>,
    {
        let mut set = Self::new(bounds);
        for cell in cells {
            set.insert(cell);
        }
        set
    }

    /// Grid extent covered by this set.
    #[inline]
    pub fn bounds(&self) -> GridBounds {
        self.bounds
    }

    /// Check whether a cell is blocked.
    #[inline]
    pub fn contains(&self, coord: GridCoord) -> bool {
        self.bounds
            .index(coord)
            .is_some_and(|idx| self.blocked[idx])
    }

    /// Set the membership of a cell. Returns true if it changed.
    pub fn set(&mut self, coord: GridCoord, blocked: bool) -> bool {
        let Some(idx) = self.bounds.index(coord) else {
            return false;
        };
        if self.blocked[idx] == blocked {
            return false;
        }
        self.blocked[idx] = blocked;
        if blocked {
            self.count += 1;
        } else {
            self.count -= 1;
        }
        true
    }

    /// Mark a cell as blocked. Returns true if it was free before.
    #[inline]
    pub fn insert(&mut self, coord: GridCoord) -> bool {
        self.set(coord, true)
    }

    /// Clear a blocked cell. Returns true if it was blocked before.
    #[inline]
    pub fn remove(&mut self, coord: GridCoord) -> bool {
        self.set(coord, false)
    }

    /// Number of blocked cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.count
    }

    /// True if no cell is blocked.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Fraction of the grid that is blocked.
    pub fn coverage(&self) -> f32 {
        let total = self.bounds.cell_count();
        if total == 0 {
            0.0
        } else {
            self.count as f32 / total as f32
        }
    }

    /// Iterate over blocked cells in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = GridCoord> + '_ {
        self.blocked
            .iter()
            .enumerate()
            .filter(|(_, blocked)| **blocked)
            .map(|(idx, _)| self.bounds.coord(idx))
    }
}
