//! Per-cell g/rhs storage.
//!
//! Dense arrays sized to the grid, created once per planner and reused
//! across episodes and edits.

use crate::core::{GridBounds, GridCoord};

/// Cost-to-come (`g`), one-step lookahead (`rhs`) and parent for every cell.
#[derive(Clone, Debug)]
pub struct ConsistencyStore {
    bounds: GridBounds,
    g: Vec<f32>,
    rhs: Vec<f32>,
    parent: Vec<Option<GridCoord>>,
}

impl ConsistencyStore {
    /// Create a store with every value at infinity.
    pub fn new(bounds: GridBounds) -> Self {
        let n = bounds.cell_count();
        Self {
            bounds,
            g: vec![f32::INFINITY; n],
            rhs: vec![f32::INFINITY; n],
            parent: vec![None; n],
        }
    }

    #[inline]
    fn idx(&self, coord: GridCoord) -> Option<usize> {
        self.bounds.index(coord)
    }

    /// Best known cost-to-come (∞ outside the grid).
    #[inline]
    pub fn g(&self, coord: GridCoord) -> f32 {
        self.idx(coord).map_or(f32::INFINITY, |i| self.g[i])
    }

    /// One-step lookahead value (∞ outside the grid).
    #[inline]
    pub fn rhs(&self, coord: GridCoord) -> f32 {
        self.idx(coord).map_or(f32::INFINITY, |i| self.rhs[i])
    }

    /// `min(g, rhs)`.
    #[inline]
    pub fn best(&self, coord: GridCoord) -> f32 {
        self.g(coord).min(self.rhs(coord))
    }

    /// Recorded predecessor.
    #[inline]
    pub fn parent(&self, coord: GridCoord) -> Option<GridCoord> {
        self.idx(coord).and_then(|i| self.parent[i])
    }

    /// Set the cost-to-come. Out-of-bounds cells are ignored.
    #[inline]
    pub fn set_g(&mut self, coord: GridCoord, value: f32) {
        if let Some(i) = self.idx(coord) {
            self.g[i] = value;
        }
    }

    /// Set the one-step lookahead value.
    #[inline]
    pub fn set_rhs(&mut self, coord: GridCoord, value: f32) {
        if let Some(i) = self.idx(coord) {
            self.rhs[i] = value;
        }
    }

    /// Record the predecessor `rhs` was taken from.
    #[inline]
    pub fn set_parent(&mut self, coord: GridCoord, parent: Option<GridCoord>) {
        if let Some(i) = self.idx(coord) {
            self.parent[i] = parent;
        }
    }

    /// True if `g != rhs`.
    ///
    /// Two infinities compare equal, so unreached cells are consistent.
    #[inline]
    pub fn is_inconsistent(&self, coord: GridCoord) -> bool {
        self.g(coord) != self.rhs(coord)
    }

    /// True if `g > rhs` (a better path is known but not yet propagated).
    #[inline]
    pub fn is_overconsistent(&self, coord: GridCoord) -> bool {
        self.g(coord) > self.rhs(coord)
    }

    /// True if `g < rhs` (the recorded cost is no longer achievable).
    #[inline]
    pub fn is_underconsistent(&self, coord: GridCoord) -> bool {
        self.g(coord) < self.rhs(coord)
    }

    /// Number of cells with a finite cost-to-come.
    pub fn reached_count(&self) -> usize {
        self.g.iter().filter(|g| g.is_finite()).count()
    }

    /// Grid extent.
    pub fn bounds(&self) -> GridBounds {
        self.bounds
    }
}
