//! Obstacle edits and change propagation.
//!
//! An edit flips obstacle membership for a set of cells and re-evaluates the
//! cells whose lookahead depends on them. In lazy mode that is all the work
//! done up front; the next episode propagates the change. Eager mode keeps
//! expanding until no state is left inconsistent.

use std::collections::HashSet;

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::core::{GridBounds, GridCoord};
use crate::error::{PlannerError, Result};
use crate::grid::CostModel;

use super::planner::Planner;

/// How far an edit propagates before returning.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepairMode {
    /// Update the touched cells only; the next episode repairs the rest
    #[default]
    Lazy,
    /// Propagate until the frontier is empty
    Eager,
}

/// Square obstacle patch size.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClumpSize {
    /// Single cell
    #[default]
    Small,
    /// 3×3 patch
    Medium,
    /// 5×5 patch
    Large,
}

impl ClumpSize {
    /// Chebyshev radius of the patch.
    pub fn radius(self) -> i32 {
        match self {
            ClumpSize::Small => 0,
            ClumpSize::Medium => 1,
            ClumpSize::Large => 2,
        }
    }
}

/// Cells of a square patch centred on `center`, clipped to the grid.
pub fn clump(center: GridCoord, size: ClumpSize, bounds: GridBounds) -> Vec<GridCoord> {
    let r = size.radius();
    let mut cells = Vec::with_capacity(((2 * r + 1) * (2 * r + 1)) as usize);
    for dy in -r..=r {
        for dx in -r..=r {
            let cell = GridCoord::new(center.x + dx, center.y + dy);
            if bounds.contains(cell) {
                cells.push(cell);
            }
        }
    }
    cells
}

/// Summary of one edit.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EditReport {
    /// True for insertions, false for removals
    pub added: bool,
    /// Cells whose obstacle membership actually changed
    pub cells_changed: Vec<GridCoord>,
    /// Calls to the vertex update made by the edit
    pub vertices_updated: usize,
    /// Expansions performed by eager propagation
    pub expanded: usize,
}

impl EditReport {
    /// True if the edit changed no cell.
    pub fn is_noop(&self) -> bool {
        self.cells_changed.is_empty()
    }
}

impl<M: CostModel> Planner<M> {
    /// Insert (`add = true`) or remove obstacles.
    ///
    /// All cells are checked before anything changes; one out-of-bounds
    /// cell rejects the whole edit. Start and goal are never blocked, and
    /// cells already in the requested state are skipped, so repeating an
    /// edit does nothing.
    pub fn apply_edit<I>(&mut self, cells: I, add: bool) -> Result<EditReport>
    where
        I: IntoIterator<Item = GridCoord>,
    {
        let cells: Vec<GridCoord> = cells.into_iter().collect();
        let bounds = self.model.bounds();
        if let Some(&bad) = cells.iter().find(|&&c| !bounds.contains(c)) {
            return Err(PlannerError::InvalidEdit(bad));
        }

        let mut report = EditReport {
            added: add,
            ..Default::default()
        };

        let effective = cells.iter().any(|&c| {
            c != self.start && c != self.goal && self.model.is_obstacle(c) != add
        });
        if effective && self.episode_in_progress {
            // Closed states are stale once the world changes
            self.abandon_episode();
        }

        for cell in cells {
            if cell == self.start || cell == self.goal {
                trace!("[Marga] edit skips endpoint {}", cell);
                continue;
            }
            if !self.model.set_obstacle(cell, add) {
                continue;
            }
            if add {
                self.store.set_g(cell, f32::INFINITY);
            }
            self.update_vertex(cell);
            report.vertices_updated += 1;
            for n in self.edit_neighborhood(cell) {
                self.update_vertex(n);
                report.vertices_updated += 1;
            }
            report.cells_changed.push(cell);
        }

        if report.cells_changed.is_empty() {
            return Ok(report);
        }

        self.converged = false;
        if self.config.reset_epsilon_on_edit {
            self.reset_epsilon();
        }
        if self.config.repair_mode == RepairMode::Eager {
            report.expanded = self.propagate();
        }

        debug!(
            "[Marga] edit ({}): {} cells changed, {} vertex updates, {} expansions, {} queued",
            if add { "add" } else { "remove" },
            report.cells_changed.len(),
            report.vertices_updated,
            report.expanded,
            self.frontier.len()
        );

        Ok(report)
    }

    /// Insert or remove a square patch of obstacles.
    pub fn apply_clump_edit(
        &mut self,
        center: GridCoord,
        size: ClumpSize,
        add: bool,
    ) -> Result<EditReport> {
        let bounds = self.model.bounds();
        if !bounds.contains(center) {
            return Err(PlannerError::InvalidEdit(center));
        }
        self.apply_edit(clump(center, size, bounds), add)
    }

    /// Block the patch if its centre is free, otherwise clear it.
    pub fn toggle_clump(&mut self, center: GridCoord, size: ClumpSize) -> Result<EditReport> {
        let add = !self.model.is_obstacle(center);
        self.apply_clump_edit(center, size, add)
    }

    /// Cells whose lookahead can depend on `cell`: its successors,
    /// its predecessors and the surrounding ring (diagonal moves through
    /// the ring use `cell` as a corner).
    fn edit_neighborhood(&self, cell: GridCoord) -> Vec<GridCoord> {
        let bounds = self.model.bounds();
        let mut seen = HashSet::new();
        let ring = (-1..=1)
            .flat_map(|dy| (-1..=1).map(move |dx| GridCoord::new(cell.x + dx, cell.y + dy)))
            .filter(|&n| n != cell && bounds.contains(n));

        self.model
            .neighbors(cell)
            .into_iter()
            .chain(self.model.predecessors(cell))
            .chain(ring)
            .filter(|&n| !self.model.is_obstacle(n) && seen.insert(n))
            .collect()
    }

    /// Expand until no state is inconsistent.
    ///
    /// Expansion order uses un-inflated keys so every state settles at its
    /// exact cost.
    fn propagate(&mut self) -> usize {
        let epsilon = self.epsilon;
        self.epsilon = 1.0;
        self.rekey_frontier();

        let mut expanded = 0;
        while let Some((coord, _)) = self.frontier.pop_min() {
            self.expand(coord);
            expanded += 1;
        }

        self.epsilon = epsilon;
        expanded
    }
}
