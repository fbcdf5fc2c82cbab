//! Path reconstruction from the search state.
//!
//! Two strategies are available:
//! - [`ExtractionStrategy::Backward`] descends from the goal, always stepping
//!   to the neighbor that minimizes `g[n] + c(n, current)`. It only reads
//!   `g` values, so it stays valid after lazy repairs left parents stale.
//! - [`ExtractionStrategy::ParentWalk`] follows the recorded parents, which
//!   is cheaper but only trustworthy right after a completed episode.
//!
//! Both return the path ordered from start to goal.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::core::GridCoord;
use crate::grid::CostModel;

use super::consistency::ConsistencyStore;
use super::episode::PathFailure;

/// How a path is read back from the search state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionStrategy {
    /// Greedy descent on `g` from the goal
    #[default]
    Backward,
    /// Follow recorded parents from the goal
    ParentWalk,
}

/// Reconstruct a path by descending `g` from the goal.
pub fn descend<M: CostModel>(
    model: &M,
    store: &ConsistencyStore,
    start: GridCoord,
    goal: GridCoord,
    max_depth: usize,
) -> Result<Vec<GridCoord>, PathFailure> {
    if start == goal {
        return Ok(vec![start]);
    }
    if store.best(goal).is_infinite() {
        return Err(PathFailure::NoPath);
    }

    let mut path = vec![goal];
    let mut visited = HashSet::from([goal]);
    let mut current = goal;

    while current != start {
        if path.len() > max_depth {
            return Err(PathFailure::DepthLimitExceeded);
        }

        // On equal cost prefer states whose g is still achievable, then the
        // first in motion-set order
        let next = model
            .predecessors(current)
            .into_iter()
            .filter(|p| !visited.contains(p))
            .filter_map(|p| {
                let value = store.g(p) + model.edge_cost(p, current);
                value
                    .is_finite()
                    .then_some((p, value, store.is_underconsistent(p)))
            })
            .min_by(|a, b| a.1.total_cmp(&b.1).then(a.2.cmp(&b.2)));

        let Some((p, _, _)) = next else {
            return Err(PathFailure::DeadEnd);
        };
        visited.insert(p);
        path.push(p);
        current = p;
    }

    path.reverse();
    Ok(path)
}

/// Reconstruct a path by following parent pointers from the goal.
///
/// Fails if a parent is missing, revisits a cell, or is no longer joined
/// to its child by a passable edge.
pub fn walk_parents<M: CostModel>(
    model: &M,
    store: &ConsistencyStore,
    start: GridCoord,
    goal: GridCoord,
    max_depth: usize,
) -> Result<Vec<GridCoord>, PathFailure> {
    if start == goal {
        return Ok(vec![start]);
    }
    if store.best(goal).is_infinite() {
        return Err(PathFailure::NoPath);
    }

    let mut path = vec![goal];
    let mut visited = HashSet::from([goal]);
    let mut current = goal;

    while current != start {
        if path.len() > max_depth {
            return Err(PathFailure::DepthLimitExceeded);
        }
        let Some(p) = store.parent(current) else {
            return Err(PathFailure::DeadEnd);
        };
        if !visited.insert(p) || model.edge_cost(p, current).is_infinite() {
            return Err(PathFailure::DeadEnd);
        }
        path.push(p);
        current = p;
    }

    path.reverse();
    Ok(path)
}

/// Sum of edge costs along a path (0 for a single cell).
pub fn path_cost<M: CostModel>(model: &M, path: &[GridCoord]) -> f32 {
    path.windows(2).map(|w| model.edge_cost(w[0], w[1])).sum()
}
