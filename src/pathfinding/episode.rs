//! Search episodes: one improvement pass at a fixed ε.

use std::sync::atomic::{AtomicBool, Ordering};

use log::{debug, trace};
use thiserror::Error;

use crate::core::GridCoord;
use crate::error::{PlannerError, Result};
use crate::grid::CostModel;

use super::controller::suboptimality_bound;
use super::extract::{self, ExtractionStrategy};
use super::planner::Planner;

/// Reason an episode did not produce a path
#[derive(Error, Clone, Copy, Debug, PartialEq, Eq)]
pub enum PathFailure {
    /// The goal is unreachable under the current obstacles
    #[error("goal is unreachable")]
    NoPath,
    /// Path reconstruction ran out of usable neighbors
    #[error("path reconstruction reached a dead end")]
    DeadEnd,
    /// Path reconstruction exceeded the configured depth cap
    #[error("path reconstruction exceeded the depth limit")]
    DepthLimitExceeded,
    /// The caller requested cancellation
    #[error("episode was cancelled")]
    Cancelled,
    /// The per-call expansion budget ran out
    #[error("expansion budget exhausted")]
    ExpansionLimit,
}

/// Outcome of one episode.
#[derive(Clone, Debug)]
pub struct EpisodeResult {
    /// Cells from start to goal (empty on failure)
    pub path: Vec<GridCoord>,
    /// Sum of edge costs along `path` (∞ if no path)
    pub cost: f32,
    /// Lookahead cost of the goal when the episode ended
    pub goal_estimate: f32,
    /// States popped from the frontier during this call
    pub expanded: usize,
    /// Inflation factor the episode ran with
    pub epsilon_used: f32,
    /// Proven suboptimality factor of `goal_estimate` (≥ 1)
    pub bound: f32,
    /// False if the episode was interrupted and will resume
    pub complete: bool,
    /// True if the bound reached 1 (no further improvement possible)
    pub converged: bool,
    /// Why no path was returned
    pub failure: Option<PathFailure>,
}

impl EpisodeResult {
    /// True if the episode completed and produced a path.
    pub fn success(&self) -> bool {
        self.complete && self.failure.is_none()
    }
}

impl<M: CostModel> Planner<M> {
    /// Run (or resume) one search episode at the current ε.
    ///
    /// The episode expands states in key order until the goal's key is
    /// no larger than the frontier minimum. If `cancel` is set, or the
    /// configured expansion budget runs out, the call returns an
    /// incomplete result and the next call continues the same episode.
    pub fn run_episode(&mut self, cancel: Option<&AtomicBool>) -> EpisodeResult {
        if !self.episode_in_progress {
            self.episode_in_progress = true;
            trace!("[Marga] episode {} starts at eps={:.2}", self.episodes_completed, self.epsilon);
        }

        let budget = self.config.max_expansions;
        let mut expanded = 0usize;

        loop {
            if cancel.is_some_and(|flag| flag.load(Ordering::Relaxed)) {
                return self.interrupted(expanded, PathFailure::Cancelled);
            }
            if budget > 0 && expanded >= budget {
                return self.interrupted(expanded, PathFailure::ExpansionLimit);
            }

            let Some(top) = self.frontier.top_key() else {
                break;
            };
            if !self.store.is_underconsistent(self.goal) && self.calculate_key(self.goal) <= top {
                break;
            }
            let Some((coord, _)) = self.frontier.pop_min() else {
                break;
            };
            self.expand(coord);
            expanded += 1;
        }

        self.finish_episode(expanded)
    }

    /// Run episodes until converged, failed or cancelled.
    pub fn plan(&mut self, cancel: Option<&AtomicBool>) -> Vec<EpisodeResult> {
        let mut results = Vec::new();
        loop {
            let result = self.run_episode(cancel);
            let done = result.converged || result.failure.is_some();
            results.push(result);
            if done {
                return results;
            }
        }
    }

    /// Expand one popped state.
    ///
    /// Overconsistent states take their lookahead value and are closed for
    /// the rest of the episode. Underconsistent states are reset to ∞ and
    /// re-evaluated along with their successors.
    pub(super) fn expand(&mut self, coord: GridCoord) {
        self.total_expanded += 1;

        if self.store.is_overconsistent(coord) {
            self.store.set_g(coord, self.store.rhs(coord));
            if self.episode_in_progress {
                self.closed.insert(coord);
            }
            for n in self.model.neighbors(coord) {
                if !self.model.is_obstacle(n) {
                    self.update_vertex(n);
                }
            }
        } else if self.store.is_underconsistent(coord) {
            self.store.set_g(coord, f32::INFINITY);
            self.update_vertex(coord);
            for n in self.model.neighbors(coord) {
                if !self.model.is_obstacle(n) {
                    self.update_vertex(n);
                }
            }
        }
    }

    fn interrupted(&self, expanded: usize, reason: PathFailure) -> EpisodeResult {
        debug!(
            "[Marga] episode interrupted ({}) after {} expansions, {} queued",
            reason,
            expanded,
            self.frontier.len()
        );
        EpisodeResult {
            path: Vec::new(),
            cost: f32::INFINITY,
            goal_estimate: self.store.rhs(self.goal),
            expanded,
            epsilon_used: self.epsilon,
            bound: f32::INFINITY,
            complete: false,
            converged: false,
            failure: Some(reason),
        }
    }

    /// Close out a completed episode: compute the bound, fold INCONS back
    /// into the frontier, lower ε and extract the path.
    fn finish_episode(&mut self, expanded: usize) -> EpisodeResult {
        let epsilon_used = self.epsilon;
        let goal_estimate = self.store.rhs(self.goal);

        let min_f = self
            .frontier
            .states()
            .chain(self.incons.iter().copied())
            .map(|s| self.store.best(s) + self.model.heuristic(s))
            .fold(f32::INFINITY, f32::min);
        let bound = suboptimality_bound(epsilon_used, goal_estimate, min_f);

        self.merge_incons();
        self.episode_in_progress = false;
        self.episodes_completed += 1;

        let reached = goal_estimate.is_finite();
        self.converged = reached && bound <= 1.0;
        if self.converged {
            // Nothing left to improve; repairs after this run un-inflated
            self.epsilon = 1.0;
        } else if reached {
            self.epsilon = super::controller::next_epsilon(self.epsilon, self.config.epsilon_step);
        }
        self.rekey_frontier();

        let (path, cost, failure) = if reached {
            match self.reconstruct() {
                Ok(path) => {
                    let cost = extract::path_cost(&self.model, &path);
                    (path, cost, None)
                }
                Err(reason) => (Vec::new(), f32::INFINITY, Some(reason)),
            }
        } else {
            (Vec::new(), f32::INFINITY, Some(PathFailure::NoPath))
        };

        debug!(
            "[Marga] episode {} done: eps={:.2} expanded={} cost={:.3} bound={:.3} queued={}",
            self.episodes_completed,
            epsilon_used,
            expanded,
            cost,
            bound,
            self.frontier.len()
        );

        EpisodeResult {
            path,
            cost,
            goal_estimate,
            expanded,
            epsilon_used,
            bound,
            complete: true,
            converged: self.converged,
            failure,
        }
    }

    /// Read the current best path back from the search state.
    ///
    /// Uses the configured [`ExtractionStrategy`]. Valid at any time, though
    /// between a lazy edit and the next episode the path reflects the
    /// pre-edit costs.
    pub fn extract_path(&self) -> Result<Vec<GridCoord>> {
        self.reconstruct().map_err(PlannerError::PathNotFound)
    }

    fn reconstruct(&self) -> std::result::Result<Vec<GridCoord>, PathFailure> {
        let depth = self.config.max_extract_depth;
        match self.config.extraction {
            ExtractionStrategy::Backward => {
                extract::descend(&self.model, &self.store, self.start, self.goal, depth)
            }
            ExtractionStrategy::ParentWalk => {
                extract::walk_parents(&self.model, &self.store, self.start, self.goal, depth)
            }
        }
    }
}
