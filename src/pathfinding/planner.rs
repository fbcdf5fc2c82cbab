//! The planner handle: owns the world, the consistency store and the
//! frontier for one planning run.
//!
//! Search state persists across episodes and obstacle edits. The episode
//! runner, the ε controller, the change propagator and the path extractor
//! are implemented in sibling modules on the same type.

use std::collections::HashSet;

use log::{debug, warn};

use crate::core::{GridBounds, GridCoord};
use crate::error::{PlannerError, Result};
use crate::grid::{CornerRule, CostModel, GridCostModel, HeuristicKind, MotionSet, ObstacleSet};

use super::consistency::ConsistencyStore;
use super::extract::ExtractionStrategy;
use super::frontier::Frontier;
use super::key::Key;
use super::repair::RepairMode;

/// Planner configuration
#[derive(Clone, Debug)]
pub struct PlannerConfig {
    /// Grid extent (used by [`Planner::new`] to build the cost model)
    pub bounds: GridBounds,
    /// Available moves (used by [`Planner::new`])
    pub motions: MotionSet,
    /// Cost-to-go estimate (used by [`Planner::new`])
    pub heuristic: HeuristicKind,
    /// Diagonal corner-cutting rule (used by [`Planner::new`])
    pub corner_rule: CornerRule,
    /// Initial inflation factor (≥ 1)
    pub epsilon: f32,
    /// Amount ε is lowered between episodes
    pub epsilon_step: f32,
    /// How far an obstacle edit propagates before returning
    pub repair_mode: RepairMode,
    /// How the path is read back from the search state
    pub extraction: ExtractionStrategy,
    /// Maximum number of steps in an extracted path
    pub max_extract_depth: usize,
    /// Expansion budget per episode call (0 = unlimited)
    pub max_expansions: usize,
    /// Restart the ε schedule from `epsilon` after every effective edit
    pub reset_epsilon_on_edit: bool,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            bounds: GridBounds::new(50, 50),
            motions: MotionSet::eight(),
            heuristic: HeuristicKind::Euclidean,
            corner_rule: CornerRule::BothBlocked,
            epsilon: 2.5,
            epsilon_step: 0.4,
            repair_mode: RepairMode::Lazy,
            extraction: ExtractionStrategy::Backward,
            max_extract_depth: 1000,
            max_expansions: 0,
            reset_epsilon_on_edit: false,
        }
    }
}

impl PlannerConfig {
    /// Configuration for a `width × height` grid with default search settings.
    pub fn for_grid(width: usize, height: usize) -> Self {
        Self {
            bounds: GridBounds::new(width, height),
            ..Default::default()
        }
    }

    /// Set the motion set
    pub fn with_motions(mut self, motions: MotionSet) -> Self {
        self.motions = motions;
        self
    }

    /// Set the heuristic
    pub fn with_heuristic(mut self, heuristic: HeuristicKind) -> Self {
        self.heuristic = heuristic;
        self
    }

    /// Set the initial inflation factor and the per-episode decrement
    pub fn with_epsilon(mut self, epsilon: f32, step: f32) -> Self {
        self.epsilon = epsilon;
        self.epsilon_step = step;
        self
    }

    /// Set the repair mode
    pub fn with_repair_mode(mut self, mode: RepairMode) -> Self {
        self.repair_mode = mode;
        self
    }

    /// Set the extraction strategy
    pub fn with_extraction(mut self, extraction: ExtractionStrategy) -> Self {
        self.extraction = extraction;
        self
    }

    /// Check the search parameters.
    pub fn validate(&self) -> Result<()> {
        if !(self.epsilon.is_finite() && self.epsilon >= 1.0) {
            return Err(PlannerError::InvalidEpsilon(self.epsilon));
        }
        if !(self.epsilon_step.is_finite() && self.epsilon_step > 0.0) {
            return Err(PlannerError::InvalidEpsilonStep(self.epsilon_step));
        }
        Ok(())
    }
}

/// Snapshot of one state's search values.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StateInfo {
    /// Best known cost-to-come
    pub g: f32,
    /// One-step lookahead value
    pub rhs: f32,
    /// Priority under the current ε
    pub key: Key,
    /// Queued for expansion
    pub in_frontier: bool,
    /// Deferred to the next episode
    pub in_incons: bool,
    /// Blocked cell
    pub is_obstacle: bool,
}

/// Anytime, incrementally-repairing grid planner.
///
/// # Example
/// ```rust
/// use marga::core::GridCoord;
/// use marga::pathfinding::{Planner, PlannerConfig};
///
/// let config = PlannerConfig::for_grid(20, 20).with_epsilon(2.0, 0.5);
/// let mut planner = Planner::new(config, GridCoord::new(1, 1), GridCoord::new(18, 18)).unwrap();
///
/// let episodes = planner.plan(None);
/// let last = episodes.last().unwrap();
/// assert!(last.converged);
/// assert_eq!(last.path.first(), Some(&GridCoord::new(1, 1)));
/// ```
pub struct Planner<M: CostModel = GridCostModel> {
    pub(super) model: M,
    pub(super) config: PlannerConfig,
    pub(super) start: GridCoord,
    pub(super) goal: GridCoord,
    pub(super) store: ConsistencyStore,
    pub(super) frontier: Frontier,
    pub(super) closed: HashSet<GridCoord>,
    pub(super) incons: HashSet<GridCoord>,
    pub(super) epsilon: f32,
    pub(super) episode_in_progress: bool,
    pub(super) converged: bool,
    pub(super) episodes_completed: usize,
    pub(super) total_expanded: usize,
}

impl Planner<GridCostModel> {
    /// Create a planner on an empty grid.
    pub fn new(config: PlannerConfig, start: GridCoord, goal: GridCoord) -> Result<Self> {
        let obstacles = ObstacleSet::new(config.bounds);
        Self::with_obstacles(config, obstacles, start, goal)
    }

    /// Create a planner over an initial obstacle layout.
    ///
    /// The obstacle set's own bounds take precedence over `config.bounds`.
    pub fn with_obstacles(
        config: PlannerConfig,
        obstacles: ObstacleSet,
        start: GridCoord,
        goal: GridCoord,
    ) -> Result<Self> {
        config.motions.validate()?;
        if config.heuristic == HeuristicKind::Manhattan && config.motions.has_diagonals() {
            warn!(
                "[Marga] Manhattan heuristic with diagonal moves is inadmissible; \
                 the suboptimality bound does not hold"
            );
        }

        let model = GridCostModel::with_obstacles(
            obstacles,
            config.motions.clone(),
            config.heuristic,
            goal,
        )
        .with_corner_rule(config.corner_rule);

        Self::with_cost_model(model, config, start, goal)
    }
}

impl<M: CostModel> Planner<M> {
    /// Create a planner over any cost model.
    ///
    /// Only the search fields of `config` are used; the world is described
    /// entirely by `model`.
    pub fn with_cost_model(
        model: M,
        config: PlannerConfig,
        start: GridCoord,
        goal: GridCoord,
    ) -> Result<Self> {
        config.validate()?;

        let bounds = model.bounds();
        if bounds.cell_count() == 0 {
            return Err(PlannerError::InvalidBounds {
                width: bounds.width,
                height: bounds.height,
            });
        }
        for coord in [start, goal] {
            if !bounds.contains(coord) {
                return Err(PlannerError::OutOfBounds(coord));
            }
        }
        if model.is_obstacle(start) {
            return Err(PlannerError::StartBlocked(start));
        }
        if model.is_obstacle(goal) {
            return Err(PlannerError::GoalBlocked(goal));
        }

        let epsilon = config.epsilon;
        let mut planner = Self {
            model,
            config,
            start,
            goal,
            store: ConsistencyStore::new(bounds),
            frontier: Frontier::new(),
            closed: HashSet::new(),
            incons: HashSet::new(),
            epsilon,
            episode_in_progress: false,
            converged: false,
            episodes_completed: 0,
            total_expanded: 0,
        };
        planner.initialize();

        debug!(
            "[Marga] init: {}x{} grid, start={} goal={} eps={:.2} step={:.2}",
            bounds.width,
            bounds.height,
            start,
            goal,
            planner.epsilon,
            planner.config.epsilon_step
        );

        Ok(planner)
    }

    /// Seed the search: the start is consistent at zero and never queued,
    /// so its successors are updated directly.
    fn initialize(&mut self) {
        self.store.set_g(self.start, 0.0);
        self.store.set_rhs(self.start, 0.0);
        self.store.set_parent(self.start, None);
        for n in self.model.neighbors(self.start) {
            if !self.model.is_obstacle(n) {
                self.update_vertex(n);
            }
        }
    }

    /// Priority of a state under the current ε.
    #[inline]
    pub fn calculate_key(&self, coord: GridCoord) -> Key {
        Key::calculate(
            self.store.g(coord),
            self.store.rhs(coord),
            self.model.heuristic(coord),
            self.epsilon,
        )
    }

    /// Recompute `rhs` from predecessors and refresh frontier membership.
    ///
    /// Overconsistent states that were already expanded in the running
    /// episode go to INCONS instead of the frontier. Underconsistent states
    /// are always queued: their stale `g` must be reset within the episode.
    pub(super) fn update_vertex(&mut self, coord: GridCoord) {
        if coord != self.start {
            let (rhs, parent) = self.lookahead(coord);
            self.store.set_rhs(coord, rhs);
            self.store.set_parent(coord, parent);
        }

        self.frontier.remove(coord);
        if self.store.is_inconsistent(coord) {
            if self.closed.contains(&coord) && self.store.is_overconsistent(coord) {
                self.incons.insert(coord);
            } else {
                self.incons.remove(&coord);
                let key = self.calculate_key(coord);
                self.frontier.upsert(coord, key);
            }
        } else {
            self.incons.remove(&coord);
        }
    }

    /// Best `g[p] + c(p, coord)` over predecessors, with the argmin.
    pub(super) fn lookahead(&self, coord: GridCoord) -> (f32, Option<GridCoord>) {
        if self.model.is_obstacle(coord) {
            return (f32::INFINITY, None);
        }
        let mut best = f32::INFINITY;
        let mut parent = None;
        for p in self.model.predecessors(coord) {
            let cost = self.model.edge_cost(p, coord);
            if cost.is_infinite() {
                continue;
            }
            let value = self.store.g(p) + cost;
            if value < best {
                best = value;
                parent = Some(p);
            }
        }
        (best, parent)
    }

    /// Recompute every frontier key under the current ε.
    pub(super) fn rekey_frontier(&mut self) {
        let store = &self.store;
        let model = &self.model;
        let epsilon = self.epsilon;
        self.frontier.rekey(|s| {
            Key::calculate(store.g(s), store.rhs(s), model.heuristic(s), epsilon)
        });
    }

    /// Move every INCONS state back into the frontier and forget the
    /// closed set.
    pub(super) fn merge_incons(&mut self) {
        let deferred: Vec<GridCoord> = self.incons.drain().collect();
        self.closed.clear();
        let store = &self.store;
        let model = &self.model;
        let epsilon = self.epsilon;
        self.frontier.merge(
            deferred.into_iter().filter(|&s| store.is_inconsistent(s)),
            |s| Key::calculate(store.g(s), store.rhs(s), model.heuristic(s), epsilon),
        );
    }

    /// Drop an interrupted episode: deferred states rejoin the frontier and
    /// the next call to `run_episode` starts afresh at the current ε.
    pub(super) fn abandon_episode(&mut self) {
        if self.episode_in_progress {
            self.merge_incons();
            self.episode_in_progress = false;
            debug!("[Marga] interrupted episode abandoned");
        }
    }

    /// Restart the ε schedule from the configured initial value.
    ///
    /// An interrupted episode is abandoned first.
    pub fn reset_epsilon(&mut self) {
        self.abandon_episode();
        self.epsilon = self.config.epsilon;
        self.converged = false;
        self.rekey_frontier();
        debug!("[Marga] epsilon reset to {:.2}", self.epsilon);
    }

    /// Search values of one state.
    pub fn query_state(&self, coord: GridCoord) -> Result<StateInfo> {
        if !self.model.bounds().contains(coord) {
            return Err(PlannerError::OutOfBounds(coord));
        }
        Ok(StateInfo {
            g: self.store.g(coord),
            rhs: self.store.rhs(coord),
            key: self.calculate_key(coord),
            in_frontier: self.frontier.contains(coord),
            in_incons: self.incons.contains(&coord),
            is_obstacle: self.model.is_obstacle(coord),
        })
    }

    /// Current inflation factor (used by the next episode).
    pub fn epsilon(&self) -> f32 {
        self.epsilon
    }

    /// True once an episode proved its path optimal and nothing changed since.
    pub fn is_converged(&self) -> bool {
        self.converged
    }

    /// True if an episode was interrupted and will resume on the next call.
    pub fn is_episode_in_progress(&self) -> bool {
        self.episode_in_progress
    }

    /// Number of completed episodes.
    pub fn episodes_completed(&self) -> usize {
        self.episodes_completed
    }

    /// Expansions over the whole run, including eager repair.
    pub fn total_expanded(&self) -> usize {
        self.total_expanded
    }

    /// Number of queued states.
    pub fn frontier_len(&self) -> usize {
        self.frontier.len()
    }

    /// The frontier (read-only).
    pub fn frontier(&self) -> &Frontier {
        &self.frontier
    }

    /// The cost model (read-only; edits go through the planner).
    pub fn cost_model(&self) -> &M {
        &self.model
    }

    /// Planner configuration.
    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Start cell.
    pub fn start(&self) -> GridCoord {
        self.start
    }

    /// Goal cell.
    pub fn goal(&self) -> GridCoord {
        self.goal
    }

    /// Verify the consistency invariants over the whole grid.
    ///
    /// Diagnostic for tests; returns a description of the first violation.
    pub fn check_invariants(&self) -> std::result::Result<(), String> {
        if self.store.g(self.start) != 0.0 || self.store.rhs(self.start) != 0.0 {
            return Err(format!("start {} is not at g = rhs = 0", self.start));
        }
        if !self.episode_in_progress && (!self.incons.is_empty() || !self.closed.is_empty()) {
            return Err("closed/INCONS not empty between episodes".to_string());
        }

        for coord in self.model.bounds().iter() {
            if coord != self.start {
                let (rhs, _) = self.lookahead(coord);
                let stored = self.store.rhs(coord);
                if rhs != stored {
                    return Err(format!("rhs of {} is {} but lookahead gives {}", coord, stored, rhs));
                }
            }

            let inconsistent = self.store.is_inconsistent(coord);
            let queued = self.frontier.contains(coord);
            let deferred = self.incons.contains(&coord);
            if queued && deferred {
                return Err(format!("{} is both queued and deferred", coord));
            }
            if deferred && !self.store.is_overconsistent(coord) {
                return Err(format!("{} is deferred but not overconsistent", coord));
            }
            if inconsistent != (queued || deferred) {
                return Err(format!(
                    "{} inconsistent={} but queued={} deferred={}",
                    coord, inconsistent, queued, deferred
                ));
            }
            if let Some(key) = self.frontier.key_of(coord) {
                if key != self.calculate_key(coord) {
                    return Err(format!(
                        "{} queued with {} but its key is {}",
                        coord,
                        key,
                        self.calculate_key(coord)
                    ));
                }
            }
        }
        Ok(())
    }
}
