//! Anytime incremental path planning.
//!
//! The planner fuses two ideas:
//! - **Anytime search**: episodes run with an inflated heuristic (ε > 1)
//!   and ε is lowered between episodes, so a bounded-suboptimal path is
//!   available early and improves until it is provably optimal.
//! - **Incremental repair**: every state keeps a cost-to-come `g` and a
//!   one-step lookahead `rhs`. Obstacle edits only invalidate the states
//!   whose lookahead changes, and later episodes repair from there instead
//!   of searching from scratch.
//!
//! # Example
//! ```rust
//! use marga::core::GridCoord;
//! use marga::pathfinding::{ClumpSize, Planner, PlannerConfig};
//!
//! let mut planner = Planner::new(
//!     PlannerConfig::for_grid(30, 30),
//!     GridCoord::new(2, 2),
//!     GridCoord::new(27, 27),
//! )
//! .unwrap();
//!
//! let first = planner.plan(None).pop().unwrap();
//! assert!(first.converged);
//!
//! planner
//!     .apply_clump_edit(GridCoord::new(15, 15), ClumpSize::Large, true)
//!     .unwrap();
//! let repaired = planner.plan(None);
//! assert!(repaired.last().unwrap().converged);
//! ```

mod consistency;
mod controller;
mod episode;
mod extract;
mod frontier;
mod key;
mod planner;
mod repair;

pub use consistency::ConsistencyStore;
pub use controller::{next_epsilon, suboptimality_bound};
pub use episode::{EpisodeResult, PathFailure};
pub use extract::{ExtractionStrategy, descend, path_cost, walk_parents};
pub use frontier::Frontier;
pub use key::Key;
pub use planner::{Planner, PlannerConfig, StateInfo};
pub use repair::{ClumpSize, EditReport, RepairMode, clump};
