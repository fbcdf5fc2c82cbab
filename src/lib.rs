//! # Marga: Anytime Incremental Grid Path Planning
//!
//! A path planner for 2D grids whose obstacles change while the agent is
//! still planning. It returns a usable path quickly, improves it toward
//! optimal with each further episode, and repairs its search state locally
//! when obstacles appear or disappear.
//!
//! ## Features
//!
//! - **Anytime**: the first episode runs with an inflated heuristic (ε > 1);
//!   every reported cost is within a proven factor of optimal, and ε is
//!   lowered between episodes until the path is optimal
//! - **Incremental**: obstacle edits invalidate only the states whose
//!   one-step lookahead changes; the next episode repairs from there
//! - **Cancellable**: episodes poll a cancellation flag and an optional
//!   expansion budget, and resume where they stopped
//! - **Pluggable world**: the planner only sees a [`grid::CostModel`]
//!
//! ## Quick Start
//!
//! ```rust
//! use marga::core::GridCoord;
//! use marga::pathfinding::{ClumpSize, Planner, PlannerConfig};
//!
//! let config = PlannerConfig::for_grid(40, 40).with_epsilon(2.5, 0.4);
//! let mut planner = Planner::new(config, GridCoord::new(2, 2), GridCoord::new(37, 30)).unwrap();
//!
//! // Quick first answer, bounded suboptimal
//! let first = planner.run_episode(None);
//! assert!(first.success());
//! assert!(first.cost <= first.goal_estimate + 1e-3);
//!
//! // Keep improving until optimal
//! let episodes = planner.plan(None);
//! assert!(episodes.last().unwrap().converged);
//!
//! // The world changes; repair and replan
//! planner.toggle_clump(GridCoord::new(20, 16), ClumpSize::Large).unwrap();
//! let last = planner.plan(None).pop().unwrap();
//! assert!(last.converged);
//! println!("cost {:.2} over {} cells", last.cost, last.path.len());
//! ```
//!
//! ## Architecture
//!
//! - [`core`]: Grid coordinates and bounds
//! - [`grid`]: Obstacles, motion sets, heuristics and the cost model
//! - [`pathfinding`]: The planner, its frontier, repair and path extraction
//! - [`config`]: YAML configuration
//! - [`error`]: Error types
//!
//! ## Episode Loop
//!
//! ```text
//!   ┌──────────────┐   edits    ┌──────────────────┐
//!   │  Obstacle    │──────────▶│  update_vertex   │
//!   │  toggles     │            │  (cell + ring)   │
//!   └──────────────┘            └────────┬─────────┘
//!                                        │ inconsistent states
//!                                        ▼
//!   ┌──────────────┐  lower ε   ┌──────────────────┐
//!   │  Controller  │◀──────────│  Episode at ε    │
//!   │  (bound)     │──────────▶│  (expand by key) │
//!   └──────┬───────┘   rekey    └──────────────────┘
//!          │
//!          ▼
//!     path + cost + bound
//! ```

pub mod config;
pub mod core;
pub mod error;
pub mod grid;
pub mod pathfinding;

// Re-export commonly used types
pub use config::{ConfigLoadError, MargaConfig};
pub use self::core::{GridBounds, GridCoord};
pub use error::{PlannerError, Result};
pub use grid::{CostModel, GridCostModel, MotionSet, ObstacleSet};
pub use pathfinding::{
    ClumpSize, EditReport, EpisodeResult, PathFailure, Planner, PlannerConfig, RepairMode,
};
