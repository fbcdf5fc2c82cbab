//! Grid world: obstacles, motion sets and the cost model.
//!
//! ```rust
//! use marga::core::{GridBounds, GridCoord};
//! use marga::grid::{CostModel, GridCostModel, HeuristicKind, MotionSet};
//!
//! let mut model = GridCostModel::new(
//!     GridBounds::new(10, 10),
//!     MotionSet::eight(),
//!     HeuristicKind::Euclidean,
//!     GridCoord::new(8, 8),
//! );
//! model.set_obstacle(GridCoord::new(4, 4), true);
//! assert!(model.edge_cost(GridCoord::new(3, 3), GridCoord::new(4, 4)).is_infinite());
//! ```

mod cost_model;
mod motion;
mod obstacles;

pub use cost_model::{CostModel, GridCostModel};
pub use motion::{Connectivity, CornerRule, HeuristicKind, MotionSet};
pub use obstacles::ObstacleSet;
