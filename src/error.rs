//! Error types for Marga

use thiserror::Error;

use crate::config::ConfigLoadError;
use crate::core::GridCoord;
use crate::pathfinding::PathFailure;

/// Marga error type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlannerError {
    #[error("Epsilon must be at least 1.0, got {0}")]
    InvalidEpsilon(f32),

    #[error("Epsilon step must be positive and finite, got {0}")]
    InvalidEpsilonStep(f32),

    #[error("Motion set is empty")]
    EmptyMotionSet,

    #[error("Motion offset {0} does not move")]
    InvalidMotion(GridCoord),

    #[error("Grid bounds {width}x{height} are empty")]
    InvalidBounds { width: usize, height: usize },

    #[error("Coordinate {0} is outside the grid")]
    OutOfBounds(GridCoord),

    #[error("Start {0} is inside an obstacle")]
    StartBlocked(GridCoord),

    #[error("Goal {0} is inside an obstacle")]
    GoalBlocked(GridCoord),

    #[error("Edit targets cell {0} outside the grid")]
    InvalidEdit(GridCoord),

    #[error("Path not found: {0}")]
    PathNotFound(PathFailure),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigLoadError),
}

pub type Result<T> = std::result::Result<T, PlannerError>;
