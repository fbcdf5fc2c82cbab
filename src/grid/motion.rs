//! Motion sets, heuristics and the diagonal corner rule.

use serde::{Deserialize, Serialize};

use crate::core::GridCoord;
use crate::error::{PlannerError, Result};

/// Grid connectivity used to build the default motion sets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Connectivity {
    /// Axis moves only.
    Four,
    /// Axis and diagonal moves.
    #[default]
    Eight,
}

/// Heuristic used to estimate cost-to-go.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum HeuristicKind {
    /// |dx| + |dy|. Admissible only without diagonal moves.
    Manhattan,
    /// Straight-line distance.
    #[default]
    Euclidean,
    /// Exact cost on an empty 8-connected grid.
    Octile,
}

impl HeuristicKind {
    /// Evaluate the heuristic between two cells.
    #[inline]
    pub fn evaluate(self, from: GridCoord, to: GridCoord) -> f32 {
        let dx = (from.x - to.x).abs() as f32;
        let dy = (from.y - to.y).abs() as f32;
        match self {
            HeuristicKind::Manhattan => dx + dy,
            HeuristicKind::Euclidean => dx.hypot(dy),
            HeuristicKind::Octile => {
                let min = dx.min(dy);
                let max = dx.max(dy);
                min * std::f32::consts::SQRT_2 + (max - min)
            }
        }
    }
}

/// When a unit diagonal move is considered to cut a blocked corner.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CornerRule {
    /// Blocked only if both orthogonal corner cells are obstacles.
    #[default]
    BothBlocked,
    /// Blocked if either orthogonal corner cell is an obstacle.
    AnyBlocked,
}

/// Set of relative moves available from every cell.
#[derive(Clone, Debug, PartialEq)]
pub struct MotionSet {
    offsets: Vec<GridCoord>,
}

impl MotionSet {
    /// The 4 axis moves (W, N, E, S).
    pub fn four() -> Self {
        Self {
            offsets: vec![
                GridCoord::new(-1, 0),
                GridCoord::new(0, 1),
                GridCoord::new(1, 0),
                GridCoord::new(0, -1),
            ],
        }
    }

    /// The 8 axis and diagonal moves.
    pub fn eight() -> Self {
        Self {
            offsets: vec![
                GridCoord::new(-1, 0),
                GridCoord::new(-1, 1),
                GridCoord::new(0, 1),
                GridCoord::new(1, 1),
                GridCoord::new(1, 0),
                GridCoord::new(1, -1),
                GridCoord::new(0, -1),
                GridCoord::new(-1, -1),
            ],
        }
    }

    /// Motion set for a connectivity.
    pub fn for_connectivity(connectivity: Connectivity) -> Self {
        match connectivity {
            Connectivity::Four => Self::four(),
            Connectivity::Eight => Self::eight(),
        }
    }

    /// Build a custom motion set.
    ///
    /// Fails on an empty set or a zero offset. Duplicate offsets are dropped.
    /// Moves are assumed symmetric: the planner looks up predecessors with
    /// the same offsets it uses for successors.
    pub fn custom(offsets: Vec<GridCoord>) -> Result<Self> {
        let mut unique: Vec<GridCoord> = Vec::with_capacity(offsets.len());
        for offset in offsets {
            if offset == GridCoord::default() {
                return Err(PlannerError::InvalidMotion(offset));
            }
            if !unique.contains(&offset) {
                unique.push(offset);
            }
        }
        let set = Self { offsets: unique };
        set.validate()?;
        Ok(set)
    }

    /// Check that the set is usable for planning.
    pub fn validate(&self) -> Result<()> {
        if self.offsets.is_empty() {
            return Err(PlannerError::EmptyMotionSet);
        }
        Ok(())
    }

    /// Relative moves in this set.
    #[inline]
    pub fn offsets(&self) -> &[GridCoord] {
        &self.offsets
    }

    /// True if any move changes both coordinates.
    pub fn has_diagonals(&self) -> bool {
        self.offsets.iter().any(GridCoord::is_diagonal)
    }

    /// Number of moves.
    #[inline]
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    /// True if there are no moves.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }
}

impl Default for MotionSet {
    fn default() -> Self {
        Self::eight()
    }
}
