//! Cost model consumed by the planner.
//!
//! The planner never looks at obstacles directly: everything it needs about
//! the world goes through [`CostModel`]. [`GridCostModel`] is the standard
//! implementation over an [`ObstacleSet`].

use crate::core::{GridBounds, GridCoord};

use super::motion::{CornerRule, HeuristicKind, MotionSet};
use super::obstacles::ObstacleSet;

/// World interface for the planner.
///
/// Edge costs must be non-negative and [`f32::INFINITY`] for blocked moves.
/// For the suboptimality bound to hold, the heuristic must be admissible
/// and consistent with respect to the edge costs.
pub trait CostModel {
    /// Grid extent.
    fn bounds(&self) -> GridBounds;

    /// True if the cell is blocked.
    fn is_obstacle(&self, coord: GridCoord) -> bool;

    /// Change the obstacle membership of a cell. Returns true if it changed.
    fn set_obstacle(&mut self, coord: GridCoord, blocked: bool) -> bool;

    /// Cells reachable from `coord` in one move, clipped to the grid.
    fn neighbors(&self, coord: GridCoord) -> Vec<GridCoord>;

    /// Cells that can reach `coord` in one move, clipped to the grid.
    fn predecessors(&self, coord: GridCoord) -> Vec<GridCoord> {
        self.neighbors(coord)
    }

    /// Cost of moving from `from` to `to`.
    fn edge_cost(&self, from: GridCoord, to: GridCoord) -> f32;

    /// Estimated cost from `coord` to the goal.
    fn heuristic(&self, coord: GridCoord) -> f32;
}

/// Cost model over an obstacle bitmap with Euclidean move costs.
#[derive(Clone, Debug)]
pub struct GridCostModel {
    obstacles: ObstacleSet,
    motions: MotionSet,
    heuristic: HeuristicKind,
    corner_rule: CornerRule,
    goal: GridCoord,
}

impl GridCostModel {
    /// Create a cost model for an empty grid.
    pub fn new(
        bounds: GridBounds,
        motions: MotionSet,
        heuristic: HeuristicKind,
        goal: GridCoord,
    ) -> Self {
        Self::with_obstacles(ObstacleSet::new(bounds), motions, heuristic, goal)
    }

    /// Create a cost model over an existing obstacle set.
    pub fn with_obstacles(
        obstacles: ObstacleSet,
        motions: MotionSet,
        heuristic: HeuristicKind,
        goal: GridCoord,
    ) -> Self {
        Self {
            obstacles,
            motions,
            heuristic,
            corner_rule: CornerRule::default(),
            goal,
        }
    }

    /// Use a different corner-cutting rule for diagonal moves.
    pub fn with_corner_rule(mut self, rule: CornerRule) -> Self {
        self.corner_rule = rule;
        self
    }

    /// Obstacle set backing this model.
    pub fn obstacles(&self) -> &ObstacleSet {
        &self.obstacles
    }

    /// True if a unit diagonal move from `from` by `step` cuts a blocked corner.
    fn cuts_corner(&self, from: GridCoord, step: GridCoord) -> bool {
        let side_a = self.obstacles.contains(GridCoord::new(from.x + step.x, from.y));
        let side_b = self.obstacles.contains(GridCoord::new(from.x, from.y + step.y));
        match self.corner_rule {
            CornerRule::BothBlocked => side_a && side_b,
            CornerRule::AnyBlocked => side_a || side_b,
        }
    }
}

impl CostModel for GridCostModel {
    fn bounds(&self) -> GridBounds {
        self.obstacles.bounds()
    }

    fn is_obstacle(&self, coord: GridCoord) -> bool {
        self.obstacles.contains(coord)
    }

    fn set_obstacle(&mut self, coord: GridCoord, blocked: bool) -> bool {
        self.obstacles.set(coord, blocked)
    }

    fn neighbors(&self, coord: GridCoord) -> Vec<GridCoord> {
        let bounds = self.bounds();
        self.motions
            .offsets()
            .iter()
            .map(|&m| coord + m)
            .filter(|&n| bounds.contains(n))
            .collect()
    }

    fn predecessors(&self, coord: GridCoord) -> Vec<GridCoord> {
        let bounds = self.bounds();
        self.motions
            .offsets()
            .iter()
            .map(|&m| coord - m)
            .filter(|&n| bounds.contains(n))
            .collect()
    }

    fn edge_cost(&self, from: GridCoord, to: GridCoord) -> f32 {
        let bounds = self.bounds();
        if !bounds.contains(from) || !bounds.contains(to) {
            return f32::INFINITY;
        }
        if self.obstacles.contains(from) || self.obstacles.contains(to) {
            return f32::INFINITY;
        }

        let step = to - from;
        if step.x.abs() == 1 && step.y.abs() == 1 && self.cuts_corner(from, step) {
            return f32::INFINITY;
        }

        from.euclidean_distance(&to)
    }

    fn heuristic(&self, coord: GridCoord) -> f32 {
        self.heuristic.evaluate(coord, self.goal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model(connectivity_eight: bool) -> GridCostModel {
        let motions = if connectivity_eight {
            MotionSet::eight()
        } else {
            MotionSet::four()
        };
        GridCostModel::new(
            GridBounds::new(5, 5),
            motions,
            HeuristicKind::Euclidean,
            GridCoord::new(4, 4),
        )
    }

    #[test]
    fn test_neighbors_clipped() {
        let m = model(true);
        assert_eq!(m.neighbors(GridCoord::new(0, 0)).len(), 3);
        assert_eq!(m.neighbors(GridCoord::new(2, 2)).len(), 8);
        assert_eq!(model(false).neighbors(GridCoord::new(0, 2)).len(), 3);
    }

    #[test]
    fn test_edge_costs() {
        let m = model(true);
        let a = GridCoord::new(1, 1);
        assert_eq!(m.edge_cost(a, GridCoord::new(2, 1)), 1.0);
        let diag = m.edge_cost(a, GridCoord::new(2, 2));
        assert!((diag - std::f32::consts::SQRT_2).abs() < 1e-6);
        assert_eq!(m.edge_cost(a, GridCoord::new(-1, 1)), f32::INFINITY);
    }

    #[test]
    fn test_obstacle_blocks_edges() {
        let mut m = model(true);
        let a = GridCoord::new(1, 1);
        let b = GridCoord::new(2, 1);
        assert!(m.set_obstacle(b, true));
        assert_eq!(m.edge_cost(a, b), f32::INFINITY);
        assert_eq!(m.edge_cost(b, a), f32::INFINITY);
    }

    #[test]
    fn test_corner_rule() {
        let mut m = model(true);
        let a = GridCoord::new(1, 1);
        let d = GridCoord::new(2, 2);

        m.set_obstacle(GridCoord::new(2, 1), true);
        assert!(m.edge_cost(a, d).is_finite());

        m.set_obstacle(GridCoord::new(1, 2), true);
        assert_eq!(m.edge_cost(a, d), f32::INFINITY);

        let mut strict = model(true).with_corner_rule(CornerRule::AnyBlocked);
        strict.set_obstacle(GridCoord::new(2, 1), true);
        assert_eq!(strict.edge_cost(a, d), f32::INFINITY);
    }

    #[test]
    fn test_predecessors_for_asymmetric_moves() {
        let motions = MotionSet::custom(vec![GridCoord::new(1, 0)]).unwrap();
        let m = GridCostModel::new(
            GridBounds::new(5, 5),
            motions,
            HeuristicKind::Manhattan,
            GridCoord::new(4, 0),
        );
        assert_eq!(m.neighbors(GridCoord::new(2, 0)), vec![GridCoord::new(3, 0)]);
        assert_eq!(m.predecessors(GridCoord::new(2, 0)), vec![GridCoord::new(1, 0)]);
    }
}
