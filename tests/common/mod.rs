//! Shared helpers for integration tests.
//!
//! - Seeded random obstacle layouts built from square clumps
//! - A plain Dijkstra over the same cost model, used as the optimal reference
//! - Search-state snapshots for before/after comparisons
//! - A churn driver that toggles random clumps like a changing environment

#![allow(dead_code)]

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use marga::core::{GridBounds, GridCoord};
use marga::grid::{CostModel, ObstacleSet};
use marga::pathfinding::{ClumpSize, EditReport, Planner, clump};

/// Route test logs through env_logger (RUST_LOG=debug to see planner output).
pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn c(x: i32, y: i32) -> GridCoord {
    GridCoord::new(x, y)
}

/// Random clumps until `coverage` of the grid is blocked.
///
/// Cells for which `keep` returns true are never blocked.
pub fn random_obstacles<F>(
    bounds: GridBounds,
    coverage: f32,
    size: ClumpSize,
    seed: u64,
    keep: F,
) -> ObstacleSet
where
    F: Fn(GridCoord) -> bool,
{
    let mut rng = StdRng::seed_from_u64(seed);
    let mut obstacles = ObstacleSet::new(bounds);
    let target = (coverage * bounds.cell_count() as f32) as usize;

    let mut attempts = 0;
    while obstacles.len() < target && attempts < 10_000 {
        attempts += 1;
        let center = random_cell(&mut rng, bounds);
        for cell in clump(center, size, bounds) {
            if !keep(cell) {
                obstacles.insert(cell);
            }
        }
    }
    obstacles
}

/// Keeps the bottom row and the right column free, which guarantees a
/// route from the bottom-left to the top-right corner.
pub fn corridor_keep(bounds: GridBounds) -> impl Fn(GridCoord) -> bool {
    let right = bounds.width as i32 - 1;
    move |cell: GridCoord| cell.y == 0 || cell.x == right
}

fn random_cell(rng: &mut StdRng, bounds: GridBounds) -> GridCoord {
    GridCoord::new(
        rng.random_range(0..bounds.width as i32),
        rng.random_range(0..bounds.height as i32),
    )
}

#[derive(Clone, Copy)]
struct QueueEntry {
    cost: f32,
    coord: GridCoord,
}

impl PartialEq for QueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cost == other.cost && self.coord == other.coord
    }
}

impl Eq for QueueEntry {}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for min-heap behavior
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.coord.cmp(&self.coord))
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Optimal start-to-goal cost (∞ if unreachable).
pub fn dijkstra<M: CostModel>(model: &M, start: GridCoord, goal: GridCoord) -> f32 {
    model
        .bounds()
        .index(goal)
        .map_or(f32::INFINITY, |gi| distances(model, start)[gi])
}

/// Optimal cost from `start` to every cell, indexed like `GridBounds::index`.
pub fn distances<M: CostModel>(model: &M, start: GridCoord) -> Vec<f32> {
    let bounds = model.bounds();
    let mut dist = vec![f32::INFINITY; bounds.cell_count()];
    let mut heap = BinaryHeap::new();

    let Some(si) = bounds.index(start) else {
        return dist;
    };
    dist[si] = 0.0;
    heap.push(QueueEntry {
        cost: 0.0,
        coord: start,
    });

    while let Some(QueueEntry { cost, coord }) = heap.pop() {
        let Some(i) = bounds.index(coord) else {
            continue;
        };
        if cost > dist[i] {
            continue;
        }
        for n in model.neighbors(coord) {
            let step = model.edge_cost(coord, n);
            if step.is_infinite() {
                continue;
            }
            let Some(ni) = bounds.index(n) else {
                continue;
            };
            let next = cost + step;
            if next < dist[ni] {
                dist[ni] = next;
                heap.push(QueueEntry {
                    cost: next,
                    coord: n,
                });
            }
        }
    }
    dist
}

/// `(coord, g, rhs, in_frontier)` for every cell, in row-major order.
pub fn snapshot<M: CostModel>(planner: &Planner<M>) -> Vec<(GridCoord, f32, f32, bool)> {
    planner
        .cost_model()
        .bounds()
        .iter()
        .filter_map(|coord| {
            planner
                .query_state(coord)
                .ok()
                .map(|s| (coord, s.g, s.rhs, s.in_frontier))
        })
        .collect()
}

/// Frontier contents sorted by coordinate.
pub fn frontier_contents<M: CostModel>(
    planner: &Planner<M>,
) -> Vec<(GridCoord, marga::pathfinding::Key)> {
    let frontier = planner.frontier();
    let mut entries: Vec<_> = frontier
        .states()
        .filter_map(|s| frontier.key_of(s).map(|k| (s, k)))
        .collect();
    entries.sort_by_key(|(s, _)| *s);
    entries
}

/// Random obstacle churn.
///
/// Each step toggles one random clump with probability `toggle_prob`, then
/// adds clumps while coverage is below `min_coverage`.
pub struct Churn {
    rng: StdRng,
    pub toggle_prob: f64,
    pub min_coverage: f32,
    pub size: ClumpSize,
}

impl Churn {
    pub fn new(seed: u64, toggle_prob: f64, min_coverage: f32, size: ClumpSize) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            toggle_prob,
            min_coverage,
            size,
        }
    }

    pub fn step<M: CostModel>(&mut self, planner: &mut Planner<M>) -> Vec<EditReport> {
        let bounds = planner.cost_model().bounds();
        let mut reports = Vec::new();

        if self.rng.random::<f64>() < self.toggle_prob {
            let center = random_cell(&mut self.rng, bounds);
            if let Ok(report) = planner.toggle_clump(center, self.size) {
                reports.push(report);
            }
        }

        let mut attempts = 0;
        while coverage(planner) < self.min_coverage && attempts < 100 {
            attempts += 1;
            let center = random_cell(&mut self.rng, bounds);
            if let Ok(report) = planner.apply_clump_edit(center, self.size, true) {
                reports.push(report);
            }
        }
        reports
    }
}

fn coverage<M: CostModel>(planner: &Planner<M>) -> f32 {
    let bounds = planner.cost_model().bounds();
    let blocked = bounds
        .iter()
        .filter(|&cell| planner.cost_model().is_obstacle(cell))
        .count();
    blocked as f32 / bounds.cell_count() as f32
}
