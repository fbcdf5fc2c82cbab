//! Benchmark planning and repair performance.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use marga::core::{GridBounds, GridCoord};
use marga::grid::ObstacleSet;
use marga::pathfinding::{ClumpSize, Planner, PlannerConfig, RepairMode, clump};

/// Random medium clumps, keeping the bottom row and right column free.
fn obstacles(size: usize, coverage: f32, seed: u64) -> ObstacleSet {
    let bounds = GridBounds::new(size, size);
    let mut rng = StdRng::seed_from_u64(seed);
    let mut set = ObstacleSet::new(bounds);
    let last = size as i32 - 1;

    while set.coverage() < coverage {
        let center = GridCoord::new(rng.random_range(0..=last), rng.random_range(0..=last));
        for cell in clump(center, ClumpSize::Medium, bounds) {
            if cell.y != 0 && cell.x != last {
                set.insert(cell);
            }
        }
    }
    set
}

fn planner(size: usize, config: PlannerConfig) -> Planner {
    let last = size as i32 - 1;
    Planner::with_obstacles(
        config,
        obstacles(size, 0.2, 7),
        GridCoord::new(0, 0),
        GridCoord::new(last, last),
    )
    .unwrap()
}

fn bench_first_episode(c: &mut Criterion) {
    let mut group = c.benchmark_group("first_episode");

    for size in [50, 100, 200] {
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            b.iter_with_setup(
                || planner(size, PlannerConfig::for_grid(size, size)),
                |mut p| black_box(p.run_episode(None)),
            )
        });
    }

    group.finish();
}

fn bench_plan_to_convergence(c: &mut Criterion) {
    let mut group = c.benchmark_group("plan_to_convergence");

    for epsilon in [1.0f32, 2.5, 5.0] {
        group.bench_with_input(
            BenchmarkId::from_parameter(epsilon),
            &epsilon,
            |b, &epsilon| {
                let config = PlannerConfig::for_grid(100, 100).with_epsilon(epsilon, 0.5);
                b.iter_with_setup(|| planner(100, config.clone()), |mut p| black_box(p.plan(None)))
            },
        );
    }

    group.finish();
}

fn bench_repair_vs_scratch(c: &mut Criterion) {
    let mut group = c.benchmark_group("replan_after_toggle");
    let size = 100;
    let center = GridCoord::new(50, 50);

    for (name, mode) in [("lazy", RepairMode::Lazy), ("eager", RepairMode::Eager)] {
        let config = PlannerConfig::for_grid(size, size).with_repair_mode(mode);
        let mut base = planner(size, config);
        base.plan(None);

        group.bench_function(name, |b| {
            b.iter(|| {
                base.toggle_clump(center, ClumpSize::Large).unwrap();
                black_box(base.plan(None))
            })
        });
    }

    group.bench_function("scratch", |b| {
        let mut blocked = false;
        b.iter(|| {
            let mut set = obstacles(size, 0.2, 7);
            blocked = !blocked;
            for cell in clump(center, ClumpSize::Large, set.bounds()) {
                set.set(cell, blocked);
            }
            let mut p = Planner::with_obstacles(
                PlannerConfig::for_grid(size, size),
                set,
                GridCoord::new(0, 0),
                GridCoord::new(size as i32 - 1, size as i32 - 1),
            )
            .unwrap();
            black_box(p.plan(None))
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_first_episode,
    bench_plan_to_convergence,
    bench_repair_vs_scratch
);
criterion_main!(benches);
