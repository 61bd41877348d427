//! Benchmarks for clustering, tour solving and the full pipeline.

#[cfg(feature = "bench")]
extern crate criterion;

#[cfg(feature = "bench")]
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use fleet_routes::cluster::{Cluster, ClusterAssigner};
use fleet_routes::config::Config;
use fleet_routes::problem::Point;
use fleet_routes::solver::RouteSolver;
use fleet_routes::RoutePlanner;

/// Create a grid of delivery points around a central depot.
fn create_benchmark_points(size: usize) -> Vec<Point> {
    let grid_size = (size as f64).sqrt().ceil() as usize;
    (0..size)
        .map(|i| {
            let row = i / grid_size;
            let col = i % grid_size;
            Point::new(
                format!("p{}", i),
                "",
                4.55 + row as f64 * 0.01,
                -74.15 + col as f64 * 0.01,
            )
        })
        .collect()
}

fn benchmark_depot() -> Point {
    Point::depot("depot", "Depot", 4.62, -74.08)
}

#[cfg(feature = "bench")]
fn benchmark_clustering(c: &mut Criterion) {
    let mut group = c.benchmark_group("clustering");

    for size in [50, 200, 1000].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            let points = create_benchmark_points(size);
            let depot = benchmark_depot();
            let assigner = ClusterAssigner::from_config(&Config::default());

            b.iter(|| assigner.assign_towards(&points, 4, &depot));
        });
    }

    group.finish();
}

#[cfg(feature = "bench")]
fn benchmark_tour_solving(c: &mut Criterion) {
    let mut group = c.benchmark_group("tour_solving");
    let solver = RouteSolver::from_config(&Config::default());
    let depot = benchmark_depot();

    // 8 stops exercises the exact branch, the rest the heuristic one
    for size in [8, 50, 150].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            let cluster = Cluster {
                id: 0,
                points: create_benchmark_points(size),
                centroid: (4.6, -74.1),
            };

            b.iter(|| solver.solve(&cluster, &depot));
        });
    }

    group.finish();
}

#[cfg(feature = "bench")]
fn benchmark_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline");

    for size in [60, 300].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            let points = create_benchmark_points(size);
            let depot = benchmark_depot();
            let planner = RoutePlanner::new(Config::default());

            b.iter(|| planner.plan(&points, &depot, 5));
        });
    }

    group.finish();
}

#[cfg(feature = "bench")]
criterion_group!(
    benches,
    benchmark_clustering,
    benchmark_tour_solving,
    benchmark_pipeline
);

#[cfg(feature = "bench")]
criterion_main!(benches);
