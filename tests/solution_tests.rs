//! Unit tests for routes, solutions and reporting.

use fleet_routes::metrics::{MetricsModel, RouteMetrics};
use fleet_routes::problem::Point;
use fleet_routes::solution::{Route, Solution};
use fleet_routes::utils::{format_minutes, save_solution, write_report};
use std::fs;

fn create_test_depot() -> Point {
    Point::depot("depot", "Depot", 4.60, -74.08)
}

/// Creates a small solution with one loaded route and one idle truck.
fn create_test_solution() -> Solution {
    let depot = create_test_depot();
    let model = MetricsModel::default();

    let mut busy = Route::new(
        0,
        vec![
            depot.clone(),
            Point::new("a", "Chapinero", 4.65, -74.06),
            Point::new("b", "", 4.70, -74.03),
            depot.clone(),
        ],
    );
    busy.evaluate(&model);

    let mut idle = Route::new(1, vec![depot]);
    idle.evaluate(&model);

    Solution::new(vec![busy, idle])
}

#[test]
fn test_route_accessors() {
    let solution = create_test_solution();
    let busy = &solution.routes[0];
    let idle = &solution.routes[1];

    assert_eq!(busy.stop_ids(), vec!["a", "b"]);
    assert_eq!(busy.deliveries().count(), 2);
    assert!(!busy.is_empty());

    assert!(idle.stop_ids().is_empty());
    assert!(idle.is_empty());
    assert_eq!(idle.metrics, RouteMetrics::default());
}

#[test]
fn test_solution_totals() {
    let solution = create_test_solution();

    assert_eq!(solution.get_route_count(), 2);
    assert_eq!(solution.get_stop_count(), 2);
    assert_eq!(
        solution.total_distance_km,
        solution.routes[0].metrics.total_distance_km
    );
    assert_eq!(
        solution.total_time_minutes,
        solution.routes[0].metrics.estimated_time_minutes
    );

    let routes = solution.clone().into_routes();
    assert_eq!(routes, solution.routes);
}

#[test]
fn test_solution_serializes() {
    let solution = create_test_solution();
    let json = serde_json::to_string(&solution).unwrap();
    let parsed: Solution = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed.get_route_count(), 2);
    assert_eq!(parsed.routes[0].stop_ids(), vec!["a", "b"]);
    assert!((parsed.total_distance_km - solution.total_distance_km).abs() < 1e-9);
    assert!(json.contains("\"is_depot\":true"));
}

#[test]
fn test_format_minutes() {
    assert_eq!(format_minutes(0.0), "0h 00m");
    assert_eq!(format_minutes(59.6), "1h 00m");
    assert_eq!(format_minutes(125.0), "2h 05m");
    assert_eq!(format_minutes(-3.0), "0h 00m");
}

#[test]
fn test_write_report() {
    let solution = create_test_solution();
    let mut out = Vec::new();
    write_report(&solution, &mut out).unwrap();
    let report = String::from_utf8(out).unwrap();

    assert!(report.starts_with("Route plan"));
    assert!(report.contains("Number of Routes: 2"));
    // Unnamed stops fall back to their id
    assert!(report.contains("Route #1: Depot -> Chapinero -> b -> Depot"));
    assert!(report.contains("Route #2: Empty"));
    assert!(report.contains("Stops: 2"));
}

#[test]
fn test_save_solution() {
    let solution = create_test_solution();
    let path = std::env::temp_dir().join(format!("fleet-routes-report-{}.txt", std::process::id()));

    save_solution(&solution, &path).unwrap();
    let content = fs::read_to_string(&path).unwrap();
    assert!(content.contains("Total Distance"));

    fs::remove_file(&path).unwrap();
}
