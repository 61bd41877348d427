//! Unit tests for the geographic cluster assigner.

use fleet_routes::cluster::{Cluster, ClusterAssigner};
use fleet_routes::config::Config;
use fleet_routes::problem::Point;
use std::collections::HashSet;

/// Creates three well-separated groups of five points each.
fn create_blob_points() -> Vec<Point> {
    let centres = [(4.50, -74.20), (4.80, -74.20), (4.65, -74.01)];
    let mut points = Vec::new();

    for (b, &(lat, lng)) in centres.iter().enumerate() {
        for i in 0..5 {
            let offset = 0.002 * i as f64;
            points.push(Point::new(format!("b{}-{}", b, i), "", lat + offset, lng - offset));
        }
    }

    points
}

/// Creates a deterministic scatter of points across the city.
fn create_scatter_points(count: usize) -> Vec<Point> {
    (0..count)
        .map(|i| {
            let lat = 4.50 + ((i * 37) % 29) as f64 * 0.01;
            let lng = -74.20 + ((i * 53) % 19) as f64 * 0.01;
            Point::new(format!("p{}", i), "", lat, lng)
        })
        .collect()
}

fn assert_partition(points: &[Point], clusters: &[Cluster]) {
    let mut seen = HashSet::new();
    for cluster in clusters {
        assert!(!cluster.is_empty(), "cluster {} is empty", cluster.id);
        for id in cluster.ids() {
            assert!(seen.insert(id.to_string()), "point {} assigned twice", id);
        }
    }

    let expected: HashSet<String> = points
        .iter()
        .filter(|p| !p.is_depot)
        .map(|p| p.id.clone())
        .collect();
    assert_eq!(seen, expected);
}

#[test]
fn test_separated_groups_are_recovered() {
    let points = create_blob_points();
    let assigner = ClusterAssigner::from_config(&Config::default());

    let clusters = assigner.assign(&points, 3);
    assert_eq!(clusters.len(), 3);
    assert_partition(&points, &clusters);

    for cluster in &clusters {
        // Every member of a cluster shares the blob prefix
        let prefixes: HashSet<&str> = cluster.ids().map(|id| &id[..2]).collect();
        assert_eq!(prefixes.len(), 1, "mixed cluster: {:?}", prefixes);
        assert_eq!(cluster.len(), 5);
    }
}

#[test]
fn test_clusters_are_numbered_by_first_member() {
    let points = create_blob_points();
    let clusters = ClusterAssigner::default().assign(&points, 3);

    for (idx, cluster) in clusters.iter().enumerate() {
        assert_eq!(cluster.id, idx);
    }
    assert_eq!(clusters[0].points[0].id, "b0-0");
    assert_eq!(clusters[1].points[0].id, "b1-0");
    assert_eq!(clusters[2].points[0].id, "b2-0");
}

#[test]
fn test_partition_is_exhaustive_and_disjoint() {
    let points = create_scatter_points(40);
    let depot = Point::depot("depot", "", 4.62, -74.10);
    let assigner = ClusterAssigner::default();

    for k in 1..=6 {
        let clusters = assigner.assign_towards(&points, k, &depot);
        assert_eq!(clusters.len(), k);
        assert_partition(&points, &clusters);
    }
}

#[test]
fn test_centroid_is_member_mean() {
    let points = create_blob_points();
    let clusters = ClusterAssigner::default().assign(&points, 3);

    for cluster in &clusters {
        let n = cluster.len() as f64;
        let lat = cluster.points.iter().map(|p| p.latitude).sum::<f64>() / n;
        let lng = cluster.points.iter().map(|p| p.longitude).sum::<f64>() / n;
        assert!((cluster.centroid.0 - lat).abs() < 1e-12);
        assert!((cluster.centroid.1 - lng).abs() < 1e-12);
    }
}

#[test]
fn test_fewer_points_than_clusters() {
    let points = create_scatter_points(2);
    let clusters = ClusterAssigner::default().assign(&points, 4);

    assert_eq!(clusters.len(), 2);
    assert_eq!(clusters[0].points, vec![points[0].clone()]);
    assert_eq!(clusters[1].points, vec![points[1].clone()]);
}

#[test]
fn test_empty_input() {
    let clusters = ClusterAssigner::default().assign(&[], 3);
    assert!(clusters.is_empty());
}

#[test]
fn test_depot_points_are_excluded() {
    let mut points = create_scatter_points(10);
    points.push(Point::depot("depot", "", 4.62, -74.10));

    let clusters = ClusterAssigner::default().assign(&points, 3);
    assert_partition(&points, &clusters);
    assert!(clusters.iter().all(|c| c.ids().all(|id| id != "depot")));
}

#[test]
fn test_identical_coordinates_still_fill_every_cluster() {
    let points: Vec<Point> = (0..6)
        .map(|i| Point::new(format!("same{}", i), "", 4.6, -74.1))
        .collect();

    let clusters = ClusterAssigner::default().assign(&points, 3);
    assert_eq!(clusters.len(), 3);
    assert_partition(&points, &clusters);
}

#[test]
fn test_same_seed_same_partition() {
    let points = create_scatter_points(50);
    let depot = Point::depot("depot", "", 4.62, -74.10);
    let assigner = ClusterAssigner::from_config(&Config::new().with_cluster_seed(11));

    let first = assigner.assign_towards(&points, 5, &depot);
    let second = assigner.assign_towards(&points, 5, &depot);
    assert_eq!(first, second);
}

#[test]
fn test_iteration_cap_still_partitions() {
    let points = create_scatter_points(60);
    let assigner = ClusterAssigner::from_config(
        &Config::new()
            .with_kmeans_max_iterations(1)
            .with_kmeans_restarts(1),
    );

    let clusters = assigner.assign(&points, 4);
    assert_eq!(clusters.len(), 4);
    assert_partition(&points, &clusters);
}

#[test]
fn test_depot_pull_keeps_true_coordinates() {
    let points = create_blob_points();
    let depot = Point::depot("depot", "", 4.65, -74.10);
    let assigner = ClusterAssigner::from_config(&Config::new().with_depot_pull(0.9));

    let clusters = assigner.assign_towards(&points, 3, &depot);
    for cluster in &clusters {
        for point in &cluster.points {
            let original = points.iter().find(|p| p.id == point.id).unwrap();
            assert_eq!(point, original);
        }
    }
}
