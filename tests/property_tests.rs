//! Property tests for distances, clustering and tour solving.

use fleet_routes::cluster::ClusterAssigner;
use fleet_routes::distance::{haversine_km, DistanceMatrix};
use fleet_routes::problem::Point;
use fleet_routes::solver::{
    depot_tour_length, ExactSolver, HeuristicSolver, NearestNeighbor, TourSolver,
};
use itertools::Itertools;
use proptest::prelude::*;
use std::collections::HashSet;

fn coord() -> impl Strategy<Value = (f64, f64)> {
    (4.45f64..4.85, -74.25f64..-73.95)
}

fn matrix_with_depot(coords: &[(f64, f64)]) -> DistanceMatrix {
    let mut all = vec![(4.6097, -74.0817)];
    all.extend_from_slice(coords);
    DistanceMatrix::from_coords(&all)
}

proptest! {
    #[test]
    fn haversine_is_symmetric_and_non_negative(
        a in (-90.0f64..90.0, -180.0f64..180.0),
        b in (-90.0f64..90.0, -180.0f64..180.0),
    ) {
        let ab = haversine_km(a, b);
        let ba = haversine_km(b, a);
        prop_assert!(ab >= 0.0);
        prop_assert!((ab - ba).abs() < 1e-9);
        prop_assert_eq!(haversine_km(a, a), 0.0);
    }

    #[test]
    fn exact_tour_is_never_beaten(coords in prop::collection::vec(coord(), 1..=6)) {
        let matrix = matrix_with_depot(&coords);
        let n = coords.len();
        let tour = ExactSolver.solve_tour(&matrix);

        for perm in (1..=n).permutations(n) {
            prop_assert!(tour.distance <= depot_tour_length(&perm, &matrix) + 1e-9);
        }
    }

    #[test]
    fn two_opt_never_worsens_nearest_neighbor(coords in prop::collection::vec(coord(), 9..30)) {
        let matrix = matrix_with_depot(&coords);

        let construction = NearestNeighbor.solve_tour(&matrix);
        let improved = HeuristicSolver::new(1000).solve_tour(&matrix);

        prop_assert!(improved.distance <= construction.distance + 1e-9);

        let mut order = improved.order.clone();
        order.sort_unstable();
        prop_assert_eq!(order, (0..coords.len()).collect::<Vec<_>>());
    }

    #[test]
    fn clusters_partition_the_points(
        coords in prop::collection::vec(coord(), 1..60),
        k in 1usize..=6,
        seed in any::<u64>(),
    ) {
        let points: Vec<Point> = coords
            .iter()
            .enumerate()
            .map(|(i, &(lat, lng))| Point::new(format!("p{}", i), "", lat, lng))
            .collect();
        let depot = Point::depot("depot", "", 4.6097, -74.0817);
        let assigner = ClusterAssigner {
            seed,
            max_iterations: 50,
            restarts: 2,
            depot_pull: 0.2,
        };

        let clusters = assigner.assign_towards(&points, k, &depot);
        prop_assert_eq!(clusters.len(), k.min(points.len()));

        let mut seen = HashSet::new();
        for cluster in &clusters {
            prop_assert!(!cluster.is_empty());
            for id in cluster.ids() {
                prop_assert!(seen.insert(id.to_string()));
            }
        }
        prop_assert_eq!(seen.len(), points.len());
    }
}
