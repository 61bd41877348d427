//! Exhaustive permutation search for small clusters.

use itertools::Itertools;

use super::{depot_tour_length, Tour, TourSolver};
use crate::distance::DistanceMatrix;

/// Enumerates every visiting order and keeps the shortest.
///
/// Orders are generated lexicographically over the stops' cluster positions
/// and only a strictly shorter tour replaces the incumbent, so ties resolve
/// to the first order found. Cost is `n!`, so keep `n` small.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExactSolver;

impl TourSolver for ExactSolver {
    fn solve_tour(&self, matrix: &DistanceMatrix) -> Tour {
        let n = matrix.len().saturating_sub(1);
        if n == 0 {
            return Tour::empty();
        }

        let mut best_stops: Vec<usize> = (1..=n).collect();
        let mut best_distance = f64::INFINITY;

        for perm in (1..=n).permutations(n) {
            let distance = depot_tour_length(&perm, matrix);
            if distance < best_distance {
                best_distance = distance;
                best_stops = perm;
            }
        }

        Tour::from_stops(&best_stops, matrix)
    }
}
