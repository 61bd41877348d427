//! Nearest-neighbour tour construction.

use super::{Tour, TourSolver, DEPOT};
use crate::distance::DistanceMatrix;

/// Greedy construction from the depot: always move to the closest unvisited
/// stop. Equidistant candidates resolve to the lowest index.
#[derive(Debug, Clone, Copy, Default)]
pub struct NearestNeighbor;

impl NearestNeighbor {
    /// Build a visiting order as matrix indices (depot excluded).
    pub fn construct(&self, matrix: &DistanceMatrix) -> Vec<usize> {
        let n = matrix.len();
        if n <= 1 {
            return Vec::new();
        }

        let mut visited = vec![false; n];
        visited[DEPOT] = true;
        let mut stops = Vec::with_capacity(n - 1);
        let mut current = DEPOT;

        while stops.len() < n - 1 {
            let mut nearest = None;
            let mut nearest_dist = f64::INFINITY;

            for candidate in 1..n {
                if visited[candidate] {
                    continue;
                }
                let dist = matrix.get(current, candidate);
                // Strict comparison keeps the lowest index on ties
                if nearest.is_none() || dist < nearest_dist {
                    nearest = Some(candidate);
                    nearest_dist = dist;
                }
            }

            match nearest {
                Some(next) => {
                    visited[next] = true;
                    stops.push(next);
                    current = next;
                }
                None => break,
            }
        }

        stops
    }
}

impl TourSolver for NearestNeighbor {
    fn solve_tour(&self, matrix: &DistanceMatrix) -> Tour {
        Tour::from_stops(&self.construct(matrix), matrix)
    }
}
