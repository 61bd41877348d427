//! 2-Opt improvement for a single depot tour.

use super::DEPOT;
use crate::distance::DistanceMatrix;

/// Minimum gain (km) for a reversal to count as an improvement.
const IMPROVEMENT_EPSILON: f64 = 1e-9;

/// First-improvement 2-opt with a cap on applied moves.
#[derive(Debug, Clone)]
pub struct TwoOpt {
    pub max_iterations: usize,
}

/// What a 2-opt run did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TwoOptOutcome {
    /// Number of reversals applied
    pub moves: usize,
    /// True when the tour is 2-opt optimal, false when the cap stopped the search
    pub converged: bool,
}

impl TwoOpt {
    /// Create a 2-opt improver.
    pub fn new(max_iterations: usize) -> Self {
        TwoOpt { max_iterations }
    }

    /// Improve a tour in place. `stops` are matrix indices with the depot
    /// excluded; the depot stays fixed at both ends.
    ///
    /// Pairs are scanned in `(i, j)` order and the first strictly improving
    /// reversal is applied before scanning again.
    pub fn improve(&self, stops: &mut [usize], matrix: &DistanceMatrix) -> TwoOptOutcome {
        let n = stops.len();
        let mut moves = 0;

        if n < 3 {
            return TwoOptOutcome {
                moves,
                converged: true,
            };
        }

        loop {
            let improving = (0..n - 1)
                .flat_map(|i| (i + 1..n).map(move |j| (i, j)))
                .find(|&(i, j)| Self::evaluate_two_opt(stops, matrix, i, j) < -IMPROVEMENT_EPSILON);

            match improving {
                Some((i, j)) => {
                    if moves >= self.max_iterations {
                        return TwoOptOutcome {
                            moves,
                            converged: false,
                        };
                    }
                    Self::apply_two_opt(stops, i, j);
                    moves += 1;
                }
                None => {
                    return TwoOptOutcome {
                        moves,
                        converged: true,
                    }
                }
            }
        }
    }

    /// Change in tour length from reversing `stops[i..=j]`.
    pub fn evaluate_two_opt(stops: &[usize], matrix: &DistanceMatrix, i: usize, j: usize) -> f64 {
        let before = if i == 0 { DEPOT } else { stops[i - 1] };
        let after = if j + 1 < stops.len() {
            stops[j + 1]
        } else {
            DEPOT
        };

        let old_cost = matrix.get(before, stops[i]) + matrix.get(stops[j], after);
        let new_cost = matrix.get(before, stops[j]) + matrix.get(stops[i], after);

        new_cost - old_cost
    }

    /// Reverse the segment `stops[i..=j]`.
    fn apply_two_opt(stops: &mut [usize], i: usize, j: usize) {
        stops[i..=j].reverse();
    }
}
