//! Per-cluster tour construction.
//!
//! Small clusters are solved exactly by enumerating permutations. Larger ones
//! are built with nearest-neighbour and improved with 2-opt. Both strategies
//! work on a [`DistanceMatrix`] whose index 0 is the depot and whose index
//! `i + 1` is the cluster's `i`-th point.

pub mod exact;
pub mod nearest_neighbor;
pub mod two_opt;

use log::debug;

use crate::cluster::Cluster;
use crate::config::Config;
use crate::distance::DistanceMatrix;
use crate::problem::Point;
use crate::solution::Route;

pub use self::exact::ExactSolver;
pub use self::nearest_neighbor::NearestNeighbor;
pub use self::two_opt::{TwoOpt, TwoOptOutcome};

/// Matrix index of the depot.
pub const DEPOT: usize = 0;

/// A closed depot tour over one cluster.
#[derive(Debug, Clone, PartialEq)]
pub struct Tour {
    /// Visiting order as cluster positions (0-based, depot excluded)
    pub order: Vec<usize>,
    /// Closed tour length in kilometers, depot legs included
    pub distance: f64,
}

impl Tour {
    /// The tour of an empty cluster.
    pub fn empty() -> Self {
        Tour {
            order: Vec::new(),
            distance: 0.0,
        }
    }

    /// Build a tour from matrix indices of the stops (depot excluded).
    pub fn from_stops(stops: &[usize], matrix: &DistanceMatrix) -> Self {
        Tour {
            order: stops.iter().map(|&s| s - 1).collect(),
            distance: depot_tour_length(stops, matrix),
        }
    }
}

/// Length of `depot -> stops... -> depot`, with stops as matrix indices.
pub fn depot_tour_length(stops: &[usize], matrix: &DistanceMatrix) -> f64 {
    let (first, last) = match (stops.first(), stops.last()) {
        (Some(&first), Some(&last)) => (first, last),
        _ => return 0.0,
    };

    let inner: f64 = stops.windows(2).map(|w| matrix.get(w[0], w[1])).sum();
    matrix.get(DEPOT, first) + inner + matrix.get(last, DEPOT)
}

/// Capability shared by the exact and heuristic strategies.
pub trait TourSolver {
    /// Compute a closed tour starting and ending at matrix index 0.
    fn solve_tour(&self, matrix: &DistanceMatrix) -> Tour;
}

/// Nearest-neighbour construction followed by 2-opt.
#[derive(Debug, Clone)]
pub struct HeuristicSolver {
    pub two_opt: TwoOpt,
}

impl HeuristicSolver {
    /// Create a heuristic solver with the given 2-opt move cap.
    pub fn new(two_opt_max_iterations: usize) -> Self {
        HeuristicSolver {
            two_opt: TwoOpt::new(two_opt_max_iterations),
        }
    }
}

impl TourSolver for HeuristicSolver {
    fn solve_tour(&self, matrix: &DistanceMatrix) -> Tour {
        let mut stops = NearestNeighbor.construct(matrix);
        let outcome = self.two_opt.improve(&mut stops, matrix);

        if !outcome.converged {
            debug!(
                "2-opt hit its cap of {} moves before reaching a local optimum",
                self.two_opt.max_iterations
            );
        }

        Tour::from_stops(&stops, matrix)
    }
}

/// Which algorithm solves a cluster.
#[derive(Debug, Clone)]
pub enum Strategy {
    Exact(ExactSolver),
    Heuristic(HeuristicSolver),
}

impl Strategy {
    /// Pick the strategy for a cluster of `size` stops.
    pub fn for_size(size: usize, exact_threshold: usize, two_opt_max_iterations: usize) -> Self {
        if size <= exact_threshold {
            Strategy::Exact(ExactSolver)
        } else {
            Strategy::Heuristic(HeuristicSolver::new(two_opt_max_iterations))
        }
    }

    /// Short name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            Strategy::Exact(_) => "exact",
            Strategy::Heuristic(_) => "heuristic",
        }
    }
}

impl TourSolver for Strategy {
    fn solve_tour(&self, matrix: &DistanceMatrix) -> Tour {
        match self {
            Strategy::Exact(solver) => solver.solve_tour(matrix),
            Strategy::Heuristic(solver) => solver.solve_tour(matrix),
        }
    }
}

/// Turns a cluster into a depot-anchored route.
#[derive(Debug, Clone)]
pub struct RouteSolver {
    pub exact_threshold: usize,
    pub two_opt_max_iterations: usize,
}

impl Default for RouteSolver {
    fn default() -> Self {
        RouteSolver::from_config(&Config::default())
    }
}

impl RouteSolver {
    /// Create a route solver from the planner configuration.
    pub fn from_config(config: &Config) -> Self {
        RouteSolver {
            exact_threshold: config.exact_threshold,
            two_opt_max_iterations: config.two_opt_max_iterations,
        }
    }

    /// The strategy used for a cluster of `size` stops.
    pub fn strategy_for(&self, size: usize) -> Strategy {
        Strategy::for_size(size, self.exact_threshold, self.two_opt_max_iterations)
    }

    /// Compute the tour for a cluster without building a route.
    pub fn solve_tour(&self, cluster: &Cluster, depot: &Point) -> Tour {
        match cluster.len() {
            0 => Tour::empty(),
            1 => {
                let distance = 2.0 * depot.distance(&cluster.points[0]);
                Tour {
                    order: vec![0],
                    distance,
                }
            }
            n => {
                let matrix =
                    DistanceMatrix::from_points(std::iter::once(depot).chain(&cluster.points));
                let strategy = self.strategy_for(n);
                let tour = strategy.solve_tour(&matrix);
                debug!(
                    "cluster {} ({} stops) solved with {} strategy: {:.3} km",
                    cluster.id,
                    n,
                    strategy.name(),
                    tour.distance
                );
                tour
            }
        }
    }

    /// Solve a cluster into a route that starts and ends at the depot.
    ///
    /// The cluster is left untouched. An empty cluster yields `[depot]`.
    pub fn solve(&self, cluster: &Cluster, depot: &Point) -> Route {
        let depot_stop = depot.as_depot();

        if cluster.is_empty() {
            return Route::new(cluster.id, vec![depot_stop]);
        }

        let tour = self.solve_tour(cluster, depot);

        let mut stops = Vec::with_capacity(cluster.len() + 2);
        stops.push(depot_stop.clone());
        stops.extend(tour.order.iter().map(|&pos| {
            let mut stop = cluster.points[pos].clone();
            stop.is_depot = false;
            stop
        }));
        stops.push(depot_stop);

        Route::new(cluster.id, stops)
    }
}
