//! # fleet-routes
//!
//! Plans delivery routes for a small fleet operating out of a single depot.
//!
//! Delivery points are partitioned into geographic clusters with seeded
//! K-means, one cluster per truck. Each cluster is then solved as a closed
//! travelling-salesman tour from the depot: exactly for small clusters and
//! with nearest-neighbour plus 2-opt for larger ones. Every route carries its
//! distance and time estimate.
//!
//! ```no_run
//! use fleet_routes::problem::Point;
//! use fleet_routes::{config::Config, RoutePlanner};
//!
//! let depot = Point::depot("depot", "Depot Central", 4.6097, -74.0817);
//! let points: Vec<Point> = (0..12)
//!     .map(|i| Point::new(format!("p{i}"), "", 4.60 + 0.01 * i as f64, -74.08))
//!     .collect();
//!
//! let planner = RoutePlanner::new(Config::default());
//! let solution = planner.plan(&points, &depot, 3).unwrap();
//! assert_eq!(solution.routes.len(), 3);
//! ```

pub mod cluster;
pub mod config;
pub mod distance;
pub mod error;
pub mod metrics;
pub mod problem;
pub mod solution;
pub mod solver;
pub mod utils;

use log::{debug, info};
use rayon::prelude::*;

use crate::cluster::{Cluster, ClusterAssigner};
use crate::config::Config;
use crate::error::{PlanError, Result};
use crate::metrics::MetricsModel;
use crate::problem::{validate_depot, validate_points, Point};
use crate::solution::{Route, Solution};
use crate::solver::RouteSolver;

pub use crate::error::PlanError as InvalidInputError;

/// Orchestrates validation, clustering, per-cluster solving and metrics.
#[derive(Debug, Clone)]
pub struct RoutePlanner {
    pub config: Config,
    pub assigner: ClusterAssigner,
    pub solver: RouteSolver,
    pub metrics: MetricsModel,
}

impl Default for RoutePlanner {
    fn default() -> Self {
        RoutePlanner::new(Config::default())
    }
}

impl RoutePlanner {
    /// Create a planner for the given configuration.
    pub fn new(config: Config) -> Self {
        RoutePlanner {
            assigner: ClusterAssigner::from_config(&config),
            solver: RouteSolver::from_config(&config),
            metrics: MetricsModel::from_config(&config),
            config,
        }
    }

    /// Check the truck count against the configured bounds.
    pub fn validate_truck_count(&self, num_trucks: usize) -> Result<()> {
        if (self.config.min_trucks..=self.config.max_trucks).contains(&num_trucks) {
            Ok(())
        } else {
            Err(PlanError::TruckCountOutOfRange {
                requested: num_trucks,
                min: self.config.min_trucks,
                max: self.config.max_trucks,
            })
        }
    }

    /// Validate the request and partition the delivery points.
    pub fn cluster(&self, points: &[Point], depot: &Point, num_trucks: usize) -> Result<Vec<Cluster>> {
        validate_depot(depot)?;
        let deliveries = validate_points(points, self.config.bounds.as_ref())?;
        self.validate_truck_count(num_trucks)?;

        let deliveries: Vec<Point> = deliveries.into_iter().cloned().collect();
        let k = num_trucks.min(deliveries.len());
        if k < num_trucks {
            debug!(
                "only {} delivery points for {} trucks, using {} clusters",
                deliveries.len(),
                num_trucks,
                k
            );
        }

        info!("clustering {} points into {} groups", deliveries.len(), k);
        let clusters = self.assigner.assign_towards(&deliveries, k, depot);
        for cluster in &clusters {
            debug!("cluster {}: {} stops", cluster.id, cluster.len());
        }

        Ok(clusters)
    }

    /// Solve every cluster and attach metrics. Output order follows `clusters`.
    pub fn route_clusters(&self, clusters: &[Cluster], depot: &Point) -> Vec<Route> {
        let solve = |cluster: &Cluster| {
            let mut route = self.solver.solve(cluster, depot);
            route.evaluate(&self.metrics);
            route
        };

        if self.config.parallel {
            clusters.par_iter().map(solve).collect()
        } else {
            clusters.iter().map(solve).collect()
        }
    }

    /// Run the whole pipeline and return the routes with fleet totals.
    pub fn plan(&self, points: &[Point], depot: &Point, num_trucks: usize) -> Result<Solution> {
        let clusters = self.cluster(points, depot, num_trucks)?;

        info!("optimising {} routes", clusters.len());
        let routes = self.route_clusters(&clusters, depot);
        let solution = Solution::new(routes);

        info!(
            "planned {} routes covering {} stops: {:.2} km, {:.1} min",
            solution.get_route_count(),
            solution.get_stop_count(),
            solution.total_distance_km,
            solution.total_time_minutes
        );

        Ok(solution)
    }

    /// Run the whole pipeline and return one route per cluster.
    pub fn optimize(&self, points: &[Point], depot: &Point, num_trucks: usize) -> Result<Vec<Route>> {
        self.plan(points, depot, num_trucks).map(Solution::into_routes)
    }
}

/// Plan routes with the default configuration.
pub fn optimize(points: &[Point], depot: &Point, num_trucks: usize) -> Result<Vec<Route>> {
    RoutePlanner::default().optimize(points, depot, num_trucks)
}
