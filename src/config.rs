//! Configuration parameters for the route planner.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{PlanError, Result};
use crate::problem::BoundingBox;

/// Configuration settings for clustering, solving and metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Clusters with at most this many stops are solved exactly
    pub exact_threshold: usize,
    /// Maximum number of applied 2-opt moves per cluster
    pub two_opt_max_iterations: usize,
    /// Average driving speed used for time estimates (km/h)
    pub average_speed_kmh: f64,
    /// Service time spent at each delivery stop (minutes)
    pub minutes_per_stop: f64,
    /// Base seed for the K-means initialisation
    pub cluster_seed: u64,
    /// Maximum K-means iterations per run
    pub kmeans_max_iterations: usize,
    /// Number of independently seeded K-means runs
    pub kmeans_restarts: usize,
    /// Strength of the pull of clustering coordinates toward the depot (0 disables it)
    pub depot_pull: f64,
    /// Smallest accepted truck count
    pub min_trucks: usize,
    /// Largest accepted truck count
    pub max_trucks: usize,
    /// Optional service area; points outside it are rejected
    pub bounds: Option<BoundingBox>,
    /// Solve clusters on the rayon thread pool
    pub parallel: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            exact_threshold: 8,
            two_opt_max_iterations: 1000,
            average_speed_kmh: 30.0,
            minutes_per_stop: 5.0,
            cluster_seed: 42,
            kmeans_max_iterations: 300,
            kmeans_restarts: 10,
            depot_pull: 0.2,
            min_trucks: 3,
            max_trucks: 6,
            bounds: None,
            parallel: true,
        }
    }
}

impl Config {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Config::default()
    }

    /// Load a configuration from a JSON file. Missing fields keep their defaults.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| PlanError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;

        serde_json::from_str(&raw).map_err(|source| PlanError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Set the exact-search threshold.
    pub fn with_exact_threshold(mut self, threshold: usize) -> Self {
        self.exact_threshold = threshold;
        self
    }

    /// Set the 2-opt move cap.
    pub fn with_two_opt_max_iterations(mut self, iterations: usize) -> Self {
        self.two_opt_max_iterations = iterations;
        self
    }

    /// Set the average speed used for time estimates.
    pub fn with_average_speed_kmh(mut self, speed: f64) -> Self {
        self.average_speed_kmh = speed;
        self
    }

    /// Set the service time per stop.
    pub fn with_minutes_per_stop(mut self, minutes: f64) -> Self {
        self.minutes_per_stop = minutes;
        self
    }

    /// Set the clustering seed.
    pub fn with_cluster_seed(mut self, seed: u64) -> Self {
        self.cluster_seed = seed;
        self
    }

    /// Set the K-means iteration cap.
    pub fn with_kmeans_max_iterations(mut self, iterations: usize) -> Self {
        self.kmeans_max_iterations = iterations;
        self
    }

    /// Set the number of K-means restarts.
    pub fn with_kmeans_restarts(mut self, restarts: usize) -> Self {
        self.kmeans_restarts = restarts;
        self
    }

    /// Set the depot pull strength.
    pub fn with_depot_pull(mut self, pull: f64) -> Self {
        self.depot_pull = pull;
        self
    }

    /// Set the accepted truck count range.
    pub fn with_truck_bounds(mut self, min: usize, max: usize) -> Self {
        self.min_trucks = min;
        self.max_trucks = max;
        self
    }

    /// Restrict points to a service area.
    pub fn with_bounds(mut self, bounds: BoundingBox) -> Self {
        self.bounds = Some(bounds);
        self
    }

    /// Enable or disable parallel cluster solving.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}
