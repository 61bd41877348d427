//! Route and solution representation.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::metrics::{MetricsModel, RouteMetrics};
use crate::problem::Point;

/// A vehicle route: depot, the cluster's stops in visiting order, depot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    /// Identifier of the cluster this route serves
    pub cluster_id: usize,
    /// The stop sequence, depot first and last
    pub stops: Vec<Point>,
    /// Metrics derived from `stops`
    pub metrics: RouteMetrics,
}

impl Route {
    /// Create a route from its stop sequence. Metrics start at zero until
    /// [`Route::evaluate`] is called.
    pub fn new(cluster_id: usize, stops: Vec<Point>) -> Self {
        Route {
            cluster_id,
            stops,
            metrics: RouteMetrics::default(),
        }
    }

    /// Recompute the metrics from the stop sequence.
    pub fn evaluate(&mut self, model: &MetricsModel) {
        self.metrics = model.metrics(self);
    }

    /// The delivery stops, depot excluded.
    pub fn deliveries(&self) -> impl Iterator<Item = &Point> {
        self.stops.iter().filter(|s| !s.is_depot)
    }

    /// Check if the route only visits the depot.
    pub fn is_empty(&self) -> bool {
        self.deliveries().next().is_none()
    }

    /// Identifiers of the delivery stops in visiting order.
    pub fn stop_ids(&self) -> Vec<&str> {
        self.deliveries().map(|p| p.id.as_str()).collect()
    }
}

/// The planner's result for one request.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct Solution {
    /// One route per cluster
    pub routes: Vec<Route>,
    /// Sum of route distances (km)
    pub total_distance_km: f64,
    /// Sum of route time estimates (minutes)
    pub total_time_minutes: f64,
}

impl Solution {
    /// Create a solution and compute fleet totals from the routes' metrics.
    pub fn new(routes: Vec<Route>) -> Self {
        let total_distance_km = routes.iter().map(|r| r.metrics.total_distance_km).sum();
        let total_time_minutes = routes.iter().map(|r| r.metrics.estimated_time_minutes).sum();

        Solution {
            routes,
            total_distance_km,
            total_time_minutes,
        }
    }

    /// Get the number of routes.
    pub fn get_route_count(&self) -> usize {
        self.routes.len()
    }

    /// Total number of delivery stops across all routes.
    pub fn get_stop_count(&self) -> usize {
        self.routes.iter().map(|r| r.metrics.stop_count).sum()
    }

    /// Consume the solution and return its routes.
    pub fn into_routes(self) -> Vec<Route> {
        self.routes
    }
}

impl fmt::Debug for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Solution:")?;
        writeln!(f, "  Distance: {:.2} km", self.total_distance_km)?;
        writeln!(f, "  Time: {:.1} min", self.total_time_minutes)?;
        writeln!(f, "  Routes: {}", self.routes.len())?;

        for route in &self.routes {
            writeln!(
                f,
                "  Route {}: {:?} (Stops: {}, Distance: {:.2} km)",
                route.cluster_id,
                route.stop_ids(),
                route.metrics.stop_count,
                route.metrics.total_distance_km
            )?;
        }

        Ok(())
    }
}
