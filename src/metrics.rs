//! Distance, time and efficiency figures for a route.

use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::distance::haversine_km;
use crate::problem::mean_coords;
use crate::solution::Route;

/// Summary figures of a route.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RouteMetrics {
    pub total_distance_km: f64,
    pub estimated_time_minutes: f64,
    /// Delivery stops, depot excluded
    pub stop_count: usize,
}

/// Converts stop sequences into [`RouteMetrics`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricsModel {
    pub average_speed_kmh: f64,
    pub minutes_per_stop: f64,
}

impl Default for MetricsModel {
    fn default() -> Self {
        MetricsModel::from_config(&Config::default())
    }
}

impl MetricsModel {
    /// Create a metrics model from the planner configuration.
    pub fn from_config(config: &Config) -> Self {
        MetricsModel {
            average_speed_kmh: config.average_speed_kmh,
            minutes_per_stop: config.minutes_per_stop,
        }
    }

    /// Compute distance, time and stop count for a route.
    pub fn metrics(&self, route: &Route) -> RouteMetrics {
        let stop_count = route.deliveries().count();
        if stop_count == 0 {
            return RouteMetrics::default();
        }

        let total_distance_km = route_distance(route);
        let driving_minutes = if self.average_speed_kmh > 0.0 {
            total_distance_km / self.average_speed_kmh * 60.0
        } else {
            0.0
        };

        RouteMetrics {
            total_distance_km,
            estimated_time_minutes: driving_minutes + stop_count as f64 * self.minutes_per_stop,
            stop_count,
        }
    }
}

/// Compute metrics with the default speed and stop time.
pub fn metrics(route: &Route) -> RouteMetrics {
    MetricsModel::default().metrics(route)
}

/// Closed length of a route in kilometers.
///
/// Sums consecutive legs and adds the leg back to the first stop when the
/// sequence does not already end where it started.
pub fn route_distance(route: &Route) -> f64 {
    let stops = &route.stops;
    let (first, last) = match (stops.first(), stops.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => return 0.0,
    };

    let open: f64 = stops
        .windows(2)
        .map(|w| haversine_km(w[0].coords(), w[1].coords()))
        .sum();

    if first.coords() == last.coords() {
        open
    } else {
        open + haversine_km(last.coords(), first.coords())
    }
}

/// One leg of a route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub from: usize,
    pub to: usize,
    pub from_name: String,
    pub to_name: String,
    pub distance_km: f64,
}

/// Legs between consecutive stops, in route order.
pub fn segment_distances(route: &Route) -> Vec<Segment> {
    route
        .stops
        .windows(2)
        .enumerate()
        .map(|(idx, w)| Segment {
            from: idx,
            to: idx + 1,
            from_name: w[0].name.clone(),
            to_name: w[1].name.clone(),
            distance_km: haversine_km(w[0].coords(), w[1].coords()),
        })
        .collect()
}

/// Shape figures of a route relative to its depot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Efficiency {
    pub avg_distance_per_stop: f64,
    /// Sum of out-and-back trips from the depot to every stop
    pub direct_distance_km: f64,
    /// Route distance over direct distance
    pub detour_factor: f64,
    /// `1 / (1 + stddev)` of stop distances to the route's mean coordinate
    pub compactness: f64,
    /// `compactness / detour_factor`
    pub efficiency_score: f64,
}

impl Default for Efficiency {
    fn default() -> Self {
        Efficiency {
            avg_distance_per_stop: 0.0,
            direct_distance_km: 0.0,
            detour_factor: 1.0,
            compactness: 0.0,
            efficiency_score: 0.0,
        }
    }
}

/// Efficiency figures of a route. The first stop is taken as the depot.
pub fn efficiency(route: &Route) -> Efficiency {
    let stops = &route.stops;
    let depot = match stops.first() {
        Some(depot) if route.deliveries().next().is_some() => depot,
        _ => return Efficiency::default(),
    };

    let total = route_distance(route);
    let direct_distance_km = 2.0
        * route
            .deliveries()
            .map(|s| haversine_km(depot.coords(), s.coords()))
            .sum::<f64>();
    let detour_factor = if direct_distance_km > 0.0 {
        total / direct_distance_km
    } else {
        1.0
    };

    let compactness = if stops.len() > 2 {
        match mean_coords(stops) {
            Some(center) => {
                let dists: Vec<f64> = stops
                    .iter()
                    .map(|s| haversine_km(center, s.coords()))
                    .collect();
                1.0 / (1.0 + std_dev(&dists))
            }
            None => 1.0,
        }
    } else {
        1.0
    };

    Efficiency {
        avg_distance_per_stop: total / stops.len() as f64,
        direct_distance_km,
        detour_factor,
        compactness,
        efficiency_score: compactness / detour_factor,
    }
}

fn std_dev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    variance.sqrt()
}

/// Fuel use assumptions for a delivery truck.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FuelModel {
    pub km_per_liter: f64,
    /// Idling and acceleration overhead per delivery stop
    pub liters_per_stop: f64,
    pub cost_per_liter: f64,
}

impl Default for FuelModel {
    fn default() -> Self {
        FuelModel {
            km_per_liter: 8.0,
            liters_per_stop: 0.2,
            cost_per_liter: 3000.0,
        }
    }
}

/// Estimated fuel use of a route.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FuelEstimate {
    pub liters: f64,
    pub cost: f64,
    /// Distance per litre once stop overhead is included
    pub effective_km_per_liter: f64,
}

/// Estimate fuel use and cost from a route's metrics.
pub fn fuel_estimate(route: &Route, model: &FuelModel) -> FuelEstimate {
    let distance = route.metrics.total_distance_km;
    let driving = if model.km_per_liter > 0.0 {
        distance / model.km_per_liter
    } else {
        0.0
    };
    let liters = driving + route.metrics.stop_count as f64 * model.liters_per_stop;

    FuelEstimate {
        liters,
        cost: liters * model.cost_per_liter,
        effective_km_per_liter: if liters > 0.0 { distance / liters } else { 0.0 },
    }
}
