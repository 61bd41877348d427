//! Problem definition: delivery points, the depot and the service area.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::distance;
use crate::error::{PlanError, Result};

/// A geocoded location: either a delivery point or the depot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub is_depot: bool,
}

impl Point {
    /// Create a delivery point.
    pub fn new(id: impl Into<String>, name: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Point {
            id: id.into(),
            name: name.into(),
            latitude,
            longitude,
            is_depot: false,
        }
    }

    /// Create a depot point.
    pub fn depot(id: impl Into<String>, name: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Point {
            is_depot: true,
            ..Point::new(id, name, latitude, longitude)
        }
    }

    /// The `(latitude, longitude)` pair.
    pub fn coords(&self) -> (f64, f64) {
        (self.latitude, self.longitude)
    }

    /// Great-circle distance to another point in kilometers.
    pub fn distance(&self, other: &Point) -> f64 {
        distance::distance(self, other)
    }

    /// Whether both coordinates are finite and inside the valid degree ranges.
    pub fn has_valid_coords(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }

    /// A copy of this point flagged as the depot.
    pub fn as_depot(&self) -> Point {
        Point {
            is_depot: true,
            ..self.clone()
        }
    }
}

/// Rectangular latitude/longitude region that points must fall inside.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub lat_min: f64,
    pub lat_max: f64,
    pub lng_min: f64,
    pub lng_max: f64,
}

impl BoundingBox {
    /// Urban Bogotá.
    pub const BOGOTA: BoundingBox = BoundingBox {
        lat_min: 4.47,
        lat_max: 4.83,
        lng_min: -74.22,
        lng_max: -74.00,
    };

    /// Create a bounding box.
    pub fn new(lat_min: f64, lat_max: f64, lng_min: f64, lng_max: f64) -> Self {
        BoundingBox {
            lat_min,
            lat_max,
            lng_min,
            lng_max,
        }
    }

    /// Check whether a point lies inside the box (edges inclusive).
    pub fn contains(&self, point: &Point) -> bool {
        (self.lat_min..=self.lat_max).contains(&point.latitude)
            && (self.lng_min..=self.lng_max).contains(&point.longitude)
    }
}

/// Validate the depot coordinates.
pub fn validate_depot(depot: &Point) -> Result<()> {
    if depot.has_valid_coords() {
        Ok(())
    } else {
        Err(PlanError::InvalidDepot {
            latitude: depot.latitude,
            longitude: depot.longitude,
        })
    }
}

/// Validate delivery points and return the ones that take part in clustering.
///
/// Points flagged as depot are skipped. Fails if nothing deliverable remains,
/// if any coordinate is invalid or outside `bounds`, or if an id repeats.
pub fn validate_points<'a>(
    points: &'a [Point],
    bounds: Option<&BoundingBox>,
) -> Result<Vec<&'a Point>> {
    let mut seen = HashSet::new();
    let mut deliveries = Vec::with_capacity(points.len());

    for point in points.iter().filter(|p| !p.is_depot) {
        if !point.has_valid_coords() {
            return Err(PlanError::InvalidPoint {
                id: point.id.clone(),
                latitude: point.latitude,
                longitude: point.longitude,
            });
        }

        if let Some(bounds) = bounds {
            if !bounds.contains(point) {
                return Err(PlanError::PointOutOfBounds {
                    id: point.id.clone(),
                    latitude: point.latitude,
                    longitude: point.longitude,
                });
            }
        }

        if !seen.insert(point.id.as_str()) {
            return Err(PlanError::DuplicatePointId {
                id: point.id.clone(),
            });
        }

        deliveries.push(point);
    }

    if deliveries.is_empty() {
        return Err(PlanError::EmptyPoints);
    }

    Ok(deliveries)
}

/// Mean `(latitude, longitude)` of a set of points, or `None` if empty.
pub fn mean_coords<'a, I>(points: I) -> Option<(f64, f64)>
where
    I: IntoIterator<Item = &'a Point>,
{
    let mut sum_lat = 0.0;
    let mut sum_lng = 0.0;
    let mut count = 0;

    for point in points {
        sum_lat += point.latitude;
        sum_lng += point.longitude;
        count += 1;
    }

    if count > 0 {
        Some((sum_lat / count as f64, sum_lng / count as f64))
    } else {
        None
    }
}
