//! Great-circle distances between coordinates.
//!
//! Straight-line haversine distance on a spherical Earth. Roads are ignored.

use rayon::prelude::*;

use crate::problem::Point;

/// Earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine distance between two `(lat, lng)` pairs in kilometers.
pub fn haversine_km(from: (f64, f64), to: (f64, f64)) -> f64 {
    let (lat1, lng1) = from;
    let (lat2, lng2) = to;

    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let delta_lat = (lat2 - lat1).to_radians();
    let delta_lng = (lng2 - lng1).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lng / 2.0).sin().powi(2);
    // Rounding can push `a` a hair above 1 for antipodal points.
    let c = 2.0 * a.min(1.0).sqrt().asin();

    EARTH_RADIUS_KM * c
}

/// Haversine distance between two points in kilometers.
pub fn distance(a: &Point, b: &Point) -> f64 {
    haversine_km(a.coords(), b.coords())
}

/// Dense, symmetric distance matrix in kilometers.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    size: usize,
    data: Vec<f64>,
}

impl DistanceMatrix {
    /// Build the matrix for a list of `(lat, lng)` coordinates.
    pub fn from_coords(coords: &[(f64, f64)]) -> Self {
        let n = coords.len();
        let data = coords
            .par_iter()
            .flat_map_iter(|&from| coords.iter().map(move |&to| haversine_km(from, to)))
            .collect();

        DistanceMatrix { size: n, data }
    }

    /// Build the matrix for a list of points.
    pub fn from_points<'a, I>(points: I) -> Self
    where
        I: IntoIterator<Item = &'a Point>,
    {
        let coords: Vec<(f64, f64)> = points.into_iter().map(Point::coords).collect();
        Self::from_coords(&coords)
    }

    /// Distance from index `from` to index `to`.
    #[inline]
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.size + to]
    }

    /// Number of locations.
    pub fn len(&self) -> usize {
        self.size
    }

    /// Whether the matrix has no locations.
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Length of a closed tour given as a sequence of indices.
    ///
    /// The closing leg from the last index back to the first is included.
    pub fn tour_length(&self, tour: &[usize]) -> f64 {
        if tour.len() < 2 {
            return 0.0;
        }

        let open: f64 = tour.windows(2).map(|w| self.get(w[0], w[1])).sum();
        open + self.get(tour[tour.len() - 1], tour[0])
    }
}
