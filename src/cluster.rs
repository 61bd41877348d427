//! Geographic partitioning of delivery points into vehicle clusters.
//!
//! Seeded K-means over `(lat, lng)`, initialised with k-means++ and restarted
//! several times. The partition with the best geographic score is kept.

use log::debug;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::distance::haversine_km;
use crate::problem::{mean_coords, Point};

/// Weight of the mean depot distance in the geographic score.
const DEPOT_PROXIMITY_WEIGHT: f64 = 0.3;

/// A group of delivery points served by one vehicle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cluster {
    /// Position of the cluster in the assigner's output
    pub id: usize,
    /// Member points, in input order
    pub points: Vec<Point>,
    /// Mean `(lat, lng)` of the members
    pub centroid: (f64, f64),
}

impl Cluster {
    fn from_members(id: usize, points: Vec<Point>) -> Self {
        let centroid = mean_coords(&points).unwrap_or((0.0, 0.0));
        Cluster {
            id,
            points,
            centroid,
        }
    }

    /// Number of member points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if the cluster has no members.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Identifiers of the member points.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.points.iter().map(|p| p.id.as_str())
    }
}

/// Partitions points into `k` geographic groups with seeded K-means.
#[derive(Debug, Clone)]
pub struct ClusterAssigner {
    pub seed: u64,
    pub max_iterations: usize,
    pub restarts: usize,
    pub depot_pull: f64,
}

impl Default for ClusterAssigner {
    fn default() -> Self {
        ClusterAssigner::from_config(&Config::default())
    }
}

impl ClusterAssigner {
    /// Create an assigner from the planner configuration.
    pub fn from_config(config: &Config) -> Self {
        ClusterAssigner {
            seed: config.cluster_seed,
            max_iterations: config.kmeans_max_iterations,
            restarts: config.kmeans_restarts,
            depot_pull: config.depot_pull,
        }
    }

    /// Partition the non-depot points into at most `k` clusters.
    pub fn assign(&self, points: &[Point], k: usize) -> Vec<Cluster> {
        self.partition(points, k, None)
    }

    /// Like [`ClusterAssigner::assign`], but clustering coordinates are pulled
    /// toward the depot and depot proximity takes part in scoring.
    pub fn assign_towards(&self, points: &[Point], k: usize, depot: &Point) -> Vec<Cluster> {
        self.partition(points, k, Some(depot))
    }

    fn partition(&self, points: &[Point], k: usize, depot: Option<&Point>) -> Vec<Cluster> {
        let members: Vec<&Point> = points.iter().filter(|p| !p.is_depot).collect();

        if members.is_empty() || k == 0 {
            return Vec::new();
        }

        // Fewer points than vehicles: one point per vehicle.
        if members.len() <= k {
            return members
                .into_iter()
                .enumerate()
                .map(|(id, point)| Cluster::from_members(id, vec![point.clone()]))
                .collect();
        }

        let coords = self.clustering_coords(&members, depot);

        let mut best: Option<(f64, Vec<usize>)> = None;
        for run in 0..self.restarts.max(1) {
            let mut rng = ChaCha8Rng::seed_from_u64(self.seed.wrapping_add(run as u64));
            let mut labels = self.run_kmeans(&coords, k, &mut rng);
            fill_empty_groups(&mut labels, k);

            let score = geographic_score(&members, &labels, k, depot);
            debug!("k-means run {} scored {:.4}", run, score);

            let better = match &best {
                Some((best_score, _)) => score < *best_score,
                None => true,
            };
            if better {
                best = Some((score, labels));
            }
        }

        let labels = best.map(|(_, labels)| labels).unwrap_or_default();
        build_clusters(&members, &labels, k)
    }

    /// Coordinates used for clustering, optionally pulled toward the depot.
    fn clustering_coords(&self, members: &[&Point], depot: Option<&Point>) -> Vec<(f64, f64)> {
        match depot {
            Some(depot) if self.depot_pull > 0.0 => members
                .iter()
                .map(|point| {
                    let dist = haversine_km(depot.coords(), point.coords());
                    if dist > 0.0 {
                        let factor = self.depot_pull / (1.0 + dist);
                        (
                            point.latitude + (depot.latitude - point.latitude) * factor,
                            point.longitude + (depot.longitude - point.longitude) * factor,
                        )
                    } else {
                        point.coords()
                    }
                })
                .collect(),
            _ => members.iter().map(|p| p.coords()).collect(),
        }
    }

    /// One Lloyd's K-means run. Returns the label of every coordinate.
    fn run_kmeans(&self, coords: &[(f64, f64)], k: usize, rng: &mut ChaCha8Rng) -> Vec<usize> {
        let mut centroids = kmeans_plus_plus(coords, k, rng);
        let mut labels: Vec<usize> = Vec::new();
        let max_iterations = self.max_iterations.max(1);

        for iteration in 0..max_iterations {
            let new_labels: Vec<usize> = coords
                .par_iter()
                .map(|&c| nearest_centroid(c, &centroids))
                .collect();

            if new_labels == labels {
                debug!("k-means converged after {} iterations", iteration);
                return labels;
            }

            labels = new_labels;
            centroids = update_centroids(coords, &labels, &centroids);
        }

        debug!(
            "k-means stopped at the {}-iteration cap without converging",
            max_iterations
        );
        labels
    }
}

fn squared_distance(a: (f64, f64), b: (f64, f64)) -> f64 {
    let d_lat = a.0 - b.0;
    let d_lng = a.1 - b.1;
    d_lat * d_lat + d_lng * d_lng
}

/// Index of the closest centroid. Ties go to the lowest index.
fn nearest_centroid(coord: (f64, f64), centroids: &[(f64, f64)]) -> usize {
    let mut best = 0;
    let mut best_dist = f64::INFINITY;

    for (idx, &centroid) in centroids.iter().enumerate() {
        let dist = squared_distance(coord, centroid);
        if dist < best_dist {
            best_dist = dist;
            best = idx;
        }
    }

    best
}

/// k-means++ seeding: each new centroid is drawn with probability
/// proportional to its squared distance from the nearest chosen centroid.
fn kmeans_plus_plus(coords: &[(f64, f64)], k: usize, rng: &mut ChaCha8Rng) -> Vec<(f64, f64)> {
    let n = coords.len();
    let mut centroids = Vec::with_capacity(k);
    centroids.push(coords[rng.gen_range(0..n)]);

    let mut closest: Vec<f64> = coords
        .iter()
        .map(|&c| squared_distance(c, centroids[0]))
        .collect();

    while centroids.len() < k {
        let total: f64 = closest.iter().sum();

        let next = if total > 0.0 {
            let target = rng.gen::<f64>() * total;
            let mut cumulative = 0.0;
            let mut chosen = n - 1;
            for (idx, &weight) in closest.iter().enumerate() {
                cumulative += weight;
                if weight > 0.0 && cumulative >= target {
                    chosen = idx;
                    break;
                }
            }
            chosen
        } else {
            // Every point coincides with a centroid already.
            rng.gen_range(0..n)
        };

        let centroid = coords[next];
        centroids.push(centroid);

        for (dist, &c) in closest.iter_mut().zip(coords) {
            *dist = dist.min(squared_distance(c, centroid));
        }
    }

    centroids
}

/// Recompute centroids as member means. An empty group is re-seeded at the
/// point farthest from its own centroid.
fn update_centroids(
    coords: &[(f64, f64)],
    labels: &[usize],
    previous: &[(f64, f64)],
) -> Vec<(f64, f64)> {
    let k = previous.len();
    let mut sums = vec![(0.0, 0.0); k];
    let mut counts = vec![0usize; k];

    for (&c, &label) in coords.iter().zip(labels) {
        sums[label].0 += c.0;
        sums[label].1 += c.1;
        counts[label] += 1;
    }

    let mut centroids: Vec<(f64, f64)> = (0..k)
        .map(|j| {
            if counts[j] > 0 {
                (sums[j].0 / counts[j] as f64, sums[j].1 / counts[j] as f64)
            } else {
                previous[j]
            }
        })
        .collect();

    let mut taken = vec![false; coords.len()];
    for j in (0..k).filter(|&j| counts[j] == 0) {
        let farthest = coords
            .iter()
            .zip(labels)
            .enumerate()
            .filter(|(idx, _)| !taken[*idx])
            .map(|(idx, (&c, &label))| (idx, squared_distance(c, centroids[label])))
            .fold(None, |best: Option<(usize, f64)>, (idx, dist)| match best {
                Some((_, best_dist)) if best_dist >= dist => best,
                _ => Some((idx, dist)),
            });

        if let Some((idx, _)) = farthest {
            taken[idx] = true;
            centroids[j] = coords[idx];
        }
    }

    centroids
}

/// Split the largest groups in half until `k` labels are in use.
///
/// Requires more points than `k`, so some group always has two members.
fn fill_empty_groups(labels: &mut [usize], k: usize) {
    loop {
        let mut counts = vec![0usize; k];
        for &label in labels.iter() {
            counts[label] += 1;
        }

        let empty = match counts.iter().position(|&c| c == 0) {
            Some(empty) => empty,
            None => return,
        };

        let (largest, &size) = counts
            .iter()
            .enumerate()
            .rev()
            .max_by_key(|(_, &c)| c)
            .unwrap_or((0, &0));
        if size < 2 {
            return;
        }

        let keep = size / 2;
        labels
            .iter_mut()
            .filter(|label| **label == largest)
            .skip(keep)
            .for_each(|label| *label = empty);
    }
}

/// Lower is better: mean spread around each group's centre, plus a weighted
/// mean distance to the depot when one is given.
fn geographic_score(members: &[&Point], labels: &[usize], k: usize, depot: Option<&Point>) -> f64 {
    let mut total = 0.0;

    for group in 0..k {
        let points: Vec<&Point> = members
            .iter()
            .zip(labels)
            .filter(|(_, &label)| label == group)
            .map(|(&p, _)| p)
            .collect();

        let center = match mean_coords(points.iter().copied()) {
            Some(center) => center,
            None => continue,
        };

        if points.len() > 1 {
            let spread: f64 = points
                .iter()
                .map(|p| haversine_km(center, p.coords()))
                .sum();
            total += spread / points.len() as f64;
        }

        if let Some(depot) = depot {
            let to_depot: f64 = points
                .iter()
                .map(|p| haversine_km(depot.coords(), p.coords()))
                .sum();
            total += DEPOT_PROXIMITY_WEIGHT * to_depot / points.len() as f64;
        }
    }

    total
}

/// Turn labels into clusters numbered by first appearance in input order.
fn build_clusters(members: &[&Point], labels: &[usize], k: usize) -> Vec<Cluster> {
    let mut order: Vec<usize> = Vec::with_capacity(k);
    let mut groups: Vec<Vec<Point>> = Vec::with_capacity(k);

    for (&point, &label) in members.iter().zip(labels) {
        let slot = match order.iter().position(|&l| l == label) {
            Some(slot) => slot,
            None => {
                order.push(label);
                groups.push(Vec::new());
                order.len() - 1
            }
        };
        groups[slot].push(point.clone());
    }

    groups
        .into_iter()
        .enumerate()
        .map(|(id, points)| Cluster::from_members(id, points))
        .collect()
}
