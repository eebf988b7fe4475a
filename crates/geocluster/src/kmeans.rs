use crate::palette;
use crate::types::{Centroid, Cluster, Point};
use log::debug;
use rand::RngExt;

pub mod elbow;
pub mod lloyds;
pub mod plus_plus_init;

pub use lloyds::ReseedStrategy;

// References:
// - k-means++: The Advantages of Careful Seeding (D. Arthur, S. Vassilvitskii)
//   https://theory.stanford.edu/~sergei/papers/kMeansPP-soda.pdf
// - https://scikit-learn.org/stable/modules/generated/sklearn.cluster.KMeans.html
//
// Coordinates are treated as planar: one degree of latitude and one degree of
// longitude weigh the same. Good enough for grouping a city's patients.

pub const MAX_ITERATIONS: usize = 100;
/// In coordinate units (degrees), not metres.
pub const CONVERGENCE_THRESHOLD: f64 = 0.0001;

pub const RADIUS_SCALE: f64 = 1.5;
pub const MIN_RADIUS: f64 = 0.001;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Options {
    pub max_iterations: usize,
    pub convergence_threshold: f64,
    pub reseed: ReseedStrategy,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            max_iterations: MAX_ITERATIONS,
            convergence_threshold: CONVERGENCE_THRESHOLD,
            reseed: ReseedStrategy::default(),
        }
    }
}

/// Raw output of one clustering run.
#[derive(Debug, Clone)]
pub struct KMeans {
    pub centroids: Vec<Centroid>,
    /// Cluster index of every input point, in input order.
    pub assignments: Vec<usize>,
    pub iterations: usize,
    pub converged: bool,
}

pub fn find_centroids(
    rng: &mut impl RngExt,
    points: &[Point],
    k: usize,
    options: &Options,
) -> KMeans {
    if points.is_empty() {
        return KMeans {
            centroids: Vec::new(),
            assignments: Vec::new(),
            iterations: 0,
            converged: true,
        };
    }

    let init_points = plus_plus_init::find_initial(rng, points, k);
    let mut centroids: Vec<Centroid> = init_points.iter().map(|&i| points[i].position()).collect();
    let mut assignments = vec![0usize; points.len()];

    let result = lloyds::lloyds_loop(
        rng,
        points,
        &mut centroids,
        &mut assignments,
        options.max_iterations,
        options.convergence_threshold,
        options.reseed,
    );

    debug!(
        "k-means on {} points, k={}: {} iterations, converged={}",
        points.len(),
        centroids.len(),
        result.iterations,
        result.converged,
    );

    KMeans {
        centroids,
        assignments,
        iterations: result.iterations,
        converged: result.converged,
    }
}

/// Groups the points into one cluster per centroid of the run, keeping input order.
pub fn assemble(points: &[Point], result: &KMeans) -> Vec<Cluster> {
    let mut clusters: Vec<Cluster> = result
        .centroids
        .iter()
        .copied()
        .enumerate()
        .map(|(id, centroid)| Cluster {
            id,
            centroid,
            points: Vec::new(),
            color: palette::color_for(id),
        })
        .collect();

    for (point, &c) in points.iter().zip(&result.assignments) {
        clusters[c].points.push(*point);
    }

    clusters
}

/// Partitions `points` into `k` clusters with the default [`Options`].
///
/// `k` is clamped to `1..=points.len()`. Every point ends up in exactly one cluster;
/// an empty input gives an empty result.
pub fn k_means(rng: &mut impl RngExt, points: &[Point], k: usize) -> Vec<Cluster> {
    k_means_with(rng, points, k, &Options::default())
}

pub fn k_means_with(
    rng: &mut impl RngExt,
    points: &[Point],
    k: usize,
    options: &Options,
) -> Vec<Cluster> {
    let result = find_centroids(rng, points, k, options);
    assemble(points, &result)
}

/// Radius for drawing the cluster: 1.5x the mean member distance to the centroid.
pub fn calculate_cluster_radius(cluster: &Cluster) -> f64 {
    if cluster.points.is_empty() {
        return MIN_RADIUS;
    }

    let total: f64 = cluster
        .points
        .iter()
        .map(|p| p.position().distance(cluster.centroid))
        .sum();

    RADIUS_SCALE * total / cluster.points.len() as f64
}

pub fn cluster_for_point(clusters: &[Cluster], point_id: i64) -> Option<&Cluster> {
    clusters.iter().find(|c| c.contains(point_id))
}
