#[cfg(feature = "_debug")]
pub mod debug_helpers;
pub mod kmeans;
pub mod palette;
pub mod rng;
mod types;

pub use kmeans::elbow::{DEFAULT_MAX_K, FALLBACK_K};
pub use kmeans::{KMeans, Options, ReseedStrategy, calculate_cluster_radius, cluster_for_point};
pub use rgb::RGB8;
pub use types::{Centroid, Cluster, Point};

use snafu::prelude::*;
use std::collections::HashSet;

#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum InputPointsError {
    #[snafu(display("point list is empty"))]
    EmptyInput,

    #[snafu(display("point {id} has a non-finite coordinate ({latitude}, {longitude})"))]
    NonFiniteCoordinate {
        id: i64,
        latitude: f64,
        longitude: f64,
    },

    #[snafu(display("point id {id} appears more than once"))]
    DuplicateId { id: i64 },
}

/// A validated view over the points to cluster.
///
/// The functions in [`kmeans`] accept any slice and let NaN coordinates propagate
/// into the centroids. Going through `InputPoints` rejects such input up front.
#[derive(Debug, Copy, Clone)]
pub struct InputPoints<'a> {
    points: &'a [Point],
}

impl InputPoints<'_> {
    pub fn from_points(points: &[Point]) -> Result<InputPoints<'_>, InputPointsError> {
        ensure!(!points.is_empty(), EmptyInputSnafu);

        let mut seen = HashSet::with_capacity(points.len());
        for p in points {
            ensure!(
                p.latitude.is_finite() && p.longitude.is_finite(),
                NonFiniteCoordinateSnafu {
                    id: p.id,
                    latitude: p.latitude,
                    longitude: p.longitude,
                }
            );
            ensure!(seen.insert(p.id), DuplicateIdSnafu { id: p.id });
        }

        Ok(InputPoints { points })
    }

    pub fn points(&self) -> &[Point] {
        self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Mean position of all points, where a map showing them should be centred.
    pub fn center(&self) -> Centroid {
        let n = self.points.len() as f64;
        let (lat, lng) = self
            .points
            .iter()
            .fold((0.0, 0.0), |(lat, lng), p| (lat + p.latitude, lng + p.longitude));
        Centroid::new(lat / n, lng / n)
    }
}

impl<'a> TryFrom<&'a [Point]> for InputPoints<'a> {
    type Error = InputPointsError;

    fn try_from(points: &'a [Point]) -> Result<Self, Self::Error> {
        Self::from_points(points)
    }
}

/// Groups points into `k` micro-regions.
///
/// ```
/// use geocluster::{InputPoints, Point};
///
/// let points = [
///     Point::new(1, -8.05, -34.90),
///     Point::new(2, -8.06, -34.91),
///     Point::new(3, -7.10, -34.85),
///     Point::new(4, -7.11, -34.86),
/// ];
/// let input = InputPoints::from_points(&points).unwrap();
///
/// let clusters = geocluster::clusters(input, 2);
///
/// assert_eq!(clusters.len(), 2);
/// assert_eq!(clusters.iter().map(|c| c.points.len()).sum::<usize>(), 4);
/// ```
///
/// `k` is clamped to `1..=input.len()`. Runs are seeded with a fixed seed, so the
/// same input always yields the same clusters. Use [`kmeans::k_means`] to supply
/// a different generator.
pub fn clusters(input: InputPoints, k: usize) -> Vec<Cluster> {
    clusters_extra(input, k, &Options::default())
}

pub fn clusters_extra(input: InputPoints, k: usize, options: &Options) -> Vec<Cluster> {
    clusters_extra_debug(input, k, options).0
}

#[derive(Debug)]
pub struct DebugInfo {
    pub iterations: usize,
    pub converged: bool,
    pub wcss: f64,
}

pub fn clusters_extra_debug(
    input: InputPoints,
    k: usize,
    options: &Options,
) -> (Vec<Cluster>, DebugInfo) {
    let mut rng = rng::new();

    let result = kmeans::find_centroids(&mut rng, input.points, k, options);
    let clusters = kmeans::assemble(input.points, &result);
    let wcss = kmeans::elbow::wcss(&clusters);

    (
        clusters,
        DebugInfo {
            iterations: result.iterations,
            converged: result.converged,
            wcss,
        },
    )
}

/// Suggests a number of micro-regions with the elbow method, trying up to
/// [`DEFAULT_MAX_K`] clusters.
pub fn suggested_k(input: InputPoints) -> usize {
    suggested_k_extra(input, DEFAULT_MAX_K)
}

pub fn suggested_k_extra(input: InputPoints, max_k: usize) -> usize {
    let mut rng = rng::new();
    kmeans::elbow::suggest_optimal_k(&mut rng, input.points, max_k)
}
