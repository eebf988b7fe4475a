use super::{Options, assemble, find_centroids};
use crate::types::{Cluster, Point};
use log::debug;
use rand::RngExt;

pub const DEFAULT_MAX_K: usize = 10;

/// Returned when the WCSS curve has no elbow. An arbitrary prior kept for compatibility.
pub const FALLBACK_K: usize = 3;

/// Inputs this small are never searched, the answer is their length.
const MIN_POINTS_FOR_SEARCH: usize = 4;

/// Within-cluster sum of squares of an existing clustering.
pub fn wcss(clusters: &[Cluster]) -> f64 {
    clusters.iter().map(Cluster::squared_error).sum()
}

/// WCSS of a fresh clustering run. Varies from call to call with the generator state.
pub fn calculate_wcss(rng: &mut impl RngExt, points: &[Point], k: usize) -> f64 {
    let result = find_centroids(rng, points, k, &Options::default());
    wcss(&assemble(points, &result))
}

/// WCSS for k = 1..=max_k, capped at the number of points.
pub fn wcss_curve(rng: &mut impl RngExt, points: &[Point], max_k: usize) -> Vec<f64> {
    (1..=max_k.min(points.len()))
        .map(|k| calculate_wcss(rng, points, k))
        .collect()
}

/// Index of the largest positive second difference over the interior of the curve.
pub fn elbow_index(wcss_values: &[f64]) -> Option<usize> {
    let mut max_diff = 0.0;
    let mut best = None;

    for i in 1..wcss_values.len().saturating_sub(1) {
        let diff = wcss_values[i - 1] - 2.0 * wcss_values[i] + wcss_values[i + 1];
        if diff > max_diff {
            max_diff = diff;
            best = Some(i);
        }
    }

    best
}

/// Elbow-method suggestion for the number of clusters.
pub fn suggest_optimal_k(rng: &mut impl RngExt, points: &[Point], max_k: usize) -> usize {
    suggest_optimal_k_with(points.len(), max_k, |k| calculate_wcss(rng, points, k))
}

/// Same as [`suggest_optimal_k`], with the WCSS evaluation supplied by the caller.
pub fn suggest_optimal_k_with(
    n: usize,
    max_k: usize,
    mut wcss_for: impl FnMut(usize) -> f64,
) -> usize {
    if n < MIN_POINTS_FOR_SEARCH {
        return n.max(1);
    }

    let wcss_values: Vec<f64> = (1..=search_limit(n, max_k)).map(&mut wcss_for).collect();
    suggest_from_curve(n, max_k, &wcss_values)
}

/// Suggestion read off an already computed curve, where `curve[i]` is the WCSS for
/// k = i + 1. Only the k = 1..=min(max_k, n / 2) prefix is considered.
pub fn suggest_from_curve(n: usize, max_k: usize, curve: &[f64]) -> usize {
    if n < MIN_POINTS_FOR_SEARCH {
        return n.max(1);
    }

    let test_k = search_limit(n, max_k).min(curve.len());
    let wcss_values = &curve[..test_k];

    let k = elbow_index(wcss_values).map_or(FALLBACK_K, |i| i + 1);
    debug!("elbow over {n} points, k=1..={test_k}: {wcss_values:?} -> k={k}");
    k
}

fn search_limit(n: usize, max_k: usize) -> usize {
    max_k.min(n / 2)
}
