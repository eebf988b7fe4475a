use crate::types::Point;
use rand::RngExt;

#[inline(always)]
fn sample_by_distance(rng: &mut impl RngExt, min_distances: &[f64], sum: f64) -> usize {
    let mut remaining = rng.random::<f64>() * sum;

    // All-zero weights stop on the first point
    for (i, &distance) in min_distances.iter().enumerate() {
        remaining -= distance;
        if remaining <= 0.0 {
            return i;
        }
    }

    // Rounding (or a NaN weight) left the wheel unresolved
    min_distances.len() - 1
}

/// K-means++ seeding. Returns the indices of the points picked as initial centroids.
///
/// The first index is uniform; each following one is drawn with probability
/// proportional to the squared distance to the nearest centroid picked so far.
pub fn find_initial(rng: &mut impl RngExt, points: &[Point], k: usize) -> Vec<usize> {
    let n = points.len();
    if n == 0 {
        return Vec::new();
    }

    // More clusters than points => silent clamping
    let k = k.clamp(1, n);

    let mut init_points = Vec::<usize>::with_capacity(k);
    let c0 = rng.random_range(0..n);
    init_points.push(c0);

    let c0 = points[c0].position();
    let mut min_distances: Vec<f64> = points
        .iter()
        .map(|p| p.position().squared_distance(c0))
        .collect();

    for _ in 1..k {
        let sum: f64 = min_distances.iter().sum();
        let next = sample_by_distance(rng, &min_distances, sum);
        init_points.push(next);

        let c = points[next].position();
        for (d, p) in min_distances.iter_mut().zip(points) {
            *d = d.min(p.position().squared_distance(c));
        }
    }

    init_points
}
