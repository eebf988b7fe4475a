use crate::types::{Centroid, Point};
use log::trace;
use rand::RngExt;

/// What to do with a centroid that ended an update step with no points.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum ReseedStrategy {
    /// Move it onto a uniformly random point of the whole input.
    #[default]
    RandomPoint,
    /// Move it onto the point farthest from its current centroid.
    FarthestPoint,
}

impl ReseedStrategy {
    /// Index of the point an empty cluster should move to. `exclude` holds points
    /// already used by earlier reseeds in the same step.
    pub fn pick(
        self,
        rng: &mut impl RngExt,
        points: &[Point],
        centroids: &[Centroid],
        assignments: &[usize],
        exclude: &[usize],
    ) -> usize {
        match self {
            ReseedStrategy::RandomPoint => random_point(rng, points),
            ReseedStrategy::FarthestPoint => {
                farthest_point(points, centroids, assignments, exclude)
            }
        }
    }
}

#[inline]
pub fn random_point(rng: &mut impl RngExt, points: &[Point]) -> usize {
    rng.random_range(0..points.len())
}

pub fn farthest_point(
    points: &[Point],
    centroids: &[Centroid],
    assignments: &[usize],
    exclude: &[usize],
) -> usize {
    let mut max = f64::NEG_INFINITY;
    let mut max_idx = 0;
    for (i, (p, &c)) in points.iter().zip(assignments).enumerate() {
        if exclude.contains(&i) {
            continue;
        }
        let d = p.position().squared_distance(centroids[c]);
        if d > max {
            max = d;
            max_idx = i;
        }
    }
    max_idx
}

/// Labels every point with its nearest centroid. Ties go to the lowest index.
#[inline]
pub fn assign_points(points: &[Point], centroids: &[Centroid], assignments: &mut [usize]) {
    assert_eq!(points.len(), assignments.len());

    for (point, assignment) in points.iter().zip(assignments.iter_mut()) {
        let position = point.position();
        let mut min = f64::INFINITY;
        let mut min_idx = 0;
        for (j, &centroid) in centroids.iter().enumerate() {
            let d = position.distance(centroid);
            if d < min {
                min = d;
                min_idx = j;
            }
        }

        *assignment = min_idx;
    }
}

#[derive(Debug)]
pub struct UpdateResult {
    /// New centroids. Clusters with no points keep their previous position.
    pub centroids: Vec<Centroid>,
    pub counts: Vec<usize>,
}

#[inline]
pub fn update_centroids(
    points: &[Point],
    previous: &[Centroid],
    assignments: &[usize],
) -> UpdateResult {
    let k = previous.len();
    let mut counts = vec![0usize; k];
    let mut sums_lat = vec![0f64; k];
    let mut sums_lng = vec![0f64; k];

    for (point, &assigned_c) in points.iter().zip(assignments) {
        assert!(assigned_c < k);

        counts[assigned_c] += 1;
        sums_lat[assigned_c] += point.latitude;
        sums_lng[assigned_c] += point.longitude;
    }

    let centroids = (0..k)
        .map(|i| {
            if counts[i] == 0 {
                previous[i]
            } else {
                let n = counts[i] as f64;
                Centroid::new(sums_lat[i] / n, sums_lng[i] / n)
            }
        })
        .collect();

    UpdateResult { centroids, counts }
}

pub fn has_converged(old: &[Centroid], new: &[Centroid], threshold: f64) -> bool {
    old.iter()
        .zip(new)
        .all(|(&o, &n)| o.distance(n) < threshold)
}

#[derive(Debug)]
pub struct LloydsLoopResult {
    pub iterations: usize,
    pub converged: bool,
}

pub fn lloyds_loop(
    rng: &mut impl RngExt,
    points: &[Point],
    centroids: &mut Vec<Centroid>,
    assignments: &mut [usize],
    max_iterations: usize,
    convergence_threshold: f64,
    reseed: ReseedStrategy,
) -> LloydsLoopResult {
    assert_eq!(points.len(), assignments.len());
    assert!(!points.is_empty());
    assert!(!centroids.is_empty());
    assert!(centroids.len() <= points.len());

    // At least one pass, otherwise there is no assignment to build clusters from
    let max_iterations = max_iterations.max(1);

    for i in 0..max_iterations {
        assign_points(points, centroids, assignments);
        let UpdateResult {
            centroids: mut new_centroids,
            counts,
        } = update_centroids(points, centroids, assignments);

        let mut reseeded = Vec::new();
        for (c, _) in counts.iter().enumerate().filter(|&(_, &count)| count == 0) {
            let p = reseed.pick(rng, points, centroids, assignments, &reseeded);
            trace!("cluster {c} is empty, reseeding onto point {}", points[p].id);
            new_centroids[c] = points[p].position();
            reseeded.push(p);
        }

        let converged = has_converged(centroids, &new_centroids, convergence_threshold);
        *centroids = new_centroids;

        if converged {
            return LloydsLoopResult {
                iterations: i + 1,
                converged: true,
            };
        }
    }

    LloydsLoopResult {
        iterations: max_iterations,
        converged: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng;
    use pretty_assertions::assert_eq;

    const N_PER_CLUSTER: usize = 64;
    const CENTERS: [(f64, f64); 3] = [(0.0, 0.0), (10.0, 0.0), (0.0, 10.0)];

    fn make_three_cluster_points() -> Vec<Point> {
        let mut points = Vec::with_capacity(N_PER_CLUSTER * CENTERS.len());
        for &(lat, lng) in &CENTERS {
            for i in 0..N_PER_CLUSTER {
                let offset = i as f64 * 0.001;
                points.push(Point::new(points.len() as i64, lat + offset, lng + offset));
            }
        }
        points
    }

    fn centers() -> Vec<Centroid> {
        CENTERS
            .iter()
            .map(|&(lat, lng)| Centroid::new(lat, lng))
            .collect()
    }

    #[test]
    fn test_assign_points() {
        let points = make_three_cluster_points();
        let mut assignments = vec![usize::MAX; points.len()];
        assign_points(&points, &centers(), &mut assignments);

        for ci in 0..CENTERS.len() {
            let start = ci * N_PER_CLUSTER;
            let end = start + N_PER_CLUSTER;
            assert!(
                assignments[start..end].iter().all(|&a| a == ci),
                "cluster {ci}: not all points assigned to their own centroid",
            );
        }
    }

    #[test]
    fn ties_go_to_lower_index() {
        // (0, 0) is equidistant from both centroids, in either order
        let points = [Point::new(1, 0.0, 0.0)];
        let mut assignments = [usize::MAX];

        let centroids = [Centroid::new(1.0, 0.0), Centroid::new(-1.0, 0.0)];
        assign_points(&points, &centroids, &mut assignments);
        assert_eq!(assignments, [0]);

        let centroids = [Centroid::new(-1.0, 0.0), Centroid::new(1.0, 0.0)];
        assign_points(&points, &centroids, &mut assignments);
        assert_eq!(assignments, [0]);

        let centroids = [
            Centroid::new(5.0, 5.0),
            Centroid::new(0.0, 2.0),
            Centroid::new(2.0, 0.0),
        ];
        assign_points(&points, &centroids, &mut assignments);
        assert_eq!(assignments, [1]);
    }

    #[test]
    fn mirrored_ties_go_to_lower_index() {
        let points = [Point::new(1, 0.0, 0.0)];
        let mut assignments = [usize::MAX];

        let (a, b) = (0.23367498862388103, 0.9127448148334324);
        let centroids = [Centroid::new(a, b), Centroid::new(b, a)];
        assign_points(&points, &centroids, &mut assignments);
        assert_eq!(assignments, [0]);

        let mut rng = rng::new();
        for _ in 0..10_000 {
            let a = rng.random::<f64>();
            let b = rng.random::<f64>();
            let centroids = [Centroid::new(a, b), Centroid::new(b, a)];
            assign_points(&points, &centroids, &mut assignments);
            assert_eq!(assignments, [0], "({a}, {b}) and ({b}, {a})");
        }
    }

    #[test]
    fn test_update_centroids() {
        let points = make_three_cluster_points();
        let assignments: Vec<usize> = (0..points.len()).map(|i| i / N_PER_CLUSTER).collect();
        let previous = vec![Centroid::new(99.0, 99.0); CENTERS.len()];

        let result = update_centroids(&points, &previous, &assignments);

        // Offsets are 0..64 * 0.001, so the mean offset is 0.0315
        for (i, &(lat, lng)) in CENTERS.iter().enumerate() {
            assert!((result.centroids[i].latitude - (lat + 0.0315)).abs() < 1e-9);
            assert!((result.centroids[i].longitude - (lng + 0.0315)).abs() < 1e-9);
        }
        assert_eq!(result.counts, vec![N_PER_CLUSTER; CENTERS.len()]);
    }

    #[test]
    fn empty_cluster_keeps_previous_position() {
        let points = [Point::new(1, 1.0, 1.0), Point::new(2, 3.0, 3.0)];
        let previous = [Centroid::new(2.0, 2.0), Centroid::new(50.0, 50.0)];
        let result = update_centroids(&points, &previous, &[0, 0]);

        assert_eq!(result.counts, vec![2, 0]);
        assert_eq!(result.centroids[0], Centroid::new(2.0, 2.0));
        assert_eq!(result.centroids[1], Centroid::new(50.0, 50.0));
    }

    #[test]
    fn convergence_threshold_is_per_centroid() {
        let old = [Centroid::new(0.0, 0.0), Centroid::new(1.0, 1.0)];
        let small = [Centroid::new(0.00005, 0.0), Centroid::new(1.0, 1.00005)];
        let one_moved = [Centroid::new(0.0, 0.0), Centroid::new(1.0, 1.001)];

        assert!(has_converged(&old, &old, 0.0001));
        assert!(has_converged(&old, &small, 0.0001));
        assert!(!has_converged(&old, &one_moved, 0.0001));
    }

    #[test]
    fn farthest_point_reseed() {
        let points = [
            Point::new(1, 0.0, 0.0),
            Point::new(2, 0.5, 0.0),
            Point::new(3, 9.0, 0.0),
            Point::new(4, 10.0, 0.0),
        ];
        let centroids = [Centroid::new(0.0, 0.0), Centroid::new(0.0, 0.0)];
        let assignments = [0, 0, 0, 0];

        assert_eq!(farthest_point(&points, &centroids, &assignments, &[]), 3);
        assert_eq!(farthest_point(&points, &centroids, &assignments, &[3]), 2);
    }

    #[test]
    fn random_point_reseed_stays_in_range() {
        let mut rng = rng::new();
        let points = make_three_cluster_points();
        for _ in 0..100 {
            let i = ReseedStrategy::RandomPoint.pick(&mut rng, &points, &[], &[], &[]);
            assert!(i < points.len());
        }
    }

    #[test]
    fn loop_converges_from_true_centers() {
        let mut rng = rng::new();
        let points = make_three_cluster_points();
        let mut centroids = centers();
        let mut assignments = vec![0; points.len()];

        let result = lloyds_loop(
            &mut rng,
            &points,
            &mut centroids,
            &mut assignments,
            100,
            0.0001,
            ReseedStrategy::RandomPoint,
        );

        assert!(result.converged);
        assert_eq!(result.iterations, 2);
        for (i, &(lat, lng)) in CENTERS.iter().enumerate() {
            assert!((centroids[i].latitude - (lat + 0.0315)).abs() < 1e-9);
            assert!((centroids[i].longitude - (lng + 0.0315)).abs() < 1e-9);
        }
    }

    #[test]
    fn loop_reseeds_empty_clusters() {
        let mut rng = rng::new();
        let points = make_three_cluster_points();
        // Centroid 1 starts far from everything and owns no points on the first pass
        let mut centroids = vec![Centroid::new(0.0, 0.0), Centroid::new(1000.0, 1000.0)];
        let mut assignments = vec![0; points.len()];

        lloyds_loop(
            &mut rng,
            &points,
            &mut centroids,
            &mut assignments,
            100,
            0.0001,
            ReseedStrategy::FarthestPoint,
        );

        assert!(centroids[1].latitude < 100.0);
        assert!(assignments.contains(&1));
    }

    #[test]
    fn zero_iterations_still_assigns() {
        let mut rng = rng::new();
        let points = make_three_cluster_points();
        let mut centroids = centers();
        let mut assignments = vec![usize::MAX; points.len()];

        let result = lloyds_loop(
            &mut rng,
            &points,
            &mut centroids,
            &mut assignments,
            0,
            0.0001,
            ReseedStrategy::RandomPoint,
        );

        assert_eq!(result.iterations, 1);
        assert!(assignments.iter().all(|&a| a < CENTERS.len()));
    }
}
