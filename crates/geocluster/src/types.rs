use rgb::RGB8;

/// A located record to be clustered. Coordinates are treated as planar.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Point {
    pub id: i64,
    pub latitude: f64,
    pub longitude: f64,
}

impl Point {
    pub fn new(id: i64, latitude: f64, longitude: f64) -> Self {
        Self {
            id,
            latitude,
            longitude,
        }
    }

    #[inline(always)]
    pub fn position(self) -> Centroid {
        Centroid {
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Centroid {
    pub latitude: f64,
    pub longitude: f64,
}

impl Centroid {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    #[inline(always)]
    pub(crate) fn squared_distance(self, other: Self) -> f64 {
        let dlat = self.latitude - other.latitude;
        let dlng = self.longitude - other.longitude;
        // Unfused, so mirrored offsets give bit-identical distances
        dlat * dlat + dlng * dlng
    }

    #[inline(always)]
    pub fn distance(self, other: Self) -> f64 {
        self.squared_distance(other).sqrt()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Cluster {
    pub id: usize,
    pub centroid: Centroid,
    /// Member points, in input order.
    pub points: Vec<Point>,
    pub color: RGB8,
}

impl Cluster {
    pub fn contains(&self, point_id: i64) -> bool {
        self.points.iter().any(|p| p.id == point_id)
    }

    /// Sum of squared distances from the members to the centroid.
    pub fn squared_error(&self) -> f64 {
        self.points
            .iter()
            .map(|p| p.position().squared_distance(self.centroid))
            .sum()
    }
}
