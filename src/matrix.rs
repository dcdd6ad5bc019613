//! Dense all-pairs distance matrix over normalized node coordinates.

use crate::instance::Point;
use serde::{Deserialize, Serialize};

/// Distance function applied between node coordinates.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum DistanceMetric {
    /// True 2-D Euclidean distance, rounded to nearest integer. Canonical.
    Euclidean,
    /// The formula of the legacy converters: `round(sqrt(2 * dx^2))`,
    /// using only the x delta. Kept solely for bit-for-bit compatibility
    /// with PSA files they produced.
    LegacyXAxis,
}

impl DistanceMetric {
    /// Distance between two points under this metric.
    pub fn distance(self, a: Point, b: Point) -> i64 {
        let dx = (b.x - a.x) as f64;
        match self {
            DistanceMetric::Euclidean => {
                let dy = (b.y - a.y) as f64;
                (dx * dx + dy * dy).sqrt().round() as i64
            }
            DistanceMetric::LegacyXAxis => (2.0 * dx * dx).sqrt().round() as i64,
        }
    }
}

/// An N x N table of rounded distances; built once, never mutated.
#[derive(Debug, Clone)]
pub struct DistanceMatrix {
    entries: Vec<Vec<i64>>,
}

impl DistanceMatrix {
    /// Compute the full matrix densely. Instance sizes are tens to low
    /// hundreds of nodes, so no sparsity or caching is warranted.
    pub fn build(nodes: &[Point], metric: DistanceMetric) -> Self {
        let n = nodes.len();
        let mut entries = vec![vec![0i64; n]; n];

        for i in 0..n {
            for j in 0..n {
                if i != j {
                    entries[i][j] = metric.distance(nodes[i], nodes[j]);
                }
            }
        }

        DistanceMatrix { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn distance(&self, i: usize, j: usize) -> i64 {
        self.entries[i][j]
    }

    /// Rows in node-index order, for serialization.
    pub fn rows(&self) -> &[Vec<i64>] {
        &self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_euclidean_3_4_5() {
        let nodes = vec![Point::new(0, 0), Point::new(3, 0), Point::new(3, 4)];
        let m = DistanceMatrix::build(&nodes, DistanceMetric::Euclidean);

        assert_eq!(m.rows()[0], vec![0, 3, 5]);
        assert_eq!(m.rows()[1], vec![3, 0, 4]);
        assert_eq!(m.rows()[2], vec![5, 4, 0]);
    }

    #[test]
    fn test_diagonal_is_zero() {
        let nodes = vec![
            Point::new(1, 2),
            Point::new(30, 44),
            Point::new(500, 7),
            Point::new(12, 12),
        ];
        for metric in [DistanceMetric::Euclidean, DistanceMetric::LegacyXAxis] {
            let m = DistanceMatrix::build(&nodes, metric);
            for i in 0..m.len() {
                assert_eq!(m.distance(i, i), 0);
            }
        }
    }

    #[test]
    fn test_euclidean_rounds_to_nearest() {
        // sqrt(2) = 1.414... rounds down, sqrt(8) = 2.828... rounds up.
        assert_eq!(
            DistanceMetric::Euclidean.distance(Point::new(0, 0), Point::new(1, 1)),
            1
        );
        assert_eq!(
            DistanceMetric::Euclidean.distance(Point::new(0, 0), Point::new(2, 2)),
            3
        );
    }

    #[test]
    fn test_legacy_metric_ignores_y() {
        let a = Point::new(0, 0);
        // |dx| * sqrt(2), y contributes nothing.
        assert_eq!(DistanceMetric::LegacyXAxis.distance(a, Point::new(10, 999)), 14);
        assert_eq!(DistanceMetric::LegacyXAxis.distance(a, Point::new(10, 0)), 14);
        assert_eq!(DistanceMetric::LegacyXAxis.distance(a, Point::new(0, 999)), 0);
    }

    #[test]
    fn test_symmetry() {
        let nodes = vec![Point::new(2, 9), Point::new(41, 3), Point::new(17, 25)];
        let m = DistanceMatrix::build(&nodes, DistanceMetric::Euclidean);
        for i in 0..m.len() {
            for j in 0..m.len() {
                assert_eq!(m.distance(i, j), m.distance(j, i));
            }
        }
    }
}
