use crate::types::{Direction, Point, UnsignedAxis};
use nalgebra::Matrix3;
use serde::Serialize;

/// One eigenvalue with its unit eigenvector.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct EigenPair {
    pub value: f64,
    pub vector: Direction,
}

/// Covariance matrix of a cloud and its eigen-decomposition.
///
/// `eigen` is sorted by descending eigenvalue. Eigenvector signs follow a
/// fixed convention (largest-magnitude component positive) and carry no
/// physical meaning.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CovarianceResult {
    pub matrix: Matrix3<f64>,
    pub eigen: [EigenPair; 3],
    /// Number of points that contributed to the matrix.
    pub point_count: usize,
    pub centroid: Point,
}

impl CovarianceResult {
    pub fn eigenvalues(&self) -> [f64; 3] {
        [self.eigen[0].value, self.eigen[1].value, self.eigen[2].value]
    }

    pub fn eigenvectors(&self) -> [Direction; 3] {
        [self.eigen[0].vector, self.eigen[1].vector, self.eigen[2].vector]
    }

    /// Axis through the centroid along the leading eigenvector.
    pub fn principal_axis(&self) -> UnsignedAxis {
        UnsignedAxis::new(self.centroid, self.eigen[0].vector)
    }
}
