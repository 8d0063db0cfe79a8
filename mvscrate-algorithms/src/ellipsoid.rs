//! Principal-axis ellipsoid fit of a point cloud
//!
//! The semi-axis lengths reported here are the singular values of the
//! centered `N x 3` coordinate matrix `A`. They are obtained from the
//! eigen-decomposition of the constant size scatter matrix `AᵀA`, so the
//! cost beyond centering does not depend on the number of points.

use mvscrate_core::{Matrix3, Point3d, Vector3d};
use nalgebra::SymmetricEigen;

/// Axes of the best-fit ellipsoid of a centered point cloud.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrincipalAxes {
    /// Unit axis directions, one per column, matching `semi_axis_lengths`.
    pub directions: Matrix3<f64>,
    /// Semi-axis lengths sorted from largest to smallest.
    pub semi_axis_lengths: Vector3d,
}

impl PrincipalAxes {
    /// Length of the shortest semi-axis
    pub fn min_semi_axis(&self) -> f64 {
        self.semi_axis_lengths[2]
    }
}

/// Arithmetic mean of the points, or `None` for an empty slice.
pub fn centroid(points: &[Point3d]) -> Option<Point3d> {
    if points.is_empty() {
        return None;
    }
    let sum = points
        .iter()
        .fold(Vector3d::zeros(), |acc, p| acc + p.coords);
    Some(Point3d::from(sum / points.len() as f64))
}

/// Subtract the centroid from every point.
pub fn center_point_cloud(points: &[Point3d]) -> Vec<Vector3d> {
    match centroid(points) {
        Some(mean) => points.iter().map(|p| p - mean).collect(),
        None => Vec::new(),
    }
}

/// Principal axes of an already centered cloud.
pub fn principal_axes(centered: &[Vector3d]) -> PrincipalAxes {
    let scatter = centered
        .iter()
        .fold(Matrix3::zeros(), |acc, v| acc + v * v.transpose());

    let eigen = SymmetricEigen::new(scatter);

    let mut order = [0usize, 1, 2];
    order.sort_by(|&a, &b| eigen.eigenvalues[b].total_cmp(&eigen.eigenvalues[a]));

    let mut directions = Matrix3::zeros();
    let mut semi_axis_lengths = Vector3d::zeros();
    for (slot, &index) in order.iter().enumerate() {
        directions.set_column(slot, &eigen.eigenvectors.column(index));
        // Rounding can leave tiny negative eigenvalues on flat clouds.
        semi_axis_lengths[slot] = eigen.eigenvalues[index].max(0.0).sqrt();
    }

    PrincipalAxes {
        directions,
        semi_axis_lengths,
    }
}
