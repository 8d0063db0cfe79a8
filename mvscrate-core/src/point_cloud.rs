//! Point cloud data structures and functionality

use crate::error::{Error, Result};
use crate::point::*;
use serde::{Deserialize, Serialize};
use std::ops::Index;

/// A generic point cloud container
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointCloud<T> {
    pub points: Vec<T>,
}

/// A point cloud of bare positions
pub type PointCloud3d = PointCloud<Point3d>;

/// A point cloud whose points carry a color
pub type ColoredPointCloud3d = PointCloud<ColoredPoint3d>;

impl<T> PointCloud<T> {
    /// Create a new empty point cloud
    pub fn new() -> Self {
        Self { points: Vec::new() }
    }

    /// Create a new point cloud with specified capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            points: Vec::with_capacity(capacity),
        }
    }

    /// Create a point cloud from a vector of points
    pub fn from_points(points: Vec<T>) -> Self {
        Self { points }
    }

    /// Get the number of points in the cloud
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if the point cloud is empty
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Add a point to the cloud
    pub fn push(&mut self, point: T) {
        self.points.push(point);
    }

    /// Get an iterator over the points
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.points.iter()
    }
}

impl<T> Default for PointCloud<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Index<usize> for PointCloud<T> {
    type Output = T;

    fn index(&self, index: usize) -> &Self::Output {
        &self.points[index]
    }
}

impl<T> IntoIterator for PointCloud<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a PointCloud<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

impl<T> FromIterator<T> for PointCloud<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            points: Vec::from_iter(iter),
        }
    }
}

impl PointCloud<ColoredPoint3d> {
    /// Build a colored cloud from parallel position and color arrays.
    ///
    /// Fails with [`Error::InvalidData`] when the two arrays differ in length.
    pub fn from_parallel(positions: &[Point3d], colors: &[Vector3d]) -> Result<Self> {
        if positions.len() != colors.len() {
            return Err(Error::InvalidData(format!(
                "positions and colors must have the same length ({} != {})",
                positions.len(),
                colors.len()
            )));
        }

        Ok(positions
            .iter()
            .zip(colors)
            .map(|(&position, &color)| ColoredPoint3d::new(position, color))
            .collect())
    }

    /// Positions of all points, in cloud order
    pub fn positions(&self) -> Vec<Point3d> {
        self.points.iter().map(|p| p.position).collect()
    }

    /// Colors of all points, in cloud order
    pub fn colors(&self) -> Vec<Vector3d> {
        self.points.iter().map(|p| p.color).collect()
    }

    /// Split the cloud back into parallel position and color arrays
    pub fn into_parallel(self) -> (Vec<Point3d>, Vec<Vector3d>) {
        self.points
            .into_iter()
            .map(|p| (p.position, p.color))
            .unzip()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_parallel_keeps_pairs() {
        let positions = vec![Point3d::new(0.0, 0.0, 0.0), Point3d::new(1.0, 2.0, 3.0)];
        let colors = vec![Vector3d::new(255.0, 0.0, 0.0), Vector3d::new(0.0, 255.0, 0.0)];

        let cloud = ColoredPointCloud3d::from_parallel(&positions, &colors).unwrap();
        assert_eq!(cloud.len(), 2);
        assert_eq!(cloud[1].position, positions[1]);
        assert_eq!(cloud[1].color, colors[1]);

        let (p, c) = cloud.into_parallel();
        assert_eq!(p, positions);
        assert_eq!(c, colors);
    }

    #[test]
    fn test_from_parallel_length_mismatch() {
        let positions = vec![Point3d::origin(); 3];
        let colors = vec![Vector3d::zeros(); 2];
        let result = ColoredPointCloud3d::from_parallel(&positions, &colors);
        assert!(matches!(result, Err(Error::InvalidData(_))));
    }

    #[test]
    fn test_empty_cloud() {
        let cloud = ColoredPointCloud3d::new();
        assert!(cloud.is_empty());
        assert!(cloud.positions().is_empty());
        assert!(cloud.colors().is_empty());
    }
}
