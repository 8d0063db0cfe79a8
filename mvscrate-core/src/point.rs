//! Point types and related functionality

use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};

/// A 3D point with double precision coordinates
pub type Point3d = Point3<f64>;

/// A 3D vector with double precision components
pub type Vector3d = Vector3<f64>;

/// A point with a three channel color.
///
/// The color range and units are chosen by the caller; nothing in this
/// workspace converts between color spaces, colors are only averaged.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColoredPoint3d {
    pub position: Point3d,
    pub color: Vector3d,
}

impl ColoredPoint3d {
    pub fn new(position: Point3d, color: Vector3d) -> Self {
        Self { position, color }
    }
}

impl Default for ColoredPoint3d {
    fn default() -> Self {
        Self {
            position: Point3d::origin(),
            color: Vector3d::zeros(),
        }
    }
}
