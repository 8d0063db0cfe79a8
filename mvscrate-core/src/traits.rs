//! Core traits for mvscrate

use crate::point::Point3d;
use nalgebra::Isometry3;

/// Anything that can report the position of a camera's optical center in
/// world coordinates.
///
/// This is the only camera capability the densification utilities need, so
/// they stay independent of any calibration or projection model.
pub trait CameraCenter {
    /// Camera center in world coordinates
    fn center(&self) -> Point3d;
}

/// A bare camera center.
impl CameraCenter for Point3d {
    fn center(&self) -> Point3d {
        *self
    }
}

/// A camera-to-world pose `wTc`; its translation is the camera center.
impl CameraCenter for Isometry3<f64> {
    fn center(&self) -> Point3d {
        Point3d::from(self.translation.vector)
    }
}

impl<T: CameraCenter + ?Sized> CameraCenter for &T {
    fn center(&self) -> Point3d {
        (**self).center()
    }
}
