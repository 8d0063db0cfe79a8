//! Core data structures and traits for mvscrate
//!
//! This crate provides the fundamental types shared by the densification
//! utilities: double precision points, colored point clouds, the camera
//! center capability and the common error type.

pub mod point;
pub mod point_cloud;
pub mod traits;
pub mod error;

pub use point::*;
pub use point_cloud::*;
pub use traits::*;
pub use error::*;

/// Re-export commonly used types from nalgebra
pub use nalgebra::{Point3, Vector3, Matrix3, Isometry3, UnitQuaternion};

// Type aliases for easier imports
pub type Point = Point3d;
pub type ColoredPointCloud = ColoredPointCloud3d;
