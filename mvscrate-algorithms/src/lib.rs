//! # mvscrate Algorithms
//!
//! Geometric utilities used while densifying a sparse reconstruction.
//!
//! This crate computes triangulation angles between camera pairs, turns them
//! into view-selection weights, lifts coordinates to homogeneous form, and
//! estimates voxel sizes for simplifying colored point clouds.

pub mod triangulation;
pub mod view_selection;
pub mod homogeneous;
pub mod ellipsoid;
pub mod voxel;

// Re-export commonly used items
pub use triangulation::*;
pub use view_selection::*;
pub use homogeneous::*;
pub use ellipsoid::*;
pub use voxel::*;
