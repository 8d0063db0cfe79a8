//! # mvscrate
//!
//! Geometric utilities for the densification stage of a structure-from-motion
//! and multi-view stereo pipeline.
//!
//! This is the umbrella crate that provides convenient access to all mvscrate
//! functionality. You can use this crate to get everything in one place, or
//! use individual crates for more granular control over dependencies.
//!
//! ## Features
//!
//! - **Core**: points, colored point clouds, the camera center capability
//! - **Algorithms**: triangulation angles, view weighting, homogeneous
//!   coordinates, voxel size estimation and voxel downsampling
//! - **Metrics**: pose error statistics and JSON reports
//!
//! ## Quick Start
//!
//! ```rust
//! use mvscrate::prelude::*;
//!
//! let c1 = Point3d::new(0.0, 0.0, 0.0);
//! let c2 = Point3d::new(1.0, 0.0, 0.0);
//! let angle = triangulation_angle_degrees(&c1, &c2, &Point3d::new(0.0, 0.0, 10.0)).unwrap();
//! let weight = PiecewiseGaussian::default().score(angle);
//! assert!(weight > 0.9);
//! ```
//!
//! ## Feature Flags
//!
//! - `default`: Enables algorithms and metrics
//! - `algorithms`: Densification geometry utilities
//! - `metrics`: Pose metrics and persistence
//! - `all`: Enables all features

// Re-export core functionality
pub use mvscrate_core::*;

// Re-export sub-crates
#[cfg(feature = "algorithms")]
pub use mvscrate_algorithms as algorithms;

#[cfg(feature = "metrics")]
pub use mvscrate_metrics as metrics;

/// Convenient imports for common use cases
pub mod prelude {
    pub use mvscrate_core::*;

    #[cfg(feature = "algorithms")]
    pub use mvscrate_algorithms::*;

    #[cfg(feature = "metrics")]
    pub use mvscrate_metrics::*;
}
