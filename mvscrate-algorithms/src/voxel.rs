//! Voxel size estimation and voxel grid downsampling
//!
//! Points are bucketed into a regular grid of cubic voxels and every occupied
//! voxel is replaced by one point carrying the mean position and mean color of
//! its members.

use crate::ellipsoid::{center_point_cloud, principal_axes};
use log::debug;
use mvscrate_core::{ColoredPoint3d, ColoredPointCloud3d, Error, Point3d, Result, Vector3d};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Default ratio between the shortest semi-axis and the voxel edge length.
pub const DEFAULT_VOXEL_SCALE: f64 = 0.02;

/// Integer coordinates of a voxel in a grid of edge length `voxel_size`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct VoxelKey {
    pub x: i64,
    pub y: i64,
    pub z: i64,
}

impl VoxelKey {
    /// Voxel containing `position`, i.e. `floor(position / voxel_size)` per axis.
    ///
    /// Returns `None` when a coordinate is not finite or its voxel index does
    /// not fit in an `i64`. `voxel_size` must be positive.
    pub fn from_position(position: &Point3d, voxel_size: f64) -> Option<Self> {
        Some(Self {
            x: voxel_index(position.x, voxel_size)?,
            y: voxel_index(position.y, voxel_size)?,
            z: voxel_index(position.z, voxel_size)?,
        })
    }
}

fn voxel_index(coordinate: f64, voxel_size: f64) -> Option<i64> {
    let index = (coordinate / voxel_size).floor();
    // i64::MAX as f64 rounds up to 2^63, which is already out of range.
    (index >= i64::MIN as f64 && index < i64::MAX as f64).then_some(index as i64)
}

#[derive(Debug, Clone, Copy)]
struct VoxelAccumulator {
    position_sum: Vector3d,
    color_sum: Vector3d,
    count: usize,
}

impl VoxelAccumulator {
    fn new() -> Self {
        Self {
            position_sum: Vector3d::zeros(),
            color_sum: Vector3d::zeros(),
            count: 0,
        }
    }

    fn add(&mut self, point: &ColoredPoint3d) {
        self.position_sum += point.position.coords;
        self.color_sum += point.color;
        self.count += 1;
    }

    fn mean(&self) -> ColoredPoint3d {
        let n = self.count as f64;
        ColoredPoint3d::new(Point3d::from(self.position_sum / n), self.color_sum / n)
    }
}

/// Estimate the voxel size for simplifying a point cloud by downsampling.
///
/// The cloud is centered, the semi-axes of its best-fit ellipsoid are
/// computed, and the shortest one is multiplied by `scale`. A larger scale
/// gives larger voxels and a more compressed cloud. Using the shortest axis
/// keeps the thinnest extent of the cloud from collapsing.
///
/// Returns `0.0` for fewer than two points, meaning "do not downsample".
pub fn estimate_minimum_voxel_size(points: &[Point3d], scale: f64) -> f64 {
    if points.len() < 2 {
        return 0.0;
    }

    let axes = principal_axes(&center_point_cloud(points));
    let voxel_size = axes.min_semi_axis() * scale;

    debug!(
        "semi-axes {:?} for {} points, voxel size {}",
        axes.semi_axis_lengths.as_slice(),
        points.len(),
        voxel_size
    );

    voxel_size
}

/// Voxel grid downsampling of a colored cloud.
///
/// Every occupied voxel yields exactly one point whose position and color are
/// the means of the points inside it, so the output never has more points
/// than the input. Output points are ordered by ascending [`VoxelKey`].
///
/// A `voxel_size` that is not positive (including NaN) leaves the cloud
/// unchanged.
///
/// # Errors
/// Returns [`Error::InvalidData`] naming the first point whose position is not
/// finite, or whose voxel index overflows `i64` for this `voxel_size`.
///
/// # Example
/// ```rust
/// use mvscrate_core::{ColoredPoint3d, ColoredPointCloud3d, Point3d, Vector3d};
/// use mvscrate_algorithms::voxel_downsample;
///
/// let cloud = ColoredPointCloud3d::from_points(vec![
///     ColoredPoint3d::new(Point3d::new(0.1, 0.1, 0.1), Vector3d::new(0.0, 0.0, 0.0)),
///     ColoredPoint3d::new(Point3d::new(0.3, 0.3, 0.3), Vector3d::new(10.0, 20.0, 30.0)),
///     ColoredPoint3d::new(Point3d::new(5.0, 5.0, 5.0), Vector3d::new(1.0, 1.0, 1.0)),
/// ]);
///
/// let downsampled = voxel_downsample(&cloud, 1.0).unwrap();
/// assert_eq!(downsampled.len(), 2);
/// assert_eq!(downsampled[0].color, Vector3d::new(5.0, 10.0, 15.0));
/// ```
pub fn voxel_downsample(
    cloud: &ColoredPointCloud3d,
    voxel_size: f64,
) -> Result<ColoredPointCloud3d> {
    if !(voxel_size > 0.0) {
        return Ok(cloud.clone());
    }

    let mut voxels: BTreeMap<VoxelKey, VoxelAccumulator> = BTreeMap::new();
    for (index, point) in cloud.iter().enumerate() {
        if !point.position.coords.iter().all(|c| c.is_finite()) {
            return Err(Error::InvalidData(format!(
                "point {index} has non-finite position {:?}",
                point.position.coords.as_slice()
            )));
        }
        let key = VoxelKey::from_position(&point.position, voxel_size).ok_or_else(|| {
            Error::InvalidData(format!(
                "point {index} is outside the voxel index range for voxel size {voxel_size}"
            ))
        })?;
        voxels
            .entry(key)
            .or_insert_with(VoxelAccumulator::new)
            .add(point);
    }

    let downsampled: ColoredPointCloud3d = voxels.values().map(VoxelAccumulator::mean).collect();

    debug!(
        "voxel downsampling with size {}: {} -> {} points",
        voxel_size,
        cloud.len(),
        downsampled.len()
    );

    Ok(downsampled)
}

/// Voxel grid downsampling of parallel position and color arrays.
///
/// See [`voxel_downsample`]. A non-positive `voxel_size` returns copies of the
/// inputs.
///
/// # Errors
/// Returns [`Error::InvalidData`] if `positions` and `colors` differ in length,
/// or for the positions [`voxel_downsample`] rejects.
pub fn downsample_point_cloud(
    positions: &[Point3d],
    colors: &[Vector3d],
    voxel_size: f64,
) -> Result<(Vec<Point3d>, Vec<Vector3d>)> {
    let cloud = ColoredPointCloud3d::from_parallel(positions, colors)?;
    if !(voxel_size > 0.0) {
        return Ok((positions.to_vec(), colors.to_vec()));
    }
    Ok(voxel_downsample(&cloud, voxel_size)?.into_parallel())
}

/// Shape-aware point cloud simplification: estimate a voxel size from the
/// cloud itself, then downsample with it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CloudSimplifier {
    /// Ratio between the shortest semi-axis and the voxel edge length.
    pub scale: f64,
    /// Lower bound applied to the estimated voxel size, `0.0` for none.
    pub min_voxel_size: f64,
}

impl Default for CloudSimplifier {
    fn default() -> Self {
        Self {
            scale: DEFAULT_VOXEL_SCALE,
            min_voxel_size: 0.0,
        }
    }
}

impl CloudSimplifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_params(scale: f64, min_voxel_size: f64) -> Result<Self> {
        if !(scale.is_finite() && scale >= 0.0) {
            return Err(Error::InvalidData(format!(
                "scale must be finite and non-negative, got {scale}"
            )));
        }
        if !(min_voxel_size.is_finite() && min_voxel_size >= 0.0) {
            return Err(Error::InvalidData(format!(
                "min_voxel_size must be finite and non-negative, got {min_voxel_size}"
            )));
        }
        Ok(Self {
            scale,
            min_voxel_size,
        })
    }

    /// Voxel size this simplifier would use for `cloud`.
    ///
    /// Clouds with fewer than two points always get `0.0`; otherwise the
    /// estimate is raised to `min_voxel_size`.
    pub fn voxel_size(&self, cloud: &ColoredPointCloud3d) -> f64 {
        if cloud.len() < 2 {
            return 0.0;
        }
        estimate_minimum_voxel_size(&cloud.positions(), self.scale).max(self.min_voxel_size)
    }

    /// Downsample `cloud` with its estimated voxel size.
    ///
    /// # Errors
    /// See [`voxel_downsample`].
    pub fn simplify(&self, cloud: &ColoredPointCloud3d) -> Result<ColoredPointCloud3d> {
        voxel_downsample(cloud, self.voxel_size(cloud))
    }
}
