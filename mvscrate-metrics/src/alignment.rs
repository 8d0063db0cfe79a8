//! Similarity alignment of estimated poses onto ground truth
//!
//! Reconstructions are only defined up to a similarity transform, so poses
//! are aligned before comparing them with ground truth.

use log::{debug, warn};
use mvscrate_core::{CameraCenter, Isometry3, Matrix3, Point3d, UnitQuaternion, Vector3d};
use nalgebra::{Rotation3, Translation3};

/// A similarity transform `x -> scale * rotation * x + translation`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Similarity {
    pub scale: f64,
    pub rotation: UnitQuaternion<f64>,
    pub translation: Vector3d,
}

impl Similarity {
    pub fn identity() -> Self {
        Self {
            scale: 1.0,
            rotation: UnitQuaternion::identity(),
            translation: Vector3d::zeros(),
        }
    }

    pub fn transform_point(&self, point: &Point3d) -> Point3d {
        Point3d::from(self.scale * (self.rotation * point.coords) + self.translation)
    }

    /// Map a camera-to-world pose into the target frame.
    pub fn transform_pose(&self, pose: &Isometry3<f64>) -> Isometry3<f64> {
        let center = self.transform_point(&pose.center());
        Isometry3::from_parts(
            Translation3::from(center.coords),
            self.rotation * pose.rotation,
        )
    }
}

impl Default for Similarity {
    fn default() -> Self {
        Self::identity()
    }
}

/// Least-squares similarity mapping `source` onto `target` (Umeyama, 1991).
///
/// Returns `None` for mismatched or too short inputs, or when the source
/// points all coincide.
pub fn estimate_similarity(source: &[Point3d], target: &[Point3d]) -> Option<Similarity> {
    if source.len() != target.len() || source.len() < 2 {
        return None;
    }
    let n = source.len() as f64;

    let mean_source = source.iter().fold(Vector3d::zeros(), |acc, p| acc + p.coords) / n;
    let mean_target = target.iter().fold(Vector3d::zeros(), |acc, p| acc + p.coords) / n;

    let mut source_variance = 0.0;
    let mut covariance = Matrix3::zeros();
    for (s, t) in source.iter().zip(target) {
        let ds = s.coords - mean_source;
        let dt = t.coords - mean_target;
        source_variance += ds.norm_squared();
        covariance += dt * ds.transpose();
    }
    source_variance /= n;
    covariance /= n;

    if source_variance <= f64::EPSILON {
        return None;
    }

    let svd = covariance.svd(true, true);
    let u = svd.u?;
    let v_t = svd.v_t?;

    let mut sign = Matrix3::identity();
    if u.determinant() * v_t.determinant() < 0.0 {
        sign[(2, 2)] = -1.0;
    }

    let rotation_matrix = u * sign * v_t;
    let scale = (svd.singular_values[0] * sign[(0, 0)]
        + svd.singular_values[1] * sign[(1, 1)]
        + svd.singular_values[2] * sign[(2, 2)])
        / source_variance;
    let translation = mean_target - scale * rotation_matrix * mean_source;

    Some(Similarity {
        scale,
        rotation: UnitQuaternion::from_rotation_matrix(&Rotation3::from_matrix_unchecked(
            rotation_matrix,
        )),
        translation,
    })
}

/// Align estimated camera-to-world poses onto ground truth.
///
/// The similarity is fitted to the camera centers of the entries present in
/// both lists. With fewer than two such pairs, or a degenerate fit, the
/// estimates are returned unchanged.
pub fn align_poses(
    estimated: &[Option<Isometry3<f64>>],
    ground_truth: &[Option<Isometry3<f64>>],
) -> Vec<Option<Isometry3<f64>>> {
    let (source, target): (Vec<Point3d>, Vec<Point3d>) = estimated
        .iter()
        .zip(ground_truth)
        .filter_map(|(e, g)| match (e, g) {
            (Some(e), Some(g)) => Some((e.center(), g.center())),
            _ => None,
        })
        .unzip();

    let Some(similarity) = estimate_similarity(&source, &target) else {
        warn!(
            "pose alignment skipped: {} usable pose pairs",
            source.len()
        );
        return estimated.to_vec();
    };

    debug!(
        "aligned {} poses with scale {}",
        source.len(),
        similarity.scale
    );

    estimated
        .iter()
        .map(|pose| pose.as_ref().map(|p| similarity.transform_pose(p)))
        .collect()
}
