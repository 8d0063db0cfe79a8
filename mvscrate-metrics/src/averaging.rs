//! Metrics for the rotation and translation averaging stages

use crate::alignment::align_poses;
use crate::statistics::{get_errors_statistics, ErrorStatistics};
use crate::MetricsDict;
use log::info;
use mvscrate_algorithms::unit_vector_angle_degrees;
use mvscrate_core::{CameraCenter, Error, Isometry3, Point3d, Result, UnitQuaternion, Vector3d};
use nalgebra::Translation3;
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// File written by [`save_averaging_metrics`] inside the output directory.
pub const AVERAGING_METRICS_FILE_NAME: &str = "multiview_optimizer_metrics.json";

/// Unit translation directions `i2Ui1`, keyed by image pair `(i1, i2)`.
pub type RelativeDirections = BTreeMap<(usize, usize), Vector3d>;

/// Angular error, in degrees, between paired rotations.
///
/// Assumes both lists are expressed in the same frame. Pairs with a missing
/// side produce a missing error.
pub fn compute_rotation_angle_metrics(
    estimated: &[Option<UnitQuaternion<f64>>],
    ground_truth: &[Option<UnitQuaternion<f64>>],
) -> ErrorStatistics {
    let errors: Vec<Option<f64>> = estimated
        .iter()
        .zip(ground_truth)
        .map(|(e, g)| match (e, g) {
            (Some(e), Some(g)) => Some(e.angle_to(g).to_degrees()),
            _ => None,
        })
        .collect();
    get_errors_statistics(&errors)
}

/// Euclidean distance between paired translations.
///
/// Assumes gauge freedom, scale included, has already been removed.
pub fn compute_translation_distance_metrics(
    estimated: &[Option<Point3d>],
    ground_truth: &[Option<Point3d>],
) -> ErrorStatistics {
    let errors: Vec<Option<f64>> = estimated
        .iter()
        .zip(ground_truth)
        .map(|(e, g)| match (e, g) {
            (Some(e), Some(g)) => Some((e - g).norm()),
            _ => None,
        })
        .collect();
    get_errors_statistics(&errors)
}

/// Angle, in degrees, between a measured direction `i2Ui1` and the direction
/// of camera `i1` seen from camera `i2` under the given poses.
///
/// Returns `None` when a pose is missing or the cameras coincide.
fn translation_to_direction_angle(
    i2_u_i1: &Vector3d,
    w_t_i2: &Isometry3<f64>,
    w_t_i1: &Isometry3<f64>,
) -> Option<f64> {
    let i2_t_i1 = w_t_i2.inverse() * w_t_i1;
    let estimated = i2_t_i1.translation.vector.try_normalize(0.0)?;
    let measured = i2_u_i1.try_normalize(0.0)?;
    Some(unit_vector_angle_degrees(&estimated, &measured))
}

/// Angular error between translation direction measurements and poses.
pub fn compute_translation_angle_metrics(
    directions: &RelativeDirections,
    poses: &[Option<Isometry3<f64>>],
) -> ErrorStatistics {
    let pose = |i: usize| poses.get(i).copied().flatten();
    let errors: Vec<Option<f64>> = directions
        .iter()
        .map(|(&(i1, i2), i2_u_i1)| {
            let (w_t_i1, w_t_i2) = (pose(i1)?, pose(i2)?);
            translation_to_direction_angle(i2_u_i1, &w_t_i2, &w_t_i1)
        })
        .collect();
    get_errors_statistics(&errors)
}

/// Statistics of the averaging metrics.
///
/// Estimated poses are assembled from the rotation and translation lists,
/// aligned onto ground truth, and compared. Produces the keys
/// `rotation_averaging_angle`, `translation_averaging_distance` and
/// `translation_to_direction_angle`.
///
/// # Errors
/// Returns [`Error::InvalidData`] if the three lists differ in length.
pub fn compute_averaging_metrics(
    directions: &RelativeDirections,
    rotations: &[Option<UnitQuaternion<f64>>],
    translations: &[Option<Point3d>],
    ground_truth: &[Option<Isometry3<f64>>],
) -> Result<MetricsDict> {
    if rotations.len() != translations.len() || rotations.len() != ground_truth.len() {
        return Err(Error::InvalidData(format!(
            "rotation, translation and ground truth lists must have the same length ({}, {}, {})",
            rotations.len(),
            translations.len(),
            ground_truth.len()
        )));
    }

    let estimated: Vec<Option<Isometry3<f64>>> = rotations
        .iter()
        .zip(translations)
        .map(|(r, t)| match (r, t) {
            (Some(r), Some(t)) => Some(Isometry3::from_parts(Translation3::from(t.coords), *r)),
            _ => None,
        })
        .collect();
    let aligned = align_poses(&estimated, ground_truth);

    let split = |poses: &[Option<Isometry3<f64>>]| -> (Vec<Option<UnitQuaternion<f64>>>, Vec<Option<Point3d>>) {
        poses
            .iter()
            .map(|p| (p.map(|p| p.rotation), p.map(|p| p.center())))
            .unzip()
    };
    let (aligned_rotations, aligned_translations) = split(&aligned[..]);
    let (gt_rotations, gt_translations) = split(ground_truth);

    let mut metrics = MetricsDict::new();
    metrics.insert(
        "rotation_averaging_angle".to_string(),
        compute_rotation_angle_metrics(&aligned_rotations, &gt_rotations),
    );
    metrics.insert(
        "translation_averaging_distance".to_string(),
        compute_translation_distance_metrics(&aligned_translations, &gt_translations),
    );
    metrics.insert(
        "translation_to_direction_angle".to_string(),
        compute_translation_angle_metrics(directions, &aligned),
    );
    Ok(metrics)
}

/// Compute the averaging metrics and write them as JSON to
/// [`AVERAGING_METRICS_FILE_NAME`] inside `output_dir`, creating the
/// directory if needed. Returns the path of the written file.
pub fn save_averaging_metrics<P: AsRef<Path>>(
    directions: &RelativeDirections,
    rotations: &[Option<UnitQuaternion<f64>>],
    translations: &[Option<Point3d>],
    ground_truth: &[Option<Isometry3<f64>>],
    output_dir: P,
) -> Result<PathBuf> {
    let metrics = compute_averaging_metrics(directions, rotations, translations, ground_truth)?;
    save_metrics(&metrics, output_dir.as_ref().join(AVERAGING_METRICS_FILE_NAME))
}

/// Write a metrics dictionary as pretty-printed JSON.
pub fn save_metrics<P: AsRef<Path>>(metrics: &MetricsDict, path: P) -> Result<PathBuf> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, metrics)?;
    writer.flush()?;

    info!("wrote {} metrics to {}", metrics.len(), path.display());
    Ok(path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use tempfile::tempdir;

    fn pose(x: f64, y: f64, z: f64, yaw: f64) -> Isometry3<f64> {
        Isometry3::from_parts(
            Translation3::new(x, y, z),
            UnitQuaternion::from_euler_angles(0.0, 0.0, yaw),
        )
    }

    fn ground_truth() -> Vec<Option<Isometry3<f64>>> {
        vec![
            Some(pose(0.0, 0.0, 0.0, 0.0)),
            Some(pose(2.0, 0.0, 0.0, 0.3)),
            Some(pose(0.0, 2.0, 1.0, -0.2)),
            Some(pose(1.0, 1.0, 3.0, 0.5)),
        ]
    }

    fn exact_directions(poses: &[Option<Isometry3<f64>>]) -> RelativeDirections {
        let mut directions = RelativeDirections::new();
        for (i1, i2) in [(0, 1), (1, 2), (0, 3)] {
            let (w_t_i1, w_t_i2) = (poses[i1].unwrap(), poses[i2].unwrap());
            let i2_t_i1 = w_t_i2.inverse() * w_t_i1;
            directions.insert((i1, i2), i2_t_i1.translation.vector.normalize());
        }
        directions
    }

    #[test]
    fn test_rotation_angle_metric() {
        let a = UnitQuaternion::from_euler_angles(0.0, 0.0, 0.0);
        let b = UnitQuaternion::from_euler_angles(0.0, 0.0, 10.0_f64.to_radians());
        let stats = compute_rotation_angle_metrics(&[Some(a), None], &[Some(b), Some(b)]);
        assert_relative_eq!(stats.max_error.unwrap(), 10.0, epsilon = 1e-9);
        assert_eq!(stats.errors_list[1], None);
    }

    #[test]
    fn test_translation_distance_metric() {
        let stats = compute_translation_distance_metrics(
            &[Some(Point3d::new(0.0, 0.0, 0.0)), Some(Point3d::new(1.0, 1.0, 1.0))],
            &[Some(Point3d::new(3.0, 4.0, 0.0)), Some(Point3d::new(1.0, 1.0, 1.0))],
        );
        assert_eq!(stats.max_error, Some(5.0));
        assert_eq!(stats.min_error, Some(0.0));
    }

    #[test]
    fn test_translation_angle_metric_exact_measurements() {
        let poses = ground_truth();
        let stats = compute_translation_angle_metrics(&exact_directions(&poses), &poses);
        assert_eq!(stats.errors_list.len(), 3);
        assert!(stats.max_error.unwrap() < 1e-6);
    }

    #[test]
    fn test_translation_angle_metric_missing_pose() {
        let mut poses = ground_truth();
        let directions = exact_directions(&poses);
        poses[3] = None;
        let stats = compute_translation_angle_metrics(&directions, &poses);
        assert_eq!(stats.errors_list.iter().filter(|e| e.is_none()).count(), 1);
    }

    #[test]
    fn test_averaging_metrics_after_gauge_change() {
        let truth = ground_truth();
        // Estimates differ from ground truth by a global rotation, scale and shift.
        let gauge = crate::Similarity {
            scale: 0.5,
            rotation: UnitQuaternion::from_euler_angles(0.4, 0.1, -0.7),
            translation: Vector3d::new(-3.0, 2.0, 1.0),
        };
        let estimated: Vec<Isometry3<f64>> =
            truth.iter().map(|p| gauge.transform_pose(&p.unwrap())).collect();
        let rotations: Vec<_> = estimated.iter().map(|p| Some(p.rotation)).collect();
        let translations: Vec<_> = estimated.iter().map(|p| Some(p.center())).collect();
        let estimated_options: Vec<_> = estimated.iter().copied().map(Some).collect();
        let directions = exact_directions(&estimated_options);

        let metrics = compute_averaging_metrics(&directions, &rotations, &translations, &truth).unwrap();
        assert_eq!(metrics.len(), 3);
        assert!(metrics["rotation_averaging_angle"].max_error.unwrap() < 1e-6);
        assert!(metrics["translation_averaging_distance"].max_error.unwrap() < 1e-6);
        assert!(metrics["translation_to_direction_angle"].max_error.unwrap() < 1e-6);
    }

    #[test]
    fn test_averaging_metrics_length_mismatch() {
        let result = compute_averaging_metrics(
            &RelativeDirections::new(),
            &[None, None],
            &[None],
            &[None, None],
        );
        assert!(matches!(result, Err(Error::InvalidData(_))));
    }

    #[test]
    fn test_save_averaging_metrics_writes_json() -> Result<()> {
        let dir = tempdir()?;
        let output_dir = dir.path().join("metrics");
        let truth = ground_truth();
        let rotations: Vec<_> = truth.iter().map(|p| p.map(|p| p.rotation)).collect();
        let translations: Vec<_> = truth.iter().map(|p| p.map(|p| p.center())).collect();

        let path = save_averaging_metrics(
            &exact_directions(&truth),
            &rotations,
            &translations,
            &truth,
            &output_dir,
        )?;
        assert_eq!(path, output_dir.join(AVERAGING_METRICS_FILE_NAME));

        let written: MetricsDict = serde_json::from_str(&std::fs::read_to_string(&path)?)?;
        assert_eq!(written.len(), 3);
        assert_eq!(written["rotation_averaging_angle"].errors_list.len(), 4);
        Ok(())
    }
}
