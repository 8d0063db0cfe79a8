//! Triangulation angles between camera pairs
//!
//! The triangulation angle of a point `X` seen by cameras with centers `C1`
//! and `C2` is the angle subtended at `X` by the rays `C1 -> X` and `C2 -> X`:
//!
//! ```text
//!        X
//!       / \
//!      /   \
//!     /     \
//!    C1      C2
//! ```
//!
//! Larger angles give better conditioned depth estimates.

use log::trace;
use mvscrate_core::{CameraCenter, Error, Point3d, Result, Vector3d};
use rayon::prelude::*;

/// Angle in degrees between two unit vectors.
///
/// The dot product is clipped to `[-1, 1]` before `acos`, since rounding can
/// push it just outside that range for (anti)parallel vectors.
pub fn unit_vector_angle_degrees(u1: &Vector3d, u2: &Vector3d) -> f64 {
    u1.dot(u2).clamp(-1.0, 1.0).acos().to_degrees()
}

/// Unit ray from `center` toward `point`.
///
/// Fails with [`Error::DegenerateGeometry`] when the point coincides with the
/// center or the ray is not finite.
fn unit_ray(center: &Point3d, point: &Point3d, index: usize) -> Result<Vector3d> {
    let ray = point - center;
    if !ray.iter().all(|v| v.is_finite()) {
        return Err(Error::DegenerateGeometry(format!(
            "ray toward point {index} is not finite"
        )));
    }

    ray.try_normalize(0.0).ok_or_else(|| {
        Error::DegenerateGeometry(format!("point {index} coincides with a camera center"))
    })
}

/// Triangulation angles, in degrees, for a batch of points seen by the same
/// pair of cameras.
///
/// Each entry of the output lies in `[0, 180]` and corresponds to the point at
/// the same index. The result is symmetric in the order of the two cameras.
///
/// # Errors
/// Returns [`Error::DegenerateGeometry`] if any point coincides with one of
/// the camera centers, since the ray toward it has no direction.
///
/// # Example
/// ```rust
/// use mvscrate_core::Point3d;
/// use mvscrate_algorithms::triangulation_angles_degrees;
///
/// fn main() -> mvscrate_core::Result<()> {
///     let c1 = Point3d::new(0.0, 0.0, 0.0);
///     let c2 = Point3d::new(1.0, 0.0, 0.0);
///     let points = vec![Point3d::new(0.0, 0.0, 10.0), Point3d::new(0.5, 0.0, 0.5)];
///
///     let angles = triangulation_angles_degrees(&c1, &c2, &points)?;
///     assert_eq!(angles.len(), 2);
///     assert!((angles[1] - 90.0).abs() < 1e-9);
///     Ok(())
/// }
/// ```
pub fn triangulation_angles_degrees<C1, C2>(
    camera_1: &C1,
    camera_2: &C2,
    points: &[Point3d],
) -> Result<Vec<f64>>
where
    C1: CameraCenter + ?Sized,
    C2: CameraCenter + ?Sized,
{
    let center_1 = camera_1.center();
    let center_2 = camera_2.center();

    trace!(
        "triangulation angles for {} points, centers {:?} / {:?}",
        points.len(),
        center_1,
        center_2
    );

    points
        .par_iter()
        .enumerate()
        .map(|(index, point)| {
            let ray_1 = unit_ray(&center_1, point, index)?;
            let ray_2 = unit_ray(&center_2, point, index)?;
            Ok(unit_vector_angle_degrees(&ray_1, &ray_2))
        })
        .collect()
}

/// Triangulation angle, in degrees, of a single point.
///
/// Equivalent to [`triangulation_angles_degrees`] on a one-element batch.
pub fn triangulation_angle_degrees<C1, C2>(
    camera_1: &C1,
    camera_2: &C2,
    point: &Point3d,
) -> Result<f64>
where
    C1: CameraCenter + ?Sized,
    C2: CameraCenter + ?Sized,
{
    let angles = triangulation_angles_degrees(camera_1, camera_2, std::slice::from_ref(point))?;
    Ok(angles[0])
}
