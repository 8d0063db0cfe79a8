//! View selection weights
//!
//! A reference view is densified together with the source views whose
//! baseline angles are neither too small (poor depth accuracy) nor too large
//! (poor patch similarity). The preference is expressed by an asymmetric
//! Gaussian centred on a target angle, following the view selection
//! described for MVSNet (Yao et al., 2018).

use crate::triangulation::triangulation_angles_degrees;
use log::debug;
use mvscrate_core::{CameraCenter, Error, Point3d, Result};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Piecewise Gaussian preference for a baseline angle.
///
/// Uses `sigma_1` when `theta <= theta_0` and `sigma_2` otherwise, and returns
/// `exp(-(theta - theta_0)^2 / (2 sigma^2))`, a value in `(0, 1]` that is
/// exactly `1.0` at `theta_0`.
///
/// No validation happens here: both sigmas must be positive. Use
/// [`PiecewiseGaussian::new`] for a checked configuration.
pub fn piecewise_gaussian(theta: f64, theta_0: f64, sigma_1: f64, sigma_2: f64) -> f64 {
    let sigma = if theta <= theta_0 { sigma_1 } else { sigma_2 };
    (-(theta - theta_0).powi(2) / (2.0 * sigma * sigma)).exp()
}

/// Parameters of the piecewise Gaussian view weighting, in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PiecewiseGaussian {
    /// Preferred baseline angle.
    pub theta_0: f64,
    /// Spread for angles no larger than `theta_0`.
    pub sigma_1: f64,
    /// Spread for angles larger than `theta_0`.
    pub sigma_2: f64,
}

impl Default for PiecewiseGaussian {
    fn default() -> Self {
        Self {
            theta_0: 5.0,
            sigma_1: 1.0,
            sigma_2: 10.0,
        }
    }
}

impl PiecewiseGaussian {
    /// Create a weighting, rejecting spreads that are not finite and positive.
    pub fn new(theta_0: f64, sigma_1: f64, sigma_2: f64) -> Result<Self> {
        let weighting = Self {
            theta_0,
            sigma_1,
            sigma_2,
        };
        weighting.validate()?;
        Ok(weighting)
    }

    /// Check the parameters, e.g. after deserializing them.
    pub fn validate(&self) -> Result<()> {
        if !self.theta_0.is_finite() {
            return Err(Error::InvalidData("theta_0 must be finite".to_string()));
        }
        for (name, sigma) in [("sigma_1", self.sigma_1), ("sigma_2", self.sigma_2)] {
            if !(sigma.is_finite() && sigma > 0.0) {
                return Err(Error::InvalidData(format!(
                    "{name} must be finite and positive, got {sigma}"
                )));
            }
        }
        Ok(())
    }

    /// Preference score of a baseline angle given in degrees.
    pub fn score(&self, theta: f64) -> f64 {
        piecewise_gaussian(theta, self.theta_0, self.sigma_1, self.sigma_2)
    }
}

/// Configuration for ranking source views against a reference view.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewSelectionConfig {
    /// Angle preference applied to every shared point.
    pub weighting: PiecewiseGaussian,
    /// Maximum number of source views to keep.
    pub max_source_views: usize,
    /// Views scoring at or below this value are dropped.
    pub min_score: f64,
}

impl Default for ViewSelectionConfig {
    fn default() -> Self {
        Self {
            weighting: PiecewiseGaussian::default(),
            max_source_views: 4,
            min_score: 0.0,
        }
    }
}

/// Score of one candidate source view.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewScore {
    pub view_index: usize,
    pub score: f64,
}

/// Sum of the weighted triangulation angles of the points shared by two views.
pub fn score_view_pair<R, S>(
    reference: &R,
    source: &S,
    shared_points: &[Point3d],
    weighting: &PiecewiseGaussian,
) -> Result<f64>
where
    R: CameraCenter + ?Sized,
    S: CameraCenter + ?Sized,
{
    let angles = triangulation_angles_degrees(reference, source, shared_points)?;
    Ok(angles.iter().map(|&theta| weighting.score(theta)).sum())
}

/// Rank every other camera as a source view for `reference_index`.
///
/// `shared_points(reference, candidate)` returns the points observed by both
/// views. Candidates are scored with [`score_view_pair`], those not above
/// `config.min_score` are dropped, and the rest are returned best first (ties
/// broken by lower index), truncated to `config.max_source_views`.
pub fn rank_source_views<C, F>(
    reference_index: usize,
    cameras: &[C],
    shared_points: F,
    config: &ViewSelectionConfig,
) -> Result<Vec<ViewScore>>
where
    C: CameraCenter + Sync,
    F: Fn(usize, usize) -> Vec<Point3d> + Sync,
{
    if reference_index >= cameras.len() {
        return Err(Error::InvalidData(format!(
            "reference view {} out of range for {} cameras",
            reference_index,
            cameras.len()
        )));
    }
    config.weighting.validate()?;

    let reference = &cameras[reference_index];
    let scores: Vec<ViewScore> = cameras
        .par_iter()
        .enumerate()
        .filter(|(view_index, _)| *view_index != reference_index)
        .map(|(view_index, camera)| {
            let points = shared_points(reference_index, view_index);
            let score = score_view_pair(reference, camera, &points, &config.weighting)?;
            Ok(ViewScore { view_index, score })
        })
        .collect::<Result<_>>()?;

    let mut selected: Vec<ViewScore> = scores
        .into_iter()
        .filter(|s| s.score > config.min_score)
        .collect();
    selected.sort_by(|a, b| {
        b.score
            .total_cmp(&a.score)
            .then(a.view_index.cmp(&b.view_index))
    });
    selected.truncate(config.max_source_views);

    debug!(
        "view {}: selected source views {:?}",
        reference_index,
        selected.iter().map(|s| s.view_index).collect::<Vec<_>>()
    );

    Ok(selected)
}
