//! Evaluation metrics for estimated camera poses
//!
//! Compares estimated rotations, translations and translation directions with
//! ground truth, summarizes each error list, and writes the summaries to a
//! JSON report.

pub mod statistics;
pub mod alignment;
pub mod averaging;

pub use statistics::*;
pub use alignment::*;
pub use averaging::*;

use std::collections::BTreeMap;

/// Statistics of every metric, keyed by metric name
pub type MetricsDict = BTreeMap<String, ErrorStatistics>;
