//! Summary statistics over error lists

use serde::{Deserialize, Serialize};

/// Minimum, maximum and median of a list of errors, along with the list.
///
/// Missing entries (`None`) stay in `errors_list` but are ignored by the
/// aggregates, which are `None` when no valid error exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorStatistics {
    pub min_error: Option<f64>,
    pub max_error: Option<f64>,
    pub median_error: Option<f64>,
    pub errors_list: Vec<Option<f64>>,
}

/// Compute min, max and median of the valid entries of `errors`.
pub fn get_errors_statistics(errors: &[Option<f64>]) -> ErrorStatistics {
    let mut valid: Vec<f64> = errors.iter().flatten().copied().collect();
    valid.sort_by(|a, b| a.total_cmp(b));

    ErrorStatistics {
        min_error: valid.first().copied(),
        max_error: valid.last().copied(),
        median_error: median_of_sorted(&valid),
        errors_list: errors.to_vec(),
    }
}

fn median_of_sorted(sorted: &[f64]) -> Option<f64> {
    let n = sorted.len();
    match n {
        0 => None,
        _ if n % 2 == 1 => Some(sorted[n / 2]),
        _ => Some((sorted[n / 2 - 1] + sorted[n / 2]) / 2.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_odd_count() {
        let stats = get_errors_statistics(&[Some(3.0), Some(1.0), Some(2.0)]);
        assert_eq!(stats.min_error, Some(1.0));
        assert_eq!(stats.max_error, Some(3.0));
        assert_eq!(stats.median_error, Some(2.0));
        assert_eq!(stats.errors_list, vec![Some(3.0), Some(1.0), Some(2.0)]);
    }

    #[test]
    fn test_even_count_median_is_midpoint() {
        let stats = get_errors_statistics(&[Some(4.0), Some(1.0), Some(2.0), Some(10.0)]);
        assert_eq!(stats.median_error, Some(3.0));
    }

    #[test]
    fn test_missing_entries_ignored() {
        let stats = get_errors_statistics(&[None, Some(5.0), None]);
        assert_eq!(stats.min_error, Some(5.0));
        assert_eq!(stats.max_error, Some(5.0));
        assert_eq!(stats.median_error, Some(5.0));
        assert_eq!(stats.errors_list.len(), 3);
    }

    #[test]
    fn test_no_valid_entries() {
        let stats = get_errors_statistics(&[None, None]);
        assert_eq!(stats.min_error, None);
        assert_eq!(stats.max_error, None);
        assert_eq!(stats.median_error, None);

        assert!(get_errors_statistics(&[]).errors_list.is_empty());
    }
}
