//! Column statistics for outlier screening.

/// Mean and population standard deviation of one test column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnStats {
    pub count: usize,
    pub mean: f64,
    pub std_dev: f64,
}

impl ColumnStats {
    /// Compute stats over the present values of a column.
    ///
    /// Returns `None` for an empty column. The standard deviation is the
    /// population form (divide by n), matching the documented 3-sigma rule.
    pub fn compute(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        let count = values.len();
        let mean = values.iter().sum::<f64>() / count as f64;
        let variance = values
            .iter()
            .map(|v| {
                let d = v - mean;
                d * d
            })
            .sum::<f64>()
            / count as f64;
        Some(Self {
            count,
            mean,
            std_dev: variance.sqrt(),
        })
    }

    /// The `mean ± 3 sigma` interval.
    pub fn three_sigma_bounds(&self) -> (f64, f64) {
        (
            self.mean - 3.0 * self.std_dev,
            self.mean + 3.0 * self.std_dev,
        )
    }

    /// Whether a value falls outside the 3-sigma interval.
    pub fn is_outlier(&self, value: f64) -> bool {
        (value - self.mean).abs() > 3.0 * self.std_dev
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn population_std_not_sample_std() {
        let stats = ColumnStats::compute(&[2.0, 4.0]).unwrap();
        assert_eq!(stats.mean, 3.0);
        // Population std of [2, 4] is 1.0; the sample form would be ~1.414.
        assert!((stats.std_dev - 1.0).abs() < 1e-12);
    }

    #[test]
    fn empty_column_has_no_stats() {
        assert!(ColumnStats::compute(&[]).is_none());
    }

    #[test]
    fn identical_values_give_zero_sigma() {
        let stats = ColumnStats::compute(&[5.0, 5.0, 5.0]).unwrap();
        assert_eq!(stats.std_dev, 0.0);
        assert!(!stats.is_outlier(5.0));
    }
}
