//! Summary statistics for a numeric sample
//!
//! Provides the descriptive statistics used by the reports:
//! - Mean, population and sample standard deviation
//! - Min, max, median

use serde::{Deserialize, Serialize};

/// Summary statistics for a numeric sample
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryStats {
    /// Number of finite values
    pub count: usize,
    /// Number of non-finite values that were skipped
    pub missing: usize,
    /// Minimum value
    pub min: f64,
    /// Maximum value
    pub max: f64,
    /// Mean (average)
    pub mean: f64,
    /// Population standard deviation (divides by n)
    pub std_dev: f64,
    /// Sample standard deviation (divides by n - 1), absent for fewer than two values
    pub sample_std_dev: Option<f64>,
    /// Median (50th percentile)
    pub median: f64,
}

impl SummaryStats {
    /// Compute summary statistics from data
    ///
    /// Non-finite values are counted as missing and excluded.
    pub fn from_data(data: &[f64]) -> Self {
        let finite: Vec<f64> = data.iter().copied().filter(|x| x.is_finite()).collect();
        let missing = data.len() - finite.len();

        if finite.is_empty() {
            return Self::empty(missing);
        }

        let count = finite.len();
        let mean = mean(&finite);
        let sum_sq: f64 = finite.iter().map(|x| (x - mean).powi(2)).sum();
        let std_dev = (sum_sq / count as f64).sqrt();
        let sample_std_dev = (count > 1).then(|| (sum_sq / (count - 1) as f64).sqrt());

        let min = finite.iter().copied().fold(f64::INFINITY, f64::min);
        let max = finite.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        let mut sorted = finite;
        sorted.sort_by(f64::total_cmp);
        let median = percentile_sorted(&sorted, 50.0);

        Self {
            count,
            missing,
            min,
            max,
            mean,
            std_dev,
            sample_std_dev,
            median,
        }
    }

    /// Create empty statistics (all NaN)
    fn empty(missing: usize) -> Self {
        Self {
            count: 0,
            missing,
            min: f64::NAN,
            max: f64::NAN,
            mean: f64::NAN,
            std_dev: f64::NAN,
            sample_std_dev: None,
            median: f64::NAN,
        }
    }

    /// Get the range (max - min)
    pub fn range(&self) -> f64 {
        self.max - self.min
    }

    /// Whether a z-score is defined for this sample
    ///
    /// False for empty samples and for zero or non-finite spread.
    pub fn has_spread(&self) -> bool {
        self.count > 0 && self.std_dev.is_finite() && self.std_dev > 0.0
    }

    /// Compute the z-score for a value, `None` when the sample has no spread
    pub fn zscore(&self, x: f64) -> Option<f64> {
        self.has_spread().then(|| (x - self.mean) / self.std_dev)
    }
}

/// Arithmetic mean; NaN for an empty slice
pub fn mean(data: &[f64]) -> f64 {
    if data.is_empty() {
        return f64::NAN;
    }
    data.iter().sum::<f64>() / data.len() as f64
}

/// Percentile of an ascending-sorted slice using linear interpolation
/// between closest ranks.
///
/// `p` is in percent and clamped to `[0, 100]`. Returns NaN for an empty slice.
pub fn percentile_sorted(sorted: &[f64], p: f64) -> f64 {
    match sorted.len() {
        0 => f64::NAN,
        1 => sorted[0],
        n => {
            let rank = (p.clamp(0.0, 100.0) / 100.0) * (n - 1) as f64;
            let lo = rank.floor() as usize;
            let hi = rank.ceil() as usize;
            let frac = rank - lo as f64;
            sorted[lo] + (sorted[hi] - sorted[lo]) * frac
        }
    }
}
