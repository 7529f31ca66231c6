//! Box-and-whisker statistics
//!
//! Quartiles use linear interpolation between closest ranks. Whiskers reach
//! the most extreme data points within `1.5 * IQR` of the box; anything
//! beyond them is a flier. The notch marks an approximate 95% confidence
//! interval of the median, `median +/- 1.57 * IQR / sqrt(n)`.

use serde::{Deserialize, Serialize};

use crate::summary::percentile_sorted;

/// Whisker reach as a multiple of the interquartile range
pub const WHISKER_IQR: f64 = 1.5;

/// Notch half-width factor applied to `IQR / sqrt(n)`
pub const NOTCH_FACTOR: f64 = 1.57;

/// Statistics needed to draw one notched box
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxSummary {
    /// Number of values summarized
    pub count: usize,
    /// First quartile
    pub q1: f64,
    /// Median
    pub median: f64,
    /// Third quartile
    pub q3: f64,
    /// Lower whisker end
    pub whisker_low: f64,
    /// Upper whisker end
    pub whisker_high: f64,
    /// Lower edge of the median notch
    pub notch_low: f64,
    /// Upper edge of the median notch
    pub notch_high: f64,
    /// Values outside the whiskers, in input order
    pub fliers: Vec<f64>,
}

impl BoxSummary {
    /// Summarize a sample; `None` when there are no finite values
    pub fn from_data(data: &[f64]) -> Option<Self> {
        let mut sorted: Vec<f64> = data.iter().copied().filter(|x| x.is_finite()).collect();
        if sorted.is_empty() {
            return None;
        }
        sorted.sort_by(f64::total_cmp);

        let count = sorted.len();
        let q1 = percentile_sorted(&sorted, 25.0);
        let median = percentile_sorted(&sorted, 50.0);
        let q3 = percentile_sorted(&sorted, 75.0);
        let iqr = q3 - q1;

        let low_reach = q1 - WHISKER_IQR * iqr;
        let high_reach = q3 + WHISKER_IQR * iqr;

        let whisker_low = sorted
            .iter()
            .copied()
            .find(|&x| x >= low_reach && x <= q1)
            .unwrap_or(q1);
        let whisker_high = sorted
            .iter()
            .rev()
            .copied()
            .find(|&x| x <= high_reach && x >= q3)
            .unwrap_or(q3);

        let half_notch = NOTCH_FACTOR * iqr / (count as f64).sqrt();

        let fliers = data
            .iter()
            .copied()
            .filter(|&x| x.is_finite() && (x < whisker_low || x > whisker_high))
            .collect();

        Some(Self {
            count,
            q1,
            median,
            q3,
            whisker_low,
            whisker_high,
            notch_low: median - half_notch,
            notch_high: median + half_notch,
            fliers,
        })
    }

    /// Interquartile range
    pub fn iqr(&self) -> f64 {
        self.q3 - self.q1
    }

    /// Smallest and largest value the box drawing needs to show
    pub fn extent(&self) -> (f64, f64) {
        let lo = self
            .fliers
            .iter()
            .copied()
            .fold(self.whisker_low.min(self.notch_low), f64::min);
        let hi = self
            .fliers
            .iter()
            .copied()
            .fold(self.whisker_high.max(self.notch_high), f64::max);
        (lo, hi)
    }
}
