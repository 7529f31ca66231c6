//! Z-score outlier classification
//!
//! `z_i = |x_i - mean| / std_dev` with the population standard deviation.
//! A value is an outlier when its score is strictly greater than the
//! threshold.
//!
//! # Degenerate samples
//!
//! Scores are undefined when the sample is empty, when every value is
//! identical, or when the spread is not finite (an infinite value in the
//! sample). Such samples report no scores and no outliers instead of
//! producing NaN or infinite scores.

use serde::{Deserialize, Serialize};

/// Why a sample could not be standardized
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Degenerate {
    /// No values at all
    Empty,
    /// All values are identical
    ZeroVariance,
    /// Mean or spread is not finite
    NonFinite,
}

/// Location and scale used for standardization
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Standardizer {
    pub mean: f64,
    pub std_dev: f64,
}

impl Standardizer {
    /// Fit mean and population standard deviation to a sample
    pub fn fit(data: &[f64]) -> Result<Self, Degenerate> {
        if data.is_empty() {
            return Err(Degenerate::Empty);
        }

        // Compare raw values; a computed std of identical floats can be a
        // rounding residue instead of exactly zero.
        let first = data[0];
        if data.iter().all(|&x| x == first) {
            return if first.is_finite() {
                Err(Degenerate::ZeroVariance)
            } else {
                Err(Degenerate::NonFinite)
            };
        }

        let n = data.len() as f64;
        let mean = data.iter().sum::<f64>() / n;
        let variance = data.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n;
        let std_dev = variance.sqrt();

        if !mean.is_finite() || !std_dev.is_finite() {
            return Err(Degenerate::NonFinite);
        }
        if std_dev == 0.0 {
            return Err(Degenerate::ZeroVariance);
        }

        Ok(Self { mean, std_dev })
    }

    /// Absolute z-score of a single value
    pub fn abs_score(&self, x: f64) -> f64 {
        ((x - self.mean) / self.std_dev).abs()
    }

    /// Positions in `data` whose absolute z-score is strictly above `threshold`
    pub fn outliers(&self, data: &[f64], threshold: f64) -> Vec<usize> {
        data.iter()
            .enumerate()
            .filter(|(_, &x)| self.abs_score(x) > threshold)
            .map(|(i, _)| i)
            .collect()
    }
}

/// Absolute z-scores of every value, in input order
pub fn abs_zscores(data: &[f64]) -> Result<Vec<f64>, Degenerate> {
    let standardizer = Standardizer::fit(data)?;
    Ok(data.iter().map(|&x| standardizer.abs_score(x)).collect())
}

/// Positions of values whose absolute z-score exceeds `threshold`
///
/// Positions are ascending indices into `data`. Degenerate samples yield an
/// empty vector.
pub fn zscore_outliers(data: &[f64], threshold: f64) -> Vec<usize> {
    match Standardizer::fit(data) {
        Ok(standardizer) => standardizer.outliers(data, threshold),
        Err(_) => Vec::new(),
    }
}
