//! Smallest/largest value listings

use serde::{Deserialize, Serialize};

/// The low and high ends of a sample, both in ascending order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtremeValues {
    pub smallest: Vec<f64>,
    pub largest: Vec<f64>,
}

/// Collect the `k` smallest and `k` largest values of a sample.
///
/// The two selections are pooled and sorted, then the first `k` and the last
/// `k` entries of the pool are reported. For samples shorter than `2 * k`
/// the two lists overlap and repeat values; for samples shorter than `k`
/// they simply hold fewer entries.
pub fn extreme_values(data: &[f64], k: usize) -> ExtremeValues {
    let mut sorted: Vec<f64> = data.to_vec();
    sorted.sort_by(f64::total_cmp);

    let take = k.min(sorted.len());
    let mut pool: Vec<f64> = Vec::with_capacity(take * 2);
    pool.extend_from_slice(&sorted[..take]);
    pool.extend_from_slice(&sorted[sorted.len() - take..]);
    pool.sort_by(f64::total_cmp);

    let head = k.min(pool.len());
    ExtremeValues {
        smallest: pool[..head].to_vec(),
        largest: pool[pool.len() - head..].to_vec(),
    }
}
