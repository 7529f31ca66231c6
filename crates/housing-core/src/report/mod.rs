//! Human-readable reports
//!
//! Every report is computed into a serde record first and rendered second,
//! so the numbers can be checked (or emitted as JSON) without parsing text.
//!
//! - `summary`: one line per column with outliers, printed alongside the figure
//! - `outliers`: descriptive statistics and extreme values of each column's outliers
//! - `special`: year, zipcode and sale-date sanity checks

pub mod outliers;
pub mod special;
pub mod summary;

pub use outliers::*;
pub use special::*;
pub use summary::*;

use serde::Serialize;

/// Render any report record as pretty-printed JSON
pub fn to_json<T: Serialize>(report: &T) -> serde_json::Result<String> {
    serde_json::to_string_pretty(report)
}
