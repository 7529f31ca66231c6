//! housing-stats - Statistical primitives for housing-sale exploration
//!
//! This crate provides the numeric building blocks of the outlier pipeline:
//!
//! - **Summary**: mean, standard deviation (population and sample), median
//! - **Z-score**: standardized deviations and threshold-based outlier positions
//! - **Boxplot**: quartiles, whiskers, notch and IQR fliers for one sample
//! - **Extremes**: smallest/largest value listings for report tables
//!
//! # Missing values
//!
//! Every function here works on a plain `&[f64]` that is already the
//! non-missing view of a column. Positions returned by the outlier functions
//! are indices into that slice, never into a wider table.

pub mod boxplot;
pub mod extremes;
pub mod summary;
pub mod zscore;

pub use boxplot::*;
pub use extremes::*;
pub use summary::*;
pub use zscore::*;
