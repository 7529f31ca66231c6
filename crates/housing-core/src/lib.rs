//! housing-core - Outlier detection and reporting for house-sale data
//!
//! This crate runs the exploratory checks on a King County style sales table:
//!
//! - **Detector**: per-column z-score outliers, positions relative to the
//!   column's non-missing values
//! - **Figure**: a 3-column grid of notched boxplots with the outliers
//!   overlaid, exportable to SVG or PNG
//! - **Reports**: outlier details (counts, descriptive statistics, extreme
//!   values) and sanity checks of year, zipcode and sale-date columns
//! - **EdaConfig**: run parameters loaded from TOML or JSON
//! - **HousePrices**: an analysis handle that owns a copy of the table and
//!   ties the pieces together with persistence
//!
//! # Pipeline
//!
//! The detector is a pure function of `(table, threshold)`. The figure and
//! the reports consume its `OutlierMap` without recomputing it; the
//! text-printing entry points are thin wrappers over structured records.

pub mod analysis;
pub mod config;
pub mod detector;
pub mod error;
pub mod export;
pub mod figure;
pub mod format;
pub mod report;
pub mod schema;

pub use analysis::HousePrices;
pub use config::{ConfigError, EdaConfig};
pub use detector::*;
pub use error::*;
pub use export::{ExportFormat, FigureConfig};
pub use figure::*;
pub use report::*;
pub use schema::*;

pub use housing_io::{save, try_save, Column, Table};
