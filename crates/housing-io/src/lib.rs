//! housing-io - Tabular data I/O for housing-sale datasets
//!
//! This crate provides the table model and the delimited-file glue around it:
//!
//! - **Table**: named, ordered, homogeneously typed columns with explicit
//!   missing values
//! - **CSV reading**: whole-file load with per-column type inference
//! - **Persistence**: CSV writing with a single retry into the working
//!   directory when the target is not writable
//!
//! # Design
//!
//! Columns are accessed through typed accessors (`numeric`, `integers`,
//! `text`). Missing cells are `None`; float `NaN` cells are treated as
//! missing by the non-missing views.

pub mod csv_reader;
pub mod error;
pub mod table;
pub mod writer;

pub use csv_reader::*;
pub use error::*;
pub use table::*;
pub use writer::*;
