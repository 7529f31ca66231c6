//! Error types for housing-core
//!
//! Provides error handling for:
//! - Schema violations (missing or mistyped columns)
//! - Caller mistakes (invalid thresholds, foreign outlier maps)
//! - Sale-date parsing
//! - Figure rendering and export

use std::path::PathBuf;
use thiserror::Error;

use housing_io::{ColumnType, IoError};

/// Main error type for analysis operations
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// A required column is absent from the table
    #[error("Column '{0}' not found in dataset")]
    ColumnNotFound(String),

    /// A column has the wrong type for the requested operation
    #[error("Type mismatch for column '{column}': expected {expected}, got {actual}")]
    TypeMismatch {
        column: String,
        expected: ColumnType,
        actual: ColumnType,
    },

    /// Threshold must be finite and positive
    #[error("Invalid z-score threshold: {0} (must be finite and positive)")]
    InvalidThreshold(f64),

    /// An outlier position does not exist in the column's non-missing values
    #[error("Outlier position {position} out of range for column '{column}' ({len} values)")]
    PositionOutOfRange {
        column: String,
        position: usize,
        len: usize,
    },

    /// A sale date could not be parsed
    #[error("Unparseable date value: '{value}'")]
    DateParse { value: String },

    /// Figure drawing failed
    #[error("Rendering failed: {message}")]
    Render { message: String },

    /// Unsupported figure export format
    #[error("Unsupported export format for {path}")]
    UnsupportedFormat { path: PathBuf },

    /// Other table errors
    #[error("Table error: {0}")]
    Table(IoError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<IoError> for AnalysisError {
    fn from(err: IoError) -> Self {
        match err {
            IoError::ColumnNotFound(column) => AnalysisError::ColumnNotFound(column),
            IoError::TypeMismatch {
                column,
                expected,
                actual,
            } => AnalysisError::TypeMismatch {
                column,
                expected,
                actual,
            },
            other => AnalysisError::Table(other),
        }
    }
}

/// Result type alias for analysis operations
pub type AnalysisResult<T> = Result<T, AnalysisError>;

/// Map any displayable drawing error into `AnalysisError::Render`
pub(crate) fn render_err<E: std::fmt::Display>(err: E) -> AnalysisError {
    AnalysisError::Render {
        message: err.to_string(),
    }
}
