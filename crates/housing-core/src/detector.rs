//! Z-score outlier detection
//!
//! For every screened column the detector drops missing cells, standardizes
//! the remaining values and keeps the positions whose absolute z-score is
//! strictly above the threshold.
//!
//! Positions index the column's non-missing view, not the table rows. Use
//! [`ColumnOutliers::values`] or [`ColumnOutliers::rows`] to resolve them.
//!
//! Columns whose scores are undefined (no values, all values identical, or
//! a non-finite spread) report no outliers.

use serde::{Deserialize, Serialize};

use housing_io::Table;
use housing_stats::Standardizer;

use crate::error::{AnalysisError, AnalysisResult};
use crate::schema::OUTLIER_COLUMNS;

/// Outliers found in one column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnOutliers {
    /// Column name
    pub column: String,
    /// Ascending positions into the column's non-missing values
    pub positions: Vec<usize>,
    /// Number of non-missing values the positions refer to
    pub non_missing: usize,
}

impl ColumnOutliers {
    /// Number of outliers
    pub fn count(&self) -> usize {
        self.positions.len()
    }

    /// Outliers as a percentage of the non-missing values
    pub fn percent(&self) -> f64 {
        if self.non_missing == 0 {
            0.0
        } else {
            self.count() as f64 / self.non_missing as f64 * 100.0
        }
    }

    /// Outlier values taken from the column's non-missing view
    pub fn values(&self, view: &[f64]) -> AnalysisResult<Vec<f64>> {
        self.positions
            .iter()
            .map(|&p| {
                view.get(p)
                    .copied()
                    .ok_or_else(|| AnalysisError::PositionOutOfRange {
                        column: self.column.clone(),
                        position: p,
                        len: view.len(),
                    })
            })
            .collect()
    }

    /// Table row indices of the outliers
    pub fn rows(&self, table: &Table) -> AnalysisResult<Vec<usize>> {
        let present: Vec<usize> = table
            .numeric(&self.column)?
            .iter()
            .enumerate()
            .filter_map(|(row, cell)| cell.map(|_| row))
            .collect();
        self.positions
            .iter()
            .map(|&p| {
                present
                    .get(p)
                    .copied()
                    .ok_or_else(|| AnalysisError::PositionOutOfRange {
                        column: self.column.clone(),
                        position: p,
                        len: present.len(),
                    })
            })
            .collect()
    }
}

/// Per-column outlier positions for one threshold
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutlierMap {
    threshold: f64,
    columns: Vec<ColumnOutliers>,
}

impl OutlierMap {
    /// Threshold the map was computed with
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Entry for a column
    pub fn get(&self, column: &str) -> Option<&ColumnOutliers> {
        self.columns.iter().find(|c| c.column == column)
    }

    /// Outlier positions for a column
    pub fn positions(&self, column: &str) -> Option<&[usize]> {
        self.get(column).map(|c| c.positions.as_slice())
    }

    /// Entries in detection order
    pub fn iter(&self) -> impl Iterator<Item = &ColumnOutliers> {
        self.columns.iter()
    }

    /// Entries with at least one outlier
    pub fn flagged(&self) -> impl Iterator<Item = &ColumnOutliers> {
        self.columns.iter().filter(|c| c.count() > 0)
    }

    /// Column names in detection order
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.column.as_str()).collect()
    }

    /// Number of screened columns
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Outliers over all columns
    pub fn total_outliers(&self) -> usize {
        self.columns.iter().map(ColumnOutliers::count).sum()
    }
}

fn validate_threshold(threshold: f64) -> AnalysisResult<()> {
    if threshold.is_finite() && threshold > 0.0 {
        Ok(())
    } else {
        Err(AnalysisError::InvalidThreshold(threshold))
    }
}

/// Detect outliers in the standard measurement columns
pub fn identify_outliers(table: &Table, threshold: f64) -> AnalysisResult<OutlierMap> {
    identify_outliers_in(table, &OUTLIER_COLUMNS, threshold)
}

/// Detect outliers in the given columns
///
/// Fails on the first absent or textual column; no partial map is returned.
pub fn identify_outliers_in(
    table: &Table,
    columns: &[&str],
    threshold: f64,
) -> AnalysisResult<OutlierMap> {
    validate_threshold(threshold)?;

    #[cfg(feature = "parallel")]
    let columns = {
        use rayon::prelude::*;
        columns
            .par_iter()
            .map(|column| detect_column(table, column, threshold))
            .collect::<AnalysisResult<Vec<_>>>()?
    };

    #[cfg(not(feature = "parallel"))]
    let columns = columns
        .iter()
        .map(|column| detect_column(table, column, threshold))
        .collect::<AnalysisResult<Vec<_>>>()?;

    Ok(OutlierMap { threshold, columns })
}

fn detect_column(table: &Table, column: &str, threshold: f64) -> AnalysisResult<ColumnOutliers> {
    let view = table.non_missing(column)?;

    let positions = match Standardizer::fit(&view) {
        Ok(standardizer) => standardizer.outliers(&view, threshold),
        Err(reason) => {
            tracing::debug!(column, ?reason, "z-score undefined, no outliers");
            Vec::new()
        }
    };
    tracing::debug!(
        column,
        values = view.len(),
        outliers = positions.len(),
        "screened column"
    );

    Ok(ColumnOutliers {
        column: column.to_string(),
        positions,
        non_missing: view.len(),
    })
}
