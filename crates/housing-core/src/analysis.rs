//! Analysis handle
//!
//! `HousePrices` owns a private copy of a sales table and exposes:
//! - Column groupings (identifier, transaction, house attributes)
//! - Outlier detection, the boxplot figure and both text reports
//! - Persistence with the working-directory fallback

use std::path::Path;

use housing_io::Table;

use crate::detector::{identify_outliers, OutlierMap};
use crate::error::AnalysisResult;
use crate::figure::{create_zscore_boxplot, BoxplotFigure};
use crate::report::{print_outlier_details, print_special_variables, OutlierReport, SpecialVariableReport};
use crate::schema::{HOUSE_ATTRIBUTES, IDENTIFIER_COLUMN, TRANSACTION_COLUMNS};

/// Exploratory analysis over one sales table
#[derive(Debug, Clone, PartialEq)]
pub struct HousePrices {
    data: Table,
}

impl HousePrices {
    /// Start an analysis on a copy of `data`
    ///
    /// Later changes to the caller's table are not seen here.
    pub fn new(data: &Table) -> Self {
        Self { data: data.clone() }
    }

    /// The analysed table
    pub fn data(&self) -> &Table {
        &self.data
    }

    pub fn identifier_column(&self) -> &'static str {
        IDENTIFIER_COLUMN
    }

    pub fn transaction_columns(&self) -> &'static [&'static str] {
        &TRANSACTION_COLUMNS
    }

    pub fn house_attributes(&self) -> &'static [&'static str] {
        &HOUSE_ATTRIBUTES
    }

    /// Z-score outliers of the screened columns
    pub fn identify_outliers(&self, threshold: f64) -> AnalysisResult<OutlierMap> {
        identify_outliers(&self.data, threshold)
    }

    /// Boxplot figure plus the outlier summary on stdout
    pub fn create_zscore_boxplot(&self, threshold: f64) -> AnalysisResult<(BoxplotFigure, OutlierMap)> {
        create_zscore_boxplot(&self.data, threshold)
    }

    /// Detailed outlier report on stdout
    pub fn print_outlier_details(&self, outliers: &OutlierMap) -> AnalysisResult<OutlierReport> {
        print_outlier_details(&self.data, outliers)
    }

    /// Year, zipcode and sale-date checks on stdout
    pub fn check_special_variables(&self) -> AnalysisResult<SpecialVariableReport> {
        print_special_variables(&self.data)
    }

    /// Save the table; `false` when neither the path nor the fallback worked
    pub fn save(&self, filepath: impl AsRef<Path>, include_row_labels: bool) -> bool {
        housing_io::save(&self.data, filepath, include_row_labels)
    }
}
