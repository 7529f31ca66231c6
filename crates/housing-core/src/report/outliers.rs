//! Detailed outlier report
//!
//! For each column with at least one outlier: count and share of the
//! column's values, mean/median/standard deviation of the outlier values,
//! and the smallest and largest five of them.

use std::fmt;
use std::io::{self, Write};

use serde::{Deserialize, Serialize};

use housing_io::Table;
use housing_stats::{extreme_values, SummaryStats};

use crate::detector::OutlierMap;
use crate::error::AnalysisResult;
use crate::format::{thousands, thousands_fixed};

/// How many values each extreme list shows
pub const EXTREME_COUNT: usize = 5;

const REPORT_WIDTH: usize = 80;

/// Statistics of one column's outliers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutlierDetail {
    pub column: String,
    /// Number of outliers
    pub count: usize,
    /// Outliers as a percentage of the column's non-missing values
    pub percent: f64,
    pub mean: f64,
    pub median: f64,
    /// Sample standard deviation, absent for a single outlier
    pub std_dev: Option<f64>,
    /// Lowest outlier values, ascending
    pub smallest: Vec<f64>,
    /// Highest outlier values, ascending
    pub largest: Vec<f64>,
}

/// The full detailed report
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutlierReport {
    pub columns: Vec<OutlierDetail>,
}

impl OutlierReport {
    pub fn get(&self, column: &str) -> Option<&OutlierDetail> {
        self.columns.iter().find(|d| d.column == column)
    }
}

/// Compute the detailed report for every column with outliers
///
/// Positions are resolved against each column's non-missing values, the
/// same view the detector used.
pub fn describe_outliers(table: &Table, outliers: &OutlierMap) -> AnalysisResult<OutlierReport> {
    let mut columns = Vec::new();
    for entry in outliers.flagged() {
        let view = table.non_missing(&entry.column)?;
        let values = entry.values(&view)?;
        let stats = SummaryStats::from_data(&values);
        let extremes = extreme_values(&values, EXTREME_COUNT);

        columns.push(OutlierDetail {
            column: entry.column.clone(),
            count: values.len(),
            percent: values.len() as f64 / view.len() as f64 * 100.0,
            mean: stats.mean,
            median: stats.median,
            std_dev: stats.sample_std_dev,
            smallest: extremes.smallest,
            largest: extremes.largest,
        });
    }
    Ok(OutlierReport { columns })
}

/// Print the detailed report to stdout
pub fn print_outlier_details(table: &Table, outliers: &OutlierMap) -> AnalysisResult<OutlierReport> {
    let report = describe_outliers(table, outliers)?;
    print!("{}", report);
    Ok(report)
}

/// Write the detailed report to `out`
pub fn write_outlier_details<W: Write>(out: &mut W, report: &OutlierReport) -> io::Result<()> {
    write!(out, "{}", report)
}

fn labeled(label: &str, value: String) -> String {
    format!("{:<15} {}", label, value)
}

impl fmt::Display for OutlierDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let heading = format!(" {} ", self.column.to_uppercase());
        writeln!(f)?;
        writeln!(f, "{}", "-".repeat(REPORT_WIDTH))?;
        writeln!(f, "{:-^width$}", heading, width = REPORT_WIDTH)?;
        writeln!(f, "{}", "-".repeat(REPORT_WIDTH))?;

        writeln!(f)?;
        writeln!(
            f,
            "Outlier Count: {} ({:.2}% of values)",
            thousands(self.count as i64),
            self.percent
        )?;
        writeln!(f, "{}", labeled("Mean:", thousands_fixed(self.mean, 2)))?;
        writeln!(f, "{}", labeled("Median:", thousands_fixed(self.median, 2)))?;
        let std_dev = self
            .std_dev
            .map(|s| thousands_fixed(s, 2))
            .unwrap_or_else(|| "n/a".to_string());
        writeln!(f, "{}", labeled("Std Dev:", std_dev))?;

        writeln!(f)?;
        writeln!(f, "Smallest outliers:")?;
        for value in &self.smallest {
            writeln!(f, "  • {}", thousands_fixed(*value, 2))?;
        }
        writeln!(f)?;
        writeln!(f, "Largest outliers:")?;
        for value in &self.largest {
            writeln!(f, "  • {}", thousands_fixed(*value, 2))?;
        }
        Ok(())
    }
}

impl fmt::Display for OutlierReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        writeln!(f, "{}", "=".repeat(REPORT_WIDTH))?;
        writeln!(f, "{:^width$}", "OUTLIER ANALYSIS SUMMARY", width = REPORT_WIDTH)?;
        writeln!(f, "{}", "=".repeat(REPORT_WIDTH))?;
        for detail in &self.columns {
            write!(f, "{}", detail)?;
        }
        Ok(())
    }
}
