//! Sanity checks of categorical and temporal columns
//!
//! Independent of the outlier detector. Reports the distinct values and most
//! frequent values of `yr_built`, `yr_renovated` and `zipcode`, the range of
//! sale dates with a count of dates in the future, and the number of houses
//! renovated before they were built.
//!
//! The table is only borrowed; parsed dates live in the report, never in
//! the table.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use housing_io::{Column, ColumnType, Table};

use crate::error::{AnalysisError, AnalysisResult};
use crate::schema::{DATE, YR_BUILT, YR_RENOVATED, ZIPCODE};

/// How many of the most frequent values are listed
pub const TOP_VALUES: usize = 5;

/// Date-time layouts accepted for sale dates, tried in order
const DATE_TIME_FORMATS: &[&str] = &[
    "%Y%m%dT%H%M%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Date-only layouts, read as midnight
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y%m%d", "%m/%d/%Y", "%Y/%m/%d"];

const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Occurrences of one value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueCount {
    pub value: i64,
    pub count: usize,
}

/// Distinct values and frequencies of an integer-coded column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoricalSummary {
    pub column: String,
    /// Distinct non-missing values, ascending
    pub distinct: Vec<i64>,
    /// Most frequent values, count descending then value ascending
    pub top_counts: Vec<ValueCount>,
    /// Cells without a value
    pub missing: usize,
}

impl CategoricalSummary {
    /// Summarize an integer column
    pub fn from_table(table: &Table, column: &str) -> AnalysisResult<Self> {
        let cells = table.integers(column)?;
        let mut counts: BTreeMap<i64, usize> = BTreeMap::new();
        let mut missing = 0;
        for cell in &cells {
            match cell {
                Some(v) => *counts.entry(*v).or_insert(0) += 1,
                None => missing += 1,
            }
        }

        let distinct: Vec<i64> = counts.keys().copied().collect();
        let mut ranked: Vec<ValueCount> = counts
            .into_iter()
            .map(|(value, count)| ValueCount { value, count })
            .collect();
        // BTreeMap order makes the value tie-break ascending already
        ranked.sort_by(|a, b| b.count.cmp(&a.count));
        ranked.truncate(TOP_VALUES);

        Ok(Self {
            column: column.to_string(),
            distinct,
            top_counts: ranked,
            missing,
        })
    }

    /// Number of distinct non-missing values
    pub fn distinct_count(&self) -> usize {
        self.distinct.len()
    }
}

/// Range of sale dates
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateSummary {
    pub earliest: Option<NaiveDateTime>,
    pub latest: Option<NaiveDateTime>,
    /// Dates strictly after `reference`
    pub future_count: usize,
    /// Wall-clock moment the dates were compared against
    pub reference: NaiveDateTime,
    /// Cells without a value
    pub missing: usize,
}

impl DateSummary {
    /// Parse the sale dates of a table and compare them against `reference`
    pub fn from_table(table: &Table, reference: NaiveDateTime) -> AnalysisResult<Self> {
        let mut earliest: Option<NaiveDateTime> = None;
        let mut latest: Option<NaiveDateTime> = None;
        let mut future_count = 0;
        let mut missing = 0;

        for cell in date_cells(table)? {
            let Some(raw) = cell else {
                missing += 1;
                continue;
            };
            let date = parse_sale_date(&raw)?;
            earliest = Some(earliest.map_or(date, |e| e.min(date)));
            latest = Some(latest.map_or(date, |l| l.max(date)));
            if date > reference {
                future_count += 1;
            }
        }

        Ok(Self {
            earliest,
            latest,
            future_count,
            reference,
            missing,
        })
    }
}

/// Sale-date cells as text; integer-coded dates such as `20141013` are accepted
///
/// A float column is accepted only when every cell is missing.
fn date_cells(table: &Table) -> AnalysisResult<Vec<Option<String>>> {
    match table.require(DATE)? {
        Column::Text(cells) => Ok(cells.clone()),
        Column::Int(cells) => Ok(cells.iter().map(|c| c.map(|v| v.to_string())).collect()),
        // A column read without any value comes back as float
        Column::Float(cells) if cells.iter().all(|c| c.map_or(true, f64::is_nan)) => {
            Ok(vec![None; cells.len()])
        }
        other => Err(AnalysisError::TypeMismatch {
            column: DATE.to_string(),
            expected: ColumnType::Text,
            actual: other.dtype(),
        }),
    }
}

/// Parse a sale date such as `20141013T000000` or `2014-10-13`
///
/// Offsets in RFC 3339 input are dropped: the written wall-clock time is kept.
pub fn parse_sale_date(raw: &str) -> AnalysisResult<NaiveDateTime> {
    let value = raw.trim();
    for format in DATE_TIME_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(parsed);
        }
    }
    for format in DATE_FORMATS {
        if let Ok(parsed) = NaiveDate::parse_from_str(value, format) {
            if let Some(midnight) = parsed.and_hms_opt(0, 0, 0) {
                return Ok(midnight);
            }
        }
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Ok(parsed.naive_local());
    }
    Err(AnalysisError::DateParse {
        value: raw.to_string(),
    })
}

/// Results of all special-variable checks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecialVariableReport {
    pub year_built: CategoricalSummary,
    pub year_renovated: CategoricalSummary,
    pub zipcode: CategoricalSummary,
    pub dates: DateSummary,
    /// Rows renovated (non-zero year) before the build year
    pub renovation_before_build: usize,
}

/// Run the checks against the current local wall-clock time
pub fn check_special_variables(table: &Table) -> AnalysisResult<SpecialVariableReport> {
    check_special_variables_at(table, Local::now().naive_local())
}

/// Run the checks with an explicit "now" for the future-date count
pub fn check_special_variables_at(
    table: &Table,
    now: NaiveDateTime,
) -> AnalysisResult<SpecialVariableReport> {
    Ok(SpecialVariableReport {
        year_built: CategoricalSummary::from_table(table, YR_BUILT)?,
        year_renovated: CategoricalSummary::from_table(table, YR_RENOVATED)?,
        zipcode: CategoricalSummary::from_table(table, ZIPCODE)?,
        dates: DateSummary::from_table(table, now)?,
        renovation_before_build: count_renovation_before_build(table)?,
    })
}

/// Print the checks to stdout
pub fn print_special_variables(table: &Table) -> AnalysisResult<SpecialVariableReport> {
    let report = check_special_variables(table)?;
    print!("{}", report);
    Ok(report)
}

/// Rows with a non-zero renovation year earlier than the build year
///
/// Rows missing either year are not counted.
pub fn count_renovation_before_build(table: &Table) -> AnalysisResult<usize> {
    let renovated = table.integers(YR_RENOVATED)?;
    let built = table.integers(YR_BUILT)?;
    Ok(renovated
        .iter()
        .zip(&built)
        .filter(|(renovated, built)| match (renovated, built) {
            (Some(r), Some(b)) => *r != 0 && r < b,
            _ => false,
        })
        .count())
}

fn write_categorical(
    f: &mut fmt::Formatter<'_>,
    title: &str,
    noun: &str,
    summary: &CategoricalSummary,
) -> fmt::Result {
    writeln!(f)?;
    writeln!(f, "=== {} Analysis ===", title)?;
    writeln!(f, "Unique values: {:?}", summary.distinct)?;
    writeln!(f)?;
    writeln!(f, "Value counts:")?;
    writeln!(f, "{}", summary.column)?;
    for vc in &summary.top_counts {
        writeln!(f, "{:<8} {:>6}", vc.value, vc.count)?;
    }
    writeln!(f)?;
    writeln!(f, "Total unique {}: {}", noun, summary.distinct_count())
}

fn show_date(date: Option<NaiveDateTime>) -> String {
    date.map(|d| d.format(DISPLAY_FORMAT).to_string())
        .unwrap_or_else(|| "n/a".to_string())
}

impl fmt::Display for SpecialVariableReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_categorical(f, "Year Built", "years", &self.year_built)?;
        write_categorical(f, "Year Renovated", "years", &self.year_renovated)?;
        write_categorical(f, "Zipcode", "zipcodes", &self.zipcode)?;

        writeln!(f)?;
        writeln!(f, "=== Date Analysis ===")?;
        writeln!(
            f,
            "Date range: {} - {}",
            show_date(self.dates.earliest),
            show_date(self.dates.latest)
        )?;
        writeln!(f, "Invalid dates (future): {}", self.dates.future_count)?;

        writeln!(f)?;
        writeln!(f, "=== Logical Checks ===")?;
        writeln!(
            f,
            "Renovation year before build year (excluding non-renovated): {}",
            self.renovation_before_build
        )
    }
}
