//! Boxplot figure model
//!
//! `create_zscore_boxplot` turns a table and a threshold into a
//! [`BoxplotFigure`]: one notched boxplot per screened column with that
//! column's z-score outliers overlaid. The figure is a plain data model;
//! drawing happens in [`crate::export`] when the caller renders or saves it.

use std::io::{self, Write};

use serde::{Deserialize, Serialize};

use housing_io::Table;
use housing_stats::BoxSummary;

use crate::detector::{identify_outliers, OutlierMap};
use crate::error::AnalysisResult;
use crate::format::{money_axis_label, plain_axis_label};
use crate::report::summary::write_outlier_summary;
use crate::schema::is_monetary;

/// Panels per grid row
pub const GRID_COLUMNS: usize = 3;

/// How y-axis tick labels are written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AxisFormat {
    /// Integer with thousands separators
    Thousands,
    /// Short decimal
    Plain,
}

impl AxisFormat {
    pub fn for_column(column: &str) -> Self {
        if is_monetary(column) {
            AxisFormat::Thousands
        } else {
            AxisFormat::Plain
        }
    }

    /// Tick label for a value
    pub fn label(&self, value: f64) -> String {
        match self {
            AxisFormat::Thousands => money_axis_label(value),
            AxisFormat::Plain => plain_axis_label(value),
        }
    }
}

/// Grid arrangement of panels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridLayout {
    pub rows: usize,
    pub cols: usize,
    pub panels: usize,
}

impl GridLayout {
    /// Fixed-width grid holding `panels` cells
    pub fn for_panels(panels: usize) -> Self {
        Self {
            rows: panels.div_ceil(GRID_COLUMNS),
            cols: GRID_COLUMNS,
            panels,
        }
    }

    /// Empty cells at the end of the last row, left undrawn
    pub fn hidden_cells(&self) -> usize {
        self.rows * self.cols - self.panels
    }

    /// (row, col) of a panel index
    pub fn cell(&self, index: usize) -> (usize, usize) {
        (index / self.cols, index % self.cols)
    }
}

/// One column's boxplot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxplotPanel {
    /// Column name
    pub column: String,
    /// Two-line title with the outlier count
    pub title: String,
    /// Box statistics of the non-missing values, `None` for an empty column
    pub summary: Option<BoxSummary>,
    /// Values at the z-score outlier positions
    pub outliers: Vec<f64>,
    /// Tick label style for the y-axis
    pub axis_format: AxisFormat,
}

impl BoxplotPanel {
    pub fn outlier_count(&self) -> usize {
        self.outliers.len()
    }

    /// Whether the panel carries a legend entry for the outliers
    pub fn has_legend(&self) -> bool {
        !self.outliers.is_empty()
    }

    /// Value range the panel must show
    pub fn value_range(&self) -> Option<(f64, f64)> {
        let (lo, hi) = self.summary.as_ref()?.extent();
        let lo = self.outliers.iter().copied().fold(lo, f64::min);
        let hi = self.outliers.iter().copied().fold(hi, f64::max);
        Some((lo, hi))
    }
}

/// Title of a panel
pub fn panel_title(column: &str, outliers: usize) -> String {
    format!("{}\n(Z-score outliers: {})", column, outliers)
}

/// Title of the whole figure
pub fn figure_title(threshold: f64) -> String {
    format!("Boxplots with Z-Score Outliers (Z > {})", threshold)
}

/// Grid of boxplots, one per screened column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxplotFigure {
    pub title: String,
    pub threshold: f64,
    pub layout: GridLayout,
    pub panels: Vec<BoxplotPanel>,
}

impl BoxplotFigure {
    /// Build the figure from a table and an already computed outlier map
    pub fn from_outliers(table: &Table, outliers: &OutlierMap) -> AnalysisResult<Self> {
        let panels = outliers
            .iter()
            .map(|entry| -> AnalysisResult<BoxplotPanel> {
                let view = table.non_missing(&entry.column)?;
                Ok(BoxplotPanel {
                    column: entry.column.clone(),
                    title: panel_title(&entry.column, entry.count()),
                    summary: BoxSummary::from_data(&view),
                    outliers: entry.values(&view)?,
                    axis_format: AxisFormat::for_column(&entry.column),
                })
            })
            .collect::<AnalysisResult<Vec<_>>>()?;

        Ok(Self {
            title: figure_title(outliers.threshold()),
            threshold: outliers.threshold(),
            layout: GridLayout::for_panels(panels.len()),
            panels,
        })
    }

    /// Panel for a column
    pub fn panel(&self, column: &str) -> Option<&BoxplotPanel> {
        self.panels.iter().find(|p| p.column == column)
    }
}

/// Build the boxplot figure and print the outlier summary to stdout
///
/// Returns the figure together with the outlier map it was built from so
/// the detailed report can reuse it.
pub fn create_zscore_boxplot(
    table: &Table,
    threshold: f64,
) -> AnalysisResult<(BoxplotFigure, OutlierMap)> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    create_zscore_boxplot_to(table, threshold, &mut out)
}

/// Like [`create_zscore_boxplot`], writing the summary to `out`
pub fn create_zscore_boxplot_to<W: Write>(
    table: &Table,
    threshold: f64,
    out: &mut W,
) -> AnalysisResult<(BoxplotFigure, OutlierMap)> {
    let outliers = identify_outliers(table, threshold)?;
    let figure = BoxplotFigure::from_outliers(table, &outliers)?;
    write_outlier_summary(out, &outliers)?;
    Ok((figure, outliers))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_layout() {
        let layout = GridLayout::for_panels(9);
        assert_eq!((layout.rows, layout.cols), (3, 3));
        assert_eq!(layout.hidden_cells(), 0);

        let layout = GridLayout::for_panels(7);
        assert_eq!(layout.rows, 3);
        assert_eq!(layout.hidden_cells(), 2);
        assert_eq!(layout.cell(6), (2, 0));

        let layout = GridLayout::for_panels(1);
        assert_eq!(layout.rows, 1);
        assert_eq!(layout.hidden_cells(), 2);
    }

    #[test]
    fn test_titles() {
        assert_eq!(panel_title("price", 3), "price\n(Z-score outliers: 3)");
        assert_eq!(
            figure_title(3.0),
            "Boxplots with Z-Score Outliers (Z > 3)"
        );
        assert_eq!(
            figure_title(2.5),
            "Boxplots with Z-Score Outliers (Z > 2.5)"
        );
    }

    #[test]
    fn test_axis_format() {
        assert_eq!(AxisFormat::for_column("price"), AxisFormat::Thousands);
        assert_eq!(AxisFormat::for_column("lat"), AxisFormat::Plain);
        assert_eq!(AxisFormat::Thousands.label(1_250_000.0), "1,250,000");
    }

    #[test]
    fn test_value_range_covers_outliers() {
        let panel = BoxplotPanel {
            column: "price".to_string(),
            title: panel_title("price", 1),
            summary: BoxSummary::from_data(&[1.0, 2.0, 3.0]),
            outliers: vec![10.0],
            axis_format: AxisFormat::Thousands,
        };
        let (lo, hi) = panel.value_range().unwrap();
        assert!(lo <= 1.0);
        assert_eq!(hi, 10.0);
        assert!(panel.has_legend());
    }
}
