//! Figure rendering and export
//!
//! Draws a [`BoxplotFigure`] with plotters:
//! - SVG: returned as a string or written to disk
//! - PNG: raster image written to disk

use std::path::{Path, PathBuf};

use plotters::coord::Shift;
use plotters::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{render_err, AnalysisError, AnalysisResult};
use crate::figure::{BoxplotFigure, BoxplotPanel};

/// Export format for figures
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExportFormat {
    /// SVG scalable vector graphics
    Svg,
    /// PNG raster image
    Png,
}

impl ExportFormat {
    /// Get file extension for this format
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Svg => "svg",
            ExportFormat::Png => "png",
        }
    }

    /// Get MIME type for this format
    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::Svg => "image/svg+xml",
            ExportFormat::Png => "image/png",
        }
    }

    /// Pick the format from a file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "svg" => Some(ExportFormat::Svg),
            "png" => Some(ExportFormat::Png),
            _ => None,
        }
    }
}

/// Rendering parameters for boxplot figures
///
/// Defaults give a 1500 px wide canvas with 400 px per grid row.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FigureConfig {
    /// Width of one grid cell in pixels
    pub panel_width: u32,

    /// Height of one grid row in pixels
    pub row_height: u32,

    /// Extra height reserved for the figure title
    pub title_height: u32,

    /// Font size of the figure title
    pub title_font_size: u32,

    /// Font size of panel captions
    pub caption_font_size: u32,

    /// Box fill color
    pub box_color: [u8; 3],

    /// Median line color
    pub median_color: [u8; 3],

    /// Color of the z-score outlier markers
    pub outlier_color: [u8; 3],

    /// Opacity of the z-score outlier markers
    pub outlier_opacity: f64,

    /// Opacity of the horizontal grid lines
    pub grid_opacity: f64,
}

impl Default for FigureConfig {
    fn default() -> Self {
        Self {
            panel_width: 500,
            row_height: 400,
            title_height: 60,
            title_font_size: 28,
            caption_font_size: 16,
            box_color: [176, 196, 222],
            median_color: [255, 127, 14],
            outlier_color: [214, 39, 40],
            outlier_opacity: 0.5,
            grid_opacity: 0.2,
        }
    }
}

impl FigureConfig {
    /// Set the cell size
    pub fn with_panel_size(mut self, width: u32, height: u32) -> Self {
        self.panel_width = width;
        self.row_height = height;
        self
    }

    /// Set the outlier marker color
    pub fn with_outlier_color(mut self, rgb: [u8; 3]) -> Self {
        self.outlier_color = rgb;
        self
    }

    /// Canvas size for a figure
    pub fn canvas_size(&self, figure: &BoxplotFigure) -> (u32, u32) {
        let rows = figure.layout.rows.max(1) as u32;
        (
            self.panel_width * figure.layout.cols as u32,
            self.row_height * rows + self.title_height,
        )
    }
}

fn rgb(c: [u8; 3]) -> RGBColor {
    RGBColor(c[0], c[1], c[2])
}

impl BoxplotFigure {
    /// Render the figure as an SVG document
    pub fn render_svg(&self, config: &FigureConfig) -> AnalysisResult<String> {
        let mut svg = String::new();
        {
            let root = SVGBackend::with_string(&mut svg, config.canvas_size(self)).into_drawing_area();
            draw_figure(&root, self, config)?;
            root.present().map_err(render_err)?;
        }
        Ok(svg)
    }

    /// Write the figure to `path`; the extension selects SVG or PNG
    pub fn save(&self, path: impl AsRef<Path>, config: &FigureConfig) -> AnalysisResult<PathBuf> {
        let path = path.as_ref();
        let format = ExportFormat::from_path(path).ok_or_else(|| AnalysisError::UnsupportedFormat {
            path: path.to_path_buf(),
        })?;
        let size = config.canvas_size(self);

        match format {
            ExportFormat::Svg => {
                let root = SVGBackend::new(path, size).into_drawing_area();
                draw_figure(&root, self, config)?;
                root.present().map_err(render_err)?;
            }
            ExportFormat::Png => {
                let root = BitMapBackend::new(path, size).into_drawing_area();
                draw_figure(&root, self, config)?;
                root.present().map_err(render_err)?;
            }
        }

        tracing::info!(path = %path.display(), format = format.extension(), "exported figure");
        Ok(path.to_path_buf())
    }
}

fn draw_figure<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    figure: &BoxplotFigure,
    config: &FigureConfig,
) -> AnalysisResult<()> {
    root.fill(&WHITE).map_err(render_err)?;
    let body = root
        .titled(&figure.title, ("sans-serif", config.title_font_size))
        .map_err(render_err)?;

    let cells = body.split_evenly((figure.layout.rows.max(1), figure.layout.cols));
    // Cells past the last panel stay blank
    for (panel, area) in figure.panels.iter().zip(cells.iter()) {
        draw_panel(area, panel, config)?;
    }
    Ok(())
}

fn draw_panel<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    panel: &BoxplotPanel,
    config: &FigureConfig,
) -> AnalysisResult<()> {
    let caption = panel.title.replace('\n', " ");
    let (lo, hi) = panel.value_range().unwrap_or((0.0, 1.0));
    let span = hi - lo;
    let pad = if span > 0.0 {
        span * 0.05
    } else {
        (lo.abs() * 0.05).max(1.0)
    };

    let mut chart = ChartBuilder::on(area)
        .caption(caption, ("sans-serif", config.caption_font_size))
        .margin(8)
        .x_label_area_size(10)
        .y_label_area_size(70)
        .build_cartesian_2d(0.5f64..1.5f64, (lo - pad)..(hi + pad))
        .map_err(render_err)?;

    let axis_format = panel.axis_format;
    let y_label = |y: &f64| axis_format.label(*y);
    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(0)
        .y_label_formatter(&y_label)
        .bold_line_style(BLACK.mix(config.grid_opacity))
        .light_line_style(WHITE.mix(0.0))
        .draw()
        .map_err(render_err)?;

    let Some(summary) = &panel.summary else {
        return Ok(());
    };

    let center = 1.0;
    let half = 0.25;
    let notch_half = 0.125;
    let notch_low = summary.notch_low.max(summary.q1);
    let notch_high = summary.notch_high.min(summary.q3);

    let outline = vec![
        (center - half, summary.q1),
        (center + half, summary.q1),
        (center + half, notch_low),
        (center + notch_half, summary.median),
        (center + half, notch_high),
        (center + half, summary.q3),
        (center - half, summary.q3),
        (center - half, notch_high),
        (center - notch_half, summary.median),
        (center - half, notch_low),
    ];

    chart
        .draw_series(std::iter::once(Polygon::new(
            outline.clone(),
            rgb(config.box_color).filled(),
        )))
        .map_err(render_err)?;

    let mut closed = outline;
    closed.push(closed[0]);
    let whiskers = vec![
        closed,
        vec![(center, summary.q1), (center, summary.whisker_low)],
        vec![(center, summary.q3), (center, summary.whisker_high)],
        vec![
            (center - notch_half, summary.whisker_low),
            (center + notch_half, summary.whisker_low),
        ],
        vec![
            (center - notch_half, summary.whisker_high),
            (center + notch_half, summary.whisker_high),
        ],
    ];
    chart
        .draw_series(
            whiskers
                .into_iter()
                .map(|points| PathElement::new(points, BLACK.stroke_width(1))),
        )
        .map_err(render_err)?;

    chart
        .draw_series(std::iter::once(PathElement::new(
            vec![
                (center - notch_half, summary.median),
                (center + notch_half, summary.median),
            ],
            rgb(config.median_color).stroke_width(2),
        )))
        .map_err(render_err)?;

    chart
        .draw_series(
            summary
                .fliers
                .iter()
                .map(|&v| Circle::new((center, v), 3, BLACK.stroke_width(1))),
        )
        .map_err(render_err)?;

    if panel.has_legend() {
        let style = rgb(config.outlier_color).mix(config.outlier_opacity).filled();
        chart
            .draw_series(
                panel
                    .outliers
                    .iter()
                    .map(|&v| Circle::new((center, v), 4, style)),
            )
            .map_err(render_err)?
            .label("Z-score outliers")
            .legend(move |(x, y)| Circle::new((x, y), 4, style));

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK.mix(0.3))
            .label_font(("sans-serif", 12))
            .draw()
            .map_err(render_err)?;
    }

    Ok(())
}
