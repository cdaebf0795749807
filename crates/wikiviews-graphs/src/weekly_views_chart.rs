//! Weekly views line chart: one line with markers per language edition.

use crate::traits::GraphRenderer;
use crate::utils::GraphUtils;
use crate::weekly::WeeklyViews;
use chrono::{Duration, NaiveDate};
use plotters::coord::Shift;
use plotters::prelude::*;
use std::path::Path;
use tracing::{debug, info};
use wikiviews_common::{format_date, truncate_string, Result, WikiviewsError};
use wikiviews_config::ChartConfig;
use wikiviews_i18n::{MessageKey, Messages};

const LEGEND_LABEL_MAX: usize = 24;

/// Fixed texts drawn on the chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartLabels {
    /// Caption above the plot.
    pub title: String,
    /// X axis description.
    pub x_label: String,
    /// Y axis description.
    pub y_label: String,
}

impl ChartLabels {
    /// Reads the labels from the message catalog.
    pub fn from_messages(messages: &Messages) -> Result<Self> {
        Ok(Self {
            title: messages.get(MessageKey::ChartTitle)?,
            x_label: messages.get(MessageKey::AxisWeek)?,
            y_label: messages.get(MessageKey::AxisViews)?,
        })
    }
}

impl Default for ChartLabels {
    fn default() -> Self {
        Self {
            title: "Weekly Views by Language".to_string(),
            x_label: "Week".to_string(),
            y_label: "Views".to_string(),
        }
    }
}

/// One plotted line, x in days since the first week.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    /// Legend label.
    pub name: String,
    /// (days since origin, views) points.
    pub points: Vec<(f64, f64)>,
}

/// Plot-ready form of a weekly table.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedChart {
    /// First week bucket, x = 0.
    pub origin: NaiveDate,
    /// Days between first and last week bucket.
    pub span_days: i64,
    /// Largest weekly sum.
    pub max_views: u64,
    /// One series per language, in table order.
    pub series: Vec<ChartSeries>,
}

impl PreparedChart {
    /// Converts `data` into per-language series. `None` when `data` is empty.
    #[allow(clippy::cast_precision_loss)]
    pub fn from_weekly(data: &WeeklyViews) -> Option<Self> {
        let weeks = data.weeks();
        let origin = *weeks.first()?;
        let last = *weeks.last()?;

        let series = data
            .languages()
            .into_iter()
            .map(|lang| ChartSeries {
                name: truncate_string(lang.as_str(), LEGEND_LABEL_MAX),
                points: data
                    .series(lang)
                    .into_iter()
                    .map(|(week, views)| ((week - origin).num_days() as f64, views as f64))
                    .collect(),
            })
            .collect();

        Some(Self {
            origin,
            span_days: (last - origin).num_days(),
            max_views: data.max_views(),
            series,
        })
    }

    /// Date label for an x coordinate.
    #[allow(clippy::cast_possible_truncation)]
    pub fn date_label(&self, x: f64) -> String {
        format_date(self.origin + Duration::days(x.round() as i64))
    }
}

/// Renders [`WeeklyViews`] as a line chart with markers, colored by language.
#[derive(Debug, Clone)]
pub struct WeeklyViewsChart {
    config: ChartConfig,
    labels: ChartLabels,
}

impl WeeklyViewsChart {
    /// Creates a chart renderer.
    pub const fn new(config: ChartConfig, labels: ChartLabels) -> Self {
        Self { config, labels }
    }

    /// Rendering options in use.
    pub const fn config(&self) -> &ChartConfig {
        &self.config
    }

    /// Texts in use.
    pub const fn labels(&self) -> &ChartLabels {
        &self.labels
    }

    const fn dimensions(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }

    fn draw<DB: DrawingBackend>(
        &self,
        root: &DrawingArea<DB, Shift>,
        data: &WeeklyViews,
    ) -> Result<()> {
        let prepared = PreparedChart::from_weekly(data)
            .ok_or_else(|| WikiviewsError::graph("no weekly rows to plot"))?;

        let background = GraphUtils::parse_color(&self.config.background_color).unwrap_or(WHITE);
        root.fill(&background).map_err(draw_error)?;

        let mut chart = ChartBuilder::on(root)
            .caption(&self.labels.title, ("sans-serif", 28))
            .margin(20)
            .x_label_area_size(50)
            .y_label_area_size(80)
            .build_cartesian_2d(
                GraphUtils::day_range(prepared.span_days),
                GraphUtils::value_range(prepared.max_views),
            )
            .map_err(draw_error)?;

        let x_formatter = |x: &f64| prepared.date_label(*x);
        let y_formatter = |y: &f64| format!("{y:.0}");
        let mut mesh = chart.configure_mesh();
        if !self.config.enable_grid {
            mesh.disable_mesh();
        }
        mesh.x_desc(self.labels.x_label.as_str())
            .y_desc(self.labels.y_label.as_str())
            .x_labels(8)
            .x_label_formatter(&x_formatter)
            .y_label_formatter(&y_formatter)
            .draw()
            .map_err(draw_error)?;

        let palette = GraphUtils::palette(&self.config.colors);
        let line_width = self.config.line_width.max(1);
        #[allow(clippy::cast_possible_wrap, clippy::cast_possible_truncation)]
        let marker_size = self.config.marker_size as i32;

        for (i, series) in prepared.series.iter().enumerate() {
            let color = palette[i % palette.len()];

            chart
                .draw_series(LineSeries::new(
                    series.points.iter().copied(),
                    color.stroke_width(line_width),
                ))
                .map_err(draw_error)?
                .label(series.name.as_str())
                .legend(move |(x, y)| {
                    PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(line_width))
                });

            if self.config.markers {
                chart
                    .draw_series(
                        series
                            .points
                            .iter()
                            .map(|&point| Circle::new(point, marker_size, color.filled())),
                    )
                    .map_err(draw_error)?;
            }
        }

        if prepared.series.len() > 1 {
            chart
                .configure_series_labels()
                .position(SeriesLabelPosition::UpperRight)
                .background_style(WHITE.mix(0.8))
                .border_style(BLACK)
                .draw()
                .map_err(draw_error)?;
        }

        root.present().map_err(draw_error)?;
        debug!(series = prepared.series.len(), "Drew weekly views chart");
        Ok(())
    }
}

impl GraphRenderer for WeeklyViewsChart {
    type Data = WeeklyViews;

    fn render_to_file(&self, data: &WeeklyViews, path: &Path) -> Result<()> {
        if is_svg_path(path) {
            let root = SVGBackend::new(path, self.dimensions()).into_drawing_area();
            self.draw(&root, data)?;
        } else {
            let root = BitMapBackend::new(path, self.dimensions()).into_drawing_area();
            self.draw(&root, data)?;
        }

        info!("Rendered weekly views chart to {}", path.display());
        Ok(())
    }

    fn render_to_bytes(&self, data: &WeeklyViews) -> Result<Vec<u8>> {
        let (width, height) = self.dimensions();
        let mut buffer = vec![0u8; width as usize * height as usize * 3];
        {
            let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
            self.draw(&root, data)?;
        }

        let image = image::RgbImage::from_raw(width, height, buffer)
            .ok_or_else(|| WikiviewsError::graph("bitmap buffer has the wrong size"))?;
        let mut bytes = Vec::new();
        image::DynamicImage::ImageRgb8(image)
            .write_to(
                &mut std::io::Cursor::new(&mut bytes),
                image::ImageOutputFormat::Png,
            )
            .map_err(|e| WikiviewsError::graph(format!("PNG encoding failed: {e}")))?;
        Ok(bytes)
    }

    fn name(&self) -> &'static str {
        "weekly_views_by_language"
    }

    fn description(&self) -> &'static str {
        "Weekly pageviews per language edition"
    }
}

/// Whether `path` asks for SVG output; any other extension gets PNG.
pub fn is_svg_path(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("svg"))
}

fn draw_error(err: impl std::fmt::Display) -> WikiviewsError {
    WikiviewsError::graph(err.to_string())
}
