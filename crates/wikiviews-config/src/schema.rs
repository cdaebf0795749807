//! Configuration schema definitions using serde.

use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration structure for Wikiviews.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Locale of the message catalog.
    pub language: String,
    /// Data source configuration.
    pub data: DataConfig,
    /// Selection bounds configuration.
    pub selection: SelectionConfig,
    /// Aggregation configuration.
    pub aggregation: AggregationConfig,
    /// Chart configuration.
    pub chart: ChartConfig,
    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Data source configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Path of the pageview CSV file.
    pub path: PathBuf,
    /// Article topic the pageviews were collected for.
    pub topic: String,
}

/// Bounds applied to the user's selection before comparing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionConfig {
    /// Maximum number of language editions compared at once.
    pub max_languages: usize,
    /// Start date used when none is given.
    pub default_start: NaiveDate,
    /// Earliest selectable date.
    pub min_date: NaiveDate,
    /// Latest selectable date.
    pub max_date: NaiveDate,
}

/// Weekly aggregation configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AggregationConfig {
    /// Weekday that closes every week bucket.
    pub week_ending: Weekday,
}

/// Chart configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Whether to draw a marker at every weekly point.
    pub markers: bool,
    /// Marker radius in pixels.
    pub marker_size: u32,
    /// Line stroke width in pixels.
    pub line_width: u32,
    /// Whether to draw grid lines.
    pub enable_grid: bool,
    /// Background color in `#rrggbb` format.
    pub background_color: String,
    /// Series colors in `#rrggbb` format, cycled per language.
    pub colors: Vec<String>,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default level filter when `RUST_LOG` is unset.
    pub level: String,
    /// Directory for daily rotated log files. Console only when unset.
    pub directory: Option<PathBuf>,
    /// Emit JSON formatted log lines.
    pub json: bool,
}
