//! Default values for every configuration section.

use crate::schema::*;
use chrono::{NaiveDate, Weekday};
use std::path::PathBuf;

/// Default location of the pageview dataset.
pub const DEFAULT_DATA_PATH: &str = "data/climate_change_pageviews.csv";

/// Topic the bundled dataset tracks.
pub const DEFAULT_TOPIC: &str = "Climate Change";

/// Maximum number of language editions shown in one chart.
pub const DEFAULT_MAX_LANGUAGES: usize = 6;

/// Plotly's qualitative palette, so charts keep their familiar colors.
pub const DEFAULT_COLORS: [&str; 10] = [
    "#636efa", "#ef553b", "#00cc96", "#ab63fa", "#ffa15a", "#19d3f3", "#ff6692", "#b6e880",
    "#ff97ff", "#fecb52",
];

fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(NaiveDate::MIN)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: "en-US".to_string(),
            data: DataConfig::default(),
            selection: SelectionConfig::default(),
            aggregation: AggregationConfig::default(),
            chart: ChartConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_DATA_PATH),
            topic: DEFAULT_TOPIC.to_string(),
        }
    }
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            max_languages: DEFAULT_MAX_LANGUAGES,
            default_start: ymd(2024, 10, 6),
            min_date: ymd(2023, 2, 6),
            max_date: ymd(2025, 10, 6),
        }
    }
}

impl Default for AggregationConfig {
    fn default() -> Self {
        Self {
            week_ending: Weekday::Sun,
        }
    }
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            markers: true,
            marker_size: 4,
            line_width: 2,
            enable_grid: true,
            background_color: "#ffffff".to_string(),
            colors: DEFAULT_COLORS.iter().map(|c| (*c).to_string()).collect(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directory: None,
            json: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_defaults_match_page_widgets() {
        let selection = SelectionConfig::default();
        assert_eq!(selection.max_languages, 6);
        assert_eq!(selection.default_start.to_string(), "2024-10-06");
        assert_eq!(selection.min_date.to_string(), "2023-02-06");
        assert_eq!(selection.max_date.to_string(), "2025-10-06");
    }

    #[test]
    fn weeks_end_on_sunday_by_default() {
        assert_eq!(AggregationConfig::default().week_ending, Weekday::Sun);
    }

    #[test]
    fn default_palette_is_complete() {
        let chart = ChartConfig::default();
        assert_eq!(chart.colors.len(), DEFAULT_COLORS.len());
        assert!(chart.colors.len() >= DEFAULT_MAX_LANGUAGES);
    }
}
