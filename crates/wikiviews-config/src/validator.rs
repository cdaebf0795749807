//! Runtime validation of loaded configuration.

use crate::schema::Config;
use wikiviews_common::{Result, WikiviewsError};

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validates a configuration, reporting the first offending field.
    pub fn validate(config: &Config) -> Result<()> {
        let selection = &config.selection;
        if selection.max_languages == 0 {
            return Err(invalid("selection.max_languages", "must be at least 1"));
        }
        if selection.min_date > selection.max_date {
            return Err(invalid(
                "selection.min_date",
                format!(
                    "{} is after selection.max_date {}",
                    selection.min_date, selection.max_date
                ),
            ));
        }
        if !(selection.min_date..=selection.max_date).contains(&selection.default_start) {
            return Err(invalid(
                "selection.default_start",
                format!(
                    "{} is outside {}..={}",
                    selection.default_start, selection.min_date, selection.max_date
                ),
            ));
        }

        let chart = &config.chart;
        if chart.width == 0 || chart.height == 0 {
            return Err(invalid("chart", "width and height must be non-zero"));
        }
        if chart.colors.is_empty() {
            return Err(invalid("chart.colors", "palette cannot be empty"));
        }
        if !is_hex_color(&chart.background_color) {
            return Err(invalid(
                "chart.background_color",
                format!("'{}' is not a #rrggbb color", chart.background_color),
            ));
        }
        if let Some(bad) = chart.colors.iter().find(|c| !is_hex_color(c)) {
            return Err(invalid(
                "chart.colors",
                format!("'{bad}' is not a #rrggbb color"),
            ));
        }

        if !is_log_filter(&config.logging.level) {
            return Err(invalid(
                "logging.level",
                format!("unknown level or directive '{}'", config.logging.level),
            ));
        }

        if config.data.topic.trim().is_empty() {
            return Err(invalid("data.topic", "cannot be empty"));
        }

        Ok(())
    }
}

impl Config {
    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        ConfigValidator::validate(self)
    }
}

/// Returns true for `#rrggbb` strings.
pub fn is_hex_color(value: &str) -> bool {
    value
        .strip_prefix('#')
        .is_some_and(|hex| hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit()))
}

/// Returns true for a log level or a comma-separated list of
/// `level` / `target=level` directives, e.g. `info,wikiviews_graphs=debug`.
pub fn is_log_filter(value: &str) -> bool {
    let is_level = |level: &str| LOG_LEVELS.contains(&level.to_ascii_lowercase().as_str());
    !value.is_empty()
        && value.split(',').all(|directive| match directive.split_once('=') {
            Some((target, level)) => {
                !target.is_empty() && !target.contains(char::is_whitespace) && is_level(level)
            }
            None => is_level(directive),
        })
}

fn invalid(field: &str, reason: impl AsRef<str>) -> WikiviewsError {
    WikiviewsError::config(format!("{field}: {}", reason.as_ref()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn default_config_is_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn rejects_zero_languages() {
        let mut config = Config::default();
        config.selection.max_languages = 0;
        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("selection.max_languages"), "{err}");
    }

    #[test]
    fn rejects_inverted_bounds() {
        let mut config = Config::default();
        config.selection.min_date = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_default_start_outside_bounds() {
        let mut config = Config::default();
        config.selection.default_start = NaiveDate::from_ymd_opt(2022, 1, 1).unwrap();
        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("default_start"), "{err}");
    }

    #[test]
    fn rejects_bad_colors() {
        let mut config = Config::default();
        config.chart.colors.push("red".to_string());
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.chart.colors.clear();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.chart.background_color = "#fff".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_unknown_log_level() {
        let mut config = Config::default();
        config.logging.level = "verbose".to_string();
        assert!(config.validate().is_err());

        config.logging.level = "DEBUG".to_string();
        assert!(config.validate().is_ok());

        config.logging.level = "info,wikiviews_graphs=trace".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn log_filter_detection() {
        assert!(is_log_filter("warn"));
        assert!(is_log_filter("wikiviews=debug"));
        assert!(is_log_filter("info,wikiviews_graphs=TRACE"));
        assert!(!is_log_filter("info, wikiviews_graphs=trace"));
        assert!(!is_log_filter(""));
        assert!(!is_log_filter("verbose"));
        assert!(!is_log_filter("wikiviews=loud"));
        assert!(!is_log_filter("=debug"));
        assert!(!is_log_filter("info,"));
    }

    #[test]
    fn hex_color_detection() {
        assert!(is_hex_color("#636efa"));
        assert!(is_hex_color("#FFFFFF"));
        assert!(!is_hex_color("636efa"));
        assert!(!is_hex_color("#636efz"));
    }
}
