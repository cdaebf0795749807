//! Test utilities and shared test helpers for Wikiviews.
//!
//! This module provides common testing utilities, fixtures, and helper functions
//! that can be used across all crates in the workspace for unit and integration testing.

use chrono::NaiveDate;
use std::sync::Once;

#[cfg(any(test, feature = "tracing-subscriber"))]
use tracing_subscriber::{fmt, EnvFilter};

/// Initialize test logging once per test run.
static INIT: Once = Once::new();

/// Initialize logging for tests with a sensible default configuration.
/// This function is safe to call multiple times and will only initialize once.
#[cfg(any(test, feature = "tracing-subscriber"))]
pub fn init_test_logging() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

        let _ = fmt().with_test_writer().with_env_filter(filter).try_init();
    });
}

/// No-op version when tracing-subscriber is not available
#[cfg(not(any(test, feature = "tracing-subscriber")))]
pub fn init_test_logging() {
    INIT.call_once(|| {});
}

/// Shorthand for building a calendar date in tests.
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid test date")
}

/// Pageview record fixtures.
pub mod pageview_fixtures {
    use super::date;
    use crate::PageviewRecord;

    /// The three-row dataset used by the weekly aggregation scenarios.
    pub fn scenario_records() -> Vec<PageviewRecord> {
        vec![
            PageviewRecord::new("US", "en", date(2024, 1, 1), 10),
            PageviewRecord::new("US", "en", date(2024, 1, 3), 5),
            PageviewRecord::new("US", "fr", date(2024, 1, 2), 7),
        ]
    }

    /// A multi-country dataset spanning several weeks with one row per
    /// (country, language, day).
    pub fn multi_country_records() -> Vec<PageviewRecord> {
        let mut records = Vec::new();
        let langs: &[(&str, &[&str])] = &[
            ("US", &["en", "es", "fr"]),
            ("DE", &["de", "en"]),
            ("IN", &["en", "hi", "ta"]),
        ];
        for (country, languages) in langs {
            for (li, lang) in languages.iter().enumerate() {
                for day in 0..28u64 {
                    let d = date(2024, 1, 1) + chrono::Duration::days(day as i64);
                    let views = 100 * (li as u64 + 1) + day;
                    records.push(PageviewRecord::new(*country, *lang, d, views));
                }
            }
        }
        records
    }

    /// CSV rendition of [`scenario_records`] with the dataset's column names.
    pub fn scenario_csv() -> &'static str {
        "country,langWiki,date,views\n\
         US,en,2024-01-01,10\n\
         US,en,2024-01-03,5\n\
         US,fr,2024-01-02,7\n"
    }
}

/// Configuration-related test utilities.
pub mod config_fixtures {
    /// Create a minimal valid test configuration as YAML string.
    pub fn minimal_config_yaml() -> &'static str {
        r#"
data:
  path: "pageviews.csv"
"#
    }

    /// Create a full test configuration as YAML string.
    pub fn full_config_yaml() -> &'static str {
        concat!(
            "language: \"en-US\"\n",
            "\n",
            "data:\n",
            "  path: \"data/pageviews.csv\"\n",
            "  topic: \"Climate Change\"\n",
            "\n",
            "selection:\n",
            "  max_languages: 4\n",
            "  default_start: \"2024-01-07\"\n",
            "  min_date: \"2023-02-06\"\n",
            "  max_date: \"2025-10-06\"\n",
            "\n",
            "aggregation:\n",
            "  week_ending: \"Sat\"\n",
            "\n",
            "chart:\n",
            "  width: 1024\n",
            "  height: 576\n",
            "  markers: true\n",
            "  marker_size: 4\n",
            "  line_width: 2\n",
            "  enable_grid: false\n",
            "  background_color: \"#fafafa\"\n",
            "  colors:\n",
            "    - \"#636efa\"\n",
            "    - \"#ef553b\"\n",
            "\n",
            "logging:\n",
            "  level: \"debug\"\n",
            "  json: true\n",
        )
    }
}

/// Write `contents` to a fresh temporary file with the given extension.
#[cfg(any(test, feature = "tempfile"))]
pub fn temp_file_with(contents: &str, extension: &str) -> tempfile::NamedTempFile {
    use std::io::Write;

    let mut file = tempfile::Builder::new()
        .suffix(&format!(".{extension}"))
        .tempfile()
        .expect("Failed to create temporary file");
    file.write_all(contents.as_bytes())
        .expect("Failed to write temporary file");
    file.flush().expect("Failed to flush temporary file");
    file
}

/// Create a temporary directory for tests that automatically cleans up.
#[cfg(any(test, feature = "tempfile"))]
pub fn create_temp_dir() -> tempfile::TempDir {
    tempfile::tempdir().expect("Failed to create temporary directory")
}

/// Property-based testing utilities using proptest.
#[cfg(any(test, feature = "proptest"))]
pub mod property_testing {
    use crate::PageviewRecord;
    use chrono::{Duration, NaiveDate};
    use proptest::prelude::*;

    /// Strategy for a country drawn from a small fixed pool.
    pub fn country_strategy() -> impl Strategy<Value = String> {
        prop::sample::select(vec!["US", "DE", "IN", "BR"]).prop_map(str::to_string)
    }

    /// Strategy for a language edition drawn from a small fixed pool.
    pub fn lang_strategy() -> impl Strategy<Value = String> {
        prop::sample::select(vec!["en", "de", "fr", "es", "hi", "pt", "ta"]).prop_map(str::to_string)
    }

    /// Strategy for a date within 2024.
    pub fn date_strategy() -> impl Strategy<Value = NaiveDate> {
        (0i64..366).prop_map(|offset| {
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or_default() + Duration::days(offset)
        })
    }

    /// Strategy for a single pageview record.
    pub fn record_strategy() -> impl Strategy<Value = PageviewRecord> {
        (country_strategy(), lang_strategy(), date_strategy(), 0u64..10_000).prop_map(
            |(country, lang, date, views)| PageviewRecord::new(country.as_str(), lang.as_str(), date, views),
        )
    }

    /// Strategy for a dataset of up to `max_len` records.
    pub fn records_strategy(max_len: usize) -> impl Strategy<Value = Vec<PageviewRecord>> {
        prop::collection::vec(record_strategy(), 0..max_len)
    }
}
