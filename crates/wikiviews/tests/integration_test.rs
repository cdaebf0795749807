//! Integration tests for the wikiviews binary crate.
//!
//! These tests drive the page the way `main` does: parse arguments, load a
//! configuration file and a pageview CSV, then run a subcommand.

use clap::Parser;
use std::path::PathBuf;
use wikiviews::{Cli, Command, ComparisonPage, PageReport};
use wikiviews_common::test_utils::{create_temp_dir, date, init_test_logging, temp_file_with};
use wikiviews_config::ConfigLoader;

const PAGEVIEWS_CSV: &str = "country,langWiki,date,views\n\
    US,en,2024-01-01,10\n\
    US,en,2024-01-03,5\n\
    US,fr,2024-01-02,7\n\
    US,en,2024-01-08,4\n\
    DE,de,2024-01-02,30\n";

fn page_for(data: &std::path::Path, config_yaml: &str) -> ComparisonPage {
    let config_file = temp_file_with(config_yaml, "yaml");
    let mut config = ConfigLoader::load(Some(config_file.path())).unwrap();
    config.data.path = data.to_path_buf();
    ComparisonPage::load(config).unwrap()
}

fn compare_args(argv: &[&str]) -> wikiviews::CompareArgs {
    let cli = Cli::try_parse_from(argv).unwrap();
    match cli.command {
        Command::Compare(args) => args,
        other => panic!("expected compare, got {other:?}"),
    }
}

#[test]
fn test_compare_prints_weekly_json() {
    init_test_logging();

    let data = temp_file_with(PAGEVIEWS_CSV, "csv");
    let page = page_for(data.path(), "language: en-US\n");
    let args = compare_args(&[
        "wikiviews", "compare", "--country", "US", "--lang", "en", "--lang", "fr", "--start",
        "2024-01-01", "--end", "2024-01-14", "--no-chart", "--table", "json",
    ]);

    let mut out = Vec::new();
    let report = page.compare(&mut out, &args, date(2024, 6, 1)).unwrap();

    let PageReport::Compared { weekly, chart } = report else {
        panic!("expected weekly result");
    };
    assert_eq!(chart, None);
    assert_eq!(weekly.weeks(), vec![date(2024, 1, 7), date(2024, 1, 14)]);
    assert_eq!(weekly.views_for(date(2024, 1, 14), &"en".into()), Some(4));

    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("\"langWiki\": \"fr\""), "{text}");
}

#[test]
fn test_compare_with_localized_messages() {
    let data = temp_file_with(PAGEVIEWS_CSV, "csv");
    let page = page_for(data.path(), "language: de-DE\n");
    let args = compare_args(&[
        "wikiviews", "compare", "--country", "DE", "--start", "2024-03-01", "--end", "2024-03-31",
        "--no-chart",
    ]);

    let mut out = Vec::new();
    let report = page.compare(&mut out, &args, date(2024, 6, 1)).unwrap();

    assert!(matches!(report, PageReport::NoData { .. }));
    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("'DE'"), "{text}");
    assert_eq!(page.messages().locale(), "de-DE");
}

#[test]
fn test_missing_data_file_degrades_to_warning() {
    let dir = create_temp_dir();
    let page = page_for(&dir.path().join("missing.csv"), "data:\n  topic: Climate Change\n");
    let args = compare_args(&["wikiviews", "compare", "--no-chart"]);

    let mut out = Vec::new();
    let report = page.compare(&mut out, &args, date(2024, 6, 1)).unwrap();

    assert_eq!(report, PageReport::Unavailable);
    assert!(String::from_utf8(out).unwrap().contains("Data not loaded."));
}

#[test]
fn test_language_cap_comes_from_config() {
    let data = temp_file_with(PAGEVIEWS_CSV, "csv");
    let page = page_for(data.path(), "selection:\n  max_languages: 1\n");
    let args = compare_args(&[
        "wikiviews", "compare", "--country", "US", "--lang", "en", "--lang", "fr", "--no-chart",
    ]);

    let err = page.compare(&mut Vec::new(), &args, date(2024, 6, 1)).unwrap_err();
    assert!(err.is_user_error());
}

#[test]
fn test_global_flags_after_subcommand() {
    let cli = Cli::try_parse_from([
        "wikiviews", "languages", "--country", "US", "--data", "views.csv", "--log-level", "debug",
    ])
    .unwrap();

    assert_eq!(cli.data, Some(PathBuf::from("views.csv")));
    assert_eq!(cli.log_level.as_deref(), Some("debug"));
    assert_eq!(
        cli.command,
        Command::Languages {
            country: "US".to_string()
        }
    );
}
