//! Integration tests for wikiviews-graphs crate.
//!
//! These tests run the comparison pipeline end to end, from CSV text to the
//! weekly table and its exports.

use chrono::{Datelike, NaiveDate, Weekday};
use proptest::prelude::*;
use std::collections::BTreeMap;
use wikiviews_common::test_utils::property_testing::{date_strategy, lang_strategy, records_strategy};
use wikiviews_common::test_utils::{date, init_test_logging, pageview_fixtures, temp_file_with};
use wikiviews_common::{Country, LangWiki};
use wikiviews_config::Config;
use wikiviews_graphs::{
    compare, filter, week_bucket, ComparisonOutcome, ComparisonRequest, PageviewTable,
    SelectionBounds, SelectionInput, SharedData,
};

#[test]
fn test_csv_to_weekly_table() {
    init_test_logging();

    let file = temp_file_with(pageview_fixtures::scenario_csv(), "csv");
    let shared = SharedData::load(file.path()).unwrap();
    let request = ComparisonRequest::new(
        "US",
        ["en", "fr"].map(LangWiki::from),
        date(2024, 1, 1),
        date(2024, 1, 7),
    );

    let outcome = compare(shared.pageviews(), &request);
    let weekly = outcome.weekly().expect("weekly result");

    let mut csv = Vec::new();
    weekly.write_csv(&mut csv).unwrap();
    assert_eq!(
        String::from_utf8(csv).unwrap(),
        "week,langWiki,views\n2024-01-07,en,15\n2024-01-07,fr,7\n"
    );
}

#[test]
fn test_missing_file_is_unavailable() {
    let dir = wikiviews_common::test_utils::create_temp_dir();
    let shared = SharedData::load(&dir.path().join("absent.csv")).unwrap();
    let request = ComparisonRequest::new("US", [LangWiki::from("en")], date(2024, 1, 1), date(2024, 1, 7));

    assert_eq!(compare(shared.pageviews(), &request), ComparisonOutcome::Unavailable);
}

#[test]
fn test_malformed_file_is_an_error() {
    let file = temp_file_with("country,langWiki,date,views\nUS,en,2024-01-01,many\n", "csv");
    let err = SharedData::load(file.path()).unwrap_err();
    assert!(err.to_string().contains("line 2"), "{err}");
}

#[test]
fn test_selection_then_compare() {
    let table = PageviewTable::new(pageview_fixtures::multi_country_records());
    let bounds = SelectionBounds::from(&Config::default().selection);
    let input = SelectionInput {
        country: Some("IN".to_string()),
        languages: Some(vec!["hi".to_string(), "ta".to_string()]),
        start: Some(date(2024, 1, 1)),
        end: Some(date(2024, 1, 14)),
    };

    let request = bounds.resolve(&table, &input, date(2024, 6, 1)).unwrap();
    let outcome = compare(Some(&table), &request);
    let weekly = outcome.weekly().expect("weekly result");

    assert_eq!(weekly.weeks(), vec![date(2024, 1, 7), date(2024, 1, 14)]);
    let languages: Vec<&str> = weekly.languages().iter().map(|l| l.as_str()).collect();
    assert_eq!(languages, vec!["hi", "ta"]);
}

#[test]
fn test_json_export_is_tidy() {
    let table = PageviewTable::new(pageview_fixtures::scenario_records());
    let request = ComparisonRequest::new("US", [LangWiki::from("fr")], date(2024, 1, 1), date(2024, 1, 7));
    let outcome = compare(Some(&table), &request);

    let json: serde_json::Value =
        serde_json::from_str(&outcome.weekly().unwrap().to_json().unwrap()).unwrap();
    assert_eq!(
        json,
        serde_json::json!([{ "week": "2024-01-07", "langWiki": "fr", "views": 7 }])
    );
}

fn window() -> impl Strategy<Value = (NaiveDate, NaiveDate)> {
    (date_strategy(), date_strategy())
}

fn languages() -> impl Strategy<Value = Vec<LangWiki>> {
    prop::collection::btree_set(lang_strategy(), 1..4)
        .prop_map(|set| set.into_iter().map(LangWiki::new).collect())
}

proptest! {
    #[test]
    fn prop_filter_is_conjunctive(
        records in records_strategy(60),
        langs in languages(),
        (start, end) in window(),
    ) {
        let table = PageviewTable::new(records);
        let request = ComparisonRequest::new("US", langs, start, end);
        let kept = filter(&table, &request);

        prop_assert!(kept.iter().all(|r| request.matches(r)));
        let expected = table.records().iter().filter(|r| request.matches(r)).count();
        prop_assert_eq!(kept.len(), expected);
    }

    #[test]
    fn prop_weekly_sums_are_exact(
        records in records_strategy(60),
        langs in languages(),
        (start, end) in window(),
    ) {
        let table = PageviewTable::new(records);
        let request = ComparisonRequest::new("US", langs, start, end);

        let mut expected: BTreeMap<(NaiveDate, LangWiki), u64> = BTreeMap::new();
        for record in table.records().iter().filter(|r| request.matches(r)) {
            *expected
                .entry((week_bucket(record.date, Weekday::Sun).unwrap(), record.lang_wiki.clone()))
                .or_default() += record.views;
        }

        match compare(Some(&table), &request) {
            ComparisonOutcome::Weekly(weekly) => {
                prop_assert_eq!(weekly.len(), expected.len());
                for row in weekly.rows() {
                    prop_assert_eq!(
                        expected.get(&(row.week, row.lang_wiki.clone())).copied(),
                        Some(row.views)
                    );
                }
            }
            ComparisonOutcome::NoData { country } => {
                prop_assert!(expected.is_empty());
                prop_assert_eq!(country, Country::from("US"));
            }
            ComparisonOutcome::Unavailable => prop_assert!(table.is_empty()),
        }
    }

    #[test]
    fn prop_week_bucket_closes_the_week(day in date_strategy()) {
        let bucket = week_bucket(day, Weekday::Sun).unwrap();
        prop_assert_eq!(bucket.weekday(), Weekday::Sun);
        prop_assert!(bucket >= day);
        prop_assert!((bucket - day).num_days() < 7);
    }
}
