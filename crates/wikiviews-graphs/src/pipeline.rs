//! Country/language pageview comparison pipeline.
//!
//! shared table → country → languages → date window → weekly sums.
//! Every stage borrows from the table; nothing is copied until the weekly
//! sums are built.

use crate::table::PageviewTable;
use crate::weekly::WeeklyViews;
use chrono::{NaiveDate, Weekday};
use tracing::{debug, instrument, warn};
use wikiviews_common::{Country, LangWiki, PageviewRecord};

/// Validated parameters of one comparison.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparisonRequest {
    /// Country whose readers are compared.
    pub country: Country,
    /// Language editions to compare.
    pub languages: Vec<LangWiki>,
    /// First day of the window, inclusive.
    pub start: NaiveDate,
    /// Last day of the window, inclusive. May precede `start`, in which
    /// case nothing matches.
    pub end: NaiveDate,
}

impl ComparisonRequest {
    /// Builds a request from its parts.
    pub fn new(
        country: impl Into<Country>,
        languages: impl IntoIterator<Item = LangWiki>,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Self {
        Self {
            country: country.into(),
            languages: languages.into_iter().collect(),
            start,
            end,
        }
    }

    /// Whether `record` passes all three filters.
    pub fn matches(&self, record: &PageviewRecord) -> bool {
        record.country == self.country
            && self.languages.contains(&record.lang_wiki)
            && (self.start..=self.end).contains(&record.date)
    }
}

/// Result of a comparison.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComparisonOutcome {
    /// The shared table is absent or empty; nothing was filtered.
    Unavailable,
    /// The selection matched no rows.
    NoData {
        /// Country of the empty selection.
        country: Country,
    },
    /// Weekly sums per language, never empty.
    Weekly(WeeklyViews),
}

impl ComparisonOutcome {
    /// The weekly table, if any.
    pub const fn weekly(&self) -> Option<&WeeklyViews> {
        match self {
            Self::Weekly(weekly) => Some(weekly),
            _ => None,
        }
    }
}

/// Stateless comparison pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComparisonPipeline {
    week_ending: Weekday,
}

impl Default for ComparisonPipeline {
    fn default() -> Self {
        Self::new(Weekday::Sun)
    }
}

impl ComparisonPipeline {
    /// Creates a pipeline whose weeks close on `week_ending`.
    pub const fn new(week_ending: Weekday) -> Self {
        Self { week_ending }
    }

    /// Weekday closing every bucket.
    pub const fn week_ending(&self) -> Weekday {
        self.week_ending
    }

    /// Filters `dataset` to the request and sums views per week and language.
    #[instrument(
        skip(self, dataset, request),
        fields(country = %request.country, languages = request.languages.len())
    )]
    pub fn compare(
        &self,
        dataset: Option<&PageviewTable>,
        request: &ComparisonRequest,
    ) -> ComparisonOutcome {
        let Some(dataset) = dataset.filter(|table| !table.is_empty()) else {
            warn!("Pageview data is not loaded");
            return ComparisonOutcome::Unavailable;
        };

        let filtered = filter(dataset, request);
        if filtered.is_empty() {
            debug!(start = %request.start, end = %request.end, "Selection matched no rows");
            return ComparisonOutcome::NoData {
                country: request.country.clone(),
            };
        }

        let weekly = WeeklyViews::aggregate(&filtered, self.week_ending);
        if weekly.is_empty() {
            return ComparisonOutcome::NoData {
                country: request.country.clone(),
            };
        }
        debug!(
            rows = filtered.len(),
            weekly_rows = weekly.len(),
            "Aggregated weekly pageviews"
        );
        ComparisonOutcome::Weekly(weekly)
    }
}

/// Compares with weeks ending on Sunday.
pub fn compare(dataset: Option<&PageviewTable>, request: &ComparisonRequest) -> ComparisonOutcome {
    ComparisonPipeline::default().compare(dataset, request)
}

/// Applies the country, language and date filters in turn.
pub fn filter<'a>(dataset: &'a PageviewTable, request: &ComparisonRequest) -> Vec<&'a PageviewRecord> {
    let by_country: Vec<&PageviewRecord> = dataset
        .records()
        .iter()
        .filter(|r| r.country == request.country)
        .collect();
    debug!(rows = by_country.len(), "Filtered by country");

    let by_language: Vec<&PageviewRecord> = by_country
        .into_iter()
        .filter(|r| request.languages.contains(&r.lang_wiki))
        .collect();
    debug!(rows = by_language.len(), "Filtered by language");

    let by_date: Vec<&PageviewRecord> = by_language
        .into_iter()
        .filter(|r| request.start <= r.date && r.date <= request.end)
        .collect();
    debug!(rows = by_date.len(), "Filtered by date window");

    by_date
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;
    use wikiviews_common::test_utils::{date, pageview_fixtures};

    fn request(langs: &[&str], start: NaiveDate, end: NaiveDate) -> ComparisonRequest {
        ComparisonRequest::new("US", langs.iter().map(|l| LangWiki::from(*l)), start, end)
    }

    #[test]
    fn scenario_one_week_two_languages() {
        let table = PageviewTable::new(pageview_fixtures::scenario_records());
        let outcome = compare(
            Some(&table),
            &request(&["en", "fr"], date(2024, 1, 1), date(2024, 1, 7)),
        );

        let weekly = outcome.weekly().expect("weekly result");
        assert_eq!(weekly.weeks().len(), 1);
        assert_eq!(weekly.views_for(date(2024, 1, 7), &"en".into()), Some(15));
        assert_eq!(weekly.views_for(date(2024, 1, 7), &"fr".into()), Some(7));
    }

    #[test]
    fn scenario_window_without_rows() {
        let table = PageviewTable::new(pageview_fixtures::scenario_records());
        let outcome = compare(Some(&table), &request(&["en"], date(2024, 2, 1), date(2024, 2, 7)));
        assert_eq!(
            outcome,
            ComparisonOutcome::NoData {
                country: Country::from("US")
            }
        );
    }

    #[test]
    fn scenario_missing_or_empty_dataset() {
        let req = request(&["en"], date(2024, 1, 1), date(2024, 1, 7));
        assert_eq!(compare(None, &req), ComparisonOutcome::Unavailable);
        assert_eq!(
            compare(Some(&PageviewTable::default()), &req),
            ComparisonOutcome::Unavailable
        );
    }

    #[test]
    fn single_day_window_keeps_only_that_day() {
        let table = PageviewTable::new(pageview_fixtures::scenario_records());
        let req = request(&["en", "fr"], date(2024, 1, 3), date(2024, 1, 3));
        let rows = filter(&table, &req);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].date, date(2024, 1, 3));
    }

    #[test]
    fn inverted_window_yields_no_data() {
        let table = PageviewTable::new(pageview_fixtures::scenario_records());
        let outcome = compare(Some(&table), &request(&["en"], date(2024, 1, 7), date(2024, 1, 1)));
        assert!(matches!(outcome, ComparisonOutcome::NoData { .. }));
    }

    #[test]
    fn other_countries_are_excluded() {
        let table = PageviewTable::new(pageview_fixtures::multi_country_records());
        let req = ComparisonRequest::new("DE", [LangWiki::from("en")], date(2024, 1, 1), date(2024, 1, 7));
        let rows = filter(&table, &req);
        assert_eq!(rows.len(), 7);
        assert!(rows.iter().all(|r| r.country.as_str() == "DE"));
    }

    #[test]
    fn week_anchor_changes_buckets() {
        let table = PageviewTable::new(pageview_fixtures::scenario_records());
        let req = request(&["en"], date(2024, 1, 1), date(2024, 1, 7));
        let outcome = ComparisonPipeline::new(Weekday::Tue).compare(Some(&table), &req);

        let weekly = outcome.weekly().expect("weekly result");
        assert_eq!(weekly.weeks(), vec![date(2024, 1, 2), date(2024, 1, 9)]);
    }

    #[test]
    fn rows_at_the_calendar_end_do_not_panic() {
        let last = NaiveDate::MAX;
        let anchor = last.weekday().succ();
        let table = PageviewTable::new(vec![PageviewRecord::new("US", "en", last, 3)]);
        let req = request(&["en"], date(2024, 1, 1), last);

        let outcome = ComparisonPipeline::new(anchor).compare(Some(&table), &req);
        assert!(matches!(outcome, ComparisonOutcome::NoData { .. }));
    }

    #[test]
    fn compare_is_idempotent() {
        let table = PageviewTable::new(pageview_fixtures::multi_country_records());
        let req = ComparisonRequest::new(
            "IN",
            ["ta", "en", "hi"].map(LangWiki::from),
            date(2024, 1, 3),
            date(2024, 1, 25),
        );
        assert_eq!(compare(Some(&table), &req), compare(Some(&table), &req));
    }
}
