//! Weekly buckets and the tidy (week, langWiki, views) table.

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::Serialize;
use std::collections::HashMap;
use std::io::Write;
use tracing::warn;
use wikiviews_common::{LangWiki, PageviewRecord, Result};

/// Last day of the week containing `date`, for weeks closing on `week_ending`.
///
/// Weeks are right-closed: a date falling on `week_ending` is its own bucket.
/// `None` when the week would end past the last representable date.
pub fn week_bucket(date: NaiveDate, week_ending: Weekday) -> Option<NaiveDate> {
    let current = i64::from(date.weekday().num_days_from_monday());
    let target = i64::from(week_ending.num_days_from_monday());
    date.checked_add_signed(Duration::days((target - current).rem_euclid(7)))
}

/// Summed views of one language edition over one week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeeklyViewRecord {
    /// Last day of the week.
    pub week: NaiveDate,
    /// Language edition.
    #[serde(rename = "langWiki")]
    pub lang_wiki: LangWiki,
    /// Sum of daily views within the week.
    pub views: u64,
}

/// Tidy weekly table, ordered by week then by first appearance of each
/// language in the filtered rows. Never empty when produced by the pipeline.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct WeeklyViews {
    rows: Vec<WeeklyViewRecord>,
}

impl WeeklyViews {
    /// Groups `rows` by (week bucket, langWiki) and sums their views.
    pub fn aggregate(rows: &[&PageviewRecord], week_ending: Weekday) -> Self {
        let mut language_order: Vec<&LangWiki> = Vec::new();
        let mut language_index: HashMap<&LangWiki, usize> = HashMap::new();
        let mut sums: HashMap<(NaiveDate, usize), u64> = HashMap::new();
        let mut unbucketed = 0usize;

        for row in rows {
            let Some(week) = week_bucket(row.date, week_ending) else {
                unbucketed += 1;
                continue;
            };
            let lang = &row.lang_wiki;
            let index = *language_index.entry(lang).or_insert_with(|| {
                language_order.push(lang);
                language_order.len() - 1
            });
            *sums.entry((week, index)).or_insert(0) += row.views;
        }

        if unbucketed > 0 {
            warn!(rows = unbucketed, "Skipped rows whose week ends past the calendar range");
        }

        let mut keys: Vec<(NaiveDate, usize)> = sums.keys().copied().collect();
        keys.sort_unstable();

        let rows = keys
            .into_iter()
            .map(|key| WeeklyViewRecord {
                week: key.0,
                lang_wiki: language_order[key.1].clone(),
                views: sums[&key],
            })
            .collect();

        Self { rows }
    }

    /// Rows in output order.
    pub fn rows(&self) -> &[WeeklyViewRecord] {
        &self.rows
    }

    /// Number of (week, language) rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Languages in order of first appearance in the table.
    pub fn languages(&self) -> Vec<&LangWiki> {
        let mut seen = Vec::new();
        for row in &self.rows {
            if !seen.contains(&&row.lang_wiki) {
                seen.push(&row.lang_wiki);
            }
        }
        seen
    }

    /// Distinct week buckets, ascending.
    pub fn weeks(&self) -> Vec<NaiveDate> {
        let mut weeks: Vec<NaiveDate> = self.rows.iter().map(|r| r.week).collect();
        weeks.dedup();
        weeks
    }

    /// (week, views) points of one language, ascending by week.
    pub fn series(&self, lang: &LangWiki) -> Vec<(NaiveDate, u64)> {
        self.rows
            .iter()
            .filter(|r| &r.lang_wiki == lang)
            .map(|r| (r.week, r.views))
            .collect()
    }

    /// Summed views for one (week, language) pair.
    pub fn views_for(&self, week: NaiveDate, lang: &LangWiki) -> Option<u64> {
        self.rows
            .iter()
            .find(|r| r.week == week && &r.lang_wiki == lang)
            .map(|r| r.views)
    }

    /// Largest weekly sum in the table.
    pub fn max_views(&self) -> u64 {
        self.rows.iter().map(|r| r.views).max().unwrap_or(0)
    }

    /// Writes the table as CSV with a `week,langWiki,views` header.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut writer = csv::Writer::from_writer(writer);
        for row in &self.rows {
            writer.serialize(row)?;
        }
        writer.flush()?;
        Ok(())
    }

    /// Serializes the table as a JSON array of rows.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
