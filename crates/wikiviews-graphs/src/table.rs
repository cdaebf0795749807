//! The shared pageview table and its hand-off between loader and page.

use chrono::NaiveDate;
use serde::Deserialize;
use std::collections::BTreeSet;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info, instrument, warn};
use wikiviews_common::{parse_date_like, Country, LangWiki, PageviewRecord, Result, WikiviewsError};

/// Columns every pageview CSV must carry.
pub const REQUIRED_COLUMNS: [&str; 4] = ["country", "langWiki", "date", "views"];

/// Raw CSV row before date and count parsing.
#[derive(Debug, Deserialize)]
struct CsvRow {
    country: String,
    #[serde(rename = "langWiki")]
    lang_wiki: String,
    date: String,
    views: String,
}

/// In-memory pageview table, one row per (country, langWiki, date).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageviewTable {
    records: Vec<PageviewRecord>,
}

impl PageviewTable {
    /// Wraps already parsed records.
    pub fn new(records: Vec<PageviewRecord>) -> Self {
        Self { records }
    }

    /// Loads a table from a CSV file.
    #[instrument]
    pub fn from_csv_path(path: &Path) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let table = Self::from_reader(file)?;
        info!("Loaded {} pageview rows from {}", table.len(), path.display());
        Ok(table)
    }

    /// Loads a table from any CSV source with a header row.
    ///
    /// Column order is free and extra columns are ignored. Dates may be plain
    /// dates or timestamps; only the calendar day is kept.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
        let headers = reader.headers()?.clone();
        if let Some(missing) = REQUIRED_COLUMNS
            .iter()
            .find(|column| !headers.iter().any(|h| h == **column))
        {
            return Err(WikiviewsError::data(format!("missing column '{missing}'")));
        }

        let mut records = Vec::new();
        for result in reader.records() {
            let raw = result?;
            let line = raw.position().map_or(0, csv::Position::line);
            let row: CsvRow = raw.deserialize(Some(&headers))?;

            let date = parse_date_like(&row.date).ok_or_else(|| {
                WikiviewsError::data_at(format!("invalid date '{}'", row.date), line)
            })?;
            let views = parse_views(&row.views).ok_or_else(|| {
                WikiviewsError::data_at(format!("invalid view count '{}'", row.views), line)
            })?;

            records.push(PageviewRecord {
                country: Country(row.country),
                lang_wiki: LangWiki(row.lang_wiki),
                date,
                views,
            });
        }

        debug!("Parsed {} pageview rows", records.len());
        Ok(Self { records })
    }

    /// All rows in load order.
    pub fn records(&self) -> &[PageviewRecord] {
        &self.records
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct countries, sorted ascending.
    pub fn countries(&self) -> Vec<Country> {
        self.records
            .iter()
            .map(|r| &r.country)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .cloned()
            .collect()
    }

    /// Distinct language editions seen for `country`, sorted ascending.
    pub fn languages_for(&self, country: &Country) -> Vec<LangWiki> {
        self.records
            .iter()
            .filter(|r| &r.country == country)
            .map(|r| &r.lang_wiki)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .cloned()
            .collect()
    }

    /// Earliest and latest date in the table.
    pub fn date_span(&self) -> Option<(NaiveDate, NaiveDate)> {
        let min = self.records.iter().map(|r| r.date).min()?;
        let max = self.records.iter().map(|r| r.date).max()?;
        Some((min, max))
    }
}

impl From<Vec<PageviewRecord>> for PageviewTable {
    fn from(records: Vec<PageviewRecord>) -> Self {
        Self::new(records)
    }
}

/// Parses a view count. Integral floats such as `12.0` are accepted since
/// dataframe exports often write counts that way.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
fn parse_views(raw: &str) -> Option<u64> {
    let raw = raw.trim();
    if let Ok(views) = raw.parse::<u64>() {
        return Some(views);
    }
    let value = raw.parse::<f64>().ok()?;
    (value.is_finite() && value >= 0.0 && value.fract() == 0.0 && value <= u64::MAX as f64)
        .then(|| value as u64)
}

/// Data handed from the loading step to the comparison page.
///
/// An absent table is a normal, reportable state rather than an error.
#[derive(Debug, Clone, Default)]
pub struct SharedData {
    pageviews: Option<PageviewTable>,
}

impl SharedData {
    /// Nothing loaded.
    pub const fn empty() -> Self {
        Self { pageviews: None }
    }

    /// Shares an already loaded table.
    pub const fn with_pageviews(table: PageviewTable) -> Self {
        Self {
            pageviews: Some(table),
        }
    }

    /// Loads the table at `path`. A missing file leaves the data unloaded;
    /// an unreadable or malformed file is an error.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            warn!("Pageview data file {} does not exist", path.display());
            return Ok(Self::empty());
        }
        Ok(Self::with_pageviews(PageviewTable::from_csv_path(path)?))
    }

    /// The shared table, or `None` when it is absent or empty.
    pub fn pageviews(&self) -> Option<&PageviewTable> {
        self.pageviews.as_ref().filter(|table| !table.is_empty())
    }
}
