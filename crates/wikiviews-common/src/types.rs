//! Common type definitions and newtype wrappers for domain modeling.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A country code as it appears in the pageview dataset.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Country(pub String);

impl Country {
    /// Creates a country identifier.
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Country {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Country {
    fn from(code: &str) -> Self {
        Self::new(code)
    }
}

/// A language edition of the encyclopedia, e.g. `en` or `fr`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LangWiki(pub String);

impl LangWiki {
    /// Creates a language edition identifier.
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LangWiki {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for LangWiki {
    fn from(code: &str) -> Self {
        Self::new(code)
    }
}

/// One row of the shared pageview table: daily views of the topic article
/// in one language edition, as seen from one country.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageviewRecord {
    /// Geographic grouping of the readers.
    pub country: Country,
    /// Language edition the views were recorded on.
    #[serde(rename = "langWiki")]
    pub lang_wiki: LangWiki,
    /// Calendar day of the views.
    pub date: NaiveDate,
    /// Number of views on that day.
    pub views: u64,
}

impl PageviewRecord {
    /// Creates a record from its parts.
    pub fn new(
        country: impl Into<Country>,
        lang_wiki: impl Into<LangWiki>,
        date: NaiveDate,
        views: u64,
    ) -> Self {
        Self {
            country: country.into(),
            lang_wiki: lang_wiki.into(),
            date,
            views,
        }
    }
}
