//! Selection boundary: turns raw user choices into a comparison request.
//!
//! Choices are limited to values present in the table and to a fixed
//! calendar window, so the pipeline never sees an unknown country or
//! language.

use crate::pipeline::ComparisonRequest;
use crate::table::PageviewTable;
use chrono::NaiveDate;
use tracing::debug;
use wikiviews_common::{Country, LangWiki, Result, WikiviewsError};
use wikiviews_config::SelectionConfig;

/// Raw, possibly partial choices as entered by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionInput {
    /// Chosen country, or `None` for the first available one.
    pub country: Option<String>,
    /// Chosen languages, or `None` for the first available one.
    pub languages: Option<Vec<String>>,
    /// Window start, or `None` for the configured default.
    pub start: Option<NaiveDate>,
    /// Window end, or `None` for today (clamped into bounds).
    pub end: Option<NaiveDate>,
}

/// Limits applied to every selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionBounds {
    /// Maximum number of languages.
    pub max_languages: usize,
    /// Start used when none is chosen.
    pub default_start: NaiveDate,
    /// Earliest selectable date.
    pub min_date: NaiveDate,
    /// Latest selectable date.
    pub max_date: NaiveDate,
}

impl From<&SelectionConfig> for SelectionBounds {
    fn from(config: &SelectionConfig) -> Self {
        Self {
            max_languages: config.max_languages,
            default_start: config.default_start,
            min_date: config.min_date,
            max_date: config.max_date,
        }
    }
}

impl Default for SelectionBounds {
    fn default() -> Self {
        Self::from(&SelectionConfig::default())
    }
}

impl SelectionBounds {
    /// Resolves `input` against the options offered by `table`.
    pub fn resolve(
        &self,
        table: &PageviewTable,
        input: &SelectionInput,
        today: NaiveDate,
    ) -> Result<ComparisonRequest> {
        let country = self.resolve_country(table, input.country.as_deref())?;
        let languages = self.resolve_languages(table, &country, input.languages.as_deref())?;

        let start = input.start.unwrap_or(self.default_start);
        let end = input
            .end
            .unwrap_or_else(|| today.clamp(self.min_date, self.max_date));
        self.check_date("start", start)?;
        self.check_date("end", end)?;

        debug!(%country, ?languages, %start, %end, "Resolved selection");
        Ok(ComparisonRequest {
            country,
            languages,
            start,
            end,
        })
    }

    fn resolve_country(&self, table: &PageviewTable, chosen: Option<&str>) -> Result<Country> {
        let options = table.countries();
        match chosen {
            Some(code) => options
                .into_iter()
                .find(|c| c.as_str() == code)
                .ok_or_else(|| {
                    WikiviewsError::validation_field(format!("unknown country '{code}'"), "country")
                }),
            None => options.into_iter().next().ok_or_else(|| {
                WikiviewsError::validation_field("no countries available", "country")
            }),
        }
    }

    fn resolve_languages(
        &self,
        table: &PageviewTable,
        country: &Country,
        chosen: Option<&[String]>,
    ) -> Result<Vec<LangWiki>> {
        let options = table.languages_for(country);
        let Some(chosen) = chosen else {
            return options.into_iter().next().map(|l| vec![l]).ok_or_else(|| {
                WikiviewsError::validation_field(
                    format!("no languages available for '{country}'"),
                    "languages",
                )
            });
        };

        if chosen.is_empty() {
            return Err(WikiviewsError::validation_field(
                "select at least one language",
                "languages",
            ));
        }
        if chosen.len() > self.max_languages {
            return Err(WikiviewsError::validation_field(
                format!("at most {} languages can be compared", self.max_languages),
                "languages",
            ));
        }

        let mut languages: Vec<LangWiki> = Vec::with_capacity(chosen.len());
        for code in chosen {
            let lang = options
                .iter()
                .find(|l| l.as_str() == code)
                .ok_or_else(|| {
                    WikiviewsError::validation_field(
                        format!("language '{code}' has no data for '{country}'"),
                        "languages",
                    )
                })?;
            if languages.contains(lang) {
                return Err(WikiviewsError::validation_field(
                    format!("language '{code}' selected twice"),
                    "languages",
                ));
            }
            languages.push(lang.clone());
        }
        Ok(languages)
    }

    fn check_date(&self, field: &str, date: NaiveDate) -> Result<()> {
        if (self.min_date..=self.max_date).contains(&date) {
            Ok(())
        } else {
            Err(WikiviewsError::validation_field(
                format!(
                    "{field} date {date} is outside {}..={}",
                    self.min_date, self.max_date
                ),
                field,
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wikiviews_common::test_utils::{date, pageview_fixtures};

    fn table() -> PageviewTable {
        PageviewTable::new(pageview_fixtures::multi_country_records())
    }

    fn today() -> NaiveDate {
        date(2024, 6, 1)
    }

    fn langs(codes: &[&str]) -> Option<Vec<String>> {
        Some(codes.iter().map(|c| (*c).to_string()).collect())
    }

    #[test]
    fn defaults_pick_first_options() {
        let request = SelectionBounds::default()
            .resolve(&table(), &SelectionInput::default(), today())
            .unwrap();

        assert_eq!(request.country, Country::from("DE"));
        assert_eq!(request.languages, vec![LangWiki::from("de")]);
        assert_eq!(request.start, date(2024, 10, 6));
        assert_eq!(request.end, today());
    }

    #[test]
    fn default_end_is_clamped_into_bounds() {
        let bounds = SelectionBounds::default();
        let late = bounds
            .resolve(&table(), &SelectionInput::default(), date(2030, 1, 1))
            .unwrap();
        assert_eq!(late.end, date(2025, 10, 6));

        let early = bounds
            .resolve(&table(), &SelectionInput::default(), date(2020, 1, 1))
            .unwrap();
        assert_eq!(early.end, date(2023, 2, 6));
    }

    #[test]
    fn explicit_choices_are_kept_in_order() {
        let input = SelectionInput {
            country: Some("US".to_string()),
            languages: langs(&["fr", "en"]),
            start: Some(date(2024, 1, 1)),
            end: Some(date(2024, 1, 31)),
        };
        let request = SelectionBounds::default().resolve(&table(), &input, today()).unwrap();

        assert_eq!(request.country, Country::from("US"));
        assert_eq!(request.languages, vec![LangWiki::from("fr"), LangWiki::from("en")]);
        assert_eq!((request.start, request.end), (date(2024, 1, 1), date(2024, 1, 31)));
    }

    #[test]
    fn unknown_country_is_rejected() {
        let input = SelectionInput {
            country: Some("FR".to_string()),
            ..SelectionInput::default()
        };
        let err = SelectionBounds::default().resolve(&table(), &input, today()).unwrap_err();
        assert_eq!(err.field(), Some("country"));
    }

    #[test]
    fn language_must_exist_for_country() {
        let input = SelectionInput {
            country: Some("DE".to_string()),
            languages: langs(&["hi"]),
            ..SelectionInput::default()
        };
        let err = SelectionBounds::default().resolve(&table(), &input, today()).unwrap_err();
        assert_eq!(err.field(), Some("languages"));
    }

    #[test]
    fn language_count_is_capped() {
        let bounds = SelectionBounds {
            max_languages: 2,
            ..SelectionBounds::default()
        };
        let input = SelectionInput {
            country: Some("US".to_string()),
            languages: langs(&["en", "es", "fr"]),
            ..SelectionInput::default()
        };
        let err = bounds.resolve(&table(), &input, today()).unwrap_err();
        assert!(err.to_string().contains("at most 2"), "{err}");
    }

    #[test]
    fn empty_and_duplicate_languages_are_rejected() {
        let bounds = SelectionBounds::default();
        let empty = SelectionInput {
            languages: Some(Vec::new()),
            ..SelectionInput::default()
        };
        assert!(bounds.resolve(&table(), &empty, today()).is_err());

        let duplicate = SelectionInput {
            country: Some("US".to_string()),
            languages: langs(&["en", "en"]),
            ..SelectionInput::default()
        };
        assert!(bounds.resolve(&table(), &duplicate, today()).is_err());
    }

    #[test]
    fn dates_outside_bounds_are_rejected() {
        let input = SelectionInput {
            start: Some(date(2022, 12, 31)),
            ..SelectionInput::default()
        };
        let err = SelectionBounds::default().resolve(&table(), &input, today()).unwrap_err();
        assert_eq!(err.field(), Some("start"));
    }

    #[test]
    fn inverted_window_is_accepted() {
        let input = SelectionInput {
            start: Some(date(2024, 3, 1)),
            end: Some(date(2024, 2, 1)),
            ..SelectionInput::default()
        };
        let request = SelectionBounds::default().resolve(&table(), &input, today()).unwrap();
        assert!(request.start > request.end);
    }

    #[test]
    fn bounds_follow_config() {
        let config = SelectionConfig {
            max_languages: 3,
            ..SelectionConfig::default()
        };
        assert_eq!(SelectionBounds::from(&config).max_languages, 3);
    }
}
