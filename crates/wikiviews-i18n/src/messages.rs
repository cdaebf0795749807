//! Type-safe message accessors over the loaded catalog.

use crate::loader::FluentLoader;
use fluent_bundle::{FluentArgs, FluentBundle, FluentResource};
use std::fmt;
use tracing::warn;
use wikiviews_common::{Result, WikiviewsError};

/// Every message the comparison page displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKey {
    /// Page title.
    PageTitle,
    /// Introduction section header.
    IntroHeader,
    /// Dataset description, takes `topic`.
    IntroData,
    /// Research question, takes `topic`.
    IntroQuestion,
    /// How to use the selection inputs.
    IntroInteraction,
    /// Country prompt.
    SelectCountry,
    /// Languages prompt.
    SelectLanguages,
    /// Start date prompt.
    SelectStart,
    /// End date prompt.
    SelectEnd,
    /// Warning shown when the shared dataset is unavailable.
    DataNotLoaded,
    /// Info shown when the selection matches no rows, takes `country`.
    NoData,
    /// Confirmation after writing a chart, takes `path`.
    ChartSaved,
    /// Section heading above the chart, takes `topic`.
    ChartHeading,
    /// Chart caption.
    ChartTitle,
    /// X axis label.
    AxisWeek,
    /// Y axis label.
    AxisViews,
}

impl MessageKey {
    /// All keys, in catalog order.
    pub const ALL: [Self; 16] = [
        Self::PageTitle,
        Self::IntroHeader,
        Self::IntroData,
        Self::IntroQuestion,
        Self::IntroInteraction,
        Self::SelectCountry,
        Self::SelectLanguages,
        Self::SelectStart,
        Self::SelectEnd,
        Self::DataNotLoaded,
        Self::NoData,
        Self::ChartSaved,
        Self::ChartHeading,
        Self::ChartTitle,
        Self::AxisWeek,
        Self::AxisViews,
    ];

    /// Fluent message identifier.
    pub const fn id(self) -> &'static str {
        match self {
            Self::PageTitle => "page-title",
            Self::IntroHeader => "intro-header",
            Self::IntroData => "intro-data",
            Self::IntroQuestion => "intro-question",
            Self::IntroInteraction => "intro-interaction",
            Self::SelectCountry => "select-country",
            Self::SelectLanguages => "select-languages",
            Self::SelectStart => "select-start",
            Self::SelectEnd => "select-end",
            Self::DataNotLoaded => "data-not-loaded",
            Self::NoData => "no-data",
            Self::ChartSaved => "chart-saved",
            Self::ChartHeading => "chart-heading",
            Self::ChartTitle => "chart-title",
            Self::AxisWeek => "axis-week",
            Self::AxisViews => "axis-views",
        }
    }
}

impl fmt::Display for MessageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Message accessor for one locale.
pub struct Messages {
    locale: String,
    bundle: FluentBundle<FluentResource>,
}

impl fmt::Debug for Messages {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Messages")
            .field("locale", &self.locale)
            .field("bundle", &"FluentBundle<FluentResource>")
            .finish()
    }
}

impl Messages {
    /// Loads the catalog for `language`, falling back to en-US.
    pub fn new(language: &str) -> Result<Self> {
        let locale = FluentLoader::resolve_locale(language).to_string();
        let bundle = FluentLoader::load_bundle(&locale)?;
        Ok(Self { locale, bundle })
    }

    /// Locale the catalog was loaded for.
    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// Gets a localized message.
    pub fn get(&self, key: MessageKey) -> Result<String> {
        self.format(key, None)
    }

    /// Gets a localized message with arguments.
    pub fn get_with_args(&self, key: MessageKey, args: &[(&str, &str)]) -> Result<String> {
        let mut fluent_args = FluentArgs::new();
        for (name, value) in args {
            fluent_args.set(*name, *value);
        }
        self.format(key, Some(&fluent_args))
    }

    fn format(&self, key: MessageKey, args: Option<&FluentArgs>) -> Result<String> {
        let pattern = self
            .bundle
            .get_message(key.id())
            .and_then(|message| message.value())
            .ok_or_else(|| {
                WikiviewsError::localization(
                    format!("message '{key}' not found"),
                    Some(self.locale.clone()),
                )
            })?;

        let mut errors = Vec::new();
        let formatted = self.bundle.format_pattern(pattern, args, &mut errors);
        if !errors.is_empty() {
            warn!("Formatting '{key}' in {} reported {} error(s)", self.locale, errors.len());
        }
        Ok(formatted.into_owned())
    }
}
