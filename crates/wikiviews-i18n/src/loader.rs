//! Fluent bundle loading from the embedded catalogs.

use fluent_bundle::{FluentBundle, FluentResource};
use once_cell::sync::Lazy;
use std::collections::BTreeMap;
use tracing::{debug, warn};
use unic_langid::LanguageIdentifier;
use wikiviews_common::{Result, WikiviewsError};

/// Locale used when the requested one has no catalog.
pub const FALLBACK_LOCALE: &str = "en-US";

/// Embedded catalogs keyed by locale code.
static CATALOGS: Lazy<BTreeMap<&'static str, &'static str>> = Lazy::new(|| {
    BTreeMap::from([
        ("en-US", include_str!("../locales/en-US/main.ftl")),
        ("de-DE", include_str!("../locales/de-DE/main.ftl")),
    ])
});

/// Fluent bundle loader.
pub struct FluentLoader;

impl FluentLoader {
    /// Locale codes with an embedded catalog, sorted.
    pub fn available_locales() -> Vec<&'static str> {
        CATALOGS.keys().copied().collect()
    }

    /// Resolves a requested locale to one with a catalog.
    ///
    /// Matches exactly first, then by primary language (`de` or `de-AT` pick
    /// `de-DE`), then falls back to [`FALLBACK_LOCALE`].
    pub fn resolve_locale(requested: &str) -> &'static str {
        let requested = requested.trim().replace('_', "-");
        if let Some((code, _)) = CATALOGS
            .iter()
            .find(|(code, _)| code.eq_ignore_ascii_case(&requested))
        {
            return *code;
        }

        let primary = requested.split('-').next().unwrap_or_default();
        if let Some((code, _)) = CATALOGS.iter().find(|(code, _)| {
            code.split('-')
                .next()
                .is_some_and(|p| p.eq_ignore_ascii_case(primary))
        }) {
            debug!("Locale '{requested}' resolved to '{code}'");
            return *code;
        }

        warn!("No catalog for locale '{requested}', falling back to {FALLBACK_LOCALE}");
        FALLBACK_LOCALE
    }

    /// Loads a fluent bundle for the given locale, with fallback.
    pub fn load_bundle(requested: &str) -> Result<FluentBundle<FluentResource>> {
        let locale = Self::resolve_locale(requested);
        let source = CATALOGS.get(locale).copied().ok_or_else(|| {
            WikiviewsError::localization("no catalog embedded", Some(locale.to_string()))
        })?;

        let lang_id: LanguageIdentifier = locale.parse().map_err(|e| {
            WikiviewsError::localization(format!("invalid locale: {e}"), Some(locale.to_string()))
        })?;

        let resource = FluentResource::try_new(source.to_string()).map_err(|(_, errors)| {
            WikiviewsError::localization(
                format!("catalog has {} syntax error(s)", errors.len()),
                Some(locale.to_string()),
            )
        })?;

        let mut bundle = FluentBundle::new(vec![lang_id]);
        // Plain terminal output, no Unicode isolation marks around arguments
        bundle.set_use_isolating(false);
        bundle.add_resource(resource).map_err(|errors| {
            WikiviewsError::localization(
                format!("catalog has {} conflicting message(s)", errors.len()),
                Some(locale.to_string()),
            )
        })?;

        debug!("Loaded message catalog for {locale}");
        Ok(bundle)
    }
}
