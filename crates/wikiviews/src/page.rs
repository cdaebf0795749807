//! The comparison page: introduction, selection, outcome and chart.

use crate::cli::{CompareArgs, TableFormat};
use crate::error::AppResult;
use chrono::NaiveDate;
use std::io::Write;
use std::path::PathBuf;
use tracing::{info, instrument, warn};
use wikiviews_common::{Country, LangWiki, WikiviewsError};
use wikiviews_config::Config;
use wikiviews_graphs::{
    ChartLabels, ComparisonOutcome, ComparisonPipeline, GraphRenderer, SelectionBounds,
    SharedData, WeeklyViews, WeeklyViewsChart,
};
use wikiviews_i18n::{MessageKey, Messages};

/// What a `compare` run ended with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageReport {
    /// The shared data was not loaded; a warning was shown.
    Unavailable,
    /// The selection matched nothing; an info message was shown.
    NoData {
        /// Country of the empty selection.
        country: Country,
    },
    /// Weekly sums were computed.
    Compared {
        /// The weekly table.
        weekly: WeeklyViews,
        /// Where the chart was written, if it was rendered.
        chart: Option<PathBuf>,
    },
}

/// Renders the comparison page to a text sink.
pub struct ComparisonPage {
    config: Config,
    data: SharedData,
    messages: Messages,
    pipeline: ComparisonPipeline,
}

impl ComparisonPage {
    /// Creates the page over already loaded shared data.
    pub fn new(config: Config, data: SharedData) -> AppResult<Self> {
        let messages = Messages::new(&config.language)?;
        let pipeline = ComparisonPipeline::new(config.aggregation.week_ending);
        Ok(Self {
            config,
            data,
            messages,
            pipeline,
        })
    }

    /// Loads the configured data file and creates the page.
    pub fn load(config: Config) -> AppResult<Self> {
        let data = SharedData::load(&config.data.path)?;
        Self::new(config, data)
    }

    /// Catalog used for page texts.
    pub const fn messages(&self) -> &Messages {
        &self.messages
    }

    /// Writes the selectable countries, one per line.
    pub fn list_countries<W: Write>(&self, out: &mut W) -> AppResult<Option<Vec<Country>>> {
        let Some(table) = self.data.pageviews() else {
            self.write_unavailable(out)?;
            return Ok(None);
        };

        writeln!(out, "{}", self.messages.get(MessageKey::SelectCountry)?)?;
        let countries = table.countries();
        for country in &countries {
            writeln!(out, "{country}")?;
        }
        Ok(Some(countries))
    }

    /// Writes the selectable language editions of `country`, one per line.
    pub fn list_languages<W: Write>(
        &self,
        out: &mut W,
        country: &str,
    ) -> AppResult<Option<Vec<LangWiki>>> {
        let Some(table) = self.data.pageviews() else {
            self.write_unavailable(out)?;
            return Ok(None);
        };

        let country = Country::from(country);
        if !table.countries().contains(&country) {
            return Err(
                WikiviewsError::validation_field(format!("unknown country '{country}'"), "country")
                    .into(),
            );
        }

        writeln!(out, "{}", self.messages.get(MessageKey::SelectLanguages)?)?;
        let languages = table.languages_for(&country);
        for lang in &languages {
            writeln!(out, "{lang}")?;
        }
        Ok(Some(languages))
    }

    /// Runs the whole page: title, introduction, selection, comparison and
    /// chart. Without loaded data only the title and the warning are written.
    #[instrument(skip_all)]
    pub fn compare<W: Write>(
        &self,
        out: &mut W,
        args: &CompareArgs,
        today: NaiveDate,
    ) -> AppResult<PageReport> {
        writeln!(out, "{}", self.messages.get(MessageKey::PageTitle)?)?;
        writeln!(out)?;

        let Some(table) = self.data.pageviews() else {
            self.write_unavailable(out)?;
            return Ok(PageReport::Unavailable);
        };
        self.write_introduction(out)?;

        let bounds = SelectionBounds::from(&self.config.selection);
        let request = bounds.resolve(table, &args.selection(), today)?;
        self.write_selection(out, &request.country, &request.languages, request.start, request.end)?;

        match self.pipeline.compare(Some(table), &request) {
            ComparisonOutcome::Unavailable => {
                self.write_unavailable(out)?;
                Ok(PageReport::Unavailable)
            }
            ComparisonOutcome::NoData { country } => {
                info!(%country, "No pageview data for selection");
                let text = self
                    .messages
                    .get_with_args(MessageKey::NoData, &[("country", country.as_str())])?;
                writeln!(out, "{text}")?;
                Ok(PageReport::NoData { country })
            }
            ComparisonOutcome::Weekly(weekly) => {
                let chart = match args.chart_path() {
                    Some(path) => Some(self.render_chart(out, &weekly, path)?),
                    None => None,
                };
                if let Some(format) = args.table {
                    write_table(out, &weekly, format)?;
                }
                Ok(PageReport::Compared { weekly, chart })
            }
        }
    }

    fn write_introduction<W: Write>(&self, out: &mut W) -> AppResult<()> {
        let topic = [("topic", self.config.data.topic.as_str())];
        writeln!(out, "{}", self.messages.get(MessageKey::IntroHeader)?)?;
        writeln!(out, "{}", self.messages.get_with_args(MessageKey::IntroData, &topic)?)?;
        writeln!(out, "{}", self.messages.get_with_args(MessageKey::IntroQuestion, &topic)?)?;
        writeln!(out, "{}", self.messages.get(MessageKey::IntroInteraction)?)?;
        writeln!(out)?;
        Ok(())
    }

    fn write_selection<W: Write>(
        &self,
        out: &mut W,
        country: &Country,
        languages: &[LangWiki],
        start: NaiveDate,
        end: NaiveDate,
    ) -> AppResult<()> {
        let languages: Vec<&str> = languages.iter().map(LangWiki::as_str).collect();
        writeln!(out, "{} {country}", self.messages.get(MessageKey::SelectCountry)?)?;
        writeln!(
            out,
            "{} {}",
            self.messages.get(MessageKey::SelectLanguages)?,
            languages.join(", ")
        )?;
        writeln!(out, "{} {start}", self.messages.get(MessageKey::SelectStart)?)?;
        writeln!(out, "{} {end}", self.messages.get(MessageKey::SelectEnd)?)?;
        writeln!(out)?;
        Ok(())
    }

    fn write_unavailable<W: Write>(&self, out: &mut W) -> AppResult<()> {
        warn!(path = %self.config.data.path.display(), "Pageview data is not loaded");
        writeln!(out, "{}", self.messages.get(MessageKey::DataNotLoaded)?)?;
        Ok(())
    }

    fn render_chart<W: Write>(
        &self,
        out: &mut W,
        weekly: &WeeklyViews,
        path: PathBuf,
    ) -> AppResult<PathBuf> {
        let heading = self.messages.get_with_args(
            MessageKey::ChartHeading,
            &[("topic", self.config.data.topic.as_str())],
        )?;
        writeln!(out, "{heading}")?;

        let labels = ChartLabels::from_messages(&self.messages)?;
        let chart = WeeklyViewsChart::new(self.config.chart.clone(), labels);
        chart.render_to_file(weekly, &path)?;

        let shown = path.display().to_string();
        writeln!(
            out,
            "{}",
            self.messages
                .get_with_args(MessageKey::ChartSaved, &[("path", shown.as_str())])?
        )?;
        Ok(path)
    }
}

fn write_table<W: Write>(out: &mut W, weekly: &WeeklyViews, format: TableFormat) -> AppResult<()> {
    match format {
        TableFormat::Csv => weekly.write_csv(&mut *out)?,
        TableFormat::Json => writeln!(out, "{}", weekly.to_json()?)?,
    }
    Ok(())
}

impl std::fmt::Debug for ComparisonPage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComparisonPage")
            .field("locale", &self.messages.locale())
            .field("data_path", &self.config.data.path)
            .field("pipeline", &self.pipeline)
            .finish_non_exhaustive()
    }
}
