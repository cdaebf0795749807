//! Command line interface.

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use wikiviews_common::parse_date_like;
use wikiviews_config::is_log_filter;
use wikiviews_graphs::SelectionInput;

/// Compare weekly Wikipedia pageviews across the language editions read in
/// one country.
#[derive(Parser, Debug)]
#[command(name = "wikiviews", author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (YAML or TOML)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Pageview CSV file, overriding the configured path
    #[arg(short, long, global = true)]
    pub data: Option<PathBuf>,

    /// Log level or filter directive, overriding the configured level
    #[arg(short, long, global = true, value_parser = parse_log_filter_arg)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// List the countries that can be analyzed
    Countries,
    /// List the language editions available for a country
    Languages {
        /// Country code
        #[arg(long)]
        country: String,
    },
    /// Compare weekly views across languages and render the chart
    Compare(CompareArgs),
}

/// Arguments of the `compare` subcommand.
#[derive(clap::Args, Debug, Clone, PartialEq, Eq)]
pub struct CompareArgs {
    /// Country to analyze (default: first available)
    #[arg(long)]
    pub country: Option<String>,

    /// Language edition to compare; repeat for several (default: first available)
    #[arg(long = "lang")]
    pub languages: Vec<String>,

    /// First day of the window, inclusive
    #[arg(long, value_parser = parse_date_arg)]
    pub start: Option<NaiveDate>,

    /// Last day of the window, inclusive (default: today)
    #[arg(long, value_parser = parse_date_arg)]
    pub end: Option<NaiveDate>,

    /// Chart output path; `.svg` selects SVG, anything else PNG
    #[arg(long, default_value = "chart.png")]
    pub out: PathBuf,

    /// Skip chart rendering
    #[arg(long)]
    pub no_chart: bool,

    /// Also print the weekly table
    #[arg(long, value_enum)]
    pub table: Option<TableFormat>,
}

impl CompareArgs {
    /// Raw selection as typed; absent values fall back to defaults later.
    pub fn selection(&self) -> SelectionInput {
        SelectionInput {
            country: self.country.clone(),
            languages: (!self.languages.is_empty()).then(|| self.languages.clone()),
            start: self.start,
            end: self.end,
        }
    }

    /// Where to write the chart, if at all.
    pub fn chart_path(&self) -> Option<PathBuf> {
        (!self.no_chart).then(|| self.out.clone())
    }
}

/// Output format of the weekly table.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFormat {
    /// `week,langWiki,views` rows
    Csv,
    /// JSON array of records
    Json,
}

fn parse_date_arg(value: &str) -> Result<NaiveDate, String> {
    parse_date_like(value).ok_or_else(|| format!("'{value}' is not a date (expected YYYY-MM-DD)"))
}

fn parse_log_filter_arg(value: &str) -> Result<String, String> {
    if is_log_filter(value) {
        Ok(value.to_string())
    } else {
        Err(format!(
            "'{value}' is not a log level or directive (expected e.g. debug or wikiviews=trace)"
        ))
    }
}
