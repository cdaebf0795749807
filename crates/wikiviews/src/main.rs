//! Main entry point for Wikiviews.

use anyhow::Context;
use clap::Parser;
use std::io::Write;
use tracing::{debug, info};
use wikiviews::{init_logging, Cli, Command, ComparisonPage};
use wikiviews_config::ConfigLoader;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config =
        ConfigLoader::load(cli.config.as_deref()).context("failed to load configuration")?;
    if let Some(path) = cli.data {
        config.data.path = path;
    }
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }

    let _guard = init_logging(&config.logging).context("failed to initialize logging")?;
    info!("Starting Wikiviews");
    debug!(?config, "Configuration loaded");

    let page = ComparisonPage::load(config).context("failed to load pageview data")?;
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Command::Countries => {
            page.list_countries(&mut out)?;
        }
        Command::Languages { country } => {
            page.list_languages(&mut out, &country)?;
        }
        Command::Compare(args) => {
            let today = chrono::Local::now().date_naive();
            let report = page.compare(&mut out, &args, today)?;
            debug!(?report, "Comparison finished");
        }
    }

    out.flush()?;
    Ok(())
}
