//! Tracing subscriber setup.

use crate::error::{AppError, AppResult};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    fmt::{self, writer::BoxMakeWriter},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};
use wikiviews_config::LoggingConfig;

/// File name prefix of the daily rolling log.
pub const LOG_FILE_NAME: &str = "wikiviews.log";

/// Builds the event filter: `RUST_LOG` when set, otherwise `level`.
pub fn env_filter(level: &str) -> AppResult<EnvFilter> {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .map_err(|e| AppError::Logging(format!("invalid log filter '{level}': {e}")))
}

/// Installs the global subscriber.
///
/// Events go to stderr, or to a daily rolling file when `directory` is set.
/// The returned guard flushes the file writer and must live until exit.
pub fn init_logging(config: &LoggingConfig) -> AppResult<Option<WorkerGuard>> {
    let filter = env_filter(&config.level)?;

    let (writer, guard) = match &config.directory {
        Some(directory) => {
            let appender = tracing_appender::rolling::daily(directory, LOG_FILE_NAME);
            let (non_blocking, guard) = tracing_appender::non_blocking(appender);
            (BoxMakeWriter::new(non_blocking), Some(guard))
        }
        None => (BoxMakeWriter::new(std::io::stderr), None),
    };
    let to_terminal = guard.is_none();

    let registry = tracing_subscriber::registry().with(filter);
    let result = if config.json {
        registry
            .with(fmt::layer().json().with_writer(writer))
            .try_init()
    } else {
        registry
            .with(fmt::layer().with_ansi(to_terminal).with_writer(writer))
            .try_init()
    };
    result.map_err(|e| AppError::Logging(e.to_string()))?;

    Ok(guard)
}
