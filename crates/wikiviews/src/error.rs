//! Application-wide error types using thiserror.

use wikiviews_common::WikiviewsError;

/// Main application error type.
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    /// Configuration, data, selection or rendering error.
    #[error(transparent)]
    Wikiviews(#[from] WikiviewsError),

    /// The tracing subscriber could not be installed.
    #[error("Logging setup failed: {0}")]
    Logging(String),

    /// I/O error while writing page output.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    /// Whether the error stems from user input rather than the environment.
    pub const fn is_user_error(&self) -> bool {
        match self {
            Self::Wikiviews(err) => err.is_user_error(),
            _ => false,
        }
    }
}

impl From<wikiviews_config::ConfigError> for AppError {
    fn from(err: wikiviews_config::ConfigError) -> Self {
        Self::Wikiviews(err.into())
    }
}

/// Result type for the application.
pub type AppResult<T> = Result<T, AppError>;
