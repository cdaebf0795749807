//! Error types and utilities for Wikiviews

use thiserror::Error;

/// Result type alias for Wikiviews operations
pub type Result<T> = std::result::Result<T, WikiviewsError>;

/// Main error type for Wikiviews operations
#[derive(Error, Debug)]
pub enum WikiviewsError {
    /// Configuration related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Pageview data could not be loaded or parsed
    #[error("Data error: {message}{}", line.map(|l| format!(" (line {l})")).unwrap_or_default())]
    Data {
        message: String,
        line: Option<u64>,
    },

    /// Validation errors for user selections
    #[error("Validation error: {message}")]
    Validation {
        message: String,
        field: Option<String>,
    },

    /// Graph generation and plotting errors
    #[error("Graph error: {message}")]
    Graph { message: String },

    /// Internationalization and localization errors
    #[error("Localization error: {message}")]
    Localization {
        message: String,
        locale: Option<String>,
    },

    /// I/O related errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV reading or writing errors
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl WikiviewsError {
    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Create a new data error
    pub fn data(msg: impl Into<String>) -> Self {
        Self::Data {
            message: msg.into(),
            line: None,
        }
    }

    /// Create a new data error pointing at a line of the input
    pub fn data_at(msg: impl Into<String>, line: u64) -> Self {
        Self::Data {
            message: msg.into(),
            line: Some(line),
        }
    }

    /// Create a new validation error for a specific field
    pub fn validation_field(msg: impl Into<String>, field: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
            field: Some(field.into()),
        }
    }

    /// Create a new graph error
    pub fn graph(msg: impl Into<String>) -> Self {
        Self::Graph {
            message: msg.into(),
        }
    }

    /// Create a new localization error
    pub fn localization(msg: impl Into<String>, locale: Option<String>) -> Self {
        Self::Localization {
            message: msg.into(),
            locale,
        }
    }

    /// Returns true for errors caused by the user's selection rather than the
    /// environment.
    pub const fn is_user_error(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }

    /// Field a validation error refers to, if any
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::Validation { field, .. } => field.as_deref(),
            _ => None,
        }
    }
}
