//! Configuration loading utilities

use crate::Config;
use std::env;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};
use wikiviews_common::{Result as WikiviewsResult, WikiviewsError};

/// Environment variable naming an explicit configuration file.
pub const CONFIG_PATH_ENV: &str = "WIKIVIEWS_CONFIG_PATH";

/// Files tried in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILES: [&str; 3] = ["wikiviews.yaml", "wikiviews.yml", "wikiviews.toml"];

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error when reading configuration file
    #[error("Failed to read configuration file {path}: {source}")]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// YAML parsing error
    #[error("Failed to parse YAML configuration: {0}")]
    ParseError(#[from] serde_yaml::Error),

    /// TOML parsing error
    #[error("Failed to parse TOML configuration: {0}")]
    TomlError(#[from] toml::de::Error),

    /// Environment variable parsing error
    #[error("Failed to parse environment variable '{var}': {source}")]
    EnvParseError {
        var: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Configuration validation error
    #[error("Configuration validation failed: {0}")]
    ValidationError(#[from] WikiviewsError),
}

impl From<ConfigError> for WikiviewsError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::ValidationError(inner) => inner,
            other => Self::config(other.to_string()),
        }
    }
}

/// Configuration loader for the application
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a YAML or TOML file with environment variable overrides
    pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::IoError {
            path: path.to_path_buf(),
            source,
        })?;

        let mut config = Self::parse(&content, path)?;
        Self::apply_env_overrides(&mut config)?;
        config.validate()?;

        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Load configuration, trying in order: the explicit path, the
    /// `WIKIVIEWS_CONFIG_PATH` variable, the default files in the working
    /// directory, then built-in defaults.
    pub fn load(explicit: Option<&Path>) -> WikiviewsResult<Config> {
        if let Some(path) = explicit {
            return Ok(Self::load_config(path)?);
        }
        if let Ok(path) = env::var(CONFIG_PATH_ENV) {
            return Ok(Self::load_config(path)?);
        }
        if let Some(path) = DEFAULT_CONFIG_FILES
            .iter()
            .map(Path::new)
            .find(|p| p.exists())
        {
            return Ok(Self::load_config(path)?);
        }

        debug!("No configuration file found, using defaults");
        let mut config = Config::default();
        Self::apply_env_overrides(&mut config)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration text, choosing the format from the file extension.
    pub fn parse(content: &str, path: &Path) -> Result<Config, ConfigError> {
        let is_toml = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));

        if is_toml {
            Ok(toml::from_str(content)?)
        } else {
            Ok(serde_yaml::from_str(content)?)
        }
    }

    /// Apply environment variable overrides to configuration
    pub fn apply_env_overrides(config: &mut Config) -> Result<(), ConfigError> {
        Self::apply_overrides_from(config, |var| env::var(var).ok())
    }

    /// Apply overrides using `lookup` to resolve variable names.
    pub fn apply_overrides_from<F>(config: &mut Config, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup("WIKIVIEWS_DATA_PATH") {
            config.data.path = PathBuf::from(path);
        }

        if let Some(language) = lookup("WIKIVIEWS_LANGUAGE") {
            config.language = language;
        }

        if let Some(level) = lookup("WIKIVIEWS_LOG_LEVEL") {
            config.logging.level = level;
        }

        if let Some(max) = lookup("WIKIVIEWS_MAX_LANGUAGES") {
            config.selection.max_languages =
                max.trim().parse().map_err(|e| ConfigError::EnvParseError {
                    var: "WIKIVIEWS_MAX_LANGUAGES".to_string(),
                    source: Box::new(e),
                })?;
        }

        Ok(())
    }
}
