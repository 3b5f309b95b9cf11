//! `salary-calc.toml` settings.
//!
//! Every key is optional; missing keys fall back to [`AppConfig::default`].
//! Command-line flags are applied on top by the binary.
//!
//! ```toml
//! base_currency = "EUR"
//! rates_file = "rates.json"
//! log_level = "debug"
//! output = "json"
//! max_rate_age_hours = 24
//! ```

use std::path::{Path, PathBuf};

use clap::ValueEnum;
use salary_core::fx::MAX_RATE_AGE_HOURS;
use serde::Deserialize;
use thiserror::Error;

/// Looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "salary-calc.toml";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Csv,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub base_currency: String,
    pub rates_file: Option<PathBuf>,
    pub log_level: String,
    /// Appends log records to this file as well as stderr.
    pub log_file: Option<PathBuf>,
    pub output: OutputFormat,
    pub max_rate_age_hours: i64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_currency: "USD".to_string(),
            rates_file: None,
            log_level: "info".to_string(),
            log_file: None,
            output: OutputFormat::Text,
            max_rate_age_hours: MAX_RATE_AGE_HOURS,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file '{path}': {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("max_rate_age_hours must be positive, got {0}")]
    InvalidRateAge(i64),
}

impl AppConfig {
    /// Parses TOML text.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Parse`] for malformed TOML or unknown keys,
    /// [`ConfigError::InvalidRateAge`] for a non-positive rate age.
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        if config.max_rate_age_hours <= 0 {
            return Err(ConfigError::InvalidRateAge(config.max_rate_age_hours));
        }
        Ok(config)
    }

    /// Loads `path` when given. Otherwise loads [`DEFAULT_CONFIG_FILE`] if it
    /// exists, or returns the defaults.
    ///
    /// # Errors
    ///
    /// An explicit `path` that cannot be read is an error; so is any file
    /// that does not parse.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => {
                let fallback = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !fallback.is_file() {
                    return Ok(Self::default());
                }
                fallback
            }
        };
        let text = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
        Self::from_toml(&text)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        assert_eq!(AppConfig::from_toml("").unwrap(), AppConfig::default());
    }

    #[test]
    fn every_key_is_read() {
        let config = AppConfig::from_toml(
            r#"
            base_currency = "EUR"
            rates_file = "rates.json"
            log_level = "debug"
            log_file = "salary.log"
            output = "csv"
            max_rate_age_hours = 24
            "#,
        )
        .unwrap();

        assert_eq!(
            config,
            AppConfig {
                base_currency: "EUR".to_string(),
                rates_file: Some(PathBuf::from("rates.json")),
                log_level: "debug".to_string(),
                log_file: Some(PathBuf::from("salary.log")),
                output: OutputFormat::Csv,
                max_rate_age_hours: 24,
            }
        );
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(matches!(
            AppConfig::from_toml("currency = \"EUR\""),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn rate_age_must_be_positive() {
        assert!(matches!(
            AppConfig::from_toml("max_rate_age_hours = 0"),
            Err(ConfigError::InvalidRateAge(0))
        ));
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let result = AppConfig::load(Some(Path::new("definitely/not/here.toml")));

        assert!(matches!(result, Err(ConfigError::Read { .. })));
    }
}
