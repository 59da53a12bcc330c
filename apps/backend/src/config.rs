//! Environment-driven configuration.

use std::path::PathBuf;

use conjugation_core::{SourceLanguage, ViewMode};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} not set")]
    Missing(&'static str),

    #[error("invalid value for {name}: {value}")]
    Invalid { name: &'static str, value: String },
}

/// Server configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Directory of card JSON records.
    pub cards_dir: PathBuf,
    /// JSON object mapping tense identifier to level.
    pub levels_path: Option<PathBuf>,
    pub default_view: ViewMode,
}

impl Config {
    /// Read configuration from environment variables.
    ///
    /// Env vars:
    /// - CARDS_DIR: card record directory (required)
    /// - LEVELS_PATH: tense→level table (optional)
    /// - HOST / PORT: bind address (default 0.0.0.0:3000)
    /// - DEFAULT_SOURCE_LANGUAGE: english or russian (default english)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let cards_dir = lookup("CARDS_DIR")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .ok_or(ConfigError::Missing("CARDS_DIR"))?;

        let levels_path = lookup("LEVELS_PATH")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from);

        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string());

        let port = match lookup("PORT") {
            Some(value) => value.parse().map_err(|_| ConfigError::Invalid {
                name: "PORT",
                value,
            })?,
            None => 3000,
        };

        let source_language = match lookup("DEFAULT_SOURCE_LANGUAGE") {
            Some(value) => {
                SourceLanguage::from_str(&value).ok_or(ConfigError::Invalid {
                    name: "DEFAULT_SOURCE_LANGUAGE",
                    value,
                })?
            }
            None => SourceLanguage::default(),
        };

        Ok(Self {
            host,
            port,
            cards_dir,
            levels_path,
            default_view: ViewMode {
                source_language,
                ..ViewMode::default()
            },
        })
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
