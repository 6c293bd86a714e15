//! allpairs Configuration Management
//!
//! Handles configuration from environment variables and TOML files,
//! with defaults matching the reference extraction setup.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Context/triple extraction parameters
    pub extractor: ExtractorConfig,

    /// Tokenizer selection
    pub tokenizer: TokenizerConfig,

    /// Result file layout
    pub output: OutputConfig,

    /// Document scheduling
    pub runtime: RuntimeConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::default().with_env_override()
    }

    /// Load from a TOML file
    pub fn from_file(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let content = std::fs::read_to_string(&path).map_err(|e| ConfigError::FileReadError {
            path: path.clone(),
            source: e,
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path,
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Merge with environment variables (env takes precedence)
    pub fn with_env_override(mut self) -> Result<Self, ConfigError> {
        if let Ok(window) = std::env::var("ALLPAIRS_WINDOW") {
            self.extractor.window_size = window.parse().map_err(|_| ConfigError::InvalidValue {
                key: "ALLPAIRS_WINDOW".to_string(),
                value: window,
            })?;
        }
        if let Ok(marker) = std::env::var("ALLPAIRS_MARKER") {
            self.extractor.marker = parse_marker("ALLPAIRS_MARKER", &marker)?;
        }

        if let Ok(lang) = std::env::var("ALLPAIRS_LANG") {
            self.tokenizer.default_language = lang;
        }

        if let Ok(limit) = std::env::var("ALLPAIRS_MAX_CONCURRENT") {
            self.runtime.max_concurrent_documents =
                limit.parse().map_err(|_| ConfigError::InvalidValue {
                    key: "ALLPAIRS_MAX_CONCURRENT".to_string(),
                    value: limit,
                })?;
        }

        // Logging
        if let Ok(level) = std::env::var("LOG_LEVEL") {
            self.logging.level = level;
        }

        self.validate()?;
        Ok(self)
    }

    /// Check cross-field constraints that serde cannot express
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.extractor.validate()?;
        if self.runtime.max_concurrent_documents == 0 {
            return Err(ConfigError::InvalidValue {
                key: "runtime.max_concurrent_documents".to_string(),
                value: "0".to_string(),
            });
        }
        Ok(())
    }
}

fn parse_marker(key: &str, value: &str) -> Result<char, ConfigError> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(marker), None) => Ok(marker),
        _ => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        }),
    }
}

/// Context and triple extraction configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Window size W; up to W+1 neighbouring elements are inspected
    pub window_size: usize,

    /// Character marking the side of a context where the entity sits
    pub marker: char,
}

impl ExtractorConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_marker(self.marker)
    }
}

/// Markers may not be alphanumeric or whitespace
pub fn check_marker(marker: char) -> Result<(), ConfigError> {
    if marker.is_alphanumeric() || marker.is_whitespace() {
        return Err(ConfigError::InvalidValue {
            key: "extractor.marker".to_string(),
            value: marker.to_string(),
        });
    }
    Ok(())
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            window_size: 5,
            marker: '_',
        }
    }
}

/// Tokenizer configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenizerConfig {
    /// ISO 639-2 code used when neither the CLI nor the article names a language
    pub default_language: String,
}

impl Default for TokenizerConfig {
    fn default() -> Self {
        Self {
            default_language: "eng".to_string(),
        }
    }
}

/// Output file configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Suffix appended to the output prefix for the contexts file
    pub contexts_suffix: String,

    /// Suffix appended to the output prefix for the triples file
    pub triples_suffix: String,

    /// Append to existing files instead of truncating
    pub append: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            contexts_suffix: "_contexts".to_string(),
            triples_suffix: "_triples".to_string(),
            append: false,
        }
    }
}

/// Document processing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Documents processed concurrently in directory mode
    pub max_concurrent_documents: usize,

    /// Per-document timeout in seconds
    pub document_timeout_secs: u64,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            max_concurrent_documents: 4,
            document_timeout_secs: 60,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// JSON format for logs
    pub json_format: bool,

    /// Include file/line in logs
    pub include_location: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json_format: false,
            include_location: false,
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    FileReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.extractor.window_size, 5);
        assert_eq!(config.extractor.marker, '_');
        assert_eq!(config.tokenizer.default_language, "eng");
        assert_eq!(config.output.contexts_suffix, "_contexts");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml() {
        let config: AppConfig = toml::from_str(
            r#"
            [extractor]
            window_size = 3

            [output]
            append = true
            "#,
        )
        .unwrap();
        assert_eq!(config.extractor.window_size, 3);
        assert_eq!(config.extractor.marker, '_');
        assert!(config.output.append);
        assert_eq!(config.runtime.max_concurrent_documents, 4);
    }

    #[test]
    fn test_marker_parse() {
        assert_eq!(parse_marker("K", "|").unwrap(), '|');
        assert!(parse_marker("K", "").is_err());
        assert!(parse_marker("K", "__").is_err());
    }

    #[test]
    fn test_marker_must_not_be_text() {
        let config = ExtractorConfig {
            window_size: 5,
            marker: 'a',
        };
        assert!(config.validate().is_err());
        let config = ExtractorConfig {
            window_size: 5,
            marker: ' ',
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_file() {
        let err = AppConfig::from_file("/nonexistent/allpairs.toml").unwrap_err();
        assert!(matches!(err, ConfigError::FileReadError { .. }));
    }
}
