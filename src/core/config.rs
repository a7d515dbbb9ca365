//! core::config
//!
//! Repository configuration schema and loading.
//!
//! # Overview
//!
//! Configuration is repository-scoped only: a single optional
//! `.vellum/config.toml` written with defaults by `setup`. There is no
//! user-level file and no environment override; the knobs here tune
//! storage and output artifacts, never operation semantics.
//!
//! # Example
//!
//! ```toml
//! [storage]
//! compression = 6
//!
//! [suggest]
//! suffix = ".suggest"
//! ```
//!
//! # Validation
//!
//! Config values are validated after parsing: the compression level must
//! be a valid gzip level (0..=9) and the suggestion suffix must be a
//! nonempty file-name fragment.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::error::OpError;
use crate::core::fsutil;

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("failed to write config file '{path}': {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to serialize config: {0}")]
    SerializeError(String),

    #[error("invalid config value: {0}")]
    InvalidValue(String),
}

impl From<ConfigError> for OpError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::ReadError { path, source } => OpError::io(path, source),
            ConfigError::WriteError { path, source } => OpError::io(path, source),
            ConfigError::SerializeError(m) => OpError::io(
                PathBuf::new(),
                std::io::Error::new(std::io::ErrorKind::Other, m),
            ),
            ConfigError::ParseError { path, message } => {
                OpError::ConfigInvalid(format!("{}: {}", path.display(), message))
            }
            ConfigError::InvalidValue(m) => OpError::ConfigInvalid(m),
        }
    }
}

/// Storage tuning.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct StorageConfig {
    /// Gzip compression level for stored revisions (0..=9).
    pub compression: u32,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self { compression: 6 }
    }
}

/// Suggestion artifact tuning.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct SuggestConfig {
    /// Suffix appended to the file name for the merge suggestion artifact.
    pub suffix: String,
}

impl Default for SuggestConfig {
    fn default() -> Self {
        Self {
            suffix: ".suggest".to_string(),
        }
    }
}

/// Repository configuration.
///
/// # Example
///
/// ```
/// use vellum::core::config::RepoConfig;
///
/// let config = RepoConfig::default();
/// assert_eq!(config.storage.compression, 6);
/// assert_eq!(config.suggest.suffix, ".suggest");
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct RepoConfig {
    /// Storage tuning
    pub storage: StorageConfig,

    /// Suggestion artifact tuning
    pub suggest: SuggestConfig,
}

impl RepoConfig {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.storage.compression > 9 {
            return Err(ConfigError::InvalidValue(format!(
                "compression level must be 0..=9, got {}",
                self.storage.compression
            )));
        }

        let suffix = &self.suggest.suffix;
        if suffix.is_empty() {
            return Err(ConfigError::InvalidValue(
                "suggest suffix cannot be empty".to_string(),
            ));
        }
        if suffix.contains('/') || suffix.contains('\\') {
            return Err(ConfigError::InvalidValue(
                "suggest suffix cannot contain path separators".to_string(),
            ));
        }
        if suffix.chars().any(|c| c.is_ascii_control()) {
            return Err(ConfigError::InvalidValue(
                "suggest suffix cannot contain control characters".to_string(),
            ));
        }

        Ok(())
    }

    /// Load configuration from `path`.
    ///
    /// A missing file is not an error: defaults are used. A file that
    /// exists but does not parse, has unknown keys, or carries invalid
    /// values is an error.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ReadError`, `ParseError`, or `InvalidValue`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let body = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadError {
            path: path.to_path_buf(),
            source,
        })?;

        let config: RepoConfig = toml::from_str(&body).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Write this configuration to `path` (atomically).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::SerializeError` or `ConfigError::WriteError`.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let body =
            toml::to_string_pretty(self).map_err(|e| ConfigError::SerializeError(e.to_string()))?;

        fsutil::write_atomic(path, body.as_bytes()).map_err(|e| match e {
            OpError::Io { path, source } => ConfigError::WriteError { path, source },
            other => ConfigError::WriteError {
                path: path.to_path_buf(),
                source: std::io::Error::new(std::io::ErrorKind::Other, other.to_string()),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = RepoConfig::default();
        assert_eq!(config.storage.compression, 6);
        assert_eq!(config.suggest.suffix, ".suggest");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn toml_roundtrip() {
        let config = RepoConfig::default();
        let body = toml::to_string_pretty(&config).unwrap();
        let parsed: RepoConfig = toml::from_str(&body).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let parsed: RepoConfig = toml::from_str("[storage]\ncompression = 9\n").unwrap();
        assert_eq!(parsed.storage.compression, 9);
        assert_eq!(parsed.suggest.suffix, ".suggest");
    }

    #[test]
    fn empty_file_is_all_defaults() {
        let parsed: RepoConfig = toml::from_str("").unwrap();
        assert_eq!(parsed, RepoConfig::default());
    }

    #[test]
    fn unknown_fields_rejected() {
        let result: Result<RepoConfig, _> = toml::from_str("unknown_key = true\n");
        assert!(result.is_err());

        let result: Result<RepoConfig, _> = toml::from_str("[storage]\nlevel = 3\n");
        assert!(result.is_err());
    }

    #[test]
    fn compression_out_of_range_rejected() {
        let config: RepoConfig = toml::from_str("[storage]\ncompression = 12\n").unwrap();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue(_))
        ));
    }

    #[test]
    fn bad_suffix_rejected() {
        let mut config = RepoConfig::default();

        config.suggest.suffix = String::new();
        assert!(config.validate().is_err());

        config.suggest.suffix = "a/b".to_string();
        assert!(config.validate().is_err());

        config.suggest.suffix = ".merged".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn load_missing_file_gives_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        let config = RepoConfig::load(&tmp.path().join("config.toml")).unwrap();
        assert_eq!(config, RepoConfig::default());
    }

    #[test]
    fn save_then_load() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.toml");

        let mut config = RepoConfig::default();
        config.storage.compression = 1;
        config.save(&path).unwrap();

        let loaded = RepoConfig::load(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn load_rejects_invalid_values() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(&path, "[storage]\ncompression = 99\n").unwrap();
        assert!(matches!(
            RepoConfig::load(&path),
            Err(ConfigError::InvalidValue(_))
        ));
    }

    #[test]
    fn parse_error_maps_to_precondition_class() {
        let err = ConfigError::InvalidValue("compression level must be 0..=9".into());
        let op: OpError = err.into();
        assert_eq!(op.exit_code(), 3);
    }
}
