//! Runtime configuration for the codex core.
//!
//! # Responsibility
//! - Hold storage keys, data locations and collection limits in one place.
//! - Parse optional TOML overrides on top of built-in defaults.
//!
//! # Invariants
//! - `tag_limit` is always >= 1 after validation.
//! - Storage keys are never blank.

use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;

/// Storage key for the serialized world state.
pub const DEFAULT_STORAGE_KEY: &str = "purple_codex_world_v1";
/// Storage key for the recent-edits list.
pub const DEFAULT_RECENT_KEY: &str = "purple_codex_recent_v1";
/// Default dataset consumed when nothing is persisted.
pub const DEFAULT_DATA_PATH: &str = "data/world.json";
/// Upper bound on derived entry tags.
pub const DEFAULT_TAG_LIMIT: usize = 12;

#[derive(Debug)]
pub enum ConfigError {
    Io {
        path: String,
        source: std::io::Error,
    },
    Parse(toml::de::Error),
    Invalid(&'static str),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "failed to read config `{path}`: {source}"),
            Self::Parse(err) => write!(f, "invalid config file: {err}"),
            Self::Invalid(reason) => write!(f, "invalid config value: {reason}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse(err) => Some(err),
            Self::Invalid(_) => None,
        }
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(value: toml::de::Error) -> Self {
        Self::Parse(value)
    }
}

/// Codex configuration. Every field falls back to its default when omitted.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CodexConfig {
    pub storage_key: String,
    pub recent_key: String,
    pub default_data_path: String,
    /// Index manifest for the folder-based codex browser.
    pub index_path: String,
    /// Directory holding per-entry documents, relative to the source root.
    pub entry_dir: String,
    /// Plural collection key recognized inside keyed index documents.
    pub collection: String,
    pub tag_limit: usize,
    pub recent_limit: usize,
    pub search_result_limit: usize,
    pub log_level: Option<String>,
    pub log_dir: Option<String>,
}

impl Default for CodexConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            recent_key: DEFAULT_RECENT_KEY.to_string(),
            default_data_path: DEFAULT_DATA_PATH.to_string(),
            index_path: "data/races/index.json".to_string(),
            entry_dir: "data/races".to_string(),
            collection: "races".to_string(),
            tag_limit: DEFAULT_TAG_LIMIT,
            recent_limit: 10,
            search_result_limit: 100,
            log_level: None,
            log_dir: None,
        }
    }
}

impl CodexConfig {
    /// Parses and validates a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: CodexConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads a TOML config file from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.storage_key.trim().is_empty() {
            return Err(ConfigError::Invalid("storage_key must not be blank"));
        }
        if self.recent_key.trim().is_empty() {
            return Err(ConfigError::Invalid("recent_key must not be blank"));
        }
        if self.storage_key == self.recent_key {
            return Err(ConfigError::Invalid(
                "storage_key and recent_key must differ",
            ));
        }
        if self.tag_limit == 0 {
            return Err(ConfigError::Invalid("tag_limit must be at least 1"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{CodexConfig, ConfigError, DEFAULT_TAG_LIMIT};

    #[test]
    fn empty_document_yields_defaults() {
        let config = CodexConfig::from_toml_str("").expect("empty config should parse");
        assert_eq!(config, CodexConfig::default());
        assert_eq!(config.tag_limit, DEFAULT_TAG_LIMIT);
    }

    #[test]
    fn overrides_are_applied() {
        let config = CodexConfig::from_toml_str(
            "tag_limit = 4\ncollection = \"classes\"\nlog_level = \"debug\"\n",
        )
        .expect("config should parse");
        assert_eq!(config.tag_limit, 4);
        assert_eq!(config.collection, "classes");
        assert_eq!(config.log_level.as_deref(), Some("debug"));
        assert_eq!(config.storage_key, "purple_codex_world_v1");
    }

    #[test]
    fn zero_tag_limit_is_rejected() {
        let err = CodexConfig::from_toml_str("tag_limit = 0").expect_err("zero limit must fail");
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = CodexConfig::from_toml_str("bogus = 1").expect_err("unknown key must fail");
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
