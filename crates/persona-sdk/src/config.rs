//! Configuration types for the personalizer

use persona_repository::CacheConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::error::{Result, SdkError};

/// Main engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Snapshot file (YAML or JSON) to load the value store from
    pub store_file: Option<PathBuf>,

    /// Variable cache settings
    pub cache: CacheSettings,

    /// Log each personalization with its timing
    pub enable_tracing: bool,
}

impl EngineConfig {
    /// Create a new engine configuration
    pub fn new() -> Self {
        Self {
            store_file: None,
            cache: CacheSettings::default(),
            enable_tracing: false,
        }
    }

    /// Parse a YAML configuration document
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        serde_yaml::from_str(content)
            .map_err(|e| SdkError::ConfigError(format!("Invalid engine configuration: {}", e)))
    }

    /// Set the store snapshot file
    pub fn with_store_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.store_file = Some(path.into());
        self
    }

    /// Set cache settings
    pub fn with_cache(mut self, cache: CacheSettings) -> Self {
        self.cache = cache;
        self
    }

    /// Enable tracing
    pub fn enable_tracing(mut self, enable: bool) -> Self {
        self.enable_tracing = enable;
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Cache settings in configuration-file form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheSettings {
    pub enabled: bool,
    /// Entry lifetime in seconds
    pub ttl_secs: u64,
    /// Maximum cached entries; `None` for no limit
    pub max_entries: Option<usize>,
}

impl Default for CacheSettings {
    fn default() -> Self {
        let defaults = CacheConfig::default();
        Self {
            enabled: defaults.enabled,
            ttl_secs: defaults.ttl.as_secs(),
            max_entries: defaults.max_entries,
        }
    }
}

impl CacheSettings {
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Default::default()
        }
    }

    pub fn to_cache_config(&self) -> CacheConfig {
        CacheConfig {
            enabled: self.enabled,
            ttl: Duration::from_secs(self.ttl_secs),
            max_entries: self.max_entries,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_config_builder() {
        let config = EngineConfig::new()
            .with_store_file("recipients.yaml")
            .with_cache(CacheSettings::disabled())
            .enable_tracing(true);

        assert_eq!(config.store_file, Some(PathBuf::from("recipients.yaml")));
        assert!(!config.cache.enabled);
        assert!(config.enable_tracing);
    }

    #[test]
    fn test_cache_settings_defaults_match_repository() {
        let settings = CacheSettings::default();
        assert_eq!(settings.to_cache_config(), CacheConfig::default());
    }

    #[test]
    fn test_from_yaml_with_partial_document() {
        let config = EngineConfig::from_yaml_str(
            r#"
store_file: data/store.json
cache:
  ttl_secs: 60
"#,
        )
        .unwrap();

        assert_eq!(config.store_file, Some(PathBuf::from("data/store.json")));
        assert!(config.cache.enabled);
        assert_eq!(config.cache.ttl_secs, 60);
        assert_eq!(config.cache.max_entries, Some(1000));
        assert!(!config.enable_tracing);
    }

    #[test]
    fn test_from_yaml_invalid() {
        let err = EngineConfig::from_yaml_str("cache: [1, 2]").unwrap_err();
        assert!(matches!(err, SdkError::ConfigError(_)));
    }

    #[test]
    fn test_json_round_trip_shape() {
        let json = serde_json::to_value(EngineConfig::default()).unwrap();
        assert_eq!(json["cache"]["ttl_secs"], 300);
        assert_eq!(json["enable_tracing"], false);
    }
}
