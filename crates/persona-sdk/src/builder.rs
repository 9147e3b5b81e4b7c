//! Builder pattern for Personalizer

use persona_repository::{CachedStore, StoreLoader, ValueStore};
use std::path::PathBuf;
use std::sync::Arc;

use crate::config::{CacheSettings, EngineConfig};
use crate::error::{Result, SdkError};
use crate::personalizer::Personalizer;

/// Builder for Personalizer
///
/// # Example
///
/// ```rust,ignore
/// use persona_sdk::{CacheSettings, PersonalizerBuilder};
///
/// // From a snapshot file
/// let personalizer = PersonalizerBuilder::new()
///     .with_store_file("recipients.yaml")
///     .build()
///     .await?;
///
/// // From a store populated in code, without caching
/// let personalizer = PersonalizerBuilder::new()
///     .with_store(store)
///     .with_cache(CacheSettings::disabled())
///     .build()
///     .await?;
/// ```
pub struct PersonalizerBuilder {
    config: EngineConfig,
    store: Option<Arc<dyn ValueStore>>,
}

impl PersonalizerBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self {
            config: EngineConfig::new(),
            store: None,
        }
    }

    /// Start from a full configuration
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Load the store from a YAML or JSON snapshot when building
    pub fn with_store_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.store_file = Some(path.into());
        self
    }

    /// Use an existing store; takes precedence over a store file
    pub fn with_store<S: ValueStore + 'static>(mut self, store: S) -> Self {
        self.store = Some(Arc::new(store));
        self
    }

    /// Use an already shared store
    pub fn with_shared_store(mut self, store: Arc<dyn ValueStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Set cache settings
    pub fn with_cache(mut self, cache: CacheSettings) -> Self {
        self.config.cache = cache;
        self
    }

    /// Enable tracing
    pub fn enable_tracing(mut self, enable: bool) -> Self {
        self.config.enable_tracing = enable;
        self
    }

    /// Build the personalizer
    ///
    /// Loads the store file if no store was given, then wraps the store in
    /// a variable cache unless caching is disabled.
    pub async fn build(self) -> Result<Personalizer> {
        let store: Arc<dyn ValueStore> = match (self.store, &self.config.store_file) {
            (Some(store), _) => store,
            (None, Some(path)) => {
                tracing::info!("Loading value store from {}", path.display());
                Arc::new(StoreLoader::from_file(path).await?)
            }
            (None, None) => {
                return Err(SdkError::ConfigError(
                    "No value store configured: set a store or a store file".to_string(),
                ))
            }
        };

        let store: Arc<dyn ValueStore> = if self.config.cache.enabled {
            Arc::new(CachedStore::with_config(
                store,
                self.config.cache.to_cache_config(),
            ))
        } else {
            store
        };

        Ok(Personalizer::new(store).with_tracing(self.config.enable_tracing))
    }
}

impl Default for PersonalizerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
