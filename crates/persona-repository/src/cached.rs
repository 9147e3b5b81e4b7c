//! Caching decorator for value stores
//!
//! Variable definitions and conditions are shared by every recipient, so
//! they are cached with a TTL. Recipient and attribute lookups are
//! per-recipient and always go to the inner store.

use dashmap::DashMap;
use persona_core::{Condition, RecipientId, VariableDefinition, VariableId};
use std::hash::Hash;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use crate::models::{CacheConfig, CacheStats, CachedLookup};
use crate::traits::{CacheableStore, ValueStore};
use crate::RepositoryResult;

/// Value store wrapper caching variable lookups
pub struct CachedStore<S> {
    inner: S,
    /// Definitions by name; absent variables are cached as `None`
    definitions: DashMap<String, CachedLookup<Option<VariableDefinition>>>,
    conditions: DashMap<VariableId, CachedLookup<Vec<Condition>>>,
    config: CacheConfig,
    enabled: AtomicBool,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl<S: ValueStore> CachedStore<S> {
    /// Wrap a store with the default cache configuration
    pub fn new(inner: S) -> Self {
        Self::with_config(inner, CacheConfig::default())
    }

    pub fn with_config(inner: S, config: CacheConfig) -> Self {
        Self {
            inner,
            definitions: DashMap::new(),
            conditions: DashMap::new(),
            enabled: AtomicBool::new(config.enabled),
            config,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    fn lookup<K, T>(&self, cache: &DashMap<K, CachedLookup<T>>, key: &K) -> Option<T>
    where
        K: Eq + Hash,
        T: Clone,
    {
        if !self.is_cache_enabled() {
            return None;
        }

        if let Some(entry) = cache.get(key) {
            if entry.is_live() {
                self.hits.fetch_add(1, Ordering::Relaxed);
                return Some(entry.value.clone());
            }
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        None
    }

    fn store<K, T>(&self, cache: &DashMap<K, CachedLookup<T>>, key: K, data: T)
    where
        K: Eq + Hash,
    {
        if !self.is_cache_enabled() {
            return;
        }

        if let Some(max) = self.config.max_entries {
            if cache.len() >= max {
                cache.retain(|_, entry| entry.is_live());
                if cache.len() >= max {
                    tracing::debug!("Cache full ({} entries), skipping insert", max);
                    return;
                }
            }
        }

        cache.insert(key, CachedLookup::new(data, self.config.ttl));
    }
}

impl<S: ValueStore> ValueStore for CachedStore<S> {
    fn resolve_recipient_id(&self, address: &str) -> RepositoryResult<Option<RecipientId>> {
        self.inner.resolve_recipient_id(address)
    }

    fn get_attribute_value(
        &self,
        recipient: &RecipientId,
        name: &str,
    ) -> RepositoryResult<Option<String>> {
        self.inner.get_attribute_value(recipient, name)
    }

    fn get_variable_definition(&self, name: &str) -> RepositoryResult<Option<VariableDefinition>> {
        let key = name.to_string();
        if let Some(cached) = self.lookup(&self.definitions, &key) {
            return Ok(cached);
        }

        let definition = self.inner.get_variable_definition(name)?;
        self.store(&self.definitions, key, definition.clone());
        Ok(definition)
    }

    fn get_variable_conditions(&self, variable: VariableId) -> RepositoryResult<Vec<Condition>> {
        if let Some(cached) = self.lookup(&self.conditions, &variable) {
            return Ok(cached);
        }

        let conditions = self.inner.get_variable_conditions(variable)?;
        self.store(&self.conditions, variable, conditions.clone());
        Ok(conditions)
    }
}

impl<S: ValueStore> CacheableStore for CachedStore<S> {
    fn clear_cache(&self) {
        self.definitions.clear();
        self.conditions.clear();
    }

    fn clear_cache_entry(&self, name: &str) {
        if let Some((_, entry)) = self.definitions.remove(name) {
            if let Some(definition) = entry.value {
                self.conditions.remove(&definition.id);
            }
        }
    }

    fn cache_stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            size: self.definitions.len() + self.conditions.len(),
        }
    }

    fn set_cache_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::Relaxed);
        if !enabled {
            self.clear_cache();
        }
    }

    fn is_cache_enabled(&self) -> bool {
        self.enabled.load(Ordering::Relaxed)
    }
}
