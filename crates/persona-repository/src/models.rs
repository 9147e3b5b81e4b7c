//! Cache bookkeeping for [`CachedStore`](crate::CachedStore)
//!
//! Only variable definitions and condition lists are cached. Recipient ids
//! and attribute values always go to the wrapped store.

use std::time::{Duration, Instant};

/// Counters reported by a caching store
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CacheStats {
    /// Definition or condition lookups answered from the cache
    pub hits: u64,
    /// Lookups that went to the wrapped store
    pub misses: u64,
    /// Cached definitions plus cached condition lists
    pub size: usize,
}

impl CacheStats {
    pub fn lookups(&self) -> u64 {
        self.hits + self.misses
    }

    /// Share of lookups served from the cache, `0.0` before the first one
    pub fn hit_rate(&self) -> f64 {
        match self.lookups() {
            0 => 0.0,
            total => self.hits as f64 / total as f64,
        }
    }
}

/// A definition or condition list together with its expiry deadline
#[derive(Debug, Clone)]
pub(crate) struct CachedLookup<T> {
    pub value: T,
    /// `None` when the ttl is too large to represent
    pub expires_at: Option<Instant>,
}

impl<T> CachedLookup<T> {
    pub fn new(value: T, ttl: Duration) -> Self {
        Self {
            value,
            expires_at: Instant::now().checked_add(ttl),
        }
    }

    pub fn is_live(&self) -> bool {
        self.expires_at.map_or(true, |deadline| Instant::now() < deadline)
    }
}

/// How [`CachedStore`](crate::CachedStore) keeps variable lookups
#[derive(Debug, Clone, PartialEq)]
pub struct CacheConfig {
    pub enabled: bool,
    /// How long a definition or condition list is served before refetching
    pub ttl: Duration,
    /// Bound on each of the two caches; `None` for no bound
    pub max_entries: Option<usize>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            ttl: Duration::from_secs(300),
            max_entries: Some(1000),
        }
    }
}

impl CacheConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every lookup goes straight to the wrapped store
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Default::default()
        }
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn with_max_entries(mut self, max: usize) -> Self {
        self.max_entries = Some(max);
        self
    }

    pub fn unlimited_entries(mut self) -> Self {
        self.max_entries = None;
        self
    }
}
