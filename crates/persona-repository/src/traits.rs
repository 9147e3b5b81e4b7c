//! Core trait definitions for value stores
//!
//! - [`ValueStore`]: read-only lookups the template engine performs
//! - [`CacheableStore`]: extension for cache management
//!
//! Lookups are synchronous: personalization is CPU-bound text work and each
//! request runs to completion on its own thread or blocking task.

use persona_core::{Condition, RecipientId, VariableDefinition, VariableId};
use std::sync::Arc;

use crate::{CacheStats, RepositoryResult};

/// Read access to recipient attributes and variable definitions.
///
/// Names passed in are normalized by the caller; implementations compare
/// them as given. A missing entity is `Ok(None)` (or an empty list); `Err`
/// is reserved for the store itself failing.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync`; many personalization requests
/// read the same store concurrently.
pub trait ValueStore: Send + Sync {
    /// Map a recipient address to its opaque id
    fn resolve_recipient_id(&self, address: &str) -> RepositoryResult<Option<RecipientId>>;

    /// Value of one attribute for one recipient
    fn get_attribute_value(
        &self,
        recipient: &RecipientId,
        name: &str,
    ) -> RepositoryResult<Option<String>>;

    /// Variable definition by name
    fn get_variable_definition(&self, name: &str) -> RepositoryResult<Option<VariableDefinition>>;

    /// Conditions of a variable, in stored order
    fn get_variable_conditions(&self, variable: VariableId) -> RepositoryResult<Vec<Condition>>;
}

impl<S: ValueStore + ?Sized> ValueStore for Arc<S> {
    fn resolve_recipient_id(&self, address: &str) -> RepositoryResult<Option<RecipientId>> {
        (**self).resolve_recipient_id(address)
    }

    fn get_attribute_value(
        &self,
        recipient: &RecipientId,
        name: &str,
    ) -> RepositoryResult<Option<String>> {
        (**self).get_attribute_value(recipient, name)
    }

    fn get_variable_definition(&self, name: &str) -> RepositoryResult<Option<VariableDefinition>> {
        (**self).get_variable_definition(name)
    }

    fn get_variable_conditions(&self, variable: VariableId) -> RepositoryResult<Vec<Condition>> {
        (**self).get_variable_conditions(variable)
    }
}

/// Extension trait for stores that cache lookups
///
/// # Examples
///
/// ```
/// use persona_repository::{CacheableStore, CachedStore, MemoryStore, ValueStore};
///
/// let store = CachedStore::new(MemoryStore::new());
///
/// store.get_variable_definition("discount").unwrap(); // miss
/// store.get_variable_definition("discount").unwrap(); // hit
///
/// let stats = store.cache_stats();
/// assert_eq!(stats.hits, 1);
/// assert_eq!(stats.misses, 1);
///
/// store.clear_cache();
/// ```
pub trait CacheableStore: ValueStore {
    /// Clear all caches
    fn clear_cache(&self);

    /// Clear cached data for one variable name
    fn clear_cache_entry(&self, name: &str);

    /// Cache hit/miss statistics
    fn cache_stats(&self) -> CacheStats;

    /// Enable or disable caching
    fn set_cache_enabled(&self, enabled: bool);

    /// Check if caching is enabled
    fn is_cache_enabled(&self) -> bool;
}
