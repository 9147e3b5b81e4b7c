//! Value store abstraction for the Persona personalization engine
//!
//! The template engine only reads recipient data. This crate defines the
//! read capability it is handed ([`ValueStore`]) and the implementations
//! shipped with it.
//!
//! # Features
//!
//! - **In-memory store**: concurrent maps populated programmatically
//! - **File loading**: YAML or JSON snapshots loaded into a memory store
//! - **Caching**: TTL-based caching of variable definitions and conditions
//!
//! # Quick Start
//!
//! ```no_run
//! use persona_repository::{StoreLoader, ValueStore};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = StoreLoader::from_file("recipients.yaml").await?;
//!
//!     if let Some(id) = store.resolve_recipient_id("alice@example.com")? {
//!         let name = store.get_attribute_value(&id, "firstname")?;
//!         println!("{:?}", name);
//!     }
//!     Ok(())
//! }
//! ```

pub mod cached;
pub mod error;
pub mod loader;
pub mod memory;
pub mod models;
pub mod traits;

pub use cached::CachedStore;
pub use error::{RepositoryError, RepositoryResult};
pub use loader::{AttributeValue, RecipientRecord, StoreLoader, StoreSnapshot, VariableRecord};
pub use memory::MemoryStore;
pub use models::{CacheConfig, CacheStats};
pub use traits::{CacheableStore, ValueStore};
