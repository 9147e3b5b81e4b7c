//! Persona SDK
//!
//! High-level API for personalizing message templates per recipient.
//!
//! ```no_run
//! use persona_sdk::PersonalizerBuilder;
//!
//! #[tokio::main]
//! async fn main() -> persona_sdk::Result<()> {
//!     let personalizer = PersonalizerBuilder::new()
//!         .with_store_file("recipients.yaml")
//!         .build()
//!         .await?;
//!
//!     let text = personalizer.personalize("Hello {%firstname%}!", "alice@example.com")?;
//!     println!("{}", text);
//!     Ok(())
//! }
//! ```

pub mod builder;
pub mod config;
pub mod error;
pub mod message;
pub mod personalizer;

// Re-export main types
pub use builder::PersonalizerBuilder;
pub use config::{CacheSettings, EngineConfig};
pub use error::{Result, SdkError};
pub use message::MessageParts;
pub use personalizer::Personalizer;

// Re-export commonly used types from dependencies
pub use persona_core::Template;
pub use persona_repository::{MemoryStore, ValueStore};
