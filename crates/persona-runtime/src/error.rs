//! Runtime error types

use persona_repository::RepositoryError;
use thiserror::Error;

/// Runtime error
#[derive(Error, Debug)]
pub enum RuntimeError {
    /// The recipient address is unknown to the store
    #[error("Recipient not found: {0}")]
    RecipientNotFound(String),

    /// The store failed while resolving the recipient
    #[error("Store error: {0}")]
    Store(#[from] RepositoryError),
}

/// Result type for runtime operations
pub type Result<T> = std::result::Result<T, RuntimeError>;
