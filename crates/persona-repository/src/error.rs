//! Error types for the repository layer

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for repository operations
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Errors that can occur during store operations
#[derive(Error, Debug)]
pub enum RepositoryError {
    /// Recipient id unknown to the store
    #[error("Unknown recipient: {0}")]
    UnknownRecipient(String),

    /// Explicit recipient id already assigned to another address
    #[error("Recipient id {id} is already assigned to {address}")]
    DuplicateRecipientId { id: String, address: String },

    /// Simple variable references an attribute the store has never seen
    #[error("Target attribute doesn't exist: {0}")]
    UnknownAttribute(String),

    /// I/O error occurred
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    /// JSON parsing error
    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// Invalid path provided
    #[error("Invalid path: {path}")]
    InvalidPath { path: PathBuf },

    /// File extension not recognized
    #[error("Unsupported store format: {0}")]
    UnsupportedFormat(String),

    /// Invalid data rejected by validation
    #[error("Validation error: {0}")]
    Validation(#[from] persona_core::CoreError),

    /// Generic error
    #[error("Repository error: {0}")]
    Other(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use persona_core::CoreError;

    #[test]
    fn test_validation_error_conversion() {
        let err: RepositoryError = CoreError::VariableNameNotSpecified.into();
        assert_eq!(err.to_string(), "Validation error: Variable name not specified");
    }

    #[test]
    fn test_unknown_attribute_message() {
        let err = RepositoryError::UnknownAttribute("gender".into());
        assert_eq!(err.to_string(), "Target attribute doesn't exist: gender");
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: RepositoryError = io.into();
        assert!(err.to_string().contains("I/O error"));
    }
}
