//! SDK error types

use persona_runtime::RuntimeError;
use thiserror::Error;

/// SDK error type
#[derive(Error, Debug)]
pub enum SdkError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// The recipient address could not be mapped to a recipient
    #[error("Recipient not found: {0}")]
    RecipientNotFound(String),

    /// Value store error
    #[error("Store error: {0}")]
    RepositoryError(#[from] persona_repository::RepositoryError),

    /// A batch task panicked or was cancelled
    #[error("Personalization task failed: {0}")]
    TaskFailed(String),
}

impl From<RuntimeError> for SdkError {
    fn from(err: RuntimeError) -> Self {
        match err {
            RuntimeError::RecipientNotFound(address) => SdkError::RecipientNotFound(address),
            RuntimeError::Store(e) => SdkError::RepositoryError(e),
        }
    }
}

/// Result type for SDK operations
pub type Result<T> = std::result::Result<T, SdkError>;

#[cfg(test)]
mod tests {
    use super::*;
    use persona_repository::RepositoryError;

    #[test]
    fn test_config_error() {
        let error = SdkError::ConfigError("no value store configured".to_string());
        assert!(error.to_string().contains("Configuration error"));
        assert!(error.to_string().contains("no value store"));
    }

    #[test]
    fn test_runtime_recipient_error_maps_to_recipient_not_found() {
        let error: SdkError = RuntimeError::RecipientNotFound("a@b.c".to_string()).into();
        assert!(matches!(error, SdkError::RecipientNotFound(ref a) if a == "a@b.c"));
        assert_eq!(error.to_string(), "Recipient not found: a@b.c");
    }

    #[test]
    fn test_runtime_store_error_maps_to_repository_error() {
        let error: SdkError =
            RuntimeError::Store(RepositoryError::Other("down".to_string())).into();
        assert!(matches!(error, SdkError::RepositoryError(_)));
        assert!(error.to_string().contains("down"));
    }
}
