//! Error types for Persona Core

use thiserror::Error;

/// Core error type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("Variable name not specified")]
    VariableNameNotSpecified,

    #[error("No conditions specified for variable: {0}")]
    NoConditionsSpecified(String),

    #[error("Invalid name: {0}")]
    InvalidName(String),
}

pub type Result<T> = std::result::Result<T, CoreError>;
