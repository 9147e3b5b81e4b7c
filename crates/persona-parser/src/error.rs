//! Parser error types

use thiserror::Error;

/// Parser error
///
/// Only condition parsing can fail; the template parser keeps malformed
/// syntax as text instead.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    /// Condition contains no tokens
    #[error("Empty condition")]
    EmptyCondition,

    /// Opening and closing parentheses do not pair up
    #[error("Unbalanced parentheses in condition: {0}")]
    UnbalancedParentheses(String),

    /// A quoted literal has no closing quote
    #[error("Unterminated literal starting at offset {0}")]
    UnterminatedLiteral(usize),

    /// Token not valid at this position
    #[error("Unexpected token '{token}' at offset {offset}")]
    UnexpectedToken { token: String, offset: usize },

    /// Comparison without `==` or `!=`
    #[error("Missing comparison operator after '{0}'")]
    MissingOperator(String),

    /// Condition ends where a term is required
    #[error("Unexpected end of condition after '{0}'")]
    UnexpectedEnd(String),

    /// Comparison without a right-hand literal
    #[error("Missing literal after '{0}'")]
    MissingLiteral(String),
}

/// Result type for parser operations
pub type Result<T> = std::result::Result<T, ParseError>;
