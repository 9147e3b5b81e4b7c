//! Persona Parser - template and condition parsers
//!
//! This crate turns raw strings into the trees defined in `persona-core`:
//! - [`TemplateParser`]: personalization text into a [`Template`](persona_core::Template)
//! - [`ConditionParser`]: a complex variable's boolean expression into a
//!   [`ConditionExpr`](persona_core::ConditionExpr)

pub mod condition;
pub mod error;
pub mod template;

// Re-export main parser types
pub use condition::{ConditionParser, ConditionToken, ConditionTokenizer};
pub use error::{ParseError, Result};
pub use template::{Span, TemplateLexer, TemplateParser, Token, TokenKind};
