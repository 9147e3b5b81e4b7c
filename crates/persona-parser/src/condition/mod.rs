//! Condition parsing for complex variables
//!
//! # Syntax
//!
//! ```text
//! Expr       := Term ( Connective Term )*
//! Term       := "(" Expr ")" | "true" | "false" | Operand ("==" | "!=") Literal
//! Connective := "AND" | "OR"                 (case-insensitive)
//! Operand    := NAME | "quoted constant"
//! Literal    := "quoted string" | bare-word
//! ```
//!
//! Examples:
//! - `tier == "gold"`
//! - `country != FR AND tier == "gold"`
//! - `(city == "New York" OR city == "Boston") AND optin == yes`
//!
//! Connectives are folded left to right with no precedence between `AND`
//! and `OR`: `true OR false AND false` is `false`.

mod parser;
mod tokenizer;

pub use parser::ConditionParser;
pub use tokenizer::{ConditionToken, ConditionTokenizer, Spanned};
