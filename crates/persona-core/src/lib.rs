//! Persona Core - Core types and definitions for the Persona personalization engine
//!
//! This crate provides the fundamental types used across the Persona crates:
//! - Recipient, attribute and variable data model
//! - Template AST (text, references, conditional blocks)
//! - Condition AST (boolean expressions used by complex variables)
//! - Error types

pub mod ast;
pub mod error;
pub mod types;

// Re-export commonly used types
pub use ast::{ConditionExpr, Template, TemplateNode};
pub use error::CoreError;
pub use types::{
    has_whitespace, normalize_name, Attribute, Condition, RecipientId, VariableDefinition,
    VariableId, VariableKind,
};
