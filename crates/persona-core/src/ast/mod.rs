//! Abstract Syntax Tree definitions
//!
//! Two small trees live here:
//! - [`Template`]: personalization text with references and conditional blocks
//! - [`ConditionExpr`]: boolean expressions attached to complex variables

pub mod condition;
pub mod template;

pub use condition::{CompareOp, ConditionExpr, Connective, Operand};
pub use template::{ConditionalNode, Template, TemplateNode};
