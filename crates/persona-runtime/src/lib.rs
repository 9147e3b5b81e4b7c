//! Persona Runtime - personalization of parsed templates
//!
//! This crate turns a parsed [`Template`](persona_core::Template) into text
//! for one recipient:
//! - [`ReferenceResolver`]: a bare name to a value (attribute first, then variable)
//! - [`ConditionEvaluator`]: boolean conditions of complex variables
//! - [`TemplateRenderer`]: walks the template tree against resolved values
//!
//! Every lookup problem degrades to an empty value. The only error surfaced
//! is failing to map the recipient's address to an id.

pub mod error;
pub mod evaluator;
pub mod renderer;
pub mod resolver;

pub use error::{Result, RuntimeError};
pub use evaluator::ConditionEvaluator;
pub use renderer::{render_with_values, ResolvedValues, TemplateRenderer};
pub use resolver::ReferenceResolver;
