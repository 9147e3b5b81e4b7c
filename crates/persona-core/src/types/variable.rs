//! Variable definitions and their ordered conditions

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// Store-assigned variable identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VariableId(pub i64);

/// How a variable derives its value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariableKind {
    /// Value looked up by matching one attribute's value against the
    /// condition list, used as literal keys
    Simple,
    /// Value chosen by evaluating each condition's boolean expression in order
    Complex,
}

/// A named, possibly conditional derivation of a value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableDefinition {
    pub id: VariableId,
    /// Variable name (normalized)
    pub name: String,
    /// Associated attribute name for simple variables, `None` for complex ones
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attribute: Option<String>,
}

impl VariableDefinition {
    /// Create a simple variable tied to one attribute
    pub fn simple(id: VariableId, name: &str, attribute: &str) -> Self {
        Self {
            id,
            name: super::normalize_name(name),
            attribute: Some(super::normalize_name(attribute)),
        }
    }

    /// Create a complex variable evaluated through boolean conditions
    pub fn complex(id: VariableId, name: &str) -> Self {
        Self {
            id,
            name: super::normalize_name(name),
            attribute: None,
        }
    }

    pub fn kind(&self) -> VariableKind {
        match self.attribute {
            Some(_) => VariableKind::Simple,
            None => VariableKind::Complex,
        }
    }

    /// Validate a definition together with the conditions it will own
    pub fn validate(&self, conditions: &[Condition]) -> Result<()> {
        if self.name.is_empty() {
            return Err(CoreError::VariableNameNotSpecified);
        }
        if super::has_whitespace(&self.name) {
            return Err(CoreError::InvalidName(self.name.clone()));
        }
        if conditions.is_empty() {
            return Err(CoreError::NoConditionsSpecified(self.name.clone()));
        }
        Ok(())
    }
}

/// One `(expression, value)` pair belonging to a variable.
///
/// For simple variables `expression` is a literal match key compared with
/// the associated attribute's value; for complex variables it is a boolean
/// expression such as `tier == "gold" AND (country == "FR" OR country == "BE")`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condition {
    #[serde(alias = "condition")]
    pub expression: String,
    pub value: String,
}

impl Condition {
    pub fn new(expression: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            expression: expression.into(),
            value: value.into(),
        }
    }
}
