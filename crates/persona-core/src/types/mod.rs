//! Data model for recipients, attributes and variables

mod recipient;
mod variable;

pub use recipient::{Attribute, RecipientId};
pub use variable::{Condition, VariableDefinition, VariableId, VariableKind};

/// Normalize an attribute or variable name for storage and lookup.
///
/// Names are compared case-insensitively, so every write and every lookup
/// goes through this function.
pub fn normalize_name(name: &str) -> String {
    name.trim().to_ascii_lowercase()
}

/// Returns true if the name contains any whitespace character.
///
/// Such names are never resolved; the template parser leaves their syntax
/// in place and the resolver answers with an empty value.
pub fn has_whitespace(name: &str) -> bool {
    name.chars().any(char::is_whitespace)
}
