//! Recipient identity and per-recipient attributes

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque recipient identifier.
///
/// Resolved once per personalization request from the recipient's address;
/// every attribute and variable lookup afterwards is keyed by it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecipientId(String);

impl RecipientId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecipientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecipientId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for RecipientId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A named value attached to one recipient (e.g. first name, age)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    /// Owning recipient
    pub recipient_id: RecipientId,
    /// Attribute name (normalized)
    pub name: String,
    /// Attribute value
    pub value: String,
}

impl Attribute {
    /// Create an attribute, normalizing its name
    pub fn new(recipient_id: RecipientId, name: &str, value: impl Into<String>) -> Self {
        Self {
            recipient_id,
            name: super::normalize_name(name),
            value: value.into(),
        }
    }
}
