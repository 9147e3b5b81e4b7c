//! Snapshot loading
//!
//! A snapshot is a YAML or JSON document listing recipients with their
//! attributes plus the variable definitions, loaded into a [`MemoryStore`].
//!
//! ```yaml
//! attributes: [tier]
//! recipients:
//!   - address: alice@example.com
//!     attributes:
//!       firstname: Alice
//!       age: 25
//! variables:
//!   - name: discount
//!     conditions:
//!       - expression: tier == "gold"
//!         value: 20%
//!       - expression: "true"
//!         value: 5%
//! ```

use path_absolutize::Absolutize;
use persona_core::{Condition, RecipientId};
use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use tokio::fs;

use crate::error::{RepositoryError, RepositoryResult};
use crate::memory::MemoryStore;

/// Attribute value exactly as written in a snapshot file.
///
/// YAML scalars keep their source text, so `zip: 01234` stays `01234` and
/// `price: 1.50` stays `1.50` rather than going through a number. Booleans
/// and numbers handed over as typed values are formatted as text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AttributeValue(String);

impl AttributeValue {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for AttributeValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ValueVisitor;

        impl<'de> Visitor<'de> for ValueVisitor {
            type Value = AttributeValue;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a scalar attribute value")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
                Ok(AttributeValue::new(v))
            }

            fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
                Ok(AttributeValue(v))
            }

            fn visit_bool<E: de::Error>(self, v: bool) -> Result<Self::Value, E> {
                Ok(AttributeValue(v.to_string()))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
                Ok(AttributeValue(v.to_string()))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
                Ok(AttributeValue(v.to_string()))
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
                Ok(AttributeValue(v.to_string()))
            }

            fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
                Ok(AttributeValue(String::new()))
            }
        }

        // Asking for a string makes serde_yaml hand over the plain scalar text
        deserializer.deserialize_str(ValueVisitor)
    }
}

/// One recipient entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipientRecord {
    pub address: String,
    /// Explicit id; generated when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub attributes: BTreeMap<String, AttributeValue>,
}

/// One variable entry; `attribute` makes it a simple variable
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableRecord {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attribute: Option<String>,
    #[serde(default)]
    pub conditions: Vec<Condition>,
}

/// Whole-store document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreSnapshot {
    /// Attribute names declared without any recipient value
    #[serde(default)]
    pub attributes: Vec<String>,
    #[serde(default)]
    pub recipients: Vec<RecipientRecord>,
    #[serde(default)]
    pub variables: Vec<VariableRecord>,
}

/// Builds memory stores from snapshot documents
pub struct StoreLoader;

impl StoreLoader {
    /// Load a `.yaml`, `.yml` or `.json` snapshot file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> RepositoryResult<MemoryStore> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(RepositoryError::InvalidPath {
                path: path.to_path_buf(),
            });
        }

        let abs_path = path
            .absolutize()
            .map_err(|e| RepositoryError::Other(format!("Failed to absolutize path: {}", e)))?
            .to_path_buf();

        let extension = abs_path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();

        let content = fs::read_to_string(&abs_path).await?;
        tracing::debug!("Loading store snapshot from {}", abs_path.display());

        match extension.as_str() {
            "yaml" | "yml" => Self::from_yaml_str(&content),
            "json" => Self::from_json_str(&content),
            other => Err(RepositoryError::UnsupportedFormat(other.to_string())),
        }
    }

    pub fn from_yaml_str(content: &str) -> RepositoryResult<MemoryStore> {
        let snapshot: StoreSnapshot = serde_yaml::from_str(content)?;
        Self::from_snapshot(snapshot)
    }

    /// JSON numbers and booleans under `attributes` are accepted and stored
    /// as text; quote a value to keep leading zeros or trailing digits.
    pub fn from_json_str(content: &str) -> RepositoryResult<MemoryStore> {
        let mut document: serde_json::Value = serde_json::from_str(content)?;
        stringify_json_attributes(&mut document);
        let snapshot: StoreSnapshot = serde_json::from_value(document)?;
        Self::from_snapshot(snapshot)
    }

    /// Populate a fresh store.
    ///
    /// Recipients and their attributes go in first so that simple variables
    /// can refer to any attribute that appears in the document.
    pub fn from_snapshot(snapshot: StoreSnapshot) -> RepositoryResult<MemoryStore> {
        let store = MemoryStore::new();

        for name in &snapshot.attributes {
            store.declare_attribute(name)?;
        }

        for record in &snapshot.recipients {
            let id = match &record.id {
                Some(id) => store.add_recipient_with_id(&record.address, RecipientId::new(id))?,
                None => store.add_recipient(&record.address),
            };
            for (name, value) in &record.attributes {
                store.set_attribute(&id, name, value.as_str())?;
            }
        }

        for record in snapshot.variables {
            match &record.attribute {
                Some(attribute) => {
                    store.define_simple_variable(&record.name, attribute, record.conditions)?
                }
                None => store.define_complex_variable(&record.name, record.conditions)?,
            };
        }

        tracing::info!(
            "Loaded store snapshot: {} recipients, {} variables",
            store.recipient_count(),
            store.variable_count()
        );

        Ok(store)
    }
}

/// Turn typed scalars in `recipients[*].attributes` into strings
fn stringify_json_attributes(document: &mut serde_json::Value) {
    use serde_json::Value;

    let Some(recipients) = document.get_mut("recipients").and_then(Value::as_array_mut) else {
        return;
    };
    for recipient in recipients {
        let Some(attributes) = recipient.get_mut("attributes").and_then(Value::as_object_mut)
        else {
            continue;
        };
        for value in attributes.values_mut() {
            let text = match value {
                Value::Null => String::new(),
                Value::Bool(b) => b.to_string(),
                Value::Number(n) => n.to_string(),
                _ => continue,
            };
            *value = Value::String(text);
        }
    }
}
