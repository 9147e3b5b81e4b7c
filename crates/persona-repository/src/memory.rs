//! In-memory value store
//!
//! Concurrent maps holding recipients, attributes, variables and conditions.
//! Suitable for tests, tools and stores loaded from snapshot files.

use dashmap::mapref::entry::Entry;
use dashmap::{DashMap, DashSet};
use persona_core::{
    has_whitespace, normalize_name, Condition, CoreError, RecipientId, VariableDefinition,
    VariableId,
};
use std::sync::atomic::{AtomicI64, AtomicU64, Ordering};

use crate::error::{RepositoryError, RepositoryResult};
use crate::traits::ValueStore;

/// In-memory value store
#[derive(Debug, Default)]
pub struct MemoryStore {
    /// address -> recipient id
    recipients: DashMap<String, RecipientId>,
    /// recipient id -> address
    recipient_ids: DashMap<RecipientId, String>,
    /// (recipient id, attribute name) -> value
    attributes: DashMap<(RecipientId, String), String>,
    /// attribute names seen in the store
    attribute_names: DashSet<String>,
    /// variable name -> definition
    variables: DashMap<String, VariableDefinition>,
    /// variable id -> ordered conditions
    conditions: DashMap<VariableId, Vec<Condition>>,
    next_recipient: AtomicU64,
    next_variable: AtomicI64,
}

/// Addresses are matched without surrounding whitespace and ignoring case
fn normalize_address(address: &str) -> String {
    address.trim().to_ascii_lowercase()
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a recipient address, returning its id.
    ///
    /// An address that is already registered keeps its existing id. Generated
    /// ids skip values already claimed through [`Self::add_recipient_with_id`].
    pub fn add_recipient(&self, address: &str) -> RecipientId {
        match self.recipients.entry(normalize_address(address)) {
            Entry::Occupied(entry) => entry.get().clone(),
            Entry::Vacant(entry) => {
                let id = loop {
                    let n = self.next_recipient.fetch_add(1, Ordering::Relaxed) + 1;
                    let candidate = RecipientId::new(n.to_string());
                    if let Entry::Vacant(slot) = self.recipient_ids.entry(candidate.clone()) {
                        slot.insert(entry.key().clone());
                        break candidate;
                    }
                };
                entry.insert(id).value().clone()
            }
        }
    }

    /// Register a recipient address under a caller-chosen id.
    ///
    /// Fails when the id already belongs to a different address. Re-registering
    /// an address moves it to the new id.
    pub fn add_recipient_with_id(
        &self,
        address: &str,
        id: RecipientId,
    ) -> RepositoryResult<RecipientId> {
        let address = normalize_address(address);
        match self.recipient_ids.entry(id.clone()) {
            Entry::Occupied(slot) if slot.get() != &address => {
                return Err(RepositoryError::DuplicateRecipientId {
                    id: id.to_string(),
                    address: slot.get().clone(),
                });
            }
            Entry::Occupied(_) => {}
            Entry::Vacant(slot) => {
                slot.insert(address.clone());
            }
        }
        if let Some(previous) = self.recipients.insert(address, id.clone()) {
            if previous != id {
                self.recipient_ids.remove(&previous);
            }
        }
        Ok(id)
    }

    /// Declare an attribute name so simple variables can reference it
    /// before any recipient has a value for it
    pub fn declare_attribute(&self, name: &str) -> RepositoryResult<()> {
        let name = Self::checked_name(name)?;
        self.attribute_names.insert(name);
        Ok(())
    }

    /// Set one attribute value for a known recipient
    pub fn set_attribute(
        &self,
        recipient: &RecipientId,
        name: &str,
        value: impl Into<String>,
    ) -> RepositoryResult<()> {
        if !self.recipient_ids.contains_key(recipient) {
            return Err(RepositoryError::UnknownRecipient(recipient.to_string()));
        }
        let name = Self::checked_name(name)?;
        self.attribute_names.insert(name.clone());
        self.attributes.insert((recipient.clone(), name), value.into());
        Ok(())
    }

    /// Define (or redefine) a variable tied to one attribute.
    ///
    /// Each condition's expression is a literal key matched against the
    /// attribute's value.
    pub fn define_simple_variable(
        &self,
        name: &str,
        attribute: &str,
        conditions: Vec<Condition>,
    ) -> RepositoryResult<VariableId> {
        let attribute = normalize_name(attribute);
        if !self.attribute_names.contains(&attribute) {
            return Err(RepositoryError::UnknownAttribute(attribute));
        }
        let id = self.variable_id_for(name);
        self.insert_variable(VariableDefinition::simple(id, name, &attribute), conditions)
    }

    /// Define (or redefine) a variable computed from boolean conditions
    pub fn define_complex_variable(
        &self,
        name: &str,
        conditions: Vec<Condition>,
    ) -> RepositoryResult<VariableId> {
        let id = self.variable_id_for(name);
        self.insert_variable(VariableDefinition::complex(id, name), conditions)
    }

    /// Remove a variable and its conditions; returns whether it existed
    pub fn remove_variable(&self, name: &str) -> bool {
        match self.variables.remove(&normalize_name(name)) {
            Some((_, definition)) => {
                self.conditions.remove(&definition.id);
                true
            }
            None => false,
        }
    }

    pub fn recipient_count(&self) -> usize {
        self.recipients.len()
    }

    pub fn variable_count(&self) -> usize {
        self.variables.len()
    }

    fn checked_name(name: &str) -> RepositoryResult<String> {
        let name = normalize_name(name);
        if name.is_empty() || has_whitespace(&name) {
            return Err(CoreError::InvalidName(name).into());
        }
        Ok(name)
    }

    /// Existing id for a redefinition, a fresh one otherwise
    fn variable_id_for(&self, name: &str) -> VariableId {
        self.variables
            .get(&normalize_name(name))
            .map(|v| v.value().id)
            .unwrap_or_else(|| VariableId(self.next_variable.fetch_add(1, Ordering::Relaxed) + 1))
    }

    fn insert_variable(
        &self,
        definition: VariableDefinition,
        conditions: Vec<Condition>,
    ) -> RepositoryResult<VariableId> {
        definition.validate(&conditions)?;
        let id = definition.id;
        tracing::debug!(
            "Defining variable '{}' ({:?}) with {} conditions",
            definition.name,
            definition.kind(),
            conditions.len()
        );
        self.conditions.insert(id, conditions);
        self.variables.insert(definition.name.clone(), definition);
        Ok(id)
    }
}

impl ValueStore for MemoryStore {
    fn resolve_recipient_id(&self, address: &str) -> RepositoryResult<Option<RecipientId>> {
        Ok(self
            .recipients
            .get(&normalize_address(address))
            .map(|id| id.value().clone()))
    }

    fn get_attribute_value(
        &self,
        recipient: &RecipientId,
        name: &str,
    ) -> RepositoryResult<Option<String>> {
        Ok(self
            .attributes
            .get(&(recipient.clone(), name.to_string()))
            .map(|v| v.value().clone()))
    }

    fn get_variable_definition(&self, name: &str) -> RepositoryResult<Option<VariableDefinition>> {
        Ok(self.variables.get(name).map(|v| v.value().clone()))
    }

    fn get_variable_conditions(&self, variable: VariableId) -> RepositoryResult<Vec<Condition>> {
        Ok(self
            .conditions
            .get(&variable)
            .map(|c| c.value().clone())
            .unwrap_or_default())
    }
}
