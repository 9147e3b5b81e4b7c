//! Reference resolution
//!
//! A bare name resolves to a recipient attribute if one exists, otherwise to
//! a variable. Simple variables match their attribute's value against the
//! condition keys; complex variables take the value of the first condition
//! that evaluates to true.

use persona_core::{has_whitespace, normalize_name, RecipientId, VariableDefinition, VariableKind};
use persona_repository::{RepositoryResult, ValueStore};

use crate::error::{Result, RuntimeError};
use crate::evaluator::ConditionEvaluator;

/// Resolves names to values for one recipient
pub struct ReferenceResolver<'s> {
    store: &'s dyn ValueStore,
    recipient: RecipientId,
}

impl<'s> ReferenceResolver<'s> {
    pub fn new(store: &'s dyn ValueStore, recipient: RecipientId) -> Self {
        Self { store, recipient }
    }

    /// Map an address to its recipient id and build a resolver for it.
    ///
    /// This is the one lookup whose failure is returned to the caller.
    pub fn for_address(store: &'s dyn ValueStore, address: &str) -> Result<Self> {
        match store.resolve_recipient_id(address)? {
            Some(recipient) => Ok(Self::new(store, recipient)),
            None => Err(RuntimeError::RecipientNotFound(address.to_string())),
        }
    }

    pub fn recipient(&self) -> &RecipientId {
        &self.recipient
    }

    /// Resolve a name to its value; anything unresolved is empty
    pub fn resolve(&self, name: &str) -> String {
        if has_whitespace(name) {
            tracing::debug!("Refusing to resolve name with whitespace: {:?}", name);
            return String::new();
        }
        let name = normalize_name(name);
        if name.is_empty() {
            return String::new();
        }

        // An empty attribute value counts as unset
        if let Some(value) = self.attribute(&name).filter(|v| !v.is_empty()) {
            return value;
        }

        let definition = match self.absorb(self.store.get_variable_definition(&name), &name) {
            Some(Some(definition)) => definition,
            _ => {
                tracing::debug!("No attribute or variable named '{}'", name);
                return String::new();
            }
        };

        match definition.kind() {
            VariableKind::Simple => self.resolve_simple(&definition),
            VariableKind::Complex => self.resolve_complex(&definition),
        }
    }

    /// Attribute value for this recipient, `None` when absent or on store failure
    pub fn attribute(&self, name: &str) -> Option<String> {
        let name = normalize_name(name);
        self.absorb(self.store.get_attribute_value(&self.recipient, &name), &name)
            .flatten()
    }

    /// The attribute's value is used as a literal key into the condition list
    fn resolve_simple(&self, definition: &VariableDefinition) -> String {
        let Some(attribute) = definition.attribute.as_deref() else {
            return String::new();
        };
        let Some(key) = self.attribute(attribute) else {
            return String::new();
        };

        self.conditions(definition)
            .into_iter()
            .find(|condition| condition.expression == key)
            .map(|condition| condition.value)
            .unwrap_or_default()
    }

    fn resolve_complex(&self, definition: &VariableDefinition) -> String {
        let evaluator = ConditionEvaluator::new(self);

        for condition in self.conditions(definition) {
            if evaluator.evaluate_str(&condition.expression) {
                tracing::debug!(
                    "Variable '{}' matched condition '{}'",
                    definition.name,
                    condition.expression
                );
                return condition.value;
            }
        }
        String::new()
    }

    fn conditions(&self, definition: &VariableDefinition) -> Vec<persona_core::Condition> {
        self.absorb(
            self.store.get_variable_conditions(definition.id),
            &definition.name,
        )
        .unwrap_or_default()
    }

    /// Store failures during lookups degrade to "not found"
    fn absorb<T>(&self, result: RepositoryResult<T>, name: &str) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(
                    "Store lookup for '{}' (recipient {}) failed: {}",
                    name,
                    self.recipient,
                    e
                );
                None
            }
        }
    }
}
