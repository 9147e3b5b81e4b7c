//! Template rendering
//!
//! Rendering is two passes over the parsed tree: every name the template
//! mentions is resolved once into [`ResolvedValues`], then the tree is
//! walked and text is emitted.
//!
//! Inside a conditional branch, `%NAME%` emits NAME's value and remembers
//! it; `%%` emits the remembered value. The memory starts out holding the
//! selector's value, and a sub-reference naming the selector itself emits
//! the selector value without replacing what is remembered. Each
//! conditional has its own memory.

use persona_core::{normalize_name, Template, TemplateNode};
use persona_core::ast::ConditionalNode;
use std::collections::HashMap;

use crate::resolver::ReferenceResolver;

/// Values of every name a template references, keyed by normalized name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedValues {
    values: HashMap<String, String>,
}

impl ResolvedValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve every name referenced by `template`
    pub fn resolve(template: &Template, resolver: &ReferenceResolver<'_>) -> Self {
        let values = template
            .referenced_names()
            .into_iter()
            .map(|name| {
                let value = resolver.resolve(&name);
                (name, value)
            })
            .collect();
        Self { values }
    }

    pub fn insert(&mut self, name: &str, value: impl Into<String>) {
        self.values.insert(normalize_name(name), value.into());
    }

    /// Value for `name`, empty when unknown
    pub fn get(&self, name: &str) -> &str {
        self.values
            .get(&normalize_name(name))
            .map(String::as_str)
            .unwrap_or("")
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Sub-reference state of the conditional being rendered
struct BranchScope<'v> {
    selector: String,
    selector_value: &'v str,
    last: &'v str,
}

/// Renders templates for one recipient
pub struct TemplateRenderer<'r, 's> {
    resolver: &'r ReferenceResolver<'s>,
}

impl<'r, 's> TemplateRenderer<'r, 's> {
    pub fn new(resolver: &'r ReferenceResolver<'s>) -> Self {
        Self { resolver }
    }

    pub fn render(&self, template: &Template) -> String {
        if template.is_plain() {
            return template
                .nodes
                .iter()
                .map(|node| match node {
                    TemplateNode::Text(text) => text.as_str(),
                    _ => "",
                })
                .collect();
        }

        let values = ResolvedValues::resolve(template, self.resolver);
        tracing::trace!(
            "Resolved {} names for recipient {}",
            values.len(),
            self.resolver.recipient()
        );
        render_with_values(template, &values)
    }
}

/// Walk a template against already resolved values
pub fn render_with_values(template: &Template, values: &ResolvedValues) -> String {
    let mut out = String::new();
    render_nodes(&template.nodes, values, None, &mut out);
    out
}

fn render_nodes<'v>(
    nodes: &[TemplateNode],
    values: &'v ResolvedValues,
    mut scope: Option<&mut BranchScope<'v>>,
    out: &mut String,
) {
    for node in nodes {
        match node {
            TemplateNode::Text(text) => out.push_str(text),
            TemplateNode::Ref { name } => out.push_str(values.get(name)),
            TemplateNode::Conditional(cond) => render_conditional(cond, values, out),
            TemplateNode::SubRef { name } => match scope.as_deref_mut() {
                Some(scope) if normalize_name(name) == scope.selector => {
                    out.push_str(scope.selector_value)
                }
                Some(scope) => {
                    scope.last = values.get(name);
                    out.push_str(scope.last);
                }
                None => out.push_str(values.get(name)),
            },
            TemplateNode::LastSubRef => match scope.as_deref() {
                Some(scope) => out.push_str(scope.last),
                None => out.push_str("%%"),
            },
        }
    }
}

fn render_conditional<'v>(cond: &ConditionalNode, values: &'v ResolvedValues, out: &mut String) {
    let selector_value = values.get(&cond.selector);
    let branch = if selector_value.is_empty() {
        cond.else_branch.as_deref()
    } else {
        Some(cond.true_branch.as_slice())
    };

    if let Some(branch) = branch {
        let mut scope = BranchScope {
            selector: normalize_name(&cond.selector),
            selector_value,
            last: selector_value,
        };
        render_nodes(branch, values, Some(&mut scope), out);
    }
}
