//! Template tree produced by the template parser
//!
//! ```text
//! Hello {%firstname%}! {if(%tier%){Your %tier% perks}{Join today}}
//! ```
//!
//! parses into
//!
//! ```text
//! Text("Hello ")
//! Ref { name: "firstname" }
//! Text("! ")
//! Conditional {
//!     selector: "tier",
//!     true_branch: [Text("Your "), SubRef { name: "tier" }, Text(" perks")],
//!     else_branch: Some([Text("Join today")]),
//! }
//! ```

use crate::types::normalize_name;

/// A parsed personalization template
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Template {
    pub nodes: Vec<TemplateNode>,
}

/// A node of the template tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateNode {
    /// Verbatim text, including any malformed syntax left in place
    Text(String),
    /// `{%NAME%}`
    Ref { name: String },
    /// `{if(%NAME%){...}{...}}`
    Conditional(ConditionalNode),
    /// `%NAME%` inside a conditional branch
    SubRef { name: String },
    /// `%%` inside a conditional branch: the last sub-reference value
    LastSubRef,
}

/// A conditional block selecting one of two branches
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConditionalNode {
    /// Name whose resolved value gates the block (non-empty selects the true branch)
    pub selector: String,
    pub true_branch: Vec<TemplateNode>,
    /// `None` when the block has no else segment
    pub else_branch: Option<Vec<TemplateNode>>,
}

impl Template {
    pub fn new(nodes: Vec<TemplateNode>) -> Self {
        Self { nodes }
    }

    /// Returns true if the template contains no reference or conditional syntax
    pub fn is_plain(&self) -> bool {
        self.nodes.iter().all(|n| matches!(n, TemplateNode::Text(_)))
    }

    /// All names a render needs, normalized and de-duplicated in first-seen order
    pub fn referenced_names(&self) -> Vec<String> {
        let mut names = Vec::new();
        collect_names(&self.nodes, &mut names);
        names
    }
}

fn push_name(name: &str, names: &mut Vec<String>) {
    let name = normalize_name(name);
    if !names.contains(&name) {
        names.push(name);
    }
}

fn collect_names(nodes: &[TemplateNode], names: &mut Vec<String>) {
    for node in nodes {
        match node {
            TemplateNode::Text(_) | TemplateNode::LastSubRef => {}
            TemplateNode::Ref { name } | TemplateNode::SubRef { name } => push_name(name, names),
            TemplateNode::Conditional(cond) => {
                push_name(&cond.selector, names);
                collect_names(&cond.true_branch, names);
                if let Some(else_branch) = &cond.else_branch {
                    collect_names(else_branch, names);
                }
            }
        }
    }
}

impl TemplateNode {
    pub fn text(s: impl Into<String>) -> Self {
        TemplateNode::Text(s.into())
    }

    pub fn reference(name: impl Into<String>) -> Self {
        TemplateNode::Ref { name: name.into() }
    }

    pub fn sub_ref(name: impl Into<String>) -> Self {
        TemplateNode::SubRef { name: name.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_template() {
        let template = Template::new(vec![TemplateNode::text("Hello")]);
        assert!(template.is_plain());
        assert!(template.referenced_names().is_empty());
    }

    #[test]
    fn test_referenced_names_are_deduplicated() {
        let template = Template::new(vec![
            TemplateNode::reference("FirstName"),
            TemplateNode::Conditional(ConditionalNode {
                selector: "tier".to_string(),
                true_branch: vec![
                    TemplateNode::sub_ref("tier"),
                    TemplateNode::sub_ref("firstname"),
                    TemplateNode::LastSubRef,
                ],
                else_branch: Some(vec![TemplateNode::sub_ref("city")]),
            }),
        ]);

        assert!(!template.is_plain());
        assert_eq!(
            template.referenced_names(),
            vec!["firstname".to_string(), "tier".to_string(), "city".to_string()]
        );
    }
}
