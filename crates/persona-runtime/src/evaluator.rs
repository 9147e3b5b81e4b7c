//! Condition evaluation for complex variables

use persona_core::ast::{CompareOp, ConditionExpr, Operand};
use persona_parser::ConditionParser;

use crate::resolver::ReferenceResolver;

/// Evaluates boolean conditions against one recipient's attributes
pub struct ConditionEvaluator<'r, 's> {
    resolver: &'r ReferenceResolver<'s>,
}

impl<'r, 's> ConditionEvaluator<'r, 's> {
    pub fn new(resolver: &'r ReferenceResolver<'s>) -> Self {
        Self { resolver }
    }

    /// Parse and evaluate a condition string. A condition that does not
    /// parse (unbalanced parentheses included) is false.
    pub fn evaluate_str(&self, expression: &str) -> bool {
        match ConditionParser::parse(expression) {
            Ok(expr) => self.evaluate(&expr),
            Err(e) => {
                tracing::debug!("Condition '{}' is not valid, treating as false: {}", expression, e);
                false
            }
        }
    }

    pub fn evaluate(&self, expr: &ConditionExpr) -> bool {
        match expr {
            ConditionExpr::Lit(b) => *b,
            ConditionExpr::Compare { operand, op, literal } => {
                self.compare(operand, *op, literal)
            }
            ConditionExpr::And(l, r) => self.evaluate(l) && self.evaluate(r),
            ConditionExpr::Or(l, r) => self.evaluate(l) || self.evaluate(r),
        }
    }

    /// A missing attribute makes the term false for both operators
    fn compare(&self, operand: &Operand, op: CompareOp, literal: &str) -> bool {
        let value = match operand {
            Operand::Attribute(name) => match self.resolver.attribute(name) {
                Some(value) => value,
                None => return false,
            },
            Operand::Literal(value) => value.clone(),
        };

        match op {
            CompareOp::Eq => value == literal,
            CompareOp::Ne => value != literal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use persona_repository::MemoryStore;

    fn with_evaluator(check: impl FnOnce(&ConditionEvaluator<'_, '_>)) {
        let store = MemoryStore::new();
        let id = store.add_recipient("alice@example.com");
        store.set_attribute(&id, "tier", "gold").unwrap();
        store.set_attribute(&id, "country", "FR").unwrap();
        store.set_attribute(&id, "city", "Le Havre").unwrap();

        let resolver = ReferenceResolver::new(&store, id);
        check(&ConditionEvaluator::new(&resolver));
    }

    #[test]
    fn test_literals() {
        with_evaluator(|e| {
            assert!(e.evaluate_str("true"));
            assert!(!e.evaluate_str("false"));
        });
    }

    #[test]
    fn test_left_fold_quirk() {
        with_evaluator(|e| {
            assert!(!e.evaluate_str("true OR false AND false"));
            assert!(e.evaluate_str("false AND false OR true"));
            assert!(e.evaluate_str("true or (false and false)"));
        });
    }

    #[test]
    fn test_parenthesized_constants() {
        with_evaluator(|e| {
            assert!(!e.evaluate_str(r#"("silver"=="silver") AND ("gold"=="platinum")"#));
            assert!(e.evaluate_str(r#"("silver"=="silver") OR ("gold"=="platinum")"#));
        });
    }

    #[test]
    fn test_attribute_comparisons() {
        with_evaluator(|e| {
            assert!(e.evaluate_str(r#"tier == "gold""#));
            assert!(e.evaluate_str("Tier != silver"));
            assert!(e.evaluate_str(r#"city == "Le Havre""#));
            assert!(!e.evaluate_str(r#"tier == "Gold""#));
        });
    }

    #[test]
    fn test_missing_attribute_is_false() {
        with_evaluator(|e| {
            assert!(!e.evaluate_str(r#"age == "25""#));
            assert!(!e.evaluate_str(r#"age != "25""#));
        });
    }

    #[test]
    fn test_nested_groups() {
        with_evaluator(|e| {
            let expr = r#"tier == "gold" AND (country == "BE" OR (country == "FR" AND city != "Paris"))"#;
            assert!(e.evaluate_str(expr));
        });
    }

    #[test]
    fn test_malformed_expressions_are_false() {
        with_evaluator(|e| {
            assert!(!e.evaluate_str(r#"(tier == "gold""#));
            assert!(!e.evaluate_str(r#"tier == "gold")"#));
            assert!(!e.evaluate_str(""));
            assert!(!e.evaluate_str("tier"));
        });
    }

    #[test]
    fn test_invalid_group_becomes_false() {
        with_evaluator(|e| {
            assert!(e.evaluate_str(r#"(tier ==) OR tier == "gold""#));
            assert!(!e.evaluate_str(r#"(tier ==) AND tier == "gold""#));
        });
    }
}
