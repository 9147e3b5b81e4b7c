//! Boolean condition tree used by complex variables
//!
//! Connectives at the same nesting level are folded strictly left to right:
//! `a OR b AND c` is `(a OR b) AND c`. There is no precedence between `AND`
//! and `OR`; parentheses are the only grouping.

use std::fmt;

/// Comparison operator of a leaf term
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    /// `==`
    Eq,
    /// `!=`
    Ne,
}

/// Connective between two terms
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Connective {
    And,
    Or,
}

/// Left-hand side of a comparison
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operand {
    /// Bare name, looked up as a recipient attribute
    Attribute(String),
    /// Quoted constant
    Literal(String),
}

/// A parsed boolean condition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConditionExpr {
    Lit(bool),
    Compare {
        operand: Operand,
        op: CompareOp,
        literal: String,
    },
    And(Box<ConditionExpr>, Box<ConditionExpr>),
    Or(Box<ConditionExpr>, Box<ConditionExpr>),
}

impl ConditionExpr {
    pub fn compare(operand: Operand, op: CompareOp, literal: impl Into<String>) -> Self {
        ConditionExpr::Compare {
            operand,
            op,
            literal: literal.into(),
        }
    }

    /// Combine `self` with `rhs`, keeping `self` as the left operand
    pub fn combine(self, connective: Connective, rhs: ConditionExpr) -> Self {
        match connective {
            Connective::And => ConditionExpr::And(Box::new(self), Box::new(rhs)),
            Connective::Or => ConditionExpr::Or(Box::new(self), Box::new(rhs)),
        }
    }

    /// Fold a first term and a sequence of `(connective, term)` pairs left to right
    pub fn fold(first: ConditionExpr, rest: impl IntoIterator<Item = (Connective, ConditionExpr)>) -> Self {
        rest.into_iter()
            .fold(first, |acc, (connective, term)| acc.combine(connective, term))
    }
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompareOp::Eq => f.write_str("=="),
            CompareOp::Ne => f.write_str("!="),
        }
    }
}

impl fmt::Display for ConditionExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConditionExpr::Lit(b) => write!(f, "{}", b),
            ConditionExpr::Compare { operand, op, literal } => match operand {
                Operand::Attribute(name) => write!(f, "{} {} \"{}\"", name, op, literal),
                Operand::Literal(value) => write!(f, "\"{}\" {} \"{}\"", value, op, literal),
            },
            ConditionExpr::And(l, r) => write!(f, "({} AND {})", l, r),
            ConditionExpr::Or(l, r) => write!(f, "({} OR {})", l, r),
        }
    }
}
