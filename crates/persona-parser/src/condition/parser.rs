//! Recursive-descent condition parser

use persona_core::ast::{CompareOp, ConditionExpr, Connective, Operand};

use super::tokenizer::{ConditionToken, ConditionTokenizer, Spanned};
use crate::error::{ParseError, Result};

/// Condition parser
pub struct ConditionParser;

impl ConditionParser {
    /// Parse a condition string into a tree.
    ///
    /// A parenthesized group that fails to parse is replaced by `false`
    /// instead of failing the whole condition. Errors outside any group,
    /// and unbalanced parentheses, are returned.
    pub fn parse(input: &str) -> Result<ConditionExpr> {
        let tokens = ConditionTokenizer::tokenize(input)?;
        if tokens.is_empty() {
            return Err(ParseError::EmptyCondition);
        }
        if !is_balanced(&tokens) {
            return Err(ParseError::UnbalancedParentheses(input.to_string()));
        }

        Cursor::new(&tokens).parse_all()
    }
}

fn is_balanced(tokens: &[Spanned]) -> bool {
    let mut depth: usize = 0;
    for spanned in tokens {
        match spanned.token {
            ConditionToken::LParen => depth += 1,
            ConditionToken::RParen => match depth.checked_sub(1) {
                Some(d) => depth = d,
                None => return false,
            },
            _ => {}
        }
    }
    depth == 0
}

struct Cursor<'t> {
    tokens: &'t [Spanned],
    pos: usize,
}

impl<'t> Cursor<'t> {
    fn new(tokens: &'t [Spanned]) -> Self {
        Self { tokens, pos: 0 }
    }

    /// Parse an expression that must consume every token
    fn parse_all(&mut self) -> Result<ConditionExpr> {
        let expr = self.parse_expr()?;
        match self.peek() {
            None => Ok(expr),
            Some(extra) => Err(unexpected(extra)),
        }
    }

    fn parse_expr(&mut self) -> Result<ConditionExpr> {
        let first = self.parse_term()?;
        let mut rest = Vec::new();

        while let Some(spanned) = self.peek() {
            let connective = if spanned.token.is_keyword("and") {
                Connective::And
            } else if spanned.token.is_keyword("or") {
                Connective::Or
            } else {
                return Err(unexpected(spanned));
            };
            self.pos += 1;
            rest.push((connective, self.parse_term()?));
        }

        Ok(ConditionExpr::fold(first, rest))
    }

    fn parse_term(&mut self) -> Result<ConditionExpr> {
        let spanned = self
            .next()
            .ok_or_else(|| ParseError::UnexpectedEnd(self.previous_text()))?;

        match &spanned.token {
            ConditionToken::LParen => Ok(self.parse_group()),
            ConditionToken::Word(w) if w == "true" => Ok(ConditionExpr::Lit(true)),
            ConditionToken::Word(w) if w == "false" => Ok(ConditionExpr::Lit(false)),
            ConditionToken::Word(w) if !spanned.token.is_keyword("and") && !spanned.token.is_keyword("or") => {
                self.parse_comparison(Operand::Attribute(w.clone()), w)
            }
            ConditionToken::Quoted(q) => self.parse_comparison(Operand::Literal(q.clone()), q),
            _ => Err(unexpected(spanned)),
        }
    }

    /// Group body after `(`. Balance is checked up front, so the matching
    /// `)` always exists.
    fn parse_group(&mut self) -> ConditionExpr {
        let start = self.pos;
        let mut depth = 1usize;
        let mut end = start;
        while end < self.tokens.len() {
            match self.tokens[end].token {
                ConditionToken::LParen => depth += 1,
                ConditionToken::RParen => {
                    depth -= 1;
                    if depth == 0 {
                        break;
                    }
                }
                _ => {}
            }
            end += 1;
        }
        self.pos = (end + 1).min(self.tokens.len());

        let inner = &self.tokens[start..end];
        if inner.is_empty() {
            log::debug!("Empty condition group, evaluating as false");
            return ConditionExpr::Lit(false);
        }
        match Cursor::new(inner).parse_all() {
            Ok(expr) => expr,
            Err(e) => {
                log::debug!("Invalid condition group, evaluating as false: {}", e);
                ConditionExpr::Lit(false)
            }
        }
    }

    fn parse_comparison(&mut self, operand: Operand, operand_text: &str) -> Result<ConditionExpr> {
        let op = match self.next().map(|s| &s.token) {
            Some(ConditionToken::Eq) => CompareOp::Eq,
            Some(ConditionToken::Ne) => CompareOp::Ne,
            _ => return Err(ParseError::MissingOperator(operand_text.to_string())),
        };

        let literal = match self.next().map(|s| &s.token) {
            Some(ConditionToken::Quoted(s)) | Some(ConditionToken::Word(s)) => s.clone(),
            _ => return Err(ParseError::MissingLiteral(format!("{} {}", operand_text, op))),
        };

        Ok(ConditionExpr::compare(operand, op, literal))
    }

    fn peek(&self) -> Option<&'t Spanned> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Option<&'t Spanned> {
        let spanned = self.tokens.get(self.pos)?;
        self.pos += 1;
        Some(spanned)
    }

    fn previous_text(&self) -> String {
        self.pos
            .checked_sub(1)
            .and_then(|i| self.tokens.get(i))
            .map(|s| s.token.describe())
            .unwrap_or_default()
    }
}

fn unexpected(spanned: &Spanned) -> ParseError {
    ParseError::UnexpectedToken {
        token: spanned.token.describe(),
        offset: spanned.offset,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attr_eq(name: &str, literal: &str) -> ConditionExpr {
        ConditionExpr::compare(Operand::Attribute(name.into()), CompareOp::Eq, literal)
    }

    #[test]
    fn test_parse_simple_eq() {
        let expr = ConditionParser::parse(r#"tier == "gold""#).unwrap();
        assert_eq!(expr, attr_eq("tier", "gold"));
    }

    #[test]
    fn test_parse_bare_literal() {
        let expr = ConditionParser::parse("country != FR").unwrap();
        assert_eq!(
            expr,
            ConditionExpr::compare(Operand::Attribute("country".into()), CompareOp::Ne, "FR")
        );
    }

    #[test]
    fn test_parse_left_fold_without_precedence() {
        let expr = ConditionParser::parse("true OR false AND false").unwrap();
        assert_eq!(expr.to_string(), "((true OR false) AND false)");
    }

    #[test]
    fn test_parse_lowercase_connectives() {
        let expr = ConditionParser::parse(r#"a == "1" and b == "2" or c == "3""#).unwrap();
        assert_eq!(
            expr,
            attr_eq("a", "1")
                .combine(Connective::And, attr_eq("b", "2"))
                .combine(Connective::Or, attr_eq("c", "3"))
        );
    }

    #[test]
    fn test_parse_parentheses() {
        let expr = ConditionParser::parse(r#"("silver"=="silver") AND ("gold"=="platinum")"#).unwrap();
        assert_eq!(
            expr,
            ConditionExpr::compare(Operand::Literal("silver".into()), CompareOp::Eq, "silver").combine(
                Connective::And,
                ConditionExpr::compare(Operand::Literal("gold".into()), CompareOp::Eq, "platinum"),
            )
        );
    }

    #[test]
    fn test_parse_nested_parentheses() {
        let expr = ConditionParser::parse(r#"a == x AND ((b == y) OR c == z)"#).unwrap();
        assert_eq!(expr.to_string(), "(a == \"x\" AND (b == \"y\" OR c == \"z\"))");
    }

    #[test]
    fn test_invalid_group_becomes_false() {
        let expr = ConditionParser::parse(r#"(tier ==) OR true"#).unwrap();
        assert_eq!(
            expr,
            ConditionExpr::Lit(false).combine(Connective::Or, ConditionExpr::Lit(true))
        );
    }

    #[test]
    fn test_empty_group_becomes_false() {
        let expr = ConditionParser::parse("() OR true").unwrap();
        assert_eq!(expr.to_string(), "(false OR true)");
    }

    #[test]
    fn test_unbalanced_parentheses() {
        assert!(matches!(
            ConditionParser::parse("(a == b"),
            Err(ParseError::UnbalancedParentheses(_))
        ));
        assert!(matches!(
            ConditionParser::parse("a == b)"),
            Err(ParseError::UnbalancedParentheses(_))
        ));
        assert!(matches!(
            ConditionParser::parse(")a == b("),
            Err(ParseError::UnbalancedParentheses(_))
        ));
    }

    #[test]
    fn test_parenthesis_inside_quotes_is_literal() {
        let expr = ConditionParser::parse(r#"note == "a (b""#).unwrap();
        assert_eq!(expr, attr_eq("note", "a (b"));
    }

    #[test]
    fn test_empty_condition() {
        assert_eq!(ConditionParser::parse("   "), Err(ParseError::EmptyCondition));
    }

    #[test]
    fn test_missing_operator() {
        assert_eq!(
            ConditionParser::parse("tier"),
            Err(ParseError::MissingOperator("tier".into()))
        );
    }

    #[test]
    fn test_missing_literal() {
        assert!(matches!(
            ConditionParser::parse("tier =="),
            Err(ParseError::MissingLiteral(_))
        ));
    }

    #[test]
    fn test_dangling_connective() {
        assert_eq!(
            ConditionParser::parse("true AND"),
            Err(ParseError::UnexpectedEnd("AND".into()))
        );
    }

    #[test]
    fn test_unknown_connective() {
        assert!(matches!(
            ConditionParser::parse("true XOR false"),
            Err(ParseError::UnexpectedToken { token, offset: 5 }) if token == "XOR"
        ));
    }

    #[test]
    fn test_leading_connective() {
        assert!(matches!(
            ConditionParser::parse("AND true"),
            Err(ParseError::UnexpectedToken { .. })
        ));
    }
}
