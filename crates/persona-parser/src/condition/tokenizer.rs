//! Condition tokenizer

use crate::error::{ParseError, Result};

/// A condition token
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConditionToken {
    LParen,
    RParen,
    /// `==`
    Eq,
    /// `!=`
    Ne,
    /// Double-quoted literal, quotes stripped, inner spaces kept
    Quoted(String),
    /// Any other whitespace-delimited word (names, keywords, bare literals)
    Word(String),
}

impl ConditionToken {
    /// Returns true if this is a bare word equal to `keyword`, ignoring case
    pub fn is_keyword(&self, keyword: &str) -> bool {
        matches!(self, ConditionToken::Word(w) if w.eq_ignore_ascii_case(keyword))
    }

    /// Source-like rendering for error messages
    pub fn describe(&self) -> String {
        match self {
            ConditionToken::LParen => "(".to_string(),
            ConditionToken::RParen => ")".to_string(),
            ConditionToken::Eq => "==".to_string(),
            ConditionToken::Ne => "!=".to_string(),
            ConditionToken::Quoted(s) => format!("\"{}\"", s),
            ConditionToken::Word(w) => w.clone(),
        }
    }
}

/// A token with the byte offset where it starts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spanned {
    pub token: ConditionToken,
    pub offset: usize,
}

/// Lazy tokenizer over a condition string
#[derive(Debug, Clone)]
pub struct ConditionTokenizer<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> ConditionTokenizer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    /// Tokenize the whole input
    pub fn tokenize(input: &'a str) -> Result<Vec<Spanned>> {
        Self::new(input).collect()
    }

    fn skip_whitespace(&mut self) {
        let rest = &self.input[self.pos..];
        self.pos += rest.len() - rest.trim_start().len();
    }

    fn is_operator_start(rest: &str) -> bool {
        rest.starts_with("==") || rest.starts_with("!=")
    }

    fn word_len(rest: &str) -> usize {
        rest.char_indices()
            .find(|&(i, c)| {
                c.is_whitespace()
                    || matches!(c, '(' | ')' | '"')
                    || Self::is_operator_start(&rest[i..])
            })
            .map(|(i, _)| i)
            .unwrap_or(rest.len())
    }
}

impl Iterator for ConditionTokenizer<'_> {
    type Item = Result<Spanned>;

    fn next(&mut self) -> Option<Self::Item> {
        self.skip_whitespace();
        let offset = self.pos;
        let rest = &self.input[offset..];
        let c = rest.chars().next()?;

        let (token, len) = match c {
            '(' => (ConditionToken::LParen, 1),
            ')' => (ConditionToken::RParen, 1),
            '"' => match rest[1..].find('"') {
                Some(end) => (ConditionToken::Quoted(rest[1..=end].to_string()), end + 2),
                None => {
                    // Stop after reporting
                    self.pos = self.input.len();
                    return Some(Err(ParseError::UnterminatedLiteral(offset)));
                }
            },
            _ if rest.starts_with("==") => (ConditionToken::Eq, 2),
            _ if rest.starts_with("!=") => (ConditionToken::Ne, 2),
            _ => {
                let len = Self::word_len(rest);
                (ConditionToken::Word(rest[..len].to_string()), len)
            }
        };

        self.pos += len;
        Some(Ok(Spanned { token, offset }))
    }
}
