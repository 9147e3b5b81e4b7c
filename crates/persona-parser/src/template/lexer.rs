//! Template lexer
//!
//! Splits template text into the few characters that carry meaning
//! (`{`, `}`, `%`, `)`, the `if(` keyword) and runs of everything else.
//! Every token records its byte span so the parser can reproduce any
//! source region verbatim.

/// Byte range into the template source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Span covering `self` through `other`
    pub fn to(self, other: Span) -> Span {
        Span::new(self.start, other.end)
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// `{`
    Open,
    /// `}`
    Close,
    /// `%`
    Percent,
    /// `if(`
    IfParen,
    /// `)`
    RParen,
    /// Run of whitespace
    Whitespace,
    /// Run of any other characters
    Text,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

const IF_KEYWORD: &str = "if(";

/// Lazy token stream over a template.
///
/// Cloning the lexer captures its position, so a clone is a checkpoint the
/// parser can restore after a failed attempt.
#[derive(Debug, Clone)]
pub struct TemplateLexer<'a> {
    source: &'a str,
    pos: usize,
}

impl<'a> TemplateLexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self { source, pos: 0 }
    }

    pub fn source(&self) -> &'a str {
        self.source
    }

    /// Byte offset of the next token
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Source text of a span
    pub fn slice(&self, span: Span) -> &'a str {
        &self.source[span.start..span.end]
    }

    /// Look at the next token without consuming it
    pub fn peek(&self) -> Option<Token> {
        self.clone().next()
    }

    /// Look at the kind of the next token without consuming it
    pub fn peek_kind(&self) -> Option<TokenKind> {
        self.peek().map(|t| t.kind)
    }

    fn special_kind(rest: &str) -> Option<(TokenKind, usize)> {
        let c = rest.chars().next()?;
        match c {
            '{' => Some((TokenKind::Open, 1)),
            '}' => Some((TokenKind::Close, 1)),
            '%' => Some((TokenKind::Percent, 1)),
            ')' => Some((TokenKind::RParen, 1)),
            _ if rest.starts_with(IF_KEYWORD) => Some((TokenKind::IfParen, IF_KEYWORD.len())),
            _ => None,
        }
    }

    /// Length of the run starting at `rest` whose characters satisfy `keep`
    /// and do not start a special token
    fn run_len(rest: &str, keep: impl Fn(char) -> bool) -> usize {
        rest.char_indices()
            .find(|&(i, c)| !keep(c) || Self::special_kind(&rest[i..]).is_some())
            .map(|(i, _)| i)
            .unwrap_or(rest.len())
    }
}

impl Iterator for TemplateLexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        let rest = &self.source[self.pos..];
        let first = rest.chars().next()?;

        let (kind, len) = match Self::special_kind(rest) {
            Some(special) => special,
            None if first.is_whitespace() => {
                (TokenKind::Whitespace, Self::run_len(rest, char::is_whitespace))
            }
            None => (TokenKind::Text, Self::run_len(rest, |c| !c.is_whitespace())),
        };

        let span = Span::new(self.pos, self.pos + len);
        self.pos += len;
        Some(Token { kind, span })
    }
}
