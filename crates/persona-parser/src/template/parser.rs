//! Template parser
//!
//! Grammar recognized inside arbitrary text:
//!
//! ```text
//! Ref         := "{%" NAME "%}"
//! Conditional := "{if(%" NAME "%)" "{" Branch "}" [ "{" Branch "}" ] "}"
//! Branch      := ( Text | Ref | Conditional | "%" NAME "%" | "%%" )*
//! ```
//!
//! Parsing never fails. A construct with a missing delimiter is abandoned:
//! its opening `{` is kept as text and parsing resumes on the next
//! character, so the source stays verbatim from that brace onward.

use persona_core::ast::{ConditionalNode, Template, TemplateNode};
use persona_core::has_whitespace;

use super::lexer::{Span, TemplateLexer, Token, TokenKind};

/// Recursive-descent template parser
pub struct TemplateParser<'a> {
    lexer: TemplateLexer<'a>,
}

impl<'a> TemplateParser<'a> {
    /// Parse template text into a tree
    pub fn parse(source: &'a str) -> Template {
        let mut parser = Self {
            lexer: TemplateLexer::new(source),
        };
        let mut nodes = Vec::new();

        while let Some(token) = parser.lexer.next() {
            match token.kind {
                TokenKind::Open => parser.parse_open(token, &mut nodes),
                _ => push_text(&mut nodes, parser.lexer.slice(token.span)),
            }
        }

        Template::new(nodes)
    }

    /// Handle a `{` that may start a reference or a conditional
    fn parse_open(&mut self, open: Token, nodes: &mut Vec<TemplateNode>) {
        let checkpoint = self.lexer.clone();

        let node = match self.lexer.peek_kind() {
            Some(TokenKind::Percent) => self.parse_reference(open),
            Some(TokenKind::IfParen) => self.parse_conditional(open),
            _ => None,
        };

        match node {
            Some(TemplateNode::Text(text)) => push_text(nodes, &text),
            Some(node) => nodes.push(node),
            None => {
                self.lexer = checkpoint;
                push_text(nodes, self.lexer.slice(open.span));
            }
        }
    }

    /// `{%NAME%}`; `open` is already consumed
    fn parse_reference(&mut self, open: Token) -> Option<TemplateNode> {
        self.expect(TokenKind::Percent)?;
        let (name, _) = self.name_until(TokenKind::Close)?;
        let close = self.expect(TokenKind::Close)?;

        if has_whitespace(name) {
            // Invalid reference: keep the raw syntax
            return Some(TemplateNode::text(self.lexer.slice(open.span.to(close.span))));
        }
        Some(TemplateNode::reference(name))
    }

    /// `{if(%NAME%){...}{...}}`; `open` is already consumed
    fn parse_conditional(&mut self, open: Token) -> Option<TemplateNode> {
        let node = self.parse_conditional_parts();
        if node.is_none() {
            log::debug!(
                "Malformed conditional block at offset {}, keeping it as text",
                open.span.start
            );
        }
        node
    }

    fn parse_conditional_parts(&mut self) -> Option<TemplateNode> {
        self.expect(TokenKind::IfParen)?;
        self.expect(TokenKind::Percent)?;
        let (selector, _) = self.name_until(TokenKind::RParen)?;
        self.expect(TokenKind::RParen)?;
        if selector.is_empty() || has_whitespace(selector) {
            return None;
        }

        // True branch starts at the first `{` after the selector
        match self.skip_to_brace()? {
            TokenKind::Open => {}
            _ => return None,
        }
        let true_branch = self.parse_branch()?;

        // Optional else branch, then the block's own closing brace
        let else_branch = match self.skip_to_brace()? {
            TokenKind::Open => {
                let branch = self.parse_branch()?;
                match self.skip_to_brace()? {
                    TokenKind::Close => {}
                    _ => return None,
                }
                Some(branch)
            }
            _ => None,
        };

        Some(TemplateNode::Conditional(ConditionalNode {
            selector: selector.to_string(),
            true_branch,
            else_branch,
        }))
    }

    /// Branch content after its opening `{`, through its closing `}`.
    /// Returns `None` at end of input.
    fn parse_branch(&mut self) -> Option<Vec<TemplateNode>> {
        let mut nodes = Vec::new();
        self.skip_nested_separator();

        loop {
            let token = self.lexer.next()?;
            match token.kind {
                TokenKind::Close => return Some(nodes),
                TokenKind::Open => self.parse_open(token, &mut nodes),
                TokenKind::Percent => self.parse_sub_reference(token, &mut nodes),
                _ => push_text(&mut nodes, self.lexer.slice(token.span)),
            }
        }
    }

    /// `{ {if(%` opens a branch with a nested conditional; the single space
    /// between the two braces is a separator, not content
    fn skip_nested_separator(&mut self) {
        let mut lookahead = self.lexer.clone();
        let is_separator = matches!(
            lookahead.next(),
            Some(t) if t.kind == TokenKind::Whitespace && self.lexer.slice(t.span) == " "
        );
        if is_separator
            && lookahead.next().map(|t| t.kind) == Some(TokenKind::Open)
            && lookahead.next().map(|t| t.kind) == Some(TokenKind::IfParen)
        {
            self.lexer.next();
        }
    }

    /// `%NAME%` or `%%` inside a branch; `percent` is already consumed.
    /// A `%` without a partner before the next brace is plain text.
    fn parse_sub_reference(&mut self, percent: Token, nodes: &mut Vec<TemplateNode>) {
        if self.lexer.peek_kind() == Some(TokenKind::Percent) {
            self.lexer.next();
            nodes.push(TemplateNode::LastSubRef);
            return;
        }

        let checkpoint = self.lexer.clone();
        let Some((name, end)) = self.name_until_percent() else {
            self.lexer = checkpoint;
            push_text(nodes, self.lexer.slice(percent.span));
            return;
        };

        if has_whitespace(name) {
            push_text(nodes, self.lexer.slice(percent.span.to(end)));
        } else {
            nodes.push(TemplateNode::sub_ref(name));
        }
    }

    /// Collect a name up to a `%` followed by `terminator`, consuming the `%`.
    /// Fails on braces, a stray `%`, or end of input.
    fn name_until(&mut self, terminator: TokenKind) -> Option<(&'a str, Span)> {
        let start = self.lexer.position();
        loop {
            let token = self.lexer.next()?;
            match token.kind {
                TokenKind::Open | TokenKind::Close => return None,
                TokenKind::Percent if self.lexer.peek_kind() == Some(terminator) => {
                    let span = Span::new(start, token.span.start);
                    return Some((self.lexer.slice(span), token.span));
                }
                TokenKind::Percent => return None,
                _ => {}
            }
        }
    }

    /// Collect a sub-reference name up to the next `%`, consuming it.
    /// Returns the name and the closing `%` span.
    fn name_until_percent(&mut self) -> Option<(&'a str, Span)> {
        let start = self.lexer.position();
        loop {
            let token = self.lexer.next()?;
            match token.kind {
                TokenKind::Open | TokenKind::Close => return None,
                TokenKind::Percent => {
                    let span = Span::new(start, token.span.start);
                    return Some((self.lexer.slice(span), token.span));
                }
                _ => {}
            }
        }
    }

    /// Consume tokens up to and including the next `{` or `}`, returning its kind
    fn skip_to_brace(&mut self) -> Option<TokenKind> {
        loop {
            let token = self.lexer.next()?;
            if matches!(token.kind, TokenKind::Open | TokenKind::Close) {
                return Some(token.kind);
            }
        }
    }

    fn expect(&mut self, kind: TokenKind) -> Option<Token> {
        match self.lexer.peek() {
            Some(token) if token.kind == kind => self.lexer.next(),
            _ => None,
        }
    }
}

/// Append text, merging with a preceding text node
fn push_text(nodes: &mut Vec<TemplateNode>, text: &str) {
    if text.is_empty() {
        return;
    }
    if let Some(TemplateNode::Text(last)) = nodes.last_mut() {
        last.push_str(text);
    } else {
        nodes.push(TemplateNode::text(text));
    }
}
