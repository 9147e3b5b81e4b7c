//! Template lexing and parsing
//!
//! The lexer yields position-tracked tokens; the parser is a recursive
//! descent over that stream which backtracks by cloning the lexer.

mod lexer;
mod parser;

pub use lexer::{Span, TemplateLexer, Token, TokenKind};
pub use parser::TemplateParser;
