//! Parser infrastructure for the selector language.
//!
//! # Architecture
//!
//! ```text
//! Source text → lex() → Vec<Token> → Parser → Selector
//! ```
//!
//! Unlike a resilient IDE parser, this one stops at the first problem: a
//! selector is either compiled whole or rejected with a [`SyntaxError`]
//! carrying the line and column of the offending token.

pub mod lexer;

mod core;
mod grammar;


pub use core::Parser;
pub use lexer::{Token, TokenKind, lex, token_text, token_value};

use crate::diagnostics::SyntaxError;
use crate::selector::Selector;

/// Main entry point: compile selector text into a [`Selector`].
pub fn parse(source: &str) -> Result<Selector, SyntaxError> {
    let tokens = lex(source)?;
    Parser::new(source, tokens).parse_selector()
}
