//! Core parser state machine and low-level operations.
//!
//! The token stream is processed left-to-right with single-token lookahead.
//! Whitespace tokens are not trivia here: the grammar reads them as
//! descendant combinators, so they are only skipped where it says so.

use crate::diagnostics::SyntaxError;

use super::lexer::{Token, TokenKind, position_at, token_value};

pub struct Parser<'src> {
    pub(super) source: &'src str,
    pub(super) tokens: Vec<Token>,
    /// Current position in `tokens`. Monotonically increases.
    pub(super) pos: usize,
}

impl<'src> Parser<'src> {
    pub fn new(source: &'src str, tokens: Vec<Token>) -> Self {
        Self {
            source,
            tokens,
            pos: 0,
        }
    }

    /// Current token kind. `None` at end of input.
    pub(super) fn current(&self) -> Option<TokenKind> {
        self.tokens.get(self.pos).map(|t| t.kind)
    }

    pub(super) fn at(&self, kind: TokenKind) -> bool {
        self.current() == Some(kind)
    }

    pub(super) fn eof(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    /// Value of the current token (see [`token_value`]).
    pub(super) fn current_value(&self) -> Option<&'src str> {
        let source = self.source;
        self.tokens
            .get(self.pos)
            .and_then(|t| token_value(source, t))
    }

    pub(super) fn bump(&mut self) {
        assert!(!self.eof(), "bump called at EOF");
        self.pos += 1;
    }

    /// Skip every consecutive token of `kind`.
    pub(super) fn burn(&mut self, kind: TokenKind) {
        while self.at(kind) {
            self.bump();
        }
    }

    /// Consume a token of `kind` and return its value.
    pub(super) fn expect(&mut self, kind: TokenKind, what: &str) -> Result<&'src str, SyntaxError> {
        if !self.at(kind) {
            return Err(self.unexpected(what));
        }
        let value = self.current_value().unwrap_or_default();
        self.bump();
        Ok(value)
    }

    /// Error at the current token, or at end of input.
    pub(super) fn unexpected(&self, expected: &str) -> SyntaxError {
        match self.tokens.get(self.pos) {
            Some(token) => SyntaxError::new(
                format!("expected {expected}, found {}", token.kind.describe()),
                token.span.clone(),
                token.line,
                token.column,
            ),
            None => self.error_at_eof(format!("expected {expected}, found end of input")),
        }
    }

    /// Error pointing one past the last character.
    pub(super) fn error_at_eof(&self, message: String) -> SyntaxError {
        let end = self.source.len();
        let position = position_at(self.source, end);
        SyntaxError::new(message, end..end, position.line, position.column)
    }

    /// Error at the current token with a custom message.
    pub(super) fn error_here(&self, message: String) -> SyntaxError {
        match self.tokens.get(self.pos) {
            Some(token) => {
                SyntaxError::new(message, token.span.clone(), token.line, token.column)
            }
            None => self.error_at_eof(message),
        }
    }
}
