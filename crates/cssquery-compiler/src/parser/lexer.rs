//! Lexer for the selector language.
//!
//! Produces span-based tokens without storing text - text is sliced from
//! source only when needed. Every token records the 1-based line and column
//! of its first character.
//!
//! ## Bracket bodies
//!
//! `[...]` and `(...)` bodies may nest (`[len(x) == [1, 2][0]]`), which no
//! regular expression can match. Logos only recognizes the opening bracket;
//! `lex` then scans forward counting depth and bumps the lexer past the
//! matching close, so the whole body becomes one `BracketExpr` / `ParenArgs`
//! token.

use std::ops::Range;

use logos::Logos;
use serde::Serialize;

use crate::diagnostics::SyntaxError;

/// Token kinds of the selector language.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TokenKind {
    /// Significant: separates steps into descendant combinators.
    #[regex(r"[ \t\r\n]+")]
    Whitespace,

    #[token(",")]
    Comma,

    #[token("*")]
    Star,

    #[token(".")]
    Dot,

    #[token("#")]
    Hash,

    #[token("+")]
    Plus,

    #[token(">")]
    Greater,

    #[token("~")]
    Tilde,

    #[token(":")]
    Colon,

    #[regex(r"[A-Za-z_\-][A-Za-z0-9_\-]*")]
    Ident,

    /// Predicate body `[expr]`, brackets included in the span.
    #[token("[")]
    BracketExpr,

    /// Function arguments `(args)`, parens included in the span.
    #[token("(")]
    ParenArgs,
}

impl TokenKind {
    /// Human-readable name used in error messages.
    pub fn describe(self) -> &'static str {
        match self {
            Self::Whitespace => "whitespace",
            Self::Comma => "`,`",
            Self::Star => "`*`",
            Self::Dot => "`.`",
            Self::Hash => "`#`",
            Self::Plus => "`+`",
            Self::Greater => "`>`",
            Self::Tilde => "`~`",
            Self::Colon => "`:`",
            Self::Ident => "identifier",
            Self::BracketExpr => "predicate",
            Self::ParenArgs => "argument list",
        }
    }

    pub fn is_combinator(self) -> bool {
        matches!(self, Self::Plus | Self::Greater | Self::Tilde)
    }
}

/// Zero-copy token: kind + span + position, text retrieved via [`token_text`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Range<usize>,
    pub line: u32,
    pub column: u32,
}

impl Token {
    #[inline]
    pub fn new(kind: TokenKind, span: Range<usize>, position: Position) -> Self {
        Self {
            kind,
            span,
            line: position.line,
            column: position.column,
        }
    }
}

/// 1-based line and column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

/// Tracks line/column while walking the source forward.
#[derive(Debug, Clone)]
pub(crate) struct LineCursor {
    offset: usize,
    position: Position,
}

impl LineCursor {
    pub(crate) fn new() -> Self {
        Self {
            offset: 0,
            position: Position { line: 1, column: 1 },
        }
    }

    /// Advance to `offset` and return the position there. Offsets must not decrease.
    pub(crate) fn advance_to(&mut self, source: &str, offset: usize) -> Position {
        debug_assert!(offset >= self.offset, "line cursor moved backwards");
        for c in source[self.offset..offset].chars() {
            if c == '\n' {
                self.position.line += 1;
                self.position.column = 1;
            } else {
                self.position.column += 1;
            }
        }
        self.offset = offset;
        self.position
    }
}

/// Position of `offset` in `source`, used for end-of-input errors.
pub(crate) fn position_at(source: &str, offset: usize) -> Position {
    LineCursor::new().advance_to(source, offset)
}

/// Tokenizes source into a vector of span-based tokens.
///
/// Fails on the first unrecognized character or unterminated bracket body.
pub fn lex(source: &str) -> Result<Vec<Token>, SyntaxError> {
    let mut tokens = Vec::new();
    let mut lexer = TokenKind::lexer(source);
    let mut cursor = LineCursor::new();

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        let position = cursor.advance_to(source, span.start);

        let kind = match result {
            Ok(kind) => kind,
            Err(()) => {
                let text = &source[span.clone()];
                return Err(SyntaxError::new(
                    format!("unexpected character `{text}`"),
                    span,
                    position.line,
                    position.column,
                ));
            }
        };

        let span = match kind {
            TokenKind::BracketExpr | TokenKind::ParenArgs => {
                let (open, close) = delimiters(kind);
                let quoted = kind == TokenKind::BracketExpr;
                let Some(body_len) = scan_balanced(lexer.remainder(), open, close, quoted) else {
                    return Err(SyntaxError::new(
                        format!("unclosed `{open}`, expected matching `{close}`"),
                        span.start..source.len(),
                        position.line,
                        position.column,
                    ));
                };
                // Body plus the closing delimiter.
                lexer.bump(body_len + close.len_utf8());
                span.start..lexer.span().end
            }
            _ => span,
        };

        tokens.push(Token::new(kind, span, position));
    }

    Ok(tokens)
}

fn delimiters(kind: TokenKind) -> (char, char) {
    match kind {
        TokenKind::BracketExpr => ('[', ']'),
        TokenKind::ParenArgs => ('(', ')'),
        _ => unreachable!("{kind:?} has no delimiters"),
    }
}

/// Byte length of a balanced body, `rest` starting just after the opening
/// delimiter. Returns `None` if the input ends before depth returns to zero.
///
/// With `quoted`, delimiters inside `'...'` / `"..."` string literals
/// (backslash escapes included) are not counted.
fn scan_balanced(rest: &str, open: char, close: char, quoted: bool) -> Option<usize> {
    let mut depth = 1usize;
    let mut quote: Option<char> = None;
    let mut escaped = false;
    for (i, c) in rest.char_indices() {
        if let Some(q) = quote {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == q {
                quote = None;
            }
            continue;
        }
        if quoted && (c == '"' || c == '\'') {
            quote = Some(c);
        } else if c == open {
            depth += 1;
        } else if c == close {
            depth -= 1;
            if depth == 0 {
                return Some(i);
            }
        }
    }
    None
}

/// Retrieves the text slice for a token. O(1) slice into source.
#[inline]
pub fn token_text<'src>(source: &'src str, token: &Token) -> &'src str {
    &source[token.span.clone()]
}

/// The token's value: identifier text, or the inner text of a bracket body.
pub fn token_value<'src>(source: &'src str, token: &Token) -> Option<&'src str> {
    match token.kind {
        TokenKind::Ident => Some(token_text(source, token)),
        TokenKind::BracketExpr | TokenKind::ParenArgs => {
            Some(&source[token.span.start + 1..token.span.end - 1])
        }
        _ => None,
    }
}
