use cssquery_core::Value;

use super::ast::{CmpOp, Expr};
use super::lexer::{Lexeme, Tok, lex, unescape};

/// Limits for predicate parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PredicateLimits {
    /// Maximum nesting of sub-expressions (parens, lists, calls, `not`).
    pub recursion_limit: u32,
}

impl Default for PredicateLimits {
    fn default() -> Self {
        Self {
            recursion_limit: 64,
        }
    }
}

impl PredicateLimits {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn recursion_limit(mut self, limit: u32) -> Self {
        self.recursion_limit = limit;
        self
    }
}

/// Why predicate text did not parse. `offset` is a byte offset into the
/// predicate body (the text between the brackets).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PredicateSyntaxError {
    #[error("{message} at offset {offset}")]
    Malformed { message: String, offset: usize },
    #[error("expression nested deeper than {limit} levels")]
    TooDeep { limit: u32 },
}

pub fn parse_predicate(source: &str) -> Result<Expr, PredicateSyntaxError> {
    parse_predicate_with(source, PredicateLimits::default())
}

pub fn parse_predicate_with(
    source: &str,
    limits: PredicateLimits,
) -> Result<Expr, PredicateSyntaxError> {
    let tokens = lex(source).map_err(|offset| {
        let c = source[offset..].chars().next().unwrap_or_default();
        PredicateSyntaxError::Malformed {
            message: format!("unexpected character `{c}`"),
            offset,
        }
    })?;

    let mut parser = ExprParser {
        source,
        tokens,
        pos: 0,
        depth: 0,
        limit: limits.recursion_limit,
    };

    if parser.eof() {
        return Err(parser.error_here("expected expression"));
    }
    let expr = parser.expr()?;
    if !parser.eof() {
        return Err(parser.error_here("expected end of expression"));
    }
    Ok(expr)
}

struct ExprParser<'src> {
    source: &'src str,
    tokens: Vec<Lexeme>,
    pos: usize,
    depth: u32,
    limit: u32,
}

impl<'src> ExprParser<'src> {
    fn current(&self) -> Option<Tok> {
        self.tokens.get(self.pos).map(|t| t.kind)
    }

    fn at(&self, kind: Tok) -> bool {
        self.current() == Some(kind)
    }

    fn eof(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    fn text(&self) -> &'src str {
        let source = self.source;
        self.tokens
            .get(self.pos)
            .map_or("", |t| &source[t.span.clone()])
    }

    fn bump(&mut self) {
        assert!(!self.eof(), "bump called at EOF");
        self.pos += 1;
    }

    fn eat(&mut self, kind: Tok) -> bool {
        if self.at(kind) {
            self.bump();
            return true;
        }
        false
    }

    fn expect(&mut self, kind: Tok) -> Result<(), PredicateSyntaxError> {
        if self.eat(kind) {
            return Ok(());
        }
        Err(self.error_here(&format!("expected {}", kind.describe())))
    }

    fn error_here(&self, expected: &str) -> PredicateSyntaxError {
        let (found, offset) = match self.tokens.get(self.pos) {
            Some(token) => (token.kind.describe(), token.span.start),
            None => ("end of input", self.source.len()),
        };
        PredicateSyntaxError::Malformed {
            message: format!("{expected}, found {found}"),
            offset,
        }
    }

    fn enter(&mut self) -> Result<(), PredicateSyntaxError> {
        if self.depth >= self.limit {
            return Err(PredicateSyntaxError::TooDeep { limit: self.limit });
        }
        self.depth += 1;
        Ok(())
    }

    fn exit(&mut self) {
        self.depth -= 1;
    }

    fn expr(&mut self) -> Result<Expr, PredicateSyntaxError> {
        self.enter()?;
        let result = self.or();
        self.exit();
        result
    }

    fn or(&mut self) -> Result<Expr, PredicateSyntaxError> {
        let mut left = self.and()?;
        while self.eat(Tok::KwOr) || self.eat(Tok::PipePipe) {
            let right = self.and()?;
            left = Expr::Or(Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    fn and(&mut self) -> Result<Expr, PredicateSyntaxError> {
        let mut left = self.not()?;
        while self.eat(Tok::KwAnd) || self.eat(Tok::AmpAmp) {
            let right = self.not()?;
            left = Expr::And(Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    fn not(&mut self) -> Result<Expr, PredicateSyntaxError> {
        if self.eat(Tok::KwNot) || self.eat(Tok::Bang) {
            self.enter()?;
            let inner = self.not();
            self.exit();
            return Ok(Expr::Not(Box::new(inner?)));
        }
        self.compare()
    }

    fn compare(&mut self) -> Result<Expr, PredicateSyntaxError> {
        let left = self.postfix()?;
        let Some(op) = self.current().and_then(cmp_op) else {
            return Ok(left);
        };
        self.bump();
        let right = self.postfix()?;
        Ok(Expr::Compare {
            op,
            left: Box::new(left),
            right: Box::new(right),
        })
    }

    fn postfix(&mut self) -> Result<Expr, PredicateSyntaxError> {
        let mut target = self.operand()?;
        while self.eat(Tok::BracketOpen) {
            let index = self.expr()?;
            self.expect(Tok::BracketClose)?;
            target = Expr::Index {
                target: Box::new(target),
                index: Box::new(index),
            };
        }
        Ok(target)
    }

    fn operand(&mut self) -> Result<Expr, PredicateSyntaxError> {
        let Some(kind) = self.current() else {
            return Err(self.error_here("expected operand"));
        };
        let text = self.text();

        let expr = match kind {
            Tok::KwTrue => Expr::Literal(Value::Bool(true)),
            Tok::KwFalse => Expr::Literal(Value::Bool(false)),
            Tok::KwNull => Expr::Literal(Value::Null),
            Tok::Int => match text.parse::<i64>() {
                Ok(i) => Expr::Literal(Value::Int(i)),
                Err(_) => return Err(self.error_here("integer literal out of range")),
            },
            Tok::Float => match text.parse::<f64>() {
                Ok(f) => Expr::Literal(Value::Float(f)),
                Err(_) => return Err(self.error_here("malformed float literal")),
            },
            Tok::Str => Expr::Literal(Value::Str(unescape(text))),
            Tok::Ident => {
                self.bump();
                return if self.at(Tok::ParenOpen) {
                    self.call(text)
                } else {
                    self.path(text)
                };
            }
            Tok::ParenOpen => {
                self.bump();
                let inner = self.expr()?;
                self.expect(Tok::ParenClose)?;
                return Ok(inner);
            }
            Tok::BracketOpen => {
                self.bump();
                let items = self.comma_list(Tok::BracketClose)?;
                return Ok(Expr::List(items));
            }
            _ => return Err(self.error_here("expected operand")),
        };

        self.bump();
        Ok(expr)
    }

    /// Rest of a path after its first segment.
    fn path(&mut self, first: &str) -> Result<Expr, PredicateSyntaxError> {
        let mut segments = vec![first.to_owned()];
        while self.eat(Tok::Dot) {
            if !self.at(Tok::Ident) {
                return Err(self.error_here("expected attribute name after `.`"));
            }
            segments.push(self.text().to_owned());
            self.bump();
        }
        Ok(Expr::Path(segments))
    }

    fn call(&mut self, name: &str) -> Result<Expr, PredicateSyntaxError> {
        self.expect(Tok::ParenOpen)?;
        let args = self.comma_list(Tok::ParenClose)?;
        Ok(Expr::Call {
            name: name.to_owned(),
            args,
        })
    }

    /// `(expr (',' expr)*)? close`, opening delimiter already consumed.
    fn comma_list(&mut self, close: Tok) -> Result<Vec<Expr>, PredicateSyntaxError> {
        let mut items = Vec::new();
        if self.eat(close) {
            return Ok(items);
        }
        loop {
            items.push(self.expr()?);
            if self.eat(close) {
                return Ok(items);
            }
            if !self.eat(Tok::Comma) {
                return Err(self.error_here(&format!("expected `,` or {}", close.describe())));
            }
        }
    }
}

fn cmp_op(kind: Tok) -> Option<CmpOp> {
    let op = match kind {
        Tok::EqEq => CmpOp::Eq,
        Tok::BangEq => CmpOp::Ne,
        Tok::Lt => CmpOp::Lt,
        Tok::LtEq => CmpOp::Le,
        Tok::Gt => CmpOp::Gt,
        Tok::GtEq => CmpOp::Ge,
        Tok::CaretEq => CmpOp::StartsWith,
        Tok::DollarEq => CmpOp::EndsWith,
        Tok::StarEq => CmpOp::Contains,
        Tok::EqTilde => CmpOp::RegexMatch,
        Tok::BangTilde => CmpOp::RegexNoMatch,
        _ => return None,
    };
    Some(op)
}
