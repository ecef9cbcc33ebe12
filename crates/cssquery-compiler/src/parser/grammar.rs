//! Selector grammar.
//!
//! ```text
//! selector         := group (',' group)*
//! group            := leading_ws? step (combinator_or_ws step)*
//! step             := simple+
//! simple           := '*' | ident | '#' ident | '.' ident | predicate
//!                   | ':' ident | ':' ident paren_args
//! combinator_or_ws := ws | ws? ('+' | '>' | '~') ws?
//! ```
//!
//! Whitespace between steps is the descendant combinator. An explicit
//! combinator swallows the whitespace around it. Whitespace at either end of
//! a group produces nothing.

use crate::diagnostics::SyntaxError;
use crate::selector::{Group, Operation, Selector};

use super::core::Parser;
use super::lexer::TokenKind;

impl Parser<'_> {
    /// `group (',' group)*`
    pub fn parse_selector(&mut self) -> Result<Selector, SyntaxError> {
        let mut groups = Vec::new();

        loop {
            let group = self.parse_group()?;

            if self.eof() {
                if !group.is_empty() {
                    groups.push(group);
                } else if !groups.is_empty() {
                    return Err(self.error_at_eof(
                        "expected selector after `,`, found end of input".to_owned(),
                    ));
                }
                break;
            }

            // `parse_group` stops only at a comma or end of input.
            debug_assert!(self.at(TokenKind::Comma));
            if group.is_empty() {
                return Err(self.unexpected("selector"));
            }
            groups.push(group);
            self.bump();
        }

        Ok(Selector::new(groups))
    }

    /// One comma-separated alternative. Stops before `,` or at end of input.
    fn parse_group(&mut self) -> Result<Group, SyntaxError> {
        let mut ops = Vec::new();
        // Combinator waiting for the step on its right.
        let mut pending: Option<Operation> = None;

        self.burn(TokenKind::Whitespace);

        while let Some(kind) = self.current() {
            match kind {
                TokenKind::Comma => break,
                TokenKind::Whitespace => {
                    self.burn(TokenKind::Whitespace);
                    if pending.is_none() {
                        pending = Some(Operation::Child);
                    }
                }
                TokenKind::Plus | TokenKind::Greater | TokenKind::Tilde => {
                    let explicit = matches!(
                        pending,
                        Some(Operation::ChildDirect | Operation::Sibling | Operation::SiblingDirect)
                    );
                    if ops.is_empty() || explicit {
                        return Err(self.unexpected("selector"));
                    }
                    pending = Some(combinator(kind));
                    self.bump();
                    self.burn(TokenKind::Whitespace);
                }
                _ => {
                    if let Some(op) = pending.take() {
                        ops.push(op);
                    }
                    self.parse_step(&mut ops)?;
                }
            }
        }

        match pending {
            // Trailing whitespace is not a combinator.
            None | Some(Operation::Child) => {}
            Some(op) => {
                let symbol = op.combinator_symbol().unwrap_or_default();
                return Err(self.unexpected(&format!("selector after `{symbol}`")));
            }
        }

        Ok(Group::new(ops))
    }

    /// A run of simple selectors with nothing between them (`foo#bar.baz`).
    fn parse_step(&mut self, ops: &mut Vec<Operation>) -> Result<(), SyntaxError> {
        loop {
            match self.current() {
                Some(TokenKind::Star) => {
                    self.bump();
                    ops.push(Operation::Any);
                    // `*` is complete on its own.
                    return match self.current() {
                        None
                        | Some(
                            TokenKind::Whitespace
                            | TokenKind::Comma
                            | TokenKind::Plus
                            | TokenKind::Greater
                            | TokenKind::Tilde,
                        ) => Ok(()),
                        Some(_) => Err(self.unexpected("combinator or `,` after `*`")),
                    };
                }
                Some(TokenKind::Ident) => {
                    let name = self.expect(TokenKind::Ident, "tag name")?;
                    ops.push(Operation::Tag(name.to_owned()));
                }
                Some(TokenKind::Hash) => {
                    self.bump();
                    let name = self.expect(TokenKind::Ident, "identifier after `#`")?;
                    ops.push(Operation::Id(name.to_owned()));
                }
                Some(TokenKind::Dot) => {
                    self.bump();
                    let name = self.expect(TokenKind::Ident, "identifier after `.`")?;
                    ops.push(Operation::Class(name.to_owned()));
                }
                Some(TokenKind::BracketExpr) => {
                    let expr = self.expect(TokenKind::BracketExpr, "predicate")?;
                    ops.push(Operation::Predicate(expr.to_owned()));
                }
                Some(TokenKind::Colon) => {
                    self.bump();
                    let name = self.expect(TokenKind::Ident, "identifier after `:`")?;
                    if self.at(TokenKind::ParenArgs) {
                        let args = self.expect(TokenKind::ParenArgs, "argument list")?;
                        ops.push(Operation::Function {
                            name: name.to_owned(),
                            args: args.to_owned(),
                        });
                    } else {
                        ops.push(Operation::Pseudo(name.to_owned()));
                    }
                }
                Some(TokenKind::ParenArgs) => {
                    return Err(self.error_here(
                        "argument list must follow a `:name` function".to_owned(),
                    ));
                }
                // Whitespace, combinators, comma, end of input: step is over.
                _ => return Ok(()),
            }
        }
    }
}

fn combinator(kind: TokenKind) -> Operation {
    match kind {
        TokenKind::Plus => Operation::SiblingDirect,
        TokenKind::Greater => Operation::ChildDirect,
        TokenKind::Tilde => Operation::Sibling,
        _ => unreachable!("{kind:?} is not a combinator"),
    }
}
