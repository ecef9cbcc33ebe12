//! Predicate expressions: the small boolean language inside `[...]`.
//!
//! The language is closed and side-effect free. It has literals, attribute
//! paths, comparisons, boolean connectives, list literals with indexing,
//! and two builtins (`len`, `has`). Evaluation lives in the engine; this
//! module only turns text into an [`Expr`].
//!
//! ```text
//! expr     := or
//! or       := and (('or' | '||') and)*
//! and      := not (('and' | '&&') not)*
//! not      := ('not' | '!') not | cmp
//! cmp      := postfix (cmp_op postfix)?
//! postfix  := operand ('[' expr ']')*
//! operand  := literal | path | call | '(' expr ')' | '[' (expr (',' expr)*)? ']'
//! path     := ident ('.' ident)*
//! call     := ident '(' (expr (',' expr)*)? ')'
//! ```

mod ast;
mod lexer;
mod parser;


pub use ast::{CmpOp, Expr};
pub use parser::{PredicateLimits, PredicateSyntaxError, parse_predicate, parse_predicate_with};
