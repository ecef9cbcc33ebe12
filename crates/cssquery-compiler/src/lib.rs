//! cssquery compiler: selector lexer, parser, and predicate expressions.
//!
//! This crate turns selector source text into a typed [`Selector`]:
//! - `parser` - lexer (with balanced-bracket bodies) and the selector grammar
//! - `selector` - the compiled representation: groups of operations
//! - `diagnostics` - positioned syntax errors and their rendering
//! - `predicate` - the closed boolean mini-language used inside `[...]`
//!
//! ```text
//! Source text → Lexer → Tokens → Parser → Selector (groups of Operations)
//! ```

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod diagnostics;
pub mod parser;
pub mod predicate;
pub mod selector;

pub use diagnostics::SyntaxError;
pub use parser::parse;
pub use selector::{Group, Operation, Selector};

/// Result type for selector compilation.
pub type Result<T> = std::result::Result<T, SyntaxError>;
