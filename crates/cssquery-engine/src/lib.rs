//! Runtime for executing compiled cssquery selectors.
//!
//! This crate applies a compiled [`Selector`](cssquery_compiler::Selector)
//! to a caller's object graph: candidate streams flow through one lazy
//! stage per operation, and every group's output lands in one
//! deduplicated, order-preserving result set.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod engine;

// Re-export commonly used items at crate root
pub use engine::{
    CacheConfig, Candidates, CompiledSelector, Context, Error, Function, Hooks, Limits, Overrides,
    PredicateError, Program, Provider, Pseudo, QueryError, Registry, SelectorCache,
};
