//! cssquery: CSS-like selectors over arbitrary in-memory object graphs.
//!
//! # Example
//!
//! ```
//! use serde_json::json;
//!
//! let doc = json!({
//!     "name": "library",
//!     "shelves": [
//!         { "name": "book", "title": "Dune", "year": 1965 },
//!         { "name": "book", "title": "Solaris", "year": 1961 },
//!     ],
//! });
//!
//! let old = cssquery::query("book[year < 1964]", &[&doc]).unwrap();
//! assert_eq!(old.len(), 1);
//! assert_eq!(old[0]["title"], "Solaris");
//! ```
//!
//! [`compile`] and [`query`] share one process-wide [`SelectorCache`]. An
//! [`Engine`] owns its cache, registry, provider and limits instead.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

use std::sync::LazyLock;

mod engine;

#[cfg(test)]
mod engine_tests;

pub use cssquery_compiler::predicate;
pub use cssquery_compiler::{Group, Operation, Selector, SyntaxError, parse};
pub use cssquery_core::{JsonKey, Selectable, Value};
pub use cssquery_engine::{
    CacheConfig, Candidates, CompiledSelector, Context, Error, Function, Hooks, Limits, Overrides,
    PredicateError, Program, Provider, Pseudo, QueryError, Registry, SelectorCache,
};
pub use engine::{Engine, EngineBuilder};

/// Result type for compile and query operations.
pub type Result<T> = std::result::Result<T, Error>;

static CACHE: LazyLock<SelectorCache> = LazyLock::new(SelectorCache::default);

/// The process-wide cache behind [`compile`] and [`query`].
pub fn cache() -> &'static SelectorCache {
    &CACHE
}

/// Compile `selector` through the process-wide cache, bound to the nodes'
/// own [`Selectable`] hooks.
pub fn compile(selector: &str) -> Result<CompiledSelector> {
    let program = CACHE.get_or_compile(selector)?;
    Ok(CompiledSelector::new(program))
}

/// Compile `selector` and run it over `roots` with the builtin registry.
pub fn query<N: Selectable>(selector: &str, roots: &[N]) -> Result<Vec<N>> {
    compile(selector)?.query(roots)
}
