//! Query execution.
//!
//! A [`Program`] is a parsed selector with its predicates pre-parsed. A
//! [`CompiledSelector`] binds a program to a [`Provider`]; querying resolves
//! every pseudo and function name against a [`Registry`], then streams each
//! root through each group's pipeline.

mod cache;
mod error;
mod eval;
mod executor;
mod limits;
mod program;
mod provider;
mod regex;
mod registry;
mod result_set;
mod selector;
mod stream;

#[cfg(test)]
mod provider_tests;
#[cfg(test)]
mod registry_tests;
#[cfg(test)]
mod stream_tests;
#[cfg(test)]
mod test_utils;

pub use cache::{CacheConfig, SelectorCache};
pub use error::{Error, PredicateError, QueryError};
pub use limits::Limits;
pub use program::Program;
pub use provider::{Hooks, Overrides, Provider};
pub use registry::{Candidates, Context, Function, Pseudo, Registry};
pub use selector::CompiledSelector;
