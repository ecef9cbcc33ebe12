//! Named stream transforms for `:pseudo` and `:function(args)` steps.
//!
//! A transform receives the whole candidate stream and returns a new one.
//! It may drop, reorder or map candidates but never invents objects that
//! the provider could not have produced.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use super::error::{Error, QueryError};
use super::limits::Limits;
use super::provider::Provider;

/// A lazy candidate stream. The first `Err` aborts the query.
pub type Candidates<'q, N> = Box<dyn Iterator<Item = Result<N, Error>> + 'q>;

/// What a transform may consult besides its input.
pub struct Context<'q, N> {
    provider: &'q dyn Provider<N>,
    limits: Limits,
}

impl<'q, N> Context<'q, N> {
    pub fn new(provider: &'q dyn Provider<N>, limits: Limits) -> Self {
        Self { provider, limits }
    }

    pub fn provider(&self) -> &'q dyn Provider<N> {
        self.provider
    }

    pub fn limits(&self) -> Limits {
        self.limits
    }
}

impl<N> Clone for Context<'_, N> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<N> Copy for Context<'_, N> {}

/// `:name` transform.
pub trait Pseudo<N>: Send + Sync {
    fn apply<'q>(&self, input: Candidates<'q, N>, cx: Context<'q, N>) -> Candidates<'q, N>
    where
        N: 'q;
}

/// `:name(args)` transform. `args` is the raw text between the parens;
/// a transform rejects text it cannot use with
/// [`QueryError::InvalidArgument`] before any candidate is pulled.
pub trait Function<N>: Send + Sync {
    fn apply<'q>(
        &self,
        input: Candidates<'q, N>,
        args: &'q str,
        cx: Context<'q, N>,
    ) -> Result<Candidates<'q, N>, QueryError>
    where
        N: 'q;
}

/// Name → transform tables.
pub struct Registry<N> {
    pseudos: HashMap<String, Arc<dyn Pseudo<N>>>,
    functions: HashMap<String, Arc<dyn Function<N>>>,
}

impl<N> Registry<N> {
    /// A registry with no transforms at all.
    pub fn empty() -> Self {
        Self {
            pseudos: HashMap::new(),
            functions: HashMap::new(),
        }
    }

    /// `first`, `last`, `nth-child`, `attr`.
    pub fn builtin() -> Self {
        let mut registry = Self::empty();
        registry.register_pseudo("first", First);
        registry.register_pseudo("last", Last);
        registry.register_function("nth-child", NthChild);
        registry.register_function("attr", Attr);
        registry
    }

    /// Add or replace a pseudo-selector.
    pub fn register_pseudo(&mut self, name: impl Into<String>, pseudo: impl Pseudo<N> + 'static) {
        self.pseudos.insert(name.into(), Arc::new(pseudo));
    }

    /// Add or replace a function.
    pub fn register_function(
        &mut self,
        name: impl Into<String>,
        function: impl Function<N> + 'static,
    ) {
        self.functions.insert(name.into(), Arc::new(function));
    }

    pub fn pseudo(&self, name: &str) -> Option<Arc<dyn Pseudo<N>>> {
        self.pseudos.get(name).cloned()
    }

    pub fn function(&self, name: &str) -> Option<Arc<dyn Function<N>>> {
        self.functions.get(name).cloned()
    }
}

impl<N> Default for Registry<N> {
    fn default() -> Self {
        Self::builtin()
    }
}

impl<N> Clone for Registry<N> {
    fn clone(&self) -> Self {
        Self {
            pseudos: self.pseudos.clone(),
            functions: self.functions.clone(),
        }
    }
}

impl<N> fmt::Debug for Registry<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut pseudos: Vec<_> = self.pseudos.keys().collect();
        let mut functions: Vec<_> = self.functions.keys().collect();
        pseudos.sort();
        functions.sort();
        f.debug_struct("Registry")
            .field("pseudos", &pseudos)
            .field("functions", &functions)
            .finish()
    }
}

// ============================================================================
// Builtins
// ============================================================================

/// `:first` - the first candidate, or nothing.
struct First;

impl<N> Pseudo<N> for First {
    fn apply<'q>(&self, input: Candidates<'q, N>, _cx: Context<'q, N>) -> Candidates<'q, N>
    where
        N: 'q,
    {
        Box::new(input.take(1))
    }
}

/// `:last` - drains the stream and keeps the final candidate.
struct Last;

impl<N> Pseudo<N> for Last {
    fn apply<'q>(&self, input: Candidates<'q, N>, _cx: Context<'q, N>) -> Candidates<'q, N>
    where
        N: 'q,
    {
        let mut input = Some(input);
        Box::new(std::iter::from_fn(move || {
            let mut last = None;
            for item in input.take()? {
                match item {
                    Ok(node) => last = Some(node),
                    Err(err) => return Some(Err(err)),
                }
            }
            last.map(Ok)
        }))
    }
}

/// `:nth-child(n)` - the candidate at zero-based position `n`.
struct NthChild;

impl<N> Function<N> for NthChild {
    fn apply<'q>(
        &self,
        input: Candidates<'q, N>,
        args: &'q str,
        _cx: Context<'q, N>,
    ) -> Result<Candidates<'q, N>, QueryError>
    where
        N: 'q,
    {
        let n: i64 = args
            .trim()
            .parse()
            .map_err(|_| QueryError::InvalidArgument {
                function: "nth-child".to_owned(),
                args: args.to_owned(),
                reason: "expected an integer".to_owned(),
            })?;

        let Ok(mut remaining) = u64::try_from(n) else {
            return Ok(Box::new(std::iter::empty()));
        };

        let mut input = Some(input);
        Ok(Box::new(std::iter::from_fn(move || {
            let stream = input.as_mut()?;
            loop {
                match stream.next() {
                    None => {
                        input = None;
                        return None;
                    }
                    Some(Err(err)) => {
                        input = None;
                        return Some(Err(err));
                    }
                    Some(Ok(node)) if remaining == 0 => {
                        input = None;
                        return Some(Ok(node));
                    }
                    Some(Ok(_)) => remaining -= 1,
                }
            }
        })))
    }
}

/// `:attr(name)` - each candidate's `name` attribute; candidates without
/// one are dropped.
struct Attr;

impl<N> Function<N> for Attr {
    fn apply<'q>(
        &self,
        input: Candidates<'q, N>,
        args: &'q str,
        cx: Context<'q, N>,
    ) -> Result<Candidates<'q, N>, QueryError>
    where
        N: 'q,
    {
        let name = args.trim();
        if name.is_empty() {
            return Err(QueryError::InvalidArgument {
                function: "attr".to_owned(),
                args: args.to_owned(),
                reason: "expected an attribute name".to_owned(),
            });
        }

        let provider = cx.provider();
        Ok(Box::new(input.filter_map(move |item| match item {
            Ok(node) => provider.attr(&node, name).map(Ok),
            Err(err) => Some(Err(err)),
        })))
    }
}
