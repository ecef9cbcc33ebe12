use std::sync::Arc;

use cssquery_compiler::Selector;
use cssquery_core::Selectable;

use super::error::Error;
use super::executor::execute;
use super::limits::Limits;
use super::program::Program;
use super::provider::{Hooks, Provider};
use super::registry::Registry;

/// A compiled selector bound to a capability provider.
///
/// Cloning is cheap: the program is shared.
#[derive(Debug, Clone)]
pub struct CompiledSelector<P = Hooks> {
    program: Arc<Program>,
    provider: P,
    limits: Limits,
}

impl CompiledSelector<Hooks> {
    /// Bind `program` to the nodes' own [`Selectable`] hooks.
    pub fn new(program: Arc<Program>) -> Self {
        Self {
            program,
            provider: Hooks,
            limits: Limits::default(),
        }
    }
}

impl<P> CompiledSelector<P> {
    /// Rebind to another provider.
    pub fn with_provider<Q>(self, provider: Q) -> CompiledSelector<Q> {
        CompiledSelector {
            program: self.program,
            provider,
            limits: self.limits,
        }
    }

    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    pub fn program(&self) -> &Arc<Program> {
        &self.program
    }

    pub fn selector(&self) -> &Selector {
        self.program.selector()
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Matches among `roots` and their descendants, using the builtin
    /// pseudo-selectors and functions.
    pub fn query<N>(&self, roots: &[N]) -> Result<Vec<N>, Error>
    where
        N: Selectable,
        P: Provider<N>,
    {
        self.query_with(roots, &Registry::builtin())
    }

    /// Like [`query`](Self::query), resolving `:names` in `registry`.
    pub fn query_with<N>(&self, roots: &[N], registry: &Registry<N>) -> Result<Vec<N>, Error>
    where
        N: Selectable,
        P: Provider<N>,
    {
        execute(&self.program, roots, &self.provider, registry, self.limits)
    }
}
