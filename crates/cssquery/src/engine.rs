//! A configured query engine.

use std::fmt;

use cssquery_core::Selectable;
use cssquery_engine::{
    CacheConfig, CompiledSelector, Function, Hooks, Limits, Provider, Pseudo, Registry,
    SelectorCache,
};
use tracing::debug;

use crate::Result;

/// Provider, registry, limits and a private compile cache, bundled.
///
/// ```
/// use cssquery::Engine;
/// use serde_json::{Value, json};
///
/// let doc = json!({ "name": "root", "items": [{ "name": "item" }] });
/// let engine: Engine<&Value> = Engine::builder().max_depth(64).cache_capacity(16).build();
/// assert_eq!(engine.query("root item", &[&doc]).unwrap().len(), 1);
/// ```
pub struct Engine<N, P = Hooks> {
    provider: P,
    registry: Registry<N>,
    limits: Limits,
    cache: SelectorCache,
}

impl<N> Engine<N, Hooks> {
    /// Builtin registry, default limits, [`Hooks`] provider.
    pub fn new() -> Self {
        Self::builder().build()
    }

    pub fn builder() -> EngineBuilder<N, Hooks> {
        EngineBuilder::new()
    }
}

impl<N> Default for Engine<N, Hooks> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N, P> Engine<N, P> {
    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn registry(&self) -> &Registry<N> {
        &self.registry
    }

    pub fn limits(&self) -> Limits {
        self.limits
    }

    pub fn cache(&self) -> &SelectorCache {
        &self.cache
    }

    /// Add or replace a `:name` transform.
    pub fn register_pseudo(&mut self, name: impl Into<String>, pseudo: impl Pseudo<N> + 'static) {
        self.registry.register_pseudo(name, pseudo);
    }

    /// Add or replace a `:name(args)` transform.
    pub fn register_function(
        &mut self,
        name: impl Into<String>,
        function: impl Function<N> + 'static,
    ) {
        self.registry.register_function(name, function);
    }

    /// Compile `selector` through this engine's cache, bound to its
    /// provider and limits.
    pub fn compile(&self, selector: &str) -> Result<CompiledSelector<P>>
    where
        P: Clone,
    {
        let program = self.cache.get_or_compile(selector)?;
        Ok(CompiledSelector::new(program)
            .with_provider(self.provider.clone())
            .with_limits(self.limits))
    }

    /// Compile `selector` and run it over `roots` with this engine's
    /// registry.
    pub fn query(&self, selector: &str, roots: &[N]) -> Result<Vec<N>>
    where
        N: Selectable,
        P: Provider<N> + Clone,
    {
        self.compile(selector)?.query_with(roots, &self.registry)
    }
}

impl<N, P: fmt::Debug> fmt::Debug for Engine<N, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine")
            .field("provider", &self.provider)
            .field("registry", &self.registry)
            .field("limits", &self.limits)
            .field("cache", &self.cache.config())
            .finish()
    }
}

/// Builder for [`Engine`].
pub struct EngineBuilder<N, P = Hooks> {
    provider: P,
    registry: Registry<N>,
    limits: Limits,
    cache: CacheConfig,
}

impl<N> EngineBuilder<N, Hooks> {
    pub fn new() -> Self {
        Self {
            provider: Hooks,
            registry: Registry::builtin(),
            limits: Limits::default(),
            cache: CacheConfig::default(),
        }
    }
}

impl<N> Default for EngineBuilder<N, Hooks> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N, P> EngineBuilder<N, P> {
    /// Replace all limits at once.
    pub fn limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    pub fn max_depth(mut self, depth: u32) -> Self {
        self.limits = self.limits.max_depth(depth);
        self
    }

    pub fn predicate_recursion_limit(mut self, limit: u32) -> Self {
        self.limits = self.limits.predicate_recursion_limit(limit);
        self
    }

    /// Maximum number of cached selector strings; `0` disables the cache.
    pub fn cache_capacity(mut self, capacity: usize) -> Self {
        self.cache = self.cache.capacity(capacity);
        self
    }

    pub fn provider<Q>(self, provider: Q) -> EngineBuilder<N, Q> {
        EngineBuilder {
            provider,
            registry: self.registry,
            limits: self.limits,
            cache: self.cache,
        }
    }

    pub fn registry(mut self, registry: Registry<N>) -> Self {
        self.registry = registry;
        self
    }

    pub fn build(self) -> Engine<N, P> {
        debug!(
            target: "cssquery::engine",
            max_depth = self.limits.get_max_depth(),
            cache_capacity = self.cache.capacity,
            "engine built"
        );
        Engine {
            provider: self.provider,
            registry: self.registry,
            cache: SelectorCache::with_limits(self.cache, self.limits.get_predicate_limits()),
            limits: self.limits,
        }
    }
}
