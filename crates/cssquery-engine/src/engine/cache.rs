//! Bounded LRU cache of compiled programs, keyed by selector text.
//!
//! Compilation runs outside the lock. Two threads compiling the same
//! uncached text both compile it and the later insert wins; either way the
//! cached program is a correct compilation of that text.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use cssquery_compiler::SyntaxError;
use cssquery_compiler::predicate::PredicateLimits;
use indexmap::IndexMap;
use tracing::debug;

use super::program::Program;

/// Cache sizing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheConfig {
    /// Maximum number of distinct selector strings kept (default: 256).
    /// Zero disables caching.
    pub capacity: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { capacity: 256 }
    }
}

impl CacheConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }
}

/// Thread-safe selector cache. Entries are ordered least to most recently
/// used.
#[derive(Debug)]
pub struct SelectorCache {
    config: CacheConfig,
    limits: PredicateLimits,
    entries: Mutex<IndexMap<String, Arc<Program>>>,
}

impl SelectorCache {
    pub fn new(config: CacheConfig) -> Self {
        Self::with_limits(config, PredicateLimits::default())
    }

    /// A cache whose misses compile with `limits`.
    pub fn with_limits(config: CacheConfig, limits: PredicateLimits) -> Self {
        Self {
            config,
            limits,
            entries: Mutex::new(IndexMap::new()),
        }
    }

    pub fn config(&self) -> CacheConfig {
        self.config
    }

    /// The cached program for `text`, compiling and caching it on a miss.
    /// Syntax errors are not cached.
    pub fn get_or_compile(&self, text: &str) -> Result<Arc<Program>, SyntaxError> {
        if self.config.capacity == 0 {
            return Program::compile_with(text, self.limits).map(Arc::new);
        }

        if let Some(program) = self.get(text) {
            debug!(target: "cssquery::cache", selector = text, "selector cache hit");
            return Ok(program);
        }

        debug!(target: "cssquery::cache", selector = text, "selector cache miss");
        let program = Arc::new(Program::compile_with(text, self.limits)?);
        self.insert(text, Arc::clone(&program));
        Ok(program)
    }

    /// Look up `text` and mark it most recently used.
    pub fn get(&self, text: &str) -> Option<Arc<Program>> {
        let mut entries = self.lock();
        let index = entries.get_index_of(text)?;
        let last = entries.len() - 1;
        entries.move_index(index, last);
        entries.get_index(last).map(|(_, program)| Arc::clone(program))
    }

    fn insert(&self, text: &str, program: Arc<Program>) {
        let mut entries = self.lock();
        entries.shift_remove(text);
        entries.insert(text.to_owned(), program);

        while entries.len() > self.config.capacity {
            if let Some((evicted, _)) = entries.shift_remove_index(0) {
                debug!(
                    target: "cssquery::cache",
                    selector = evicted.as_str(),
                    capacity = self.config.capacity,
                    "selector cache evicted least recently used entry"
                );
            }
        }
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Whether `text` is cached, without touching its recency.
    pub fn contains(&self, text: &str) -> bool {
        self.lock().contains_key(text)
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> MutexGuard<'_, IndexMap<String, Arc<Program>>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for SelectorCache {
    fn default() -> Self {
        Self::new(CacheConfig::default())
    }
}
