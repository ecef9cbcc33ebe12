use cssquery_compiler::predicate::PredicateLimits;

/// Resource limits for compilation and query execution.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Limits {
    /// Deepest descendant a `CHILD` traversal may reach below a candidate
    /// (default: 4,096).
    pub(crate) max_depth: u32,
    /// Nesting limit for predicate expressions.
    pub(crate) predicate: PredicateLimits,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_depth: 4096,
            predicate: PredicateLimits::default(),
        }
    }
}

impl Limits {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the descendant depth limit.
    pub fn max_depth(mut self, depth: u32) -> Self {
        self.max_depth = depth;
        self
    }

    /// Set the predicate nesting limit.
    pub fn predicate_recursion_limit(mut self, limit: u32) -> Self {
        self.predicate = self.predicate.recursion_limit(limit);
        self
    }

    pub fn get_max_depth(&self) -> u32 {
        self.max_depth
    }

    pub fn get_predicate_limits(&self) -> PredicateLimits {
        self.predicate
    }
}
