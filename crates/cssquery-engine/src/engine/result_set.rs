use indexmap::IndexMap;

use cssquery_core::Selectable;

/// Insertion-ordered, deduplicated query output. The first insertion of a
/// key decides its position.
pub(crate) struct ResultSet<N: Selectable> {
    entries: IndexMap<N::Key, N>,
}

impl<N: Selectable> ResultSet<N> {
    pub(crate) fn new() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }

    /// Returns `false` if an equal node was already present.
    pub(crate) fn insert(&mut self, node: N) -> bool {
        let key = node.key();
        if self.entries.contains_key(&key) {
            return false;
        }
        self.entries.insert(key, node);
        true
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn into_vec(self) -> Vec<N> {
        self.entries.into_values().collect()
    }
}
