//! Candidate stream stages for the combinators.
//!
//! Both stages are pull-based. [`Descendants`] keeps its traversal state on
//! the heap (one child iterator per open level), so a deep object graph
//! costs memory, never host stack.

use std::vec;

use super::error::{Error, QueryError};
use super::provider::Provider;
use super::registry::Candidates;

/// Pre-order walk of every input candidate: the candidate itself, then each
/// child's full subtree in order.
pub(crate) struct Descendants<'q, N> {
    input: Candidates<'q, N>,
    /// Open levels below the current input candidate.
    stack: Vec<vec::IntoIter<N>>,
    provider: &'q dyn Provider<N>,
    max_depth: u32,
}

impl<'q, N> Descendants<'q, N> {
    pub(crate) fn new(input: Candidates<'q, N>, provider: &'q dyn Provider<N>, max_depth: u32) -> Self {
        Self {
            input,
            stack: Vec::new(),
            provider,
            max_depth,
        }
    }

    /// Open `node`'s children as the next level, then hand `node` out.
    fn descend(&mut self, node: N) -> Result<N, Error> {
        let Some(children) = self.provider.children(&node) else {
            return Ok(node);
        };
        if children.is_empty() {
            return Ok(node);
        }
        if self.stack.len() >= self.max_depth as usize {
            self.stack.clear();
            return Err(QueryError::DepthLimitExceeded(self.max_depth).into());
        }
        self.stack.push(children.into_iter());
        Ok(node)
    }
}

impl<N> Iterator for Descendants<'_, N> {
    type Item = Result<N, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(level) = self.stack.last_mut() {
                match level.next() {
                    Some(node) => return Some(self.descend(node)),
                    None => {
                        self.stack.pop();
                        continue;
                    }
                }
            }
            return match self.input.next()? {
                Ok(node) => Some(self.descend(node)),
                Err(err) => Some(Err(err)),
            };
        }
    }
}

/// Immediate children of every input candidate, in order.
pub(crate) struct Children<'q, N> {
    input: Candidates<'q, N>,
    current: vec::IntoIter<N>,
    provider: &'q dyn Provider<N>,
}

impl<'q, N> Children<'q, N> {
    pub(crate) fn new(input: Candidates<'q, N>, provider: &'q dyn Provider<N>) -> Self {
        Self {
            input,
            current: Vec::new().into_iter(),
            provider,
        }
    }
}

impl<N> Iterator for Children<'_, N> {
    type Item = Result<N, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(child) = self.current.next() {
                return Some(Ok(child));
            }
            match self.input.next()? {
                Ok(node) => {
                    self.current = self.provider.children(&node).unwrap_or_default().into_iter();
                }
                Err(err) => return Some(Err(err)),
            }
        }
    }
}

/// Keep the candidates `keep` accepts; errors pass through.
pub(crate) fn filter<'q, N, F>(input: Candidates<'q, N>, mut keep: F) -> Candidates<'q, N>
where
    N: 'q,
    F: FnMut(&N) -> bool + 'q,
{
    Box::new(input.filter(move |item| item.as_ref().map_or(true, &mut keep)))
}

/// Like [`filter`], with a test that can fail.
pub(crate) fn try_filter<'q, N, F, E>(input: Candidates<'q, N>, mut keep: F) -> Candidates<'q, N>
where
    N: 'q,
    F: FnMut(&N) -> Result<bool, E> + 'q,
    E: Into<Error>,
{
    Box::new(input.filter_map(move |item| {
        let node = match item {
            Ok(node) => node,
            Err(err) => return Some(Err(err)),
        };
        match keep(&node) {
            Ok(true) => Some(Ok(node)),
            Ok(false) => None,
            Err(err) => Some(Err(err.into())),
        }
    }))
}
