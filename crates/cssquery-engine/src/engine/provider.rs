//! Capability providers: how the executor asks a node for its tag,
//! children, id, classes and attributes.
//!
//! [`Hooks`] forwards everything to the node's own [`Selectable`] impl.
//! [`Overrides`] replaces any subset of hooks with closures, which is how a
//! caller reinterprets an object model without wrapping every node.

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use cssquery_core::Selectable;

/// Node capabilities consumed by the executor. Object safe.
pub trait Provider<N> {
    fn tag<'n>(&self, node: &'n N) -> Option<Cow<'n, str>>;

    fn children(&self, node: &N) -> Option<Vec<N>>;

    fn id<'n>(&self, node: &'n N) -> Option<Cow<'n, str>>;

    fn has_class(&self, node: &N, name: &str) -> bool;

    fn attr(&self, node: &N, name: &str) -> Option<N>;
}

/// Default provider: the node's own [`Selectable`] hooks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Hooks;

impl<N: Selectable> Provider<N> for Hooks {
    fn tag<'n>(&self, node: &'n N) -> Option<Cow<'n, str>> {
        node.tag()
    }

    fn children(&self, node: &N) -> Option<Vec<N>> {
        node.children()
    }

    fn id<'n>(&self, node: &'n N) -> Option<Cow<'n, str>> {
        node.id()
    }

    fn has_class(&self, node: &N, name: &str) -> bool {
        node.has_class(name)
    }

    fn attr(&self, node: &N, name: &str) -> Option<N> {
        node.attr(name)
    }
}

type TagFn<N> = Arc<dyn for<'n> Fn(&'n N) -> Option<Cow<'n, str>> + Send + Sync>;
type ChildrenFn<N> = Arc<dyn Fn(&N) -> Option<Vec<N>> + Send + Sync>;
type ClassFn<N> = Arc<dyn Fn(&N, &str) -> bool + Send + Sync>;
type AttrFn<N> = Arc<dyn Fn(&N, &str) -> Option<N> + Send + Sync>;

/// Provider built from optional closures; unset hooks fall back to
/// [`Selectable`]. Without a `has_class` closure, an `attr` closure also
/// answers `.class` steps: the attribute exists and is truthy.
///
/// ```ignore
/// let provider = Overrides::new()
///     .tag(|node: &Node| Some(Cow::Borrowed(node.kind.as_str())))
///     .has_class(|node: &Node, name| node.flags.contains(name));
/// ```
pub struct Overrides<N> {
    tag: Option<TagFn<N>>,
    children: Option<ChildrenFn<N>>,
    id: Option<TagFn<N>>,
    has_class: Option<ClassFn<N>>,
    attr: Option<AttrFn<N>>,
}

impl<N> Overrides<N> {
    pub fn new() -> Self {
        Self {
            tag: None,
            children: None,
            id: None,
            has_class: None,
            attr: None,
        }
    }

    pub fn tag<F>(mut self, f: F) -> Self
    where
        F: for<'n> Fn(&'n N) -> Option<Cow<'n, str>> + Send + Sync + 'static,
    {
        self.tag = Some(Arc::new(f));
        self
    }

    pub fn children<F>(mut self, f: F) -> Self
    where
        F: Fn(&N) -> Option<Vec<N>> + Send + Sync + 'static,
    {
        self.children = Some(Arc::new(f));
        self
    }

    pub fn id<F>(mut self, f: F) -> Self
    where
        F: for<'n> Fn(&'n N) -> Option<Cow<'n, str>> + Send + Sync + 'static,
    {
        self.id = Some(Arc::new(f));
        self
    }

    pub fn has_class<F>(mut self, f: F) -> Self
    where
        F: Fn(&N, &str) -> bool + Send + Sync + 'static,
    {
        self.has_class = Some(Arc::new(f));
        self
    }

    pub fn attr<F>(mut self, f: F) -> Self
    where
        F: Fn(&N, &str) -> Option<N> + Send + Sync + 'static,
    {
        self.attr = Some(Arc::new(f));
        self
    }
}

impl<N> Default for Overrides<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N> Clone for Overrides<N> {
    fn clone(&self) -> Self {
        Self {
            tag: self.tag.clone(),
            children: self.children.clone(),
            id: self.id.clone(),
            has_class: self.has_class.clone(),
            attr: self.attr.clone(),
        }
    }
}

impl<N> fmt::Debug for Overrides<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Overrides")
            .field("tag", &self.tag.is_some())
            .field("children", &self.children.is_some())
            .field("id", &self.id.is_some())
            .field("has_class", &self.has_class.is_some())
            .field("attr", &self.attr.is_some())
            .finish()
    }
}

impl<N: Selectable> Provider<N> for Overrides<N> {
    fn tag<'n>(&self, node: &'n N) -> Option<Cow<'n, str>> {
        match &self.tag {
            Some(f) => f(node),
            None => node.tag(),
        }
    }

    fn children(&self, node: &N) -> Option<Vec<N>> {
        match &self.children {
            Some(f) => f(node),
            None => node.children(),
        }
    }

    fn id<'n>(&self, node: &'n N) -> Option<Cow<'n, str>> {
        match &self.id {
            Some(f) => f(node),
            None => node.id(),
        }
    }

    fn has_class(&self, node: &N, name: &str) -> bool {
        match (&self.has_class, &self.attr) {
            (Some(f), _) => f(node, name),
            (None, Some(attr)) => attr(node, name).is_some_and(|v| v.is_truthy()),
            (None, None) => node.has_class(name),
        }
    }

    fn attr(&self, node: &N, name: &str) -> Option<N> {
        match &self.attr {
            Some(f) => f(node, name),
            None => node.attr(name),
        }
    }
}
