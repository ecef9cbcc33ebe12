//! A small object model for executor tests.

use std::borrow::Cow;

use cssquery_core::{Selectable, Value};

#[derive(Debug, Default)]
pub struct Node {
    pub tag: Option<&'static str>,
    pub id: Option<&'static str>,
    pub classes: Vec<&'static str>,
    pub value: Value,
    pub attrs: Vec<(&'static str, Node)>,
    pub children: Vec<Node>,
}

impl Node {
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag: Some(tag),
            ..Self::default()
        }
    }

    /// Attribute payload: no tag, just a value.
    pub fn leaf(value: impl Into<Value>) -> Self {
        Self {
            value: value.into(),
            ..Self::default()
        }
    }

    pub fn id(mut self, id: &'static str) -> Self {
        self.id = Some(id);
        self
    }

    pub fn class(mut self, class: &'static str) -> Self {
        self.classes.push(class);
        self
    }

    pub fn attr(mut self, name: &'static str, value: Node) -> Self {
        self.attrs.push((name, value));
        self
    }

    pub fn value(mut self, value: impl Into<Value>) -> Self {
        self.value = value.into();
        self
    }

    pub fn child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }
}

impl<'a> Selectable for &'a Node {
    type Key = usize;

    fn key(&self) -> usize {
        std::ptr::from_ref::<Node>(*self) as usize
    }

    fn tag(&self) -> Option<Cow<'_, str>> {
        self.tag.map(Cow::Borrowed)
    }

    fn children(&self) -> Option<Vec<Self>> {
        let node: &'a Node = *self;
        if node.children.is_empty() {
            return None;
        }
        Some(node.children.iter().collect())
    }

    fn id(&self) -> Option<Cow<'_, str>> {
        self.id.map(Cow::Borrowed)
    }

    fn attr(&self, name: &str) -> Option<Self> {
        let node: &'a Node = *self;
        node.attrs
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value)
    }

    fn has_class(&self, name: &str) -> bool {
        self.classes.iter().any(|class| *class == name)
    }

    fn value(&self) -> Value {
        self.value.clone()
    }
}

/// Tags of `nodes`, `?` for untagged ones.
pub fn tags(nodes: &[&Node]) -> Vec<&'static str> {
    nodes.iter().map(|n| n.tag.unwrap_or("?")).collect()
}
