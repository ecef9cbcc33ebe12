use std::borrow::Cow;

use super::test_utils::{Node, tags};
use super::{Hooks, Overrides, Provider};

fn sample() -> Node {
    Node::new("box")
        .id("main")
        .class("wide")
        .attr("label", Node::leaf("hello"))
        .child(Node::new("a"))
        .child(Node::new("b"))
}

fn upper_tag<'n>(node: &'n &Node) -> Option<Cow<'n, str>> {
    node.tag.map(|tag| Cow::Owned(tag.to_uppercase()))
}

fn reversed_children<'a>(node: &&'a Node) -> Option<Vec<&'a Node>> {
    Some(node.children.iter().rev().collect())
}

fn everything_class(_: &&Node, name: &str) -> bool {
    name == "everything"
}

fn no_attrs<'a>(_: &&'a Node, _: &str) -> Option<&'a Node> {
    None
}

#[test]
fn hooks_forward_to_selectable() {
    let node = sample();
    let node = &node;

    assert_eq!(Hooks.tag(&node).as_deref(), Some("box"));
    assert_eq!(Hooks.id(&node).as_deref(), Some("main"));
    assert!(Hooks.has_class(&node, "wide"));
    assert!(!Hooks.has_class(&node, "narrow"));
    assert_eq!(tags(&Hooks.children(&node).unwrap()), ["a", "b"]);
    assert!(Hooks.attr(&node, "label").is_some());
    assert!(Hooks.attr(&node, "title").is_none());
}

#[test]
fn unset_overrides_fall_back() {
    let node = sample();
    let node = &node;
    let overrides: Overrides<&Node> = Overrides::new();
    let provider: &dyn Provider<&Node> = &overrides;

    assert_eq!(provider.tag(&node).as_deref(), Some("box"));
    assert_eq!(provider.id(&node).as_deref(), Some("main"));
    assert!(provider.has_class(&node, "wide"));
    assert_eq!(tags(&provider.children(&node).unwrap()), ["a", "b"]);
}

#[test]
fn overrides_replace_only_what_is_set() {
    let node = sample();
    let node = &node;
    let overrides = Overrides::<&Node>::new()
        .tag(upper_tag)
        .children(reversed_children)
        .has_class(everything_class);
    let provider: &dyn Provider<&Node> = &overrides;

    assert_eq!(provider.tag(&node).as_deref(), Some("BOX"));
    assert_eq!(tags(&provider.children(&node).unwrap()), ["b", "a"]);
    assert!(provider.has_class(&node, "everything"));
    assert!(!provider.has_class(&node, "wide"));

    assert_eq!(provider.id(&node).as_deref(), Some("main"));
    assert!(provider.attr(&node, "label").is_some());
}

#[test]
fn attr_override() {
    let node = sample();
    let node = &node;
    let overrides = Overrides::<&Node>::new().attr(no_attrs);
    let provider: &dyn Provider<&Node> = &overrides;
    assert!(provider.attr(&node, "label").is_none());
}

fn label_for_all<'a>(node: &&'a Node, _: &str) -> Option<&'a Node> {
    let node: &'a Node = node;
    node.attrs
        .iter()
        .find(|(name, _)| *name == "label")
        .map(|(_, value)| value)
}

#[test]
fn attr_override_drives_class() {
    let node = sample();
    let node = &node;

    let overrides = Overrides::<&Node>::new().attr(no_attrs);
    let provider: &dyn Provider<&Node> = &overrides;
    assert!(!provider.has_class(&node, "wide"));

    let overrides = Overrides::<&Node>::new().attr(label_for_all);
    let provider: &dyn Provider<&Node> = &overrides;
    assert!(provider.has_class(&node, "anything"));

    // An explicit class hook still wins.
    let overrides = Overrides::<&Node>::new()
        .attr(label_for_all)
        .has_class(everything_class);
    let provider: &dyn Provider<&Node> = &overrides;
    assert!(!provider.has_class(&node, "anything"));
    assert!(provider.has_class(&node, "everything"));
}

#[test]
fn debug_lists_set_hooks() {
    let provider: Overrides<&Node> = Overrides::new().tag(upper_tag);
    insta::assert_snapshot!(
        format!("{provider:?}"),
        @"Overrides { tag: true, children: false, id: false, has_class: false, attr: false }"
    );
}

#[test]
fn usable_as_trait_object() {
    let node = sample();
    let node = &node;
    let overrides = Overrides::<&Node>::new().tag(upper_tag);
    let providers: [&dyn Provider<&Node>; 2] = [&Hooks, &overrides];
    let seen: Vec<_> = providers
        .iter()
        .map(|provider| provider.tag(&node).map(Cow::into_owned))
        .collect();
    assert_eq!(seen, [Some("box".to_owned()), Some("BOX".to_owned())]);
}
