use super::stream::{Children, Descendants, filter, try_filter};
use super::test_utils::{Node, tags};
use super::{Candidates, Error, Hooks, PredicateError, Provider, QueryError};

fn tree() -> Node {
    Node::new("root")
        .child(
            Node::new("a")
                .child(Node::new("a1"))
                .child(Node::new("a2").child(Node::new("a2x"))),
        )
        .child(Node::new("b"))
}

fn seed<'q>(nodes: &[&'q Node]) -> Candidates<'q, &'q Node> {
    Box::new(nodes.to_vec().into_iter().map(Ok))
}

fn marker() -> Error {
    Error::Query(QueryError::UnknownPseudo("marker".to_owned()))
}

fn run<'q>(
    output: impl Iterator<Item = Result<&'q Node, Error>>,
) -> Result<Vec<&'static str>, Error> {
    let nodes = output.collect::<Result<Vec<_>, _>>()?;
    Ok(tags(&nodes))
}

fn descendants<'q>(
    input: Candidates<'q, &'q Node>,
    provider: &'q dyn Provider<&'q Node>,
    max_depth: u32,
) -> Descendants<'q, &'q Node> {
    Descendants::new(input, provider, max_depth)
}

#[test]
fn descendants_pre_order_including_self() {
    let tree = tree();
    let output = descendants(seed(&[&tree]), &Hooks, 64);
    assert_eq!(run(output).unwrap(), ["root", "a", "a1", "a2", "a2x", "b"]);
}

#[test]
fn descendants_of_several_inputs() {
    let tree = tree();
    let a = &tree.children[0];
    let b = &tree.children[1];
    let output = descendants(seed(&[b, a]), &Hooks, 64);
    assert_eq!(run(output).unwrap(), ["b", "a", "a1", "a2", "a2x"]);
}

#[test]
fn descendants_depth_limit() {
    let tree = tree();
    let output = descendants(seed(&[&tree]), &Hooks, 2);
    assert_eq!(run(output), Err(Error::Query(QueryError::DepthLimitExceeded(2))));

    let output = descendants(seed(&[&tree]), &Hooks, 3);
    assert_eq!(run(output).unwrap().len(), 6);
}

#[test]
fn descendants_depth_limit_ignores_leaves() {
    let leaf = Node::new("leaf");
    let output = descendants(seed(&[&leaf]), &Hooks, 0);
    assert_eq!(run(output).unwrap(), ["leaf"]);

    let parent = Node::new("p").child(Node::new("c"));
    let output = descendants(seed(&[&parent]), &Hooks, 0);
    assert_eq!(run(output), Err(Error::Query(QueryError::DepthLimitExceeded(0))));
}

#[test]
fn descendants_pass_errors_through() {
    let tree = tree();
    let b = &tree.children[1];
    let input: Candidates<'_, &Node> = Box::new(vec![Err(marker()), Ok(b)].into_iter());
    let mut output = descendants(input, &Hooks, 64);
    assert_eq!(output.next().map(|item| item.is_err()), Some(true));
    assert_eq!(output.next().map(|item| item.map(|n| n.tag)), Some(Ok(Some("b"))));
    assert!(output.next().is_none());
}

#[test]
fn children_in_order() {
    let tree = tree();
    let output = Children::new(seed(&[&tree]), &Hooks);
    assert_eq!(run(output).unwrap(), ["a", "b"]);

    let a = &tree.children[0];
    let b = &tree.children[1];
    let output = Children::new(seed(&[b, a, &tree]), &Hooks);
    assert_eq!(run(output).unwrap(), ["a1", "a2", "a", "b"]);
}

#[test]
fn children_pass_errors_through() {
    let tree = tree();
    let input: Candidates<'_, &Node> = Box::new(vec![Ok(&tree), Err(marker())].into_iter());
    let output = Children::new(input, &Hooks);
    assert_eq!(run(output), Err(marker()));
}

#[test]
fn filters() {
    let tree = tree();
    let input: Candidates<'_, &Node> = Box::new(descendants(seed(&[&tree]), &Hooks, 64));
    let output = filter(input, |node| {
        node.tag.is_some_and(|tag| tag.starts_with('a'))
    });
    assert_eq!(run(output).unwrap(), ["a", "a1", "a2", "a2x"]);

    let output = try_filter(seed(&[&tree.children[0], &tree.children[1]]), |node| {
        if node.tag == Some("b") {
            Err(PredicateError::UnknownAttribute("x".to_owned()))
        } else {
            Ok(true)
        }
    });
    assert_eq!(
        run(output),
        Err(Error::Predicate(PredicateError::UnknownAttribute("x".to_owned())))
    );
}
