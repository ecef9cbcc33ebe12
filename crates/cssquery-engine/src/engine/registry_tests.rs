use super::test_utils::{Node, tags};
use super::{Candidates, Context, Error, Hooks, Limits, Pseudo, QueryError, Registry};

fn marker() -> Error {
    Error::Query(QueryError::DepthLimitExceeded(0))
}

fn stream<'q>(items: Vec<Result<&'q Node, Error>>) -> Candidates<'q, &'q Node> {
    Box::new(items.into_iter())
}

fn cx<'q>() -> Context<'q, &'q Node> {
    Context::new(&Hooks, Limits::default())
}

fn collect(output: Candidates<'_, &Node>) -> Result<Vec<&'static str>, Error> {
    let nodes = output.collect::<Result<Vec<_>, _>>()?;
    Ok(tags(&nodes))
}

fn abc() -> [Node; 3] {
    [Node::new("a"), Node::new("b"), Node::new("c")]
}

#[test]
fn builtin_names() {
    let registry: Registry<&Node> = Registry::builtin();
    insta::assert_snapshot!(
        format!("{registry:?}"),
        @r#"Registry { pseudos: ["first", "last"], functions: ["attr", "nth-child"] }"#
    );
    assert_eq!(
        format!("{:?}", Registry::<&Node>::default()),
        format!("{registry:?}")
    );
}

#[test]
fn empty_registry() {
    let registry: Registry<&Node> = Registry::empty();
    assert!(registry.pseudo("first").is_none());
    assert!(registry.function("nth-child").is_none());
    insta::assert_snapshot!(format!("{registry:?}"), @"Registry { pseudos: [], functions: [] }");
}

#[test]
fn first_and_last() {
    let [a, b, c] = abc();
    let registry = Registry::builtin();
    let first = registry.pseudo("first").unwrap();
    let last = registry.pseudo("last").unwrap();

    let output = first.apply(stream(vec![Ok(&a), Ok(&b), Ok(&c)]), cx());
    assert_eq!(collect(output).unwrap(), ["a"]);

    let output = last.apply(stream(vec![Ok(&a), Ok(&b), Ok(&c)]), cx());
    assert_eq!(collect(output).unwrap(), ["c"]);

    assert!(collect(first.apply(stream(vec![]), cx())).unwrap().is_empty());
    assert!(collect(last.apply(stream(vec![]), cx())).unwrap().is_empty());
}

#[test]
fn first_stops_pulling() {
    let [a, ..] = abc();
    let registry = Registry::builtin();
    let first = registry.pseudo("first").unwrap();
    let output = first.apply(stream(vec![Ok(&a), Err(marker())]), cx());
    assert_eq!(collect(output).unwrap(), ["a"]);
}

#[test]
fn last_propagates_errors() {
    let [a, b, _] = abc();
    let registry = Registry::builtin();
    let last = registry.pseudo("last").unwrap();
    let output = last.apply(stream(vec![Ok(&a), Err(marker()), Ok(&b)]), cx());
    assert_eq!(collect(output), Err(marker()));
}

#[test]
fn nth_child() {
    let [a, b, c] = abc();
    let registry = Registry::builtin();
    let nth = registry.function("nth-child").unwrap();
    let input = || stream(vec![Ok(&a), Ok(&b), Ok(&c)]);

    assert_eq!(collect(nth.apply(input(), "1", cx()).unwrap()).unwrap(), ["b"]);
    assert_eq!(collect(nth.apply(input(), "\t2 ", cx()).unwrap()).unwrap(), ["c"]);
    assert!(collect(nth.apply(input(), "3", cx()).unwrap()).unwrap().is_empty());
    assert!(collect(nth.apply(input(), "-2", cx()).unwrap()).unwrap().is_empty());

    let output = nth.apply(stream(vec![Err(marker()), Ok(&a)]), "0", cx()).unwrap();
    assert_eq!(collect(output), Err(marker()));
}

#[test]
fn nth_child_rejects_bad_arguments() {
    let registry: Registry<&Node> = Registry::builtin();
    let nth = registry.function("nth-child").unwrap();
    for args in ["", "1.5", "first", "2n+1"] {
        let Err(err) = nth.apply(stream(vec![]), args, cx()) else {
            panic!("`{args}` should be rejected");
        };
        assert_eq!(
            err,
            QueryError::InvalidArgument {
                function: "nth-child".to_owned(),
                args: args.to_owned(),
                reason: "expected an integer".to_owned(),
            }
        );
    }
}

#[test]
fn attr() {
    let a = Node::new("a").attr("href", Node::new("url"));
    let b = Node::new("b");
    let registry = Registry::builtin();
    let attr = registry.function("attr").unwrap();

    let output = attr.apply(stream(vec![Ok(&a), Ok(&b)]), " href ", cx()).unwrap();
    assert_eq!(collect(output).unwrap(), ["url"]);

    let Err(err) = attr.apply(stream(vec![]), "  ", cx()) else {
        panic!("blank attribute name should be rejected");
    };
    assert_eq!(
        err,
        QueryError::InvalidArgument {
            function: "attr".to_owned(),
            args: "  ".to_owned(),
            reason: "expected an attribute name".to_owned(),
        }
    );
}

struct Reverse;

impl<N> Pseudo<N> for Reverse {
    fn apply<'q>(&self, input: Candidates<'q, N>, _cx: Context<'q, N>) -> Candidates<'q, N>
    where
        N: 'q,
    {
        let items: Vec<_> = input.collect();
        Box::new(items.into_iter().rev())
    }
}

#[test]
fn register_adds_and_replaces() {
    let [a, b, c] = abc();
    let mut registry = Registry::builtin();
    registry.register_pseudo("reverse", Reverse);
    registry.register_pseudo("first", Reverse);

    let reverse = registry.pseudo("reverse").unwrap();
    let output = reverse.apply(stream(vec![Ok(&a), Ok(&b), Ok(&c)]), cx());
    assert_eq!(collect(output).unwrap(), ["c", "b", "a"]);

    let first = registry.pseudo("first").unwrap();
    let output = first.apply(stream(vec![Ok(&a), Ok(&b)]), cx());
    assert_eq!(collect(output).unwrap(), ["b", "a"]);
}

#[test]
fn clones_are_independent() {
    let original: Registry<&Node> = Registry::builtin();
    let mut extended = original.clone();
    extended.register_pseudo("reverse", Reverse);
    assert!(extended.pseudo("reverse").is_some());
    assert!(original.pseudo("reverse").is_none());
    assert!(extended.pseudo("first").is_some());
}
