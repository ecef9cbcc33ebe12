use std::borrow::Cow;

use serde_json::{Value as Json, json};

use crate::{
    Candidates, Context, Engine, Error, Limits, Overrides, PredicateError, Pseudo, QueryError,
    Registry,
};

fn ids(nodes: &[&Json]) -> Vec<String> {
    nodes.iter().map(|node| node["id"].to_string()).collect()
}

fn doc() -> Json {
    json!({
        "name": "root",
        "id": 0,
        "items": [
            { "name": "item", "id": 1, "tags": { "name": "tags", "id": 10 } },
            { "name": "item", "id": 2 },
            { "name": "item", "id": 3 },
        ],
    })
}

#[test]
fn default_engine() {
    let doc = doc();
    let engine: Engine<&Json> = Engine::new();
    assert_eq!(ids(&engine.query("item", &[&doc]).unwrap()), ["1", "2", "3"]);
    insta::assert_snapshot!(
        format!("{engine:?}"),
        @r#"Engine { provider: Hooks, registry: Registry { pseudos: ["first", "last"], functions: ["attr", "nth-child"] }, limits: Limits { max_depth: 4096, predicate: PredicateLimits { recursion_limit: 64 } }, cache: CacheConfig { capacity: 256 } }"#
    );
}

#[test]
fn engine_cache_is_private() {
    let doc = doc();
    let engine: Engine<&Json> = Engine::builder().cache_capacity(4).build();
    engine.query("root > item:last", &[&doc]).unwrap();
    assert!(engine.cache().contains("root > item:last"));
    assert!(!crate::cache().contains("root > item:last"));
    assert_eq!(engine.cache().config().capacity, 4);
}

#[test]
fn compile_reuses_cached_program() {
    let engine: Engine<&Json> = Engine::new();
    let first = engine.compile("item").unwrap();
    let second = engine.compile("item").unwrap();
    assert!(std::sync::Arc::ptr_eq(first.program(), second.program()));
    assert_eq!(engine.cache().len(), 1);
}

#[test]
fn zero_capacity() {
    let doc = doc();
    let engine: Engine<&Json> = Engine::builder().cache_capacity(0).build();
    assert_eq!(engine.query("item:first", &[&doc]).unwrap().len(), 1);
    assert!(engine.cache().is_empty());
}

#[test]
fn max_depth() {
    let doc = doc();
    let engine: Engine<&Json> = Engine::builder().max_depth(1).build();
    assert_eq!(
        engine.query("item", &[&doc]).unwrap_err(),
        Error::Query(QueryError::DepthLimitExceeded(1))
    );

    let engine: Engine<&Json> = Engine::builder()
        .limits(Limits::new().max_depth(4))
        .build();
    assert_eq!(engine.query("tags", &[&doc]).unwrap().len(), 1);
}

#[test]
fn predicate_recursion_limit() {
    let doc = doc();
    let engine: Engine<&Json> = Engine::builder().predicate_recursion_limit(3).build();
    assert_eq!(
        engine.query("item[((((((id))))))]", &[&doc]).unwrap_err(),
        Error::Predicate(PredicateError::RecursionLimitExceeded(3))
    );
    assert_eq!(engine.query("item[id > 1]", &[&doc]).unwrap().len(), 2);
}

struct Evens;

impl<'a> Pseudo<&'a Json> for Evens {
    fn apply<'q>(
        &self,
        input: Candidates<'q, &'a Json>,
        _cx: Context<'q, &'a Json>,
    ) -> Candidates<'q, &'a Json>
    where
        &'a Json: 'q,
    {
        Box::new(input.filter(|item| {
            item.as_ref()
                .map_or(true, |node| node["id"].as_i64().is_some_and(|id| id % 2 == 0))
        }))
    }
}

#[test]
fn register_pseudo() {
    let doc = doc();
    let mut engine = Engine::new();
    engine.register_pseudo("evens", Evens);
    assert_eq!(ids(&engine.query(":evens", &[&doc]).unwrap()), ["0", "10", "2"]);
    assert!(engine.registry().pseudo("evens").is_some());
}

#[test]
fn custom_registry() {
    let doc = doc();
    let engine = Engine::builder().registry(Registry::empty()).build();
    assert_eq!(
        engine.query("item:first", &[&doc]).unwrap_err(),
        Error::Query(QueryError::UnknownPseudo("first".to_owned()))
    );
}

fn id_tag<'n>(node: &'n &Json) -> Option<Cow<'n, str>> {
    node.get("id").map(|id| Cow::Owned(format!("n{id}")))
}

#[test]
fn custom_provider() {
    let doc = doc();
    let engine = Engine::builder()
        .provider(Overrides::<&Json>::new().tag(id_tag))
        .build();
    assert_eq!(ids(&engine.query("n0 > n2, n10", &[&doc]).unwrap()), ["10"]);
    assert_eq!(ids(&engine.query("n1 > n10", &[&doc]).unwrap()), ["10"]);
    assert!(engine.query("item", &[&doc]).unwrap().is_empty());
}
