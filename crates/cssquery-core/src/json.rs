//! `Selectable` for borrowed JSON documents.
//!
//! Mappings expose their values as children (in insertion order), arrays
//! their elements; strings and other scalars are leaves. A mapping's tag is
//! its `"name"` member when that is a string. Scalars are deduplicated by
//! value; mappings and arrays by address, so two equal sub-documents at
//! different places stay distinct.

use std::borrow::Cow;

use serde_json::{Number, Value as Json};

use crate::{Selectable, Value};

/// Result identity for a borrowed JSON value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JsonKey<'a> {
    Null,
    Bool(bool),
    Number(&'a Number),
    String(&'a str),
    /// Address of a mapping or array.
    Node(usize),
}

impl<'a> Selectable for &'a Json {
    type Key = JsonKey<'a>;

    fn key(&self) -> JsonKey<'a> {
        let node: &'a Json = *self;
        match node {
            Json::Null => JsonKey::Null,
            Json::Bool(b) => JsonKey::Bool(*b),
            Json::Number(n) => JsonKey::Number(n),
            Json::String(s) => JsonKey::String(s),
            Json::Array(_) | Json::Object(_) => {
                JsonKey::Node(std::ptr::from_ref::<Json>(node) as usize)
            }
        }
    }

    fn tag(&self) -> Option<Cow<'_, str>> {
        self.get("name")?.as_str().map(Cow::Borrowed)
    }

    fn children(&self) -> Option<Vec<Self>> {
        match *self {
            Json::Object(entries) => Some(entries.values().collect()),
            Json::Array(items) => Some(items.iter().collect()),
            _ => None,
        }
    }

    fn attr(&self, name: &str) -> Option<Self> {
        let node: &'a Json = *self;
        node.as_object()?.get(name)
    }

    fn value(&self) -> Value {
        Value::from(*self)
    }

    fn is_truthy(&self) -> bool {
        match *self {
            Json::Null => false,
            Json::Bool(b) => *b,
            Json::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
            Json::String(s) => !s.is_empty(),
            Json::Array(items) => !items.is_empty(),
            Json::Object(entries) => !entries.is_empty(),
        }
    }
}
