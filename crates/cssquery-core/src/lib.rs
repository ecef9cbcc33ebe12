#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core data structures for cssquery.
//!
//! Two layers:
//! - **Node layer**: the [`Selectable`] trait, the hooks a caller's node type
//!   exposes to the selector engine (tag, children, id, class, attributes)
//! - **Value layer**: [`Value`], the dynamic scalar view predicates compare
//!
//! `&serde_json::Value` implements [`Selectable`] out of the box, so JSON
//! documents can be queried without writing any glue.

use std::borrow::Cow;
use std::hash::Hash;

mod json;
mod value;


pub use json::JsonKey;
pub use value::Value;

// ============================================================================
// Selectable Trait
// ============================================================================

/// Hooks a node handle exposes to the selector engine.
///
/// Implementors are cheap handles (`&T`, `Rc<T>`, an index into an arena):
/// the engine clones them freely while streaming candidates. Every hook
/// except [`key`](Selectable::key) has a default, so an object model only
/// overrides what it actually has.
///
/// | hook          | default                                        |
/// |---------------|------------------------------------------------|
/// | `tag`         | no tag                                         |
/// | `children`    | no children (a leaf)                           |
/// | `id`          | no id; identity is never guessed               |
/// | `attr`        | no attributes                                  |
/// | `has_class`   | `attr(name)` exists and is truthy              |
/// | `value`       | `Value::Null`                                  |
/// | `is_truthy`   | `value().is_truthy()`                          |
pub trait Selectable: Clone {
    /// Identity used to deduplicate query results.
    ///
    /// Use the node itself for data equality, or an address / arena index
    /// for reference identity.
    type Key: Hash + Eq;

    fn key(&self) -> Self::Key;

    /// Tag name matched by `TAG` steps (`foo` in `foo > bar`).
    fn tag(&self) -> Option<Cow<'_, str>> {
        None
    }

    /// Ordered child handles, or `None` for leaves.
    fn children(&self) -> Option<Vec<Self>> {
        None
    }

    /// Identifier matched by `#id` steps.
    fn id(&self) -> Option<Cow<'_, str>> {
        None
    }

    /// Named attribute, as another handle.
    fn attr(&self, _name: &str) -> Option<Self> {
        None
    }

    /// Class membership tested by `.class` steps.
    fn has_class(&self, name: &str) -> bool {
        self.attr(name).is_some_and(|v| v.is_truthy())
    }

    /// Scalar view of this node, used when a predicate compares it.
    fn value(&self) -> Value {
        Value::Null
    }

    fn is_truthy(&self) -> bool {
        self.value().is_truthy()
    }
}
