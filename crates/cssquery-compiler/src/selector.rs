//! Compiled selector representation.
//!
//! A [`Selector`] is a list of alternative [`Group`]s (the comma-separated
//! parts of the source), each an ordered list of [`Operation`]s. Both are
//! immutable once the parser hands them out.
//!
//! `Display` prints the normalized source form, which parses back to an
//! equal value.

use std::fmt;

use serde::Serialize;

/// One atomic filter or combinator step.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum Operation {
    /// `*`
    Any,
    /// `name`
    Tag(String),
    /// `.name`
    Class(String),
    /// `#name`
    Id(String),
    /// `[expr]`, body kept verbatim
    Predicate(String),
    /// `:name`
    Pseudo(String),
    /// `:name(args)`, arguments kept verbatim
    Function { name: String, args: String },
    /// Whitespace: descendant at any depth
    Child,
    /// `>`
    ChildDirect,
    /// `~`
    Sibling,
    /// `+`
    SiblingDirect,
}

impl Operation {
    pub fn tag(name: impl Into<String>) -> Self {
        Self::Tag(name.into())
    }

    pub fn class(name: impl Into<String>) -> Self {
        Self::Class(name.into())
    }

    pub fn id(name: impl Into<String>) -> Self {
        Self::Id(name.into())
    }

    pub fn predicate(expr: impl Into<String>) -> Self {
        Self::Predicate(expr.into())
    }

    pub fn pseudo(name: impl Into<String>) -> Self {
        Self::Pseudo(name.into())
    }

    pub fn function(name: impl Into<String>, args: impl Into<String>) -> Self {
        Self::Function {
            name: name.into(),
            args: args.into(),
        }
    }

    pub fn is_combinator(&self) -> bool {
        self.combinator_symbol().is_some()
    }

    /// Source symbol of a combinator (`" "` for the descendant combinator).
    pub fn combinator_symbol(&self) -> Option<&'static str> {
        match self {
            Self::Child => Some(" "),
            Self::ChildDirect => Some(">"),
            Self::Sibling => Some("~"),
            Self::SiblingDirect => Some("+"),
            _ => None,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => f.write_str("*"),
            Self::Tag(name) => f.write_str(name),
            Self::Class(name) => write!(f, ".{name}"),
            Self::Id(name) => write!(f, "#{name}"),
            Self::Predicate(expr) => write!(f, "[{expr}]"),
            Self::Pseudo(name) => write!(f, ":{name}"),
            Self::Function { name, args } => write!(f, ":{name}({args})"),
            Self::Child => f.write_str(" "),
            Self::ChildDirect => f.write_str(" > "),
            Self::Sibling => f.write_str(" ~ "),
            Self::SiblingDirect => f.write_str(" + "),
        }
    }
}

/// One comma-separated alternative.
///
/// Combinators never start or end a group and never follow each other.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Group {
    operations: Vec<Operation>,
}

impl Group {
    pub fn new(operations: Vec<Operation>) -> Self {
        debug_assert!(
            operations.first().is_none_or(|op| !op.is_combinator())
                && operations.last().is_none_or(|op| !op.is_combinator()),
            "group starts or ends with a combinator: {operations:?}"
        );
        Self { operations }
    }

    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Operation> {
        self.operations.iter()
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}

impl From<Vec<Operation>> for Group {
    fn from(operations: Vec<Operation>) -> Self {
        Self::new(operations)
    }
}

impl<'a> IntoIterator for &'a Group {
    type Item = &'a Operation;
    type IntoIter = std::slice::Iter<'a, Operation>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for op in &self.operations {
            write!(f, "{op}")?;
        }
        Ok(())
    }
}

/// Alternatives in source order. Order matters: it decides result order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Selector {
    groups: Vec<Group>,
}

impl Selector {
    pub fn new(groups: Vec<Group>) -> Self {
        Self { groups }
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Group> {
        self.groups.iter()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

impl<'a> IntoIterator for &'a Selector {
    type Item = &'a Group;
    type IntoIter = std::slice::Iter<'a, Group>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, group) in self.groups.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{group}")?;
        }
        Ok(())
    }
}
