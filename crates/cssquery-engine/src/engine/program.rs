use std::fmt;

use cssquery_compiler::predicate::PredicateLimits;
use cssquery_compiler::{Operation, Selector, SyntaxError, parse};

use super::eval::CompiledPredicate;

/// One executable step of a group.
#[derive(Debug)]
pub(crate) enum Step {
    Any,
    Tag(String),
    Class(String),
    Id(String),
    Predicate(CompiledPredicate),
    Pseudo(String),
    Function { name: String, args: String },
    /// Self plus every descendant.
    Descendants,
    /// Immediate children only.
    Children,
    /// Sibling combinators parse but have no executable form.
    Unsupported(&'static str),
}

/// A compiled selector: the parsed [`Selector`] plus its executable steps.
///
/// Immutable and provider-independent, so one program is shared by every
/// [`CompiledSelector`](super::CompiledSelector) built from the same text.
pub struct Program {
    source: String,
    selector: Selector,
    groups: Vec<Vec<Step>>,
}

impl Program {
    /// Parse `source` with default limits.
    pub fn compile(source: &str) -> Result<Self, SyntaxError> {
        Self::compile_with(source, PredicateLimits::default())
    }

    /// Parse `source`. Predicate bodies are parsed here too, but a malformed
    /// one only fails when a query evaluates it.
    pub fn compile_with(source: &str, limits: PredicateLimits) -> Result<Self, SyntaxError> {
        let selector = parse(source)?;
        let groups = selector
            .iter()
            .map(|group| group.iter().map(|op| lower(op, limits)).collect::<Vec<_>>())
            .collect();
        Ok(Self {
            source: source.to_owned(),
            selector,
            groups,
        })
    }

    /// Selector text as given to [`compile`](Self::compile).
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn selector(&self) -> &Selector {
        &self.selector
    }

    pub(crate) fn groups(&self) -> &[Vec<Step>] {
        &self.groups
    }
}

impl fmt::Debug for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Program")
            .field("source", &self.source)
            .field("selector", &self.selector)
            .finish_non_exhaustive()
    }
}

fn lower(op: &Operation, limits: PredicateLimits) -> Step {
    match op {
        Operation::Any => Step::Any,
        Operation::Tag(name) => Step::Tag(name.clone()),
        Operation::Class(name) => Step::Class(name.clone()),
        Operation::Id(name) => Step::Id(name.clone()),
        Operation::Predicate(text) => Step::Predicate(CompiledPredicate::new(text, limits)),
        Operation::Pseudo(name) => Step::Pseudo(name.clone()),
        Operation::Function { name, args } => Step::Function {
            name: name.clone(),
            args: args.clone(),
        },
        Operation::Child => Step::Descendants,
        Operation::ChildDirect => Step::Children,
        Operation::Sibling | Operation::SiblingDirect => {
            Step::Unsupported(op.combinator_symbol().unwrap_or_default())
        }
    }
}
