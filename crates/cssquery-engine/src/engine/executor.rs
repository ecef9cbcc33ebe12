//! Query execution: resolve names, then stream every (root, group) pair
//! into one result set.

use std::sync::Arc;

use cssquery_core::Selectable;
use tracing::{debug, trace};

use super::error::{Error, QueryError};
use super::eval::CompiledPredicate;
use super::limits::Limits;
use super::program::{Program, Step};
use super::provider::Provider;
use super::registry::{Candidates, Context, Function, Pseudo, Registry};
use super::result_set::ResultSet;
use super::stream::{Children, Descendants, filter, try_filter};

/// A step with its registry names resolved.
enum Stage<'p, N> {
    Any,
    Tag(&'p str),
    Class(&'p str),
    Id(&'p str),
    Predicate(&'p CompiledPredicate),
    Pseudo(Arc<dyn Pseudo<N>>),
    Function(Arc<dyn Function<N>>, &'p str),
    Descendants,
    Children,
}

/// Every group of a program, ready to run.
struct Plan<'p, N> {
    groups: Vec<Vec<Stage<'p, N>>>,
}

impl<'p, N: Selectable> Plan<'p, N> {
    /// Fails on the first unknown name or unsupported combinator, before any
    /// candidate is pulled.
    fn resolve(program: &'p Program, registry: &Registry<N>) -> Result<Self, QueryError> {
        let mut groups = Vec::with_capacity(program.groups().len());
        for (index, steps) in program.groups().iter().enumerate() {
            let stages = steps
                .iter()
                .map(|step| resolve_step(step, registry))
                .collect::<Result<Vec<_>, _>>()?;
            trace!(
                target: "cssquery::executor",
                group = index,
                operations = stages.len(),
                "resolved group pipeline"
            );
            groups.push(stages);
        }
        Ok(Self { groups })
    }
}

fn resolve_step<'p, N>(step: &'p Step, registry: &Registry<N>) -> Result<Stage<'p, N>, QueryError> {
    let stage = match step {
        Step::Any => Stage::Any,
        Step::Tag(name) => Stage::Tag(name),
        Step::Class(name) => Stage::Class(name),
        Step::Id(name) => Stage::Id(name),
        Step::Predicate(predicate) => Stage::Predicate(predicate),
        Step::Pseudo(name) => Stage::Pseudo(
            registry
                .pseudo(name)
                .ok_or_else(|| QueryError::UnknownPseudo(name.clone()))?,
        ),
        Step::Function { name, args } => Stage::Function(
            registry
                .function(name)
                .ok_or_else(|| QueryError::UnknownFunction(name.clone()))?,
            args,
        ),
        Step::Descendants => Stage::Descendants,
        Step::Children => Stage::Children,
        Step::Unsupported(symbol) => return Err(QueryError::UnsupportedCombinator(*symbol)),
    };
    Ok(stage)
}

/// Chain one group's stages over the implicit self-and-descendants scan of
/// `root`.
fn group_stream<'q, N>(
    stages: &'q [Stage<'_, N>],
    root: N,
    cx: Context<'q, N>,
) -> Result<Candidates<'q, N>, QueryError>
where
    N: Selectable + 'q,
{
    let provider = cx.provider();
    let max_depth = cx.limits().max_depth;

    let seed: Candidates<'q, N> = Box::new(std::iter::once(Ok(root)));
    let mut stream: Candidates<'q, N> = Box::new(Descendants::new(seed, provider, max_depth));

    for stage in stages {
        stream = match stage {
            Stage::Any => stream,
            Stage::Tag(name) => {
                let name: &'q str = name;
                filter(stream, move |node| provider.tag(node).as_deref() == Some(name))
            }
            Stage::Class(name) => {
                let name: &'q str = name;
                filter(stream, move |node| provider.has_class(node, name))
            }
            Stage::Id(name) => {
                let name: &'q str = name;
                filter(stream, move |node| provider.id(node).as_deref() == Some(name))
            }
            Stage::Predicate(predicate) => {
                let predicate: &'q CompiledPredicate = predicate;
                try_filter(stream, move |node| predicate.matches(node, provider))
            }
            Stage::Pseudo(pseudo) => pseudo.apply(stream, cx),
            Stage::Function(function, args) => function.apply(stream, args, cx)?,
            Stage::Descendants => Box::new(Descendants::new(stream, provider, max_depth)),
            Stage::Children => Box::new(Children::new(stream, provider)),
        };
    }

    Ok(stream)
}

/// Run `program` over `roots`: outer loop over roots, inner loop over
/// groups, every match inserted into one deduplicated result set.
///
/// The first error aborts the query; no partial result is returned.
pub(crate) fn execute<N: Selectable>(
    program: &Program,
    roots: &[N],
    provider: &dyn Provider<N>,
    registry: &Registry<N>,
    limits: Limits,
) -> Result<Vec<N>, Error> {
    let plan = Plan::resolve(program, registry)?;
    let cx = Context::new(provider, limits);
    let mut results = ResultSet::new();

    for root in roots {
        for stages in &plan.groups {
            for node in group_stream(stages, root.clone(), cx)? {
                results.insert(node?);
            }
        }
    }

    debug!(
        target: "cssquery::executor",
        selector = program.source(),
        roots = roots.len(),
        groups = plan.groups.len(),
        matches = results.len(),
        "query complete"
    );
    Ok(results.into_vec())
}
