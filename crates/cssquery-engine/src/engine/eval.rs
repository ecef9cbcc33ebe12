//! Predicate evaluation.
//!
//! Paths resolve through [`Provider::attr`] one segment at a time and end in
//! the node's [`Selectable::value`]. Everything else is plain [`Value`]
//! arithmetic. Host recursion follows expression nesting, which the parser
//! already bounds.

use std::collections::HashMap;
use std::sync::Arc;

use cssquery_compiler::predicate::{
    CmpOp, Expr, PredicateLimits, PredicateSyntaxError, parse_predicate_with,
};
use cssquery_core::{Selectable, Value};

use super::error::PredicateError;
use super::provider::Provider;
use super::regex::Pattern;

/// A `[...]` body, parsed once when its selector is compiled.
#[derive(Debug)]
pub(crate) struct CompiledPredicate {
    text: String,
    expr: Result<Expr, PredicateSyntaxError>,
    /// Literal right-hand sides of `=~` / `!~`, compiled up front.
    patterns: HashMap<String, Result<Arc<Pattern>, PredicateError>>,
}

impl CompiledPredicate {
    pub(crate) fn new(text: &str, limits: PredicateLimits) -> Self {
        let expr = parse_predicate_with(text, limits);
        let mut patterns = HashMap::new();
        if let Ok(expr) = &expr {
            collect_patterns(expr, &mut patterns);
        }
        Self {
            text: text.to_owned(),
            expr,
            patterns,
        }
    }

    /// Whether `node` satisfies the predicate.
    pub(crate) fn matches<N: Selectable>(
        &self,
        node: &N,
        provider: &dyn Provider<N>,
    ) -> Result<bool, PredicateError> {
        let expr = self
            .expr
            .as_ref()
            .map_err(|err| PredicateError::from_syntax(&self.text, err))?;
        let evaluator = Evaluator {
            node,
            provider,
            patterns: &self.patterns,
        };
        Ok(evaluator.eval(expr)?.is_truthy())
    }
}

fn collect_patterns(expr: &Expr, out: &mut HashMap<String, Result<Arc<Pattern>, PredicateError>>) {
    match expr {
        Expr::Literal(_) | Expr::Path(_) => {}
        Expr::List(items) | Expr::Call { args: items, .. } => {
            for item in items {
                collect_patterns(item, out);
            }
        }
        Expr::Index { target, index } => {
            collect_patterns(target, out);
            collect_patterns(index, out);
        }
        Expr::Not(inner) => collect_patterns(inner, out),
        Expr::And(left, right) | Expr::Or(left, right) => {
            collect_patterns(left, out);
            collect_patterns(right, out);
        }
        Expr::Compare { op, left, right } => {
            if op.is_regex_op()
                && let Expr::Literal(Value::Str(pattern)) = right.as_ref()
            {
                out.entry(pattern.clone())
                    .or_insert_with(|| Pattern::new(pattern).map(Arc::new));
            }
            collect_patterns(left, out);
            collect_patterns(right, out);
        }
    }
}

struct Evaluator<'e, N> {
    node: &'e N,
    provider: &'e dyn Provider<N>,
    patterns: &'e HashMap<String, Result<Arc<Pattern>, PredicateError>>,
}

impl<N: Selectable> Evaluator<'_, N> {
    fn eval(&self, expr: &Expr) -> Result<Value, PredicateError> {
        match expr {
            Expr::Literal(value) => Ok(value.clone()),
            Expr::Path(segments) => self
                .resolve(segments)
                .map(|node| node.value())
                .ok_or_else(|| PredicateError::UnknownAttribute(segments.join("."))),
            Expr::List(items) => items
                .iter()
                .map(|item| self.eval(item))
                .collect::<Result<Vec<_>, _>>()
                .map(Value::List),
            Expr::Index { target, index } => {
                let target = self.eval(target)?;
                let index = self.eval(index)?;
                index_value(target, &index)
            }
            Expr::Call { name, args } => self.call(name, args),
            Expr::Not(inner) => Ok(Value::Bool(!self.eval(inner)?.is_truthy())),
            Expr::And(left, right) => {
                let value = self.eval(left)?.is_truthy() && self.eval(right)?.is_truthy();
                Ok(Value::Bool(value))
            }
            Expr::Or(left, right) => {
                let value = self.eval(left)?.is_truthy() || self.eval(right)?.is_truthy();
                Ok(Value::Bool(value))
            }
            Expr::Compare { op, left, right } => {
                let left = self.eval(left)?;
                let right = self.eval(right)?;
                self.compare(*op, &left, &right).map(Value::Bool)
            }
        }
    }

    /// Walk `segments` through attributes, starting at the candidate.
    fn resolve(&self, segments: &[String]) -> Option<N> {
        let mut current = self.node.clone();
        for segment in segments {
            current = self.provider.attr(&current, segment)?;
        }
        Some(current)
    }

    fn call(&self, name: &str, args: &[Expr]) -> Result<Value, PredicateError> {
        let invalid = |reason: &str| PredicateError::InvalidCall {
            function: name.to_owned(),
            reason: reason.to_owned(),
        };

        match name {
            "len" => {
                let [arg] = args else {
                    return Err(invalid("expected exactly one argument"));
                };
                let value = self.eval(arg)?;
                let Some(len) = value.len() else {
                    return Err(invalid(&format!("{} has no length", value.kind())));
                };
                i64::try_from(len)
                    .map(Value::Int)
                    .map_err(|_| invalid("length overflows an integer"))
            }
            "has" => {
                let [Expr::Path(segments)] = args else {
                    return Err(invalid("expected one attribute path"));
                };
                Ok(Value::Bool(self.resolve(segments).is_some()))
            }
            _ => Err(PredicateError::UnknownFunction(name.to_owned())),
        }
    }

    fn compare(&self, op: CmpOp, left: &Value, right: &Value) -> Result<bool, PredicateError> {
        let mismatch = || PredicateError::TypeMismatch {
            op: op.as_str().to_owned(),
            left: left.kind(),
            right: right.kind(),
        };

        match op {
            CmpOp::Eq => Ok(left.loose_eq(right)),
            CmpOp::Ne => Ok(!left.loose_eq(right)),
            CmpOp::Lt | CmpOp::Le | CmpOp::Gt | CmpOp::Ge => {
                let ordering = left.compare(right).ok_or_else(mismatch)?;
                Ok(match op {
                    CmpOp::Lt => ordering.is_lt(),
                    CmpOp::Le => ordering.is_le(),
                    CmpOp::Gt => ordering.is_gt(),
                    _ => ordering.is_ge(),
                })
            }
            CmpOp::StartsWith | CmpOp::EndsWith => {
                let (Value::Str(haystack), Value::Str(needle)) = (left, right) else {
                    return Err(mismatch());
                };
                Ok(if op == CmpOp::StartsWith {
                    haystack.starts_with(needle.as_str())
                } else {
                    haystack.ends_with(needle.as_str())
                })
            }
            CmpOp::Contains => match (left, right) {
                (Value::Str(haystack), Value::Str(needle)) => Ok(haystack.contains(needle.as_str())),
                (Value::List(items), needle) => Ok(items.iter().any(|item| item.loose_eq(needle))),
                _ => Err(mismatch()),
            },
            CmpOp::RegexMatch | CmpOp::RegexNoMatch => {
                let (Value::Str(text), Value::Str(pattern)) = (left, right) else {
                    return Err(mismatch());
                };
                let matched = self.pattern(pattern)?.is_match(text)?;
                Ok(matched == (op == CmpOp::RegexMatch))
            }
        }
    }

    fn pattern(&self, pattern: &str) -> Result<Arc<Pattern>, PredicateError> {
        match self.patterns.get(pattern) {
            Some(compiled) => compiled.clone(),
            // Computed pattern: compile on the spot.
            None => Pattern::new(pattern).map(Arc::new),
        }
    }
}

/// `list[int]` (negative counts from the end) or `map[string]`; a missing
/// element is `null`.
fn index_value(target: Value, index: &Value) -> Result<Value, PredicateError> {
    match (target, index) {
        (Value::List(mut items), Value::Int(i)) => {
            let len = items.len() as i64;
            let position = if *i < 0 { len + i } else { *i };
            if (0..len).contains(&position) {
                Ok(items.swap_remove(position as usize))
            } else {
                Ok(Value::Null)
            }
        }
        (Value::Map(mut entries), Value::Str(key)) => {
            Ok(entries.shift_remove(key.as_str()).unwrap_or(Value::Null))
        }
        (target, index) => Err(PredicateError::TypeMismatch {
            op: "[]".to_owned(),
            left: target.kind(),
            right: index.kind(),
        }),
    }
}
