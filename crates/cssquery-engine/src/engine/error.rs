use cssquery_compiler::SyntaxError;
use cssquery_compiler::predicate::PredicateSyntaxError;

/// A well-formed selector that cannot be evaluated.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    #[error("unknown pseudo-selector `:{0}`")]
    UnknownPseudo(String),

    #[error("unknown function `:{0}()`")]
    UnknownFunction(String),

    #[error("unsupported combinator `{0}`")]
    UnsupportedCombinator(&'static str),

    #[error("invalid argument `{args}` for `:{function}()`: {reason}")]
    InvalidArgument {
        function: String,
        args: String,
        reason: String,
    },

    #[error("descendant traversal exceeded the depth limit of {0}")]
    DepthLimitExceeded(u32),
}

/// A predicate (`[...]`) that failed to evaluate against a candidate.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PredicateError {
    #[error("malformed predicate `[{expr}]`: {source}")]
    Syntax {
        expr: String,
        #[source]
        source: PredicateSyntaxError,
    },

    #[error("unknown attribute `{0}`")]
    UnknownAttribute(String),

    #[error("cannot apply `{op}` to {left} and {right}")]
    TypeMismatch {
        op: String,
        left: &'static str,
        right: &'static str,
    },

    #[error("invalid regex `{pattern}`: {message}")]
    InvalidRegex { pattern: String, message: String },

    #[error("unknown predicate function `{0}()`")]
    UnknownFunction(String),

    #[error("invalid call to `{function}()`: {reason}")]
    InvalidCall { function: String, reason: String },

    #[error("predicate nests deeper than {0} levels")]
    RecursionLimitExceeded(u32),
}

impl PredicateError {
    /// Lift a parse failure of predicate body `expr`.
    pub(crate) fn from_syntax(expr: &str, err: &PredicateSyntaxError) -> Self {
        match err {
            PredicateSyntaxError::TooDeep { limit } => Self::RecursionLimitExceeded(*limit),
            PredicateSyntaxError::Malformed { .. } => Self::Syntax {
                expr: expr.to_owned(),
                source: err.clone(),
            },
        }
    }
}

/// Anything `compile` or `query` can fail with.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Syntax(#[from] SyntaxError),

    #[error(transparent)]
    Query(#[from] QueryError),

    #[error(transparent)]
    Predicate(#[from] PredicateError),
}
