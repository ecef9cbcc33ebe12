use std::fmt;

use cssquery_core::Value;

/// Comparison operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CmpOp {
    /// `==` - equals
    Eq,
    /// `!=` - not equals
    Ne,
    /// `<`
    Lt,
    /// `<=`
    Le,
    /// `>`
    Gt,
    /// `>=`
    Ge,
    /// `^=` - starts with
    StartsWith,
    /// `$=` - ends with
    EndsWith,
    /// `*=` - contains (substring, or list membership)
    Contains,
    /// `=~` - regex match
    RegexMatch,
    /// `!~` - regex no match
    RegexNoMatch,
}

impl CmpOp {
    /// Operator as display string.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Eq => "==",
            Self::Ne => "!=",
            Self::Lt => "<",
            Self::Le => "<=",
            Self::Gt => ">",
            Self::Ge => ">=",
            Self::StartsWith => "^=",
            Self::EndsWith => "$=",
            Self::Contains => "*=",
            Self::RegexMatch => "=~",
            Self::RegexNoMatch => "!~",
        }
    }

    pub fn is_regex_op(self) -> bool {
        matches!(self, Self::RegexMatch | Self::RegexNoMatch)
    }

    pub fn is_ordering(self) -> bool {
        matches!(self, Self::Lt | Self::Le | Self::Gt | Self::Ge)
    }
}

impl fmt::Display for CmpOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parsed predicate expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Literal(Value),
    /// Dotted attribute path, resolved against the candidate node.
    Path(Vec<String>),
    List(Vec<Expr>),
    Index {
        target: Box<Expr>,
        index: Box<Expr>,
    },
    Call {
        name: String,
        args: Vec<Expr>,
    },
    Not(Box<Expr>),
    And(Box<Expr>, Box<Expr>),
    Or(Box<Expr>, Box<Expr>),
    Compare {
        op: CmpOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
}

/// Fully parenthesized form; binary and unary nodes always print parens.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(value) => write!(f, "{value}"),
            Self::Path(segments) => f.write_str(&segments.join(".")),
            Self::List(items) => {
                f.write_str("[")?;
                write_comma_separated(f, items)?;
                f.write_str("]")
            }
            Self::Index { target, index } => write!(f, "{target}[{index}]"),
            Self::Call { name, args } => {
                write!(f, "{name}(")?;
                write_comma_separated(f, args)?;
                f.write_str(")")
            }
            Self::Not(inner) => write!(f, "(not {inner})"),
            Self::And(left, right) => write!(f, "({left} and {right})"),
            Self::Or(left, right) => write!(f, "({left} or {right})"),
            Self::Compare { op, left, right } => write!(f, "({left} {op} {right})"),
        }
    }
}

fn write_comma_separated(f: &mut fmt::Formatter<'_>, items: &[Expr]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn op_strings() {
        assert_eq!(CmpOp::Le.as_str(), "<=");
        assert_eq!(CmpOp::StartsWith.as_str(), "^=");
        assert_eq!(CmpOp::RegexNoMatch.to_string(), "!~");
    }

    #[test]
    fn op_classes() {
        assert!(CmpOp::RegexMatch.is_regex_op());
        assert!(!CmpOp::Contains.is_regex_op());
        assert!(CmpOp::Ge.is_ordering());
        assert!(!CmpOp::Eq.is_ordering());
    }
}
