//! Runtime values.

use icfp_types::ast::{Expr, Literal};
use num_bigint::BigInt;
use std::fmt;

/// A value produced by evaluation.
///
/// `Deferred` is an expression that has not been reduced yet: a lambda
/// argument bound by name, or the result of looking one up. It borrows the
/// program tree, which outlives every evaluation of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value<'ast> {
    Bool(bool),
    Int(BigInt),
    Str(String),
    Deferred(&'ast Expr),
}

impl<'ast> Value<'ast> {
    /// Kind name used in type mismatch messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Bool(_) => "boolean",
            Self::Int(_) => "integer",
            Self::Str(_) => "string",
            Self::Deferred(_) => "unevaluated expression",
        }
    }

    pub fn is_deferred(&self) -> bool {
        matches!(self, Self::Deferred(_))
    }

    /// The lambda this value defers, if it is exactly a lambda literal.
    pub(crate) fn as_lambda(&self) -> Option<&'ast Expr> {
        match self {
            Self::Deferred(expr @ Expr::Lambda { .. }) => Some(*expr),
            _ => None,
        }
    }
}

impl From<&Literal> for Value<'_> {
    fn from(literal: &Literal) -> Self {
        match literal {
            Literal::Bool(b) => Self::Bool(*b),
            Literal::Int(n) => Self::Int(n.clone()),
            Literal::Str(s) => Self::Str(s.clone()),
        }
    }
}

impl From<bool> for Value<'_> {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for Value<'_> {
    fn from(n: i64) -> Self {
        Self::Int(BigInt::from(n))
    }
}

impl From<&str> for Value<'_> {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl fmt::Display for Value<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(n) => write!(f, "{n}"),
            Self::Str(s) => f.write_str(s),
            Self::Deferred(_) => f.write_str("<unevaluated expression>"),
        }
    }
}
