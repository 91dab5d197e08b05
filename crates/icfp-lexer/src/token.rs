//! Token types for the ICFP lexer.
//!
//! Defines [`TokenKind`], one variant per indicator character, and
//! [`Token`], which pairs a kind with its [`Span`] in the program text.
//! Tokens can be turned back into wire text with [`TokenKind::to_wire`].

use icfp_types::ast::{BinaryOp, Literal, UnaryOp, VarId};
use icfp_types::codec::{self, CodecError};
use icfp_types::Span;
use num_bigint::BigUint;
use std::fmt;
use thiserror::Error;

// ─────────────────────────────────────────────────────────────────────
// Indicators
// ─────────────────────────────────────────────────────────────────────

pub const TRUE: char = 'T';
pub const FALSE: char = 'F';
pub const INTEGER: char = 'I';
pub const STRING: char = 'S';
pub const UNARY: char = 'U';
pub const BINARY: char = 'B';
pub const IF: char = '?';
pub const LAMBDA: char = 'L';
pub const VARIABLE: char = 'v';

/// Every indicator the decoder accepts.
pub const ALL_INDICATORS: [char; 9] = [
    TRUE, FALSE, INTEGER, STRING, UNARY, BINARY, IF, LAMBDA, VARIABLE,
];

// ─────────────────────────────────────────────────────────────────────
// Token
// ─────────────────────────────────────────────────────────────────────

/// A single decoded token.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }
}

// ─────────────────────────────────────────────────────────────────────
// TokenKind
// ─────────────────────────────────────────────────────────────────────

/// Every token kind in the language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    /// `T`, `F`, `I<int>`, `S<string>`
    Value(Literal),
    /// `U<op>`
    Unary(UnaryOp),
    /// `B<op>`
    Binary(BinaryOp),
    /// `?`
    If,
    /// `L<id>`
    Lambda(VarId),
    /// `v<id>`
    Variable(VarId),
}

/// Errors raised while rendering a token back to wire text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    /// Negative literals have no wire form; programs build them with `U-`.
    #[error("negative integer {0} has no wire encoding")]
    NegativeInteger(String),

    #[error(transparent)]
    Codec(#[from] CodecError),
}

impl TokenKind {
    /// The indicator character this token starts with.
    pub fn indicator(&self) -> char {
        match self {
            Self::Value(Literal::Bool(true)) => TRUE,
            Self::Value(Literal::Bool(false)) => FALSE,
            Self::Value(Literal::Int(_)) => INTEGER,
            Self::Value(Literal::Str(_)) => STRING,
            Self::Unary(_) => UNARY,
            Self::Binary(_) => BINARY,
            Self::If => IF,
            Self::Lambda(_) => LAMBDA,
            Self::Variable(_) => VARIABLE,
        }
    }

    /// Number of sub-expressions that follow this token in prefix order.
    pub fn arity(&self) -> usize {
        match self {
            Self::Value(_) | Self::Variable(_) => 0,
            Self::Unary(_) | Self::Lambda(_) => 1,
            Self::Binary(_) => 2,
            Self::If => 3,
        }
    }

    /// Render the exact wire text for this token.
    pub fn to_wire(&self) -> Result<String, EncodeError> {
        let body = match self {
            Self::Value(Literal::Bool(_)) | Self::If => String::new(),
            Self::Value(Literal::Int(n)) => {
                let magnitude = n
                    .to_biguint()
                    .ok_or_else(|| EncodeError::NegativeInteger(n.to_string()))?;
                codec::encode_integer_be(&magnitude)
            }
            Self::Value(Literal::Str(s)) => codec::encode_string(s)?,
            Self::Unary(op) => op.symbol().to_string(),
            Self::Binary(op) => op.symbol().to_string(),
            Self::Lambda(id) | Self::Variable(id) => codec::encode_integer_be(&BigUint::from(id.0)),
        };
        let mut wire = String::with_capacity(body.len() + 1);
        wire.push(self.indicator());
        wire.push_str(&body);
        Ok(wire)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(Literal::Bool(b)) => write!(f, "{b}"),
            Self::Value(Literal::Int(n)) => write!(f, "{n}"),
            Self::Value(Literal::Str(s)) => write!(f, "{s:?}"),
            Self::Unary(op) => write!(f, "unary {op}"),
            Self::Binary(op) => write!(f, "binary {op}"),
            Self::If => write!(f, "if"),
            Self::Lambda(id) => write!(f, "lambda {id}"),
            Self::Variable(id) => write!(f, "{id}"),
        }
    }
}
