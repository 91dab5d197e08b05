//! Runtime error types for the evaluator.

use icfp_types::ast::VarId;
use icfp_types::codec::CodecError;
use icfp_types::ErrorCode;
use thiserror::Error;

/// Evaluation error. Every variant aborts the whole evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    #[error("unbound variable: {0}")]
    UnboundVariable(VarId),

    /// An operator got operands of the wrong kind.
    #[error("type mismatch: {op} expected {expected}, found {found}")]
    TypeMismatch {
        op: &'static str,
        expected: &'static str,
        found: String,
    },

    /// A lambda was entered with no pending argument.
    #[error("stack underflow: lambda {0} has no argument to bind")]
    StackUnderflow(VarId),

    #[error("division by zero")]
    DivisionByZero,

    /// A string/integer conversion met a character outside the alphabet.
    #[error("conversion failed: {0}")]
    Codec(#[from] CodecError),

    #[error("gas exhausted")]
    GasExhausted,
}

impl EvalError {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::UnboundVariable(_) => ErrorCode::UNBOUND_VARIABLE,
            Self::TypeMismatch { .. } => ErrorCode::TYPE_MISMATCH,
            Self::StackUnderflow(_) => ErrorCode::STACK_UNDERFLOW,
            Self::DivisionByZero => ErrorCode::DIVISION_BY_ZERO,
            Self::Codec(_) => ErrorCode::CONVERSION_FAILED,
            Self::GasExhausted => ErrorCode::GAS_EXHAUSTED,
        }
    }
}

/// Result alias for evaluator operations.
pub type EvalResult<T> = Result<T, EvalError>;
