//! Token decoder: converts wire text to typed tokens.
//!
//! [`parse_token`] decodes one raw token. [`Lexer`] splits a whole program
//! on whitespace, decodes every token, and collects up to
//! [`icfp_types::MAX_ERRORS`] errors instead of stopping at the first.

use icfp_types::ast::{BinaryOp, Literal, UnaryOp, VarId};
use icfp_types::codec::{self, CodecError};
use icfp_types::{Diagnostics, ErrorCode, IcfpError, SourceProgram, Span, MAX_ERRORS};
use num_bigint::{BigInt, BigUint};
use num_traits::ToPrimitive;
use thiserror::Error;
use tracing::{debug, trace};

use crate::token::{self, Token, TokenKind};

/// Errors raised while decoding a single token.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("empty token")]
    EmptyToken,

    #[error("unhandled indicator {0:?}")]
    UnhandledIndicator(char),

    /// The operator symbol is missing or not in the operator table.
    #[error("unrecognized {kind} operator {symbol:?}")]
    UnrecognizedOperator {
        kind: &'static str,
        symbol: Option<char>,
    },

    #[error("malformed body for indicator {indicator:?}: {source}")]
    MalformedBody {
        indicator: char,
        #[source]
        source: CodecError,
    },

    #[error("variable id {id} does not fit in 64 bits")]
    IdOutOfRange { id: BigUint },
}

impl DecodeError {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::EmptyToken => ErrorCode::EMPTY_TOKEN,
            Self::UnhandledIndicator(_) => ErrorCode::UNHANDLED_INDICATOR,
            Self::UnrecognizedOperator { .. } => ErrorCode::UNRECOGNIZED_OPERATOR,
            Self::MalformedBody { .. } => ErrorCode::MALFORMED_BODY,
            Self::IdOutOfRange { .. } => ErrorCode::ID_OUT_OF_RANGE,
        }
    }
}

// ─────────────────────────────────────────────────────────────
// Single-token decoding
// ─────────────────────────────────────────────────────────────

/// Decode one raw token. Never looks past `raw`.
pub fn parse_token(raw: &str) -> Result<TokenKind, DecodeError> {
    let mut chars = raw.chars();
    let indicator = chars.next().ok_or(DecodeError::EmptyToken)?;
    let body = chars.as_str();

    let kind = match indicator {
        token::TRUE => TokenKind::Value(Literal::Bool(true)),
        token::FALSE => TokenKind::Value(Literal::Bool(false)),
        token::INTEGER => {
            let n = integer_body(indicator, body)?;
            TokenKind::Value(Literal::Int(BigInt::from(n)))
        }
        token::STRING => {
            let s = codec::decode_string(body)
                .map_err(|source| DecodeError::MalformedBody { indicator, source })?;
            TokenKind::Value(Literal::Str(s))
        }
        token::UNARY => {
            let symbol = body.chars().next();
            let op = symbol
                .and_then(UnaryOp::from_symbol)
                .ok_or(DecodeError::UnrecognizedOperator {
                    kind: "unary",
                    symbol,
                })?;
            TokenKind::Unary(op)
        }
        token::BINARY => {
            let symbol = body.chars().next();
            let op = symbol
                .and_then(BinaryOp::from_symbol)
                .ok_or(DecodeError::UnrecognizedOperator {
                    kind: "binary",
                    symbol,
                })?;
            TokenKind::Binary(op)
        }
        token::IF => TokenKind::If,
        token::LAMBDA => TokenKind::Lambda(var_id(indicator, body)?),
        token::VARIABLE => TokenKind::Variable(var_id(indicator, body)?),
        other => return Err(DecodeError::UnhandledIndicator(other)),
    };

    trace!(raw, kind = %kind, "decoded token");
    Ok(kind)
}

fn integer_body(indicator: char, body: &str) -> Result<BigUint, DecodeError> {
    codec::decode_integer(body).map_err(|source| DecodeError::MalformedBody { indicator, source })
}

fn var_id(indicator: char, body: &str) -> Result<VarId, DecodeError> {
    let id = integer_body(indicator, body)?;
    id.to_u64()
        .map(VarId)
        .ok_or(DecodeError::IdOutOfRange { id })
}

// ─────────────────────────────────────────────────────────────
// Program-level lexing
// ─────────────────────────────────────────────────────────────

/// Result of lexing: tokens + any errors collected.
pub struct LexResult {
    /// Successfully decoded tokens, in program order.
    pub tokens: Vec<Token>,
    pub errors: Diagnostics,
}

/// Decodes every token of a program.
pub struct Lexer<'src> {
    program: &'src SourceProgram,
    errors: Diagnostics,
}

impl<'src> Lexer<'src> {
    pub fn new(program: &'src SourceProgram) -> Self {
        Self {
            program,
            errors: Diagnostics::empty(),
        }
    }

    /// Lex the whole program.
    pub fn lex(mut self) -> LexResult {
        let raw_tokens = self.program.tokens();
        let mut tokens = Vec::with_capacity(raw_tokens.len());

        for (span, raw) in raw_tokens {
            if self.errors.total_errors >= MAX_ERRORS {
                break;
            }
            match parse_token(raw) {
                Ok(kind) => tokens.push(Token::new(kind, span)),
                Err(err) => self.emit_error(&err, span, raw),
            }
        }

        debug!(
            program = %self.program.name,
            tokens = tokens.len(),
            errors = self.errors.total_errors,
            "lexed program"
        );

        LexResult {
            tokens,
            errors: self.errors,
        }
    }

    fn emit_error(&mut self, err: &DecodeError, span: Span, raw: &str) {
        let error = IcfpError::new(&self.program.name, err.code(), err.to_string()).at(span, raw);
        self.errors.push_error(error);
    }
}
