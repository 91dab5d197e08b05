use crate::Span;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum number of errors stored before further ones are only counted.
pub const MAX_ERRORS: usize = 20;

/// Error category, determined by error code range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorCategory {
    Decode,
    Build,
    Eval,
}

/// Numeric error code (E100–E399).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ErrorCode(pub u16);

impl ErrorCode {
    // ── Decode errors (E100–E199) ──
    pub const UNHANDLED_INDICATOR: Self = Self(100);
    pub const UNRECOGNIZED_OPERATOR: Self = Self(101);
    pub const MALFORMED_BODY: Self = Self(102);
    pub const EMPTY_TOKEN: Self = Self(103);
    pub const ID_OUT_OF_RANGE: Self = Self(104);

    // ── Build errors (E200–E299) ──
    pub const EMPTY_INPUT: Self = Self(200);
    pub const TRUNCATED_INPUT: Self = Self(201);

    // ── Eval errors (E300–E399) ──
    pub const UNBOUND_VARIABLE: Self = Self(300);
    pub const TYPE_MISMATCH: Self = Self(301);
    pub const STACK_UNDERFLOW: Self = Self(302);
    pub const DIVISION_BY_ZERO: Self = Self(303);
    pub const GAS_EXHAUSTED: Self = Self(304);
    pub const CONVERSION_FAILED: Self = Self(305);

    /// Get the category for this error code.
    pub fn category(self) -> ErrorCategory {
        match self.0 {
            100..=199 => ErrorCategory::Decode,
            200..=299 => ErrorCategory::Build,
            _ => ErrorCategory::Eval,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{}", self.0)
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Decode => write!(f, "decode"),
            Self::Build => write!(f, "build"),
            Self::Eval => write!(f, "eval"),
        }
    }
}

/// A structured error from any pipeline stage.
///
/// Callers present these to users; they must not parse the message text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IcfpError {
    /// Program name.
    pub program: String,
    pub code: ErrorCode,
    /// Category (derived from code).
    pub category: ErrorCategory,
    pub message: String,
    /// Offending token, when the error has one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub span: Option<Span>,
    /// Raw text of the offending token.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl IcfpError {
    /// Create a new error without a location.
    pub fn new(program: impl Into<String>, code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            code,
            category: code.category(),
            message: message.into(),
            span: None,
            token: None,
        }
    }

    /// Attach the offending token.
    pub fn at(mut self, span: Span, token: impl Into<String>) -> Self {
        self.span = Some(span);
        self.token = Some(token.into());
        self
    }
}

impl fmt::Display for IcfpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.span, &self.token) {
            (Some(span), Some(token)) => write!(
                f,
                "{}: {} {:?}: {} [{}] {}",
                self.program, span, token, self.code, self.category, self.message
            ),
            _ => write!(
                f,
                "{}: {} [{}] {}",
                self.program, self.code, self.category, self.message
            ),
        }
    }
}

impl std::error::Error for IcfpError {}

/// Errors collected while processing one program.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostics {
    pub errors: Vec<IcfpError>,
    pub total_errors: usize,
}

impl Diagnostics {
    /// Create an empty collection.
    pub fn empty() -> Self {
        Self {
            errors: Vec::new(),
            total_errors: 0,
        }
    }

    /// Collection holding exactly one error.
    pub fn single(error: IcfpError) -> Self {
        let mut diagnostics = Self::empty();
        diagnostics.push_error(error);
        diagnostics
    }

    pub fn has_errors(&self) -> bool {
        self.total_errors > 0
    }

    /// Add an error, respecting the MAX_ERRORS limit.
    pub fn push_error(&mut self, error: IcfpError) {
        if self.errors.len() < MAX_ERRORS {
            self.errors.push(error);
        }
        self.total_errors += 1;
    }

    pub fn first(&self) -> Option<&IcfpError> {
        self.errors.first()
    }
}

impl Default for Diagnostics {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.errors.first() {
            None => write!(f, "no errors"),
            Some(first) if self.total_errors == 1 => write!(f, "{first}"),
            Some(first) => write!(f, "{first} (and {} more)", self.total_errors - 1),
        }
    }
}

impl std::error::Error for Diagnostics {}
