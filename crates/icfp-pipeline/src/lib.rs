//! ICFP interpreter: orchestrates the full evaluation pipeline.
//!
//! ```text
//! wire text → Lexer → Parser → Evaluator → Output
//! ```
//!
//! Every stage failure is terminal for the program and is reported as a
//! structured [`IcfpError`] carrying an error code and, where one exists,
//! the offending token.

mod output;

pub use icfp_eval::Limits;
pub use icfp_types::{Diagnostics, ErrorCategory, ErrorCode, IcfpError, Span};
pub use output::Output;

use icfp_eval::Evaluator;
use icfp_lexer::{Lexer, TokenKind};
use icfp_parser::{BuildError, Parser};
use icfp_types::codec::{self, CodecError};
use icfp_types::SourceProgram;
use serde::Serialize;
use tracing::debug;

/// Program name used when the caller does not supply one.
pub const INLINE_PROGRAM: &str = "<inline>";

/// Outcome of running one program.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunResult {
    pub success: bool,
    /// The program's value when `success` is true.
    pub value: Option<Output>,
    pub errors: Diagnostics,
    /// Evaluation steps consumed (zero if evaluation never started).
    pub gas_used: u64,
}

/// Run a program with the default limits.
pub fn run(source: &str, name: &str) -> RunResult {
    run_with_limits(source, name, Limits::default())
}

/// Run a program: decode every token, build the tree, evaluate it.
#[tracing::instrument(level = "debug", skip(source, limits))]
pub fn run_with_limits(source: &str, name: &str, limits: Limits) -> RunResult {
    let program = SourceProgram::new(name, source);
    let mut evaluator = Evaluator::with_limits(limits);
    let outcome = evaluate_program(&program, &mut evaluator);
    let gas_used = evaluator.gas_used();

    match outcome {
        Ok(output) => RunResult {
            success: true,
            value: Some(output),
            errors: Diagnostics::empty(),
            gas_used,
        },
        Err(errors) => {
            debug!(errors = errors.total_errors, "program failed");
            RunResult {
                success: false,
                value: None,
                errors,
                gas_used,
            }
        }
    }
}

/// Run a program and render the [`RunResult`] as JSON.
pub fn run_json(source: &str, name: &str) -> String {
    let result = run(source, name);
    serde_json::to_string(&result).unwrap_or_else(|e| {
        format!(
            r#"{{"success":false,"value":null,"errors":{{"errors":[{{"message":"Serialization error: {}"}}],"total_errors":1}},"gas_used":0}}"#,
            e
        )
    })
}

/// Evaluate a program and return its value, or the first error.
pub fn evaluate_source(source: &str) -> Result<Output, IcfpError> {
    let result = run(source, INLINE_PROGRAM);
    match (result.value, result.errors.errors.into_iter().next()) {
        (Some(output), _) => Ok(output),
        (None, Some(error)) => Err(error),
        (None, None) => Err(IcfpError::new(
            INLINE_PROGRAM,
            ErrorCode::EMPTY_INPUT,
            "program produced no value",
        )),
    }
}

/// Decode a response body to the text a user would read.
pub fn decode_response(body: &str) -> Result<String, IcfpError> {
    evaluate_source(body).map(|output| output.to_string())
}

/// Encode a plain-text message as a request body (a single string token).
pub fn encode_message(message: &str) -> Result<String, CodecError> {
    Ok(format!("S{}", codec::encode_string(message)?))
}

/// Return the interpreter version string.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

// ══════════════════════════════════════════════════════════════════════════
// Stages
// ══════════════════════════════════════════════════════════════════════════

fn evaluate_program(program: &SourceProgram, evaluator: &mut Evaluator) -> Result<Output, Diagnostics> {
    let lexed = Lexer::new(program).lex();
    if lexed.errors.has_errors() {
        return Err(lexed.errors);
    }

    let (kinds, spans): (Vec<TokenKind>, Vec<Span>) =
        lexed.tokens.into_iter().map(|t| (t.kind, t.span)).unzip();

    let expr = Parser::new(&kinds)
        .parse_program()
        .map_err(|err| Diagnostics::single(build_error(program, &err, &spans)))?;
    debug!(tokens = kinds.len(), nodes = expr.node_count(), "built expression tree");

    let value = evaluator.evaluate(&expr).map_err(|err| {
        Diagnostics::single(IcfpError::new(&program.name, err.code(), err.to_string()))
    })?;

    Output::from_value(value).ok_or_else(|| {
        Diagnostics::single(IcfpError::new(
            &program.name,
            ErrorCode::TYPE_MISMATCH,
            "program reduced to an unevaluated expression",
        ))
    })
}

fn build_error(program: &SourceProgram, err: &BuildError, spans: &[Span]) -> IcfpError {
    let error = IcfpError::new(&program.name, err.code(), err.to_string());
    let located = err
        .parent_index()
        .and_then(|index| spans.get(index))
        .and_then(|span| Some((*span, program.text(*span)?)));
    match located {
        Some((span, text)) => error.at(span, text),
        None => error,
    }
}
