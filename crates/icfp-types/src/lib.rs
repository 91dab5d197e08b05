//! Shared types for the ICFP interpreter.
//!
//! This crate defines the AST node types, the base-94 wire codec, token
//! spans, structured error types, and the stack-growth helper used by every
//! recursive stage of the pipeline.

mod error;
mod span;
mod stack;
pub mod ast;
pub mod codec;

pub use error::{Diagnostics, ErrorCategory, ErrorCode, IcfpError, MAX_ERRORS};
pub use span::{SourceProgram, Span};
pub use stack::ensure_sufficient_stack;
