//! ICFP tree-walking evaluator.
//!
//! Reduces an expression tree to a boolean, integer, or string. Lambda
//! arguments are passed by name: `B$` pushes its unevaluated right operand
//! onto an argument stack, and the lambda it reaches pops that operand and
//! binds it, still unevaluated, in a copied environment.

mod env;
mod error;
mod evaluator;
mod value;

pub use env::{ArgStack, Environment};
pub use error::{EvalError, EvalResult};
pub use evaluator::{Evaluator, Limits, DEFAULT_GAS_LIMIT};
pub use value::Value;
