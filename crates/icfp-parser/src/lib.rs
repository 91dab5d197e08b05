//! ICFP parser: builds an expression tree from a prefix token stream.

mod emit;
mod parser;

pub use emit::{to_tokens, to_wire};
pub use parser::{build_ast, BuildError, Parser};
