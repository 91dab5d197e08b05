//! ICFP lexer: decodes wire tokens into a typed token stream.

pub mod lexer;
pub mod token;

pub use lexer::{parse_token, DecodeError, LexResult, Lexer};
pub use token::{EncodeError, Token, TokenKind};
