//! Core parser: token cursor and prefix-notation tree building.

use icfp_lexer::TokenKind;
use icfp_types::ast::Expr;
use icfp_types::{ensure_sufficient_stack, ErrorCode};
use thiserror::Error;
use tracing::warn;

/// Errors raised while building an expression tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    /// No tokens at all.
    #[error("empty input: expected an expression")]
    EmptyInput,

    /// The stream ended while an operator still needed sub-expressions.
    #[error("empty input: {parent} at token {parent_index} is missing an operand at token {index}")]
    Truncated {
        parent: String,
        parent_index: usize,
        index: usize,
    },
}

impl BuildError {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::EmptyInput => ErrorCode::EMPTY_INPUT,
            Self::Truncated { .. } => ErrorCode::TRUNCATED_INPUT,
        }
    }

    /// Token position the error refers to, if any.
    pub fn parent_index(&self) -> Option<usize> {
        match self {
            Self::EmptyInput => None,
            Self::Truncated { parent_index, .. } => Some(*parent_index),
        }
    }
}

/// The ICFP parser.
///
/// An explicit cursor over an immutable token slice. Each call to
/// [`Parser::parse_expr`] consumes exactly one expression, depth-first,
/// and leaves the cursor on the first unconsumed token.
pub struct Parser<'t> {
    tokens: &'t [TokenKind],
    pos: usize,
}

impl<'t> Parser<'t> {
    pub fn new(tokens: &'t [TokenKind]) -> Self {
        Self { tokens, pos: 0 }
    }

    // ── Token Cursor ──────────────────────────────────────────────────────────

    /// Current position (number of tokens consumed).
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Tokens not yet consumed.
    pub fn remaining(&self) -> &'t [TokenKind] {
        &self.tokens[self.pos..]
    }

    pub fn at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    fn advance(&mut self) -> Option<&'t TokenKind> {
        let token = self.tokens.get(self.pos)?;
        self.pos += 1;
        Some(token)
    }

    // ── Expressions ───────────────────────────────────────────────────────────

    /// Build one expression starting at the cursor.
    pub fn parse_expr(&mut self) -> Result<Expr, BuildError> {
        let index = self.pos;
        let token = self.advance().ok_or(BuildError::EmptyInput)?;
        self.parse_node(token, index)
    }

    /// Build a whole program: one expression. Trailing tokens are ignored.
    pub fn parse_program(mut self) -> Result<Expr, BuildError> {
        let expr = self.parse_expr()?;
        if !self.at_end() {
            warn!(
                consumed = self.pos,
                trailing = self.remaining().len(),
                "ignoring tokens after the end of the program"
            );
        }
        Ok(expr)
    }

    fn parse_node(&mut self, token: &'t TokenKind, index: usize) -> Result<Expr, BuildError> {
        ensure_sufficient_stack(|| match token {
            TokenKind::Value(literal) => Ok(Expr::Literal(literal.clone())),
            TokenKind::Variable(id) => Ok(Expr::Variable(*id)),
            TokenKind::Unary(op) => {
                let operand = self.parse_operand(token, index)?;
                Ok(Expr::unary(*op, operand))
            }
            TokenKind::Binary(op) => {
                let left = self.parse_operand(token, index)?;
                let right = self.parse_operand(token, index)?;
                Ok(Expr::binary(*op, left, right))
            }
            TokenKind::Lambda(param) => {
                let body = self.parse_operand(token, index)?;
                Ok(Expr::Lambda {
                    param: *param,
                    body: Box::new(body),
                })
            }
            TokenKind::If => {
                let condition = self.parse_operand(token, index)?;
                let then_branch = self.parse_operand(token, index)?;
                let else_branch = self.parse_operand(token, index)?;
                Ok(Expr::if_then_else(condition, then_branch, else_branch))
            }
        })
    }

    /// Build the next sub-expression of `parent`.
    fn parse_operand(&mut self, parent: &TokenKind, parent_index: usize) -> Result<Expr, BuildError> {
        let index = self.pos;
        match self.advance() {
            Some(token) => self.parse_node(token, index),
            None => Err(BuildError::Truncated {
                parent: parent.to_string(),
                parent_index,
                index,
            }),
        }
    }
}

/// Build one expression from the front of `tokens`.
pub fn build_ast(tokens: &[TokenKind]) -> Result<Expr, BuildError> {
    Parser::new(tokens).parse_expr()
}
