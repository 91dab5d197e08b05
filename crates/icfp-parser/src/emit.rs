//! AST → token stream, the inverse of parsing.
//!
//! Lets callers assemble programs as trees and send them as wire text.

use icfp_lexer::{EncodeError, TokenKind};
use icfp_types::ast::Expr;

/// Flatten an expression into prefix-order tokens.
pub fn to_tokens(expr: &Expr) -> Vec<TokenKind> {
    let mut tokens = Vec::with_capacity(expr.node_count());
    let mut pending = vec![expr];
    while let Some(expr) = pending.pop() {
        match expr {
            Expr::Literal(literal) => tokens.push(TokenKind::Value(literal.clone())),
            Expr::Variable(id) => tokens.push(TokenKind::Variable(*id)),
            Expr::Unary { op, operand } => {
                tokens.push(TokenKind::Unary(*op));
                pending.push(operand);
            }
            Expr::Binary { op, left, right } => {
                tokens.push(TokenKind::Binary(*op));
                pending.push(right);
                pending.push(left);
            }
            Expr::Lambda { param, body } => {
                tokens.push(TokenKind::Lambda(*param));
                pending.push(body);
            }
            Expr::If {
                condition,
                then_branch,
                else_branch,
            } => {
                tokens.push(TokenKind::If);
                pending.push(else_branch);
                pending.push(then_branch);
                pending.push(condition);
            }
        }
    }
    tokens
}

/// Render an expression as space-separated wire tokens.
pub fn to_wire(expr: &Expr) -> Result<String, EncodeError> {
    let wire = to_tokens(expr)
        .iter()
        .map(TokenKind::to_wire)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(wire.join(" "))
}
