//! Tree-walking evaluator for ICFP expressions.
//!
//! Application is call-by-name. `B$` pushes its right operand, unevaluated,
//! onto the argument stack and evaluates its left operand; a lambda pops the
//! top argument and binds it, still unevaluated, in a copy of the
//! environment. Deferred values are forced only where an operator needs a
//! scalar.

use crate::env::{ArgStack, Environment};
use crate::error::{EvalError, EvalResult};
use crate::value::Value;
use icfp_types::ast::{BinaryOp, Expr, UnaryOp};
use icfp_types::codec;
use icfp_types::ensure_sufficient_stack;
use num_bigint::BigInt;
use num_traits::{Signed, ToPrimitive, Zero};
use serde::Deserialize;
use tracing::{debug, trace};

/// Default step budget for one evaluator.
pub const DEFAULT_GAS_LIMIT: u64 = 100_000_000;

/// Resource limits for an evaluator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Limits {
    /// Maximum number of node evaluations.
    pub gas_limit: u64,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            gas_limit: DEFAULT_GAS_LIMIT,
        }
    }
}

/// The ICFP evaluator.
///
/// Gas accumulates across calls on the same evaluator; build a fresh one per
/// program to give each its own budget.
#[derive(Debug, Clone)]
pub struct Evaluator {
    gas: u64,
    limits: Limits,
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::with_limits(Limits::default())
    }
}

impl Evaluator {
    /// Create a new evaluator with the given gas limit.
    pub fn new(gas_limit: u64) -> Self {
        Self::with_limits(Limits { gas_limit })
    }

    pub fn with_limits(limits: Limits) -> Self {
        Self { gas: 0, limits }
    }

    /// Gas consumed so far.
    pub fn gas_used(&self) -> u64 {
        self.gas
    }

    pub fn limits(&self) -> Limits {
        self.limits
    }

    /// Consume one unit of gas. Returns error if exhausted.
    fn tick(&mut self) -> EvalResult<()> {
        self.gas += 1;
        if self.gas > self.limits.gas_limit {
            Err(EvalError::GasExhausted)
        } else {
            Ok(())
        }
    }

    // ══════════════════════════════════════════════════════════════════════
    // Entry points
    // ══════════════════════════════════════════════════════════════════════

    /// Evaluate a whole program to a scalar: empty environment, empty
    /// argument stack, result forced.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn evaluate<'ast>(&mut self, expr: &'ast Expr) -> EvalResult<Value<'ast>> {
        let env = Environment::new();
        let stack = ArgStack::new();
        let value = self.eval_expr(expr, &env, &stack)?;
        let value = self.force(value, &env, &stack)?;
        debug!(gas = self.gas, "evaluation finished");
        Ok(value)
    }

    /// Evaluate one node. The result may still be [`Value::Deferred`].
    pub fn eval_expr<'ast>(
        &mut self,
        expr: &'ast Expr,
        env: &Environment<'ast>,
        stack: &ArgStack<'ast>,
    ) -> EvalResult<Value<'ast>> {
        ensure_sufficient_stack(|| self.eval_node(expr, env, stack))
    }

    /// Reduce deferred values until a scalar remains.
    pub fn force<'ast>(
        &mut self,
        mut value: Value<'ast>,
        env: &Environment<'ast>,
        stack: &ArgStack<'ast>,
    ) -> EvalResult<Value<'ast>> {
        while let Value::Deferred(expr) = value {
            value = self.eval_expr(expr, env, stack)?;
        }
        Ok(value)
    }

    fn eval_forced<'ast>(
        &mut self,
        expr: &'ast Expr,
        env: &Environment<'ast>,
        stack: &ArgStack<'ast>,
    ) -> EvalResult<Value<'ast>> {
        let value = self.eval_expr(expr, env, stack)?;
        self.force(value, env, stack)
    }

    fn eval_node<'ast>(
        &mut self,
        expr: &'ast Expr,
        env: &Environment<'ast>,
        stack: &ArgStack<'ast>,
    ) -> EvalResult<Value<'ast>> {
        self.tick()?;
        match expr {
            Expr::Literal(literal) => Ok(Value::from(literal)),

            Expr::Variable(id) => {
                let value = env.get(*id).ok_or(EvalError::UnboundVariable(*id))?;
                match value.as_lambda() {
                    Some(lambda) => self.eval_expr(lambda, env, stack),
                    None => Ok(value.clone()),
                }
            }

            Expr::Unary { op, operand } => {
                let value = self.eval_forced(operand, env, stack)?;
                eval_unary(*op, value)
            }

            Expr::Binary {
                op: BinaryOp::Apply,
                left,
                right,
            } => {
                let extended = stack.push(right);
                let result = self.eval_expr(left, env, &extended)?;
                self.force(result, env, stack)
            }

            Expr::Binary { op, left, right } => {
                let lhs = self.eval_forced(left, env, stack)?;
                let rhs = self.eval_forced(right, env, stack)?;
                eval_binary(*op, lhs, rhs)
            }

            Expr::Lambda { param, body } => {
                let (arg, rest) = stack.pop().ok_or(EvalError::StackUnderflow(*param))?;
                trace!(param = %param, pending = rest.len(), "enter lambda");
                let env = env.bind(*param, Value::Deferred(arg));
                self.eval_expr(body, &env, &rest)
            }

            Expr::If {
                condition,
                then_branch,
                else_branch,
            } => match self.eval_forced(condition, env, stack)? {
                Value::Bool(true) => self.eval_expr(then_branch, env, stack),
                Value::Bool(false) => self.eval_expr(else_branch, env, stack),
                other => Err(EvalError::TypeMismatch {
                    op: "if",
                    expected: "boolean condition",
                    found: other.kind_name().to_string(),
                }),
            },
        }
    }
}

// ══════════════════════════════════════════════════════════════════════════
// Operators
// ══════════════════════════════════════════════════════════════════════════

fn eval_unary(op: UnaryOp, value: Value<'_>) -> EvalResult<Value<'_>> {
    match (op, value) {
        (UnaryOp::Negate, Value::Int(n)) => Ok(Value::Int(-n)),
        (UnaryOp::Not, Value::Bool(b)) => Ok(Value::Bool(!b)),
        (UnaryOp::StrToInt, Value::Str(s)) => {
            let digits = codec::encode_string(&s)?;
            Ok(Value::Int(BigInt::from(codec::decode_integer(&digits)?)))
        }
        (UnaryOp::IntToStr, Value::Int(n)) => {
            // Negative integers have no base-94 form and yield "".
            let magnitude = n.to_biguint().unwrap_or_default();
            let digits = codec::encode_integer_be(&magnitude);
            Ok(Value::Str(codec::decode_string(&digits)?))
        }
        (op, other) => Err(EvalError::TypeMismatch {
            op: op.name(),
            expected: op.expected_operand(),
            found: other.kind_name().to_string(),
        }),
    }
}

fn eval_binary<'ast>(op: BinaryOp, lhs: Value<'ast>, rhs: Value<'ast>) -> EvalResult<Value<'ast>> {
    use Value::{Bool, Int, Str};

    let value = match (op, lhs, rhs) {
        (BinaryOp::Add, Int(a), Int(b)) => Int(a + b),
        (BinaryOp::Sub, Int(a), Int(b)) => Int(a - b),
        (BinaryOp::Mul, Int(a), Int(b)) => Int(a * b),
        (BinaryOp::Div | BinaryOp::Mod, Int(_), Int(b)) if b.is_zero() => {
            return Err(EvalError::DivisionByZero)
        }
        // BigInt division truncates toward zero; the remainder takes the
        // dividend's sign.
        (BinaryOp::Div, Int(a), Int(b)) => Int(a / b),
        (BinaryOp::Mod, Int(a), Int(b)) => Int(a % b),
        (BinaryOp::Lt, Int(a), Int(b)) => Bool(a < b),
        (BinaryOp::Gt, Int(a), Int(b)) => Bool(a > b),
        (BinaryOp::Eq, Int(a), Int(b)) => Bool(a == b),
        (BinaryOp::Eq, Bool(a), Bool(b)) => Bool(a == b),
        (BinaryOp::Eq, Str(a), Str(b)) => Bool(a == b),
        (BinaryOp::Or, Bool(a), Bool(b)) => Bool(a || b),
        (BinaryOp::And, Bool(a), Bool(b)) => Bool(a && b),
        (BinaryOp::Concat, Str(a), Str(b)) => Str(a + &b),
        (BinaryOp::Take, Int(n), Str(s)) => {
            let end = slice_index(&n, s.chars().count());
            Str(s.chars().take(end).collect())
        }
        (BinaryOp::Drop, Int(n), Str(s)) => {
            let start = slice_index(&n, s.chars().count());
            Str(s.chars().skip(start).collect())
        }
        (op, lhs, rhs) => {
            return Err(EvalError::TypeMismatch {
                op: op.name(),
                expected: op.expected_operands(),
                found: format!("{} and {}", lhs.kind_name(), rhs.kind_name()),
            })
        }
    };
    Ok(value)
}

/// Resolve a signed slice bound against a text of `len` characters.
///
/// Negative bounds count from the end; bounds past either end saturate.
fn slice_index(n: &BigInt, len: usize) -> usize {
    let magnitude = n.magnitude().to_usize().unwrap_or(usize::MAX).min(len);
    if n.is_negative() {
        len - magnitude
    } else {
        magnitude
    }
}
