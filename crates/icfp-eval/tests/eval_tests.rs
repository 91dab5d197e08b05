//! Evaluator tests: operators, call-by-name application, shadowing,
//! runtime failures, and gas metering.

use icfp_eval::{EvalError, Evaluator, Value};
use icfp_lexer::parse_token;
use icfp_parser::build_ast;
use icfp_types::ast::{BinaryOp, Expr, UnaryOp, VarId};
use icfp_types::codec::CodecError;
use icfp_types::ErrorCode;
use num_bigint::BigInt;

// ─────────────────────────────────────────────────────────────────────
// Helpers
// ─────────────────────────────────────────────────────────────────────

fn parse(source: &str) -> Expr {
    let tokens: Vec<_> = source
        .split_whitespace()
        .map(|raw| parse_token(raw).expect("valid token"))
        .collect();
    build_ast(&tokens).expect("valid program")
}

fn eval(expr: &Expr) -> Result<Value<'_>, EvalError> {
    Evaluator::default().evaluate(expr)
}

/// Evaluate wire text and render the result.
fn run(source: &str) -> String {
    let expr = parse(source);
    match eval(&expr) {
        Ok(value) => value.to_string(),
        Err(err) => panic!("{source}: {err}"),
    }
}

fn run_err(source: &str) -> EvalError {
    let expr = parse(source);
    eval(&expr).expect_err("evaluation should fail")
}

// ─────────────────────────────────────────────────────────────────────
// Literals and conditionals
// ─────────────────────────────────────────────────────────────────────

#[test]
fn test_literals() {
    assert_eq!(run("T"), "true");
    assert_eq!(run("I/6"), "1337");
    assert_eq!(run("SB%,,/}Q/2,$_"), "Hello World!");
}

#[test]
fn test_if_selects_branch() {
    let pick = |cond: bool| {
        Expr::if_then_else(Expr::bool(cond), Expr::int(42), Expr::int(1337))
    };
    assert_eq!(eval(&pick(true)), Ok(Value::from(42)));
    assert_eq!(eval(&pick(false)), Ok(Value::from(1337)));
    assert_eq!(run("? B> I# I$ S9%3 S./"), "no");
}

#[test]
fn test_if_never_touches_other_branch() {
    assert_eq!(run("? T I\" B/ I\" I!"), "1");
    assert_eq!(run("? F v! I#"), "2");
}

// ─────────────────────────────────────────────────────────────────────
// Unary operators
// ─────────────────────────────────────────────────────────────────────

#[test]
fn test_unary_operators() {
    assert_eq!(run("U- I$"), "-3");
    assert_eq!(run("U! T"), "false");
    assert_eq!(run("U# S4%34"), "15818151");
    assert_eq!(run("U$ I4%34"), "test");
}

#[test]
fn test_int_to_string_of_zero_is_empty() {
    assert_eq!(run("U$ I!"), "");
}

#[test]
fn test_string_int_conversions_invert() {
    assert_eq!(run("U$ U# S4%34"), "test");
    assert_eq!(run("U# U$ I/6"), "1337");
}

#[test]
fn test_string_to_int_rejects_unencodable_text() {
    let expr = Expr::unary(UnaryOp::StrToInt, Expr::str("tab\there"));
    let err = eval(&expr).unwrap_err();
    assert_eq!(
        err,
        EvalError::Codec(CodecError::NotInAlphabet {
            ch: '\t',
            position: 3,
        })
    );
    assert_eq!(err.code(), ErrorCode::CONVERSION_FAILED);
}

// ─────────────────────────────────────────────────────────────────────
// Binary operators
// ─────────────────────────────────────────────────────────────────────

#[test]
fn test_arithmetic() {
    assert_eq!(run("B+ I# I$"), "5");
    assert_eq!(run("B- I$ I#"), "1");
    assert_eq!(run("B* I$ I#"), "6");
    assert_eq!(run("B/ I( I#"), "3");
    assert_eq!(run("B% I( I#"), "1");
}

#[test]
fn test_division_truncates_toward_zero() {
    assert_eq!(run("B/ U- I( I#"), "-3");
    assert_eq!(run("B% U- I( I#"), "-1");
    assert_eq!(run("B/ I( U- I#"), "-3");
    assert_eq!(run("B% I( U- I#"), "1");
}

#[test]
fn test_arithmetic_is_arbitrary_precision() {
    let big = BigInt::from(u64::MAX);
    let expr = Expr::binary(BinaryOp::Mul, Expr::int(big.clone()), Expr::int(big.clone()));
    assert_eq!(eval(&expr), Ok(Value::Int(&big * &big)));
}

#[test]
fn test_comparisons() {
    assert_eq!(run("B< I$ I#"), "false");
    assert_eq!(run("B> I$ I#"), "true");
    assert_eq!(run("B= I$ I$"), "true");
    assert_eq!(run("B= S4%34 S4%34"), "true");
    assert_eq!(run("B= T F"), "false");
}

#[test]
fn test_boolean_operators() {
    assert_eq!(run("B| T F"), "true");
    assert_eq!(run("B& T F"), "false");
}

#[test]
fn test_string_operators() {
    assert_eq!(run("B. S4% S34"), "test");
    assert_eq!(run("BT I$ S4%34"), "tes");
    assert_eq!(run("BD I$ S4%34"), "t");
}

#[test]
fn test_take_and_drop_use_signed_slice_bounds() {
    assert_eq!(run("BT U- I\" S4%34"), "tes");
    assert_eq!(run("BD U- I\" S4%34"), "t");
    assert_eq!(run("BT I/6 S4%34"), "test");
    assert_eq!(run("BD I/6 S4%34"), "");
    assert_eq!(run("BT U- I/6 S4%34"), "");
    assert_eq!(run("BD U- I/6 S4%34"), "test");
}

// ─────────────────────────────────────────────────────────────────────
// Application
// ─────────────────────────────────────────────────────────────────────

#[test]
fn test_apply_simple_lambda() {
    assert_eq!(run("B$ L# B$ L\" B+ v\" v\" B* I$ I# v8"), "12");
}

#[test]
fn test_apply_consumes_arguments_in_order() {
    assert_eq!(run("B$ B$ B$ B$ L$ L$ L$ L# v$ I\" I# I$ I%"), "3");
}

#[test]
fn test_apply_returns_deferred_string() {
    assert_eq!(run("B$ B$ L# L$ v# B. SB%,,/ S}Q/2,$_ IK"), "Hello World!");
}

#[test]
fn test_higher_order_application() {
    let add = Expr::lambda(1, Expr::lambda(2, Expr::binary(BinaryOp::Add, Expr::var(1), Expr::var(2))));
    let expr = Expr::apply(Expr::apply(add, Expr::int(3)), Expr::int(4));
    assert_eq!(eval(&expr), Ok(Value::from(7)));
}

#[test]
fn test_lambda_passed_as_argument() {
    assert_eq!(run("B$ L\" B$ v\" I/6 L! I\""), "1");
    assert_eq!(run("B$ L\" B$ v\" I/6 L! B+ v! I\""), "1338");
}

#[test]
fn test_partial_application_passed_through_identity() {
    // ((\1. v1) ((\3. \4. v4) 0)) 7
    assert_eq!(run("B$ B$ L\" v\" B$ L$ L% v% I! I("), "7");
    // ((\1. v1) ((\3. \4. v3) 5)) 7
    assert_eq!(run("B$ B$ L\" v\" B$ L$ L% v$ I& I("), "5");
}

#[test]
fn test_applied_argument_is_not_consumed_twice() {
    let expr = parse("B$ B$ L\" v\" B$ L$ L% v% I! I(");
    let mut evaluator = Evaluator::default();
    assert_eq!(evaluator.evaluate(&expr), Ok(Value::from(7)));
    assert_eq!(evaluator.gas_used(), 9);
}

#[test]
fn test_fixed_point_recursion_stops_early() {
    // Y (\1. \2. if v2 == 0 then 1 else (\3. v1 v3 + v1 v3) (v2 - 1)) 4
    // The combinator and the step function reuse ids 1 and 2, and deferred
    // arguments are forced in the scope that reads them, so the recursion
    // sees the wrong bindings: 8 here, where lexical scoping gives 16.
    let source = "B$ B$ L\" B$ L# B$ v\" B$ v# v# L# B$ v\" B$ v# v# \
                  L\" L# ? B= v# I! I\" B$ L$ B+ B$ v\" v$ B$ v\" v$ B- v# I\" I%";
    assert_eq!(run(source), "8");
}

#[test]
fn test_shadowing_restores_outer_binding() {
    let inner = Expr::apply(
        Expr::lambda(1, Expr::binary(BinaryOp::Add, Expr::var(1), Expr::int(1337))),
        Expr::int(1),
    );
    let outer = Expr::lambda(1, Expr::binary(BinaryOp::Add, Expr::var(1), inner));
    let expr = Expr::apply(outer, Expr::int(7));
    assert_eq!(eval(&expr), Ok(Value::from(1345)));
}

#[test]
fn test_unused_argument_is_never_evaluated() {
    assert_eq!(run("B$ L! I& B/ I\" I!"), "5");
    assert_eq!(run("B$ L! I& v%"), "5");
}

#[test]
fn test_argument_is_evaluated_each_time_it_is_used() {
    let expr = parse("B$ L\" B+ v\" v\" B* I$ I#");
    let mut evaluator = Evaluator::default();
    assert_eq!(evaluator.evaluate(&expr), Ok(Value::from(12)));
    // apply, lambda, add, two variable reads, and the product (3 nodes) twice
    assert_eq!(evaluator.gas_used(), 11);
}

// ─────────────────────────────────────────────────────────────────────
// Failures
// ─────────────────────────────────────────────────────────────────────

#[test]
fn test_unbound_variable() {
    let err = run_err("v!");
    assert_eq!(err, EvalError::UnboundVariable(VarId(0)));
    assert_eq!(err.code(), ErrorCode::UNBOUND_VARIABLE);
}

#[test]
fn test_lambda_without_argument_underflows() {
    let err = run_err("L! I!");
    assert_eq!(err, EvalError::StackUnderflow(VarId(0)));
    assert_eq!(err.code(), ErrorCode::STACK_UNDERFLOW);
}

#[test]
fn test_bare_lambda_variable_underflows() {
    assert_eq!(run_err("B$ L\" v\" L# I&"), EvalError::StackUnderflow(VarId(2)));
}

#[test]
fn test_type_mismatch() {
    let err = run_err("B+ I\" T");
    assert_eq!(
        err,
        EvalError::TypeMismatch {
            op: "add",
            expected: "integer operands",
            found: "integer and boolean".to_string(),
        }
    );
    assert_eq!(err.code(), ErrorCode::TYPE_MISMATCH);

    assert!(matches!(run_err("B= I\" S!"), EvalError::TypeMismatch { op: "eq", .. }));
    assert!(matches!(run_err("U! I\""), EvalError::TypeMismatch { op: "not", .. }));
    assert!(matches!(run_err("? I! I\" I#"), EvalError::TypeMismatch { op: "if", .. }));
}

#[test]
fn test_division_by_zero() {
    assert_eq!(run_err("B/ I\" I!"), EvalError::DivisionByZero);
    assert_eq!(run_err("B% I\" I!"), EvalError::DivisionByZero);
}

// ─────────────────────────────────────────────────────────────────────
// Gas
// ─────────────────────────────────────────────────────────────────────

#[test]
fn test_gas_counts_every_node() {
    let expr = parse("B+ I\" I#");
    let mut evaluator = Evaluator::default();
    evaluator.evaluate(&expr).unwrap();
    assert_eq!(evaluator.gas_used(), 3);
}

#[test]
fn test_divergent_program_exhausts_gas() {
    let expr = parse("B$ L! B$ v! v! L! B$ v! v!");
    let mut evaluator = Evaluator::new(1_000);
    let err = evaluator.evaluate(&expr).unwrap_err();
    assert_eq!(err, EvalError::GasExhausted);
    assert_eq!(err.code(), ErrorCode::GAS_EXHAUSTED);
}

#[test]
fn test_deeply_nested_expression() {
    let mut expr = Expr::int(1);
    for _ in 0..2_000 {
        expr = Expr::unary(UnaryOp::Negate, expr);
    }
    assert_eq!(eval(&expr), Ok(Value::from(1)));
}
