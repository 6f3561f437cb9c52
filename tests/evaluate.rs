use std::f64::consts::{E, PI};

use approx::assert_relative_eq;
use symdiff::{Bindings, EvalError, Expression, bindings};

fn no_vars() -> Bindings {
    Bindings::new()
}

fn eval_str(input: &str, pairs: &[(&str, f64)]) -> Result<f64, EvalError> {
    Expression::parse(input)
        .expect("parse input")
        .evaluate(&bindings(pairs.iter().copied()))
}

#[test]
fn constructors() {
    let constant = Expression::constant(5.8);
    assert_relative_eq!(constant.evaluate(&no_vars()).unwrap(), 5.8);

    let x = Expression::var("x");
    assert_relative_eq!(x.evaluate(&bindings([("x", 2.5)])).unwrap(), 2.5);

    let original = Expression::from(3.25);
    let copy = original.clone();
    assert_relative_eq!(copy.evaluate(&no_vars()).unwrap(), 3.25);

    let moved = original;
    assert_relative_eq!(moved.evaluate(&no_vars()).unwrap(), 3.25);
}

#[test]
fn arithmetic_operators() {
    let c = Expression::constant;
    assert_relative_eq!((c(5.0) + c(10.0)).evaluate(&no_vars()).unwrap(), 15.0);
    assert_relative_eq!((c(10.0) - c(3.0)).evaluate(&no_vars()).unwrap(), 7.0);
    assert_relative_eq!((c(6.0) * c(4.0)).evaluate(&no_vars()).unwrap(), 24.0);
    assert_relative_eq!((c(8.0) / c(2.0)).evaluate(&no_vars()).unwrap(), 4.0);
    assert_relative_eq!(c(2.0).pow(c(3.0)).evaluate(&no_vars()).unwrap(), 8.0);
    assert_relative_eq!((-c(2.5)).evaluate(&no_vars()).unwrap(), -2.5);
}

#[test]
fn elementary_functions() {
    let c = Expression::constant;
    assert_relative_eq!(c(PI / 2.0).sin().evaluate(&no_vars()).unwrap(), 1.0);
    assert_relative_eq!(c(PI).cos().evaluate(&no_vars()).unwrap(), -1.0);
    assert_relative_eq!(c(E).ln().evaluate(&no_vars()).unwrap(), 1.0);
    assert_relative_eq!(c(1.0).exp().evaluate(&no_vars()).unwrap(), E);
}

#[test]
fn power_uses_real_powf() {
    assert_relative_eq!(eval_str("0^0", &[]).unwrap(), 1.0);
    assert_relative_eq!(eval_str("4^0.5", &[]).unwrap(), 2.0);
    assert!(eval_str("(0-8)^(1/3)", &[]).unwrap().is_nan());
}

#[test]
fn extra_bindings_are_ignored() {
    assert_relative_eq!(
        eval_str("x+1", &[("x", 1.0), ("unused", 9.0)]).unwrap(),
        2.0
    );
}

#[test]
fn unbound_variable() {
    assert_eq!(
        eval_str("x + y", &[("x", 1.0)]),
        Err(EvalError::UnboundVariable("y".to_string()))
    );
}

#[test]
fn division_by_near_zero() {
    assert_eq!(eval_str("1/0", &[]), Err(EvalError::DivisionByZero));
    assert_eq!(eval_str("1/(1e-16)", &[]), Err(EvalError::DivisionByZero));
    assert_eq!(
        eval_str("1/(x-x)", &[("x", 3.0)]),
        Err(EvalError::DivisionByZero)
    );
    assert_relative_eq!(eval_str("1/x", &[("x", 1e-14)]).unwrap(), 1e14);
}

#[test]
fn divisor_is_checked_before_dividend() {
    assert_eq!(eval_str("y/0", &[]), Err(EvalError::DivisionByZero));
}

#[test]
fn logarithm_domain() {
    assert_eq!(eval_str("ln(0-1)", &[]), Err(EvalError::LogDomain(-1.0)));
    assert_eq!(eval_str("ln(-1)", &[]), Err(EvalError::LogDomain(-1.0)));
    assert_eq!(
        eval_str("ln(x)", &[("x", 0.0)]),
        Err(EvalError::LogDomain(0.0))
    );
}

#[test]
fn empty_expression() {
    let empty = Expression::empty();
    assert!(!empty.is_valid());
    assert_eq!(empty.evaluate(&no_vars()), Err(EvalError::EmptyExpression));

    let combined = Expression::empty() + Expression::var("x");
    assert!(!combined.is_valid());
    assert_eq!(
        combined.evaluate(&bindings([("x", 1.0)])),
        Err(EvalError::EmptyExpression)
    );
}

#[test]
fn errors_render_messages() {
    assert_eq!(
        EvalError::UnboundVariable("x".into()).to_string(),
        "missing value for variable: x"
    );
    assert_eq!(EvalError::DivisionByZero.to_string(), "division by zero");
    assert_eq!(
        EvalError::EmptyExpression.to_string(),
        "cannot evaluate empty expression"
    );
}
