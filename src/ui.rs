//! String-based helpers for quick usage and for the command-line front end.

use tracing::debug;

use crate::error::{Error, Result};
use crate::eval::Bindings;
use crate::expr::Expression;

pub fn parse(input: &str) -> Result<Expression> {
    Ok(Expression::parse(input)?)
}

pub fn evaluate(input: &str, bindings: &Bindings) -> Result<f64> {
    let expr = parse(input)?;
    debug!(%expr, "evaluating");
    Ok(expr.evaluate(bindings)?)
}

pub fn differentiate(input: &str, var: &str) -> Result<Expression> {
    Ok(parse(input)?.differentiate(var))
}

pub fn diff(input: &str, var: &str) -> Result<String> {
    Ok(differentiate(input, var)?.to_string())
}

/// Parses a `NAME=VALUE` binding such as `x=2.5`.
pub fn parse_binding(token: &str) -> Result<(String, f64)> {
    let invalid = || Error::InvalidBinding(token.to_string());
    let (name, value) = token.split_once('=').ok_or_else(invalid)?;
    let name = name.trim();
    if name.is_empty() {
        return Err(invalid());
    }
    let value = value.trim().parse::<f64>().map_err(|_| invalid())?;
    Ok((name.to_string(), value))
}
