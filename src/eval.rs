//! Numeric evaluation of expression trees under a variable binding.

use std::collections::HashMap;

use tracing::debug;

use crate::error::EvalError;
use crate::expr::Expr;

pub type Bindings = HashMap<String, f64>;

/// Divisors with a smaller magnitude are treated as zero.
pub const DIVISION_EPSILON: f64 = 1e-15;

/// Builds a [`Bindings`] map from `(name, value)` pairs.
pub fn bindings<I, K>(pairs: I) -> Bindings
where
    I: IntoIterator<Item = (K, f64)>,
    K: Into<String>,
{
    pairs.into_iter().map(|(name, value)| (name.into(), value)).collect()
}

pub fn evaluate(expr: &Expr, bindings: &Bindings) -> Result<f64, EvalError> {
    Evaluator { bindings }.eval(expr)
}

struct Evaluator<'a> {
    bindings: &'a Bindings,
}

impl Evaluator<'_> {
    fn eval(&self, expr: &Expr) -> Result<f64, EvalError> {
        match expr {
            Expr::Constant(value) => Ok(*value),
            Expr::Variable(name) => self.lookup(name),

            Expr::Add(a, b) => Ok(self.eval(a)? + self.eval(b)?),
            Expr::Sub(a, b) => Ok(self.eval(a)? - self.eval(b)?),
            Expr::Mul(a, b) => Ok(self.eval(a)? * self.eval(b)?),
            Expr::Div(a, b) => {
                let divisor = self.eval(b)?;
                if divisor.abs() < DIVISION_EPSILON {
                    debug!(divisor, "refusing to divide by near-zero value");
                    return Err(EvalError::DivisionByZero);
                }
                Ok(self.eval(a)? / divisor)
            }
            Expr::Pow(a, b) => {
                let base = self.eval(a)?;
                Ok(base.powf(self.eval(b)?))
            }

            Expr::Sin(a) => Ok(self.eval(a)?.sin()),
            Expr::Cos(a) => Ok(self.eval(a)?.cos()),
            Expr::Ln(a) => {
                let arg = self.eval(a)?;
                if arg <= 0.0 {
                    debug!(arg, "logarithm of non-positive value");
                    return Err(EvalError::LogDomain(arg));
                }
                Ok(arg.ln())
            }
            Expr::Exp(a) => Ok(self.eval(a)?.exp()),
        }
    }

    fn lookup(&self, name: &str) -> Result<f64, EvalError> {
        self.bindings.get(name).copied().ok_or_else(|| {
            debug!(name, "variable has no binding");
            EvalError::UnboundVariable(name.to_string())
        })
    }
}
