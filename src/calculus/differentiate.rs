use tracing::trace;

use crate::expr::{Expr, add, constant, cos, div, exp, ln, mul, pow, sin, sub};

/// Symbolic derivative of `expr` with respect to `var`.
///
/// The result is built straight from the textbook rules and is never
/// simplified, so `d/dx 3` is the constant `0` and `d/dx x*x` is
/// `((1 * x) + (x * 1))`.
pub fn differentiate(var: &str, expr: &Expr) -> Expr {
    Differentiator { var }.derive(expr)
}

struct Differentiator<'a> {
    var: &'a str,
}

impl<'a> Differentiator<'a> {
    fn derive(&self, expr: &Expr) -> Expr {
        trace!(var = self.var, kind = ?expr.kind(), "derive");
        match expr {
            Expr::Variable(name) if name == self.var => constant(1.0),
            Expr::Variable(_) => constant(0.0),
            Expr::Constant(_) => constant(0.0),

            Expr::Add(a, b) => add(self.derive(a), self.derive(b)),
            Expr::Sub(a, b) => sub(self.derive(a), self.derive(b)),
            Expr::Mul(a, b) => self.product_rule(a, b),
            Expr::Div(a, b) => self.quotient_rule(a, b),
            Expr::Pow(a, b) => self.power_rule(a, b),

            Expr::Sin(a) => self.chain_rule(a, cos),
            Expr::Cos(a) => self.chain_rule(a, |inner| mul(constant(-1.0), sin(inner))),
            Expr::Ln(a) => div(self.derive(a), a.as_ref().clone()),
            Expr::Exp(a) => self.chain_rule(a, exp),
        }
    }

    fn product_rule(&self, a: &Expr, b: &Expr) -> Expr {
        add(
            mul(self.derive(a), b.clone()),
            mul(a.clone(), self.derive(b)),
        )
    }

    fn quotient_rule(&self, a: &Expr, b: &Expr) -> Expr {
        div(
            sub(
                mul(self.derive(a), b.clone()),
                mul(a.clone(), self.derive(b)),
            ),
            pow(b.clone(), constant(2.0)),
        )
    }

    // Only a literal constant exponent takes the short form; anything else,
    // even `2+3`, goes through d(u^v) = u^v * (v' ln u + v u' / u).
    fn power_rule(&self, base: &Expr, exp: &Expr) -> Expr {
        match exp {
            Expr::Constant(n) => mul(
                mul(constant(*n), pow(base.clone(), constant(n - 1.0))),
                self.derive(base),
            ),
            _ => mul(
                pow(base.clone(), exp.clone()),
                add(
                    mul(self.derive(exp), ln(base.clone())),
                    div(mul(exp.clone(), self.derive(base)), base.clone()),
                ),
            ),
        }
    }

    /// `outer(arg) * arg'`
    fn chain_rule<F>(&self, arg: &Expr, outer: F) -> Expr
    where
        F: Fn(Expr) -> Expr,
    {
        mul(outer(arg.clone()), self.derive(arg))
    }
}
