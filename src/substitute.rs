//! Replacing a variable with a constant.

use crate::expr::Expr;

/// Substitute every occurrence of `var` in `expr` with `value`.
pub fn substitute(expr: &Expr, var: &str, value: f64) -> Expr {
    rewrite(expr, var, value).unwrap_or_else(|| expr.clone())
}

// `None` means the subtree does not mention `var` and can be reused as is.
fn rewrite(expr: &Expr, var: &str, value: f64) -> Option<Expr> {
    match expr {
        Expr::Variable(name) if name == var => Some(Expr::Constant(value)),
        Expr::Variable(_) | Expr::Constant(_) => None,

        Expr::Add(a, b) => rewrite_binary(a, b, var, value, Expr::Add),
        Expr::Sub(a, b) => rewrite_binary(a, b, var, value, Expr::Sub),
        Expr::Mul(a, b) => rewrite_binary(a, b, var, value, Expr::Mul),
        Expr::Div(a, b) => rewrite_binary(a, b, var, value, Expr::Div),
        Expr::Pow(a, b) => rewrite_binary(a, b, var, value, Expr::Pow),

        Expr::Sin(a) => rewrite(a, var, value).map(|a| Expr::Sin(a.boxed())),
        Expr::Cos(a) => rewrite(a, var, value).map(|a| Expr::Cos(a.boxed())),
        Expr::Ln(a) => rewrite(a, var, value).map(|a| Expr::Ln(a.boxed())),
        Expr::Exp(a) => rewrite(a, var, value).map(|a| Expr::Exp(a.boxed())),
    }
}

fn rewrite_binary(
    a: &Expr,
    b: &Expr,
    var: &str,
    value: f64,
    build: fn(Box<Expr>, Box<Expr>) -> Expr,
) -> Option<Expr> {
    match (rewrite(a, var, value), rewrite(b, var, value)) {
        (None, None) => None,
        (new_a, new_b) => Some(build(
            new_a.unwrap_or_else(|| a.clone()).boxed(),
            new_b.unwrap_or_else(|| b.clone()).boxed(),
        )),
    }
}
