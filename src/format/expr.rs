use crate::expr::Expr;

/// Fully parenthesised infix rendering: every binary operation is wrapped as
/// `(left op right)`, so the output parses back to the same tree shape.
///
/// Non-finite constants built through the API print as `inf` or `NaN`, which
/// read back as variables; the parser itself never produces them.
pub fn pretty(expr: &Expr) -> String {
    match expr {
        Expr::Constant(value) => value.to_string(),
        Expr::Variable(name) => name.clone(),

        Expr::Add(a, b) => infix(a, " + ", b),
        Expr::Sub(a, b) => infix(a, " - ", b),
        Expr::Mul(a, b) => infix(a, " * ", b),
        Expr::Div(a, b) => infix(a, " / ", b),
        // `-2^2` would read back as `-(2^2)`.
        Expr::Pow(a, b) if a.as_constant().is_some_and(f64::is_sign_negative) => {
            format!("(({})^{})", pretty(a), pretty(b))
        }
        Expr::Pow(a, b) => infix(a, "^", b),

        Expr::Sin(a) => call("sin", a),
        Expr::Cos(a) => call("cos", a),
        Expr::Ln(a) => call("ln", a),
        Expr::Exp(a) => call("exp", a),
    }
}

fn infix(a: &Expr, op: &str, b: &Expr) -> String {
    format!("({}{op}{})", pretty(a), pretty(b))
}

fn call(name: &str, arg: &Expr) -> String {
    format!("{name}({})", pretty(arg))
}
