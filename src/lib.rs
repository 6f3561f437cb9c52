//! Parsing, numeric evaluation, substitution and symbolic differentiation of
//! infix mathematical expressions.

pub mod calculus;
pub mod error;
pub mod eval;
pub mod expr;
pub mod format;
pub mod parser;
pub mod prelude;
pub mod substitute;
mod ui;

pub use calculus::differentiate;
pub use error::{Error, EvalError, ParseError, Result};
pub use eval::{Bindings, DIVISION_EPSILON, bindings, evaluate};
pub use expr::{
    Expr, Expression, Kind, add, constant, cos, div, exp, ln, mul, pow, sin, sub, var,
};
pub use format::pretty;
pub use parser::{DEFAULT_MAX_DEPTH, ParseOptions, parse_expr, parse_with};
pub use substitute::substitute;
