//! Expression tree definitions and helpers.

use std::fmt;
use std::ops;

use crate::error::{EvalError, ParseError};
use crate::eval::Bindings;
use crate::parser::ParseOptions;

/// One node of an expression tree. Children are owned, so a tree is never
/// shared or mutated after construction; every transformation builds a new one.
#[derive(Clone, PartialEq, Debug)]
pub enum Expr {
    Constant(f64),
    Variable(String),
    Add(Box<Expr>, Box<Expr>),
    Sub(Box<Expr>, Box<Expr>),
    Mul(Box<Expr>, Box<Expr>),
    Div(Box<Expr>, Box<Expr>),
    Pow(Box<Expr>, Box<Expr>),
    Sin(Box<Expr>),
    Cos(Box<Expr>),
    Ln(Box<Expr>),
    Exp(Box<Expr>),
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Kind {
    Constant,
    Variable,
    Add,
    Sub,
    Mul,
    Div,
    Pow,
    Sin,
    Cos,
    Ln,
    Exp,
}

impl Expr {
    pub fn var(name: impl Into<String>) -> Self {
        Expr::Variable(name.into())
    }

    pub fn kind(&self) -> Kind {
        match self {
            Expr::Constant(_) => Kind::Constant,
            Expr::Variable(_) => Kind::Variable,
            Expr::Add(..) => Kind::Add,
            Expr::Sub(..) => Kind::Sub,
            Expr::Mul(..) => Kind::Mul,
            Expr::Div(..) => Kind::Div,
            Expr::Pow(..) => Kind::Pow,
            Expr::Sin(_) => Kind::Sin,
            Expr::Cos(_) => Kind::Cos,
            Expr::Ln(_) => Kind::Ln,
            Expr::Exp(_) => Kind::Exp,
        }
    }

    pub fn as_constant(&self) -> Option<f64> {
        if let Expr::Constant(value) = self {
            Some(*value)
        } else {
            None
        }
    }

    /// Whether `name` occurs anywhere in the tree.
    pub fn contains_var(&self, name: &str) -> bool {
        match self {
            Expr::Constant(_) => false,
            Expr::Variable(v) => v == name,
            Expr::Add(a, b)
            | Expr::Sub(a, b)
            | Expr::Mul(a, b)
            | Expr::Div(a, b)
            | Expr::Pow(a, b) => a.contains_var(name) || b.contains_var(name),
            Expr::Sin(a) | Expr::Cos(a) | Expr::Ln(a) | Expr::Exp(a) => a.contains_var(name),
        }
    }

    pub fn boxed(self) -> Box<Self> {
        Box::new(self)
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::format::pretty(self))
    }
}

pub fn constant(value: f64) -> Expr {
    Expr::Constant(value)
}

pub fn var(name: impl Into<String>) -> Expr {
    Expr::Variable(name.into())
}

pub fn add(a: Expr, b: Expr) -> Expr {
    Expr::Add(a.boxed(), b.boxed())
}

pub fn sub(a: Expr, b: Expr) -> Expr {
    Expr::Sub(a.boxed(), b.boxed())
}

pub fn mul(a: Expr, b: Expr) -> Expr {
    Expr::Mul(a.boxed(), b.boxed())
}

pub fn div(a: Expr, b: Expr) -> Expr {
    Expr::Div(a.boxed(), b.boxed())
}

pub fn pow(base: Expr, exp: Expr) -> Expr {
    Expr::Pow(base.boxed(), exp.boxed())
}

pub fn sin(a: Expr) -> Expr {
    Expr::Sin(a.boxed())
}

pub fn cos(a: Expr) -> Expr {
    Expr::Cos(a.boxed())
}

pub fn ln(a: Expr) -> Expr {
    Expr::Ln(a.boxed())
}

pub fn exp(a: Expr) -> Expr {
    Expr::Exp(a.boxed())
}

/// Owning handle around an optional root node.
///
/// The default value is the empty expression: it prints as an empty string,
/// fails to evaluate, and stays empty under substitution and differentiation.
/// Combining an empty expression with anything yields an empty expression.
#[derive(Clone, PartialEq, Debug, Default)]
pub struct Expression {
    root: Option<Expr>,
}

impl Expression {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn constant(value: f64) -> Self {
        Expr::Constant(value).into()
    }

    pub fn var(name: impl Into<String>) -> Self {
        Expr::var(name).into()
    }

    pub fn parse(input: &str) -> Result<Self, ParseError> {
        crate::parser::parse_expr(input).map(Self::from)
    }

    pub fn parse_with(input: &str, options: &ParseOptions) -> Result<Self, ParseError> {
        crate::parser::parse_with(input, options).map(Self::from)
    }

    pub fn is_valid(&self) -> bool {
        self.root.is_some()
    }

    pub fn contains_var(&self, name: &str) -> bool {
        self.root.as_ref().is_some_and(|root| root.contains_var(name))
    }

    pub fn evaluate(&self, bindings: &Bindings) -> Result<f64, EvalError> {
        match &self.root {
            Some(root) => crate::eval::evaluate(root, bindings),
            None => Err(EvalError::EmptyExpression),
        }
    }

    pub fn substitute(&self, name: &str, value: f64) -> Self {
        Self {
            root: self
                .root
                .as_ref()
                .map(|root| crate::substitute::substitute(root, name, value)),
        }
    }

    pub fn differentiate(&self, name: &str) -> Self {
        Self {
            root: self
                .root
                .as_ref()
                .map(|root| crate::calculus::differentiate(name, root)),
        }
    }

    pub fn pow(self, exponent: Expression) -> Self {
        self.combine(exponent, pow)
    }

    pub fn sin(self) -> Self {
        Self { root: self.root.map(sin) }
    }

    pub fn cos(self) -> Self {
        Self { root: self.root.map(cos) }
    }

    pub fn ln(self) -> Self {
        Self { root: self.root.map(ln) }
    }

    pub fn exp(self) -> Self {
        Self { root: self.root.map(exp) }
    }

    fn combine(self, rhs: Expression, build: fn(Expr, Expr) -> Expr) -> Self {
        Self {
            root: self.root.zip(rhs.root).map(|(l, r)| build(l, r)),
        }
    }
}

impl From<Expr> for Expression {
    fn from(root: Expr) -> Self {
        Self { root: Some(root) }
    }
}

impl From<f64> for Expression {
    fn from(value: f64) -> Self {
        Self::constant(value)
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.root {
            Some(root) => write!(f, "{root}"),
            None => Ok(()),
        }
    }
}

macro_rules! binary_ops {
    ($($op:ident :: $method:ident => $build:ident),* $(,)?) => {$(
        impl ops::$op for Expr {
            type Output = Expr;

            fn $method(self, rhs: Expr) -> Expr {
                $build(self, rhs)
            }
        }

        impl ops::$op for Expression {
            type Output = Expression;

            fn $method(self, rhs: Expression) -> Expression {
                self.combine(rhs, $build)
            }
        }
    )*};
}

binary_ops!(Add::add => add, Sub::sub => sub, Mul::mul => mul, Div::div => div);

// Negation is `0 - a`, the same tree the parser builds for a leading minus.
impl ops::Neg for Expr {
    type Output = Expr;

    fn neg(self) -> Expr {
        sub(constant(0.0), self)
    }
}

impl ops::Neg for Expression {
    type Output = Expression;

    fn neg(self) -> Expression {
        Expression::constant(0.0) - self
    }
}
