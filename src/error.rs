use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("empty expression")]
    Empty,
    #[error("invalid expression: just '-'")]
    LoneMinus,
    #[error("unmatched parentheses: {0}")]
    UnmatchedParens(String),
    #[error("unexpected input after function call: {0}")]
    TrailingInput(String),
    #[error("expression exceeds parser recursion depth of {0}")]
    TooDeep(usize),
    #[error("numeric literal out of range: {0}")]
    OutOfRange(String),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    #[error("missing value for variable: {0}")]
    UnboundVariable(String),
    #[error("division by zero")]
    DivisionByZero,
    #[error("ln domain error: argument {0} <= 0")]
    LogDomain(f64),
    #[error("cannot evaluate empty expression")]
    EmptyExpression,
}

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Eval(#[from] EvalError),
    #[error("invalid binding '{0}', expected NAME=VALUE")]
    InvalidBinding(String),
    #[error("usage: {0}")]
    Usage(String),
}
