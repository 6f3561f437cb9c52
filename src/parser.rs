//! Infix parser that works directly on the source text.
//!
//! There is no separate lexer. Each call trims its input and then tries, in
//! order: wrapping parentheses, the named constants `pi` and `e`, a top-level
//! `+`/`-`, a leading minus, a top-level `*`/`/`, a top-level `^`, a function
//! call, and finally a number or variable. Precedence falls out of that order.
//! `+ - * /` split at their last top-level occurrence (left associative),
//! `^` at its first (right associative).

use std::f64::consts::{E, PI};

use nom::IResult;
use nom::branch::alt;
use nom::bytes::complete::tag;
use nom::character::complete::{char, multispace0};
use nom::combinator::all_consuming;
use nom::error::VerboseError;
use nom::number::complete::recognize_float;
use nom::sequence::{pair, terminated};
use tracing::trace;

use crate::error::ParseError;
use crate::expr::{Expr, add, constant, cos, div, exp, ln, mul, pow, sin, sub, var};

pub const DEFAULT_MAX_DEPTH: usize = 512;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct ParseOptions {
    /// Deepest recursion the parser accepts before giving up with
    /// [`ParseError::TooDeep`]. Every pair of parentheses, function call and
    /// binary operator costs one level, so a flat chain `1+1+...+1` of `n`
    /// terms needs about `n` levels just like `n` nested parentheses.
    pub max_depth: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

pub fn parse_expr(input: &str) -> Result<Expr, ParseError> {
    parse_with(input, &ParseOptions::default())
}

pub fn parse_with(input: &str, options: &ParseOptions) -> Result<Expr, ParseError> {
    check_balanced(input)?;
    Parser { options }.parse(input, 0)
}

struct Parser<'a> {
    options: &'a ParseOptions,
}

#[derive(Clone, Copy)]
enum Pick {
    First,
    Last,
}

impl Parser<'_> {
    fn parse(&self, input: &str, depth: usize) -> Result<Expr, ParseError> {
        if depth > self.options.max_depth {
            return Err(ParseError::TooDeep(self.options.max_depth));
        }
        let s = input.trim();
        if s.is_empty() {
            return Err(ParseError::Empty);
        }
        let depth = depth + 1;

        if let Some(inner) = strip_wrapping_parens(s) {
            return self.parse(inner, depth);
        }

        match s {
            "pi" => return Ok(constant(PI)),
            "e" => return Ok(constant(E)),
            _ => {}
        }

        if let Some((i, op)) = split_point(s, &['+', '-'], Pick::Last, true) {
            let (left, right) = self.split(s, i, op, depth)?;
            return Ok(if op == '+' { add(left, right) } else { sub(left, right) });
        }

        if let Some(rest) = s.strip_prefix('-') {
            if rest.trim().is_empty() {
                return Err(ParseError::LoneMinus);
            }
            return Ok(sub(constant(0.0), self.parse(rest, depth)?));
        }

        if let Some((i, op)) = split_point(s, &['*', '/'], Pick::Last, false) {
            let (left, right) = self.split(s, i, op, depth)?;
            return Ok(if op == '*' { mul(left, right) } else { div(left, right) });
        }

        if let Some((i, op)) = split_point(s, &['^'], Pick::First, false) {
            let (base, exponent) = self.split(s, i, op, depth)?;
            return Ok(pow(base, exponent));
        }

        if let Some((build, inner)) = function_call(s)? {
            return Ok(build(self.parse(inner, depth)?));
        }

        match number_literal(s) {
            Some(value) if !value.is_finite() => Err(ParseError::OutOfRange(s.to_string())),
            Some(value) => Ok(constant(value)),
            None => Ok(var(s)),
        }
    }

    fn split(&self, s: &str, i: usize, op: char, depth: usize) -> Result<(Expr, Expr), ParseError> {
        let (left, right) = (&s[..i], &s[i + op.len_utf8()..]);
        trace!(%op, left, right, "split at top-level operator");
        Ok((self.parse(left, depth)?, self.parse(right, depth)?))
    }
}

fn check_balanced(input: &str) -> Result<(), ParseError> {
    let mut depth = 0i32;
    for c in input.chars() {
        match c {
            '(' => depth += 1,
            ')' => depth -= 1,
            _ => {}
        }
        if depth < 0 {
            break;
        }
    }
    if depth == 0 {
        Ok(())
    } else {
        Err(ParseError::UnmatchedParens(input.trim().to_string()))
    }
}

/// Returns the interior when one pair of parentheses spans all of `s`.
fn strip_wrapping_parens(s: &str) -> Option<&str> {
    let inner = s.strip_prefix('(')?.strip_suffix(')')?;
    let mut depth = 0i32;
    for c in inner.chars() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth < 0 {
                    return None;
                }
            }
            _ => {}
        }
    }
    (depth == 0).then_some(inner)
}

/// Finds an operator from `ops` at parenthesis depth zero.
///
/// With `binary_only`, a sign counts only when it follows the end of an
/// operand, so the `-` in `2*-3`, `x^-1` or `1e-5` is skipped.
fn split_point(s: &str, ops: &[char], pick: Pick, binary_only: bool) -> Option<(usize, char)> {
    let mut depth = 0i32;
    let mut prev = None;
    let mut found = None;
    for (i, c) in s.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth -= 1,
            _ if depth == 0 && ops.contains(&c) => {
                if !binary_only || is_binary_sign(s, i, prev) {
                    found = Some((i, c));
                    if let Pick::First = pick {
                        break;
                    }
                }
            }
            _ => {}
        }
        if !c.is_whitespace() {
            prev = Some(c);
        }
    }
    found
}

fn is_binary_sign(s: &str, i: usize, prev: Option<char>) -> bool {
    match prev {
        None | Some('+' | '-' | '*' | '/' | '^' | '(') => false,
        Some('e' | 'E') => !is_exponent_sign(s, i),
        Some(_) => true,
    }
}

// `s[i]` is the sign of a float exponent when it directly follows the `e` of
// a standalone numeric mantissa and is itself followed by a digit.
fn is_exponent_sign(s: &str, i: usize) -> bool {
    let Some(mantissa) = s[..i].strip_suffix(|c: char| c == 'e' || c == 'E') else {
        return false;
    };
    let head = mantissa.trim_end_matches(|c: char| c.is_ascii_digit() || c == '.');
    let digits = &mantissa[head.len()..];
    let standalone = !head.ends_with(|c: char| c.is_alphanumeric() || c == '_');
    let exponent_follows = s[i + 1..].starts_with(|c: char| c.is_ascii_digit());
    standalone && exponent_follows && digits.chars().any(|c| c.is_ascii_digit())
}

fn function_head(input: &str) -> IResult<&str, &str, VerboseError<&str>> {
    terminated(
        alt((tag("sin"), tag("cos"), tag("ln"), tag("exp"))),
        pair(multispace0, char('(')),
    )(input)
}

/// Recognises `name(arg)` spanning the whole of `s` and returns the node
/// constructor together with the argument text.
fn function_call(s: &str) -> Result<Option<(fn(Expr) -> Expr, &str)>, ParseError> {
    let Ok((rest, name)) = function_head(s) else {
        return Ok(None);
    };
    let build: fn(Expr) -> Expr = match name {
        "sin" => sin,
        "cos" => cos,
        "ln" => ln,
        _ => exp,
    };

    let mut depth = 1i32;
    for (i, c) in rest.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth -= 1,
            _ => {}
        }
        if depth == 0 {
            if !rest[i + 1..].trim().is_empty() {
                return Err(ParseError::TrailingInput(s.to_string()));
            }
            return Ok(Some((build, &rest[..i])));
        }
    }
    Err(ParseError::UnmatchedParens(s.to_string()))
}

fn number_literal(s: &str) -> Option<f64> {
    let recognized: IResult<&str, &str> = all_consuming(recognize_float)(s);
    recognized.ok().and_then(|(_, text)| text.parse().ok())
}
