//! `symdiff` command-line front end.

use std::error::Error as _;
use std::fmt::Display;
use std::process::ExitCode;

use clap::{ArgGroup, Parser};
use symdiff::prelude::parse_binding;
use symdiff::{Bindings, DEFAULT_MAX_DEPTH, Error, Expression, ParseOptions};
use tracing::{debug, warn};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

const USAGE: &str = "symdiff --eval EXPR [NAME=VALUE ...] | symdiff --diff EXPR --by VAR";

#[derive(Parser, Debug)]
#[command(name = "symdiff", version)]
#[command(about = "Evaluate or symbolically differentiate an infix expression")]
#[command(group(ArgGroup::new("mode").required(true).args(["eval", "diff"])))]
struct Cli {
    /// Evaluate EXPR with the given NAME=VALUE bindings
    #[arg(long, value_name = "EXPR", allow_hyphen_values = true)]
    eval: Option<String>,

    /// Differentiate EXPR with respect to the variable given by --by
    #[arg(long, value_name = "EXPR", allow_hyphen_values = true, requires = "by")]
    diff: Option<String>,

    /// Variable to differentiate by
    #[arg(long, value_name = "VAR")]
    by: Option<String>,

    /// Parser recursion limit; each operator in a chain and each pair of
    /// parentheses uses one level
    #[arg(long, value_name = "N", default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    /// Variable bindings used by --eval
    #[arg(value_name = "NAME=VALUE", value_parser = parse_binding)]
    bindings: Vec<(String, f64)>,
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        // --help and --version
        Err(err) if !err.use_stderr() => {
            let _ = err.print();
            return ExitCode::SUCCESS;
        }
        Err(err) => return fail(cli_message(&err)),
    };

    match run(&cli) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(err) => fail(err),
    }
}

fn fail(message: impl Display) -> ExitCode {
    eprintln!("Error: {message}");
    ExitCode::FAILURE
}

/// One-line description of an argument error: the value parser's own error
/// when there is one, otherwise the first line of clap's report.
fn cli_message(err: &clap::Error) -> String {
    if let Some(source) = err.source() {
        return source.to_string();
    }
    let rendered = err.to_string();
    let first = rendered.lines().next().unwrap_or_default();
    first.strip_prefix("error: ").unwrap_or(first).to_string()
}

fn run(cli: &Cli) -> symdiff::Result<String> {
    let options = ParseOptions {
        max_depth: cli.max_depth,
    };

    match (&cli.eval, &cli.diff, &cli.by) {
        (Some(input), None, _) => {
            let expr = Expression::parse_with(input, &options)?;
            let bindings: Bindings = cli.bindings.iter().cloned().collect();
            debug!(%expr, ?bindings, "evaluating");
            Ok(expr.evaluate(&bindings)?.to_string())
        }
        (None, Some(input), Some(var)) => {
            let expr = Expression::parse_with(input, &options)?;
            if !expr.contains_var(var) {
                warn!(var = %var, "variable does not occur in the expression");
            }
            Ok(expr.differentiate(var).to_string())
        }
        _ => Err(Error::Usage(USAGE.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_args(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("symdiff").chain(args.iter().copied()))
    }

    #[test]
    fn eval_with_bindings() {
        let cli = parse_args(&["--eval", "2*x + y", "x=10", "y=-1"]).unwrap();
        assert_eq!(run(&cli).unwrap(), "19");
    }

    #[test]
    fn diff_prints_unsimplified_tree() {
        let cli = parse_args(&["--diff", "x*x", "--by", "x"]).unwrap();
        assert_eq!(run(&cli).unwrap(), "((1 * x) + (x * 1))");
    }

    #[test]
    fn exactly_one_mode_is_required() {
        assert!(parse_args(&[]).is_err());
        assert!(
            parse_args(&["--eval", "1", "--diff", "x", "--by", "x"]).is_err()
        );
    }

    #[test]
    fn diff_requires_by() {
        assert!(parse_args(&["--diff", "x"]).is_err());
    }

    #[test]
    fn malformed_binding_is_rejected() {
        let err = parse_args(&["--eval", "x", "x=abc"]).unwrap_err();
        assert!(err.use_stderr());
        assert_eq!(
            cli_message(&err),
            "invalid binding 'x=abc', expected NAME=VALUE"
        );
        assert!(parse_args(&["--eval", "x", "=3"]).is_err());
    }

    #[test]
    fn other_argument_errors_become_one_line() {
        let err = parse_args(&["--eval", "1", "--bogus"]).unwrap_err();
        let message = cli_message(&err);
        assert!(message.contains("unexpected argument"), "{message}");
        assert!(!message.starts_with("error:"));
        assert!(!message.contains('\n'));
    }

    #[test]
    fn help_is_not_an_error() {
        let err = parse_args(&["--help"]).unwrap_err();
        assert!(!err.use_stderr());
    }

    #[test]
    fn expressions_may_start_with_minus() {
        let cli = parse_args(&["--eval", "-x+1", "x=2"]).unwrap();
        assert_eq!(run(&cli).unwrap(), "-1");

        let cli = parse_args(&["--diff", "-x^2", "--by", "x"]).unwrap();
        assert_eq!(run(&cli).unwrap(), "(0 - ((2 * (x^1)) * 1))");
    }

    #[test]
    fn inconsistent_modes_are_usage_errors() {
        let cli = Cli {
            eval: None,
            diff: Some("x".to_string()),
            by: None,
            max_depth: DEFAULT_MAX_DEPTH,
            bindings: Vec::new(),
        };
        assert!(matches!(run(&cli), Err(Error::Usage(_))));
    }

    #[test]
    fn core_errors_surface_from_run() {
        let cli = parse_args(&["--eval", "1/0"]).unwrap();
        assert_eq!(run(&cli).unwrap_err().to_string(), "division by zero");

        let cli = parse_args(&["--eval", "x"]).unwrap();
        assert_eq!(
            run(&cli).unwrap_err().to_string(),
            "missing value for variable: x"
        );
    }

    #[test]
    fn max_depth_is_configurable() {
        let cli = parse_args(&["--eval", "((((1))))", "--max-depth", "2"]).unwrap();
        assert!(run(&cli).is_err());
    }
}
