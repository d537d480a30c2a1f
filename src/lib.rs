//! # seriesview
//!
//! seriesview compiles a small arithmetic expression in one iterator variable
//! into an expression tree and accumulates the partial sums of the series it
//! describes, either over a finite range of indices or until the sums
//! converge.
//!
//! ```
//! use seriesview::{evaluate_series, parse_expression};
//!
//! let tree = parse_expression("n", "1/n^2").unwrap();
//! let series = evaluate_series(&tree, "n", 1, 3).unwrap();
//! assert_eq!(series.indices(), &[1, 2, 3]);
//! ```

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use crate::{
    interpreter::{
        command::{Argument, Command, parse_command},
        normalizer::check_arguments,
        series::{EndIndex, Series, SeriesConfig},
    },
    report::Report,
};
pub use crate::{
    error::Error,
    interpreter::{
        parser::core::parse_expression,
        series::{evaluate_series, evaluate_series_with},
    },
};

/// Defines the structure of a parsed expression.
///
/// This module declares the `Expr` enum, the operators and builtin functions,
/// and the `ExpressionTree` wrapper returned by the parser and consumed by the
/// evaluator.
pub mod ast;
/// Provides the error types of every stage.
///
/// Validation, tokenization and construction failures are `ParseError`s;
/// evaluation and accumulation failures are `EvaluationError`s; the command
/// grammar has its own `CommandError`. All of them convert into `Error`.
pub mod error;
/// Orchestrates the pipeline from raw text to partial sums.
///
/// # Responsibilities
/// - Validation and normalization, tokenization, tree construction.
/// - Evaluation at one index and accumulation over many.
/// - The command language of the interactive front end.
pub mod interpreter;
/// Text rendering of a finished series.
pub mod report;
/// General numeric helpers.
pub mod util;

/// Parses `expression` and sums it for `iterator` from `start` to `end`.
///
/// This is the typed convenience entry point: the indices are already
/// integers, so only the iterator name and the expression are validated.
///
/// # Errors
/// Any [`ParseError`](error::ParseError) or
/// [`EvaluationError`](error::EvaluationError).
///
/// # Examples
/// ```
/// use seriesview::{interpreter::series::EndIndex, seriesview};
///
/// let series = seriesview("n", 0, 5, "n").unwrap();
/// assert_eq!(series.partial_sums(), &[0.0, 1.0, 3.0, 6.0, 10.0, 15.0]);
///
/// let series = seriesview("k", 0, EndIndex::Converge, "(1/2)^k").unwrap();
/// assert!((series.last().unwrap().1 - 2.0).abs() < 1e-5);
/// ```
pub fn seriesview(iterator: &str,
                  start: i64,
                  end: impl Into<EndIndex>,
                  expression: &str)
                  -> Result<Series, Error> {
    let tree = parse_expression(iterator, expression)?;
    Ok(evaluate_series(&tree, iterator, start, end)?)
}

/// What the front end should do after a command line was run.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// A series was computed.
    Report(Report),
    /// The user asked for help.
    Help,
    /// The user asked to leave.
    Exit,
}

/// Usage text shown by the `help` command.
pub const USAGE: &str = "\
Usage: seriesview(<iterator>, <start>, <end>, <expression>)

  iterator    quoted name made of letters and underscores, e.g. 'n'
  start       integer index
  end         integer index, or inf to sum until the partial sums converge
  expression  quoted expression over digits, the iterator, + - * / ^ ( ) [ ]
              and the functions sqrt sin cos tan ln log

Example: seriesview('n', 0, 10, 'n^2')
Other commands: help, exit";

/// Parses and runs one command line.
///
/// The line must follow the explicit command grammar of
/// [`parse_command`]; it is never executed as code.
///
/// # Errors
/// Returns the first command, validation, parse or evaluation error.
///
/// # Examples
/// ```
/// use seriesview::{Outcome, interpreter::series::SeriesConfig, run_command};
///
/// let outcome = run_command("seriesview('n', 1, 4, 'n')", &SeriesConfig::default()).unwrap();
/// let Outcome::Report(report) = outcome else { panic!("expected a report") };
/// assert_eq!(report.series.partial_sums(), &[1.0, 3.0, 6.0, 10.0]);
///
/// // Division by zero at index 0.
/// assert!(run_command("seriesview('n', 0, 0, '1/n')", &SeriesConfig::default()).is_err());
/// ```
pub fn run_command(line: &str, config: &SeriesConfig) -> Result<Outcome, Error> {
    match parse_command(line)? {
        Command::SeriesView { iterator,
                              start,
                              end,
                              expression, } => {
            run_arguments(&iterator, &start, &end, &expression, config).map(Outcome::Report)
        },
        Command::Help => Ok(Outcome::Help),
        Command::Exit => Ok(Outcome::Exit),
    }
}

/// Validates four loosely typed arguments, then parses and sums the series
/// they describe.
///
/// # Errors
/// Returns the first validation, parse or evaluation error.
///
/// # Examples
/// ```
/// use seriesview::{
///     interpreter::{command::Argument, series::SeriesConfig},
///     run_arguments,
/// };
///
/// let report = run_arguments(&Argument::Text("n".into()),
///                            &Argument::Integer(0),
///                            &Argument::Integer(3),
///                            &Argument::Text("2n".into()),
///                            &SeriesConfig::default()).unwrap();
/// assert_eq!(report.expression, "2*n");
/// assert_eq!(report.series.partial_sums(), &[0.0, 2.0, 6.0, 12.0]);
///
/// let error = run_arguments(&Argument::Text("n".into()),
///                           &Argument::Real(2.5),
///                           &Argument::Integer(3),
///                           &Argument::Text("n".into()),
///                           &SeriesConfig::default()).unwrap_err();
/// assert!(error.to_string().contains("Indices must be integers"));
/// ```
pub fn run_arguments(iterator: &Argument,
                     start: &Argument,
                     end: &Argument,
                     expression: &Argument,
                     config: &SeriesConfig)
                     -> Result<Report, Error> {
    let request = check_arguments(iterator, start, end, expression)?;
    let tree = parse_expression(&request.iterator, &request.expression)?;
    let series = evaluate_series_with(&tree, &request.iterator, request.start, request.end, config)?;

    Ok(Report { iterator: request.iterator,
                start: request.start,
                end: request.end,
                expression: request.expression,
                series })
}
