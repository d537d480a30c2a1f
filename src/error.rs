/// Parsing errors.
///
/// Defines every error that can occur while validating, normalizing,
/// tokenizing or building an expression, before any evaluation happens.
pub mod parse_error;
/// Evaluation errors.
///
/// Contains the errors raised while evaluating a tree at one index or while
/// accumulating partial sums, such as division by zero, domain violations and
/// a convergence loop that hits its iteration cap.
pub mod evaluation_error;
/// Command errors.
///
/// Errors of the small command grammar used by the interactive front end.
pub mod command_error;

pub use command_error::CommandError;
pub use evaluation_error::EvaluationError;
pub use parse_error::ParseError;

/// Any error the crate can produce, from command parsing to accumulation.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The command line could not be understood.
    #[error(transparent)]
    Command(#[from] CommandError),
    /// The arguments or the expression were rejected before evaluation.
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// Evaluating or accumulating the series failed.
    #[error(transparent)]
    Evaluation(#[from] EvaluationError),
}
