use std::time::Duration;

use thiserror::Error;

/// Represents all errors that can occur while evaluating a tree or
/// accumulating a series.
///
/// Errors raised by a single evaluation carry the iterator `index` at which
/// they happened and the byte `offset` of the offending node in the
/// normalized expression.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvaluationError {
    /// Attempted division by zero, or zero raised to a negative power.
    #[error("Error at index {index}: Division by zero in '{operator}' at offset {offset}. Double check your indices.")]
    DivisionByZero {
        /// The iterator value being evaluated.
        index:    i64,
        /// The operator that divided.
        operator: char,
        /// Byte offset of the operator.
        offset:   usize,
    },
    /// A function or operator received an argument outside its domain.
    #[error("Error at index {index}: {operation} is undefined for {argument} (offset {offset}).")]
    Domain {
        /// The iterator value being evaluated.
        index:     i64,
        /// The function name or operator symbol.
        operation: String,
        /// The offending argument.
        argument:  f64,
        /// Byte offset of the function or operator.
        offset:    usize,
    },
    /// An intermediate result is not a finite number.
    #[error("Error at index {index}: Result of '{operation}' overflowed (offset {offset}).")]
    Overflow {
        /// The iterator value being evaluated.
        index:     i64,
        /// The function name or operator symbol.
        operation: String,
        /// Byte offset of the function or operator.
        offset:    usize,
    },
    /// The tree references a variable other than the iterator.
    #[error("Error at index {index}: Unknown variable '{name}', expected the iterator '{iterator}'.")]
    UnknownVariable {
        /// The referenced name.
        name:     String,
        /// The iterator supplied to the evaluator.
        iterator: String,
        /// The iterator value being evaluated.
        index:    i64,
    },
    /// The iterator value cannot be represented exactly as a float.
    #[error("Error at index {index}: Index is too large to be represented exactly.")]
    IndexTooLarge {
        /// The iterator value being evaluated.
        index: i64,
    },
    /// A finite range whose end lies before its start.
    #[error("Invalid range: end index {end} is smaller than start index {start}.")]
    InvalidRange {
        /// The start index.
        start: i64,
        /// The end index.
        end:   i64,
    },
    /// The convergence loop hit its iteration cap.
    #[error("Series did not converge within {iterations} terms (last partial sum {last_sum}, last difference {last_difference}).")]
    ConvergenceNotReached {
        /// Number of terms evaluated.
        iterations:      usize,
        /// The last partial sum computed.
        last_sum:        f64,
        /// The last absolute difference between partial sums.
        last_difference: f64,
    },
    /// The iterator ran past `i64::MAX`.
    #[error("Index overflow after {iterations} terms.")]
    IndexOverflow {
        /// Number of terms evaluated.
        iterations: usize,
    },
    /// The caller cancelled the run.
    #[error("Evaluation cancelled at index {index}.")]
    Cancelled {
        /// The index that would have been evaluated next.
        index: i64,
    },
    /// The run exceeded its time budget.
    #[error("Evaluation timed out after {elapsed:?} at index {index}.")]
    TimedOut {
        /// The index that would have been evaluated next.
        index:   i64,
        /// Time spent before giving up.
        elapsed: Duration,
    },
}

impl EvaluationError {
    /// The iterator value the error refers to, if any.
    #[must_use]
    pub const fn index(&self) -> Option<i64> {
        match self {
            Self::DivisionByZero { index, .. }
            | Self::Domain { index, .. }
            | Self::Overflow { index, .. }
            | Self::UnknownVariable { index, .. }
            | Self::IndexTooLarge { index }
            | Self::Cancelled { index }
            | Self::TimedOut { index, .. } => Some(*index),
            Self::InvalidRange { .. }
            | Self::ConvergenceNotReached { .. }
            | Self::IndexOverflow { .. } => None,
        }
    }
}
