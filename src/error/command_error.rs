use thiserror::Error;

/// Errors of the interactive command grammar.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    /// A character sequence that is not part of the grammar.
    #[error("Error at column {column}: Unexpected input '{found}'.")]
    UnexpectedInput {
        /// The unexpected text.
        found:  String,
        /// Column (1-based) in the command line.
        column: usize,
    },
    /// A token that is valid on its own but not at this position.
    #[error("Error at column {column}: Expected {expected}, found {found}.")]
    UnexpectedToken {
        /// What the grammar expected.
        expected: &'static str,
        /// A rendering of what was found.
        found:    String,
        /// Column (1-based) in the command line.
        column:   usize,
    },
    /// The line ended early.
    #[error("Unexpected end of command, expected {expected}.")]
    UnexpectedEnd {
        /// What the grammar expected.
        expected: &'static str,
    },
    /// A command name other than `seriesview`, `help`, `exit` or `quit`.
    #[error("Unknown command '{name}'. Usage: seriesview('n', 0, 10, 'n^2')")]
    UnknownCommand {
        /// The command name.
        name: String,
    },
    /// `seriesview` was called with the wrong number of arguments.
    #[error("seriesview takes 4 arguments but {found} were supplied. Usage: seriesview('n', 0, 10, 'n^2')")]
    ArgumentCount {
        /// Number of arguments supplied.
        found: usize,
    },
    /// An integer literal does not fit in 64 bits.
    #[error("Error at column {column}: Integer literal is too large.")]
    LiteralTooLarge {
        /// Column (1-based) in the command line.
        column: usize,
    },
}
