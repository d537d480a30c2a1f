use thiserror::Error;

/// Represents all errors that can occur before evaluation: argument
/// validation, tokenization and tree construction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The iterator name is empty or contains characters other than ASCII
    /// letters and underscores.
    #[error("Invalid iterator variable '{name}'. The iterator must consist of letters and underscores only.")]
    InvalidIterator {
        /// The rejected name, as supplied.
        name: String,
    },
    /// A start or end index has the wrong type.
    #[error("Invalid {which} index '{found}'. {expected}.")]
    InvalidIndex {
        /// Which bound was rejected, `start` or `end`.
        which:    &'static str,
        /// A rendering of the rejected argument.
        found:    String,
        /// What was expected instead.
        expected: &'static str,
    },
    /// The expression is not a string, is empty, or contains a character
    /// outside the allowed set.
    #[error("Invalid expression: {details}.")]
    InvalidExpression {
        /// Details about the rejected expression.
        details: String,
    },
    /// The tokenizer found a character it cannot classify.
    #[error("Error at offset {offset}: Unexpected character '{found}'.")]
    UnexpectedCharacter {
        /// The unexpected text.
        found:  String,
        /// Byte offset in the normalized expression.
        offset: usize,
    },
    /// An identifier that is neither the iterator nor a builtin function.
    #[error("Error at offset {offset}: Unknown identifier '{name}'. Only the iterator '{iterator}' and the functions sqrt, sin, cos, tan, ln, log are allowed.")]
    UnknownIdentifier {
        /// The unknown identifier.
        name:     String,
        /// The iterator the expression was parsed with.
        iterator: String,
        /// Byte offset in the normalized expression.
        offset:   usize,
    },
    /// Grouping symbols do not balance.
    #[error("Mismatched parentheses: {details}.")]
    MismatchedParentheses {
        /// Details about the imbalance.
        details: String,
    },
    /// The token sequence ended while an operand was still expected.
    #[error("Incomplete expression: {details}.")]
    IncompleteExpression {
        /// Details about the missing operand.
        details: String,
    },
    /// A token appeared where the tree has no place for it.
    #[error("Error at offset {offset}: Unexpected token {token}.")]
    UnexpectedToken {
        /// The token encountered.
        token:  String,
        /// Byte offset in the normalized expression.
        offset: usize,
    },
    /// The tree would be nested deeper than the builder allows.
    #[error("Error at offset {offset}: Expression is nested more than {limit} levels deep.")]
    NestingTooDeep {
        /// The maximum nesting depth.
        limit:  usize,
        /// Byte offset of the innermost node past the limit.
        offset: usize,
    },
}
