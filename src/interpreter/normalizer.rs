use crate::{
    error::ParseError,
    interpreter::{command::Argument, parser::core::ParseResult, series::EndIndex},
};

/// Spellings of the convergence sentinel accepted as a string end index.
pub const INFINITY_SPELLINGS: &[&str] = &["inf", "Inf", "infinity", "Infinity"];

/// Punctuation allowed in an expression besides digits, letters and `_`.
const OPERATOR_CHARS: &str = "+-*/^()[]";

/// Arguments of one series request after validation.
///
/// Produced by [`check_arguments`]; `expression` is already normalized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeriesRequest {
    /// The iterator name.
    pub iterator:   String,
    /// First index, inclusive.
    pub start:      i64,
    /// Last index, inclusive, or the convergence sentinel.
    pub end:        EndIndex,
    /// The normalized expression.
    pub expression: String,
}

/// Validates loosely typed arguments and normalizes the expression.
///
/// The checks run in argument order and stop at the first failure, before
/// anything is tokenized:
/// 1. the iterator must be a string of letters and underscores,
/// 2. the start index must be an integer,
/// 3. the end index must be an integer or the convergence sentinel,
/// 4. the expression must be a string over the allowed characters.
///
/// # Errors
/// `InvalidIterator`, `InvalidIndex` or `InvalidExpression` for the first
/// argument that fails its check.
///
/// # Example
/// ```
/// use seriesview::interpreter::{
///     command::Argument,
///     normalizer::check_arguments,
///     series::EndIndex,
/// };
///
/// let request = check_arguments(&Argument::Text("n".into()),
///                               &Argument::Integer(1),
///                               &Argument::Infinity,
///                               &Argument::Text("2n".into())).unwrap();
/// assert_eq!(request.end, EndIndex::Converge);
/// assert_eq!(request.expression, "2*n");
/// ```
pub fn check_arguments(iterator: &Argument,
                       start: &Argument,
                       end: &Argument,
                       expression: &Argument)
                       -> ParseResult<SeriesRequest> {
    let Argument::Text(iterator) = iterator else {
        return Err(ParseError::InvalidIterator { name: iterator.to_string() });
    };
    validate_iterator(iterator)?;

    let start = match start {
        Argument::Integer(n) => *n,
        other => {
            return Err(ParseError::InvalidIndex { which:    "start",
                                                  found:    other.to_string(),
                                                  expected: "Indices must be integers", });
        },
    };

    let end = match end {
        Argument::Integer(n) => EndIndex::Finite(*n),
        Argument::Infinity => EndIndex::Converge,
        Argument::Text(s) if INFINITY_SPELLINGS.contains(&s.as_str()) => EndIndex::Converge,
        other => {
            return Err(ParseError::InvalidIndex { which:    "end",
                                                  found:    other.to_string(),
                                                  expected: "Indices must be integers or inf", });
        },
    };

    let Argument::Text(expression) = expression else {
        return Err(ParseError::InvalidExpression { details: format!("expected a string, found {expression}") });
    };

    Ok(SeriesRequest { iterator: iterator.clone(),
                       start,
                       end,
                       expression: check_input(iterator, expression)? })
}

/// Validates the iterator and the expression, then normalizes the expression.
///
/// This is the string-only part of [`check_arguments`], used when the indices
/// are already typed.
///
/// # Errors
/// `InvalidIterator` or `InvalidExpression`.
pub fn check_input(iterator: &str, expression: &str) -> ParseResult<String> {
    validate_iterator(iterator)?;
    validate_expression(expression)?;

    let normalized = normalize(iterator, expression);
    if normalized != expression {
        log::debug!("normalized '{expression}' to '{normalized}'");
    }
    Ok(normalized)
}

/// Checks that an iterator name is non-empty and made of ASCII letters and
/// underscores only.
///
/// # Errors
/// `InvalidIterator` otherwise.
pub fn validate_iterator(iterator: &str) -> ParseResult<()> {
    if iterator.is_empty() || !iterator.chars().all(is_word_char) {
        return Err(ParseError::InvalidIterator { name: iterator.to_string() });
    }
    Ok(())
}

/// Checks that an expression is non-empty and uses only digits, ASCII
/// letters, `_` and `+-*/^()[]`.
///
/// # Errors
/// `InvalidExpression` naming the first offending character.
pub fn validate_expression(expression: &str) -> ParseResult<()> {
    if expression.is_empty() {
        return Err(ParseError::InvalidExpression { details: "expression is empty".to_string() });
    }

    if let Some((offset, c)) =
        expression.char_indices()
                  .find(|&(_, c)| !(c.is_ascii_digit() || is_word_char(c) || OPERATOR_CHARS.contains(c)))
    {
        return Err(ParseError::InvalidExpression { details: format!("unrecognized character '{c}' at offset {offset}") });
    }
    Ok(())
}

const fn is_word_char(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

/// A maximal run of characters of one class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Run<'a> {
    Digits(&'a str),
    Word(&'a str),
    Symbol(char),
}

/// Splits a validated expression into digit runs, word runs and single
/// symbols.
fn runs(expression: &str) -> Vec<Run<'_>> {
    let mut runs = Vec::new();
    let mut rest = expression;

    while let Some(first) = rest.chars().next() {
        let class: fn(char) -> bool = if first.is_ascii_digit() {
            |c| c.is_ascii_digit()
        } else if is_word_char(first) {
            is_word_char
        } else {
            runs.push(Run::Symbol(first));
            rest = &rest[first.len_utf8()..];
            continue;
        };

        let len = rest.find(|c| !class(c)).unwrap_or(rest.len());
        let (run, tail) = rest.split_at(len);
        runs.push(if first.is_ascii_digit() { Run::Digits(run) } else { Run::Word(run) });
        rest = tail;
    }

    runs
}

/// Makes implicit multiplication explicit.
///
/// Two rewrites are applied, and no others:
/// - a digit run touching a word that is exactly the iterator, in either
///   order: `2n` becomes `2*n`, `n2` becomes `n*2`;
/// - a closing grouping symbol directly followed by an opening one: `)(`
///   becomes `)*(`, and likewise for `[` and `]`.
///
/// Words that merely contain the iterator are left alone, so with iterator
/// `n` the input `sin2` is unchanged.
///
/// # Example
/// ```
/// use seriesview::interpreter::normalizer::normalize;
///
/// assert_eq!(normalize("n", "3n^2"), "3*n^2");
/// assert_eq!(normalize("k", "(k+1)(k-1)"), "(k+1)*(k-1)");
/// assert_eq!(normalize("n", "sin2"), "sin2");
/// ```
#[must_use]
pub fn normalize(iterator: &str, expression: &str) -> String {
    let runs = runs(expression);
    let mut out = String::with_capacity(expression.len() + 4);

    for (i, run) in runs.iter().enumerate() {
        if i > 0 && needs_star(iterator, runs[i - 1], *run) {
            out.push('*');
        }
        match run {
            Run::Digits(s) | Run::Word(s) => out.push_str(s),
            Run::Symbol(c) => out.push(*c),
        }
    }

    out
}

fn needs_star(iterator: &str, previous: Run<'_>, next: Run<'_>) -> bool {
    match (previous, next) {
        (Run::Digits(_), Run::Word(w)) | (Run::Word(w), Run::Digits(_)) => w == iterator,
        (Run::Symbol(close), Run::Symbol(open)) => {
            matches!(close, ')' | ']') && matches!(open, '(' | '[')
        },
        _ => false,
    }
}
