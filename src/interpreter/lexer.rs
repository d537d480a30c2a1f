use std::fmt;

use logos::Logos;

use crate::{
    ast::{BinaryOperator, Function},
    error::ParseError,
    interpreter::parser::core::ParseResult,
};

/// A token of a normalized expression.
///
/// Tokens are produced in source order, each paired with the byte offset at
/// which it starts. `[` and `]` are grouping symbols and tokenize exactly like
/// `(` and `)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Token {
    /// Numeric literal such as `42` or `0.5`.
    Number(f64),
    /// The iterator variable.
    Variable,
    /// One of `+ - * / ^`.
    Operator(BinaryOperator),
    /// A builtin function name.
    Function(Function),
    /// `(` or `[`
    LeftParen,
    /// `)` or `]`
    RightParen,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "number {n}"),
            Self::Variable => write!(f, "iterator variable"),
            Self::Operator(op) => write!(f, "operator '{op}'"),
            Self::Function(func) => write!(f, "function '{func}'"),
            Self::LeftParen => write!(f, "'('"),
            Self::RightParen => write!(f, "')'"),
        }
    }
}

/// Raw lexemes recognized by the scanner, before identifiers are resolved
/// against the iterator name and the builtin function table.
#[derive(Logos, Debug, PartialEq, Clone)]
#[logos(skip r"[ \t\r\n\f]+")]
enum Lexeme {
    /// Numeric literal tokens, such as `3`, `3.14` or `.5`.
    #[regex(r"[0-9]+(\.[0-9]+)?", parse_number)]
    #[regex(r"\.[0-9]+", parse_number)]
    Number(f64),
    /// Letters and underscores; the iterator or a function name.
    #[regex(r"[a-zA-Z_]+", |lex| lex.slice().to_string())]
    Identifier(String),
    /// One of `+ - * / ^`.
    #[regex(r"[-+*/^]", |lex| lex.slice().chars().next().and_then(BinaryOperator::from_char))]
    Operator(BinaryOperator),
    /// `(` and `[`
    #[token("(")]
    #[token("[")]
    LParen,
    /// `)` and `]`
    #[token(")")]
    #[token("]")]
    RParen,
}

/// Parses a numeric literal from the current token slice.
///
/// # Returns
/// - `Some(f64)`: The parsed value if successful.
/// - `None`: If the slice is not a valid float.
fn parse_number(lex: &logos::Lexer<Lexeme>) -> Option<f64> {
    lex.slice().parse().ok()
}

/// Splits a normalized expression into tokens.
///
/// Scanning is greedy: `sqrt` and `123.5` are single tokens, operators and
/// grouping symbols are single characters. An identifier becomes
/// [`Token::Variable`] only if it equals `iterator` as a whole, so with
/// iterator `n` the word `sin` is a function and `nn` is rejected.
///
/// No normalization happens here; implicit multiplication must already have
/// been made explicit.
///
/// # Errors
/// - `UnexpectedCharacter` for input the scanner cannot classify.
/// - `UnknownIdentifier` for a word that is neither the iterator nor a
///   function.
///
/// # Example
/// ```
/// use seriesview::{
///     ast::BinaryOperator,
///     interpreter::lexer::{Token, tokenize},
/// };
///
/// let tokens = tokenize("n", "2*n").unwrap();
/// assert_eq!(tokens,
///            vec![(Token::Number(2.0), 0),
///                 (Token::Operator(BinaryOperator::Mul), 1),
///                 (Token::Variable, 2)]);
/// ```
pub fn tokenize(iterator: &str, source: &str) -> ParseResult<Vec<(Token, usize)>> {
    let mut tokens = Vec::new();
    let mut lexer = Lexeme::lexer(source);

    while let Some(lexeme) = lexer.next() {
        let offset = lexer.span().start;
        let Ok(lexeme) = lexeme else {
            return Err(ParseError::UnexpectedCharacter { found: lexer.slice().to_string(),
                                                         offset });
        };

        let token = match lexeme {
            Lexeme::Number(n) => Token::Number(n),
            Lexeme::Identifier(name) => resolve_identifier(iterator, name, offset)?,
            Lexeme::Operator(op) => Token::Operator(op),
            Lexeme::LParen => Token::LeftParen,
            Lexeme::RParen => Token::RightParen,
        };
        tokens.push((token, offset));
    }

    log::trace!("tokenized '{source}' into {} tokens", tokens.len());
    Ok(tokens)
}

/// Decides whether an identifier is the iterator or a builtin function.
///
/// The iterator wins when it shadows a function name, so an iterator called
/// `ln` is still usable.
fn resolve_identifier(iterator: &str, name: String, offset: usize) -> ParseResult<Token> {
    if name == iterator {
        return Ok(Token::Variable);
    }
    Function::from_name(&name).map(Token::Function)
                              .ok_or_else(|| ParseError::UnknownIdentifier { name,
                                                                             iterator:
                                                                                 iterator.to_string(),
                                                                             offset })
}
