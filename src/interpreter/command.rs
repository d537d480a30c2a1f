use std::{fmt, iter::Peekable};

use logos::Logos;

use crate::{error::CommandError, interpreter::normalizer::INFINITY_SPELLINGS};

/// Result type of the command grammar.
pub type CommandResult<T> = Result<T, CommandError>;

/// A loosely typed command argument.
///
/// The grammar only decides what kind of literal was written; whether that
/// kind is acceptable for a given position is checked afterwards by
/// [`check_arguments`](crate::interpreter::normalizer::check_arguments).
#[derive(Debug, Clone, PartialEq)]
pub enum Argument {
    /// An integer literal, e.g. `10` or `-3`.
    Integer(i64),
    /// A decimal literal, e.g. `2.5`.
    Real(f64),
    /// A quoted string, e.g. `'n^2'`.
    Text(String),
    /// The bare convergence sentinel, `inf`.
    Infinity,
}

impl Argument {
    /// Classifies a raw command-line argument that arrived without quotes.
    ///
    /// ```
    /// use seriesview::interpreter::command::Argument;
    ///
    /// assert_eq!(Argument::from_raw("12"), Argument::Integer(12));
    /// assert_eq!(Argument::from_raw("inf"), Argument::Infinity);
    /// assert_eq!(Argument::from_raw("n^2"), Argument::Text("n^2".into()));
    /// ```
    #[must_use]
    pub fn from_raw(raw: &str) -> Self {
        if let Ok(n) = raw.parse() {
            return Self::Integer(n);
        }
        if INFINITY_SPELLINGS.contains(&raw) {
            return Self::Infinity;
        }
        if let Ok(x) = raw.parse::<f64>()
           && x.is_finite()
        {
            return Self::Real(x);
        }
        Self::Text(raw.to_string())
    }
}

impl fmt::Display for Argument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(n) => write!(f, "{n}"),
            Self::Real(x) => write!(f, "{x:?}"),
            Self::Text(s) => write!(f, "'{s}'"),
            Self::Infinity => write!(f, "inf"),
        }
    }
}

/// A parsed command line.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// `seriesview(iterator, start, end, expression)`
    SeriesView {
        /// The iterator argument.
        iterator:   Argument,
        /// The start index argument.
        start:      Argument,
        /// The end index argument.
        end:        Argument,
        /// The expression argument.
        expression: Argument,
    },
    /// `help`
    Help,
    /// `exit` or `quit`
    Exit,
}

/// Tokens of the command grammar.
#[derive(Logos, Debug, PartialEq, Clone)]
#[logos(skip r"[ \t\r\n\f]+")]
enum CommandToken {
    /// Bare words such as `seriesview` or `inf`.
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_string())]
    Word(String),
    /// Signed integer literals; parsed later so overflow can be reported.
    #[regex(r"[+-]?[0-9]+", |lex| lex.slice().to_string())]
    Integer(String),
    /// Signed decimal literals such as `2.5` or `-.5`.
    #[regex(r"[+-]?[0-9]*\.[0-9]+", |lex| lex.slice().parse::<f64>().ok())]
    Real(f64),
    /// Single or double quoted strings, without the quotes.
    #[regex(r"'[^']*'", strip_quotes)]
    #[regex(r#""[^"]*""#, strip_quotes)]
    Text(String),
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `,`
    #[token(",")]
    Comma,
}

fn strip_quotes(lex: &logos::Lexer<CommandToken>) -> String {
    let slice = lex.slice();
    slice[1..slice.len() - 1].to_string()
}

impl fmt::Display for CommandToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Word(w) => write!(f, "'{w}'"),
            Self::Integer(n) => write!(f, "{n}"),
            Self::Real(x) => write!(f, "{x:?}"),
            Self::Text(s) => write!(f, "string '{s}'"),
            Self::LParen => write!(f, "'('"),
            Self::RParen => write!(f, "')'"),
            Self::Comma => write!(f, "','"),
        }
    }
}

/// Parses one command line.
///
/// The grammar:
///
/// ```text
/// command    := "seriesview" "(" argument ("," argument)* ")"
///             | ("help" | "exit" | "quit") ("(" ")")?
/// argument   := quoted-string | integer | decimal | "inf"
/// ```
///
/// Nothing else is accepted; in particular the line is never handed to a
/// general-purpose evaluator.
///
/// # Errors
/// A `CommandError` describing the first token that does not fit.
///
/// # Example
/// ```
/// use seriesview::interpreter::command::{Argument, Command, parse_command};
///
/// let command = parse_command("seriesview('n', 0, inf, '1/n^2')").unwrap();
/// assert_eq!(command,
///            Command::SeriesView { iterator:   Argument::Text("n".into()),
///                                  start:      Argument::Integer(0),
///                                  end:        Argument::Infinity,
///                                  expression: Argument::Text("1/n^2".into()), });
/// ```
pub fn parse_command(line: &str) -> CommandResult<Command> {
    let tokens = lex_command(line)?;
    let mut iter = tokens.iter().peekable();

    let name = match iter.next() {
        Some((CommandToken::Word(name), _)) => name,
        Some((token, column)) => {
            return Err(CommandError::UnexpectedToken { expected: "a command name",
                                                       found:    token.to_string(),
                                                       column:   *column, });
        },
        None => return Err(CommandError::UnexpectedEnd { expected: "a command name" }),
    };

    let command = match name.to_ascii_lowercase().as_str() {
        "seriesview" => parse_series_view(&mut iter)?,
        "help" => {
            parse_empty_call(&mut iter)?;
            Command::Help
        },
        "exit" | "quit" => {
            parse_empty_call(&mut iter)?;
            Command::Exit
        },
        _ => return Err(CommandError::UnknownCommand { name: name.clone() }),
    };

    if let Some((token, column)) = iter.next() {
        return Err(CommandError::UnexpectedToken { expected: "end of command",
                                                   found:    token.to_string(),
                                                   column:   *column, });
    }
    Ok(command)
}

/// Tokenizes a command line, pairing each token with its 1-based column.
fn lex_command(line: &str) -> CommandResult<Vec<(CommandToken, usize)>> {
    let mut tokens = Vec::new();
    let mut lexer = CommandToken::lexer(line);

    while let Some(token) = lexer.next() {
        let column = lexer.span().start + 1;
        match token {
            Ok(tok) => tokens.push((tok, column)),
            Err(()) => {
                return Err(CommandError::UnexpectedInput { found: lexer.slice().to_string(),
                                                           column });
            },
        }
    }

    Ok(tokens)
}

fn parse_series_view<'a, I>(tokens: &mut Peekable<I>) -> CommandResult<Command>
    where I: Iterator<Item = &'a (CommandToken, usize)>
{
    expect(tokens, &CommandToken::LParen, "'('")?;
    let arguments = parse_comma_separated(tokens, parse_argument, &CommandToken::RParen)?;

    let [iterator, start, end, expression]: [Argument; 4] =
        arguments.try_into()
                 .map_err(|args: Vec<Argument>| CommandError::ArgumentCount { found: args.len() })?;

    Ok(Command::SeriesView { iterator,
                             start,
                             end,
                             expression })
}

/// Accepts nothing or an empty argument list `()`.
fn parse_empty_call<'a, I>(tokens: &mut Peekable<I>) -> CommandResult<()>
    where I: Iterator<Item = &'a (CommandToken, usize)>
{
    if let Some((CommandToken::LParen, _)) = tokens.peek() {
        tokens.next();
        expect(tokens, &CommandToken::RParen, "')'")?;
    }
    Ok(())
}

fn expect<'a, I>(tokens: &mut Peekable<I>,
                 expected_token: &CommandToken,
                 expected: &'static str)
                 -> CommandResult<()>
    where I: Iterator<Item = &'a (CommandToken, usize)>
{
    match tokens.next() {
        Some((tok, _)) if tok == expected_token => Ok(()),
        Some((tok, column)) => Err(CommandError::UnexpectedToken { expected,
                                                                   found: tok.to_string(),
                                                                   column: *column }),
        None => Err(CommandError::UnexpectedEnd { expected }),
    }
}

/// Parses a comma-separated list of items until a closing token.
///
/// An immediately encountered closing token produces an empty list.
///
/// Grammar (simplified): `list := item ("," item)*`
fn parse_comma_separated<'a, I, T>(tokens: &mut Peekable<I>,
                                   parse_item: impl Fn(&mut Peekable<I>) -> CommandResult<T>,
                                   closing: &CommandToken)
                                   -> CommandResult<Vec<T>>
    where I: Iterator<Item = &'a (CommandToken, usize)>
{
    let mut items = Vec::new();
    if let Some((tok, _)) = tokens.peek()
       && tok == closing
    {
        tokens.next();
        return Ok(items);
    }
    loop {
        items.push(parse_item(tokens)?);
        match tokens.next() {
            Some((CommandToken::Comma, _)) => {},
            Some((tok, _)) if tok == closing => break,
            Some((tok, column)) => {
                return Err(CommandError::UnexpectedToken { expected: "',' or ')'",
                                                           found:    tok.to_string(),
                                                           column:   *column, });
            },
            None => return Err(CommandError::UnexpectedEnd { expected: "',' or ')'" }),
        }
    }
    Ok(items)
}

fn parse_argument<'a, I>(tokens: &mut Peekable<I>) -> CommandResult<Argument>
    where I: Iterator<Item = &'a (CommandToken, usize)>
{
    const EXPECTED: &str = "a quoted string, a number or inf";

    match tokens.next() {
        Some((CommandToken::Text(s), _)) => Ok(Argument::Text(s.clone())),
        Some((CommandToken::Integer(n), column)) => {
            n.parse()
             .map(Argument::Integer)
             .map_err(|_| CommandError::LiteralTooLarge { column: *column })
        },
        Some((CommandToken::Real(x), _)) => Ok(Argument::Real(*x)),
        Some((CommandToken::Word(w), _)) if INFINITY_SPELLINGS.contains(&w.as_str()) => {
            Ok(Argument::Infinity)
        },
        Some((tok, column)) => Err(CommandError::UnexpectedToken { expected: EXPECTED,
                                                                   found:    tok.to_string(),
                                                                   column:   *column, }),
        None => Err(CommandError::UnexpectedEnd { expected: EXPECTED }),
    }
}
