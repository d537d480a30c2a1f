use crate::{
    ast::{Expr, ExpressionTree},
    error::ParseError,
    interpreter::{lexer::Token, normalizer::check_input, parser::arena::TreeBuilder},
};

pub type ParseResult<T> = Result<T, ParseError>;

/// Maximum height of an expression tree, counting grouping symbols.
///
/// Evaluation and rendering recurse once per level, so deeper input is
/// rejected while the tree is still in the arena.
pub const MAX_NESTING_DEPTH: usize = 256;

/// Parses an expression in one iterator variable.
///
/// Runs the whole front half of the pipeline: the iterator and the expression
/// are validated, implicit multiplication is made explicit, the result is
/// tokenized and the tree is built. Nothing is evaluated.
///
/// # Errors
/// Any validation, tokenization or construction error, in that order.
///
/// # Example
/// ```
/// use seriesview::parse_expression;
///
/// let tree = parse_expression("n", "2n+1").unwrap();
/// assert_eq!(tree.source(), "2*n+1");
/// assert_eq!(tree.to_string(), "((2 * n) + 1)");
///
/// assert!(parse_expression("n", "(1+2").is_err());
/// ```
pub fn parse_expression(iterator: &str, text: &str) -> ParseResult<ExpressionTree> {
    let normalized = check_input(iterator, text)?;
    let tokens = crate::interpreter::lexer::tokenize(iterator, &normalized)?;
    let root = build_tree(&tokens, iterator)?;

    Ok(ExpressionTree::new(root, iterator, normalized))
}

/// Builds a tree from an already tokenized expression.
///
/// # Errors
/// - `MismatchedParentheses` if grouping symbols do not balance.
/// - `IncompleteExpression` if an operand is missing, e.g. `x+` or `()`.
/// - `UnexpectedToken` if two operands or two operators meet where the other
///   is required.
pub fn build_tree(tokens: &[(Token, usize)], iterator: &str) -> ParseResult<Expr> {
    TreeBuilder::new(iterator).build(tokens)
}
