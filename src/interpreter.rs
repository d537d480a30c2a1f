/// The normalizer module validates raw input and rewrites implicit
/// multiplication.
///
/// It is the first stage of the pipeline and the only one that looks at the
/// loosely typed arguments of a command. Every check happens here, before any
/// tokenization.
///
/// # Responsibilities
/// - Validates the iterator name, the index types and the expression
///   character set.
/// - Inserts explicit `*` for `2n`, `n2` and `)(`.
pub mod normalizer;
/// The lexer module tokenizes a normalized expression.
///
/// # Responsibilities
/// - Converts the expression into numbers, the iterator, operators, function
///   names and grouping symbols, each with its byte offset.
/// - Rejects identifiers that are neither the iterator nor a builtin.
pub mod lexer;
/// The parser module builds the expression tree from tokens.
///
/// # Responsibilities
/// - Resolves precedence, grouping and unary minus with a cursor over an
///   arena of nodes.
/// - Refuses to hand out a partially built tree.
pub mod parser;
/// The evaluator module computes the value of a tree at one iterator value.
///
/// # Responsibilities
/// - Walks the tree bottom-up.
/// - Reports division by zero, domain violations and overflow together with
///   the index and the offending node.
pub mod evaluator;
/// The series module accumulates partial sums over a range of indices or
/// until they converge.
pub mod series;
/// The command module parses the small command language of the interactive
/// front end.
pub mod command;
