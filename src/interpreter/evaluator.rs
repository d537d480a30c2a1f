/// Core evaluation logic.
///
/// Holds the evaluation context that binds the iterator to one value and the
/// recursive walk over the tree.
pub mod core;

/// Unary operator evaluation.
pub mod unary;

/// Binary operator evaluation.
///
/// Arithmetic on two operands, including the domain checks for division and
/// exponentiation.
pub mod binary;

/// Builtin function evaluation.
///
/// Dispatches `sqrt`, `sin`, `cos`, `tan`, `ln` and `log` with their domain
/// restrictions.
pub mod function;
