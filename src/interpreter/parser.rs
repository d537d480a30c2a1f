/// Core parsing logic and the public entry points.
///
/// Contains the result alias used throughout parsing and the functions that
/// run validation, tokenization and tree construction in order.
pub mod core;

/// Arena-based tree construction.
///
/// Builds the expression tree with a cursor that re-parents subtrees as
/// operators arrive, keeping parent links only for the duration of the build.
pub mod arena;
