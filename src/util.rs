/// Numeric conversion helpers.
///
/// This module provides safe functions for converting iterator values between
/// `i64`, `usize` and `f64` without silent data loss. All fallible helpers
/// return a `Result` or an `Option` instead of truncating.
pub mod num;
