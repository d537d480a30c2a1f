/// Largest integer value exactly representable as an `f64` (`2^53 - 1`).
pub const MAX_SAFE_U64_INT: u64 = 9_007_199_254_740_991;

/// Safely converts an `i64` to `f64` if and only if it is exactly
/// representable.
///
/// ## Errors
/// Returns `Err(error)` if the value exceeds `MAX_SAFE_U64_INT` in absolute
/// value.
///
/// ## Example
/// ```
/// use seriesview::util::num::{MAX_SAFE_U64_INT, i64_to_f64_checked};
///
/// let result = i64_to_f64_checked(42, "too big!");
/// assert_eq!(result.unwrap(), 42.0);
///
/// let big = MAX_SAFE_U64_INT as i64 + 1;
/// assert!(i64_to_f64_checked(big, "too big!").is_err());
/// ```
#[allow(clippy::cast_precision_loss)]
pub fn i64_to_f64_checked<E>(value: i64, error: E) -> Result<f64, E> {
    if value.unsigned_abs() > MAX_SAFE_U64_INT {
        return Err(error);
    }
    Ok(value as f64)
}

/// Returns `true` if `value` is finite and has no fractional part.
///
/// ```
/// use seriesview::util::num::is_integral;
///
/// assert!(is_integral(-3.0));
/// assert!(!is_integral(0.5));
/// assert!(!is_integral(f64::INFINITY));
/// ```
#[must_use]
pub fn is_integral(value: f64) -> bool {
    value.is_finite() && value.fract() == 0.0
}

/// Number of integers in the inclusive range `start..=end`.
///
/// Returns `None` when `end < start` or when the count does not fit in a
/// `usize`.
///
/// ```
/// use seriesview::util::num::inclusive_len;
///
/// assert_eq!(inclusive_len(0, 5), Some(6));
/// assert_eq!(inclusive_len(3, 3), Some(1));
/// assert_eq!(inclusive_len(4, 3), None);
/// ```
#[must_use]
pub fn inclusive_len(start: i64, end: i64) -> Option<usize> {
    if end < start {
        return None;
    }
    let span = i128::from(end) - i128::from(start) + 1;
    usize::try_from(span).ok()
}
