use std::{
    fmt,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    time::{Duration, Instant},
};

use crate::{
    ast::ExpressionTree,
    error::EvaluationError,
    interpreter::evaluator::core::{Context, EvalResult},
    util::num::inclusive_len,
};

/// Default convergence threshold on the difference of consecutive partial
/// sums.
pub const DEFAULT_TOLERANCE: f64 = 1e-6;
/// Default cap on the number of terms in convergence mode.
pub const DEFAULT_MAX_ITERATIONS: usize = 1_000_000;
/// How many terms pass between two reads of the clock.
const CLOCK_CHECK_INTERVAL: usize = 1024;
/// Upper bound on the capacity reserved up front for a finite range.
const PREALLOCATION_LIMIT: usize = 1 << 16;

/// The last index of a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EndIndex {
    /// Sum up to and including this index.
    Finite(i64),
    /// Sum until consecutive partial sums differ by less than the tolerance.
    Converge,
}

impl From<i64> for EndIndex {
    fn from(value: i64) -> Self {
        Self::Finite(value)
    }
}

impl fmt::Display for EndIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Finite(n) => write!(f, "{n}"),
            Self::Converge => write!(f, "inf"),
        }
    }
}

/// Tuning and safety limits of an accumulation run.
///
/// The defaults match [`DEFAULT_TOLERANCE`] and [`DEFAULT_MAX_ITERATIONS`]
/// with no timeout and no cancellation flag.
///
/// # Example
/// ```
/// use std::time::Duration;
///
/// use seriesview::interpreter::series::SeriesConfig;
///
/// let config = SeriesConfig::default().with_max_iterations(500)
///                                     .with_timeout(Duration::from_secs(2));
/// assert_eq!(config.max_iterations(), 500);
/// assert_eq!(config.timeout(), Some(Duration::from_secs(2)));
/// assert_eq!(config.tolerance(), 1e-6);
/// ```
#[derive(Debug, Clone)]
pub struct SeriesConfig {
    tolerance:      f64,
    max_iterations: usize,
    timeout:        Option<Duration>,
    cancel:         Option<Arc<AtomicBool>>,
}

impl Default for SeriesConfig {
    fn default() -> Self {
        Self { tolerance:      DEFAULT_TOLERANCE,
               max_iterations: DEFAULT_MAX_ITERATIONS,
               timeout:        None,
               cancel:         None, }
    }
}

impl SeriesConfig {
    /// Sets the convergence threshold.
    #[must_use]
    pub const fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets the maximum number of terms evaluated in convergence mode.
    #[must_use]
    pub const fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Sets a time budget for the whole run.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets a flag that aborts the run once another thread stores `true`.
    #[must_use]
    pub fn with_cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    /// The convergence threshold.
    #[must_use]
    pub const fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// The iteration cap of convergence mode.
    #[must_use]
    pub const fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    /// The time budget, if any.
    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}

/// Partial sums of a series, index-aligned with the iterator values that
/// produced them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Series {
    indices:      Vec<i64>,
    partial_sums: Vec<f64>,
}

impl Series {
    fn with_capacity(capacity: usize) -> Self {
        Self { indices:      Vec::with_capacity(capacity),
               partial_sums: Vec::with_capacity(capacity), }
    }

    fn push(&mut self, index: i64, sum: f64) {
        self.indices.push(index);
        self.partial_sums.push(sum);
    }

    /// The iterator values, in evaluation order.
    #[must_use]
    pub fn indices(&self) -> &[i64] {
        &self.indices
    }

    /// The running totals, one per index.
    #[must_use]
    pub fn partial_sums(&self) -> &[f64] {
        &self.partial_sums
    }

    /// Number of terms summed.
    #[must_use]
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// `true` if no term was summed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// The last index and the final partial sum.
    #[must_use]
    pub fn last(&self) -> Option<(i64, f64)> {
        Some((*self.indices.last()?, *self.partial_sums.last()?))
    }

    /// Iterates over `(index, partial sum)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (i64, f64)> + '_ {
        self.indices.iter().copied().zip(self.partial_sums.iter().copied())
    }

    /// Splits the series into its index and partial sum vectors.
    #[must_use]
    pub fn into_parts(self) -> (Vec<i64>, Vec<f64>) {
        (self.indices, self.partial_sums)
    }
}

/// Watches the cancellation flag and the deadline of one run.
struct Watchdog<'c> {
    config:  &'c SeriesConfig,
    started: Instant,
}

impl<'c> Watchdog<'c> {
    fn new(config: &'c SeriesConfig) -> Self {
        Self { config,
               started: Instant::now() }
    }

    /// Fails if the run was cancelled or, every few terms, if it ran out of
    /// time. `index` is the index about to be evaluated.
    fn check(&self, index: i64, iteration: usize) -> EvalResult<()> {
        if let Some(flag) = &self.config.cancel
           && flag.load(Ordering::Relaxed)
        {
            return Err(EvaluationError::Cancelled { index });
        }

        if iteration % CLOCK_CHECK_INTERVAL == 0
           && let Some(timeout) = self.config.timeout()
        {
            let elapsed = self.started.elapsed();
            if elapsed >= timeout {
                return Err(EvaluationError::TimedOut { index,
                                                       elapsed });
            }
        }
        Ok(())
    }
}

/// Accumulates partial sums with the default configuration.
///
/// # Errors
/// See [`evaluate_series_with`].
///
/// # Example
/// ```
/// use seriesview::{evaluate_series, parse_expression};
///
/// let tree = parse_expression("n", "n").unwrap();
/// let series = evaluate_series(&tree, "n", 0, 5).unwrap();
/// assert_eq!(series.partial_sums(), &[0.0, 1.0, 3.0, 6.0, 10.0, 15.0]);
/// assert_eq!(series.indices(), &[0, 1, 2, 3, 4, 5]);
/// ```
pub fn evaluate_series(tree: &ExpressionTree,
                       iterator: &str,
                       start: i64,
                       end: impl Into<EndIndex>)
                       -> EvalResult<Series> {
    evaluate_series_with(tree, iterator, start, end, &SeriesConfig::default())
}

/// Accumulates partial sums of `tree` as `iterator` runs from `start`.
///
/// With [`EndIndex::Finite`] every index of `start..=end` is evaluated once
/// and the result has exactly `end - start + 1` entries. With
/// [`EndIndex::Converge`] the loop stops after the first term that changes
/// the running total by less than the configured tolerance, the running total
/// before the first term being zero.
///
/// Both modes stop with the first evaluation error; nothing is retried.
///
/// # Errors
/// - `InvalidRange` if a finite `end` is smaller than `start`.
/// - `ConvergenceNotReached` if the iteration cap is hit.
/// - `IndexOverflow` if the iterator would pass `i64::MAX`.
/// - `Overflow` if a partial sum stops being finite.
/// - `Cancelled` or `TimedOut` from the configured limits.
/// - Any evaluation error, carrying the index it occurred at.
pub fn evaluate_series_with(tree: &ExpressionTree,
                            iterator: &str,
                            start: i64,
                            end: impl Into<EndIndex>,
                            config: &SeriesConfig)
                            -> EvalResult<Series> {
    let watchdog = Watchdog::new(config);

    match end.into() {
        EndIndex::Finite(end) => accumulate_range(tree, iterator, start, end, &watchdog),
        EndIndex::Converge => accumulate_until_converged(tree, iterator, start, &watchdog),
    }
}

fn add_term(tree: &ExpressionTree, iterator: &str, index: i64, total: f64) -> EvalResult<f64> {
    let term = Context::new(iterator, index)?.eval(tree.root())?;
    let sum = total + term;

    if !sum.is_finite() {
        return Err(EvaluationError::Overflow { index,
                                               operation: "partial sum".to_string(),
                                               offset: 0 });
    }
    log::trace!("{iterator}={index}: term {term}, partial sum {sum}");
    Ok(sum)
}

fn accumulate_range(tree: &ExpressionTree,
                    iterator: &str,
                    start: i64,
                    end: i64,
                    watchdog: &Watchdog<'_>)
                    -> EvalResult<Series> {
    if end < start {
        return Err(EvaluationError::InvalidRange { start, end });
    }
    let capacity = inclusive_len(start, end).map_or(PREALLOCATION_LIMIT, |len| len.min(PREALLOCATION_LIMIT));
    let mut series = Series::with_capacity(capacity);
    let mut total = 0.0;

    for (iteration, index) in (start..=end).enumerate() {
        watchdog.check(index, iteration)?;
        total = add_term(tree, iterator, index, total)?;
        series.push(index, total);
    }

    log::debug!("summed {} terms of '{}' from {start} to {end}", series.len(), tree.source());
    Ok(series)
}

fn accumulate_until_converged(tree: &ExpressionTree,
                              iterator: &str,
                              start: i64,
                              watchdog: &Watchdog<'_>)
                              -> EvalResult<Series> {
    let config = watchdog.config;
    let mut series = Series::default();
    let mut previous = 0.0;
    let mut difference = f64::INFINITY;
    let mut index = start;

    loop {
        let iteration = series.len();
        if iteration >= config.max_iterations() {
            return Err(EvaluationError::ConvergenceNotReached { iterations:      iteration,
                                                                last_sum:        previous,
                                                                last_difference: difference, });
        }
        watchdog.check(index, iteration)?;

        let sum = add_term(tree, iterator, index, previous)?;
        difference = (sum - previous).abs();
        series.push(index, sum);

        if difference < config.tolerance() {
            log::debug!("'{}' converged to {sum} after {} terms", tree.source(), series.len());
            return Ok(series);
        }

        previous = sum;
        index = index.checked_add(1)
                     .ok_or(EvaluationError::IndexOverflow { iterations: series.len() })?;
    }
}
