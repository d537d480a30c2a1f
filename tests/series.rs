use std::{
    f64::consts::PI,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    thread,
    time::Duration,
};

use seriesview::{
    Error, evaluate_series, evaluate_series_with,
    error::EvaluationError,
    interpreter::series::{EndIndex, SeriesConfig},
    parse_expression, seriesview,
};

fn series_error(expression: &str, start: i64, end: impl Into<EndIndex>) -> EvaluationError {
    match seriesview("n", start, end, expression) {
        Ok(series) => panic!("'{expression}' summed to {:?} but was expected to fail", series.last()),
        Err(Error::Evaluation(e)) => e,
        Err(e) => panic!("'{expression}' failed before evaluation: {e}"),
    }
}

#[test]
fn finite_partial_sums() {
    let series = seriesview("n", 0, 5, "n").unwrap();
    assert_eq!(series.indices(), &[0, 1, 2, 3, 4, 5]);
    assert_eq!(series.partial_sums(), &[0.0, 1.0, 3.0, 6.0, 10.0, 15.0]);

    let series = seriesview("n", 1, 4, "n^2").unwrap();
    assert_eq!(series.partial_sums(), &[1.0, 5.0, 14.0, 30.0]);
    assert_eq!(series.last(), Some((4, 30.0)));
}

#[test]
fn single_index_range() {
    let series = seriesview("n", 7, 7, "2n").unwrap();
    assert_eq!(series.len(), 1);
    assert_eq!(series.iter().collect::<Vec<_>>(), vec![(7, 14.0)]);
}

#[test]
fn negative_indices() {
    let series = seriesview("n", -2, 2, "n").unwrap();
    assert_eq!(series.indices(), &[-2, -1, 0, 1, 2]);
    assert_eq!(series.partial_sums(), &[-2.0, -3.0, -3.0, -2.0, 0.0]);
}

#[test]
fn reversed_range_is_rejected() {
    assert_eq!(series_error("n", 5, 3), EvaluationError::InvalidRange { start: 5, end: 3 });
}

#[test]
fn full_i64_range_is_not_reported_as_reversed() {
    assert_eq!(series_error("n", i64::MIN, i64::MAX), EvaluationError::IndexTooLarge { index: i64::MIN });
    assert_eq!(series_error("n", i64::MAX, i64::MIN),
               EvaluationError::InvalidRange { start: i64::MAX,
                                               end:   i64::MIN, });
}

#[test]
fn series_splits_into_parts() {
    let (indices, partial_sums) = seriesview("n", 2, 4, "n").unwrap().into_parts();
    assert_eq!(indices, vec![2, 3, 4]);
    assert_eq!(partial_sums, vec![2.0, 5.0, 9.0]);
}

#[test]
fn first_failing_index_aborts_the_run() {
    let error = series_error("1/n", 0, 10);
    assert!(matches!(error, EvaluationError::DivisionByZero { index: 0, .. }));

    let error = series_error("1/n", -3, 3);
    assert_eq!(error.index(), Some(0));

    let error = series_error("sqrt(5-n)", 0, 10);
    assert_eq!(error.index(), Some(6));
}

#[test]
fn converges_on_inverse_squares() {
    let series = seriesview("n", 1, EndIndex::Converge, "1/n^2").unwrap();
    let sums = series.partial_sums();
    let (last_index, last_sum) = series.last().unwrap();

    // 1/1000^2 sits right at the tolerance, so rounding decides between the two.
    assert!(matches!(last_index, 1000 | 1001), "stopped at {last_index}");
    assert_eq!(series.indices()[0], 1);

    let n = sums.len();
    assert!((sums[n - 1] - sums[n - 2]).abs() < 1e-6);
    assert!((sums[n - 2] - sums[n - 3]).abs() >= 1e-6);

    let tail = PI * PI / 6.0 - last_sum;
    assert!(tail > 0.0 && tail < 1.1e-3, "tail {tail}");
}

#[test]
fn converges_on_geometric_series() {
    let series = seriesview("k", 0, EndIndex::Converge, "(1/2)^k").unwrap();
    let (_, sum) = series.last().unwrap();
    assert!((sum - 2.0).abs() < 1e-5, "sum {sum}");
}

#[test]
fn first_term_below_tolerance_stops_immediately() {
    let series = seriesview("n", 0, EndIndex::Converge, "0").unwrap();
    assert_eq!(series.len(), 1);
    assert_eq!(series.last(), Some((0, 0.0)));
}

#[test]
fn custom_tolerance() {
    let tree = parse_expression("n", "1/n^2").unwrap();
    let config = SeriesConfig::default().with_tolerance(0.1);
    let series = evaluate_series_with(&tree, "n", 1, EndIndex::Converge, &config).unwrap();
    assert_eq!(series.indices(), &[1, 2, 3, 4]);
}

#[test]
fn divergent_series_hits_the_cap() {
    let tree = parse_expression("n", "1").unwrap();
    let config = SeriesConfig::default().with_max_iterations(100);
    let error = evaluate_series_with(&tree, "n", 0, EndIndex::Converge, &config).unwrap_err();

    let EvaluationError::ConvergenceNotReached { iterations,
                                                 last_sum,
                                                 last_difference, } = error
    else {
        panic!("expected the iteration cap, got {error}")
    };
    assert_eq!(iterations, 100);
    assert_eq!(last_sum, 100.0);
    assert_eq!(last_difference, 1.0);
}

#[test]
fn exploding_series_overflows() {
    let error = series_error("10^n", 0, EndIndex::Converge);
    assert!(matches!(error, EvaluationError::Overflow { index: 309, .. }), "{error}");
}

#[test]
fn finite_mode_ignores_the_iteration_cap() {
    let tree = parse_expression("n", "1").unwrap();
    let config = SeriesConfig::default().with_max_iterations(10);
    let series = evaluate_series_with(&tree, "n", 1, 1000, &config).unwrap();
    assert_eq!(series.len(), 1000);
    assert_eq!(series.last(), Some((1000, 1000.0)));
}

#[test]
fn cancelled_before_start() {
    let flag = Arc::new(AtomicBool::new(true));
    let tree = parse_expression("n", "n").unwrap();
    let config = SeriesConfig::default().with_cancel_flag(flag);

    let error = evaluate_series_with(&tree, "n", 3, 10, &config).unwrap_err();
    assert_eq!(error, EvaluationError::Cancelled { index: 3 });
}

#[test]
fn cancelled_from_another_thread() {
    let flag = Arc::new(AtomicBool::new(false));
    let tree = parse_expression("n", "1").unwrap();
    let config = SeriesConfig::default().with_cancel_flag(Arc::clone(&flag))
                                        .with_max_iterations(usize::MAX);

    let handle = thread::spawn(move || evaluate_series_with(&tree, "n", 0, EndIndex::Converge, &config));
    thread::sleep(Duration::from_millis(20));
    flag.store(true, Ordering::Relaxed);

    let result = handle.join().unwrap();
    assert!(matches!(result, Err(EvaluationError::Cancelled { .. })));
}

#[test]
fn zero_timeout_stops_at_once() {
    let tree = parse_expression("n", "n").unwrap();
    let config = SeriesConfig::default().with_timeout(Duration::ZERO);

    let error = evaluate_series_with(&tree, "n", 0, EndIndex::Converge, &config).unwrap_err();
    assert!(matches!(error, EvaluationError::TimedOut { index: 0, .. }));
}

#[test]
fn generous_timeout_does_not_interfere() {
    let tree = parse_expression("n", "1/n^2").unwrap();
    let config = SeriesConfig::default().with_timeout(Duration::from_secs(60));
    let limited = evaluate_series_with(&tree, "n", 1, EndIndex::Converge, &config).unwrap();
    let unlimited = evaluate_series(&tree, "n", 1, EndIndex::Converge).unwrap();
    assert_eq!(limited, unlimited);
}

#[test]
fn parse_errors_surface_through_the_convenience_entry_point() {
    assert!(matches!(seriesview("n", 0, 3, "n+"), Err(Error::Parse(_))));
    assert!(matches!(seriesview("1n", 0, 3, "n"), Err(Error::Parse(_))));
}
