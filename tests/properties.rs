//! Property-based tests for parsing, normalization and accumulation.

use proptest::prelude::*;
use seriesview::{
    error::EvaluationError,
    interpreter::{evaluator::core::evaluate, normalizer::normalize},
    parse_expression, seriesview,
};

// Strategy for generating indices well inside the exactly representable range
fn small_index() -> impl Strategy<Value = i64> {
    -10_000i64..10_000i64
}

// Strategy for generating iterator names
fn iterator_name() -> impl Strategy<Value = String> {
    "[a-z_]{1,6}".prop_filter("must not collide with a builtin function",
                              |name| !["sqrt", "sin", "cos", "tan", "ln", "log"].contains(&name.as_str()))
}

proptest! {
    #[test]
    fn finite_series_has_one_entry_per_index(start in small_index(), len in 0usize..200) {
        let end = start + i64::try_from(len).unwrap();
        let series = seriesview("n", start, end, "n").unwrap();

        prop_assert_eq!(series.len(), len + 1);
        prop_assert_eq!(series.indices().first().copied(), Some(start));
        prop_assert_eq!(series.indices().last().copied(), Some(end));
    }

    #[test]
    fn reversed_ranges_are_rejected(start in small_index(), gap in 1i64..1000) {
        let error = seriesview("n", start, start - gap, "n").unwrap_err();
        prop_assert_eq!(error.to_string(),
                        EvaluationError::InvalidRange { start, end: start - gap }.to_string());
    }

    #[test]
    fn evaluation_is_deterministic(index in small_index()) {
        let tree = parse_expression("n", "3n^2-2n+sin(n)").unwrap();
        let first = evaluate(&tree, "n", index).unwrap();
        let second = evaluate(&tree, "n", index).unwrap();
        prop_assert_eq!(first.to_bits(), second.to_bits());
    }

    #[test]
    fn implicit_and_explicit_multiplication_agree(index in small_index(), k in 0u32..1000) {
        let implicit = parse_expression("n", &format!("{k}n")).unwrap();
        let explicit = parse_expression("n", &format!("{k}*n")).unwrap();
        prop_assert_eq!(evaluate(&implicit, "n", index).unwrap(),
                        evaluate(&explicit, "n", index).unwrap());
    }

    #[test]
    fn normalization_is_idempotent(iterator in iterator_name(), k in 0u32..100) {
        let expression = format!("{k}{iterator}({iterator}+1)({iterator}-{k})");
        let once = normalize(&iterator, &expression);
        prop_assert_eq!(normalize(&iterator, &once), once);
    }

    #[test]
    fn any_iterator_name_binds(iterator in iterator_name(), index in small_index()) {
        let tree = parse_expression(&iterator, &format!("2{iterator}+1")).unwrap();
        let value = evaluate(&tree, &iterator, index).unwrap();
        prop_assert_eq!(value, 2.0 * index as f64 + 1.0);
    }

    #[test]
    fn partial_sums_are_running_totals(start in -100i64..100, len in 1i64..50) {
        let end = start + len - 1;
        let series = seriesview("n", start, end, "n^2+1").unwrap();

        let mut total = 0.0;
        for (index, sum) in series.iter() {
            total += (index * index + 1) as f64;
            prop_assert_eq!(sum, total);
        }
    }
}
