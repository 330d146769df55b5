//! Power-law normalization of raw metrics against a cohort maximum.
//!
//! `normalized = round(min(100, (value / max)^0.35 * 100))`
//!
//! The exponent compresses the right-skewed spend distribution: mid-range
//! values are lifted so that one or two extreme outliers do not flatten
//! everyone else to single digits, as plain `value / max` would.

use super::score_types::Score0To100;
use crate::core::{Metric, ScorableEntity};

pub const COMPRESSION_EXPONENT: f64 = 0.35;

/// Normalize one raw value against the cohort maximum for its dimension.
///
/// A zero (or absent) value is 0 by rule, not by way of the curve, and a
/// zero maximum yields 0 for every entity.
pub fn normalize(value: f64, max: f64) -> Score0To100 {
    if !(value.is_finite() && max.is_finite()) || value <= 0.0 || max <= 0.0 {
        return Score0To100::ZERO;
    }
    let curved = (value / max).powf(COMPRESSION_EXPONENT) * 100.0;
    Score0To100::from_rounded(curved.min(100.0))
}

/// Largest value of `metric` across the cohort (0 for an empty cohort).
pub fn cohort_max(cohort: &[&ScorableEntity], metric: Metric) -> f64 {
    cohort
        .iter()
        .map(|entity| entity.metric(metric))
        .fold(0.0, f64::max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::EntityKind;

    #[test]
    fn maximum_value_scores_100() {
        assert_eq!(normalize(100.0, 100.0).value(), 100);
    }

    #[test]
    fn mid_range_values_are_lifted() {
        // (0.5)^0.35 = 0.7846
        assert_eq!(normalize(50.0, 100.0).value(), 78);
        // (0.2)^0.35 = 0.5693
        assert_eq!(normalize(1.0, 5.0).value(), 57);
        // (0.01)^0.35 = 0.1995
        assert_eq!(normalize(1.0, 100.0).value(), 20);
    }

    #[test]
    fn zero_value_and_zero_max_score_zero() {
        assert_eq!(normalize(0.0, 100.0), Score0To100::ZERO);
        assert_eq!(normalize(0.0, 0.0), Score0To100::ZERO);
        assert_eq!(normalize(5.0, 0.0), Score0To100::ZERO);
    }

    #[test]
    fn value_above_max_is_capped() {
        assert_eq!(normalize(400.0, 100.0), Score0To100::MAX);
    }

    #[test]
    fn cohort_max_ignores_missing_metrics() {
        let a = ScorableEntity::new("a", "A", EntityKind::Firm).with_metric(Metric::ClientCount, 7.0);
        let b = ScorableEntity::new("b", "B", EntityKind::Firm);
        assert_eq!(cohort_max(&[&a, &b], Metric::ClientCount), 7.0);
        assert_eq!(cohort_max(&[&a, &b], Metric::TotalSpend), 0.0);
        assert_eq!(cohort_max(&[], Metric::TotalSpend), 0.0);
    }
}

#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn normalized_always_in_bounds(value in -10.0..1e9f64, max in -10.0..1e9f64) {
            prop_assert!(normalize(value, max).value() <= 100);
        }

        #[test]
        fn larger_value_never_scores_lower(a in 0.0..1e9f64, b in 0.0..1e9f64, extra in 0.0..1e9f64) {
            let (low, high) = if a <= b { (a, b) } else { (b, a) };
            let max = high + extra;
            prop_assert!(normalize(low, max) <= normalize(high, max));
        }
    }
}
