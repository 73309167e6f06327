//! Property-based tests for rounding and base-currency mirroring.

use proptest::prelude::*;
use reckon_shared::types::{Precision, RoundingMode};
use rust_decimal::Decimal;

use super::conversion::{ConversionRate, convert_amount};
use super::service::Rounder;

/// Strategy to generate amounts with up to 6 decimals (-1,000,000 to 1,000,000).
fn raw_amount() -> impl Strategy<Value = Decimal> {
    (-1_000_000_000_000i64..1_000_000_000_000i64).prop_map(|v| Decimal::new(v, 6))
}

/// Strategy to generate positive conversion rates (0.000001 to 10000).
fn positive_rate() -> impl Strategy<Value = Decimal> {
    (1i64..10_000_000_000i64).prop_map(|v| Decimal::new(v, 6))
}

fn rounding_mode() -> impl Strategy<Value = RoundingMode> {
    prop_oneof![Just(RoundingMode::HalfUp), Just(RoundingMode::HalfEven)]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Rounding an already rounded amount is a no-op.
    #[test]
    fn prop_amount_rounding_is_idempotent(value in raw_amount(), mode in rounding_mode()) {
        let rounder = Rounder::new(mode, Precision::default());
        let once = rounder.amount(value);
        prop_assert_eq!(rounder.amount(once), once);
    }

    /// The rounded amount never moves more than half a cent.
    #[test]
    fn prop_amount_rounding_error_is_bounded(value in raw_amount(), mode in rounding_mode()) {
        let rounder = Rounder::new(mode, Precision::default());
        let error = (rounder.amount(value) - value).abs();
        prop_assert!(error <= Decimal::new(5, 3), "error {} for {}", error, value);
    }

    /// Both modes agree everywhere except at exact midpoints.
    #[test]
    fn prop_modes_agree_off_midpoint(value in raw_amount()) {
        let half_up = Rounder::new(RoundingMode::HalfUp, Precision::default());
        let half_even = Rounder::new(RoundingMode::HalfEven, Precision::default());
        let scaled = (value * Decimal::from(1000)).trunc() % Decimal::from(10);
        let is_midpoint = scaled.abs() == Decimal::from(5)
            && (value * Decimal::from(1000)).fract().is_zero();
        if !is_midpoint {
            prop_assert_eq!(half_up.amount(value), half_even.amount(value));
        }
    }

    /// Converting with the identity rate returns the rounded amount.
    #[test]
    fn prop_identity_conversion_preserves_amount(value in raw_amount()) {
        let rounder = Rounder::default();
        let converted = convert_amount(value, ConversionRate::ONE, &rounder);
        prop_assert_eq!(converted, Some(rounder.amount(value)));
    }

    /// Resolved rates are positive and carry at most 6 decimals.
    #[test]
    fn prop_resolved_rate_is_positive(rate in positive_rate()) {
        let rounder = Rounder::default();
        let resolved = ConversionRate::resolve(Some(rate), &rounder).unwrap();
        prop_assert!(resolved.value() > Decimal::ZERO);
        prop_assert!(resolved.value().scale() <= 6);
    }
}
