//! Base-currency mirroring.
//!
//! CRITICAL: Rounding strategy for multi-currency:
//! - Round the conversion rate to its own precision before use
//! - Round every mirrored figure independently to amount precision
//! - Never derive a primary figure from its base mirror

use rust_decimal::Decimal;

use super::service::Rounder;

/// A document conversion rate, already rounded and validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConversionRate(Decimal);

impl ConversionRate {
    /// Identity rate.
    pub const ONE: Self = Self(Decimal::ONE);

    /// Normalises a raw document rate.
    ///
    /// A missing or zero rate means "same currency" and becomes 1.
    /// Returns `Err(rate)` for a negative rate.
    pub fn resolve(raw: Option<Decimal>, rounder: &Rounder) -> Result<Self, Decimal> {
        match raw {
            None => Ok(Self::ONE),
            Some(rate) if rate.is_zero() => Ok(Self::ONE),
            Some(rate) if rate.is_sign_negative() => Err(rate),
            Some(rate) => {
                let rounded = rounder.conversion_rate(rate);
                if rounded.is_zero() {
                    Ok(Self::ONE)
                } else {
                    Ok(Self(rounded))
                }
            }
        }
    }

    /// Returns the rate value.
    #[must_use]
    pub const fn value(self) -> Decimal {
        self.0
    }

    /// Returns true for the identity rate.
    #[must_use]
    pub fn is_identity(self) -> bool {
        self.0 == Decimal::ONE
    }
}

/// Converts an amount into the base currency, `None` on overflow.
#[must_use]
pub fn convert_amount(amount: Decimal, rate: ConversionRate, rounder: &Rounder) -> Option<Decimal> {
    rounder.product(amount, rate.value())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_missing_or_zero_rate_is_identity() {
        let rounder = Rounder::default();
        assert_eq!(ConversionRate::resolve(None, &rounder), Ok(ConversionRate::ONE));
        assert_eq!(
            ConversionRate::resolve(Some(Decimal::ZERO), &rounder),
            Ok(ConversionRate::ONE)
        );
    }

    #[test]
    fn test_negative_rate_is_rejected() {
        let rounder = Rounder::default();
        assert_eq!(ConversionRate::resolve(Some(dec!(-3.75)), &rounder), Err(dec!(-3.75)));
    }

    #[test]
    fn test_rate_is_rounded_to_six_places() {
        let rounder = Rounder::default();
        let rate = ConversionRate::resolve(Some(dec!(3.7500004)), &rounder).unwrap();
        assert_eq!(rate.value(), dec!(3.75));
        assert!(!rate.is_identity());
    }

    #[test]
    fn test_convert_amount() {
        let rounder = Rounder::default();
        let rate = ConversionRate::resolve(Some(dec!(3.75)), &rounder).unwrap();
        // 115.00 USD * 3.75 = 431.25 SAR
        assert_eq!(convert_amount(dec!(115), rate, &rounder), Some(dec!(431.25)));
        // 0.01 * 3.75 = 0.0375 -> 0.04
        assert_eq!(convert_amount(dec!(0.01), rate, &rounder), Some(dec!(0.04)));
    }
}
