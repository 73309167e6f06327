//! Shared state handed to every pass.

use reckon_shared::ReconcilerConfig;
use rust_decimal::Decimal;

use super::error::ReconcileError;
use crate::currency::{ConversionRate, Rounder, convert_amount};

/// Read-only inputs of a pass.
pub struct PassContext<'a> {
    /// Rounding service.
    pub rounder: Rounder,
    /// Reconciler settings.
    pub config: &'a ReconcilerConfig,
    raw_rate: Option<Decimal>,
}

impl<'a> PassContext<'a> {
    /// Creates a context for a document with the given raw conversion rate.
    #[must_use]
    pub fn new(config: &'a ReconcilerConfig, rounder: Rounder, raw_rate: Option<Decimal>) -> Self {
        Self {
            rounder,
            config,
            raw_rate,
        }
    }

    /// Resolves the document conversion rate.
    ///
    /// # Errors
    ///
    /// Returns `ReconcileError::InvalidConversionRate` for a negative rate.
    pub fn conversion_rate(&self) -> Result<ConversionRate, ReconcileError> {
        ConversionRate::resolve(self.raw_rate, &self.rounder)
            .map_err(ReconcileError::InvalidConversionRate)
    }

    /// Converts `amount` into base currency.
    ///
    /// # Errors
    ///
    /// Returns an error for a negative conversion rate or on overflow.
    pub fn mirror(&self, amount: Decimal, field: impl Into<String>) -> Result<Decimal, ReconcileError> {
        let rate = self.conversion_rate()?;
        convert_amount(amount, rate, &self.rounder).ok_or_else(|| ReconcileError::overflow(field))
    }

    /// `round(base * rate / 100)`.
    ///
    /// # Errors
    ///
    /// Returns `ReconcileError::Overflow` on overflow.
    pub fn percent_of(
        &self,
        base: Decimal,
        rate: Decimal,
        field: impl Into<String>,
    ) -> Result<Decimal, ReconcileError> {
        self.rounder
            .percent_of(base, rate)
            .ok_or_else(|| ReconcileError::overflow(field))
    }
}

/// `a + b`, failing with `ReconcileError::Overflow` for `field`.
pub(crate) fn checked_add(a: Decimal, b: Decimal, field: &str) -> Result<Decimal, ReconcileError> {
    a.checked_add(b).ok_or_else(|| ReconcileError::overflow(field))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_mirror_uses_rounded_rate() {
        let config = ReconcilerConfig::default();
        let ctx = PassContext::new(&config, Rounder::default(), Some(dec!(3.75000049)));
        assert_eq!(ctx.mirror(dec!(100), "base_net_total").unwrap(), dec!(375.00));
    }

    #[test]
    fn test_mirror_rejects_negative_rate() {
        let config = ReconcilerConfig::default();
        let ctx = PassContext::new(&config, Rounder::default(), Some(dec!(-1)));
        assert_eq!(
            ctx.mirror(dec!(100), "base_net_total"),
            Err(ReconcileError::InvalidConversionRate(dec!(-1)))
        );
    }

    #[test]
    fn test_checked_add_overflow() {
        assert_eq!(
            checked_add(Decimal::MAX, Decimal::ONE, "net_total"),
            Err(ReconcileError::overflow("net_total"))
        );
    }
}
