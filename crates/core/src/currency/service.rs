//! Rounding service for every figure the reconciler touches.
//!
//! This module provides the single rounding interface used by all passes,
//! parameterised by the configured midpoint mode and decimal places.

use reckon_shared::types::{Precision, RoundingMode};
use rust_decimal::Decimal;

/// Rounding service.
///
/// Wraps a [`RoundingMode`] and a [`Precision`] so that every pass rounds
/// amounts, quantities, rates and conversion rates the same way.
#[derive(Debug, Clone, Copy, Default)]
pub struct Rounder {
    mode: RoundingMode,
    precision: Precision,
}

impl Rounder {
    /// Creates a rounder with the given mode and precision.
    #[must_use]
    pub const fn new(mode: RoundingMode, precision: Precision) -> Self {
        Self { mode, precision }
    }

    /// Returns the configured precision.
    #[must_use]
    pub const fn precision(&self) -> Precision {
        self.precision
    }

    /// Returns the configured rounding mode.
    #[must_use]
    pub const fn mode(&self) -> RoundingMode {
        self.mode
    }

    /// Round a value to `decimal_places` using the configured mode.
    ///
    /// # Example
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use reckon_core::currency::Rounder;
    ///
    /// let rounder = Rounder::default();
    /// assert_eq!(rounder.round(dec!(30.015), 2), dec!(30.02));
    /// ```
    #[must_use]
    pub fn round(&self, value: Decimal, decimal_places: u32) -> Decimal {
        value.round_dp_with_strategy(decimal_places, self.mode.strategy())
    }

    /// Round a monetary amount.
    #[must_use]
    pub fn amount(&self, value: Decimal) -> Decimal {
        self.round(value, self.precision.amount)
    }

    /// Round an item quantity.
    #[must_use]
    pub fn quantity(&self, value: Decimal) -> Decimal {
        self.round(value, self.precision.quantity)
    }

    /// Round an item unit rate.
    #[must_use]
    pub fn rate(&self, value: Decimal) -> Decimal {
        self.round(value, self.precision.rate)
    }

    /// Round a document conversion rate.
    #[must_use]
    pub fn conversion_rate(&self, value: Decimal) -> Decimal {
        self.round(value, self.precision.conversion_rate)
    }

    /// Round to the nearest whole unit (used for `rounded_total`).
    #[must_use]
    pub fn whole(&self, value: Decimal) -> Decimal {
        self.round(value, 0)
    }

    /// `round(a * b)` at amount precision, `None` on overflow.
    #[must_use]
    pub fn product(&self, a: Decimal, b: Decimal) -> Option<Decimal> {
        a.checked_mul(b).map(|v| self.amount(v))
    }

    /// `round(base * rate / 100)` at amount precision, `None` on overflow.
    ///
    /// # Example
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use reckon_core::currency::Rounder;
    ///
    /// let rounder = Rounder::default();
    /// assert_eq!(rounder.percent_of(dec!(100), dec!(15)), Some(dec!(15)));
    /// ```
    #[must_use]
    pub fn percent_of(&self, base: Decimal, rate: Decimal) -> Option<Decimal> {
        base.checked_mul(rate)
            .and_then(|v| v.checked_div(Decimal::ONE_HUNDRED))
            .map(|v| self.amount(v))
    }
}
