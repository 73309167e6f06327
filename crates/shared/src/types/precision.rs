//! Decimal precision and rounding settings.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! Every rounding in the reconciler goes through these settings.

use rust_decimal::RoundingStrategy;
use serde::{Deserialize, Serialize};

/// How a midpoint (e.g. `30.015` at 2 decimals) is resolved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundingMode {
    /// Round half away from zero (commercial rounding). `30.015 -> 30.02`.
    #[default]
    HalfUp,
    /// Round half to even (Banker's Rounding). `2.5 -> 2`, `3.5 -> 4`.
    HalfEven,
}

impl RoundingMode {
    /// Returns the matching `rust_decimal` strategy.
    #[must_use]
    pub const fn strategy(self) -> RoundingStrategy {
        match self {
            Self::HalfUp => RoundingStrategy::MidpointAwayFromZero,
            Self::HalfEven => RoundingStrategy::MidpointNearestEven,
        }
    }
}

impl std::fmt::Display for RoundingMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::HalfUp => write!(f, "half_up"),
            Self::HalfEven => write!(f, "half_even"),
        }
    }
}

impl std::str::FromStr for RoundingMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "half_up" => Ok(Self::HalfUp),
            "half_even" | "bankers" => Ok(Self::HalfEven),
            _ => Err(format!("Unknown rounding mode: {s}")),
        }
    }
}

/// Number of decimal places per kind of figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Precision {
    /// Monetary amounts (item amounts, taxes, totals, ledger legs).
    pub amount: u32,
    /// Item quantities.
    pub quantity: u32,
    /// Item unit rates.
    pub rate: u32,
    /// Document conversion rate into the base currency.
    pub conversion_rate: u32,
}

impl Default for Precision {
    fn default() -> Self {
        Self {
            amount: 2,
            quantity: 3,
            rate: 2,
            conversion_rate: 6,
        }
    }
}
