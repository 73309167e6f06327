//! Balance checks for generated ledger entries.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::entry::{GlEntry, Side};
use super::error::LedgerError;

/// Debit and credit totals of a set of entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerTotals {
    /// Total debit in base currency.
    pub debit: Decimal,
    /// Total credit in base currency.
    pub credit: Decimal,
}

impl LedgerTotals {
    /// Sums the base-currency legs of `entries`.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::Overflow` if a sum exceeds the decimal range.
    pub fn of(entries: &[GlEntry]) -> Result<Self, LedgerError> {
        let mut debit = Decimal::ZERO;
        let mut credit = Decimal::ZERO;
        for entry in entries {
            debit = debit
                .checked_add(entry.debit)
                .ok_or(LedgerError::Overflow("debit"))?;
            credit = credit
                .checked_add(entry.credit)
                .ok_or(LedgerError::Overflow("credit"))?;
        }
        Ok(Self { debit, credit })
    }

    /// Returns debit minus credit.
    #[must_use]
    pub fn difference(&self) -> Decimal {
        self.debit - self.credit
    }

    /// Returns true if the residual is within `tolerance`.
    #[must_use]
    pub fn is_balanced(&self, tolerance: Decimal) -> bool {
        self.difference().abs() <= tolerance
    }

    /// Returns the side that must grow to close the residual, if any.
    #[must_use]
    pub fn short_side(&self) -> Option<Side> {
        match self.debit.cmp(&self.credit) {
            std::cmp::Ordering::Greater => Some(Side::Credit),
            std::cmp::Ordering::Less => Some(Side::Debit),
            std::cmp::Ordering::Equal => None,
        }
    }
}

/// Validates that a set of ledger entries is balanced within `tolerance`.
///
/// # Errors
///
/// Returns `LedgerError::NoEntries` for an empty set and
/// `LedgerError::Unbalanced` when the residual exceeds `tolerance`.
pub fn validate_balanced(entries: &[GlEntry], tolerance: Decimal) -> Result<LedgerTotals, LedgerError> {
    if entries.is_empty() {
        return Err(LedgerError::NoEntries);
    }

    let totals = LedgerTotals::of(entries)?;
    if !totals.is_balanced(tolerance) {
        return Err(LedgerError::Unbalanced {
            debit: totals.debit,
            credit: totals.credit,
        });
    }

    Ok(totals)
}
