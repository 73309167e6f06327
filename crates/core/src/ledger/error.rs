//! Ledger error types.

use rust_decimal::Decimal;
use thiserror::Error;

use super::entry::Side;

/// Message fragment hosts use when rejecting an unbalanced posting.
pub const DEBIT_CREDIT_MISMATCH: &str = "debit and credit not equal";

/// Errors that can occur while checking or balancing ledger entries.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// No entries were generated.
    #[error("No ledger entries to balance")]
    NoEntries,

    /// Entries do not balance.
    #[error("Debit and credit not equal. Debit: {debit}, Credit: {credit}")]
    Unbalanced {
        /// Total debit.
        debit: Decimal,
        /// Total credit.
        credit: Decimal,
    },

    /// No entry can absorb the residual without gaining a second leg.
    #[error(
        "Cannot absorb imbalance of {difference}: no entry carries a {side} leg. Debit: {debit}, Credit: {credit}"
    )]
    UnresolvedImbalance {
        /// Total debit.
        debit: Decimal,
        /// Total credit.
        credit: Decimal,
        /// Absolute residual.
        difference: Decimal,
        /// Side that would have had to grow.
        side: Side,
    },

    /// A sum exceeded the decimal range.
    #[error("Arithmetic overflow while summing {0}")]
    Overflow(&'static str),
}

impl LedgerError {
    /// Returns the error code for structured output.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NoEntries => "NO_LEDGER_ENTRIES",
            Self::Unbalanced { .. } => "UNBALANCED_LEDGER",
            Self::UnresolvedImbalance { .. } => "UNRESOLVED_IMBALANCE",
            Self::Overflow(_) => "LEDGER_OVERFLOW",
        }
    }

    /// Returns true if an aggressive reconciliation may fix this error.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Unbalanced { .. })
    }
}

/// Returns true if a host validation message reports unbalanced entries.
#[must_use]
pub fn is_debit_credit_mismatch(message: &str) -> bool {
    message.to_lowercase().contains(DEBIT_CREDIT_MISMATCH)
}
