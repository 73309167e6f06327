//! Reconciliation error types.

use rust_decimal::Decimal;
use thiserror::Error;

use super::types::{Pass, ReconcileReport};
use crate::ledger::LedgerError;

/// Errors raised inside a reconciliation pass.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReconcileError {
    /// A product or sum exceeded the decimal range.
    #[error("Arithmetic overflow computing {field}")]
    Overflow {
        /// Field being computed.
        field: String,
    },

    /// The document carries a negative conversion rate.
    #[error("Invalid conversion rate: {0}")]
    InvalidConversionRate(Decimal),

    /// Ledger entries could not be rounded or balanced.
    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

impl ReconcileError {
    /// Builds an overflow error for `field`.
    pub fn overflow(field: impl Into<String>) -> Self {
        Self::Overflow {
            field: field.into(),
        }
    }

    /// Returns the error code for structured output.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Overflow { .. } => "ARITHMETIC_OVERFLOW",
            Self::InvalidConversionRate(_) => "INVALID_CONVERSION_RATE",
            Self::Ledger(err) => err.error_code(),
        }
    }
}

/// A reconciliation run aborted under the strict failure policy.
///
/// The invoice keeps whatever the completed passes (and the failing pass up
/// to the failure) wrote; `partial` describes those changes.
#[derive(Debug, Error)]
#[error("{pass} pass failed for {}: {error}", .partial.invoice)]
pub struct ReconcileFailure {
    /// Pass that failed.
    pub pass: Pass,
    /// Underlying error.
    #[source]
    pub error: ReconcileError,
    /// Report of the work done before the failure.
    pub partial: Box<ReconcileReport>,
}

impl ReconcileFailure {
    /// Returns the error code of the underlying error.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        self.error.error_code()
    }
}
