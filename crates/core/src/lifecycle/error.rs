//! Lifecycle error types.

use thiserror::Error;

use super::ports::HostError;
use crate::ledger::LedgerError;
use crate::reconcile::ReconcileFailure;

/// Errors raised while driving an invoice through the host lifecycle.
#[derive(Debug, Error)]
pub enum LifecycleError {
    /// A reconciliation run failed under the strict policy.
    #[error("Reconciliation failed: {0}")]
    Reconcile(#[from] ReconcileFailure),

    /// Generated ledger entries failed validation.
    #[error("Ledger validation failed: {0}")]
    Ledger(#[from] LedgerError),

    /// The host rejected an operation.
    #[error("Host error: {0}")]
    Host(#[from] HostError),
}

impl LifecycleError {
    /// Returns true if the error reports unbalanced ledger entries.
    #[must_use]
    pub fn is_debit_credit_mismatch(&self) -> bool {
        match self {
            Self::Ledger(err) => err.is_retryable(),
            Self::Host(err) => err.is_debit_credit_mismatch(),
            Self::Reconcile(_) => false,
        }
    }

    /// Returns the error code for structured output.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Reconcile(failure) => failure.error_code(),
            Self::Ledger(err) => err.error_code(),
            Self::Host(_) => "HOST_ERROR",
        }
    }
}
