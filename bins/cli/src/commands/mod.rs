//! Subcommand implementations.

pub mod balance;
pub mod reconcile;

use reckon_core::reconcile::ReconcileFailure;
use reckon_shared::AppError;
use tracing::error;

/// Maps a strict-policy failure to the process error, logging the partial report.
pub(crate) fn failed(failure: &ReconcileFailure) -> AppError {
    error!(
        invoice = %failure.partial.invoice,
        pass = %failure.pass,
        code = failure.error_code(),
        changes = failure.partial.changes.len(),
        "Reconciliation aborted"
    );
    AppError::Reconciliation(failure.to_string())
}
