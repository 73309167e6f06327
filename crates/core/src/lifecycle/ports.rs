//! Ports to the host framework.
//!
//! The lifecycle dispatcher only talks to the host through these traits, so
//! submission can be exercised against in-memory fakes.

use thiserror::Error;

use crate::invoice::Invoice;
use crate::ledger::{GlEntry, is_debit_credit_mismatch};

/// An error reported by the host framework.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct HostError {
    /// Host message, verbatim.
    pub message: String,
}

impl HostError {
    /// Creates a host error.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Returns true if the host rejected unbalanced ledger entries.
    #[must_use]
    pub fn is_debit_credit_mismatch(&self) -> bool {
        is_debit_credit_mismatch(&self.message)
    }
}

/// Host ledger-entry generation.
pub trait LedgerGenerator {
    /// Generates the ledger entries of a submitted invoice.
    ///
    /// # Errors
    ///
    /// Returns the host's error when generation fails.
    fn generate(&self, invoice: &Invoice) -> Result<Vec<GlEntry>, HostError>;

    /// Runs the host's own checks on the entries before they are posted.
    ///
    /// # Errors
    ///
    /// Returns the host's error when the entries are rejected.
    fn validate(&self, _invoice: &Invoice, _entries: &[GlEntry]) -> Result<(), HostError> {
        Ok(())
    }
}

/// Host persistence, used as a unit of work.
///
/// Writes are staged until [`DocumentStore::commit`].
pub trait DocumentStore {
    /// Stages the corrected invoice.
    ///
    /// # Errors
    ///
    /// Returns the host's error when the write fails.
    fn write_invoice(&mut self, invoice: &Invoice) -> Result<(), HostError>;

    /// Removes ledger entries previously generated for the invoice.
    ///
    /// # Errors
    ///
    /// Returns the host's error when the delete fails.
    fn clear_ledger_entries(&mut self, invoice: &Invoice) -> Result<(), HostError>;

    /// Stages ledger entries for the invoice.
    ///
    /// # Errors
    ///
    /// Returns the host's error when the write fails.
    fn write_ledger_entries(&mut self, invoice: &Invoice, entries: &[GlEntry]) -> Result<(), HostError>;

    /// Commits every staged write.
    ///
    /// # Errors
    ///
    /// Returns the host's error when the commit fails.
    fn commit(&mut self) -> Result<(), HostError>;
}
