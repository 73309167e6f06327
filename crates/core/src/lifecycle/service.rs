//! Lifecycle dispatcher.
//!
//! Composes a reconciler with the host's ledger generation and persistence.
//! The reconciler never persists; submission stages the corrected invoice and
//! its ledger entries and commits them once, after every step succeeded.

use rust_decimal::Decimal;
use tracing::{info, warn};

use super::error::LifecycleError;
use super::hooks::Hook;
use super::ports::{DocumentStore, LedgerGenerator};
use crate::invoice::Invoice;
use crate::ledger::{GlEntry, validate_balanced};
use crate::reconcile::{Reconcile, ReconcileReport, ReconcileRequest, Strictness};

/// Outcome of a successful submission.
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    /// Ledger entries that were committed.
    pub entries: Vec<GlEntry>,
    /// Reports of every reconciliation run, in order.
    pub reports: Vec<ReconcileReport>,
    /// Whether the aggressive retry was needed.
    pub retried: bool,
}

/// Drives an invoice through the host lifecycle.
pub struct InvoiceLifecycle<R, G, S> {
    reconciler: R,
    generator: G,
    store: S,
    ledger_tolerance: Decimal,
}

impl<R, G, S> InvoiceLifecycle<R, G, S>
where
    R: Reconcile,
    G: LedgerGenerator,
    S: DocumentStore,
{
    /// Creates a dispatcher that requires ledger entries to balance exactly.
    pub fn new(reconciler: R, generator: G, store: S) -> Self {
        Self {
            reconciler,
            generator,
            store,
            ledger_tolerance: Decimal::ZERO,
        }
    }

    /// Sets the debit/credit residual accepted when validating entries.
    #[must_use]
    pub fn with_ledger_tolerance(mut self, tolerance: Decimal) -> Self {
        self.ledger_tolerance = tolerance;
        self
    }

    /// Returns the document store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Runs the reconciler as the host would at `hook`.
    ///
    /// # Errors
    ///
    /// Returns `LifecycleError::Reconcile` when a pass fails under the strict policy.
    pub fn run_hook(&self, hook: Hook, invoice: &mut Invoice) -> Result<ReconcileReport, LifecycleError> {
        Ok(self.reconciler.reconcile(invoice, &hook.request())?)
    }

    /// Generates ledger entries through the host and corrects them.
    ///
    /// # Errors
    ///
    /// Returns `LifecycleError::Host` when generation fails and
    /// `LifecycleError::Reconcile` when balancing fails under the strict policy.
    pub fn generate_ledger(
        &self,
        invoice: &Invoice,
        strictness: Strictness,
    ) -> Result<(Vec<GlEntry>, ReconcileReport), LifecycleError> {
        let mut entries = self.generator.generate(invoice)?;
        let report = self.reconciler.reconcile_ledger(
            &mut entries,
            Some(invoice),
            &ReconcileRequest::new(strictness),
        )?;
        Ok((entries, report))
    }

    /// Submits the invoice.
    ///
    /// Runs the pre-submit hook and generates ledger entries. When the
    /// entries are rejected as unbalanced, the generated entries are cleared
    /// and the submission is retried once after an aggressive reconciliation.
    /// On success the invoice and entries are written and committed once.
    ///
    /// # Errors
    ///
    /// Returns the first error that is not a debit/credit mismatch, or the
    /// error of the retry.
    pub fn submit(&mut self, invoice: &mut Invoice) -> Result<Submission, LifecycleError> {
        let mut reports = vec![self.run_hook(Hook::PreSubmit, invoice)?];

        let (entries, report) = self.generate_ledger(invoice, Strictness::Normal)?;
        reports.push(report);

        let (entries, retried) = match self.check(invoice, &entries) {
            Ok(()) => (entries, false),
            Err(err) if err.is_debit_credit_mismatch() => {
                warn!(
                    invoice = %invoice.display_name(),
                    error = %err,
                    "Ledger entries rejected, retrying with aggressive reconciliation"
                );
                self.store.clear_ledger_entries(invoice)?;
                reports.push(self.run_hook(Hook::PostLedgerGeneration, invoice)?);
                let (entries, report) = self.generate_ledger(invoice, Strictness::Aggressive)?;
                reports.push(report);
                self.check(invoice, &entries)?;
                (entries, true)
            }
            Err(err) => return Err(err),
        };

        self.store.write_invoice(invoice)?;
        self.store.write_ledger_entries(invoice, &entries)?;
        self.store.commit()?;

        info!(
            invoice = %invoice.display_name(),
            entries = entries.len(),
            retried,
            "Invoice submitted"
        );

        Ok(Submission {
            entries,
            reports,
            retried,
        })
    }

    fn check(&self, invoice: &Invoice, entries: &[GlEntry]) -> Result<(), LifecycleError> {
        validate_balanced(entries, self.ledger_tolerance)?;
        self.generator.validate(invoice, entries)?;
        Ok(())
    }
}
