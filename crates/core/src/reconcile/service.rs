//! Reconciler service.
//!
//! Runs the invoice passes in a fixed order (items, taxes, VAT cross-check,
//! totals, schedule), and the ledger pass on externally generated entries.
//! Nothing here persists: callers flush the corrected document themselves.

use reckon_shared::{FailurePolicy, ReconcilerConfig};
use tracing::{debug, error, info, warn};

use super::context::PassContext;
use super::error::{ReconcileError, ReconcileFailure};
use super::types::{
    Pass, PassFailure, ReconcileReport, ReconcileRequest, SkipReason, Strictness,
};
use super::{items, schedule, taxes, totals, vat};
use crate::changes::ChangeLog;
use crate::currency::Rounder;
use crate::invoice::{Invoice, UNSAVED_NAME};
use crate::ledger::{self, Absorption, GlEntry, LedgerTotals};

/// Result of a reconciliation run.
///
/// `Err` only under the strict failure policy.
pub type ReconcileOutcome = Result<ReconcileReport, ReconcileFailure>;

/// Capability the lifecycle dispatcher calls at each hook point.
pub trait Reconcile {
    /// Corrects the invoice in place.
    ///
    /// # Errors
    ///
    /// Returns `ReconcileFailure` when a pass fails under the strict policy.
    fn reconcile(&self, invoice: &mut Invoice, request: &ReconcileRequest) -> ReconcileOutcome;

    /// Corrects generated ledger entries in place.
    ///
    /// `invoice`, when given, is only read: its name is logged and its
    /// `base_grand_total` is compared with the total debits.
    ///
    /// # Errors
    ///
    /// Returns `ReconcileFailure` when balancing fails under the strict policy.
    fn reconcile_ledger(
        &self,
        entries: &mut [GlEntry],
        invoice: Option<&Invoice>,
        request: &ReconcileRequest,
    ) -> ReconcileOutcome;
}

/// Precision reconciler.
#[derive(Debug, Clone, Default)]
pub struct Reconciler {
    config: ReconcilerConfig,
    rounder: Rounder,
}

impl Reconciler {
    /// Creates a reconciler from configuration.
    #[must_use]
    pub fn new(config: ReconcilerConfig) -> Self {
        let rounder = Rounder::new(config.rounding, config.precision);
        Self { config, rounder }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &ReconcilerConfig {
        &self.config
    }

    /// Returns the rounding service.
    #[must_use]
    pub fn rounder(&self) -> Rounder {
        self.rounder
    }

    fn run_pass(
        pass: Pass,
        invoice: &mut Invoice,
        ctx: &PassContext<'_>,
        changes: &mut ChangeLog,
    ) -> Result<(), ReconcileError> {
        match pass {
            Pass::Items => items::reconcile_items(invoice, ctx, changes),
            Pass::Taxes => taxes::reconcile_taxes(invoice, ctx, changes),
            Pass::Vat => vat::reconcile_vat(invoice, ctx, changes),
            Pass::Totals => totals::reconcile_totals(invoice, ctx, changes),
            Pass::Schedule => schedule::reconcile_schedule(invoice, ctx, changes),
            Pass::Ledger => Ok(()),
        }
    }

    fn balance(
        &self,
        entries: &mut [GlEntry],
        strictness: Strictness,
        changes: &mut ChangeLog,
    ) -> Result<Option<Absorption>, ReconcileError> {
        ledger::round_entries(entries, &self.rounder, changes);
        if strictness == Strictness::Normal {
            return Ok(None);
        }
        ledger::absorb_residual(entries, self.config.tolerances.ledger, changes)
            .map_err(ReconcileError::from)
    }

    /// Applies the failure policy to an error raised by `pass`.
    fn fail(
        &self,
        mut report: ReconcileReport,
        pass: Pass,
        error: ReconcileError,
        policy: Option<FailurePolicy>,
    ) -> ReconcileOutcome {
        match policy.unwrap_or(self.config.failure_policy) {
            FailurePolicy::Strict => Err(ReconcileFailure {
                pass,
                error,
                partial: Box::new(report),
            }),
            FailurePolicy::Lenient => {
                error!(
                    invoice = %report.invoice,
                    pass = %pass,
                    code = error.error_code(),
                    error = %error,
                    "Reconciliation pass failed, keeping partial results"
                );
                report.failure = Some(PassFailure::new(pass, &error));
                Ok(report)
            }
        }
    }
}

fn log_pass(invoice: &str, pass: Pass, changes: &ChangeLog) {
    for change in changes {
        debug!(
            invoice,
            field = %change.field,
            before = %change.before,
            after = %change.after,
            "Field corrected"
        );
    }
    info!(invoice, pass = %pass, changes = changes.len(), "Reconciliation pass complete");
}

impl Reconcile for Reconciler {
    fn reconcile(&self, invoice: &mut Invoice, request: &ReconcileRequest) -> ReconcileOutcome {
        let mut report = ReconcileReport::new(invoice.display_name(), request.strictness);

        let skipped = if invoice.items.is_empty() {
            Some(SkipReason::NoItems)
        } else if invoice.taxes.is_empty() {
            Some(SkipReason::NoTaxRows)
        } else {
            None
        };
        if let Some(reason) = skipped {
            debug!(invoice = %report.invoice, reason = ?reason, "Nothing to reconcile");
            report.skipped = Some(reason);
            return Ok(report);
        }

        let ctx = PassContext::new(&self.config, self.rounder, invoice.conversion_rate);
        for pass in Pass::INVOICE {
            if !request.runs(pass) {
                continue;
            }
            let mut changes = ChangeLog::new();
            let result = Self::run_pass(pass, invoice, &ctx, &mut changes);
            log_pass(&report.invoice, pass, &changes);
            report.record(pass, changes);
            if let Err(error) = result {
                return self.fail(report, pass, error, request.policy);
            }
        }

        Ok(report)
    }

    fn reconcile_ledger(
        &self,
        entries: &mut [GlEntry],
        invoice: Option<&Invoice>,
        request: &ReconcileRequest,
    ) -> ReconcileOutcome {
        let name = invoice.map_or(UNSAVED_NAME, Invoice::display_name);
        let mut report = ReconcileReport::new(name, request.strictness);

        let mut changes = ChangeLog::new();
        let result = self.balance(entries, request.strictness, &mut changes);
        log_pass(&report.invoice, Pass::Ledger, &changes);
        report.record(Pass::Ledger, changes);

        match result {
            Ok(Some(absorption)) => {
                info!(
                    invoice = %report.invoice,
                    account = %absorption.account,
                    side = %absorption.side,
                    amount = %absorption.amount,
                    "Ledger residual absorbed"
                );
                report.absorption = Some(absorption);
            }
            Ok(None) => {}
            Err(error) => return self.fail(report, Pass::Ledger, error, request.policy),
        }

        if let Some(invoice) = invoice {
            let totals = match LedgerTotals::of(entries) {
                Ok(totals) => totals,
                Err(error) => return self.fail(report, Pass::Ledger, error.into(), request.policy),
            };
            let gap = totals.debit - invoice.base_grand_total;
            if !gap.is_zero() {
                warn!(
                    invoice = %report.invoice,
                    debit = %totals.debit,
                    base_grand_total = %invoice.base_grand_total,
                    "Ledger debits differ from base grand total"
                );
            }
            report.ledger_vs_grand_total = Some(gap);
        }

        Ok(report)
    }
}
