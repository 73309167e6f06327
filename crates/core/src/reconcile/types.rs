//! Reconciliation request and report types.

use reckon_shared::FailurePolicy;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::ReconcileError;
use crate::changes::ChangeLog;
use crate::ledger::Absorption;

/// How hard a run corrects the document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strictness {
    /// Recompute the document; ledger entries are only rounded.
    #[default]
    Normal,
    /// Also rebalance ledger entries.
    Aggressive,
}

impl std::fmt::Display for Strictness {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "normal"),
            Self::Aggressive => write!(f, "aggressive"),
        }
    }
}

/// A reconciliation pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pass {
    /// Item amounts and net total.
    Items,
    /// Tax rows and total taxes.
    Taxes,
    /// Item-wise VAT cross-check.
    Vat,
    /// Grand, rounded and outstanding totals plus base mirrors.
    Totals,
    /// Payment schedule and advance allocations.
    Schedule,
    /// Ledger entry rounding and balancing.
    Ledger,
}

impl Pass {
    /// Invoice passes in execution order.
    pub const INVOICE: [Self; 5] = [
        Self::Items,
        Self::Taxes,
        Self::Vat,
        Self::Totals,
        Self::Schedule,
    ];

    /// Returns the pass name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Items => "items",
            Self::Taxes => "taxes",
            Self::Vat => "vat",
            Self::Totals => "totals",
            Self::Schedule => "schedule",
            Self::Ledger => "ledger",
        }
    }
}

impl std::fmt::Display for Pass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a single run should do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconcileRequest {
    /// Strictness of the run.
    pub strictness: Strictness,
    /// Passes to run. Order is ignored: passes always run in [`Pass::INVOICE`] order.
    pub passes: Vec<Pass>,
    /// Overrides the configured failure policy.
    pub policy: Option<FailurePolicy>,
}

impl ReconcileRequest {
    /// Runs every invoice pass with the configured failure policy.
    #[must_use]
    pub fn new(strictness: Strictness) -> Self {
        Self {
            strictness,
            passes: Pass::INVOICE.to_vec(),
            policy: None,
        }
    }

    /// Restricts the run to `passes`.
    #[must_use]
    pub fn with_passes(mut self, passes: &[Pass]) -> Self {
        self.passes = passes.to_vec();
        self
    }

    /// Overrides the failure policy.
    #[must_use]
    pub fn with_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = Some(policy);
        self
    }

    /// Returns true if `pass` is part of the run.
    #[must_use]
    pub fn runs(&self, pass: Pass) -> bool {
        self.passes.contains(&pass)
    }
}

impl Default for ReconcileRequest {
    fn default() -> Self {
        Self::new(Strictness::Normal)
    }
}

/// Why the invoice passes did not run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// The invoice has no line items.
    NoItems,
    /// The invoice has no tax rows.
    NoTaxRows,
}

/// Outcome of one pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassSummary {
    /// Pass that ran.
    pub pass: Pass,
    /// Number of fields it rewrote.
    pub changes: usize,
}

/// A failure recorded under the lenient policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassFailure {
    /// Pass that failed.
    pub pass: Pass,
    /// Error code.
    pub code: String,
    /// Error message.
    pub message: String,
}

impl PassFailure {
    /// Describes `error` raised by `pass`.
    #[must_use]
    pub fn new(pass: Pass, error: &ReconcileError) -> Self {
        Self {
            pass,
            code: error.error_code().to_string(),
            message: error.to_string(),
        }
    }
}

/// What a reconciliation run changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconcileReport {
    /// Invoice name (`New` when unsaved).
    pub invoice: String,
    /// Strictness of the run.
    pub strictness: Strictness,
    /// Passes that ran, in order, including a failed one.
    pub passes: Vec<PassSummary>,
    /// Every field rewritten, in order.
    pub changes: ChangeLog,
    /// Set when the invoice passes were skipped.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skipped: Option<SkipReason>,
    /// Set when a pass failed under the lenient policy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<PassFailure>,
    /// Ledger entry that absorbed a debit/credit residual.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub absorption: Option<Absorption>,
    /// Total debits minus the invoice's `base_grand_total`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ledger_vs_grand_total: Option<Decimal>,
}

impl ReconcileReport {
    /// Creates an empty report.
    #[must_use]
    pub fn new(invoice: impl Into<String>, strictness: Strictness) -> Self {
        Self {
            invoice: invoice.into(),
            strictness,
            passes: Vec::new(),
            changes: ChangeLog::new(),
            skipped: None,
            failure: None,
            absorption: None,
            ledger_vs_grand_total: None,
        }
    }

    /// Appends the changes of one pass.
    pub fn record(&mut self, pass: Pass, changes: ChangeLog) {
        self.passes.push(PassSummary {
            pass,
            changes: changes.len(),
        });
        self.changes.extend(changes);
    }

    /// Returns true if the run rewrote nothing.
    #[must_use]
    pub fn is_unchanged(&self) -> bool {
        self.changes.is_empty()
    }

    /// Returns true if the run completed every requested pass.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failure.is_none()
    }
}
