//! Precision reconciliation of sales invoices.
//!
//! Recomputes every derived total from the leaves upward so that the
//! document is internally consistent at a fixed precision:
//!
//! - Items: line amounts and `net_total`
//! - Taxes: row amounts, running totals and `total_taxes_and_charges`
//! - VAT: item-wise cross-check of the designated VAT row
//! - Totals: grand, rounded and outstanding totals plus base mirrors
//! - Schedule: payment schedule and advance allocations
//! - Ledger: rounding and balancing of generated ledger entries

pub mod context;
pub mod error;
pub mod items;
pub mod schedule;
pub mod service;
pub mod taxes;
pub mod totals;
pub mod types;
pub mod vat;

#[cfg(test)]
mod props;

pub use context::PassContext;
pub use error::{ReconcileError, ReconcileFailure};
pub use service::{Reconcile, ReconcileOutcome, Reconciler};
pub use types::{
    Pass, PassFailure, PassSummary, ReconcileReport, ReconcileRequest, SkipReason, Strictness,
};
