//! `reckon balance`: round and balance ledger entries on their own.

use clap::Args;
use reckon_core::ledger::{GlEntry, LedgerTotals};
use reckon_core::reconcile::{Reconcile, ReconcileRequest, Reconciler, Strictness};
use reckon_shared::{AppError, AppResult, FailurePolicy};
use serde_json::{Value, json};

use super::failed;
use crate::input;

/// Arguments for ledger balancing
#[derive(Args)]
pub struct BalanceArgs {
    /// Ledger-entry JSON file ("-" for stdin)
    #[arg(long)]
    pub ledger: String,

    /// Absorb any debit/credit residual into the largest entry
    #[arg(long)]
    pub aggressive: bool,

    /// Failure policy (overrides configuration)
    #[arg(long)]
    pub policy: Option<FailurePolicy>,
}

/// Runs the command and returns `{ entries, totals, report }`.
pub fn run(args: &BalanceArgs, reconciler: &Reconciler) -> AppResult<Value> {
    let mut entries: Vec<GlEntry> = input::read_json(&args.ledger)?;

    let strictness = if args.aggressive {
        Strictness::Aggressive
    } else {
        Strictness::Normal
    };
    let mut request = ReconcileRequest::new(strictness);
    if let Some(policy) = args.policy {
        request = request.with_policy(policy);
    }

    let report = reconciler
        .reconcile_ledger(&mut entries, None, &request)
        .map_err(|failure| failed(&failure))?;
    let totals = LedgerTotals::of(&entries).map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(json!({
        "entries": entries,
        "totals": {
            "debit": totals.debit,
            "credit": totals.credit,
            "difference": totals.difference(),
        },
        "report": report,
    }))
}
