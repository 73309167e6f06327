//! `reckon reconcile`: correct an invoice and, optionally, its ledger entries.

use clap::Args;
use reckon_core::invoice::Invoice;
use reckon_core::ledger::GlEntry;
use reckon_core::lifecycle::Hook;
use reckon_core::reconcile::{Reconcile, ReconcileRequest, Reconciler};
use reckon_shared::{AppError, AppResult, FailurePolicy};
use serde_json::{Value, json};

use super::failed;
use crate::input;

/// Arguments for invoice reconciliation
#[derive(Args)]
pub struct ReconcileArgs {
    /// Invoice JSON file ("-" for stdin)
    #[arg(long)]
    pub invoice: String,

    /// Lifecycle hook whose passes and strictness to apply (default: all passes, normal)
    #[arg(long)]
    pub hook: Option<Hook>,

    /// Generated ledger entries to balance against the corrected invoice
    #[arg(long)]
    pub ledger: Option<String>,

    /// Failure policy (overrides configuration)
    #[arg(long)]
    pub policy: Option<FailurePolicy>,
}

impl ReconcileArgs {
    fn request(&self) -> ReconcileRequest {
        let request = self.hook.map_or_else(ReconcileRequest::default, Hook::request);
        match self.policy {
            Some(policy) => request.with_policy(policy),
            None => request,
        }
    }

    /// Ledger entries are balanced the way the post-generation hook does it.
    fn ledger_request(&self) -> ReconcileRequest {
        let request = Hook::PostLedgerGeneration.request();
        match self.policy {
            Some(policy) => request.with_policy(policy),
            None => request,
        }
    }
}

/// Runs the command and returns `{ invoice, report, ledger? }`.
pub fn run(args: &ReconcileArgs, reconciler: &Reconciler) -> AppResult<Value> {
    if args.invoice == input::STDIN && args.ledger.as_deref() == Some(input::STDIN) {
        return Err(AppError::Input(
            "Only one input may be read from stdin".to_string(),
        ));
    }

    let mut invoice: Invoice = input::read_json(&args.invoice)?;
    let entries: Option<Vec<GlEntry>> = args
        .ledger
        .as_deref()
        .map(input::read_json::<Vec<GlEntry>>)
        .transpose()?;

    let report = reconciler
        .reconcile(&mut invoice, &args.request())
        .map_err(|failure| failed(&failure))?;

    let mut output = json!({
        "invoice": invoice,
        "report": report,
    });

    if let Some(mut entries) = entries {
        let ledger_report = reconciler
            .reconcile_ledger(&mut entries, Some(&invoice), &args.ledger_request())
            .map_err(|failure| failed(&failure))?;
        output["ledger"] = json!({
            "entries": entries,
            "report": ledger_report,
        });
    }

    Ok(output)
}
