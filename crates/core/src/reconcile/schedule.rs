//! Payment-schedule and advance-allocation pass.

use rust_decimal::Decimal;

use super::context::{PassContext, checked_add};
use super::error::ReconcileError;
use crate::changes::ChangeLog;
use crate::invoice::Invoice;

/// Rounds the payment schedule and advance allocations.
///
/// When the schedule sum differs from `grand_total` by more than the
/// schedule tolerance, the last entry absorbs the whole residual. An empty
/// schedule is left alone.
///
/// # Errors
///
/// Returns `ReconcileError::Overflow` on overflow.
pub fn reconcile_schedule(
    invoice: &mut Invoice,
    ctx: &PassContext<'_>,
    changes: &mut ChangeLog,
) -> Result<(), ReconcileError> {
    let rounder = ctx.rounder;

    for (i, advance) in invoice.advances.iter_mut().enumerate() {
        let allocated = rounder.amount(advance.allocated_amount);
        changes.set(&mut advance.allocated_amount, allocated, || {
            format!("advances[{i}].allocated_amount")
        });
    }

    let mut scheduled = Decimal::ZERO;
    for (i, entry) in invoice.payment_schedule.iter_mut().enumerate() {
        let amount = rounder.amount(entry.payment_amount);
        changes.set(&mut entry.payment_amount, amount, || {
            format!("payment_schedule[{i}].payment_amount")
        });
        scheduled = checked_add(scheduled, entry.payment_amount, "payment_schedule")?;
    }

    if invoice.payment_schedule.is_empty() {
        return Ok(());
    }
    let residual = invoice
        .grand_total
        .checked_sub(scheduled)
        .ok_or_else(|| ReconcileError::overflow("payment_schedule"))?;
    if residual.abs() <= ctx.config.tolerances.payment_schedule {
        return Ok(());
    }

    tracing::debug!(
        invoice = %invoice.display_name(),
        %residual,
        "Last payment schedule entry absorbs residual"
    );
    let last = invoice.payment_schedule.len() - 1;
    let entry = &mut invoice.payment_schedule[last];
    let adjusted = rounder.amount(checked_add(
        entry.payment_amount,
        residual,
        "payment_schedule",
    )?);
    changes.set(&mut entry.payment_amount, adjusted, || {
        format!("payment_schedule[{last}].payment_amount")
    });

    Ok(())
}
