//! Document-total pass: grand, rounded and outstanding totals plus base mirrors.

use super::context::{PassContext, checked_add};
use super::error::ReconcileError;
use crate::changes::ChangeLog;
use crate::invoice::Invoice;

/// Derives the document totals from `net_total` and
/// `total_taxes_and_charges`, then mirrors them into base currency.
///
/// `outstanding_amount` is set to the full grand total; `rounded_total` is
/// the grand total rounded to whole units.
///
/// # Errors
///
/// Returns `ReconcileError::Overflow` on overflow and
/// `ReconcileError::InvalidConversionRate` for a negative conversion rate.
pub fn reconcile_totals(
    invoice: &mut Invoice,
    ctx: &PassContext<'_>,
    changes: &mut ChangeLog,
) -> Result<(), ReconcileError> {
    let rounder = ctx.rounder;

    let grand_total = rounder.amount(checked_add(
        invoice.net_total,
        invoice.total_taxes_and_charges,
        "grand_total",
    )?);
    changes.set(&mut invoice.grand_total, grand_total, || "grand_total".to_string());
    changes.set(&mut invoice.outstanding_amount, grand_total, || {
        "outstanding_amount".to_string()
    });
    changes.set(&mut invoice.rounded_total, rounder.whole(grand_total), || {
        "rounded_total".to_string()
    });

    let base_net_total = ctx.mirror(invoice.net_total, "base_net_total")?;
    changes.set(&mut invoice.base_net_total, base_net_total, || {
        "base_net_total".to_string()
    });
    let base_taxes = ctx.mirror(invoice.total_taxes_and_charges, "base_total_taxes_and_charges")?;
    changes.set(&mut invoice.base_total_taxes_and_charges, base_taxes, || {
        "base_total_taxes_and_charges".to_string()
    });
    let base_grand_total = ctx.mirror(grand_total, "base_grand_total")?;
    changes.set(&mut invoice.base_grand_total, base_grand_total, || {
        "base_grand_total".to_string()
    });
    let base_outstanding = ctx.mirror(invoice.outstanding_amount, "base_outstanding_amount")?;
    changes.set(&mut invoice.base_outstanding_amount, base_outstanding, || {
        "base_outstanding_amount".to_string()
    });
    changes.set(
        &mut invoice.base_rounded_total,
        rounder.whole(base_grand_total),
        || "base_rounded_total".to_string(),
    );

    for (name, amount, base_amount) in invoice.auxiliary.pairs_mut() {
        if amount.is_zero() {
            continue;
        }
        let rounded = rounder.amount(*amount);
        changes.set(amount, rounded, || name.to_string());
        let mirrored = ctx.mirror(*amount, format!("base_{name}"))?;
        changes.set(base_amount, mirrored, || format!("base_{name}"));
    }

    Ok(())
}
