//! Tax pass: row amounts, running totals and total taxes.

use rust_decimal::Decimal;

use super::context::{PassContext, checked_add};
use super::error::ReconcileError;
use crate::changes::ChangeLog;
use crate::invoice::{ChargeType, Invoice, TaxRow};

/// Recomputes every tax row from `net_total` and derives
/// `total_taxes_and_charges`.
///
/// # Errors
///
/// Returns `ReconcileError::Overflow` on overflow and
/// `ReconcileError::InvalidConversionRate` for a negative conversion rate.
pub fn reconcile_taxes(
    invoice: &mut Invoice,
    ctx: &PassContext<'_>,
    changes: &mut ChangeLog,
) -> Result<(), ReconcileError> {
    accumulate(invoice, ctx, changes, None)
}

/// Runs the tax pass, forcing row `pinned.0` to amount `pinned.1`.
///
/// Rows after the pinned row see the corrected running total.
pub(crate) fn accumulate(
    invoice: &mut Invoice,
    ctx: &PassContext<'_>,
    changes: &mut ChangeLog,
    pinned: Option<(usize, Decimal)>,
) -> Result<(), ReconcileError> {
    let rounder = ctx.rounder;
    let net_total = invoice.net_total;
    let mut running_total = net_total;
    let mut total_taxes = Decimal::ZERO;

    for (i, row) in invoice.taxes.iter_mut().enumerate() {
        let tax_amount = match pinned {
            Some((index, amount)) if index == i => amount,
            _ => row_amount(i, row, net_total, running_total, ctx, changes)?,
        };
        changes.set(&mut row.tax_amount, tax_amount, || format!("taxes[{i}].tax_amount"));

        total_taxes = checked_add(total_taxes, tax_amount, "total_taxes_and_charges")?;
        running_total = checked_add(running_total, tax_amount, &format!("taxes[{i}].total"))?;
        changes.set(&mut row.total, rounder.amount(running_total), || {
            format!("taxes[{i}].total")
        });

        let base_tax_amount = ctx.mirror(row.tax_amount, format!("taxes[{i}].base_tax_amount"))?;
        changes.set(&mut row.base_tax_amount, base_tax_amount, || {
            format!("taxes[{i}].base_tax_amount")
        });
        let base_total = ctx.mirror(row.total, format!("taxes[{i}].base_total"))?;
        changes.set(&mut row.base_total, base_total, || format!("taxes[{i}].base_total"));
    }

    changes.set(
        &mut invoice.total_taxes_and_charges,
        rounder.amount(total_taxes),
        || "total_taxes_and_charges".to_string(),
    );

    Ok(())
}

/// Computes the amount of a single row.
///
/// "Actual" rows get a rate and are rewritten to "On Net Total".
fn row_amount(
    i: usize,
    row: &mut TaxRow,
    net_total: Decimal,
    running_total: Decimal,
    ctx: &PassContext<'_>,
    changes: &mut ChangeLog,
) -> Result<Decimal, ReconcileError> {
    let field = || format!("taxes[{i}].tax_amount");
    if row.charge_type == ChargeType::Actual {
        let rate = actual_rate(i, row, net_total, ctx)?;
        changes.set_opt(&mut row.rate, rate, || format!("taxes[{i}].rate"));
        tracing::debug!(row = i, %rate, "Rewrote Actual tax row to On Net Total");
        row.charge_type = ChargeType::OnNetTotal;
        return ctx.percent_of(net_total, rate, field());
    }

    match (&row.charge_type, row.rate) {
        (ChargeType::OnNetTotal, Some(rate)) => ctx.percent_of(net_total, rate, field()),
        (ChargeType::OnPreviousRowTotal, Some(rate)) => {
            ctx.percent_of(running_total, rate, field())
        }
        _ => Ok(ctx.rounder.amount(row.tax_amount)),
    }
}

/// Chooses the rate for an "Actual" row.
///
/// A positive stored rate wins; otherwise the rate implied by the stored
/// amount, if it lies in `(0, 100]`; otherwise the fallback rate.
fn actual_rate(
    i: usize,
    row: &TaxRow,
    net_total: Decimal,
    ctx: &PassContext<'_>,
) -> Result<Decimal, ReconcileError> {
    if let Some(rate) = row.rate.filter(|r| *r > Decimal::ZERO) {
        return Ok(rate);
    }

    if !row.tax_amount.is_zero() && net_total > Decimal::ZERO {
        let implied = row
            .tax_amount
            .checked_div(net_total)
            .and_then(|v| v.checked_mul(Decimal::ONE_HUNDRED))
            .ok_or_else(|| ReconcileError::overflow(format!("taxes[{i}].rate")))?;
        let implied = ctx.rounder.rate(implied);
        if implied > Decimal::ZERO && implied <= Decimal::ONE_HUNDRED {
            return Ok(implied);
        }
    }

    Ok(ctx.config.vat.fallback_rate)
}
