//! Item-wise VAT cross-check.
//!
//! The per-row tax pass and a true per-item VAT computation can diverge by
//! rounding residue on invoices with many lines. The item-wise figure is what
//! the compliance validator recomputes, so it wins when the two disagree.

use reckon_shared::config::VatConfig;
use rust_decimal::Decimal;

use super::context::{PassContext, checked_add};
use super::error::ReconcileError;
use super::taxes;
use crate::changes::ChangeLog;
use crate::invoice::{ChargeType, Invoice, TaxCategory, TaxRow};

/// Returns the index of the designated VAT row.
///
/// A row explicitly categorised as VAT wins. Otherwise, when inference is
/// enabled, the first uncategorised row whose account head contains a marker
/// (case-insensitive) or whose rate equals the marker rate.
#[must_use]
pub fn select_vat_row(taxes: &[TaxRow], vat: &VatConfig) -> Option<usize> {
    if let Some(index) = taxes
        .iter()
        .position(|row| row.category == Some(TaxCategory::Vat))
    {
        return Some(index);
    }

    if !vat.infer_from_account {
        return None;
    }

    taxes
        .iter()
        .position(|row| row.category.is_none() && looks_like_vat(row, vat))
}

fn looks_like_vat(row: &TaxRow, vat: &VatConfig) -> bool {
    let account = row.account_head.to_lowercase();
    let marked = vat
        .account_markers
        .iter()
        .any(|marker| !marker.is_empty() && account.contains(&marker.to_lowercase()));
    marked || (vat.marker_rate.is_some() && row.rate == vat.marker_rate)
}

/// Sum over items of `round(amount * rate / 100)`.
///
/// # Errors
///
/// Returns `ReconcileError::Overflow` on overflow.
pub fn item_wise_vat(
    invoice: &Invoice,
    rate: Decimal,
    ctx: &PassContext<'_>,
) -> Result<Decimal, ReconcileError> {
    invoice
        .items
        .iter()
        .enumerate()
        .try_fold(Decimal::ZERO, |total, (i, item)| {
            let vat = ctx.percent_of(item.amount, rate, format!("items[{i}].vat"))?;
            checked_add(total, vat, "item_wise_vat")
        })
}

/// Overwrites the VAT row with the item-wise VAT when they differ by more
/// than the VAT tolerance, then re-derives the tax totals.
///
/// Only "On Net Total" rows with a rate take part; anything else is left to
/// the tax pass.
///
/// # Errors
///
/// Returns `ReconcileError::Overflow` on overflow and
/// `ReconcileError::InvalidConversionRate` for a negative conversion rate.
pub fn reconcile_vat(
    invoice: &mut Invoice,
    ctx: &PassContext<'_>,
    changes: &mut ChangeLog,
) -> Result<(), ReconcileError> {
    let Some(index) = select_vat_row(&invoice.taxes, &ctx.config.vat) else {
        tracing::debug!(invoice = %invoice.display_name(), "No VAT row to cross-check");
        return Ok(());
    };

    let row = &invoice.taxes[index];
    let Some(rate) = row.rate.filter(|_| row.charge_type == ChargeType::OnNetTotal) else {
        return Ok(());
    };

    let expected = item_wise_vat(invoice, rate, ctx)?;
    let difference = (expected - invoice.taxes[index].tax_amount).abs();
    if difference <= ctx.config.tolerances.vat {
        return Ok(());
    }

    tracing::info!(
        invoice = %invoice.display_name(),
        row = index,
        row_amount = %invoice.taxes[index].tax_amount,
        item_wise = %expected,
        "VAT row differs from item-wise VAT"
    );
    taxes::accumulate(invoice, ctx, changes, Some((index, expected)))
}
