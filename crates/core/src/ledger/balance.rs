//! Rounding and single-entry balancing of generated ledger entries.
//!
//! The balancing heuristic assumes any residual between total debits and total
//! credits is a rounding artifact of a few cents. The residual is absorbed by
//! one entry: the largest entry that already carries a leg on the side that
//! must grow. No entry ever gains a second leg.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::entry::{GlEntry, Side};
use super::error::LedgerError;
use super::validation::LedgerTotals;
use crate::changes::ChangeLog;
use crate::currency::Rounder;

/// Where a residual was absorbed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Absorption {
    /// Index of the adjusted entry.
    pub index: usize,
    /// Account of the adjusted entry.
    pub account: String,
    /// Leg that was increased.
    pub side: Side,
    /// Amount added to that leg.
    pub amount: Decimal,
}

/// Rounds every leg of every entry to amount precision.
pub fn round_entries(entries: &mut [GlEntry], rounder: &Rounder, changes: &mut ChangeLog) {
    for (i, entry) in entries.iter_mut().enumerate() {
        let debit = rounder.amount(entry.debit);
        changes.set(&mut entry.debit, debit, || format!("gl_entries[{i}].debit"));

        let credit = rounder.amount(entry.credit);
        changes.set(&mut entry.credit, credit, || format!("gl_entries[{i}].credit"));

        let debit_ac = rounder.amount(entry.debit_in_account_currency);
        changes.set(&mut entry.debit_in_account_currency, debit_ac, || {
            format!("gl_entries[{i}].debit_in_account_currency")
        });

        let credit_ac = rounder.amount(entry.credit_in_account_currency);
        changes.set(&mut entry.credit_in_account_currency, credit_ac, || {
            format!("gl_entries[{i}].credit_in_account_currency")
        });
    }
}

/// Picks the entry that absorbs a residual on `side`.
///
/// Among entries with a non-zero leg on `side`, returns the one with the
/// largest `max(debit, credit)`; the first one wins a tie.
#[must_use]
pub fn absorbing_entry(entries: &[GlEntry], side: Side) -> Option<usize> {
    let mut best: Option<(usize, Decimal)> = None;
    for (i, entry) in entries.iter().enumerate() {
        if entry.leg(side).is_zero() {
            continue;
        }
        let magnitude = entry.magnitude();
        match best {
            Some((_, current)) if magnitude <= current => {}
            _ => best = Some((i, magnitude)),
        }
    }
    best.map(|(i, _)| i)
}

/// Absorbs the debit/credit residual into a single entry.
///
/// Returns `Ok(None)` when the entries already balance within `tolerance`.
///
/// # Errors
///
/// Returns `LedgerError::UnresolvedImbalance` when no entry carries a leg on
/// the side that must grow, and `LedgerError::Overflow` if a sum overflows.
pub fn absorb_residual(
    entries: &mut [GlEntry],
    tolerance: Decimal,
    changes: &mut ChangeLog,
) -> Result<Option<Absorption>, LedgerError> {
    let totals = LedgerTotals::of(entries)?;
    let Some(side) = totals.short_side() else {
        return Ok(None);
    };
    if totals.is_balanced(tolerance) {
        return Ok(None);
    }

    let difference = totals.difference().abs();
    let Some(index) = absorbing_entry(entries, side) else {
        return Err(LedgerError::UnresolvedImbalance {
            debit: totals.debit,
            credit: totals.credit,
            difference,
            side,
        });
    };

    let entry = &mut entries[index];
    let (leg, leg_ac, name) = match side {
        Side::Debit => (
            &mut entry.debit,
            &mut entry.debit_in_account_currency,
            "debit",
        ),
        Side::Credit => (
            &mut entry.credit,
            &mut entry.credit_in_account_currency,
            "credit",
        ),
    };

    let grown = leg
        .checked_add(difference)
        .ok_or(LedgerError::Overflow("absorbing leg"))?;
    changes.set(leg, grown, || format!("gl_entries[{index}].{name}"));

    if !leg_ac.is_zero() {
        let grown_ac = leg_ac
            .checked_add(difference)
            .ok_or(LedgerError::Overflow("absorbing leg"))?;
        changes.set(leg_ac, grown_ac, || {
            format!("gl_entries[{index}].{name}_in_account_currency")
        });
    }

    Ok(Some(Absorption {
        index,
        account: entry.account.clone(),
        side,
        amount: difference,
    }))
}
