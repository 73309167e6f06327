//! Property-based tests for ledger residual absorption.

use proptest::prelude::*;
use rust_decimal::Decimal;

use super::balance::{absorb_residual, round_entries};
use super::entry::{GlEntry, Side};
use super::error::LedgerError;
use super::validation::LedgerTotals;
use crate::changes::ChangeLog;
use crate::currency::Rounder;

/// Strategy to generate a positive amount (0.01 to 1,000,000.00).
fn positive_amount() -> impl Strategy<Value = Decimal> {
    (1i64..100_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy to generate an unrounded amount with up to 4 decimals.
fn raw_amount() -> impl Strategy<Value = Decimal> {
    (1i64..10_000_000_000i64).prop_map(|v| Decimal::new(v, 4))
}

fn side() -> impl Strategy<Value = Side> {
    prop_oneof![Just(Side::Debit), Just(Side::Credit)]
}

fn entries() -> impl Strategy<Value = Vec<GlEntry>> {
    prop::collection::vec((side(), positive_amount()), 1..8).prop_map(|legs| {
        legs.into_iter()
            .enumerate()
            .map(|(i, (side, amount))| GlEntry::new(format!("Account {i}"), side, amount))
            .collect()
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// After absorption the entries balance exactly, unless the short side has no leg.
    #[test]
    fn prop_absorption_balances_or_reports(mut entries in entries()) {
        let mut changes = ChangeLog::new();
        match absorb_residual(&mut entries, Decimal::ZERO, &mut changes) {
            Ok(_) => {
                let totals = LedgerTotals::of(&entries).unwrap();
                prop_assert_eq!(totals.debit, totals.credit);
            }
            Err(LedgerError::UnresolvedImbalance { side, .. }) => {
                prop_assert!(entries.iter().all(|e| e.leg(side).is_zero()));
                prop_assert!(changes.is_empty());
            }
            Err(other) => prop_assert!(false, "unexpected error {other}"),
        }
    }

    /// Absorption touches at most one entry and never adds a second leg.
    #[test]
    fn prop_absorption_touches_one_entry(mut entries in entries()) {
        let before = entries.clone();
        let mut changes = ChangeLog::new();
        let absorption = absorb_residual(&mut entries, Decimal::ZERO, &mut changes);

        let touched: Vec<usize> = before
            .iter()
            .zip(&entries)
            .enumerate()
            .filter(|(_, (a, b))| a != b)
            .map(|(i, _)| i)
            .collect();
        prop_assert!(touched.len() <= 1);

        for entry in &entries {
            prop_assert!(entry.debit.is_zero() || entry.credit.is_zero());
        }

        if let Ok(Some(absorption)) = absorption {
            prop_assert_eq!(touched, vec![absorption.index]);
        }
    }

    /// Rounding then absorbing leaves only two-decimal legs.
    #[test]
    fn prop_rounded_then_absorbed_is_two_decimal(
        legs in prop::collection::vec((side(), raw_amount()), 2..6),
    ) {
        let mut entries: Vec<GlEntry> = legs
            .into_iter()
            .map(|(side, amount)| GlEntry::new("Account", side, amount))
            .collect();
        let mut changes = ChangeLog::new();
        round_entries(&mut entries, &Rounder::default(), &mut changes);
        let _ = absorb_residual(&mut entries, Decimal::ZERO, &mut changes);

        for entry in &entries {
            prop_assert!(entry.debit.scale() <= 2);
            prop_assert!(entry.credit.scale() <= 2);
        }
    }
}
