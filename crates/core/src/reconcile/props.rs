//! Property-based tests for invoice reconciliation.

use proptest::prelude::*;
use reckon_shared::ReconcilerConfig;
use reckon_shared::config::VatConfig;
use rust_decimal::Decimal;

use super::service::{Reconcile, Reconciler};
use super::types::ReconcileRequest;
use crate::currency::Rounder;
use crate::invoice::{ChargeType, Invoice, LineItem, PaymentScheduleEntry, TaxRow};

/// Strategy to generate a unit rate (0.01 to 10,000.00).
fn unit_rate() -> impl Strategy<Value = Decimal> {
    (1i64..1_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy to generate a quantity with up to 3 decimals (0.001 to 1,000.000).
fn quantity() -> impl Strategy<Value = Decimal> {
    (1i64..1_000_000i64).prop_map(|v| Decimal::new(v, 3))
}

/// Strategy to generate a tax percentage (0.00 to 100.00).
fn percentage() -> impl Strategy<Value = Decimal> {
    (0i64..=10_000i64).prop_map(|v| Decimal::new(v, 2))
}

/// Strategy to generate an unrounded stored amount (0 to 100,000).
fn stored_amount() -> impl Strategy<Value = Decimal> {
    (0i64..100_000_000i64).prop_map(|v| Decimal::new(v, 3))
}

fn line_item() -> impl Strategy<Value = LineItem> {
    prop_oneof![
        3 => (unit_rate(), quantity()).prop_map(|(rate, quantity)| LineItem {
            rate: Some(rate),
            quantity: Some(quantity),
            ..LineItem::default()
        }),
        1 => stored_amount().prop_map(|amount| LineItem {
            amount,
            ..LineItem::default()
        }),
    ]
}

fn tax_row() -> impl Strategy<Value = TaxRow> {
    let account = prop_oneof![
        Just("VAT 15% - CO".to_string()),
        Just("Freight - CO".to_string()),
        Just("Municipality Fee - CO".to_string()),
    ];
    let charge = prop_oneof![
        (percentage(), stored_amount())
            .prop_map(|(rate, amount)| (ChargeType::OnNetTotal, Some(rate), amount)),
        (percentage(), stored_amount())
            .prop_map(|(rate, amount)| (ChargeType::OnPreviousRowTotal, Some(rate), amount)),
        stored_amount().prop_map(|amount| (ChargeType::Actual, None, amount)),
        stored_amount()
            .prop_map(|amount| (ChargeType::Other("On Item Quantity".to_string()), None, amount)),
    ];
    (account, charge).prop_map(|(account_head, (charge_type, rate, tax_amount))| TaxRow {
        charge_type,
        account_head,
        rate,
        tax_amount,
        ..TaxRow::default()
    })
}

fn conversion_rate() -> impl Strategy<Value = Option<Decimal>> {
    prop_oneof![
        Just(None),
        (1i64..10_000_000i64).prop_map(|v| Some(Decimal::new(v, 6))),
    ]
}

fn invoice() -> impl Strategy<Value = Invoice> {
    (
        prop::collection::vec(line_item(), 1..8),
        prop::collection::vec(tax_row(), 1..4),
        conversion_rate(),
        prop::collection::vec(stored_amount(), 0..4),
    )
        .prop_map(|(items, taxes, conversion_rate, schedule)| Invoice {
            items,
            taxes,
            conversion_rate,
            payment_schedule: schedule
                .into_iter()
                .map(|payment_amount| PaymentScheduleEntry {
                    payment_amount,
                    ..PaymentScheduleEntry::default()
                })
                .collect(),
            ..Invoice::default()
        })
}

fn reconcile_with(reconciler: &Reconciler, invoice: &mut Invoice) {
    let report = reconciler
        .reconcile(invoice, &ReconcileRequest::default())
        .unwrap();
    assert!(report.is_complete(), "unexpected failure: {:?}", report.failure);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Net total is the rounded sum of rounded line products, in any order.
    #[test]
    fn prop_net_total_is_sum_of_rounded_products(
        lines in prop::collection::vec((unit_rate(), quantity()), 1..10),
    ) {
        let rounder = Rounder::default();
        let expected = rounder.amount(
            lines.iter().map(|(rate, qty)| rounder.amount(rate * qty)).sum(),
        );

        let make = |lines: &[(Decimal, Decimal)]| Invoice {
            items: lines
                .iter()
                .map(|(rate, quantity)| LineItem {
                    rate: Some(*rate),
                    quantity: Some(*quantity),
                    ..LineItem::default()
                })
                .collect(),
            taxes: vec![TaxRow::default()],
            ..Invoice::default()
        };

        let reconciler = Reconciler::default();
        let mut forward = make(&lines);
        reconcile_with(&reconciler, &mut forward);
        let reversed: Vec<_> = lines.iter().rev().copied().collect();
        let mut backward = make(&reversed);
        reconcile_with(&reconciler, &mut backward);

        prop_assert_eq!(forward.net_total, expected);
        prop_assert_eq!(backward.net_total, expected);
    }

    /// "On Net Total" rows are a rounded percentage of the net total.
    #[test]
    fn prop_on_net_total_rows_follow_net_total(doc in invoice()) {
        let reconciler = Reconciler::new(ReconcilerConfig {
            vat: VatConfig {
                infer_from_account: false,
                ..VatConfig::default()
            },
            ..ReconcilerConfig::default()
        });
        let mut doc = doc;
        reconcile_with(&reconciler, &mut doc);

        let rounder = Rounder::default();
        for row in &doc.taxes {
            if let (ChargeType::OnNetTotal, Some(rate)) = (&row.charge_type, row.rate) {
                prop_assert_eq!(row.tax_amount, rounder.amount(doc.net_total * rate / Decimal::ONE_HUNDRED));
            }
        }
    }

    /// A second run changes no value.
    #[test]
    fn prop_reconciliation_is_idempotent(doc in invoice()) {
        let reconciler = Reconciler::default();
        let mut doc = doc;
        reconcile_with(&reconciler, &mut doc);
        let once = doc.clone();
        reconcile_with(&reconciler, &mut doc);
        prop_assert_eq!(doc, once);
    }

    /// No "Actual" row survives and every imputed rate is in (0, 100].
    #[test]
    fn prop_actual_rows_are_normalised(doc in invoice()) {
        let actual: Vec<usize> = doc
            .taxes
            .iter()
            .enumerate()
            .filter(|(_, row)| row.charge_type == ChargeType::Actual)
            .map(|(i, _)| i)
            .collect();

        let mut doc = doc;
        reconcile_with(&Reconciler::default(), &mut doc);

        for i in actual {
            let row = &doc.taxes[i];
            prop_assert_eq!(&row.charge_type, &ChargeType::OnNetTotal);
            let rate = row.rate.unwrap_or_default();
            prop_assert!(rate > Decimal::ZERO && rate <= Decimal::ONE_HUNDRED, "rate {}", rate);
        }
    }

    /// Grand total is net total plus taxes, and outstanding equals grand total.
    #[test]
    fn prop_grand_total_is_consistent(doc in invoice()) {
        let mut doc = doc;
        reconcile_with(&Reconciler::default(), &mut doc);
        prop_assert_eq!(doc.grand_total, doc.net_total + doc.total_taxes_and_charges);
        prop_assert_eq!(doc.outstanding_amount, doc.grand_total);
        prop_assert_eq!(
            doc.total_taxes_and_charges,
            doc.taxes.iter().map(|row| row.tax_amount).sum::<Decimal>()
        );
    }

    /// A non-empty schedule sums to the grand total; only the last entry moves.
    #[test]
    fn prop_schedule_sums_to_grand_total(doc in invoice()) {
        let rounder = Rounder::default();
        let leading_len = doc.payment_schedule.len().saturating_sub(1);
        let leading: Vec<Decimal> = doc.payment_schedule[..leading_len]
            .iter()
            .map(|entry| rounder.amount(entry.payment_amount))
            .collect();

        let mut doc = doc;
        reconcile_with(&Reconciler::default(), &mut doc);

        if !doc.payment_schedule.is_empty() {
            let sum: Decimal = doc.payment_schedule.iter().map(|e| e.payment_amount).sum();
            prop_assert_eq!(sum, doc.grand_total);
            for (entry, before) in doc.payment_schedule.iter().zip(&leading) {
                prop_assert_eq!(entry.payment_amount, *before);
            }
        }
    }
}
