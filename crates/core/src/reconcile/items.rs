//! Item pass: line amounts, net total and item base mirrors.

use rust_decimal::Decimal;

use super::context::{PassContext, checked_add};
use super::error::ReconcileError;
use crate::changes::ChangeLog;
use crate::invoice::Invoice;

/// Rounds every line item and derives `net_total`.
///
/// The amount of a line with both rate and quantity is recomputed from the
/// incoming rate and the rounded quantity before the rate itself is rounded,
/// so `10.005 x 3` yields `30.02`. Lines without rate or quantity only have
/// their stored amount rounded.
///
/// # Errors
///
/// Returns `ReconcileError::Overflow` on overflow and
/// `ReconcileError::InvalidConversionRate` for a negative conversion rate.
pub fn reconcile_items(
    invoice: &mut Invoice,
    ctx: &PassContext<'_>,
    changes: &mut ChangeLog,
) -> Result<(), ReconcileError> {
    let rounder = ctx.rounder;
    let mut net_total = Decimal::ZERO;

    for (i, item) in invoice.items.iter_mut().enumerate() {
        if let Some(quantity) = item.quantity {
            changes.set_opt(&mut item.quantity, rounder.quantity(quantity), || {
                format!("items[{i}].quantity")
            });
        }

        let amount = match (item.rate, item.quantity) {
            (Some(rate), Some(quantity)) => rounder
                .product(rate, quantity)
                .ok_or_else(|| ReconcileError::overflow(format!("items[{i}].amount")))?,
            _ => rounder.amount(item.amount),
        };
        changes.set(&mut item.amount, amount, || format!("items[{i}].amount"));

        if let Some(rate) = item.rate {
            changes.set_opt(&mut item.rate, rounder.rate(rate), || format!("items[{i}].rate"));
        }

        if let Some(rate) = item.rate {
            let base_rate = ctx.mirror(rate, format!("items[{i}].base_rate"))?;
            changes.set(&mut item.base_rate, base_rate, || format!("items[{i}].base_rate"));
            changes.set(&mut item.base_net_rate, base_rate, || {
                format!("items[{i}].base_net_rate")
            });
        }

        let base_amount = ctx.mirror(item.amount, format!("items[{i}].base_amount"))?;
        changes.set(&mut item.base_amount, base_amount, || {
            format!("items[{i}].base_amount")
        });
        changes.set(&mut item.base_net_amount, base_amount, || {
            format!("items[{i}].base_net_amount")
        });

        net_total = checked_add(net_total, item.amount, "net_total")?;
    }

    let net_total = rounder.amount(net_total);
    changes.set(&mut invoice.net_total, net_total, || "net_total".to_string());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::currency::Rounder;
    use crate::invoice::LineItem;
    use reckon_shared::ReconcilerConfig;
    use rust_decimal_macros::dec;

    fn item(rate: Option<Decimal>, quantity: Option<Decimal>, amount: Decimal) -> LineItem {
        LineItem {
            rate,
            quantity,
            amount,
            ..LineItem::default()
        }
    }

    fn run(invoice: &mut Invoice) -> ChangeLog {
        let config = ReconcilerConfig::default();
        let ctx = PassContext::new(&config, Rounder::default(), invoice.conversion_rate);
        let mut changes = ChangeLog::new();
        reconcile_items(invoice, &ctx, &mut changes).unwrap();
        changes
    }

    #[test]
    fn test_amount_from_unrounded_rate() {
        let mut invoice = Invoice {
            items: vec![item(Some(dec!(10.005)), Some(dec!(3)), Decimal::ZERO)],
            ..Invoice::default()
        };
        let changes = run(&mut invoice);

        assert_eq!(invoice.items[0].amount, dec!(30.02));
        assert_eq!(invoice.items[0].rate, Some(dec!(10.01)));
        assert_eq!(invoice.net_total, dec!(30.02));
        assert_eq!(changes.find("items[0].amount").unwrap().after, dec!(30.02));
    }

    #[test]
    fn test_sub_cent_rate_settles_on_second_run() {
        let mut invoice = Invoice {
            items: vec![item(Some(dec!(10.005)), Some(dec!(3)), Decimal::ZERO)],
            ..Invoice::default()
        };
        run(&mut invoice);
        run(&mut invoice);
        assert_eq!(invoice.items[0].amount, dec!(30.03));
        let third = run(&mut invoice);
        assert!(third.is_empty());
    }

    #[test]
    fn test_quantity_rounded_to_three_places() {
        let mut invoice = Invoice {
            items: vec![item(Some(dec!(2)), Some(dec!(1.23456)), Decimal::ZERO)],
            ..Invoice::default()
        };
        run(&mut invoice);
        assert_eq!(invoice.items[0].quantity, Some(dec!(1.235)));
        assert_eq!(invoice.items[0].amount, dec!(2.47));
    }

    #[test]
    fn test_amount_only_lines_are_rounded() {
        let mut invoice = Invoice {
            items: vec![
                item(None, None, dec!(12.345)),
                item(Some(dec!(5)), None, dec!(7.004)),
                item(None, None, Decimal::ZERO),
            ],
            ..Invoice::default()
        };
        run(&mut invoice);
        assert_eq!(invoice.items[0].amount, dec!(12.35));
        assert_eq!(invoice.items[1].amount, dec!(7.00));
        assert_eq!(invoice.net_total, dec!(19.35));
    }

    #[test]
    fn test_base_mirrors_follow_conversion_rate() {
        let mut invoice = Invoice {
            conversion_rate: Some(dec!(3.75)),
            items: vec![item(Some(dec!(10)), Some(dec!(3)), Decimal::ZERO)],
            ..Invoice::default()
        };
        run(&mut invoice);
        let line = &invoice.items[0];
        assert_eq!(line.base_rate, dec!(37.50));
        assert_eq!(line.base_net_rate, dec!(37.50));
        assert_eq!(line.base_amount, dec!(112.50));
        assert_eq!(line.base_net_amount, dec!(112.50));
    }

    #[test]
    fn test_negative_conversion_rate_fails() {
        let mut invoice = Invoice {
            conversion_rate: Some(dec!(-2)),
            items: vec![item(Some(dec!(10)), Some(dec!(1)), Decimal::ZERO)],
            ..Invoice::default()
        };
        let config = ReconcilerConfig::default();
        let ctx = PassContext::new(&config, Rounder::default(), invoice.conversion_rate);
        let mut changes = ChangeLog::new();
        assert_eq!(
            reconcile_items(&mut invoice, &ctx, &mut changes),
            Err(ReconcileError::InvalidConversionRate(dec!(-2)))
        );
    }
}
