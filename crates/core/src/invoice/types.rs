//! Sales invoice domain types.
//!
//! These mirror the host document's numeric fields. Every numeric field the
//! host may omit deserialises as zero (or `None` where "absent" and "zero"
//! mean different things), so a malformed document contributes 0 instead of
//! failing to load.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Identifier logged for documents that have not been saved yet.
pub const UNSAVED_NAME: &str = "New";

/// A sales invoice: the root aggregate the reconciler corrects in place.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Invoice {
    /// Host document name (e.g. `ACC-SINV-2026-00042`).
    pub name: Option<String>,
    /// Transaction currency (ISO 4217).
    pub currency: Option<String>,
    /// Company base currency (ISO 4217).
    pub base_currency: Option<String>,
    /// Posting date.
    pub posting_date: Option<NaiveDate>,
    /// Units of base currency per unit of transaction currency.
    pub conversion_rate: Option<Decimal>,

    /// Line items, in document order.
    pub items: Vec<LineItem>,
    /// Tax rows, in document order.
    pub taxes: Vec<TaxRow>,

    /// Sum of item amounts.
    pub net_total: Decimal,
    /// Sum of tax amounts.
    pub total_taxes_and_charges: Decimal,
    /// Net total plus taxes.
    pub grand_total: Decimal,
    /// Grand total rounded to whole units.
    pub rounded_total: Decimal,
    /// Balance still owed.
    pub outstanding_amount: Decimal,

    /// `net_total` in base currency.
    pub base_net_total: Decimal,
    /// `total_taxes_and_charges` in base currency.
    pub base_total_taxes_and_charges: Decimal,
    /// `grand_total` in base currency.
    pub base_grand_total: Decimal,
    /// `base_grand_total` rounded to whole units.
    pub base_rounded_total: Decimal,
    /// `outstanding_amount` in base currency.
    pub base_outstanding_amount: Decimal,

    /// Discount, write-off, payment and advance figures.
    #[serde(flatten)]
    pub auxiliary: AuxiliaryAmounts,

    /// Payment schedule, in due-date order.
    pub payment_schedule: Vec<PaymentScheduleEntry>,
    /// Advance payments allocated against this invoice.
    pub advances: Vec<AdvanceAllocation>,
}

impl Invoice {
    /// Returns the host name, or `New` for an unsaved document.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(UNSAVED_NAME)
    }
}

/// A single sold line.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineItem {
    /// Item code.
    pub item_code: Option<String>,
    /// Quantity sold.
    #[serde(alias = "qty")]
    pub quantity: Option<Decimal>,
    /// Unit rate in transaction currency.
    pub rate: Option<Decimal>,
    /// Line amount in transaction currency.
    pub amount: Decimal,
    /// Unit rate in base currency.
    pub base_rate: Decimal,
    /// Line amount in base currency.
    pub base_amount: Decimal,
    /// Net unit rate in base currency (no per-item discounting: equals `base_rate`).
    pub base_net_rate: Decimal,
    /// Net line amount in base currency (equals `base_amount`).
    pub base_net_amount: Decimal,
}

/// Basis a tax row is computed on.
///
/// Serialised as the host's display strings. Host charge types other than the
/// three the reconciler computes are kept verbatim in [`ChargeType::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ChargeType {
    /// Percentage of the net total.
    OnNetTotal,
    /// Percentage of the running total before this row.
    OnPreviousRowTotal,
    /// Fixed amount.
    Actual,
    /// Any other host charge type (amount is only rounded).
    Other(String),
}

impl ChargeType {
    /// Host display string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::OnNetTotal => "On Net Total",
            Self::OnPreviousRowTotal => "On Previous Row Total",
            Self::Actual => "Actual",
            Self::Other(other) => other,
        }
    }
}

impl Default for ChargeType {
    fn default() -> Self {
        Self::Other(String::new())
    }
}

impl From<String> for ChargeType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "On Net Total" => Self::OnNetTotal,
            "On Previous Row Total" => Self::OnPreviousRowTotal,
            "Actual" => Self::Actual,
            _ => Self::Other(value),
        }
    }
}

impl From<ChargeType> for String {
    fn from(value: ChargeType) -> Self {
        match value {
            ChargeType::Other(other) => other,
            known => known.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for ChargeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Explicit tax category of a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaxCategory {
    /// Value-added tax: cross-checked against item-wise VAT.
    Vat,
    /// Any other tax or charge.
    Other,
}

/// A tax or charge row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaxRow {
    /// Computation basis.
    pub charge_type: ChargeType,
    /// Ledger account the tax posts to (e.g. `VAT 15% - CO`).
    pub account_head: String,
    /// Free-text description.
    pub description: Option<String>,
    /// Explicit category, when the host provides one.
    pub category: Option<TaxCategory>,
    /// Percentage rate.
    pub rate: Option<Decimal>,
    /// Tax amount in transaction currency.
    pub tax_amount: Decimal,
    /// Running total after this row.
    pub total: Decimal,
    /// `tax_amount` in base currency.
    pub base_tax_amount: Decimal,
    /// `total` in base currency.
    pub base_total: Decimal,
}

/// A row of the payment schedule.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaymentScheduleEntry {
    /// Due date.
    pub due_date: Option<NaiveDate>,
    /// Share of the invoice, in percent.
    pub invoice_portion: Option<Decimal>,
    /// Amount due on this date.
    pub payment_amount: Decimal,
}

/// An advance payment allocated against the invoice.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdvanceAllocation {
    /// Payment document the advance comes from.
    pub reference_name: Option<String>,
    /// Total advance available.
    pub advance_amount: Decimal,
    /// Portion allocated to this invoice.
    pub allocated_amount: Decimal,
}

/// Document-level figures that are rounded and mirrored but never derived.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuxiliaryAmounts {
    /// Additional discount.
    pub discount_amount: Decimal,
    /// `discount_amount` in base currency.
    pub base_discount_amount: Decimal,
    /// Amount written off.
    pub write_off_amount: Decimal,
    /// `write_off_amount` in base currency.
    pub base_write_off_amount: Decimal,
    /// Amount paid at invoicing (POS).
    pub paid_amount: Decimal,
    /// `paid_amount` in base currency.
    pub base_paid_amount: Decimal,
    /// Change returned (POS).
    pub change_amount: Decimal,
    /// `change_amount` in base currency.
    pub base_change_amount: Decimal,
    /// Sum of allocated advances.
    pub total_advance: Decimal,
    /// `total_advance` in base currency.
    pub base_total_advance: Decimal,
    /// Amount allocated from advances or credit notes.
    pub allocated_amount: Decimal,
    /// `allocated_amount` in base currency.
    pub base_allocated_amount: Decimal,
}

impl AuxiliaryAmounts {
    /// Returns `(field name, amount, base amount)` for every figure.
    pub fn pairs_mut(&mut self) -> [(&'static str, &mut Decimal, &mut Decimal); 6] {
        [
            (
                "discount_amount",
                &mut self.discount_amount,
                &mut self.base_discount_amount,
            ),
            (
                "write_off_amount",
                &mut self.write_off_amount,
                &mut self.base_write_off_amount,
            ),
            ("paid_amount", &mut self.paid_amount, &mut self.base_paid_amount),
            (
                "change_amount",
                &mut self.change_amount,
                &mut self.base_change_amount,
            ),
            (
                "total_advance",
                &mut self.total_advance,
                &mut self.base_total_advance,
            ),
            (
                "allocated_amount",
                &mut self.allocated_amount,
                &mut self.base_allocated_amount,
            ),
        ]
    }
}
