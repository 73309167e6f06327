//! Ledger entry domain types.

use chrono::NaiveDate;
use reckon_shared::types::LedgerEntryId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Side of a ledger entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// Debit leg.
    Debit,
    /// Credit leg.
    Credit,
}

impl Side {
    /// Returns the opposite side.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Debit => Self::Credit,
            Self::Credit => Self::Debit,
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Debit => write!(f, "debit"),
            Self::Credit => write!(f, "credit"),
        }
    }
}

/// A general-ledger entry produced by the host's ledger generation.
///
/// Amounts are in the company base currency; the `*_in_account_currency`
/// legs carry the same figures in the account's own currency.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlEntry {
    /// Unique identifier for this entry.
    pub id: LedgerEntryId,
    /// Account posted to.
    pub account: String,
    /// Customer or supplier, for receivable/payable lines.
    pub party: Option<String>,
    /// Posting date.
    pub posting_date: Option<NaiveDate>,
    /// Debit amount in base currency.
    pub debit: Decimal,
    /// Credit amount in base currency.
    pub credit: Decimal,
    /// Debit amount in account currency.
    pub debit_in_account_currency: Decimal,
    /// Credit amount in account currency.
    pub credit_in_account_currency: Decimal,
    /// Account currency (ISO 4217).
    pub account_currency: Option<String>,
}

impl GlEntry {
    /// Creates an entry with a single leg; account-currency legs mirror it.
    #[must_use]
    pub fn new(account: impl Into<String>, side: Side, amount: Decimal) -> Self {
        let (debit, credit) = match side {
            Side::Debit => (amount, Decimal::ZERO),
            Side::Credit => (Decimal::ZERO, amount),
        };
        Self {
            account: account.into(),
            debit,
            credit,
            debit_in_account_currency: debit,
            credit_in_account_currency: credit,
            ..Self::default()
        }
    }

    /// Returns the base-currency leg on `side`.
    #[must_use]
    pub const fn leg(&self, side: Side) -> Decimal {
        match side {
            Side::Debit => self.debit,
            Side::Credit => self.credit,
        }
    }

    /// Returns the larger of the two base-currency legs.
    #[must_use]
    pub fn magnitude(&self) -> Decimal {
        self.debit.abs().max(self.credit.abs())
    }

    /// Returns the signed amount (positive for debit, negative for credit).
    #[must_use]
    pub fn signed_amount(&self) -> Decimal {
        self.debit - self.credit
    }
}
