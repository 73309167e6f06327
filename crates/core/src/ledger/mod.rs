//! Generated ledger entries.
//!
//! - Entry and side types
//! - Debit/credit totals and balance validation
//! - Rounding of every leg and single-entry residual absorption
//! - Error types for ledger operations

pub mod balance;
pub mod entry;
pub mod error;
pub mod validation;

#[cfg(test)]
mod balance_props;

pub use balance::{Absorption, absorb_residual, absorbing_entry, round_entries};
pub use entry::{GlEntry, Side};
pub use error::{DEBIT_CREDIT_MISMATCH, LedgerError, is_debit_credit_mismatch};
pub use validation::{LedgerTotals, validate_balanced};
