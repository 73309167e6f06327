//! Sales invoice domain model.

pub mod types;

pub use types::{
    AdvanceAllocation, AuxiliaryAmounts, ChargeType, Invoice, LineItem, PaymentScheduleEntry,
    TaxCategory, TaxRow, UNSAVED_NAME,
};
