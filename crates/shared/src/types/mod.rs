//! Common types used across the workspace.

pub mod id;
pub mod precision;

pub use id::LedgerEntryId;
pub use precision::{Precision, RoundingMode};
