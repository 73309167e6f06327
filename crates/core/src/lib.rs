//! Core business logic for Reckon.
//!
//! This crate contains pure business logic with ZERO I/O dependencies.
//! All domain types, rounding rules, and reconciliation passes live here.
//!
//! # Modules
//!
//! - `currency` - Rounding service and base-currency mirroring
//! - `invoice` - Sales invoice domain types
//! - `ledger` - Generated ledger entries and residual absorption
//! - `reconcile` - The precision reconciler and its passes
//! - `lifecycle` - Hook dispatch, ledger generation and unit-of-work submission
//! - `changes` - Field-level change tracking

pub mod changes;
pub mod currency;
pub mod invoice;
pub mod ledger;
pub mod lifecycle;
pub mod reconcile;
