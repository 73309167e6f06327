//! Shared configuration, precision settings, and errors for Reckon.
//!
//! This crate provides common types used across all other crates:
//! - Precision and rounding-mode settings
//! - Typed IDs for generated ledger entries
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use crate::config::{AppConfig, FailurePolicy, ReconcilerConfig};
pub use error::{AppError, AppResult};
