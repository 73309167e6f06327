//! Rounding and base-currency mirroring.

pub mod conversion;
pub mod service;

#[cfg(test)]
mod props;

pub use conversion::{ConversionRate, convert_amount};
pub use service::Rounder;
