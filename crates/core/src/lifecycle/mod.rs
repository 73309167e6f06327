//! Host lifecycle integration.
//!
//! The reconciler is composed with the host's ledger generation and
//! persistence through explicit ports instead of overriding host behaviour.

pub mod error;
pub mod hooks;
pub mod ports;
pub mod service;

pub use error::LifecycleError;
pub use hooks::Hook;
pub use ports::{DocumentStore, HostError, LedgerGenerator};
pub use service::{InvoiceLifecycle, Submission};
