//! Host lifecycle hook points.

use serde::{Deserialize, Serialize};

use crate::reconcile::{Pass, ReconcileRequest, Strictness};

const DOCUMENT_PASSES: &[Pass] = &[Pass::Items, Pass::Taxes, Pass::Vat, Pass::Totals];
const SUBMIT_PASSES: &[Pass] = &[
    Pass::Items,
    Pass::Taxes,
    Pass::Vat,
    Pass::Totals,
    Pass::Schedule,
];

/// A point in the host document lifecycle where the reconciler runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Hook {
    /// Before the host validates the document.
    PreValidate,
    /// Before the host saves the document.
    PreSave,
    /// During host validation.
    Validate,
    /// Before the document is submitted.
    PreSubmit,
    /// After the document is submitted.
    PostSubmit,
    /// After ledger entries were generated for the document.
    PostLedgerGeneration,
}

impl Hook {
    /// Every hook, in lifecycle order.
    pub const ALL: [Self; 6] = [
        Self::PreValidate,
        Self::PreSave,
        Self::Validate,
        Self::PreSubmit,
        Self::PostSubmit,
        Self::PostLedgerGeneration,
    ];

    /// Returns the strictness the reconciler runs with at this hook.
    #[must_use]
    pub const fn strictness(self) -> Strictness {
        match self {
            Self::PostLedgerGeneration => Strictness::Aggressive,
            _ => Strictness::Normal,
        }
    }

    /// Returns the invoice passes that run at this hook.
    #[must_use]
    pub const fn passes(self) -> &'static [Pass] {
        match self {
            Self::PreValidate | Self::PreSave | Self::Validate => DOCUMENT_PASSES,
            Self::PreSubmit | Self::PostSubmit | Self::PostLedgerGeneration => SUBMIT_PASSES,
        }
    }

    /// Builds the reconciler request for this hook.
    #[must_use]
    pub fn request(self) -> ReconcileRequest {
        ReconcileRequest::new(self.strictness()).with_passes(self.passes())
    }

    /// Returns the hook name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PreValidate => "pre-validate",
            Self::PreSave => "pre-save",
            Self::Validate => "validate",
            Self::PreSubmit => "pre-submit",
            Self::PostSubmit => "post-submit",
            Self::PostLedgerGeneration => "post-ledger-generation",
        }
    }
}

impl std::fmt::Display for Hook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Hook {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.to_lowercase().replace('_', "-");
        Self::ALL
            .into_iter()
            .find(|hook| hook.as_str() == normalized)
            .ok_or_else(|| format!("Unknown hook: {s}"))
    }
}
