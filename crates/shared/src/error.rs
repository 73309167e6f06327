//! Application-wide error types.

use thiserror::Error;

/// Result type alias using `AppError`.
pub type AppResult<T> = Result<T, AppError>;

/// Application error types.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Input could not be read.
    #[error("Input error: {0}")]
    Input(String),

    /// Input could not be parsed.
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Reconciliation failed under the strict policy.
    #[error("Reconciliation failed: {0}")]
    Reconciliation(String),

    /// Persisting corrected figures failed.
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns the process exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) => 78,
            Self::Input(_) => 66,
            Self::Parse(_) => 65,
            Self::Reconciliation(_) => 1,
            Self::Persistence(_) => 74,
            Self::Internal(_) => 70,
        }
    }

    /// Returns a stable error code for structured output.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Config(_) => "CONFIG_ERROR",
            Self::Input(_) => "INPUT_ERROR",
            Self::Parse(_) => "PARSE_ERROR",
            Self::Reconciliation(_) => "RECONCILIATION_FAILED",
            Self::Persistence(_) => "PERSISTENCE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}
