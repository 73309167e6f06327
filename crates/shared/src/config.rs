//! Application configuration management.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{Precision, RoundingMode};

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Reconciler configuration.
    pub reconciler: ReconcilerConfig,
    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// What a reconciliation run does when a pass fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Abort the run and hand the error (plus partial report) to the caller.
    Strict,
    /// Log the error, keep the partial state, and let the host continue.
    #[default]
    Lenient,
}

impl std::str::FromStr for FailurePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "strict" => Ok(Self::Strict),
            "lenient" => Ok(Self::Lenient),
            _ => Err(format!("Unknown failure policy: {s}")),
        }
    }
}

/// Reconciler configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ReconcilerConfig {
    /// Failure policy applied when the caller does not override it.
    pub failure_policy: FailurePolicy,
    /// Midpoint rounding mode.
    pub rounding: RoundingMode,
    /// Decimal places per kind of figure.
    pub precision: Precision,
    /// Residual thresholds.
    pub tolerances: Tolerances,
    /// VAT row detection and fallback rate.
    pub vat: VatConfig,
}

/// Residual thresholds. A residual is corrected only when its absolute value
/// is strictly greater than the threshold.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Tolerances {
    /// Payment schedule sum vs grand total.
    pub payment_schedule: Decimal,
    /// Total debits vs total credits.
    pub ledger: Decimal,
    /// VAT row vs item-wise VAT.
    pub vat: Decimal,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            payment_schedule: Decimal::ZERO,
            ledger: Decimal::ZERO,
            vat: Decimal::new(1, 3), // 0.001
        }
    }
}

/// VAT row detection and fallback rate.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct VatConfig {
    /// Rate imputed for "Actual" rows whose rate cannot be derived.
    pub fallback_rate: Decimal,
    /// Case-insensitive account-name fragments that mark a VAT row.
    pub account_markers: Vec<String>,
    /// Rate that marks a VAT row when no explicit category is set.
    pub marker_rate: Option<Decimal>,
    /// Whether rows without an explicit category may be inferred as VAT.
    pub infer_from_account: bool,
}

impl Default for VatConfig {
    fn default() -> Self {
        Self {
            fallback_rate: Decimal::from(15),
            account_markers: vec!["VAT".to_string(), "Tax".to_string()],
            marker_rate: Some(Decimal::from(15)),
            infer_from_account: true,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is not set.
    pub filter: String,
    /// Emit JSON lines instead of human-readable output.
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "reckon=info".to_string(),
            json: false,
        }
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// Sources, later ones overriding earlier ones:
    /// `config/default`, `config/{RUN_MODE}`, then `RECKON__*` variables.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(
                config::Environment::with_prefix("RECKON")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("reconciler.vat.account_markers"),
            )
            .build()?;

        config.try_deserialize()
    }
}
