//! Reckon command-line driver.
//!
//! Reads an invoice (and optionally its generated ledger entries) as JSON,
//! runs the reconciler, and prints the corrected documents with the report.

mod commands;
mod input;
mod output;

use std::process;

use anyhow::Context;
use clap::{Parser, Subcommand};
use reckon_core::reconcile::Reconciler;
use reckon_shared::{AppConfig, AppError};
use reckon_shared::config::LoggingConfig;
use tracing::{debug, error};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use commands::balance::BalanceArgs;
use commands::reconcile::ReconcileArgs;

/// Precision reconciler for sales-invoice totals
#[derive(Parser)]
#[command(
    name = "reckon",
    version,
    about = "Precision reconciler for sales-invoice totals",
    long_about = "Recomputes item amounts, tax rows, totals, payment schedules and \
                  ledger entries of a sales invoice so every figure agrees at 2 \
                  decimal places before it is persisted."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Reconcile an invoice and optionally its ledger entries
    Reconcile(ReconcileArgs),
    /// Round and balance ledger entries on their own
    Balance(BalanceArgs),
}

fn init_tracing(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&logging.filter));
    let registry = tracing_subscriber::registry().with(filter);

    // Logs go to stderr so stdout stays valid JSON.
    if logging.json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let config = AppConfig::load()
        .map_err(AppError::from)
        .context("Failed to load configuration")?;
    init_tracing(&config.logging);

    let reconciler = Reconciler::new(config.reconciler);
    debug!(config = ?reconciler.config(), "Reconciler configured");

    let value = match &cli.command {
        Commands::Reconcile(args) => commands::reconcile::run(args, &reconciler)?,
        Commands::Balance(args) => commands::balance::run(args, &reconciler)?,
    };
    output::print_json(&value)?;
    Ok(())
}

/// Exit code for a failed run; errors raised outside `AppError` map to 1.
fn exit_code(error: &anyhow::Error) -> i32 {
    error.downcast_ref::<AppError>().map_or(1, AppError::exit_code)
}

fn main() {
    // Load .env file if exists
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        error!(error = %e, "Command failed");
        eprintln!("error: {e:#}");
        process::exit(exit_code(&e));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use reckon_core::lifecycle::Hook;
    use reckon_shared::FailurePolicy;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_reconcile_args() {
        let cli = Cli::try_parse_from([
            "reckon",
            "reconcile",
            "--invoice",
            "-",
            "--hook",
            "post_ledger_generation",
            "--policy",
            "strict",
        ])
        .unwrap();
        let Commands::Reconcile(args) = cli.command else {
            panic!("expected reconcile");
        };
        assert_eq!(args.invoice, "-");
        assert_eq!(args.hook, Some(Hook::PostLedgerGeneration));
        assert_eq!(args.policy, Some(FailurePolicy::Strict));
        assert!(args.ledger.is_none());
    }

    #[test]
    fn test_parse_balance_args() {
        let cli = Cli::try_parse_from(["reckon", "balance", "--ledger", "gl.json", "--aggressive"])
            .unwrap();
        let Commands::Balance(args) = cli.command else {
            panic!("expected balance");
        };
        assert_eq!(args.ledger, "gl.json");
        assert!(args.aggressive);
    }

    #[test]
    fn test_exit_code_follows_app_error() {
        let err = anyhow::Error::from(AppError::Input("missing.json".into())).context("reading");
        assert_eq!(exit_code(&err), 66);
        assert_eq!(exit_code(&anyhow::anyhow!("unexpected")), 1);
    }

    #[test]
    fn test_unknown_hook_is_rejected() {
        assert!(
            Cli::try_parse_from(["reckon", "reconcile", "--invoice", "a.json", "--hook", "on-cancel"])
                .is_err()
        );
    }
}
