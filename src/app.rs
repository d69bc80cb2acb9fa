//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads `.env` and initializes logging
//! - parses CLI arguments
//! - builds the earnings provider
//! - runs the watchlist check and prints the report

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::checker::{CheckRun, run_check};
use crate::cli::Cli;
use crate::error::{AppError, ProviderError};
use crate::provider::{AvoidWindow, CalendarProvider, EarningsProvider, FinnhubProvider};

/// Entry point for the `earnings-check` binary. Returns the process exit code.
pub fn run() -> Result<u8, AppError> {
    dotenvy::dotenv().ok();
    init_logging();

    let cli = Cli::parse();
    let config = cli.check_config();
    tracing::info!(
        symbols = config.watchlist.len(),
        as_of = %config.as_of,
        "starting watchlist earnings check"
    );

    let run = run_check(
        || build_provider(&cli, config.as_of, |key| std::env::var(key).ok()),
        &config,
    );

    match &run {
        CheckRun::ProviderFailed { message } => Err(AppError::new(
            run.exit_code(),
            crate::report::format_provider_failure(message),
        )),
        CheckRun::Completed { .. } => {
            print!("{}", crate::report::format_run(&run, config.summary_preview));
            Ok(run.exit_code())
        }
    }
}

/// A calendar file wins over the HTTP API when both are configured.
fn build_provider<F>(cli: &Cli, as_of: chrono::NaiveDate, var: F) -> Result<Box<dyn EarningsProvider>, ProviderError>
where
    F: Fn(&str) -> Option<String>,
{
    let window = AvoidWindow::new(cli.avoid_days);
    match &cli.calendar {
        Some(path) => {
            tracing::debug!(path = %path.display(), "using calendar file provider");
            Ok(Box::new(CalendarProvider::from_path(path, as_of, window)?))
        }
        None => {
            tracing::debug!("using finnhub provider");
            Ok(Box::new(FinnhubProvider::from_vars(as_of, window, var)?))
        }
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    // stdout carries the report; logs go to stderr.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
