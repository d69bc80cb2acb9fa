//! Watchlist classification pass.
//!
//! Walks the watchlist in order and asks the provider about each symbol.
//! Nothing here prints; the result is a `RunSummary` for `report` to render.

use crate::domain::{CheckConfig, Outcome, RunSummary, Symbol};
use crate::error::ProviderError;
use crate::provider::EarningsProvider;

/// Outcome of a whole run, before it becomes a process exit code.
#[derive(Debug, Clone, PartialEq)]
pub enum CheckRun {
    /// The provider could not be constructed; no symbol was looked at.
    ProviderFailed { message: String },
    Completed { summary: RunSummary, avoid_window_days: i64 },
}

impl CheckRun {
    pub fn exit_code(&self) -> u8 {
        match self {
            CheckRun::ProviderFailed { .. } => 1,
            CheckRun::Completed { summary, .. } => summary.exit_code(),
        }
    }
}

/// Build the provider with `build`, then classify every watchlist symbol.
pub fn run_check<P, F>(build: F, config: &CheckConfig) -> CheckRun
where
    P: EarningsProvider,
    F: FnOnce() -> Result<P, ProviderError>,
{
    let provider = match build() {
        Ok(p) => p,
        Err(e) => {
            tracing::error!(error = %e, "earnings provider initialization failed");
            return CheckRun::ProviderFailed {
                message: e.to_string(),
            };
        }
    };

    CheckRun::Completed {
        summary: check_watchlist(&provider, config),
        avoid_window_days: provider.avoid_window_days(),
    }
}

/// Classify every symbol in `config.watchlist`. Lookup errors are isolated per symbol.
pub fn check_watchlist<P: EarningsProvider + ?Sized>(provider: &P, config: &CheckConfig) -> RunSummary {
    let mut summary = RunSummary::default();

    for symbol in &config.watchlist {
        let outcome = match classify(provider, symbol, config) {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::warn!(%symbol, error = %e, "earnings lookup failed");
                Outcome::Error {
                    message: e.to_string(),
                }
            }
        };
        tracing::debug!(%symbol, ?outcome, "classified");
        summary.record(symbol.clone(), outcome);
    }

    tracing::info!(
        symbols = config.watchlist.len(),
        avoid = summary.avoid.len(),
        safe = summary.safe.len(),
        caution = summary.caution_count(),
        errors = summary.error_count(),
        "watchlist check finished"
    );

    summary
}

fn classify<P: EarningsProvider + ?Sized>(
    provider: &P,
    symbol: &Symbol,
    config: &CheckConfig,
) -> Result<Outcome, ProviderError> {
    let decision = provider.should_avoid_trading(symbol)?;
    if decision.avoid {
        return Ok(Outcome::Avoid {
            reason: decision.reason,
        });
    }

    let Some(record) = provider.check_symbol(symbol)? else {
        return Ok(Outcome::Safe);
    };

    let days = record.days_until(config.as_of);
    if days > config.caution_days {
        Ok(Outcome::Safe)
    } else {
        Ok(Outcome::Caution {
            days,
            date: record.date,
        })
    }
}
