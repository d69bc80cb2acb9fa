//! Terminal formatting for a watchlist run.
//!
//! Formatting lives in one place so the classification code stays free of
//! I/O and output changes stay localized.

use crate::checker::CheckRun;
use crate::domain::{Outcome, RunSummary, Symbol, SymbolReport};

pub const HEADER: &str = "=== Watchlist Earnings Check ===";

/// Render a full run: per-symbol lines followed by the summary block.
pub fn format_run(run: &CheckRun, preview: usize) -> String {
    match run {
        CheckRun::ProviderFailed { message } => format_provider_failure(message),
        CheckRun::Completed {
            summary,
            avoid_window_days,
        } => {
            let mut out = String::new();
            out.push_str(HEADER);
            out.push_str("\n\n");
            out.push_str(&format_entries(summary));
            out.push_str(&format_summary(summary, *avoid_window_days, preview));
            out
        }
    }
}

pub fn format_provider_failure(message: &str) -> String {
    format!("Error initializing earnings calendar: {message}")
}

/// One line per symbol that needs attention. Safe symbols are only listed in the summary.
pub fn format_entries(summary: &RunSummary) -> String {
    let mut out = String::new();
    for entry in &summary.entries {
        if let Some(line) = format_entry(entry) {
            out.push_str(&line);
            out.push('\n');
        }
    }
    out
}

pub fn format_entry(entry: &SymbolReport) -> Option<String> {
    let symbol = &entry.symbol;
    match &entry.outcome {
        Outcome::Avoid { reason } => Some(format!(
            "🔴 {symbol}: {}",
            reason.as_deref().unwrap_or("avoid trading")
        )),
        Outcome::Caution { days, date } => Some(format!("🟡 {symbol}: Earnings in {days} days ({date})")),
        Outcome::Error { message } => Some(format!("⚠️ {symbol}: Error checking - {message}")),
        Outcome::Safe => None,
    }
}

pub fn format_summary(summary: &RunSummary, avoid_window_days: i64, preview: usize) -> String {
    let mut out = String::new();

    out.push_str("\n=== Summary ===\n");
    out.push_str(&format!(
        "Safe to trade ({}): {}\n",
        summary.safe.len(),
        preview_list(&summary.safe, preview)
    ));
    let avoid: Vec<&str> = summary.avoid.iter().map(|(s, _)| s.as_str()).collect();
    out.push_str(&format!("Avoid ({}): {}\n", avoid.len(), avoid.join(", ")));

    if summary.has_avoid() {
        out.push_str(&format!(
            "\n⚠️ {} symbols have earnings within {avoid_window_days} days — AVOID THESE\n",
            summary.avoid.len()
        ));
    } else {
        out.push_str(&format!(
            "\n✅ All clear — no earnings within {avoid_window_days} days\n"
        ));
    }

    out
}

fn preview_list(symbols: &[Symbol], max: usize) -> String {
    let shown: Vec<&str> = symbols.iter().take(max).map(Symbol::as_str).collect();
    let mut out = shown.join(", ");
    if symbols.len() > max {
        out.push_str("...");
    }
    out
}
