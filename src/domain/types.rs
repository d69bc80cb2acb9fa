//! Shared domain types.
//!
//! Everything here is plain data: the checker produces these values and the
//! report module renders them. Nothing in this module performs I/O.

use std::fmt;

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

/// Symbols checked when no watchlist is configured.
pub const DEFAULT_WATCHLIST: &[&str] = &[
    "AAPL", "MSFT", "NVDA", "GOOGL", "AMZN", "TSLA", "META", "AMD", "NFLX", "CRM", "SPY", "QQQ",
    "IWM", "XLF", "XLK",
];

/// Earnings closer than this many days (and not avoided) are flagged as caution.
pub const DEFAULT_CAUTION_DAYS: i64 = 7;

/// How many safe symbols the summary lists before eliding the rest.
pub const DEFAULT_SUMMARY_PREVIEW: usize = 10;

/// A ticker symbol. Identity is the string value itself.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Symbol(String);

impl Symbol {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Parse user input: trims whitespace and upper-cases. Empty input yields `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(Self(trimmed.to_ascii_uppercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The embedded default watchlist.
pub fn default_watchlist() -> Vec<Symbol> {
    DEFAULT_WATCHLIST.iter().map(|s| Symbol::new(*s)).collect()
}

/// Parse a comma/whitespace separated list of symbols, keeping order and duplicates.
pub fn parse_watchlist(raw: &str) -> Vec<Symbol> {
    raw.split(|c: char| c == ',' || c.is_whitespace())
        .filter_map(Symbol::parse)
        .collect()
}

/// A single known earnings announcement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EarningsRecord {
    pub symbol: Symbol,
    /// Announcement date; serialized as `YYYY-MM-DD`.
    pub date: NaiveDate,
    /// Session hint as reported upstream (`bmo`, `amc`, `dmh`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hour: Option<String>,
    #[serde(default, alias = "epsEstimate", skip_serializing_if = "Option::is_none")]
    pub eps_estimate: Option<f64>,
}

impl EarningsRecord {
    pub fn new(symbol: Symbol, date: NaiveDate) -> Self {
        Self {
            symbol,
            date,
            hour: None,
            eps_estimate: None,
        }
    }

    /// Whole calendar days from `as_of` to the announcement. Negative if already past.
    pub fn days_until(&self, as_of: NaiveDate) -> i64 {
        (self.date - as_of).num_days()
    }
}

/// Provider answer to "should this symbol be avoided right now?".
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AvoidDecision {
    pub avoid: bool,
    pub reason: Option<String>,
}

impl AvoidDecision {
    pub fn avoid(reason: impl Into<String>) -> Self {
        Self {
            avoid: true,
            reason: Some(reason.into()),
        }
    }

    pub fn clear() -> Self {
        Self::default()
    }
}

/// Final classification of one watchlist entry.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Avoid { reason: Option<String> },
    Caution { days: i64, date: NaiveDate },
    Safe,
    Error { message: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct SymbolReport {
    pub symbol: Symbol,
    pub outcome: Outcome,
}

/// Result of one pass over the watchlist.
///
/// `entries` keeps every symbol in watchlist order. `avoid` and `safe` are the
/// two accumulated lists the summary and exit code are derived from; caution
/// and error symbols appear only in `entries`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunSummary {
    pub entries: Vec<SymbolReport>,
    pub avoid: Vec<(Symbol, Option<String>)>,
    pub safe: Vec<Symbol>,
}

impl RunSummary {
    pub fn record(&mut self, symbol: Symbol, outcome: Outcome) {
        match &outcome {
            Outcome::Avoid { reason } => self.avoid.push((symbol.clone(), reason.clone())),
            Outcome::Safe => self.safe.push(symbol.clone()),
            Outcome::Caution { .. } | Outcome::Error { .. } => {}
        }
        self.entries.push(SymbolReport { symbol, outcome });
    }

    pub fn caution_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| matches!(e.outcome, Outcome::Caution { .. }))
            .count()
    }

    pub fn error_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| matches!(e.outcome, Outcome::Error { .. }))
            .count()
    }

    pub fn has_avoid(&self) -> bool {
        !self.avoid.is_empty()
    }

    pub fn exit_code(&self) -> u8 {
        if self.has_avoid() { 1 } else { 0 }
    }
}

/// Inputs for a watchlist check.
#[derive(Debug, Clone)]
pub struct CheckConfig {
    pub watchlist: Vec<Symbol>,
    /// Calendar date the day counts are measured from.
    pub as_of: NaiveDate,
    pub caution_days: i64,
    pub summary_preview: usize,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            watchlist: default_watchlist(),
            as_of: Local::now().date_naive(),
            caution_days: DEFAULT_CAUTION_DAYS,
            summary_preview: DEFAULT_SUMMARY_PREVIEW,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_watchlist_normalizes_and_keeps_duplicates() {
        let list = parse_watchlist(" aapl, msft  nvda,,AAPL ");
        let names: Vec<&str> = list.iter().map(Symbol::as_str).collect();
        assert_eq!(names, vec!["AAPL", "MSFT", "NVDA", "AAPL"]);
    }

    #[test]
    fn default_watchlist_matches_embedded_list() {
        let list = default_watchlist();
        assert_eq!(list.len(), 15);
        assert_eq!(list[0].as_str(), "AAPL");
        assert_eq!(list[14].as_str(), "XLK");
    }

    #[test]
    fn days_until_uses_calendar_dates() {
        let as_of = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
        let rec = EarningsRecord::new(Symbol::new("AAPL"), NaiveDate::from_ymd_opt(2026, 10, 23).unwrap());
        assert_eq!(rec.days_until(as_of), 7);
        let past = EarningsRecord::new(Symbol::new("AAPL"), NaiveDate::from_ymd_opt(2026, 10, 15).unwrap());
        assert_eq!(past.days_until(as_of), -1);
    }

    #[test]
    fn record_deserializes_snake_and_camel_eps() {
        let a: EarningsRecord =
            serde_json::from_str(r#"{"symbol":"AAPL","date":"2026-10-30","eps_estimate":1.5}"#).unwrap();
        let b: EarningsRecord =
            serde_json::from_str(r#"{"symbol":"AAPL","date":"2026-10-30","epsEstimate":1.5,"hour":"amc"}"#)
                .unwrap();
        assert_eq!(a.eps_estimate, Some(1.5));
        assert_eq!(b.eps_estimate, Some(1.5));
        assert_eq!(b.hour.as_deref(), Some("amc"));
        assert_eq!(a.date.to_string(), "2026-10-30");
    }

    #[test]
    fn summary_lists_only_hold_avoid_and_safe() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 20).unwrap();
        let mut summary = RunSummary::default();
        summary.record(Symbol::new("A"), Outcome::Avoid { reason: Some("x".into()) });
        summary.record(Symbol::new("B"), Outcome::Caution { days: 4, date });
        summary.record(Symbol::new("C"), Outcome::Safe);
        summary.record(Symbol::new("D"), Outcome::Error { message: "boom".into() });

        assert_eq!(summary.entries.len(), 4);
        assert_eq!(summary.avoid.len(), 1);
        assert_eq!(summary.safe, vec![Symbol::new("C")]);
        assert_eq!(summary.caution_count(), 1);
        assert_eq!(summary.error_count(), 1);
        assert_eq!(summary.exit_code(), 1);
    }
}
