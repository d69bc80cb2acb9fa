//! Earnings calendar loaded from a local JSON file.
//!
//! Accepted shapes:
//!
//! ```text
//! [ { "symbol": "AAPL", "date": "2026-10-29", "hour": "amc" }, ... ]
//! { "earnings": [ ... ] }
//! ```

use std::fs::File;
use std::path::Path;

use chrono::NaiveDate;
use serde::Deserialize;

use crate::domain::{AvoidDecision, EarningsRecord, Symbol};
use crate::error::ProviderError;
use crate::provider::{AvoidWindow, EarningsProvider, next_upcoming};

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CalendarDocument {
    List(Vec<EarningsRecord>),
    Wrapped { earnings: Vec<EarningsRecord> },
}

impl CalendarDocument {
    fn into_records(self) -> Vec<EarningsRecord> {
        match self {
            CalendarDocument::List(records) => records,
            CalendarDocument::Wrapped { earnings } => earnings,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CalendarProvider {
    records: Vec<EarningsRecord>,
    as_of: NaiveDate,
    window: AvoidWindow,
}

impl CalendarProvider {
    pub fn from_records(records: Vec<EarningsRecord>, as_of: NaiveDate, window: AvoidWindow) -> Self {
        Self {
            records,
            as_of,
            window,
        }
    }

    pub fn from_path(path: &Path, as_of: NaiveDate, window: AvoidWindow) -> Result<Self, ProviderError> {
        let file = File::open(path).map_err(|e| {
            ProviderError::Calendar(format!("failed to open '{}': {e}", path.display()))
        })?;
        let doc: CalendarDocument = serde_json::from_reader(file).map_err(|e| {
            ProviderError::Calendar(format!("invalid calendar JSON '{}': {e}", path.display()))
        })?;
        let provider = Self::from_records(doc.into_records(), as_of, window);
        if provider.is_empty() {
            tracing::warn!(path = %path.display(), "earnings calendar has no records");
        }
        tracing::debug!(path = %path.display(), records = provider.len(), "loaded earnings calendar");
        Ok(provider)
    }

    pub fn from_json_str(raw: &str, as_of: NaiveDate, window: AvoidWindow) -> Result<Self, ProviderError> {
        let doc: CalendarDocument = serde_json::from_str(raw)
            .map_err(|e| ProviderError::Calendar(format!("invalid calendar JSON: {e}")))?;
        Ok(Self::from_records(doc.into_records(), as_of, window))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl EarningsProvider for CalendarProvider {
    fn should_avoid_trading(&self, symbol: &Symbol) -> Result<AvoidDecision, ProviderError> {
        let next = self.check_symbol(symbol)?;
        Ok(self.window.decide(next.as_ref(), self.as_of))
    }

    fn check_symbol(&self, symbol: &Symbol) -> Result<Option<EarningsRecord>, ProviderError> {
        Ok(next_upcoming(&self.records, symbol, self.as_of))
    }

    fn avoid_window_days(&self) -> i64 {
        self.window.days
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn as_of() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
    }

    #[test]
    fn parses_plain_list() {
        let raw = r#"[
            {"symbol": "AAPL", "date": "2026-10-17", "hour": "amc"},
            {"symbol": "MSFT", "date": "2026-10-21"}
        ]"#;
        let cal = CalendarProvider::from_json_str(raw, as_of(), AvoidWindow::default()).unwrap();
        assert_eq!(cal.len(), 2);

        let aapl = cal.should_avoid_trading(&Symbol::new("AAPL")).unwrap();
        assert!(aapl.avoid);
        assert_eq!(aapl.reason.as_deref(), Some("Earnings tomorrow (2026-10-17)"));

        let msft = cal.should_avoid_trading(&Symbol::new("MSFT")).unwrap();
        assert!(!msft.avoid);
        let rec = cal.check_symbol(&Symbol::new("MSFT")).unwrap().unwrap();
        assert_eq!(rec.date.to_string(), "2026-10-21");
    }

    #[test]
    fn parses_wrapped_document_and_matches_case_insensitively() {
        let raw = r#"{"earnings": [{"symbol": "nvda", "date": "2026-11-18", "epsEstimate": 0.9}]}"#;
        let cal = CalendarProvider::from_json_str(raw, as_of(), AvoidWindow::default()).unwrap();
        let rec = cal.check_symbol(&Symbol::new("NVDA")).unwrap().unwrap();
        assert_eq!(rec.eps_estimate, Some(0.9));
        assert!(cal.check_symbol(&Symbol::new("AMD")).unwrap().is_none());
    }

    #[test]
    fn rejects_malformed_input() {
        let err = CalendarProvider::from_json_str(r#"{"earnings": "soon"}"#, as_of(), AvoidWindow::default())
            .unwrap_err();
        assert!(matches!(err, ProviderError::Calendar(_)));

        let bad_date = r#"[{"symbol": "AAPL", "date": "10/17/2026"}]"#;
        assert!(CalendarProvider::from_json_str(bad_date, as_of(), AvoidWindow::default()).is_err());
    }

    #[test]
    fn missing_file_is_a_construction_error() {
        let err = CalendarProvider::from_path(
            Path::new("definitely/not/here/calendar.json"),
            as_of(),
            AvoidWindow::default(),
        )
        .unwrap_err();
        assert!(err.to_string().contains("failed to open"));
    }

    #[test]
    fn custom_window_is_reported() {
        let cal = CalendarProvider::from_records(Vec::new(), as_of(), AvoidWindow::new(4));
        assert_eq!(cal.avoid_window_days(), 4);
        assert!(cal.is_empty());
    }

    #[test]
    fn loads_file_and_reports_record_count() {
        let dir = std::env::temp_dir();
        let full = dir.join(format!("earnings-guard-{}-full.json", std::process::id()));
        let empty = dir.join(format!("earnings-guard-{}-empty.json", std::process::id()));
        std::fs::write(&full, r#"{"earnings": [{"symbol": "AAPL", "date": "2026-10-29"}]}"#).unwrap();
        std::fs::write(&empty, "[]").unwrap();

        let loaded = CalendarProvider::from_path(&full, as_of(), AvoidWindow::default());
        let blank = CalendarProvider::from_path(&empty, as_of(), AvoidWindow::default());
        std::fs::remove_file(&full).ok();
        std::fs::remove_file(&empty).ok();

        assert_eq!(loaded.unwrap().len(), 1);
        let blank = blank.unwrap();
        assert!(blank.is_empty());
        assert!(blank.check_symbol(&Symbol::new("AAPL")).unwrap().is_none());
    }
}
