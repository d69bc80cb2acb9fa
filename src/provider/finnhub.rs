//! Finnhub earnings-calendar API integration.

use std::cell::RefCell;
use std::collections::HashMap;
use std::time::Duration;

use chrono::NaiveDate;
use reqwest::blocking::Client;
use serde::Deserialize;

use crate::domain::{AvoidDecision, EarningsRecord, Symbol};
use crate::error::ProviderError;
use crate::provider::{AvoidWindow, EarningsProvider, next_upcoming};

const DEFAULT_BASE_URL: &str = "https://finnhub.io/api/v1";
const CALENDAR_PATH: &str = "/calendar/earnings";
const DEFAULT_LOOKAHEAD_DAYS: i64 = 90;
const MAX_LOOKAHEAD_DAYS: i64 = 730;
const DEFAULT_TIMEOUT_SECS: u64 = 30;

pub struct FinnhubProvider {
    client: Client,
    base_url: String,
    api_key: String,
    as_of: NaiveDate,
    lookahead_days: i64,
    window: AvoidWindow,
    // One request per symbol per run; both trait calls read from here.
    cache: RefCell<HashMap<Symbol, Option<EarningsRecord>>>,
}

impl FinnhubProvider {
    /// Build from `FINNHUB_API_KEY` (required), `FINNHUB_BASE_URL`,
    /// `EARNINGS_LOOKAHEAD_DAYS` and `EARNINGS_TIMEOUT_SECS`.
    pub fn from_env(as_of: NaiveDate, window: AvoidWindow) -> Result<Self, ProviderError> {
        Self::from_vars(as_of, window, |key| std::env::var(key).ok())
    }

    /// Same as `from_env`, reading settings through `var`.
    pub fn from_vars<F>(as_of: NaiveDate, window: AvoidWindow, var: F) -> Result<Self, ProviderError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = var("FINNHUB_API_KEY")
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| ProviderError::MissingConfig("FINNHUB_API_KEY is not set (.env)".to_string()))?;

        let base_url = var("FINNHUB_BASE_URL")
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let lookahead_days = parse_lookahead(var("EARNINGS_LOOKAHEAD_DAYS"))?;

        let timeout_secs = var("EARNINGS_TIMEOUT_SECS")
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        Self::new(base_url, api_key, as_of, window, lookahead_days, Duration::from_secs(timeout_secs))
    }

    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        as_of: NaiveDate,
        window: AvoidWindow,
        lookahead_days: i64,
        timeout: Duration,
    ) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ProviderError::Http(format!("failed to build http client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            api_key: api_key.into(),
            as_of,
            lookahead_days,
            window,
            cache: RefCell::new(HashMap::new()),
        })
    }

    fn url(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), CALENDAR_PATH)
    }

    fn query_window(&self) -> Result<(NaiveDate, NaiveDate), ProviderError> {
        let to = chrono::TimeDelta::try_days(self.lookahead_days)
            .and_then(|delta| self.as_of.checked_add_signed(delta))
            .ok_or_else(|| {
                ProviderError::InvalidDate(format!("{} + {} days", self.as_of, self.lookahead_days))
            })?;
        Ok((self.as_of, to))
    }

    fn fetch_calendar(&self, symbol: &Symbol) -> Result<Vec<EarningsRecord>, ProviderError> {
        let (from, to) = self.query_window()?;
        tracing::debug!(%symbol, %from, %to, "requesting finnhub earnings calendar");

        let resp = self
            .client
            .get(self.url())
            .query(&[
                ("symbol", symbol.as_str()),
                ("from", &from.to_string()),
                ("to", &to.to_string()),
                ("token", &self.api_key),
            ])
            .send()
            .map_err(|e| ProviderError::Http(e.without_url().to_string()))?;

        if !resp.status().is_success() {
            return Err(ProviderError::Status(resp.status().as_u16()));
        }

        let body: CalendarResponse = resp
            .json()
            .map_err(|e| ProviderError::Decode(e.without_url().to_string()))?;

        body.into_records()
    }

    fn lookup(&self, symbol: &Symbol) -> Result<Option<EarningsRecord>, ProviderError> {
        if let Some(hit) = self.cache.borrow().get(symbol) {
            return Ok(hit.clone());
        }
        let records = self.fetch_calendar(symbol)?;
        let next = next_upcoming(&records, symbol, self.as_of);
        self.cache.borrow_mut().insert(symbol.clone(), next.clone());
        Ok(next)
    }
}

impl EarningsProvider for FinnhubProvider {
    fn should_avoid_trading(&self, symbol: &Symbol) -> Result<AvoidDecision, ProviderError> {
        let next = self.lookup(symbol)?;
        Ok(self.window.decide(next.as_ref(), self.as_of))
    }

    fn check_symbol(&self, symbol: &Symbol) -> Result<Option<EarningsRecord>, ProviderError> {
        self.lookup(symbol)
    }

    fn avoid_window_days(&self) -> i64 {
        self.window.days
    }
}

/// Unset or unparsable falls back to the default; out-of-range values are rejected.
fn parse_lookahead(raw: Option<String>) -> Result<i64, ProviderError> {
    let Some(days) = raw.and_then(|s| s.trim().parse::<i64>().ok()) else {
        return Ok(DEFAULT_LOOKAHEAD_DAYS);
    };
    if !(0..=MAX_LOOKAHEAD_DAYS).contains(&days) {
        return Err(ProviderError::MissingConfig(format!(
            "EARNINGS_LOOKAHEAD_DAYS must be between 0 and {MAX_LOOKAHEAD_DAYS}, got {days}"
        )));
    }
    Ok(days)
}

#[derive(Debug, Deserialize)]
struct CalendarResponse {
    #[serde(rename = "earningsCalendar", default)]
    earnings_calendar: Vec<CalendarEntry>,
}

#[derive(Debug, Deserialize)]
struct CalendarEntry {
    symbol: String,
    date: String,
    #[serde(default)]
    hour: Option<String>,
    #[serde(rename = "epsEstimate", default)]
    eps_estimate: Option<f64>,
}

impl CalendarResponse {
    fn into_records(self) -> Result<Vec<EarningsRecord>, ProviderError> {
        let mut out = Vec::with_capacity(self.earnings_calendar.len());
        for entry in self.earnings_calendar {
            let date = NaiveDate::parse_from_str(entry.date.trim(), "%Y-%m-%d")
                .map_err(|_| ProviderError::InvalidDate(entry.date.clone()))?;
            // Finnhub sends "" when the session is unknown.
            let hour = entry.hour.filter(|h| !h.trim().is_empty());
            out.push(EarningsRecord {
                symbol: Symbol::new(entry.symbol),
                date,
                hour,
                eps_estimate: entry.eps_estimate,
            });
        }
        Ok(out)
    }
}
