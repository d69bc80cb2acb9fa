//! Earnings providers.
//!
//! A provider answers two questions per symbol: should it be avoided today,
//! and when is its next known earnings announcement. The checker never talks
//! to a data source directly; it only sees this trait.
//!
//! - `calendar`: calendar loaded from a local JSON file
//! - `finnhub`: Finnhub earnings-calendar HTTP API

use chrono::NaiveDate;

use crate::domain::{AvoidDecision, EarningsRecord, Symbol};
use crate::error::ProviderError;

pub mod calendar;
pub mod finnhub;

pub use calendar::CalendarProvider;
pub use finnhub::FinnhubProvider;

/// Default number of days before earnings during which trading is avoided.
pub const DEFAULT_AVOID_DAYS: i64 = 2;

pub trait EarningsProvider {
    fn should_avoid_trading(&self, symbol: &Symbol) -> Result<AvoidDecision, ProviderError>;

    /// Next known earnings announcement on or after the provider's as-of date.
    fn check_symbol(&self, symbol: &Symbol) -> Result<Option<EarningsRecord>, ProviderError>;

    fn avoid_window_days(&self) -> i64 {
        DEFAULT_AVOID_DAYS
    }
}

impl<P: EarningsProvider + ?Sized> EarningsProvider for Box<P> {
    fn should_avoid_trading(&self, symbol: &Symbol) -> Result<AvoidDecision, ProviderError> {
        (**self).should_avoid_trading(symbol)
    }

    fn check_symbol(&self, symbol: &Symbol) -> Result<Option<EarningsRecord>, ProviderError> {
        (**self).check_symbol(symbol)
    }

    fn avoid_window_days(&self) -> i64 {
        (**self).avoid_window_days()
    }
}

/// The "too close to earnings" rule shared by the concrete providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AvoidWindow {
    pub days: i64,
}

impl Default for AvoidWindow {
    fn default() -> Self {
        Self {
            days: DEFAULT_AVOID_DAYS,
        }
    }
}

impl AvoidWindow {
    pub fn new(days: i64) -> Self {
        Self { days: days.max(0) }
    }

    /// Avoid when the next announcement falls within `0..=days` calendar days of `as_of`.
    pub fn decide(&self, next: Option<&EarningsRecord>, as_of: NaiveDate) -> AvoidDecision {
        let Some(record) = next else {
            return AvoidDecision::clear();
        };
        let days = record.days_until(as_of);
        if !(0..=self.days).contains(&days) {
            return AvoidDecision::clear();
        }
        let reason = match days {
            0 => format!("Earnings today ({})", record.date),
            1 => format!("Earnings tomorrow ({})", record.date),
            n => format!("Earnings in {n} days ({})", record.date),
        };
        AvoidDecision::avoid(reason)
    }
}

/// Pick the earliest record for `symbol` dated on or after `as_of`.
pub(crate) fn next_upcoming<'a, I>(records: I, symbol: &Symbol, as_of: NaiveDate) -> Option<EarningsRecord>
where
    I: IntoIterator<Item = &'a EarningsRecord>,
{
    records
        .into_iter()
        .filter(|r| r.symbol.as_str().eq_ignore_ascii_case(symbol.as_str()))
        .filter(|r| r.date >= as_of)
        .min_by_key(|r| r.date)
        .cloned()
}
