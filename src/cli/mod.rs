//! Command-line parsing.
//!
//! Every flag is optional. With no arguments the tool checks the built-in
//! watchlist as of today and picks its provider from the environment.

use std::path::PathBuf;

use chrono::{Local, NaiveDate};
use clap::Parser;

use crate::domain::{CheckConfig, DEFAULT_CAUTION_DAYS, DEFAULT_SUMMARY_PREVIEW, default_watchlist, parse_watchlist};
use crate::provider::DEFAULT_AVOID_DAYS;

#[derive(Debug, Parser)]
#[command(
    name = "earnings-check",
    version,
    about = "Flag watchlist symbols with upcoming earnings announcements"
)]
pub struct Cli {
    /// Symbols to check, comma separated. Defaults to the built-in watchlist.
    #[arg(long, env = "WATCHLIST", value_name = "SYMBOLS")]
    pub symbols: Option<String>,

    /// Earnings calendar JSON file. When absent the Finnhub API is used.
    #[arg(long, env = "EARNINGS_CALENDAR_PATH", value_name = "JSON")]
    pub calendar: Option<PathBuf>,

    /// Date to count days from (YYYY-MM-DD). Defaults to today in local time.
    #[arg(long, value_name = "DATE")]
    pub as_of: Option<NaiveDate>,

    /// Avoid trading when earnings are at most this many days away.
    #[arg(long, env = "EARNINGS_AVOID_DAYS", default_value_t = DEFAULT_AVOID_DAYS)]
    pub avoid_days: i64,

    /// Flag earnings at most this many days away as caution.
    #[arg(long, default_value_t = DEFAULT_CAUTION_DAYS)]
    pub caution_days: i64,
}

impl Cli {
    pub fn check_config(&self) -> CheckConfig {
        let watchlist = match self.symbols.as_deref().map(parse_watchlist) {
            Some(list) if !list.is_empty() => list,
            _ => default_watchlist(),
        };
        CheckConfig {
            watchlist,
            as_of: self.as_of.unwrap_or_else(|| Local::now().date_naive()),
            caution_days: self.caution_days,
            summary_preview: DEFAULT_SUMMARY_PREVIEW,
        }
    }
}
