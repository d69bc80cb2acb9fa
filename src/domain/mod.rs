//! Domain types used throughout the check.
//!
//! This module defines:
//!
//! - watchlist symbols (`Symbol`, `DEFAULT_WATCHLIST`)
//! - provider answers (`EarningsRecord`, `AvoidDecision`)
//! - run outputs (`Outcome`, `RunSummary`) and inputs (`CheckConfig`)

pub mod types;

pub use types::*;
