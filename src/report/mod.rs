//! Reporting: render a watchlist run as human-readable text.

pub mod format;

pub use format::*;
