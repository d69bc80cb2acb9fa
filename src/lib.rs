//! `earnings-guard` library crate.
//!
//! The binary (`earnings-check`) is a thin wrapper around this library so that
//! the classification pass is testable without spawning processes or
//! capturing stdout.

pub mod app;
pub mod checker;
pub mod cli;
pub mod domain;
pub mod error;
pub mod provider;
pub mod report;
