//! `greek-steps` library crate.
//!
//! The binary (`greeks`) is a thin wrapper around this library so that:
//!
//! - core logic is testable without spawning processes
//! - the numeric modules are reusable outside the CLI (notebook-style use)
//! - code stays easy to navigate as the project grows

pub mod app;
pub mod cli;
pub mod domain;
pub mod error;
pub mod io;
pub mod math;
pub mod plot;
pub mod report;
