//! Command-line parsing for the Greek step-size error study.
//!
//! The goal of this module is to keep **argument parsing** and **command
//! dispatch** separate from the numeric/plotting code.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::Scenario;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "greeks",
    version,
    about = "Finite-difference vs complex-step Greek error study"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Read an error CSV, render the Delta/Gamma log-log plots, and print the
    /// summary table.
    Analyze(AnalyzeArgs),
    /// Compute the error table for a benchmark scenario and write it as CSV.
    Gen(GenArgs),
}

/// Options for `greeks analyze`.
#[derive(Debug, Parser, Clone)]
pub struct AnalyzeArgs {
    /// Input error CSV.
    #[arg(long, default_value = "data/bs_fd_vs_complex.csv")]
    pub csv: PathBuf,

    /// Output directory for the PNG plots (defaults to the CSV's directory).
    #[arg(long)]
    pub out_dir: Option<PathBuf>,

    /// Export the summary statistics as JSON.
    #[arg(long = "export-summary")]
    pub export_summary: Option<PathBuf>,
}

/// Options for `greeks gen`.
#[derive(Debug, Parser, Clone)]
pub struct GenArgs {
    /// Benchmark scenario (1 = ATM 20% vol 1y, 2 = ATM 1% vol 1d).
    #[arg(short, long, value_enum, default_value_t = Scenario::Atm1y)]
    pub scenario: Scenario,

    /// Output CSV path.
    #[arg(long, default_value = "data/bs_fd_vs_complex.csv")]
    pub out: PathBuf,

    /// Decimal exponent of the smallest relative step.
    #[arg(long, allow_negative_numbers = true, default_value_t = -16.0)]
    pub grid_min: f64,

    /// Decimal exponent of the largest relative step.
    #[arg(long, allow_negative_numbers = true, default_value_t = -4.0)]
    pub grid_max: f64,

    /// Number of grid points.
    #[arg(long, default_value_t = 24)]
    pub grid_points: usize,
}
