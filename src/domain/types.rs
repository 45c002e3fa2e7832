//! Shared domain types.
//!
//! These types are intentionally kept lightweight so they can be:
//!
//! - used in-memory by the analyze/gen pipelines
//! - exported to CSV/JSON
//! - constructed directly in tests

use std::collections::HashMap;
use std::path::PathBuf;

use clap::ValueEnum;
use serde::Serialize;

/// Market inputs for a European call under Black–Scholes with a continuous
/// dividend yield.
#[derive(Debug, Clone, Copy)]
pub struct MarketParams {
    pub spot: f64,
    pub strike: f64,
    pub rate: f64,
    pub dividend: f64,
    pub vol: f64,
    /// Time to expiry in years.
    pub expiry: f64,
}

/// Benchmark scenario: a fixed market parameter set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Scenario {
    /// At-the-money, 20% vol, one year to expiry.
    #[value(name = "1")]
    Atm1y,
    /// At-the-money, 1% vol, one day to expiry (stress case: tiny gamma
    /// denominators amplify subtractive cancellation).
    #[value(name = "2")]
    LowVol1d,
}

impl Scenario {
    pub fn params(self) -> MarketParams {
        match self {
            Scenario::Atm1y => MarketParams {
                spot: 100.0,
                strike: 100.0,
                rate: 0.0,
                dividend: 0.0,
                vol: 0.20,
                expiry: 1.0,
            },
            Scenario::LowVol1d => MarketParams {
                spot: 100.0,
                strike: 100.0,
                rate: 0.0,
                dividend: 0.0,
                vol: 0.01,
                expiry: 1.0 / 365.0,
            },
        }
    }

    /// Human-readable label for terminal output.
    pub fn display_name(self) -> &'static str {
        match self {
            Scenario::Atm1y => "Scenario 1 (ATM, 20% vol, 1y)",
            Scenario::LowVol1d => "Scenario 2 (ATM, 1% vol, 1d)",
        }
    }
}

// clap renders default_value_t through Display; keep it in sync with the
// `#[value(name = ...)]` spellings.
impl std::fmt::Display for Scenario {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Scenario::Atm1y => write!(f, "1"),
            Scenario::LowVol1d => write!(f, "2"),
        }
    }
}

/// The five error series the study compares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeries {
    DeltaFd,
    DeltaCs,
    GammaFd,
    GammaCsReal,
    GammaCs45,
}

impl ErrorSeries {
    /// Report/plot ordering.
    pub const ALL: [ErrorSeries; 5] = [
        ErrorSeries::DeltaFd,
        ErrorSeries::DeltaCs,
        ErrorSeries::GammaFd,
        ErrorSeries::GammaCsReal,
        ErrorSeries::GammaCs45,
    ];

    /// CSV column holding this series.
    pub fn column(self) -> &'static str {
        match self {
            ErrorSeries::DeltaFd => "err_D_fd",
            ErrorSeries::DeltaCs => "err_D_cs",
            ErrorSeries::GammaFd => "err_G_fd",
            ErrorSeries::GammaCsReal => "err_G_cs_real",
            ErrorSeries::GammaCs45 => "err_G_cs_45",
        }
    }

    /// Legend/report label.
    pub fn display_name(self) -> &'static str {
        match self {
            ErrorSeries::DeltaFd => "Δ FD",
            ErrorSeries::DeltaCs => "Δ CS",
            ErrorSeries::GammaFd => "Γ FD",
            ErrorSeries::GammaCsReal => "Γ CS-real",
            ErrorSeries::GammaCs45 => "Γ CS-45°",
        }
    }
}

/// Column-oriented numeric table keyed by header name.
///
/// Missing or unparsable cells are stored as `f64::NAN`; every column has
/// exactly `n_rows` entries. The table is built once by ingest and never
/// mutated afterwards.
#[derive(Debug, Clone)]
pub struct ErrorTable {
    pub headers: Vec<String>,
    pub columns: HashMap<String, Vec<f64>>,
    pub n_rows: usize,
}

impl ErrorTable {
    pub fn column(&self, name: &str) -> Option<&[f64]> {
        self.columns.get(name).map(Vec::as_slice)
    }
}

/// One evaluated grid step: Greeks at step `h = h_rel * spot` plus absolute
/// errors against the analytic values.
#[derive(Debug, Clone, Copy)]
pub struct StepRecord {
    pub h_rel: f64,
    pub h: f64,

    pub delta_analytic: f64,
    pub delta_fd: f64,
    pub delta_cs: f64,
    pub err_d_fd: f64,
    pub err_d_cs: f64,

    pub gamma_analytic: f64,
    pub gamma_fd: f64,
    pub gamma_cs_real: f64,
    pub gamma_cs_45: f64,
    pub err_g_fd: f64,
    pub err_g_cs_real: f64,
    pub err_g_cs_45: f64,
}

/// Min/median/max over the finite values of one error series.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct SeriesStats {
    /// Number of finite observations.
    pub n: usize,
    pub min: f64,
    pub median: f64,
    pub max: f64,
}

/// Configuration for `greeks analyze`.
#[derive(Debug, Clone)]
pub struct AnalyzeConfig {
    pub csv_path: PathBuf,
    /// Directory for the PNG outputs; defaults to the CSV's directory.
    pub out_dir: Option<PathBuf>,
    /// Optional JSON export of the summary statistics.
    pub export_summary: Option<PathBuf>,
}

impl AnalyzeConfig {
    pub fn out_dir(&self) -> PathBuf {
        match &self.out_dir {
            Some(dir) => dir.clone(),
            None => match self.csv_path.parent() {
                Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
                _ => PathBuf::from("."),
            },
        }
    }

    pub fn delta_plot_path(&self) -> PathBuf {
        self.out_dir().join("delta_plot.png")
    }

    pub fn gamma_plot_path(&self) -> PathBuf {
        self.out_dir().join("gamma_plot.png")
    }
}

/// Configuration for `greeks gen`.
#[derive(Debug, Clone)]
pub struct GenConfig {
    pub scenario: Scenario,
    pub out_path: PathBuf,
    /// Decimal exponent of the smallest relative step (default -16).
    pub grid_min_exp: f64,
    /// Decimal exponent of the largest relative step (default -4).
    pub grid_max_exp: f64,
    pub grid_points: usize,
}
