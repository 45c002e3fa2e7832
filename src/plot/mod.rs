//! Log-log error charts (PNG via Plotters).
//!
//! Data prep is kept separate from rendering so the masking rules are
//! testable without drawing anything.

pub mod png;

pub use png::*;

/// Marker drawn at each data point of a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    Circle,
    Cross,
    Triangle,
}

/// A named series prepared for plotting (already masked).
#[derive(Debug, Clone)]
pub struct PlotSeries {
    pub label: String,
    pub marker: Marker,
    pub points: Vec<(f64, f64)>,
}

impl PlotSeries {
    pub fn new(label: impl Into<String>, marker: Marker, points: Vec<(f64, f64)>) -> Self {
        Self {
            label: label.into(),
            marker,
            points,
        }
    }
}

/// Pair `x` with `y`, keeping only points drawable on log-log axes: both
/// coordinates finite and strictly positive (a log axis cannot place zero or
/// negative values).
///
/// Masking is per series: one series' missing entries never suppress another
/// series' points.
pub fn mask_loglog_pairs(x: &[f64], y: &[f64]) -> Vec<(f64, f64)> {
    x.iter()
        .zip(y)
        .map(|(&xv, &yv)| (xv, yv))
        .filter(|&(xv, yv)| xv.is_finite() && yv.is_finite() && xv > 0.0 && yv > 0.0)
        .collect()
}
