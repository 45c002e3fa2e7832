//! Summary statistics over the error series and their terminal report.
//!
//! Formatting lives in `format`; this module owns the numbers so the math
//! stays testable without string comparisons.

pub mod format;

pub use format::*;

use serde::Serialize;

use crate::domain::{ErrorSeries, ErrorTable, SeriesStats};

/// One row of the error summary. `stats` is `None` when the series has no
/// finite values at all (the report then shows a placeholder).
#[derive(Debug, Clone, Serialize)]
pub struct SeriesSummary {
    /// Display label, e.g. "Δ FD".
    pub series: &'static str,
    /// Source CSV column, e.g. "err_D_fd".
    pub column: &'static str,
    pub stats: Option<SeriesStats>,
}

/// Min/median/max over the finite entries of a series.
///
/// The median of an even count is the mean of the two middle values.
pub fn summarize_finite(values: &[f64]) -> Option<SeriesStats> {
    let mut finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if finite.is_empty() {
        return None;
    }

    finite.sort_by(f64::total_cmp);
    let n = finite.len();
    let median = if n % 2 == 1 {
        finite[n / 2]
    } else {
        0.5 * (finite[n / 2 - 1] + finite[n / 2])
    };

    Some(SeriesStats {
        n,
        min: finite[0],
        median,
        max: finite[n - 1],
    })
}

/// Summarize the five error series in report order.
pub fn summarize_table(table: &ErrorTable) -> Vec<SeriesSummary> {
    ErrorSeries::ALL
        .iter()
        .map(|&series| SeriesSummary {
            series: series.display_name(),
            column: series.column(),
            stats: table
                .column(series.column())
                .and_then(summarize_finite),
        })
        .collect()
}
