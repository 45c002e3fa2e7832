//! Exports: the generated error-table CSV and the summary-stats JSON.
//!
//! The CSV is meant to round-trip through `greeks analyze` (or the original
//! plotting scripts), so the header and the scientific formatting mirror the
//! upstream benchmark output.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::domain::StepRecord;
use crate::error::AppError;
use crate::report::SeriesSummary;

/// Header of the generated error table (14 columns, one row per step).
pub const ERROR_CSV_HEADER: &str = "h_rel,h,Delta_analytic,Delta_fd,Delta_cs,\
err_D_fd,err_D_cs,Gamma_analytic,Gamma_fd,Gamma_cs_real,Gamma_cs_45,\
err_G_fd,err_G_cs_real,err_G_cs_45";

/// Write the per-step error table to a CSV file.
pub fn write_error_csv(path: &Path, records: &[StepRecord]) -> Result<(), AppError> {
    let mut file = File::create(path).map_err(|e| {
        AppError::input(format!("Failed to create CSV '{}': {e}", path.display()))
    })?;

    writeln!(file, "{ERROR_CSV_HEADER}")
        .map_err(|e| AppError::input(format!("Failed to write CSV header: {e}")))?;

    for r in records {
        writeln!(
            file,
            "{:.12e},{:.12e},{:.12e},{:.12e},{:.12e},{:.12e},{:.12e},{:.12e},{:.12e},{:.12e},{:.12e},{:.12e},{:.12e},{:.12e}",
            r.h_rel,
            r.h,
            r.delta_analytic,
            r.delta_fd,
            r.delta_cs,
            r.err_d_fd,
            r.err_d_cs,
            r.gamma_analytic,
            r.gamma_fd,
            r.gamma_cs_real,
            r.gamma_cs_45,
            r.err_g_fd,
            r.err_g_cs_real,
            r.err_g_cs_45,
        )
        .map_err(|e| AppError::input(format!("Failed to write CSV row: {e}")))?;
    }

    Ok(())
}

/// Write the summary statistics as JSON (one object per error series).
pub fn write_summary_json(path: &Path, summaries: &[SeriesSummary]) -> Result<(), AppError> {
    let json = serde_json::to_string_pretty(summaries)
        .map_err(|e| AppError::input(format!("Failed to serialize summary: {e}")))?;

    std::fs::write(path, json).map_err(|e| {
        AppError::input(format!("Failed to write summary JSON '{}': {e}", path.display()))
    })
}
