//! Shared pipeline logic behind the `analyze` and `gen` subcommands.
//!
//! Keeping this in one place separates the computed outputs from their
//! presentation: the app layer owns printing and file side-effects, the
//! pipeline owns load -> mask -> summarize (and grid -> evaluate for `gen`).

use log::warn;

use crate::domain::{AnalyzeConfig, ErrorSeries, ErrorTable, GenConfig, StepRecord};
use crate::error::AppError;
use crate::math;
use crate::plot::{mask_loglog_pairs, Marker, PlotSeries};
use crate::report::{self, SeriesSummary};

/// All computed outputs of a single `greeks analyze` run.
#[derive(Debug, Clone)]
pub struct AnalyzeRun {
    pub table: ErrorTable,
    /// Masked Delta-error series (FD, CS) against `h_rel`.
    pub delta_series: Vec<PlotSeries>,
    /// Masked Gamma-error series (FD, CS-real, CS-45°) against `h_rel`.
    pub gamma_series: Vec<PlotSeries>,
    pub summaries: Vec<SeriesSummary>,
}

/// Load the CSV and prepare plot series + summary statistics.
pub fn run_analyze(config: &AnalyzeConfig) -> Result<AnalyzeRun, AppError> {
    let table = crate::io::ingest::load_error_table(&config.csv_path)?;
    prepare_analysis(table)
}

/// Build the analyze outputs from an already-loaded table.
///
/// A header-only file is the degenerate all-series-empty case, not an error:
/// the charts come out with bare axes and every summary row reads `N/A`.
pub fn prepare_analysis(table: ErrorTable) -> Result<AnalyzeRun, AppError> {
    if table.n_rows == 0 {
        warn!("CSV contains a header but no data rows; plots will be empty");
    }

    let h_rel = table
        .column("h_rel")
        .ok_or_else(|| AppError::input("Missing required column: `h_rel`"))?;

    let delta_series = build_series(&table, h_rel, &[ErrorSeries::DeltaFd, ErrorSeries::DeltaCs])?;
    let gamma_series = build_series(
        &table,
        h_rel,
        &[
            ErrorSeries::GammaFd,
            ErrorSeries::GammaCsReal,
            ErrorSeries::GammaCs45,
        ],
    )?;
    let summaries = report::summarize_table(&table);

    Ok(AnalyzeRun {
        delta_series,
        gamma_series,
        summaries,
        table,
    })
}

/// Evaluate every grid step of the configured scenario.
pub fn run_generate(config: &GenConfig) -> Vec<StepRecord> {
    let params = config.scenario.params();
    math::log_grid(config.grid_min_exp, config.grid_max_exp, config.grid_points)
        .into_iter()
        .map(|h_rel| math::evaluate_step(&params, h_rel))
        .collect()
}

fn build_series(
    table: &ErrorTable,
    h_rel: &[f64],
    kinds: &[ErrorSeries],
) -> Result<Vec<PlotSeries>, AppError> {
    // One marker per position within a chart, so overlapping series stay
    // distinguishable in print.
    const MARKERS: [Marker; 3] = [Marker::Circle, Marker::Cross, Marker::Triangle];

    kinds
        .iter()
        .enumerate()
        .map(|(i, &kind)| {
            let column = table.column(kind.column()).ok_or_else(|| {
                AppError::input(format!("Missing required column: `{}`", kind.column()))
            })?;
            Ok(PlotSeries::new(
                kind.display_name(),
                MARKERS[i % MARKERS.len()],
                mask_loglog_pairs(h_rel, column),
            ))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Scenario;
    use crate::io::ingest::read_error_table;
    use std::io::Cursor;

    const HEADER: &str = "h_rel,err_D_fd,err_D_cs,err_G_fd,err_G_cs_real,err_G_cs_45";

    fn table_from(csv: &str) -> ErrorTable {
        read_error_table(Cursor::new(csv.to_string())).unwrap()
    }

    #[test]
    fn header_only_table_degrades_to_empty_plots_and_na_rows() {
        let table = table_from(&format!("{HEADER}\n"));
        let run = prepare_analysis(table).unwrap();

        assert!(run.delta_series.iter().all(|s| s.points.is_empty()));
        assert!(run.gamma_series.iter().all(|s| s.points.is_empty()));
        assert!(run.summaries.iter().all(|s| s.stats.is_none()));
        assert_eq!(run.summaries.len(), ErrorSeries::ALL.len());
    }

    #[test]
    fn all_missing_series_is_skipped_but_summarized_as_na() {
        // err_D_cs is unparsable on every row; the other series survive.
        let csv = format!("{HEADER}\n1e-4,1e-5,x,1e-3,1e-4,1e-5\n1e-5,1e-6,y,1e-4,1e-5,1e-6\n");
        let run = prepare_analysis(table_from(&csv)).unwrap();

        assert_eq!(run.delta_series[0].points.len(), 2);
        assert!(run.delta_series[1].points.is_empty());

        // Summary row for Δ CS carries no stats.
        let cs = run.summaries.iter().find(|s| s.column == "err_D_cs").unwrap();
        assert!(cs.stats.is_none());
        let fd = run.summaries.iter().find(|s| s.column == "err_D_fd").unwrap();
        assert_eq!(fd.stats.unwrap().n, 2);
    }

    #[test]
    fn series_are_masked_independently() {
        let csv = format!("{HEADER}\n1e-4,1e-5,nan,1e-3,1e-4,1e-5\n1e-5,nan,1e-7,1e-4,1e-5,1e-6\n");
        let run = prepare_analysis(table_from(&csv)).unwrap();

        let fd = &run.delta_series[0];
        let cs = &run.delta_series[1];
        assert_eq!(fd.points, vec![(1e-4, 1e-5)]);
        assert_eq!(cs.points, vec![(1e-5, 1e-7)]);
    }

    #[test]
    fn generate_produces_one_record_per_grid_point() {
        let config = GenConfig {
            scenario: Scenario::Atm1y,
            out_path: "unused.csv".into(),
            grid_min_exp: -16.0,
            grid_max_exp: -4.0,
            grid_points: 24,
        };
        let records = run_generate(&config);
        assert_eq!(records.len(), 24);

        let spot = Scenario::Atm1y.params().spot;
        for r in &records {
            assert!((r.h - r.h_rel * spot).abs() <= 1e-12 * r.h.abs());
        }
    }

    #[test]
    fn generated_csv_round_trips_through_ingest() {
        let config = GenConfig {
            scenario: Scenario::Atm1y,
            out_path: std::env::temp_dir().join(format!(
                "greek_steps_roundtrip_{}.csv",
                std::process::id()
            )),
            grid_min_exp: -16.0,
            grid_max_exp: -4.0,
            grid_points: 24,
        };

        let records = run_generate(&config);
        crate::io::export::write_error_csv(&config.out_path, &records).unwrap();

        let table = crate::io::ingest::load_error_table(&config.out_path).unwrap();
        std::fs::remove_file(&config.out_path).ok();

        assert_eq!(table.n_rows, 24);
        let run = prepare_analysis(table).unwrap();

        // Complex-step Delta stays near machine precision across the grid.
        let cs = run.summaries.iter().find(|s| s.column == "err_D_cs").unwrap();
        let stats = cs.stats.unwrap();
        assert!(stats.max < 1e-8, "err_D_cs max = {}", stats.max);
        assert!(stats.min <= stats.median && stats.median <= stats.max);
    }
}
