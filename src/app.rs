//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - runs the analyze pipeline (load CSV -> plots -> summary)
//! - runs the gen pipeline (Greek evaluation -> CSV)
//! - prints reports and save confirmations

use std::path::Path;

use clap::Parser;

use crate::cli::{AnalyzeArgs, Command, GenArgs};
use crate::domain::{AnalyzeConfig, GenConfig};
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `greeks` binary.
pub fn run() -> Result<(), AppError> {
    // We want `greeks` and `greeks --csv errors.csv` to behave like
    // `greeks analyze ...`.
    //
    // Clap requires a subcommand name, so we do a small, explicit rewrite of
    // the argv list before parsing. This preserves a clean clap structure
    // while keeping the short invocation.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Analyze(args) => handle_analyze(args),
        Command::Gen(args) => handle_gen(args),
    }
}

fn handle_analyze(args: AnalyzeArgs) -> Result<(), AppError> {
    let config = analyze_config_from_args(&args);
    let run = pipeline::run_analyze(&config)?;

    ensure_dir(&config.out_dir())?;

    let delta_path = config.delta_plot_path();
    crate::plot::render_loglog_png(
        &delta_path,
        "Delta Error vs Step Size",
        "Relative step size (h_rel)",
        "Absolute error",
        &run.delta_series,
    )?;
    println!("✓ Saved {}", delta_path.display());

    let gamma_path = config.gamma_plot_path();
    crate::plot::render_loglog_png(
        &gamma_path,
        "Gamma Error vs Step Size",
        "Relative step size (h_rel)",
        "Absolute error",
        &run.gamma_series,
    )?;
    println!("✓ Saved {}", gamma_path.display());

    print!("{}", crate::report::format_summary_table(&run.summaries));

    if let Some(path) = &config.export_summary {
        crate::io::export::write_summary_json(path, &run.summaries)?;
        println!("✓ Saved {}", path.display());
    }

    Ok(())
}

fn handle_gen(args: GenArgs) -> Result<(), AppError> {
    let config = gen_config_from_args(&args);
    let records = pipeline::run_generate(&config);

    if let Some(parent) = config.out_path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_dir(parent)?;
        }
    }
    crate::io::export::write_error_csv(&config.out_path, &records)?;
    println!(
        "✓ Wrote {} rows ({}) to {}",
        records.len(),
        config.scenario.display_name(),
        config.out_path.display()
    );

    Ok(())
}

pub fn analyze_config_from_args(args: &AnalyzeArgs) -> AnalyzeConfig {
    AnalyzeConfig {
        csv_path: args.csv.clone(),
        out_dir: args.out_dir.clone(),
        export_summary: args.export_summary.clone(),
    }
}

pub fn gen_config_from_args(args: &GenArgs) -> GenConfig {
    GenConfig {
        scenario: args.scenario,
        out_path: args.out.clone(),
        grid_min_exp: args.grid_min,
        grid_max_exp: args.grid_max,
        grid_points: args.grid_points,
    }
}

fn ensure_dir(dir: &Path) -> Result<(), AppError> {
    std::fs::create_dir_all(dir).map_err(|e| {
        AppError::input(format!("Failed to create directory '{}': {e}", dir.display()))
    })
}

/// Rewrite argv so `greeks` defaults to `greeks analyze`.
///
/// Rules:
/// - `greeks`                      -> `greeks analyze`
/// - `greeks --csv x.csv ...`      -> `greeks analyze --csv x.csv ...`
/// - `greeks --help/--version/-h`  -> unchanged (top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("analyze".to_string());
        return argv;
    };

    let is_top_level_help_or_version =
        matches!(arg1.as_str(), "-h" | "--help" | "-V" | "--version" | "help");
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "analyze" | "gen");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "analyze flags".
    if arg1.starts_with('-') {
        argv.insert(1, "analyze".to_string());
        return argv;
    }

    // Otherwise, leave as-is (clap reports the unknown subcommand).
    argv
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bare_invocation_rewrites_to_analyze() {
        assert_eq!(rewrite_args(argv(&["greeks"])), argv(&["greeks", "analyze"]));
        assert_eq!(
            rewrite_args(argv(&["greeks", "--csv", "x.csv"])),
            argv(&["greeks", "analyze", "--csv", "x.csv"])
        );
    }

    #[test]
    fn subcommands_and_help_pass_through() {
        assert_eq!(
            rewrite_args(argv(&["greeks", "gen", "-s", "2"])),
            argv(&["greeks", "gen", "-s", "2"])
        );
        assert_eq!(rewrite_args(argv(&["greeks", "--help"])), argv(&["greeks", "--help"]));
    }
}
