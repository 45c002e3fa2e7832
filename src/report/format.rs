//! Fixed-width terminal report for the error summary.

use crate::report::SeriesSummary;

const RULE_WIDTH: usize = 60;
const COL_WIDTH: usize = 15;

/// Format the full error-summary table (banner + header + one row per series).
pub fn format_summary_table(summaries: &[SeriesSummary]) -> String {
    let mut out = String::new();

    out.push('\n');
    out.push_str(&"=".repeat(RULE_WIDTH));
    out.push('\n');
    out.push_str("Error summary (finite values only)\n");
    out.push_str(&"=".repeat(RULE_WIDTH));
    out.push('\n');

    out.push('\n');
    out.push_str(&format!(
        "{:<w$} {:<w$} {:<w$} {:<w$}\n",
        "Method",
        "Min",
        "Median",
        "Max",
        w = COL_WIDTH
    ));
    out.push_str(&"-".repeat(RULE_WIDTH));
    out.push('\n');

    for s in summaries {
        match &s.stats {
            Some(stats) => out.push_str(&format!(
                "{:<w$} {:<w$} {:<w$} {:<w$}\n",
                s.series,
                sci(stats.min),
                sci(stats.median),
                sci(stats.max),
                w = COL_WIDTH
            )),
            None => out.push_str(&format!(
                "{:<w$} {:<w$} {:<w$} {:<w$}\n",
                s.series,
                "N/A",
                "N/A",
                "N/A",
                w = COL_WIDTH
            )),
        }
    }

    out
}

/// Printf-style scientific notation: signed, two-digit exponent (`3.25e-05`).
///
/// Rust's `LowerExp` writes `3.25e-5`, which breaks column alignment against
/// single-digit exponents and differs from every other tool in the toolchain.
fn sci(value: f64) -> String {
    let plain = format!("{value:.2e}");
    match plain.split_once('e') {
        Some((mantissa, exp)) => {
            let (sign, digits) = match exp.strip_prefix('-') {
                Some(d) => ('-', d),
                None => ('+', exp),
            };
            format!("{mantissa}e{sign}{digits:0>2}")
        }
        // NaN/inf carry no exponent; print them as-is.
        None => plain,
    }
}
