//! CSV ingest for the step-size error table.
//!
//! The file is a fixed-schema CSV such as the one `greeks gen` writes: a
//! header row, then one row per step size. Cells are plain decimals, except
//! that a cell may carry a complex-number textual form like `(1.5,2.0)`, in
//! which case only the real component matters.
//!
//! Design goals:
//! - **Strict schema** for the columns the pipeline reads (clear errors +
//!   exit code 2)
//! - **Best-effort cells**: a malformed cell degrades to the missing sentinel
//!   (`NAN`) instead of aborting the row; downstream filters per series
//! - **Row-level warnings** instead of hard failures for ragged rows

use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::Read;
use std::path::Path;

use log::warn;

use crate::domain::ErrorTable;
use crate::error::AppError;

/// Columns the analyze pipeline reads downstream. The file may carry more
/// (the generator writes 14); extras are loaded but unused.
pub const REQUIRED_COLUMNS: [&str; 6] = [
    "h_rel",
    "err_D_fd",
    "err_D_cs",
    "err_G_fd",
    "err_G_cs_real",
    "err_G_cs_45",
];

/// Load the error table from a CSV file.
pub fn load_error_table(path: &Path) -> Result<ErrorTable, AppError> {
    let file = File::open(path).map_err(|e| {
        AppError::input(format!("Failed to open CSV '{}': {e}", path.display()))
    })?;
    read_error_table(file)
}

/// Parse the error table from any reader (unit-testable without a file).
pub fn read_error_table<R: Read>(reader: R) -> Result<ErrorTable, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| AppError::input(format!("Failed to read CSV headers: {e}")))?
        .iter()
        .map(normalize_header_name)
        .collect();

    ensure_unique_headers(&headers)?;
    ensure_required_columns_exist(&headers)?;

    let mut columns: Vec<Vec<f64>> = vec![Vec::new(); headers.len()];
    let mut n_rows = 0usize;

    for (idx, result) in reader.records().enumerate() {
        // +2: records() starts after the header row, CSV lines are 1-based.
        let line = idx + 2;

        let record = match result {
            Ok(r) => r,
            Err(e) => {
                warn!("line {line}: CSV parse error, row treated as missing: {e}");
                for col in &mut columns {
                    col.push(f64::NAN);
                }
                n_rows += 1;
                continue;
            }
        };

        if record.len() < headers.len() {
            warn!(
                "line {line}: short row ({} of {} cells), padding with missing",
                record.len(),
                headers.len()
            );
        } else if record.len() > headers.len() {
            warn!(
                "line {line}: ignoring {} cell(s) beyond the header",
                record.len() - headers.len()
            );
        }

        for (i, col) in columns.iter_mut().enumerate() {
            col.push(record.get(i).map(parse_cell).unwrap_or(f64::NAN));
        }
        n_rows += 1;
    }

    let columns: HashMap<String, Vec<f64>> = headers.iter().cloned().zip(columns).collect();

    Ok(ErrorTable {
        headers,
        columns,
        n_rows,
    })
}

/// Parse one cell into `f64`, degrading to `NAN` on any failure.
///
/// A cell containing `(` is a complex-number textual form: the value is the
/// token between `(` and the first `,` or `)`. A raw `(re` fragment (a complex
/// pair split across two cells by an unquoting writer) resolves the same way,
/// and the orphaned `im)` fragment fails to parse and becomes `NAN`.
pub fn parse_cell(raw: &str) -> f64 {
    let token = match raw.find('(') {
        Some(start) => {
            let inner = &raw[start + 1..];
            let end = inner
                .find(|c| c == ',' || c == ')')
                .unwrap_or(inner.len());
            &inner[..end]
        }
        None => raw,
    };
    token.trim().parse::<f64>().unwrap_or(f64::NAN)
}

fn normalize_header_name(name: &str) -> String {
    // Excel and other tools sometimes emit UTF-8 CSVs with a BOM prefix on
    // the first header. The schema is fixed-case, so no case folding.
    name.trim().trim_start_matches('\u{feff}').to_string()
}

fn ensure_unique_headers(headers: &[String]) -> Result<(), AppError> {
    let mut seen = HashSet::new();
    for h in headers {
        if !seen.insert(h.as_str()) {
            return Err(AppError::input(format!("Duplicate column in header: `{h}`")));
        }
    }
    Ok(())
}

fn ensure_required_columns_exist(headers: &[String]) -> Result<(), AppError> {
    for name in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == name) {
            return Err(AppError::input(format!("Missing required column: `{name}`")));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const HEADER: &str = "h_rel,err_D_fd,err_D_cs,err_G_fd,err_G_cs_real,err_G_cs_45";

    #[test]
    fn parse_cell_handles_the_three_token_shapes() {
        assert!((parse_cell("3.2") - 3.2).abs() < 1e-15);
        assert!((parse_cell("(1.5,2.0)") - 1.5).abs() < 1e-15);
        assert!(parse_cell("abc").is_nan());
    }

    #[test]
    fn parse_cell_handles_split_complex_fragments() {
        // An unquoting writer splits "(1.5,2.0)" into two cells.
        assert!((parse_cell("(1.5") - 1.5).abs() < 1e-15);
        assert!(parse_cell("2.0)").is_nan());
    }

    #[test]
    fn parse_cell_scientific_notation() {
        assert!((parse_cell("1.234e-12") - 1.234e-12).abs() < 1e-27);
    }

    #[test]
    fn columns_all_share_the_row_count() {
        let csv = format!("{HEADER}\n1e-4,1.0,2.0,3.0,4.0,5.0\n1e-5,6.0,7.0,8.0,9.0,10.0\n");
        let table = read_error_table(Cursor::new(csv)).unwrap();
        assert_eq!(table.n_rows, 2);
        for name in REQUIRED_COLUMNS {
            assert_eq!(table.column(name).unwrap().len(), 2, "column {name}");
        }
    }

    #[test]
    fn quoted_complex_cell_keeps_real_part() {
        let csv = format!("{HEADER}\n1e-4,\"(1.5,2.0)\",2.0,3.0,4.0,5.0\n");
        let table = read_error_table(Cursor::new(csv)).unwrap();
        let col = table.column("err_D_fd").unwrap();
        assert!((col[0] - 1.5).abs() < 1e-15);
    }

    #[test]
    fn malformed_cell_becomes_missing_not_an_error() {
        let csv = format!("{HEADER}\n1e-4,oops,2.0,3.0,4.0,5.0\n");
        let table = read_error_table(Cursor::new(csv)).unwrap();
        assert!(table.column("err_D_fd").unwrap()[0].is_nan());
        assert!((table.column("err_D_cs").unwrap()[0] - 2.0).abs() < 1e-15);
    }

    #[test]
    fn short_row_is_padded_with_missing() {
        let csv = format!("{HEADER}\n1e-4,1.0\n");
        let table = read_error_table(Cursor::new(csv)).unwrap();
        assert_eq!(table.n_rows, 1);
        assert!((table.column("err_D_fd").unwrap()[0] - 1.0).abs() < 1e-15);
        assert!(table.column("err_G_cs_45").unwrap()[0].is_nan());
    }

    #[test]
    fn missing_required_column_is_an_input_error() {
        let csv = "h_rel,err_D_fd\n1e-4,1.0\n";
        let err = read_error_table(Cursor::new(csv)).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains("err_D_cs"));
    }

    #[test]
    fn missing_file_is_an_input_error() {
        let err = load_error_table(Path::new("no/such/dir/errors.csv")).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn bom_on_first_header_is_stripped() {
        let csv = format!("\u{feff}{HEADER}\n1e-4,1.0,2.0,3.0,4.0,5.0\n");
        let table = read_error_table(Cursor::new(csv)).unwrap();
        assert!(table.column("h_rel").is_some());
    }
}
