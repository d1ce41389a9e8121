//! Write bond reports to CSV.
//!
//! Reports are meant to be opened in a spreadsheet: minimal quoting, CRLF line
//! endings, and a single header row.

use std::path::Path;

use crate::domain::BondRecord;
use crate::error::AppError;
use crate::report::{HEADER, report_row};

/// Write `bonds` to `path` (created or truncated). Returns the number of data rows.
pub fn write_report_csv<'a, I>(path: &Path, delimiter: u8, bonds: I) -> Result<usize, AppError>
where
    I: IntoIterator<Item = &'a BondRecord>,
{
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .terminator(csv::Terminator::CRLF)
        .from_path(path)
        .map_err(|e| {
            AppError::io(format!("Failed to create report '{}': {e}", path.display()))
        })?;

    writer
        .write_record(HEADER)
        .map_err(|e| AppError::io(format!("Failed to write report header: {e}")))?;

    let mut rows = 0;
    for bond in bonds {
        writer.write_record(report_row(bond)).map_err(|e| {
            AppError::io(format!("Failed to write report row for {}: {e}", bond.code()))
        })?;
        rows += 1;
    }

    writer
        .flush()
        .map_err(|e| AppError::io(format!("Failed to flush report '{}': {e}", path.display())))?;

    Ok(rows)
}
