use std::path::Path;

use anyhow::{Context, Result};
use rust_xlsxwriter::{Format, Workbook, XlsxError};
use thiserror::Error;

use crate::data::model::{CellValue, Dataset};

pub const CSV_MIME: &str = "text/csv";
pub const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";
pub const SHEET_NAME: &str = "Sheet1";

/// Excel's hard limits on a single worksheet.
const XLSX_MAX_ROWS: usize = 1_048_576;
const XLSX_MAX_COLS: usize = 16_384;
/// Longest string a single cell can hold; longer text is cut.
const XLSX_MAX_STRING_CHARS: usize = 32_767;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("writing CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("flushing CSV buffer: {0}")]
    Io(#[from] std::io::Error),
    #[error("writing spreadsheet: {0}")]
    Xlsx(#[from] XlsxError),
    #[error("{rows} rows x {cols} columns does not fit in one worksheet")]
    TooLarge { rows: usize, cols: usize },
}

// ---------------------------------------------------------------------------
// Serialisers
// ---------------------------------------------------------------------------

/// UTF-8 CSV with a header row of column names and no index column.
pub fn csv_bytes(dataset: &Dataset) -> Result<Vec<u8>, ExportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(dataset.columns.iter().map(|c| c.name.as_str()))?;

    for row in 0..dataset.row_count {
        writer.write_record(
            (0..dataset.columns.len()).map(|col| dataset.cell(row, col).to_string()),
        )?;
    }

    writer.into_inner().map_err(|e| ExportError::Io(e.into_error()))
}

/// Single-sheet workbook with the same content as [`csv_bytes`].
pub fn xlsx_bytes(dataset: &Dataset) -> Result<Vec<u8>, ExportError> {
    let rows = dataset.row_count;
    let cols = dataset.columns.len();
    if rows + 1 > XLSX_MAX_ROWS || cols > XLSX_MAX_COLS {
        return Err(ExportError::TooLarge { rows, cols });
    }

    let mut workbook = Workbook::new();
    let header = Format::new().set_bold();
    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME)?;

    for (c, column) in dataset.columns.iter().enumerate() {
        let c = c as u16;
        sheet.write_string_with_format(0, c, cell_text(&column.name), &header)?;

        for (r, value) in column.values.iter().enumerate() {
            let r = r as u32 + 1;
            match value {
                CellValue::Null => {}
                CellValue::Bool(b) => {
                    sheet.write_boolean(r, c, *b)?;
                }
                CellValue::Integer(i) => {
                    sheet.write_number(r, c, *i as f64)?;
                }
                CellValue::Float(f) if f.is_finite() => {
                    sheet.write_number(r, c, *f)?;
                }
                CellValue::Float(_) => {}
                CellValue::Text(s) | CellValue::Nested(s) => {
                    sheet.write_string(r, c, cell_text(s))?;
                }
            }
        }
    }

    Ok(workbook.save_to_buffer()?)
}

/// `s`, cut to the longest text a worksheet cell accepts.
fn cell_text(s: &str) -> &str {
    match s.char_indices().nth(XLSX_MAX_STRING_CHARS) {
        Some((end, _)) => {
            log::warn!("Truncating a {}-character cell for the spreadsheet", s.chars().count());
            &s[..end]
        }
        None => s,
    }
}

// ---------------------------------------------------------------------------
// Downloadable artifacts
// ---------------------------------------------------------------------------

/// An in-memory file ready to be saved by the user.
#[derive(Debug, Clone)]
pub struct ExportArtifact {
    pub file_name: String,
    pub mime: &'static str,
    pub bytes: Vec<u8>,
}

impl ExportArtifact {
    pub fn csv(dataset: &Dataset, base_name: &str) -> Result<Self, ExportError> {
        Ok(ExportArtifact {
            file_name: format!("{base_name}.csv"),
            mime: CSV_MIME,
            bytes: csv_bytes(dataset)?,
        })
    }

    pub fn xlsx(dataset: &Dataset, base_name: &str) -> Result<Self, ExportError> {
        Ok(ExportArtifact {
            file_name: format!("{base_name}.xlsx"),
            mime: XLSX_MIME,
            bytes: xlsx_bytes(dataset)?,
        })
    }

    /// Write the bytes to `path`.
    pub fn save(&self, path: &Path) -> Result<()> {
        std::fs::write(path, &self.bytes)
            .with_context(|| format!("saving {} to {}", self.file_name, path.display()))?;
        log::info!(
            "Saved {} ({} bytes, {}) to {}",
            self.file_name,
            self.bytes.len(),
            self.mime,
            path.display()
        );
        Ok(())
    }
}
