//! Spreadsheet and CSV input/output
//!
//! The format is chosen from the file extension. Workbooks go through
//! calamine (read) and simple_excel_writer (write) when the `excel` feature is
//! enabled; CSV is always available.

pub mod csv;
#[cfg(feature = "excel")]
pub mod excel;

use std::path::Path;

use crate::analysis::Summary;
use crate::dataframe::{Cell, RawTable};
use crate::error::{Error, Result};

pub use self::csv::{read_csv, write_csv};
#[cfg(feature = "excel")]
pub use excel::{read_excel, write_excel};

/// Sheet name used for the summary workbook
pub const SUMMARY_SHEET: &str = "Summary";

/// Sheet name used when writing the input dataset
pub const DATA_SHEET: &str = "Sheet1";

/// Header row plus untyped rows, as stored in a file
#[derive(Debug, Clone, PartialEq)]
pub struct SheetData {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl SheetData {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<Cell>>) -> Self {
        SheetData { headers, rows }
    }
}

/// Supported file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    /// xlsx, xlsm, xls or ods workbook
    Excel,
    Csv,
}

impl FileFormat {
    /// Detect the format from the file extension, case-insensitively
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            "xlsx" | "xlsm" | "xls" | "ods" => Ok(FileFormat::Excel),
            "csv" => Ok(FileFormat::Csv),
            _ => Err(Error::UnsupportedFormat(path.display().to_string())),
        }
    }
}

fn read_sheet(path: &Path) -> Result<SheetData> {
    match FileFormat::from_path(path)? {
        #[cfg(feature = "excel")]
        FileFormat::Excel => read_excel(path),
        #[cfg(not(feature = "excel"))]
        FileFormat::Excel => Err(excel_disabled(path)),
        FileFormat::Csv => read_csv(path),
    }
}

fn write_sheet(path: &Path, sheet_name: &str, data: &SheetData) -> Result<()> {
    match FileFormat::from_path(path)? {
        #[cfg(feature = "excel")]
        FileFormat::Excel => write_excel(path, sheet_name, data),
        #[cfg(not(feature = "excel"))]
        FileFormat::Excel => {
            let _ = sheet_name;
            Err(excel_disabled(path))
        }
        FileFormat::Csv => write_csv(path, data),
    }
}

#[cfg(not(feature = "excel"))]
fn excel_disabled(path: &Path) -> Error {
    Error::UnsupportedFormat(format!(
        "{} (built without the `excel` feature)",
        path.display()
    ))
}

/// Read the input dataset and check its schema
pub fn read_table<P: AsRef<Path>>(path: P) -> Result<RawTable> {
    let path = path.as_ref();
    let data = read_sheet(path)?;
    RawTable::new(data.headers, data.rows).map_err(|e| match e {
        Error::MissingColumn(col) => {
            Error::MissingColumn(format!("{} (in {})", col, path.display()))
        }
        other => other,
    })
}

/// Write the input dataset, replacing any existing file
pub fn write_table<P: AsRef<Path>>(path: P, table: &RawTable) -> Result<()> {
    let data = SheetData::new(table.headers().to_vec(), table.rows().to_vec());
    write_sheet(path.as_ref(), DATA_SHEET, &data)
}

/// Write the per-bank summary; invalid means become blank cells
pub fn write_summary<P: AsRef<Path>>(path: P, summary: &Summary) -> Result<()> {
    let path = path.as_ref();
    let (headers, rows) = summary.to_cells();
    write_sheet(path, SUMMARY_SHEET, &SheetData::new(headers, rows))?;
    log::info!("Wrote summary of {} banks to {}", summary.len(), path.display());
    Ok(())
}

/// Read a summary written by [`write_summary`]
pub fn read_summary<P: AsRef<Path>>(path: P) -> Result<Summary> {
    let data = read_sheet(path.as_ref())?;
    Summary::from_cells(&data.headers, &data.rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(FileFormat::from_path("a/b.XLSX").unwrap(), FileFormat::Excel);
        assert_eq!(FileFormat::from_path("data.ods").unwrap(), FileFormat::Excel);
        assert_eq!(FileFormat::from_path("data.csv").unwrap(), FileFormat::Csv);
        assert!(matches!(
            FileFormat::from_path("data.json"),
            Err(Error::UnsupportedFormat(_))
        ));
        assert!(FileFormat::from_path("no_extension").is_err());
    }
}
