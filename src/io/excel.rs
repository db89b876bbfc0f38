use std::path::Path;

use calamine::{open_workbook_auto, DataType, Reader};
use simple_excel_writer::{Row, Workbook};

use crate::dataframe::Cell;
use crate::error::{Error, Result};
use crate::io::SheetData;

/// Read the first worksheet of a workbook
///
/// Any format calamine understands is accepted (xlsx, xlsm, xls, ods). The
/// first row is the header; rows with no content at all are skipped.
pub fn read_excel<P: AsRef<Path>>(path: P) -> Result<SheetData> {
    let path = path.as_ref();
    let mut workbook = open_workbook_auto(path)
        .map_err(|e| Error::Excel(format!("cannot open {}: {}", path.display(), e)))?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| Error::EmptyData(format!("{} has no worksheets", path.display())))?;

    let range = workbook.worksheet_range(&sheet_name).map_err(|e| {
        Error::Excel(format!(
            "cannot read sheet '{}' of {}: {}",
            sheet_name,
            path.display(),
            e
        ))
    })?;

    let mut rows = range.rows();
    let headers: Vec<String> = match rows.next() {
        Some(header_row) => header_row.iter().map(|c| c.to_string().trim().to_string()).collect(),
        None => {
            return Err(Error::EmptyData(format!(
                "sheet '{}' of {} is empty",
                sheet_name,
                path.display()
            )))
        }
    };

    let data = rows
        .map(|row| row.iter().map(cell_from_excel).collect::<Vec<_>>())
        .filter(|row| !row.iter().all(Cell::is_empty))
        .collect();

    Ok(SheetData::new(headers, data))
}

fn cell_from_excel(value: &DataType) -> Cell {
    match value {
        DataType::Empty => Cell::Empty,
        DataType::Int(i) => Cell::Number(*i as f64),
        DataType::Float(f) | DataType::DateTime(f) => Cell::Number(*f),
        DataType::Bool(b) => Cell::Number(if *b { 1.0 } else { 0.0 }),
        DataType::String(s) if s.trim().is_empty() => Cell::Empty,
        DataType::String(s) => Cell::Text(s.clone()),
        other => Cell::Text(other.to_string()),
    }
}

/// Write a single-sheet workbook, replacing any existing file
///
/// Numbers are written as numeric cells, `Empty` as blank cells.
pub fn write_excel<P: AsRef<Path>>(path: P, sheet_name: &str, data: &SheetData) -> Result<()> {
    let path = path.as_ref();
    let path_str = path.to_str().ok_or_else(|| {
        Error::IoError(format!("path is not valid UTF-8: {}", path.display()))
    })?;

    let mut workbook = Workbook::create(path_str);
    let mut sheet = workbook.create_sheet(sheet_name);

    workbook
        .write_sheet(&mut sheet, |sheet_writer| {
            let mut header = Row::new();
            for name in &data.headers {
                header.add_cell(name.as_str());
            }
            sheet_writer.append_row(header)?;

            for cells in &data.rows {
                let mut row = Row::new();
                for cell in cells {
                    match cell {
                        Cell::Empty => row.add_cell(()),
                        Cell::Number(n) => row.add_cell(*n),
                        Cell::Text(s) => row.add_cell(s.as_str()),
                    }
                }
                sheet_writer.append_row(row)?;
            }
            Ok(())
        })
        .map_err(|e| Error::Excel(format!("cannot write {}: {}", path.display(), e)))?;

    workbook
        .close()
        .map_err(|e| Error::Excel(format!("cannot save {}: {}", path.display(), e)))?;

    Ok(())
}
