use std::path::Path;

use csv::{ReaderBuilder, Trim, Writer};

use crate::dataframe::{format_number, Cell};
use crate::error::{Error, Result};
use crate::io::SheetData;

/// Read a CSV file with a header row
///
/// Fields are trimmed; blank fields become `Empty` and numeric fields
/// `Number`. Records may be shorter than the header.
pub fn read_csv<P: AsRef<Path>>(path: P) -> Result<SheetData> {
    let path = path.as_ref();
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_path(path)
        .map_err(|e| Error::CsvError(format!("cannot open {}: {}", path.display(), e)))?;

    let headers: Vec<String> = rdr
        .headers()
        .map_err(|e| Error::CsvError(format!("cannot read header of {}: {}", path.display(), e)))?
        .iter()
        .map(|h| h.to_string())
        .collect();
    if headers.iter().all(|h| h.is_empty()) {
        return Err(Error::EmptyData(format!("{} has no header row", path.display())));
    }

    let mut rows = Vec::new();
    for result in rdr.records() {
        let record =
            result.map_err(|e| Error::CsvError(format!("{}: {}", path.display(), e)))?;
        let row: Vec<Cell> = record.iter().map(Cell::parse).collect();
        if !row.iter().all(Cell::is_empty) {
            rows.push(row);
        }
    }

    Ok(SheetData::new(headers, rows))
}

/// Write a CSV file, replacing any existing file
pub fn write_csv<P: AsRef<Path>>(path: P, data: &SheetData) -> Result<()> {
    let path = path.as_ref();
    let mut wtr = Writer::from_path(path)
        .map_err(|e| Error::CsvError(format!("cannot create {}: {}", path.display(), e)))?;

    wtr.write_record(&data.headers)?;
    for row in &data.rows {
        let fields: Vec<String> = row
            .iter()
            .map(|cell| match cell {
                Cell::Empty => String::new(),
                Cell::Number(n) => format_number(*n),
                Cell::Text(s) => s.clone(),
            })
            .collect();
        wtr.write_record(&fields)?;
    }

    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_read_parses_cells() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("banks.csv");
        std::fs::write(&path, "Bank,Year,Revenue\nMashreq, 2015 ,\n\n Emirates NBD,2016,n/a\n").unwrap();

        let data = read_csv(&path).unwrap();
        assert_eq!(data.headers, vec!["Bank", "Year", "Revenue"]);
        assert_eq!(data.rows.len(), 2);
        assert_eq!(
            data.rows[0],
            vec![
                Cell::Text("Mashreq".to_string()),
                Cell::Number(2015.0),
                Cell::Empty
            ]
        );
        assert_eq!(data.rows[1][2], Cell::Text("n/a".to_string()));
    }

    #[test]
    fn test_write_then_read() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("summary.csv");
        let data = SheetData::new(
            vec!["Bank".to_string(), "ROE".to_string()],
            vec![vec![Cell::Text("Mashreq".to_string()), Cell::Number(24.52)]],
        );

        write_csv(&path, &data).unwrap();
        assert_eq!(read_csv(&path).unwrap(), data);
    }

    #[test]
    fn test_missing_file_names_the_path() {
        let err = read_csv("/nonexistent/banks.csv").unwrap_err();
        assert!(err.to_string().contains("banks.csv"));
    }
}
