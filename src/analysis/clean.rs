//! Missing-value filling and numeric coercion

use crate::dataframe::{format_number, Cell, RawTable};
use crate::error::{Error, Result};
use crate::na::NA;
use crate::record::{DataWarning, FinancialRecord, RecordBuilder, WarningKind};
use crate::schema::InputColumn;

/// Output of the cleaning stage
#[derive(Debug, Clone)]
pub struct CleanedData {
    pub records: Vec<FinancialRecord>,
    pub warnings: Vec<DataWarning>,
}

impl CleanedData {
    /// Count of numeric cells left missing after coercion
    pub fn missing_count(&self) -> usize {
        self.records
            .iter()
            .map(|r| {
                InputColumn::NUMERIC
                    .iter()
                    .filter(|c| r.numeric(**c).is_na())
                    .count()
            })
            .sum()
    }
}

/// Replace every blank cell in the table with zero, identifiers included
pub fn fill_missing(table: &RawTable) -> RawTable {
    table.fill_empty(&Cell::Number(0.0))
}

/// Type each row, coercing the numeric columns
///
/// Unparseable numeric cells become `NA` with a warning and are not filled
/// again. A `Year` that is not an integer is fatal.
pub fn coerce_records(table: &RawTable) -> Result<CleanedData> {
    let mut records = Vec::with_capacity(table.row_count());
    let mut warnings = Vec::new();

    for row in 0..table.row_count() {
        let bank = match table.cell(row, InputColumn::Bank) {
            Some(Cell::Number(n)) => format_number(*n),
            Some(Cell::Text(s)) => s.clone(),
            Some(Cell::Empty) | None => String::new(),
        };
        let year = parse_year(table.cell(row, InputColumn::Year), row)?;

        let mut builder = RecordBuilder::new(bank.clone(), year);
        for column in InputColumn::NUMERIC {
            let cell = table.cell(row, column).unwrap_or(&Cell::Empty);
            let value: NA<f64> = cell.to_f64().into();
            if value.is_na() {
                let raw = cell.to_string();
                log::warn!(
                    "Row {} ({}): {} value '{}' could not be converted to a number",
                    row + 1,
                    bank,
                    column.header(),
                    raw
                );
                warnings.push(DataWarning {
                    row: row + 1,
                    bank: bank.clone(),
                    column: column.header().to_string(),
                    kind: WarningKind::UnparseableNumber(raw),
                });
            }
            builder = builder.set(column, value);
        }
        records.push(builder.build());
    }

    Ok(CleanedData { records, warnings })
}

/// Fill then coerce
pub fn clean(table: &RawTable) -> Result<CleanedData> {
    let filled = fill_missing(table);
    let cleaned = coerce_records(&filled)?;
    log::info!(
        "Cleaned {} rows ({} blank cells filled, {} numeric cells left missing)",
        cleaned.records.len(),
        table.empty_count(),
        cleaned.missing_count()
    );
    Ok(cleaned)
}

fn parse_year(cell: Option<&Cell>, row: usize) -> Result<i64> {
    let value = match cell {
        Some(Cell::Number(n)) => Some(*n),
        Some(Cell::Text(s)) => s.trim().parse::<f64>().ok(),
        Some(Cell::Empty) | None => Some(0.0),
    };

    match value {
        Some(v) if v.is_finite() && v.fract() == 0.0 => Ok(v as i64),
        _ => Err(Error::InvalidValue(format!(
            "row {}: Year '{}' is not an integer",
            row + 1,
            cell.map(|c| c.to_string()).unwrap_or_default()
        ))),
    }
}
