//! In-memory table of raw spreadsheet cells
//!
//! `RawTable` is what the loader produces: a header row plus untyped cells. It is
//! immutable once built; cleaning returns a new table or typed records.

mod display;

use std::fmt;

use crate::error::{Error, Result};
use crate::schema::{ColumnMap, InputColumn};

pub use display::{format_table, TablePreview};

/// A single untyped cell
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    /// Blank cell
    Empty,
    /// Numeric cell
    Number(f64),
    /// Any other content
    Text(String),
}

impl Cell {
    /// Interpret text read from a delimited file
    ///
    /// Blank text is `Empty`, anything that parses as a float is `Number`.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            Cell::Empty
        } else if let Ok(n) = trimmed.parse::<f64>() {
            Cell::Number(n)
        } else {
            Cell::Text(trimmed.to_string())
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    /// Numeric value of the cell, parsing text if needed
    pub fn to_f64(&self) -> Option<f64> {
        match self {
            Cell::Number(n) => Some(*n),
            Cell::Text(s) => s.trim().parse::<f64>().ok(),
            Cell::Empty => None,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Empty => write!(f, "NaN"),
            Cell::Number(n) => write!(f, "{}", format_number(*n)),
            Cell::Text(s) => write!(f, "{}", s),
        }
    }
}

/// Render integral floats without a fractional part
pub fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{:.0}", n)
    } else {
        format!("{}", n)
    }
}

/// Header row plus rows of cells, with the input schema resolved
#[derive(Debug, Clone, PartialEq)]
pub struct RawTable {
    headers: Vec<String>,
    rows: Vec<Vec<Cell>>,
    columns: ColumnMap,
}

impl RawTable {
    /// Build a table, checking that every required column is present
    ///
    /// Rows shorter than the header are padded with `Empty`; rows longer than
    /// the header are an error.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<Cell>>) -> Result<Self> {
        let columns = ColumnMap::from_headers(&headers)?;
        let width = headers.len();

        let mut padded = Vec::with_capacity(rows.len());
        for (i, mut row) in rows.into_iter().enumerate() {
            if row.len() > width {
                return Err(Error::InvalidInput(format!(
                    "row {} has {} cells but the header has {} columns",
                    i + 1,
                    row.len(),
                    width
                )));
            }
            row.resize(width, Cell::Empty);
            padded.push(row);
        }

        Ok(RawTable {
            headers,
            rows: padded,
            columns,
        })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Cell of a required column in row `row`
    pub fn cell(&self, row: usize, column: InputColumn) -> Option<&Cell> {
        self.rows
            .get(row)
            .and_then(|r| r.get(self.columns.position(column)))
    }

    /// Count of `Empty` cells across the whole table
    pub fn empty_count(&self) -> usize {
        self.rows
            .iter()
            .flat_map(|r| r.iter())
            .filter(|c| c.is_empty())
            .count()
    }

    /// New table with every `Empty` cell replaced by `fill`
    pub fn fill_empty(&self, fill: &Cell) -> RawTable {
        let rows = self
            .rows
            .iter()
            .map(|row| {
                row.iter()
                    .map(|c| if c.is_empty() { fill.clone() } else { c.clone() })
                    .collect()
            })
            .collect();

        RawTable {
            headers: self.headers.clone(),
            rows,
            columns: self.columns.clone(),
        }
    }

    /// Display adapter for the first `n` rows
    pub fn head(&self, n: usize) -> TablePreview<'_> {
        TablePreview::new(&self.headers, &self.rows, n)
    }
}
