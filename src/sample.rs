//! Built-in sample dataset
//!
//! Written to the input path when no dataset exists yet: three banks over
//! two years, all figures in AED millions except the per-share columns.

use crate::dataframe::{Cell, RawTable};
use crate::error::Result;
use crate::schema::input_headers;

/// Bank, Year, Revenue, Net_Income, Assets, Equity, Deposits, Loans, SharePrice, Dividends
const SAMPLE_ROWS: [(&str, f64, [f64; 8]); 6] = [
    ("Emirates NBD", 2015.0, [10000.0, 2000.0, 50000.0, 7000.0, 30000.0, 20000.0, 12.5, 1.2]),
    ("Dubai Islamic Bank", 2015.0, [8000.0, 1500.0, 40000.0, 6000.0, 25000.0, 18000.0, 10.2, 1.0]),
    ("Mashreq", 2015.0, [6000.0, 1200.0, 30000.0, 5000.0, 20000.0, 15000.0, 8.7, 0.8]),
    ("Emirates NBD", 2016.0, [11000.0, 2100.0, 52000.0, 7200.0, 31000.0, 21000.0, 13.0, 1.3]),
    ("Dubai Islamic Bank", 2016.0, [8500.0, 1600.0, 41000.0, 6100.0, 25500.0, 18500.0, 10.5, 1.1]),
    ("Mashreq", 2016.0, [6500.0, 1300.0, 31000.0, 5100.0, 20500.0, 15500.0, 9.0, 0.9]),
];

/// The six-row sample table
pub fn sample_table() -> Result<RawTable> {
    let rows = SAMPLE_ROWS
        .iter()
        .map(|(bank, year, values)| {
            let mut row = Vec::with_capacity(10);
            row.push(Cell::Text(bank.to_string()));
            row.push(Cell::Number(*year));
            row.extend(values.iter().map(|v| Cell::Number(*v)));
            row
        })
        .collect();

    RawTable::new(input_headers(), rows)
}
