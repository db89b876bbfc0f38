//! Fixed schema of the bank financials workbook
//!
//! The input sheet carries ten named columns; the analysis adds five derived
//! ratio columns. Headers are resolved to positions once, at load time, so the
//! rest of the crate addresses cells by [`InputColumn`] instead of by name.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Column that holds the entity identifier in both input and summary sheets
pub const INDEX_COLUMN: &str = "Bank";

/// Columns of the input dataset, in file order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum InputColumn {
    Bank,
    Year,
    Revenue,
    NetIncome,
    Assets,
    Equity,
    Deposits,
    Loans,
    SharePrice,
    Dividends,
}

impl InputColumn {
    /// All input columns in file order
    pub const ALL: [InputColumn; 10] = [
        InputColumn::Bank,
        InputColumn::Year,
        InputColumn::Revenue,
        InputColumn::NetIncome,
        InputColumn::Assets,
        InputColumn::Equity,
        InputColumn::Deposits,
        InputColumn::Loans,
        InputColumn::SharePrice,
        InputColumn::Dividends,
    ];

    /// Columns the cleaner coerces to numbers
    pub const NUMERIC: [InputColumn; 8] = [
        InputColumn::Revenue,
        InputColumn::NetIncome,
        InputColumn::Assets,
        InputColumn::Equity,
        InputColumn::Deposits,
        InputColumn::Loans,
        InputColumn::SharePrice,
        InputColumn::Dividends,
    ];

    /// Header text as it appears in the workbook
    pub fn header(&self) -> &'static str {
        match self {
            InputColumn::Bank => INDEX_COLUMN,
            InputColumn::Year => "Year",
            InputColumn::Revenue => "Revenue",
            InputColumn::NetIncome => "Net_Income",
            InputColumn::Assets => "Assets",
            InputColumn::Equity => "Equity",
            InputColumn::Deposits => "Deposits",
            InputColumn::Loans => "Loans",
            InputColumn::SharePrice => "SharePrice",
            InputColumn::Dividends => "Dividends",
        }
    }

    /// Whether the cleaner coerces this column to a number
    pub fn is_numeric(&self) -> bool {
        Self::NUMERIC.contains(self)
    }
}

/// Derived ratio columns, in summary sheet order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RatioColumn {
    Roa,
    Roe,
    NetProfitMargin,
    LoanToDeposit,
    DividendYield,
}

impl RatioColumn {
    pub const ALL: [RatioColumn; 5] = [
        RatioColumn::Roa,
        RatioColumn::Roe,
        RatioColumn::NetProfitMargin,
        RatioColumn::LoanToDeposit,
        RatioColumn::DividendYield,
    ];

    /// Header text in the summary sheet
    pub fn header(&self) -> &'static str {
        match self {
            RatioColumn::Roa => "ROA",
            RatioColumn::Roe => "ROE",
            RatioColumn::NetProfitMargin => "Net_Profit_Margin",
            RatioColumn::LoanToDeposit => "Loan_to_Deposit",
            RatioColumn::DividendYield => "Dividend_Yield",
        }
    }

    /// Numerator and denominator columns of the ratio
    pub fn operands(&self) -> (InputColumn, InputColumn) {
        match self {
            RatioColumn::Roa => (InputColumn::NetIncome, InputColumn::Assets),
            RatioColumn::Roe => (InputColumn::NetIncome, InputColumn::Equity),
            RatioColumn::NetProfitMargin => (InputColumn::NetIncome, InputColumn::Revenue),
            RatioColumn::LoanToDeposit => (InputColumn::Loans, InputColumn::Deposits),
            RatioColumn::DividendYield => (InputColumn::Dividends, InputColumn::SharePrice),
        }
    }
}

/// Resolved positions of the input columns within a header row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMap {
    positions: [usize; 10],
}

impl ColumnMap {
    /// Resolve every required column, failing on the first one that is absent
    ///
    /// Headers are compared after trimming surrounding whitespace. Extra
    /// columns are allowed and ignored.
    pub fn from_headers<S: AsRef<str>>(headers: &[S]) -> Result<Self> {
        let mut positions = [0usize; 10];
        for (slot, column) in positions.iter_mut().zip(InputColumn::ALL.iter()) {
            *slot = headers
                .iter()
                .position(|h| h.as_ref().trim() == column.header())
                .ok_or_else(|| Error::MissingColumn(column.header().to_string()))?;
        }
        Ok(ColumnMap { positions })
    }

    /// Position of `column` in the header row
    pub fn position(&self, column: InputColumn) -> usize {
        self.positions[column as usize]
    }

    /// Number of header cells a row needs to cover every required column
    pub fn min_width(&self) -> usize {
        self.positions.iter().max().map_or(0, |p| p + 1)
    }
}

/// Header row of the input dataset, in file order
pub fn input_headers() -> Vec<String> {
    InputColumn::ALL
        .iter()
        .map(|c| c.header().to_string())
        .collect()
}

/// Header row of the summary sheet: the index column then the five ratios
pub fn summary_headers() -> Vec<String> {
    std::iter::once(INDEX_COLUMN.to_string())
        .chain(RatioColumn::ALL.iter().map(|c| c.header().to_string()))
        .collect()
}
