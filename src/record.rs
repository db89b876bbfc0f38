//! Typed rows produced by the cleaner

use serde::Serialize;

use crate::na::NA;
use crate::schema::InputColumn;

/// One bank-year row of the input dataset after cleaning
#[derive(Debug, Clone, PartialEq)]
pub struct FinancialRecord {
    pub bank: String,
    pub year: i64,
    pub revenue: NA<f64>,
    pub net_income: NA<f64>,
    pub assets: NA<f64>,
    pub equity: NA<f64>,
    pub deposits: NA<f64>,
    pub loans: NA<f64>,
    pub share_price: NA<f64>,
    pub dividends: NA<f64>,
}

impl FinancialRecord {
    /// Value of a numeric column; `Bank` and `Year` are never numeric here
    pub fn numeric(&self, column: InputColumn) -> NA<f64> {
        match column {
            InputColumn::Revenue => self.revenue,
            InputColumn::NetIncome => self.net_income,
            InputColumn::Assets => self.assets,
            InputColumn::Equity => self.equity,
            InputColumn::Deposits => self.deposits,
            InputColumn::Loans => self.loans,
            InputColumn::SharePrice => self.share_price,
            InputColumn::Dividends => self.dividends,
            InputColumn::Bank | InputColumn::Year => NA::NA,
        }
    }

    fn numeric_mut(&mut self, column: InputColumn) -> Option<&mut NA<f64>> {
        match column {
            InputColumn::Revenue => Some(&mut self.revenue),
            InputColumn::NetIncome => Some(&mut self.net_income),
            InputColumn::Assets => Some(&mut self.assets),
            InputColumn::Equity => Some(&mut self.equity),
            InputColumn::Deposits => Some(&mut self.deposits),
            InputColumn::Loans => Some(&mut self.loans),
            InputColumn::SharePrice => Some(&mut self.share_price),
            InputColumn::Dividends => Some(&mut self.dividends),
            InputColumn::Bank | InputColumn::Year => None,
        }
    }

    /// Copy of the record with one numeric column replaced
    pub fn with_numeric(mut self, column: InputColumn, value: NA<f64>) -> Self {
        if let Some(slot) = self.numeric_mut(column) {
            *slot = value;
        }
        self
    }
}

/// Builder used by the cleaner and by tests
#[derive(Debug, Clone)]
pub struct RecordBuilder {
    record: FinancialRecord,
}

impl RecordBuilder {
    pub fn new(bank: impl Into<String>, year: i64) -> Self {
        RecordBuilder {
            record: FinancialRecord {
                bank: bank.into(),
                year,
                revenue: NA::NA,
                net_income: NA::NA,
                assets: NA::NA,
                equity: NA::NA,
                deposits: NA::NA,
                loans: NA::NA,
                share_price: NA::NA,
                dividends: NA::NA,
            },
        }
    }

    pub fn set(mut self, column: InputColumn, value: impl Into<NA<f64>>) -> Self {
        self.record = self.record.with_numeric(column, value.into());
        self
    }

    pub fn build(self) -> FinancialRecord {
        self.record
    }
}

/// Problem found in a specific row while cleaning or computing ratios
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DataWarning {
    /// 1-based data row (header excluded)
    pub row: usize,
    pub bank: String,
    pub column: String,
    pub kind: WarningKind,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "detail", rename_all = "snake_case")]
pub enum WarningKind {
    /// Cell text could not be read as a number and was left missing
    UnparseableNumber(String),
    /// Ratio could not be computed
    InvalidRatio(String),
}

impl std::fmt::Display for DataWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.kind {
            WarningKind::UnparseableNumber(raw) => write!(
                f,
                "row {} ({}): {} value '{}' is not numeric, left missing",
                self.row, self.bank, self.column, raw
            ),
            WarningKind::InvalidRatio(reason) => write!(
                f,
                "row {} ({}): {} is invalid ({})",
                self.row, self.bank, self.column, reason
            ),
        }
    }
}
