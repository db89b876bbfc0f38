//! Per-bank aggregation of the ratio table

use std::fmt;

use serde::Serialize;

use crate::analysis::ratios::{InvalidRatio, RatioRecord, RatioValue};
use crate::dataframe::{format_table, Cell};
use crate::error::{Error, Result};
use crate::groupby::GroupBy;
use crate::schema::{summary_headers, RatioColumn, INDEX_COLUMN};
use crate::stats::round_to;

/// Decimal places kept in the summary
pub const SUMMARY_DECIMALS: i32 = 2;

/// Mean ratios for one bank
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryRow {
    pub bank: String,
    pub roa: RatioValue,
    pub roe: RatioValue,
    pub net_profit_margin: RatioValue,
    pub loan_to_deposit: RatioValue,
    pub dividend_yield: RatioValue,
    /// Invalid observations left out of the means, over all five ratios
    pub excluded: usize,
}

impl SummaryRow {
    pub fn get(&self, column: RatioColumn) -> RatioValue {
        match column {
            RatioColumn::Roa => self.roa,
            RatioColumn::Roe => self.roe,
            RatioColumn::NetProfitMargin => self.net_profit_margin,
            RatioColumn::LoanToDeposit => self.loan_to_deposit,
            RatioColumn::DividendYield => self.dividend_yield,
        }
    }

    fn set(&mut self, column: RatioColumn, value: RatioValue) {
        let slot = match column {
            RatioColumn::Roa => &mut self.roa,
            RatioColumn::Roe => &mut self.roe,
            RatioColumn::NetProfitMargin => &mut self.net_profit_margin,
            RatioColumn::LoanToDeposit => &mut self.loan_to_deposit,
            RatioColumn::DividendYield => &mut self.dividend_yield,
        };
        *slot = value;
    }

    fn empty(bank: String) -> Self {
        let missing = RatioValue::Invalid(InvalidRatio::MissingInput);
        SummaryRow {
            bank,
            roa: missing,
            roe: missing,
            net_profit_margin: missing,
            loan_to_deposit: missing,
            dividend_yield: missing,
            excluded: 0,
        }
    }
}

/// One row per distinct bank, sorted by bank name
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    rows: Vec<SummaryRow>,
}

impl Summary {
    pub fn new(rows: Vec<SummaryRow>) -> Self {
        Summary { rows }
    }

    pub fn rows(&self) -> &[SummaryRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, bank: &str) -> Option<&SummaryRow> {
        self.rows.iter().find(|r| r.bank == bank)
    }

    pub fn banks(&self) -> Vec<&str> {
        self.rows.iter().map(|r| r.bank.as_str()).collect()
    }

    /// Header and cells for the summary sheet; invalid means are blank
    pub fn to_cells(&self) -> (Vec<String>, Vec<Vec<Cell>>) {
        let rows = self
            .rows
            .iter()
            .map(|row| {
                std::iter::once(Cell::Text(row.bank.clone()))
                    .chain(RatioColumn::ALL.iter().map(|c| match row.get(*c) {
                        RatioValue::Value(v) => Cell::Number(v),
                        RatioValue::Invalid(_) => Cell::Empty,
                    }))
                    .collect()
            })
            .collect();
        (summary_headers(), rows)
    }

    /// Rebuild a summary from sheet cells written by [`Summary::to_cells`]
    pub fn from_cells(headers: &[String], rows: &[Vec<Cell>]) -> Result<Self> {
        let position = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim() == name)
                .ok_or_else(|| Error::MissingColumn(name.to_string()))
        };
        let bank_pos = position(INDEX_COLUMN)?;
        let ratio_pos = RatioColumn::ALL
            .iter()
            .map(|c| position(c.header()).map(|p| (*c, p)))
            .collect::<Result<Vec<_>>>()?;

        let mut summary_rows = Vec::with_capacity(rows.len());
        for row in rows {
            let bank = match row.get(bank_pos) {
                Some(Cell::Text(s)) => s.clone(),
                Some(Cell::Number(n)) => crate::dataframe::format_number(*n),
                _ => {
                    return Err(Error::InvalidValue(
                        "summary row without a bank name".to_string(),
                    ))
                }
            };
            let mut summary_row = SummaryRow::empty(bank);
            for (column, pos) in &ratio_pos {
                let value = match row.get(*pos).and_then(|c| c.to_f64()) {
                    Some(v) if v.is_finite() => RatioValue::Value(v),
                    _ => RatioValue::Invalid(InvalidRatio::MissingInput),
                };
                summary_row.set(*column, value);
            }
            summary_rows.push(summary_row);
        }
        Ok(Summary::new(summary_rows))
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows: Vec<Vec<String>> = self
            .rows
            .iter()
            .map(|row| {
                std::iter::once(row.bank.clone())
                    .chain(RatioColumn::ALL.iter().map(|c| row.get(*c).to_string()))
                    .collect()
            })
            .collect();
        write!(f, "{}", format_table(&summary_headers(), &rows))
    }
}

/// Group ratio rows by bank and average each ratio
///
/// Invalid observations are left out of the mean and counted in
/// `SummaryRow::excluded`; a ratio with no valid observation stays invalid.
pub fn aggregate(records: &[RatioRecord]) -> Summary {
    let groups = GroupBy::new(records, |r| r.bank.clone());
    let mut rows: Vec<SummaryRow> = groups.keys().cloned().map(SummaryRow::empty).collect();

    for column in RatioColumn::ALL {
        let means = groups.mean(|r| r.get(column).value());
        for row in rows.iter_mut() {
            if let Some(group_mean) = means.get(&row.bank) {
                row.excluded += group_mean.excluded;
                let value = match group_mean.mean {
                    Some(m) => RatioValue::Value(round_to(m, SUMMARY_DECIMALS)),
                    None => RatioValue::Invalid(InvalidRatio::MissingInput),
                };
                row.set(column, value);
            }
        }
    }

    for row in rows.iter().filter(|r| r.excluded > 0) {
        log::warn!(
            "{}: {} invalid ratio observations excluded from the means",
            row.bank,
            row.excluded
        );
    }
    log::info!("Aggregated {} rows into {} banks", records.len(), rows.len());

    Summary::new(rows)
}
