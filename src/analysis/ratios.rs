//! Per-row financial ratios

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::na::NA;
use crate::record::{DataWarning, FinancialRecord, WarningKind};
use crate::schema::RatioColumn;

/// Why a ratio has no usable value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvalidRatio {
    /// The denominator was zero
    DivisionByZero,
    /// An operand was missing after cleaning
    MissingInput,
    /// The quotient was infinite or NaN
    NonFinite,
}

impl fmt::Display for InvalidRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            InvalidRatio::DivisionByZero => "division by zero",
            InvalidRatio::MissingInput => "missing input",
            InvalidRatio::NonFinite => "non-finite result",
        };
        write!(f, "{}", text)
    }
}

/// A percentage ratio, or the reason it could not be computed
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RatioValue {
    Value(f64),
    Invalid(InvalidRatio),
}

impl RatioValue {
    pub fn value(&self) -> Option<f64> {
        match self {
            RatioValue::Value(v) => Some(*v),
            RatioValue::Invalid(_) => None,
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, RatioValue::Value(_))
    }
}

impl fmt::Display for RatioValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RatioValue::Value(v) => write!(f, "{:.2}", v),
            RatioValue::Invalid(_) => write!(f, "invalid"),
        }
    }
}

/// `numerator / denominator × 100` without ever producing inf or NaN
pub fn percentage(numerator: NA<f64>, denominator: NA<f64>) -> RatioValue {
    match (numerator, denominator) {
        (NA::Value(_), NA::Value(d)) if d == 0.0 => RatioValue::Invalid(InvalidRatio::DivisionByZero),
        (NA::Value(n), NA::Value(d)) => {
            let ratio = n / d * 100.0;
            if ratio.is_finite() {
                RatioValue::Value(ratio)
            } else {
                RatioValue::Invalid(InvalidRatio::NonFinite)
            }
        }
        _ => RatioValue::Invalid(InvalidRatio::MissingInput),
    }
}

/// Five ratios for one bank-year row
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RatioRecord {
    pub bank: String,
    pub year: i64,
    pub roa: RatioValue,
    pub roe: RatioValue,
    pub net_profit_margin: RatioValue,
    pub loan_to_deposit: RatioValue,
    pub dividend_yield: RatioValue,
}

impl RatioRecord {
    /// Compute every ratio for `record`
    pub fn from_record(record: &FinancialRecord) -> Self {
        let ratio = |column: RatioColumn| {
            let (num, den) = column.operands();
            percentage(record.numeric(num), record.numeric(den))
        };

        RatioRecord {
            bank: record.bank.clone(),
            year: record.year,
            roa: ratio(RatioColumn::Roa),
            roe: ratio(RatioColumn::Roe),
            net_profit_margin: ratio(RatioColumn::NetProfitMargin),
            loan_to_deposit: ratio(RatioColumn::LoanToDeposit),
            dividend_yield: ratio(RatioColumn::DividendYield),
        }
    }

    pub fn get(&self, column: RatioColumn) -> RatioValue {
        match column {
            RatioColumn::Roa => self.roa,
            RatioColumn::Roe => self.roe,
            RatioColumn::NetProfitMargin => self.net_profit_margin,
            RatioColumn::LoanToDeposit => self.loan_to_deposit,
            RatioColumn::DividendYield => self.dividend_yield,
        }
    }
}

/// Output of the ratio stage
#[derive(Debug, Clone)]
pub struct RatioTable {
    pub records: Vec<RatioRecord>,
    pub warnings: Vec<DataWarning>,
}

/// Compute ratios for every row; invalid ratios are flagged, never fatal
pub fn compute_ratios(records: &[FinancialRecord]) -> RatioTable {
    let mut warnings = Vec::new();
    let ratios: Vec<RatioRecord> = records
        .iter()
        .enumerate()
        .map(|(i, record)| {
            let ratios = RatioRecord::from_record(record);
            for column in RatioColumn::ALL {
                if let RatioValue::Invalid(reason) = ratios.get(column) {
                    log::warn!(
                        "Row {} ({} {}): {} is invalid ({})",
                        i + 1,
                        record.bank,
                        record.year,
                        column.header(),
                        reason
                    );
                    warnings.push(DataWarning {
                        row: i + 1,
                        bank: record.bank.clone(),
                        column: column.header().to_string(),
                        kind: WarningKind::InvalidRatio(reason.to_string()),
                    });
                }
            }
            ratios
        })
        .collect();

    RatioTable {
        records: ratios,
        warnings,
    }
}
