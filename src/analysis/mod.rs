//! Analysis stages of the pipeline
//!
//! Each stage takes the previous stage's output by reference and returns a new
//! value:
//!
//! 1. [`clean`]: fill blanks and type the rows
//! 2. [`compute_ratios`]: five percentage ratios per row
//! 3. [`aggregate`]: per-bank means rounded to two decimals
//! 4. [`forecast_net_income`]: ARIMA forecast of net income

pub mod clean;
pub mod forecast;
pub mod ratios;
pub mod summary;

pub use clean::{clean, coerce_records, fill_missing, CleanedData};
pub use forecast::{forecast_net_income, ForecastConfig, ForecastScope, NetIncomeForecast};
pub use ratios::{compute_ratios, percentage, InvalidRatio, RatioRecord, RatioTable, RatioValue};
pub use summary::{aggregate, Summary, SummaryRow, SUMMARY_DECIMALS};
