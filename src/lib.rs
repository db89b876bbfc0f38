//! Financial ratio analysis of Dubai bank statements
//!
//! The crate loads a fixed-schema table of bank financials (creating a sample
//! file when none exists), cleans it, computes five percentage ratios per row,
//! averages them per bank, draws three charts, forecasts net income with an
//! ARIMA model and writes the per-bank summary back to a spreadsheet.
//!
//! Each stage is a plain function over the previous stage's output; see
//! [`pipeline::Pipeline`] for the whole run.

pub mod analysis;
pub mod config;
pub mod dataframe;
pub mod error;
pub mod groupby;
pub mod io;
pub mod loader;
pub mod na;
pub mod pipeline;
pub mod record;
pub mod sample;
pub mod schema;
pub mod stats;
pub mod time_series;
pub mod vis;

// Re-export commonly used types
pub use analysis::{
    aggregate, clean, compute_ratios, forecast_net_income, ForecastConfig, ForecastScope,
    NetIncomeForecast, RatioRecord, RatioValue, Summary, SummaryRow,
};
pub use config::{AnalysisConfig, ChartMode, ChartsConfig};
pub use dataframe::{Cell, RawTable};
pub use error::{Error, Result};
pub use groupby::GroupBy;
pub use loader::{load_or_create, LoadedData};
pub use na::NA;
pub use pipeline::{build_renderer, Pipeline, PipelineReport};
pub use record::{DataWarning, FinancialRecord};
pub use schema::{InputColumn, RatioColumn};
pub use time_series::{ArimaForecaster, ArimaOrder, Forecaster};
pub use vis::{ChartRenderer, ChartSpec, RenderArtifact, TerminalRenderer};

// Export version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
