//! Net income forecast

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::record::FinancialRecord;
use crate::time_series::{ArimaForecaster, ArimaOrder, ForecastMetrics, Forecaster};

/// Which rows feed the forecaster
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ForecastScope {
    /// Net income of every row in file order, all banks interleaved
    #[default]
    AllRows,
    /// Net income of the focus bank only
    Entity,
}

/// Forecast settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastConfig {
    /// Periods to forecast
    pub steps: usize,
    pub scope: ForecastScope,
    /// Bank whose own series is reported, and fitted under `ForecastScope::Entity`
    pub focus_bank: String,
    pub order: ArimaOrder,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        ForecastConfig {
            steps: 3,
            scope: ForecastScope::AllRows,
            focus_bank: "Emirates NBD".to_string(),
            order: ArimaOrder::default(),
        }
    }
}

/// Forecast values with the context they were produced in
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NetIncomeForecast {
    pub values: Vec<f64>,
    pub model: String,
    pub scope: ForecastScope,
    /// Length of the series the model was fitted on
    pub observations: usize,
    /// Length of the focus bank's own series
    pub focus_observations: usize,
    pub metrics: ForecastMetrics,
}

/// Fit the configured ARIMA model to net income and forecast `config.steps` periods
///
/// With the default scope the model sees every row in file order. The focus
/// bank's own series is still extracted and logged.
pub fn forecast_net_income(
    records: &[FinancialRecord],
    config: &ForecastConfig,
) -> Result<NetIncomeForecast> {
    let focus_rows = records
        .iter()
        .enumerate()
        .filter(|(_, r)| r.bank == config.focus_bank);
    let focus_count = focus_rows.clone().count();

    let series = match config.scope {
        ForecastScope::AllRows => {
            if focus_count == 0 {
                log::warn!("No rows for focus bank '{}'", config.focus_bank);
            } else {
                log::info!(
                    "Series for {} has {} observations but the model is fitted on all {} rows",
                    config.focus_bank,
                    focus_count,
                    records.len()
                );
            }
            net_income_series(records.iter().enumerate())?
        }
        ForecastScope::Entity => {
            if focus_count == 0 {
                return Err(Error::Forecast(format!(
                    "bank '{}' not found in the dataset",
                    config.focus_bank
                )));
            }
            net_income_series(focus_rows)?
        }
    };

    let mut model = ArimaForecaster::new(config.order);
    model.fit(&series)?;
    let result = model.forecast(config.steps)?;

    log::info!(
        "{} forecast on {} observations: {:?}",
        result.method,
        series.len(),
        result.values
    );

    Ok(NetIncomeForecast {
        values: result.values,
        model: result.method,
        scope: config.scope,
        observations: series.len(),
        focus_observations: focus_count,
        metrics: result.metrics,
    })
}

fn net_income_series<'a, I>(rows: I) -> Result<Vec<f64>>
where
    I: Iterator<Item = (usize, &'a FinancialRecord)>,
{
    rows.map(|(i, record)| {
        record.net_income.get().ok_or_else(|| {
            Error::Forecast(format!(
                "Net_Income is missing in row {} ({})",
                i + 1,
                record.bank
            ))
        })
    })
    .collect()
}
