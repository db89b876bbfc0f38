//! Time series forecasting
//!
//! A forecaster is fitted once on a plain series of observations and then
//! produces point forecasts for the periods after the last observation.

pub mod arima;

use serde::{Deserialize, Serialize};

use crate::error::Result;

pub use arima::{ArimaForecaster, ArimaOrder};

/// Goodness-of-fit statistics of a fitted model
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ForecastMetrics {
    pub log_likelihood: Option<f64>,
    pub aic: Option<f64>,
    pub bic: Option<f64>,
    /// Standard deviation of the in-sample residuals
    pub residual_std: Option<f64>,
}

/// Point forecasts with the fitted model's statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastResult {
    /// One value per forecast period, on the scale of the input series
    pub values: Vec<f64>,
    /// Name of the model that produced the forecast
    pub method: String,
    pub metrics: ForecastMetrics,
}

/// A model that can be fitted to a series and extrapolated
pub trait Forecaster {
    /// Fit the model to `values`, replacing any previous fit
    fn fit(&mut self, values: &[f64]) -> Result<()>;

    /// Forecast `periods` steps past the end of the fitted series
    fn forecast(&self, periods: usize) -> Result<ForecastResult>;

    /// Model name, e.g. `ARIMA(1,1,1)`
    fn name(&self) -> String;
}
