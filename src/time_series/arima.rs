//! ARIMA(p,d,q) forecaster
//!
//! The series is differenced `d` times, AR coefficients are estimated from the
//! Yule-Walker equations (Levinson-Durbin recursion) and MA coefficients from
//! the autocorrelation of the AR residuals. Forecasts are produced recursively
//! on the differenced scale with future shocks set to zero, then integrated
//! back to the scale of the input.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::stats;
use crate::time_series::{ForecastMetrics, ForecastResult, Forecaster};

/// MA coefficients are clamped to this magnitude to keep the model invertible
const MA_BOUND: f64 = 0.99;

/// Second moments below this are treated as an all-zero series
const EPSILON: f64 = 1e-10;

/// Orders of an ARIMA model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArimaOrder {
    /// Autoregressive order
    pub p: usize,
    /// Differencing order
    pub d: usize,
    /// Moving-average order
    pub q: usize,
}

impl ArimaOrder {
    pub fn new(p: usize, d: usize, q: usize) -> Self {
        ArimaOrder { p, d, q }
    }

    /// Shortest series the model can be fitted to
    pub fn min_observations(&self) -> usize {
        self.p + self.d + self.q + 1
    }
}

impl Default for ArimaOrder {
    fn default() -> Self {
        ArimaOrder::new(1, 1, 1)
    }
}

impl fmt::Display for ArimaOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ARIMA({},{},{})", self.p, self.d, self.q)
    }
}

/// State of a fitted model
#[derive(Debug, Clone)]
struct FittedArima {
    ar_params: Vec<f64>,
    ma_params: Vec<f64>,
    /// Series after differencing
    differenced: Vec<f64>,
    /// In-sample residuals on the differenced scale
    residuals: Vec<f64>,
    /// Last observation of each differencing level, outermost first
    tails: Vec<f64>,
    residual_std: f64,
    log_likelihood: f64,
}

/// Non-seasonal ARIMA model
#[derive(Debug, Clone)]
pub struct ArimaForecaster {
    order: ArimaOrder,
    fitted: Option<FittedArima>,
}

impl ArimaForecaster {
    pub fn new(order: ArimaOrder) -> Self {
        ArimaForecaster {
            order,
            fitted: None,
        }
    }

    pub fn arima(p: usize, d: usize, q: usize) -> Self {
        Self::new(ArimaOrder::new(p, d, q))
    }

    pub fn order(&self) -> ArimaOrder {
        self.order
    }

    pub fn is_fitted(&self) -> bool {
        self.fitted.is_some()
    }

    pub fn ar_params(&self) -> Option<&[f64]> {
        self.fitted.as_ref().map(|f| f.ar_params.as_slice())
    }

    pub fn ma_params(&self) -> Option<&[f64]> {
        self.fitted.as_ref().map(|f| f.ma_params.as_slice())
    }

    pub fn log_likelihood(&self) -> Option<f64> {
        self.fitted.as_ref().map(|f| f.log_likelihood)
    }

    /// Number of estimated parameters, the residual variance included
    fn n_params(&self) -> usize {
        self.order.p + self.order.q + 1
    }

    pub fn aic(&self) -> Option<f64> {
        self.log_likelihood()
            .map(|ll| -2.0 * ll + 2.0 * self.n_params() as f64)
    }

    pub fn bic(&self) -> Option<f64> {
        let fitted = self.fitted.as_ref()?;
        let n_obs = fitted.differenced.len() as f64;
        Some(-2.0 * fitted.log_likelihood + self.n_params() as f64 * n_obs.ln())
    }

    fn metrics(&self) -> ForecastMetrics {
        ForecastMetrics {
            log_likelihood: self.log_likelihood(),
            aic: self.aic(),
            bic: self.bic(),
            residual_std: self.fitted.as_ref().map(|f| f.residual_std),
        }
    }
}

impl Forecaster for ArimaForecaster {
    fn fit(&mut self, values: &[f64]) -> Result<()> {
        if values.is_empty() {
            return Err(Error::Forecast("cannot fit a model to an empty series".to_string()));
        }
        let min_len = self.order.min_observations();
        if values.len() < min_len {
            return Err(Error::Forecast(format!(
                "series too short for {}: need at least {} observations, got {}",
                self.order,
                min_len,
                values.len()
            )));
        }
        if let Some(pos) = values.iter().position(|v| !v.is_finite()) {
            return Err(Error::Forecast(format!(
                "series contains a missing or non-finite value at position {}",
                pos + 1
            )));
        }

        let mut working = values.to_vec();
        let mut tails = Vec::with_capacity(self.order.d);
        for _ in 0..self.order.d {
            if let Some(&last) = working.last() {
                tails.push(last);
            }
            working = difference(&working);
        }

        let ar_params = estimate_ar_params(&working, self.order.p);
        let ar_residuals: Vec<f64> = (0..working.len())
            .map(|i| working[i] - ar_component(&ar_params, &working[..i]))
            .collect();
        let ma_params = estimate_ma_params(&ar_residuals, self.order.q);

        let mut residuals: Vec<f64> = Vec::with_capacity(working.len());
        for i in 0..working.len() {
            let prediction =
                ar_component(&ar_params, &working[..i]) + ma_component(&ma_params, &residuals);
            residuals.push(working[i] - prediction);
        }

        let variance = residuals.iter().map(|r| r * r).sum::<f64>() / residuals.len() as f64;
        let log_likelihood = gaussian_log_likelihood(&residuals, variance);

        log::debug!(
            "{} fitted on {} observations: ar={:?} ma={:?} sigma={:.4}",
            self.order,
            values.len(),
            ar_params,
            ma_params,
            variance.sqrt()
        );

        self.fitted = Some(FittedArima {
            ar_params,
            ma_params,
            differenced: working,
            residuals,
            tails,
            residual_std: variance.sqrt(),
            log_likelihood,
        });
        Ok(())
    }

    fn forecast(&self, periods: usize) -> Result<ForecastResult> {
        let fitted = self
            .fitted
            .as_ref()
            .ok_or_else(|| Error::InvalidOperation("Model not fitted".to_string()))?;

        let mut extended_series = fitted.differenced.clone();
        let mut extended_residuals = fitted.residuals.clone();
        let mut forecasts = Vec::with_capacity(periods);

        for _ in 0..periods {
            let forecast = ar_component(&fitted.ar_params, &extended_series)
                + ma_component(&fitted.ma_params, &extended_residuals);
            forecasts.push(forecast);
            extended_series.push(forecast);
            // Expected future shock
            extended_residuals.push(0.0);
        }

        let values = integrate(&forecasts, &fitted.tails);
        if values.iter().any(|v| !v.is_finite()) {
            return Err(Error::Forecast(format!(
                "{} produced a non-finite forecast",
                self.order
            )));
        }

        Ok(ForecastResult {
            values,
            method: self.name(),
            metrics: self.metrics(),
        })
    }

    fn name(&self) -> String {
        self.order.to_string()
    }
}

/// First difference of a series
fn difference(values: &[f64]) -> Vec<f64> {
    values.windows(2).map(|w| w[1] - w[0]).collect()
}

/// Undo `tails.len()` levels of differencing, innermost level first
fn integrate(forecasts: &[f64], tails: &[f64]) -> Vec<f64> {
    let mut result = forecasts.to_vec();
    for &last in tails.iter().rev() {
        let mut running = last;
        for value in result.iter_mut() {
            running += *value;
            *value = running;
        }
    }
    result
}

/// AR prediction for the observation following `history`
fn ar_component(params: &[f64], history: &[f64]) -> f64 {
    params
        .iter()
        .zip(history.iter().rev())
        .map(|(param, value)| param * value)
        .sum()
}

/// MA contribution of the most recent residuals
fn ma_component(params: &[f64], residuals: &[f64]) -> f64 {
    params
        .iter()
        .zip(residuals.iter().rev())
        .map(|(param, residual)| param * residual)
        .sum()
}

/// Autocorrelations about zero for lags `0..=max_lag`, `None` for an all-zero series
///
/// The model has no constant term, so the coefficients must describe the raw
/// differenced values the recursion is applied to rather than their deviations
/// from the mean.
fn autocorrelations(values: &[f64], max_lag: usize) -> Option<Vec<f64>> {
    let n = values.len();
    let gamma0 = stats::mean_square(values)?;
    if gamma0 < EPSILON {
        return None;
    }

    let acf = (0..=max_lag)
        .map(|lag| {
            let cov: f64 = values
                .iter()
                .take(n.saturating_sub(lag))
                .zip(values.iter().skip(lag))
                .map(|(a, b)| a * b)
                .sum::<f64>()
                / n as f64;
            cov / gamma0
        })
        .collect();
    Some(acf)
}

/// Yule-Walker estimates via the Levinson-Durbin recursion
fn estimate_ar_params(values: &[f64], order: usize) -> Vec<f64> {
    if order == 0 {
        return vec![];
    }
    if values.len() < order + 1 {
        return vec![0.0; order];
    }
    let autocorr = match autocorrelations(values, order) {
        Some(acf) => acf,
        None => return vec![0.0; order],
    };

    let mut phi = vec![vec![0.0; order]; order];
    phi[0][0] = autocorr[1];

    for k in 1..order {
        let mut num = autocorr[k + 1];
        let mut den = 1.0;
        for j in 0..k {
            num -= phi[k - 1][j] * autocorr[k - j];
            den -= phi[k - 1][j] * autocorr[j + 1];
        }

        let partial = if den.abs() < EPSILON { 0.0 } else { num / den };
        phi[k][k] = partial;
        for j in 0..k {
            phi[k][j] = phi[k - 1][j] - partial * phi[k - 1][k - 1 - j];
        }
    }

    phi[order - 1].clone()
}

/// MA coefficients from the residual autocorrelation
fn estimate_ma_params(residuals: &[f64], order: usize) -> Vec<f64> {
    if order == 0 {
        return vec![];
    }
    if residuals.len() < order + 1 {
        return vec![0.0; order];
    }
    match autocorrelations(residuals, order) {
        Some(acf) => acf[1..]
            .iter()
            .map(|r| r.clamp(-MA_BOUND, MA_BOUND))
            .collect(),
        None => vec![0.0; order],
    }
}

fn gaussian_log_likelihood(residuals: &[f64], variance: f64) -> f64 {
    if variance <= 0.0 {
        return f64::NEG_INFINITY;
    }
    let n = residuals.len() as f64;
    let sum_sq: f64 = residuals.iter().map(|r| r * r).sum();
    -0.5 * n * (2.0 * std::f64::consts::PI).ln() - 0.5 * n * variance.ln() - sum_sq / (2.0 * variance)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noisy_trend(n: usize) -> Vec<f64> {
        (0..n)
            .map(|i| 100.0 + 5.0 * i as f64 + 3.0 * (i as f64 * 0.7).sin())
            .collect()
    }

    #[test]
    fn test_increasing_series_gives_finite_forecasts() {
        let mut model = ArimaForecaster::new(ArimaOrder::default());
        model.fit(&[100.0, 110.0, 121.0, 131.0, 142.0, 152.0]).unwrap();

        let result = model.forecast(3).unwrap();
        assert_eq!(result.values.len(), 3);
        assert!(result.values.iter().all(|v| v.is_finite()));
        assert!(result.values[0] > 152.0, "{:?}", result.values);
        assert!(model.ar_params().unwrap()[0] > 0.0);
        assert_eq!(result.method, "ARIMA(1,1,1)");
    }

    #[test]
    fn test_linear_series_keeps_rising() {
        let series: Vec<f64> = (0..6).map(|i| 1100.0 + 100.0 * i as f64).collect();
        let mut model = ArimaForecaster::arima(1, 1, 1);
        model.fit(&series).unwrap();

        let values = model.forecast(3).unwrap().values;
        assert_eq!(values.len(), 3);
        assert!(values[0] > 1600.0, "{:?}", values);
        assert!(values.windows(2).all(|w| w[1] > w[0]), "{:?}", values);
    }

    #[test]
    fn test_trend_is_followed() {
        let series = noisy_trend(40);
        let last = series[series.len() - 1];
        let mut model = ArimaForecaster::arima(1, 1, 1);
        model.fit(&series).unwrap();

        let result = model.forecast(3).unwrap();
        assert_eq!(result.values.len(), 3);
        for value in &result.values {
            assert!(*value >= last, "{} fell below {}", value, last);
            assert!(*value - last < 50.0, "{} drifted from {}", value, last);
        }
        assert!(result.metrics.aic.unwrap().is_finite());
        assert!(result.metrics.bic.unwrap().is_finite());
    }

    #[test]
    fn test_second_order_integration() {
        // Second differences of t^2 are constant
        let series: Vec<f64> = (1..=10).map(|t| (t * t) as f64).collect();
        let mut model = ArimaForecaster::arima(0, 2, 0);
        model.fit(&series).unwrap();

        assert_eq!(model.forecast(3).unwrap().values, vec![119.0, 138.0, 157.0]);
    }

    #[test]
    fn test_ar_coefficient_of_persistent_series() {
        let values: Vec<f64> = (0..200).map(|i| (i as f64 * 0.05).sin()).collect();
        let params = estimate_ar_params(&values, 1);
        assert!(params[0] > 0.9);
    }

    #[test]
    fn test_ma_params_are_clamped() {
        let params = estimate_ma_params(&[1.0, -1.0, 1.0, -1.0, 1.0, -1.0], 1);
        assert!(params[0] >= -MA_BOUND && params[0] <= MA_BOUND);
    }

    #[test]
    fn test_too_short_series_is_rejected() {
        let mut model = ArimaForecaster::arima(1, 1, 1);
        let err = model.fit(&[1.0, 2.0, 3.0]).unwrap_err();
        assert!(matches!(err, Error::Forecast(_)));
        assert!(err.to_string().contains("at least 4"));
    }

    #[test]
    fn test_nan_is_rejected() {
        let mut model = ArimaForecaster::arima(1, 1, 1);
        assert!(matches!(
            model.fit(&[1.0, 2.0, f64::NAN, 4.0, 5.0]),
            Err(Error::Forecast(_))
        ));
    }

    #[test]
    fn test_empty_series_is_rejected() {
        let mut model = ArimaForecaster::arima(1, 1, 1);
        assert!(matches!(model.fit(&[]), Err(Error::Forecast(_))));
    }

    #[test]
    fn test_forecast_requires_fit() {
        let model = ArimaForecaster::arima(1, 1, 1);
        assert!(matches!(model.forecast(3), Err(Error::InvalidOperation(_))));
    }
}
