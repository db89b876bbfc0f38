//! End-to-end run: load, clean, ratios, summary, charts, forecast, write

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use serde::Serialize;

use crate::analysis::{
    aggregate, clean, compute_ratios, forecast_net_income, NetIncomeForecast, Summary,
};
use crate::config::{AnalysisConfig, ChartMode, ChartsConfig};
use crate::error::{Error, Result};
use crate::io;
use crate::loader::load_or_create;
use crate::record::DataWarning;
use crate::vis::{standard_charts, ChartRenderer, RenderArtifact, TerminalRenderer};

/// A chart that could not be drawn
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartFailure {
    pub title: String,
    pub error: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ChartsReport {
    pub artifacts: Vec<RenderArtifact>,
    pub failures: Vec<ChartFailure>,
}

/// Forecast values, or why there are none
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ForecastOutcome {
    Forecast(NetIncomeForecast),
    Failed { error: String },
}

impl ForecastOutcome {
    pub fn values(&self) -> Option<&[f64]> {
        match self {
            ForecastOutcome::Forecast(forecast) => Some(&forecast.values),
            ForecastOutcome::Failed { .. } => None,
        }
    }
}

/// Everything a run produced
#[derive(Debug, Clone, Serialize)]
pub struct PipelineReport {
    pub input_path: PathBuf,
    /// The sample dataset was written because the input did not exist
    pub created_input: bool,
    pub rows: usize,
    pub summary: Summary,
    pub warnings: Vec<DataWarning>,
    pub charts: ChartsReport,
    pub forecast: ForecastOutcome,
    pub output_path: PathBuf,
}

/// Runs every stage once with a fixed configuration
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    config: AnalysisConfig,
}

impl Pipeline {
    pub fn new(config: AnalysisConfig) -> Self {
        Pipeline { config }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Run the analysis, printing the console output to `out`
    ///
    /// Load, clean and write errors abort the run. Chart and forecast failures
    /// are logged, recorded in the report, and the run continues. Pass `None`
    /// as the renderer to skip charts.
    pub fn run<W: Write>(
        &self,
        renderer: Option<&mut dyn ChartRenderer>,
        out: &mut W,
    ) -> Result<PipelineReport> {
        let config = &self.config;

        let loaded = load_or_create(&config.input_path)?;
        writeln!(out, "{}", loaded.table.head(config.preview_rows))?;

        let cleaned = clean(&loaded.table)?;
        let ratios = compute_ratios(&cleaned.records);
        let summary = aggregate(&ratios.records);
        writeln!(out, "{}", summary)?;

        let mut warnings = cleaned.warnings;
        warnings.extend(ratios.warnings);
        if !warnings.is_empty() {
            log::warn!("{} data warnings, see the log above", warnings.len());
        }

        let mut charts = ChartsReport::default();
        match renderer {
            Some(renderer) => {
                for chart in standard_charts(&summary, &cleaned.records) {
                    match renderer.render(&chart) {
                        Ok(artifact) => charts.artifacts.push(artifact),
                        Err(e) => {
                            log::warn!("Could not render '{}': {}", chart.title(), e);
                            charts.failures.push(ChartFailure {
                                title: chart.title().to_string(),
                                error: e.to_string(),
                            });
                        }
                    }
                }
            }
            None => log::info!("Charts disabled"),
        }

        let forecast = match forecast_net_income(&cleaned.records, &config.forecast) {
            Ok(forecast) => {
                writeln!(
                    out,
                    "Forecasted Net Income (next {} years):",
                    forecast.values.len()
                )?;
                writeln!(out, "{}", format_values(&forecast.values))?;
                ForecastOutcome::Forecast(forecast)
            }
            Err(e) if !e.is_fatal() => {
                log::error!("{}", e);
                writeln!(out, "{}", e)?;
                ForecastOutcome::Failed {
                    error: e.to_string(),
                }
            }
            Err(e) => return Err(e),
        };

        io::write_summary(&config.output_path, &summary)?;

        let report = PipelineReport {
            input_path: loaded.path,
            created_input: loaded.created,
            rows: cleaned.records.len(),
            summary,
            warnings,
            charts,
            forecast,
            output_path: config.output_path.clone(),
        };

        if let Some(path) = &config.report_path {
            let file = File::create(path).map_err(|e| {
                Error::IoError(format!("cannot create {}: {}", path.display(), e))
            })?;
            serde_json::to_writer_pretty(BufWriter::new(file), &report)?;
            log::info!("Wrote run report to {}", path.display());
        }

        Ok(report)
    }
}

/// Renderer for the configured chart mode, `None` when charts are off
pub fn build_renderer(config: &ChartsConfig) -> Result<Option<Box<dyn ChartRenderer>>> {
    match config.mode {
        ChartMode::Off => Ok(None),
        ChartMode::Terminal => Ok(Some(Box::new(
            TerminalRenderer::stdout().with_style(config.style),
        ))),
        #[cfg(feature = "visualization")]
        ChartMode::File => {
            let settings = crate::vis::PlotSettings {
                width: config.width,
                height: config.height,
                output_type: config.format,
                ..Default::default()
            };
            Ok(Some(Box::new(crate::vis::FileRenderer::new(
                &config.output_dir,
                settings,
            ))))
        }
        #[cfg(not(feature = "visualization"))]
        ChartMode::File => Err(Error::Config(
            "charts.mode = \"file\" needs the visualization feature".to_string(),
        )),
    }
}

fn format_values(values: &[f64]) -> String {
    let items: Vec<String> = values.iter().map(|v| v.to_string()).collect();
    format!("[{}]", items.join(", "))
}
