mod common;

use std::path::Path;

use common::{write_bank_csv, TempTestDir, SAMPLE_ROWS};
use dubai_bank_analysis::io::read_summary;
use dubai_bank_analysis::pipeline::ForecastOutcome;
use dubai_bank_analysis::vis::{
    NET_INCOME_CHART_TITLE, ROE_CHART_TITLE, SHARE_PRICE_CHART_TITLE,
};
use dubai_bank_analysis::{
    AnalysisConfig, ArimaOrder, ChartMode, ChartRenderer, ChartSpec, Error, ForecastScope,
    Pipeline, RenderArtifact, Result, TerminalRenderer,
};

fn config_in(dir: &Path, input: &str, output: &str) -> AnalysisConfig {
    AnalysisConfig {
        input_path: dir.join(input),
        output_path: dir.join(output),
        report_path: Some(dir.join("report.json")),
        ..AnalysisConfig::default()
    }
}

struct FailingRenderer;

impl ChartRenderer for FailingRenderer {
    fn render(&mut self, chart: &ChartSpec) -> Result<RenderArtifact> {
        Err(Error::Visualization(format!("no display for '{}'", chart.title())))
    }
}

#[test]
fn test_run_creates_sample_and_writes_summary() {
    let dir = TempTestDir::new("pipeline_csv").unwrap();
    let config = config_in(dir.path(), "dubai_banks_data.csv", "summary.csv");
    let pipeline = Pipeline::new(config);

    let mut terminal = TerminalRenderer::new(Vec::new());
    let mut out = Vec::new();
    let report = pipeline.run(Some(&mut terminal), &mut out).unwrap();

    assert!(report.created_input);
    assert_eq!(report.rows, 6);
    assert!(report.warnings.is_empty());
    assert_eq!(
        report.summary.banks(),
        vec!["Dubai Islamic Bank", "Emirates NBD", "Mashreq"]
    );

    let values = report.forecast.values().unwrap();
    assert_eq!(values.len(), 3);
    assert!(values.iter().all(|v| v.is_finite()));

    let console = String::from_utf8(out).unwrap();
    assert!(console.contains("Emirates NBD"));
    assert!(console.contains("Net_Profit_Margin"));
    assert!(console.contains("Forecasted Net Income (next 3 years):"));

    let titles: Vec<RenderArtifact> = [ROE_CHART_TITLE, NET_INCOME_CHART_TITLE, SHARE_PRICE_CHART_TITLE]
        .iter()
        .map(|t| RenderArtifact::Displayed {
            title: t.to_string(),
        })
        .collect();
    assert_eq!(report.charts.artifacts, titles);
    assert!(report.charts.failures.is_empty());

    let charts = String::from_utf8(terminal.into_inner()).unwrap();
    assert!(charts.contains(ROE_CHART_TITLE));
    assert!(charts.contains("Dubai Islamic Bank"));
    assert!(charts.contains(SHARE_PRICE_CHART_TITLE));

    let written = read_summary(dir.join("summary.csv")).unwrap();
    assert_eq!(written.banks(), report.summary.banks());

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(dir.join("report.json")).unwrap()).unwrap();
    assert_eq!(json["rows"], 6);
    assert_eq!(json["forecast"]["forecast"]["values"].as_array().unwrap().len(), 3);
}

#[cfg(feature = "excel")]
#[test]
fn test_run_with_default_workbook_names() {
    let dir = TempTestDir::new("pipeline_xlsx").unwrap();
    let config = config_in(
        dir.path(),
        "dubai_banks_data.xlsx",
        "dubai_bank_analysis_summary.xlsx",
    );

    let mut out = Vec::new();
    let report = Pipeline::new(config).run(None, &mut out).unwrap();

    assert!(report.created_input);
    assert!(report.charts.artifacts.is_empty());
    assert!(dir.join("dubai_banks_data.xlsx").exists());

    let written = read_summary(dir.join("dubai_bank_analysis_summary.xlsx")).unwrap();
    assert_eq!(written.len(), 3);
}

#[test]
fn test_chart_failures_do_not_stop_the_run() {
    let dir = TempTestDir::new("pipeline_chart_failure").unwrap();
    let config = config_in(dir.path(), "banks.csv", "summary.csv");

    let mut renderer = FailingRenderer;
    let mut out = Vec::new();
    let report = Pipeline::new(config).run(Some(&mut renderer), &mut out).unwrap();

    assert_eq!(report.charts.failures.len(), 3);
    assert!(report.charts.artifacts.is_empty());
    assert!(dir.join("summary.csv").exists());
}

#[test]
fn test_forecast_failure_is_reported_and_summary_still_written() {
    let dir = TempTestDir::new("pipeline_short_series").unwrap();
    let input = dir.join("banks.csv");
    write_bank_csv(&input, &SAMPLE_ROWS[..2]);

    let config = config_in(dir.path(), "banks.csv", "summary.csv");
    let mut out = Vec::new();
    let report = Pipeline::new(config).run(None, &mut out).unwrap();

    match &report.forecast {
        ForecastOutcome::Failed { error } => assert!(error.contains("need at least")),
        other => panic!("expected a forecast failure, got {:?}", other),
    }
    let console = String::from_utf8(out).unwrap();
    assert!(console.contains("Forecast failed"));
    assert_eq!(read_summary(dir.join("summary.csv")).unwrap().len(), 2);
}

#[test]
fn test_entity_scope_too_short_is_recoverable() {
    let dir = TempTestDir::new("pipeline_entity_short").unwrap();
    let mut config = config_in(dir.path(), "banks.csv", "summary.csv");
    config.forecast.scope = ForecastScope::Entity;

    let mut out = Vec::new();
    let report = Pipeline::new(config).run(None, &mut out).unwrap();

    // Two Emirates NBD rows are too few for ARIMA(1,1,1)
    match &report.forecast {
        ForecastOutcome::Failed { error } => assert!(error.contains("got 2"), "{}", error),
        other => panic!("expected a forecast failure, got {:?}", other),
    }
    assert!(dir.join("summary.csv").exists());
}

#[test]
fn test_entity_scope_fits_focus_bank_only() {
    let dir = TempTestDir::new("pipeline_entity").unwrap();
    let mut config = config_in(dir.path(), "banks.csv", "summary.csv");
    config.forecast.scope = ForecastScope::Entity;
    config.forecast.order = ArimaOrder::new(0, 1, 0);

    let mut out = Vec::new();
    let report = Pipeline::new(config).run(None, &mut out).unwrap();

    match &report.forecast {
        ForecastOutcome::Forecast(forecast) => {
            assert_eq!(forecast.observations, 2);
            assert_eq!(forecast.model, "ARIMA(0,1,0)");
            // Random walk from the last Emirates NBD net income
            assert_eq!(forecast.values, vec![2100.0, 2100.0, 2100.0]);
        }
        other => panic!("expected a forecast, got {:?}", other),
    }
}

#[test]
fn test_missing_column_aborts() {
    let dir = TempTestDir::new("pipeline_missing_column").unwrap();
    common::write_csv(&dir.join("banks.csv"), &["Bank", "Year"], &[&["Mashreq", "2015"]]);
    let config = config_in(dir.path(), "banks.csv", "summary.csv");

    let mut out = Vec::new();
    let err = Pipeline::new(config).run(None, &mut out).unwrap_err();
    assert!(matches!(err, Error::MissingColumn(_)));
    assert!(!dir.join("summary.csv").exists());
}

#[test]
fn test_config_file_drives_the_run() {
    let dir = TempTestDir::new("pipeline_config").unwrap();
    let config_path = dir.join("analysis.toml");
    let mut config = config_in(dir.path(), "banks.csv", "summary.csv");
    config.charts.mode = ChartMode::Off;
    config.preview_rows = 2;
    config.save(&config_path).unwrap();

    let loaded = AnalysisConfig::load(&config_path).unwrap();
    assert_eq!(loaded, config);

    let mut out = Vec::new();
    let report = Pipeline::new(loaded).run(None, &mut out).unwrap();
    assert_eq!(report.rows, 6);
}
