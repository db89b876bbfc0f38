//! Chart descriptions and the renderers that draw them
//!
//! Charts are described by [`ChartSpec`] values built from the analysis
//! results, independent of any drawing backend. A [`ChartRenderer`] turns a
//! chart description into something visible:
//!
//! - [`TerminalRenderer`] draws Unicode/ASCII charts to a writer
//! - [`FileRenderer`] exports PNG or SVG files through plotters (feature
//!   `visualization`)

pub mod ascii;
#[cfg(feature = "visualization")]
pub mod plotters_ext;

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::analysis::Summary;
use crate::error::Result;
use crate::record::FinancialRecord;
use crate::schema::{InputColumn, RatioColumn};

pub use self::ascii::{Chart, ChartConfig, ChartStyle, TerminalRenderer};
#[cfg(feature = "visualization")]
pub use self::plotters_ext::{FileRenderer, PlotSettings};

pub const ROE_CHART_TITLE: &str = "Average ROE by Dubai Bank";
pub const NET_INCOME_CHART_TITLE: &str = "Net Income Trend";
pub const SHARE_PRICE_CHART_TITLE: &str = "Bank Share Price Trends";

/// One labelled series of (x, y) points
#[derive(Debug, Clone, PartialEq)]
pub struct DataSeries {
    pub label: String,
    pub points: Vec<(f64, f64)>,
}

/// Horizontal bars, one per category
#[derive(Debug, Clone, PartialEq)]
pub struct BarChartSpec {
    pub title: String,
    /// Label of the value axis
    pub x_label: String,
    /// Label of the category axis
    pub y_label: String,
    pub bars: Vec<(String, f64)>,
}

/// Several lines sharing one pair of axes
#[derive(Debug, Clone, PartialEq)]
pub struct LineChartSpec {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub series: Vec<DataSeries>,
    /// Mark every data point
    pub markers: bool,
}

/// Backend-independent chart description
#[derive(Debug, Clone, PartialEq)]
pub enum ChartSpec {
    Bar(BarChartSpec),
    Line(LineChartSpec),
}

impl ChartSpec {
    pub fn title(&self) -> &str {
        match self {
            ChartSpec::Bar(spec) => &spec.title,
            ChartSpec::Line(spec) => &spec.title,
        }
    }

    /// Whether there is nothing to draw
    pub fn is_empty(&self) -> bool {
        match self {
            ChartSpec::Bar(spec) => spec.bars.is_empty(),
            ChartSpec::Line(spec) => spec.series.iter().all(|s| s.points.is_empty()),
        }
    }
}

/// Image format for exported charts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputType {
    #[default]
    Png,
    Svg,
}

impl OutputType {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputType::Png => "png",
            OutputType::Svg => "svg",
        }
    }
}

/// What a renderer produced for one chart
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RenderArtifact {
    /// Drawn to a display
    Displayed { title: String },
    /// Written to a file
    File { title: String, path: PathBuf },
}

/// Something that can draw a chart
pub trait ChartRenderer {
    fn render(&mut self, chart: &ChartSpec) -> Result<RenderArtifact>;
}

/// Mean ROE per bank as horizontal bars; banks without a valid mean are left out
pub fn roe_bar_chart(summary: &Summary) -> ChartSpec {
    let bars = summary
        .rows()
        .iter()
        .filter_map(|row| {
            row.get(RatioColumn::Roe)
                .value()
                .map(|roe| (row.bank.clone(), roe))
        })
        .collect();

    ChartSpec::Bar(BarChartSpec {
        title: ROE_CHART_TITLE.to_string(),
        x_label: RatioColumn::Roe.header().to_string(),
        y_label: InputColumn::Bank.header().to_string(),
        bars,
    })
}

/// Net income against year, one marked line per bank
pub fn net_income_trend(records: &[FinancialRecord]) -> ChartSpec {
    ChartSpec::Line(LineChartSpec {
        title: NET_INCOME_CHART_TITLE.to_string(),
        x_label: InputColumn::Year.header().to_string(),
        y_label: "Net Income (AED Millions)".to_string(),
        series: series_by_bank(records, InputColumn::NetIncome),
        markers: true,
    })
}

/// Share price against year, one line per bank
pub fn share_price_trend(records: &[FinancialRecord]) -> ChartSpec {
    ChartSpec::Line(LineChartSpec {
        title: SHARE_PRICE_CHART_TITLE.to_string(),
        x_label: InputColumn::Year.header().to_string(),
        y_label: InputColumn::SharePrice.header().to_string(),
        series: series_by_bank(records, InputColumn::SharePrice),
        markers: false,
    })
}

/// The three charts of a run, in display order
pub fn standard_charts(summary: &Summary, records: &[FinancialRecord]) -> Vec<ChartSpec> {
    vec![
        roe_bar_chart(summary),
        net_income_trend(records),
        share_price_trend(records),
    ]
}

/// (year, value) points per bank, banks in first-seen order; missing values are skipped
fn series_by_bank(records: &[FinancialRecord], column: InputColumn) -> Vec<DataSeries> {
    let mut series: Vec<DataSeries> = Vec::new();
    for record in records {
        let idx = match series.iter().position(|s| s.label == record.bank) {
            Some(idx) => idx,
            None => {
                series.push(DataSeries {
                    label: record.bank.clone(),
                    points: Vec::new(),
                });
                series.len() - 1
            }
        };
        if let Some(value) = record.numeric(column).get() {
            series[idx].points.push((record.year as f64, value));
        }
    }
    series
}

/// File-name friendly form of a chart title
pub fn slug(title: &str) -> String {
    let mut out = String::with_capacity(title.len());
    for c in title.chars() {
        if c.is_ascii_alphanumeric() {
            out.push(c.to_ascii_lowercase());
        } else if !out.ends_with('_') && !out.is_empty() {
            out.push('_');
        }
    }
    while out.ends_with('_') {
        out.pop();
    }
    if out.is_empty() {
        out.push_str("chart");
    }
    out
}
