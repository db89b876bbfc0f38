//! Text-based charts for terminal output
//!
//! Provides Unicode/ASCII bar and line charts with no external dependencies.
//! [`TerminalRenderer`] draws [`ChartSpec`]s with them.

mod charts;

use std::io::{self, Stdout, Write};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::vis::{ChartRenderer, ChartSpec, RenderArtifact};

pub use charts::{BarChart, BarChartConfig, LinePlotConfig, MultiLinePlot};

/// Chart rendering trait
pub trait Chart {
    /// Render the chart to a string
    fn render(&self) -> String;
}

/// Common chart configuration
#[derive(Debug, Clone)]
pub struct ChartConfig {
    /// Chart width in characters
    pub width: usize,
    /// Chart height in characters
    pub height: usize,
    /// Show axis labels
    pub show_labels: bool,
    /// Title for the chart
    pub title: Option<String>,
    /// X-axis label
    pub x_label: Option<String>,
    /// Y-axis label
    pub y_label: Option<String>,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: 60,
            height: 15,
            show_labels: true,
            title: None,
            x_label: None,
            y_label: None,
        }
    }
}

/// Chart style options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartStyle {
    /// Simple ASCII characters
    Ascii,
    /// Unicode block and geometric characters
    #[default]
    Unicode,
}

/// Draws charts as text to a writer
pub struct TerminalRenderer<W: Write> {
    writer: W,
    width: usize,
    height: usize,
    style: ChartStyle,
}

impl TerminalRenderer<Stdout> {
    /// Renderer writing to standard output
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(writer: W) -> Self {
        let defaults = ChartConfig::default();
        TerminalRenderer {
            writer,
            width: defaults.width,
            height: defaults.height,
            style: ChartStyle::default(),
        }
    }

    pub fn with_style(mut self, style: ChartStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_size(mut self, width: usize, height: usize) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Give back the writer, e.g. to inspect captured output
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn base_config(&self, title: &str, x_label: &str, y_label: &str) -> ChartConfig {
        ChartConfig {
            width: self.width,
            height: self.height,
            show_labels: true,
            title: Some(title.to_string()),
            x_label: Some(x_label.to_string()),
            y_label: Some(y_label.to_string()),
        }
    }

    /// Text for one chart
    pub fn draw(&self, chart: &ChartSpec) -> String {
        match chart {
            ChartSpec::Bar(spec) => {
                let label_width = spec
                    .bars
                    .iter()
                    .map(|(label, _)| label.chars().count())
                    .max()
                    .unwrap_or(0)
                    .max(4);
                let config = BarChartConfig {
                    base: self.base_config(&spec.title, &spec.x_label, &spec.y_label),
                    style: self.style,
                    show_values: true,
                    label_width,
                };
                BarChart::from_pairs(&spec.bars, config).render()
            }
            ChartSpec::Line(spec) => {
                let config = LinePlotConfig {
                    base: self.base_config(&spec.title, &spec.x_label, &spec.y_label),
                    style: self.style,
                    show_points: spec.markers,
                };
                MultiLinePlot::with_config(&spec.series, config).render()
            }
        }
    }
}

impl<W: Write> ChartRenderer for TerminalRenderer<W> {
    fn render(&mut self, chart: &ChartSpec) -> Result<RenderArtifact> {
        let text = self.draw(chart);
        writeln!(self.writer, "{}", text)
            .and_then(|_| self.writer.flush())
            .map_err(|e| {
                Error::Visualization(format!("cannot draw '{}': {}", chart.title(), e))
            })?;

        Ok(RenderArtifact::Displayed {
            title: chart.title().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vis::{BarChartSpec, DataSeries, LineChartSpec};

    fn line_chart() -> ChartSpec {
        ChartSpec::Line(LineChartSpec {
            title: "Net Income Trend".to_string(),
            x_label: "Year".to_string(),
            y_label: "Net Income (AED Millions)".to_string(),
            series: vec![
                DataSeries {
                    label: "Emirates NBD".to_string(),
                    points: vec![(2015.0, 2000.0), (2016.0, 2100.0)],
                },
                DataSeries {
                    label: "Mashreq".to_string(),
                    points: vec![(2015.0, 1200.0), (2016.0, 1300.0)],
                },
            ],
            markers: true,
        })
    }

    #[test]
    fn test_chart_config_default() {
        let config = ChartConfig::default();
        assert_eq!(config.width, 60);
        assert!(config.show_labels);
    }

    #[test]
    fn test_terminal_renderer_writes_titles_and_labels() {
        let mut renderer = TerminalRenderer::new(Vec::new());
        let bar = ChartSpec::Bar(BarChartSpec {
            title: "Average ROE by Dubai Bank".to_string(),
            x_label: "ROE".to_string(),
            y_label: "Bank".to_string(),
            bars: vec![
                ("Dubai Islamic Bank".to_string(), 25.45),
                ("Emirates NBD".to_string(), 28.87),
            ],
        });

        let artifact = renderer.render(&bar).unwrap();
        assert_eq!(
            artifact,
            RenderArtifact::Displayed {
                title: "Average ROE by Dubai Bank".to_string()
            }
        );
        renderer.render(&line_chart()).unwrap();

        let output = String::from_utf8(renderer.into_inner()).unwrap();
        assert!(output.contains("Average ROE by Dubai Bank"));
        assert!(output.contains("Dubai Islamic Bank"));
        assert!(output.contains("28.87"));
        assert!(output.contains("Net Income Trend"));
        assert!(output.contains("Mashreq"));
    }

    #[test]
    fn test_ascii_style_avoids_unicode() {
        let renderer = TerminalRenderer::new(Vec::new()).with_style(ChartStyle::Ascii);
        let text = renderer.draw(&line_chart());
        assert!(text.is_ascii());
    }
}
