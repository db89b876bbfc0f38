//! Chart implementations for text-based visualization

use super::{Chart, ChartConfig, ChartStyle};
use crate::vis::DataSeries;

/// Box-drawing pieces for a style
struct Glyphs {
    bar: char,
    vertical: char,
    horizontal: char,
    corner: char,
    segment: char,
    markers: &'static [char],
}

impl Glyphs {
    fn for_style(style: ChartStyle) -> Self {
        match style {
            ChartStyle::Ascii => Glyphs {
                bar: '#',
                vertical: '|',
                horizontal: '-',
                corner: '+',
                segment: '.',
                markers: &['o', '*', '+', 'x', '@', '%'],
            },
            ChartStyle::Unicode => Glyphs {
                bar: '█',
                vertical: '│',
                horizontal: '─',
                corner: '└',
                segment: '·',
                markers: &['●', '■', '▲', '◆', '★', '▼'],
            },
        }
    }
}

fn centered_title(output: &mut String, title: &Option<String>, width: usize) {
    if let Some(ref title) = title {
        output.push_str(&format!("{:^width$}\n\n", title, width = width));
    }
}

fn axis_value(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e9 {
        format!("{:.0}", value)
    } else {
        format!("{:.1}", value)
    }
}

// ============================================================================
// Bar Chart
// ============================================================================

/// Configuration for bar chart
#[derive(Debug, Clone)]
pub struct BarChartConfig {
    /// Base chart config
    pub base: ChartConfig,
    /// Chart style
    pub style: ChartStyle,
    /// Show values after bars
    pub show_values: bool,
    /// Max label width
    pub label_width: usize,
}

impl Default for BarChartConfig {
    fn default() -> Self {
        Self {
            base: ChartConfig::default(),
            style: ChartStyle::Unicode,
            show_values: true,
            label_width: 12,
        }
    }
}

/// Horizontal bar chart for categorical data
#[derive(Debug, Clone)]
pub struct BarChart {
    /// Labels for each bar
    labels: Vec<String>,
    /// Values for each bar
    values: Vec<f64>,
    /// Configuration
    config: BarChartConfig,
}

impl BarChart {
    /// Create a new bar chart
    pub fn new(labels: &[&str], values: &[f64]) -> Self {
        Self::with_config(labels, values, BarChartConfig::default())
    }

    /// Create with custom configuration
    pub fn with_config(labels: &[&str], values: &[f64], config: BarChartConfig) -> Self {
        Self {
            labels: labels.iter().map(|s| s.to_string()).collect(),
            values: values.to_vec(),
            config,
        }
    }

    /// Create from (label, value) pairs
    pub fn from_pairs(bars: &[(String, f64)], config: BarChartConfig) -> Self {
        Self {
            labels: bars.iter().map(|(l, _)| l.clone()).collect(),
            values: bars.iter().map(|(_, v)| *v).collect(),
            config,
        }
    }
}

impl Chart for BarChart {
    fn render(&self) -> String {
        let mut output = String::new();
        centered_title(&mut output, &self.config.base.title, self.config.base.width);

        if self.values.is_empty() {
            output.push_str("No data to display\n");
            return output;
        }

        let glyphs = Glyphs::for_style(self.config.style);
        let max_val = self
            .values
            .iter()
            .cloned()
            .fold(f64::NEG_INFINITY, f64::max);
        let bar_width = self
            .config
            .base
            .width
            .saturating_sub(self.config.label_width + 10)
            .max(10);

        if self.config.base.show_labels {
            if let Some(ref y_label) = self.config.base.y_label {
                output.push_str(&format!(
                    "{:>label_width$}\n",
                    y_label,
                    label_width = self.config.label_width
                ));
            }
        }

        for (label, &value) in self.labels.iter().zip(self.values.iter()) {
            // Negative values draw no bar
            let bar_len = if max_val > 0.0 {
                (value / max_val * bar_width as f64).round().max(0.0) as usize
            } else {
                0
            };

            let bar: String = std::iter::repeat(glyphs.bar).take(bar_len).collect();
            let truncated_label: String = label.chars().take(self.config.label_width).collect();

            output.push_str(&format!(
                "{:>label_width$} {}{:<bar_width$}",
                truncated_label,
                glyphs.vertical,
                bar,
                label_width = self.config.label_width,
                bar_width = bar_width
            ));
            if self.config.show_values {
                output.push_str(&format!(" {:.2}", value));
            }
            output.push('\n');
        }

        if self.config.base.show_labels {
            if let Some(ref x_label) = self.config.base.x_label {
                output.push_str(&format!(
                    "{:>pad$}{:^bar_width$}\n",
                    "",
                    x_label,
                    pad = self.config.label_width + 2,
                    bar_width = bar_width
                ));
            }
        }

        output
    }
}

// ============================================================================
// Multi-series line plot
// ============================================================================

/// Configuration for line plots
#[derive(Debug, Clone)]
pub struct LinePlotConfig {
    /// Base chart config
    pub base: ChartConfig,
    /// Chart style
    pub style: ChartStyle,
    /// Mark data points with a per-series symbol
    pub show_points: bool,
}

impl Default for LinePlotConfig {
    fn default() -> Self {
        Self {
            base: ChartConfig::default(),
            style: ChartStyle::Unicode,
            show_points: true,
        }
    }
}

/// Several (x, y) series on a shared grid, with a legend
#[derive(Debug, Clone)]
pub struct MultiLinePlot {
    series: Vec<DataSeries>,
    config: LinePlotConfig,
}

impl MultiLinePlot {
    pub fn new(series: &[DataSeries]) -> Self {
        Self::with_config(series, LinePlotConfig::default())
    }

    pub fn with_config(series: &[DataSeries], config: LinePlotConfig) -> Self {
        Self {
            series: series.to_vec(),
            config,
        }
    }

    fn bounds(&self) -> Option<(f64, f64, f64, f64)> {
        let points = self.series.iter().flat_map(|s| s.points.iter());
        let mut bounds: Option<(f64, f64, f64, f64)> = None;
        for &(x, y) in points.filter(|(x, y)| x.is_finite() && y.is_finite()) {
            bounds = Some(match bounds {
                None => (x, x, y, y),
                Some((x0, x1, y0, y1)) => (x0.min(x), x1.max(x), y0.min(y), y1.max(y)),
            });
        }
        bounds
    }
}

impl Chart for MultiLinePlot {
    fn render(&self) -> String {
        let mut output = String::new();
        let width = self.config.base.width.max(2);
        let height = self.config.base.height.max(2);
        centered_title(&mut output, &self.config.base.title, width + 12);

        let (x_min, x_max, y_min, y_max) = match self.bounds() {
            Some(b) => b,
            None => {
                output.push_str("No data to display\n");
                return output;
            }
        };
        let x_range = if (x_max - x_min).abs() < f64::EPSILON {
            1.0
        } else {
            x_max - x_min
        };
        let y_range = if (y_max - y_min).abs() < f64::EPSILON {
            1.0
        } else {
            y_max - y_min
        };

        let glyphs = Glyphs::for_style(self.config.style);
        let to_cell = |x: f64, y: f64| {
            let col = ((x - x_min) / x_range * (width - 1) as f64).round() as usize;
            let row = ((y - y_min) / y_range * (height - 1) as f64).round() as usize;
            (col.min(width - 1), row.min(height - 1))
        };

        let mut grid = vec![vec![' '; width]; height];

        // Connecting segments first so markers stay visible
        for series in &self.series {
            let cells: Vec<(usize, usize)> = series
                .points
                .iter()
                .filter(|(x, y)| x.is_finite() && y.is_finite())
                .map(|&(x, y)| to_cell(x, y))
                .collect();
            for pair in cells.windows(2) {
                let (c0, r0) = (pair[0].0 as f64, pair[0].1 as f64);
                let (c1, r1) = (pair[1].0 as f64, pair[1].1 as f64);
                let steps = (c1 - c0).abs().max((r1 - r0).abs()) as usize;
                for s in 1..steps {
                    let t = s as f64 / steps as f64;
                    let c = (c0 + (c1 - c0) * t).round() as usize;
                    let r = (r0 + (r1 - r0) * t).round() as usize;
                    if grid[r][c] == ' ' {
                        grid[r][c] = glyphs.segment;
                    }
                }
            }
        }

        let marker_for = |i: usize| {
            if self.config.show_points {
                glyphs.markers[i % glyphs.markers.len()]
            } else {
                glyphs.segment
            }
        };
        for (i, series) in self.series.iter().enumerate() {
            for &(x, y) in series.points.iter().filter(|(x, y)| x.is_finite() && y.is_finite()) {
                let (col, row) = to_cell(x, y);
                grid[row][col] = marker_for(i);
            }
        }

        if self.config.base.show_labels {
            if let Some(ref y_label) = self.config.base.y_label {
                output.push_str(&format!("{}\n", y_label));
            }
        }

        for row in (0..height).rev() {
            if self.config.base.show_labels {
                let y_val = y_min + (row as f64 / (height - 1) as f64) * y_range;
                output.push_str(&format!("{:>10} {}", axis_value(y_val), glyphs.vertical));
            }
            output.extend(grid[row].iter());
            output.push('\n');
        }

        if self.config.base.show_labels {
            output.push_str(&format!("{:>11}", glyphs.corner));
            output.extend(std::iter::repeat(glyphs.horizontal).take(width));
            output.push('\n');
            let x_min_label = axis_value(x_min);
            output.push_str(&format!(
                "{:>12}{}{:>pad$}\n",
                "",
                x_min_label,
                axis_value(x_max),
                pad = width.saturating_sub(x_min_label.chars().count())
            ));
            if let Some(ref x_label) = self.config.base.x_label {
                output.push_str(&format!("{:>12}{:^width$}\n", "", x_label, width = width));
            }
        }

        // Legend
        for (i, series) in self.series.iter().enumerate() {
            output.push_str(&format!("  {} {}\n", marker_for(i), series.label));
        }

        output
    }
}
