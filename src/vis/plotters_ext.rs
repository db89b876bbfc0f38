//! Chart export to PNG and SVG files using plotters

use std::path::{Path, PathBuf};

use plotters::coord::Shift;
use plotters::prelude::*;

use crate::error::{Error, Result};
use crate::vis::{
    slug, BarChartSpec, ChartRenderer, ChartSpec, LineChartSpec, OutputType, RenderArtifact,
};

/// Image settings shared by every exported chart
#[derive(Debug, Clone)]
pub struct PlotSettings {
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    pub output_type: OutputType,
    pub show_legend: bool,
    pub show_grid: bool,
    /// Series colors, reused cyclically
    pub color_palette: Vec<(u8, u8, u8)>,
}

impl Default for PlotSettings {
    fn default() -> Self {
        PlotSettings {
            width: 1000,
            height: 600,
            output_type: OutputType::Png,
            show_legend: true,
            show_grid: true,
            color_palette: vec![
                (0, 123, 255),
                (255, 99, 71),
                (46, 204, 113),
                (255, 193, 7),
                (142, 68, 173),
                (52, 152, 219),
                (243, 156, 18),
                (211, 84, 0),
            ],
        }
    }
}

impl PlotSettings {
    fn color(&self, index: usize) -> RGBColor {
        match self.color_palette.len() {
            0 => RGBColor(0, 0, 0),
            n => {
                let (r, g, b) = self.color_palette[index % n];
                RGBColor(r, g, b)
            }
        }
    }
}

/// Writes each chart to `<output_dir>/<slug of title>.<png|svg>`
#[derive(Debug, Clone)]
pub struct FileRenderer {
    output_dir: PathBuf,
    settings: PlotSettings,
}

impl FileRenderer {
    pub fn new<P: AsRef<Path>>(output_dir: P, settings: PlotSettings) -> Self {
        FileRenderer {
            output_dir: output_dir.as_ref().to_path_buf(),
            settings,
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Where a chart with this title is written
    pub fn path_for(&self, title: &str) -> PathBuf {
        self.output_dir.join(format!(
            "{}.{}",
            slug(title),
            self.settings.output_type.extension()
        ))
    }
}

impl ChartRenderer for FileRenderer {
    fn render(&mut self, chart: &ChartSpec) -> Result<RenderArtifact> {
        if chart.is_empty() {
            return Err(Error::Visualization(format!(
                "'{}' has no data to plot",
                chart.title()
            )));
        }

        std::fs::create_dir_all(&self.output_dir).map_err(|e| {
            Error::Visualization(format!(
                "cannot create {}: {}",
                self.output_dir.display(),
                e
            ))
        })?;
        let path = self.path_for(chart.title());
        let size = (self.settings.width, self.settings.height);

        match self.settings.output_type {
            OutputType::Png => {
                let root = BitMapBackend::new(&path, size).into_drawing_area();
                draw_chart(&root, chart, &self.settings)?;
            }
            OutputType::Svg => {
                let root = SVGBackend::new(&path, size).into_drawing_area();
                draw_chart(&root, chart, &self.settings)?;
            }
        }

        log::info!("Saved chart '{}' to {}", chart.title(), path.display());
        Ok(RenderArtifact::File {
            title: chart.title().to_string(),
            path,
        })
    }
}

fn draw_chart<DB>(
    root: &DrawingArea<DB, Shift>,
    chart: &ChartSpec,
    settings: &PlotSettings,
) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    root.fill(&WHITE)?;
    match chart {
        ChartSpec::Bar(spec) => draw_bars(root, spec, settings)?,
        ChartSpec::Line(spec) => draw_lines(root, spec, settings)?,
    }
    root.present()?;
    Ok(())
}

fn draw_bars<DB>(
    root: &DrawingArea<DB, Shift>,
    spec: &BarChartSpec,
    settings: &PlotSettings,
) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let n = spec.bars.len() as i32;
    let x_min = spec.bars.iter().map(|(_, v)| *v).fold(0.0f64, f64::min);
    let x_max = spec.bars.iter().map(|(_, v)| *v).fold(0.0f64, f64::max);
    let x_max = if x_max <= x_min { x_min + 1.0 } else { x_max * 1.1 };
    let labels: Vec<&str> = spec.bars.iter().map(|(l, _)| l.as_str()).collect();

    let mut chart = ChartBuilder::on(root)
        .caption(&spec.title, ("sans-serif", 30).into_font())
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(160)
        .build_cartesian_2d(x_min..x_max, (0..n).into_segmented())?;

    let label_for = |v: &SegmentValue<i32>| match v {
        SegmentValue::CenterOf(i) => labels
            .get(*i as usize)
            .map(|l| l.to_string())
            .unwrap_or_default(),
        _ => String::new(),
    };

    let mut mesh = chart.configure_mesh();
    mesh.disable_y_mesh()
        .y_labels(spec.bars.len())
        .y_label_formatter(&label_for)
        .x_desc(spec.x_label.as_str())
        .y_desc(spec.y_label.as_str());
    if !settings.show_grid {
        mesh.disable_x_mesh();
    }
    mesh.draw()?;

    let color = settings.color(0);
    chart.draw_series(spec.bars.iter().enumerate().map(|(i, (_, value))| {
        let i = i as i32;
        let mut bar = Rectangle::new(
            [
                (0.0, SegmentValue::Exact(i)),
                (*value, SegmentValue::Exact(i + 1)),
            ],
            color.filled(),
        );
        bar.set_margin(6, 6, 0, 0);
        bar
    }))?;

    Ok(())
}

fn draw_lines<DB>(
    root: &DrawingArea<DB, Shift>,
    spec: &LineChartSpec,
    settings: &PlotSettings,
) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let points = spec.series.iter().flat_map(|s| s.points.iter());
    let (mut x_min, mut x_max) = (f64::INFINITY, f64::NEG_INFINITY);
    let (mut y_min, mut y_max) = (f64::INFINITY, f64::NEG_INFINITY);
    for &(x, y) in points {
        x_min = x_min.min(x);
        x_max = x_max.max(x);
        y_min = y_min.min(y);
        y_max = y_max.max(y);
    }

    let x_margin = if x_max > x_min { (x_max - x_min) * 0.05 } else { 0.5 };
    let y_margin = if y_max > y_min {
        (y_max - y_min) * 0.05
    } else {
        y_max.abs().max(1.0) * 0.05
    };

    let mut chart = ChartBuilder::on(root)
        .caption(&spec.title, ("sans-serif", 30).into_font())
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(70)
        .build_cartesian_2d(
            (x_min - x_margin)..(x_max + x_margin),
            (y_min - y_margin)..(y_max + y_margin),
        )?;

    let year_label = |v: &f64| format!("{:.0}", v);
    let mut mesh = chart.configure_mesh();
    mesh.x_label_formatter(&year_label)
        .x_desc(spec.x_label.as_str())
        .y_desc(spec.y_label.as_str());
    if !settings.show_grid {
        mesh.disable_mesh();
    }
    mesh.draw()?;

    for (i, series) in spec.series.iter().enumerate() {
        let color = settings.color(i);
        chart
            .draw_series(LineSeries::new(
                series.points.iter().copied(),
                color.stroke_width(2),
            ))?
            .label(series.label.as_str())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));

        if spec.markers {
            chart.draw_series(
                series
                    .points
                    .iter()
                    .map(|&(x, y)| Circle::new((x, y), 4, color.filled())),
            )?;
        }
    }

    if settings.show_legend {
        chart
            .configure_series_labels()
            .background_style(&WHITE.mix(0.8))
            .border_style(&BLACK)
            .position(SeriesLabelPosition::UpperRight)
            .draw()?;
    }

    Ok(())
}
