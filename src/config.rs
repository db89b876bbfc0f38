//! Run configuration loaded from TOML
//!
//! Every section and field has a default, so a partial file (or no file at
//! all) gives a working configuration:
//!
//! ```toml
//! input_path = "data/banks.csv"
//!
//! [charts]
//! mode = "file"
//! format = "svg"
//!
//! [forecast]
//! steps = 5
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::analysis::ForecastConfig;
use crate::error::{Error, Result};
use crate::vis::{ChartStyle, OutputType};

/// Where the charts go
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartMode {
    /// Text charts on standard output
    #[default]
    Terminal,
    /// Image files in `output_dir`
    File,
    /// No charts
    Off,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartsConfig {
    pub mode: ChartMode,
    /// Directory for exported images
    pub output_dir: PathBuf,
    pub format: OutputType,
    /// Image size in pixels
    pub width: u32,
    pub height: u32,
    /// Glyph set for terminal charts
    pub style: ChartStyle,
}

impl Default for ChartsConfig {
    fn default() -> Self {
        ChartsConfig {
            mode: ChartMode::Terminal,
            output_dir: PathBuf::from("charts"),
            format: OutputType::Png,
            width: 1000,
            height: 600,
            style: ChartStyle::Unicode,
        }
    }
}

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Dataset to read; the sample is written here if it does not exist
    pub input_path: PathBuf,
    /// Summary spreadsheet, overwritten on every run
    pub output_path: PathBuf,
    /// Rows shown in the console preview
    pub preview_rows: usize,
    /// Optional JSON run report
    pub report_path: Option<PathBuf>,
    pub charts: ChartsConfig,
    pub forecast: ForecastConfig,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        AnalysisConfig {
            input_path: PathBuf::from("dubai_banks_data.xlsx"),
            output_path: PathBuf::from("dubai_bank_analysis_summary.xlsx"),
            preview_rows: 5,
            report_path: None,
            charts: ChartsConfig::default(),
            forecast: ForecastConfig::default(),
        }
    }
}

impl AnalysisConfig {
    /// Load and validate a configuration file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("cannot read {}: {}", path.display(), e)))?;
        let config = Self::from_toml_str(&content)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
        log::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Write the configuration, e.g. to produce a template
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        fs::write(path.as_ref(), self.to_toml_string()?)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.forecast.steps == 0 {
            return Err(Error::Config(
                "forecast.steps must be greater than 0".to_string(),
            ));
        }
        if self.charts.width == 0 || self.charts.height == 0 {
            return Err(Error::Config(format!(
                "chart size must be positive, got {}x{}",
                self.charts.width, self.charts.height
            )));
        }
        if self.input_path.as_os_str().is_empty() {
            return Err(Error::Config("input_path must not be empty".to_string()));
        }
        if self.output_path.as_os_str().is_empty() {
            return Err(Error::Config("output_path must not be empty".to_string()));
        }
        Ok(())
    }
}
