use thiserror::Error;

/// Error type for every stage of the analysis
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    IoError(String),

    #[error("Excel error: {0}")]
    Excel(String),

    #[error("CSV error: {0}")]
    CsvError(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Required column not found: {0}")]
    MissingColumn(String),

    #[error("Invalid value: {0}")]
    InvalidValue(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("No data: {0}")]
    EmptyData(String),

    #[error("Forecast failed: {0}")]
    Forecast(String),

    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    #[error("Visualization error: {0}")]
    Visualization(String),

    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    #[error("I/O error: {0}")]
    Io(#[source] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[source] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[source] serde_json::Error),
}

/// Result alias used across the crate
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Whether the pipeline should abort on this error
    ///
    /// Forecast and chart failures are reported and the run continues.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Error::Forecast(_) | Error::Visualization(_))
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Self {
        Error::Csv(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json(err)
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

#[cfg(feature = "excel")]
impl From<calamine::XlsxError> for Error {
    fn from(err: calamine::XlsxError) -> Self {
        Error::Excel(err.to_string())
    }
}

#[cfg(feature = "excel")]
impl From<calamine::Error> for Error {
    fn from(err: calamine::Error) -> Self {
        Error::Excel(err.to_string())
    }
}

// Plotters drawing errors
#[cfg(feature = "visualization")]
impl<E: std::error::Error + Send + Sync + 'static> From<plotters::drawing::DrawingAreaErrorKind<E>>
    for Error
{
    fn from(err: plotters::drawing::DrawingAreaErrorKind<E>) -> Self {
        Error::Visualization(format!("drawing failed: {}", err))
    }
}
