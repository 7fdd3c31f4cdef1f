use medreport_canvas::CanvasError;
use medreport_layout::LayoutError;
use thiserror::Error;

/// Errors that stop a report from being produced.
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Invalid dataset: {0}")]
    InvalidDataset(String),

    #[error("Drawing failed: {0}")]
    Canvas(#[from] CanvasError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Dataset is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

impl From<LayoutError> for ReportError {
    fn from(e: LayoutError) -> Self {
        match e {
            LayoutError::Canvas(inner) => ReportError::Canvas(inner),
        }
    }
}

/// Failures of the advisory text service. These never escape the assembler;
/// they only select the fallback text.
#[derive(Error, Debug)]
pub enum AdvisoryError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Service answered with status {0}")]
    Status(u16),

    #[error("Malformed response: {0}")]
    Malformed(String),

    #[error("No response within {0} ms")]
    Timeout(u64),

    #[error("Service returned empty text")]
    Empty,
}
