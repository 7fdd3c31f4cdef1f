use thiserror::Error;

#[derive(Error, Debug)]
pub enum CanvasError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("PDF generation error: {0}")]
    Pdf(String),
    #[error("Page index {index} is out of range (document has {count} pages)")]
    PageOutOfRange { index: usize, count: usize },
    #[error("Page limit of {0} reached")]
    PageLimit(usize),
    #[error("Other canvas error: {0}")]
    Other(String),
}

impl From<&str> for CanvasError {
    fn from(s: &str) -> Self {
        CanvasError::Other(s.to_string())
    }
}
