//! Error types for statement ingestion

use thiserror::Error;

pub type Result<T> = std::result::Result<T, IngestError>;

#[derive(Error, Debug)]
pub enum IngestError {
    /// The document could not be read as a paginated text document.
    #[error("Extraction error: {0}")]
    Extraction(String),

    /// The tabular file is malformed or not valid UTF-8.
    #[error("Parse error: {0}")]
    Parse(String),

    /// A qualifying statement line ends in something that is not a number.
    #[error("Amount format error on line {line}: {token:?} is not a number")]
    AmountFormat { line: usize, token: String },

    #[error("Unsupported statement format: {0}")]
    UnsupportedFormat(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<csv::Error> for IngestError {
    fn from(e: csv::Error) -> Self {
        IngestError::Parse(e.to_string())
    }
}
