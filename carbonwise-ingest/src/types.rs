use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::Path;

use crate::error::{IngestError, Result};

/// One transaction-like row recovered from statement text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub date: String,
    pub description: String,
    pub amount: f64,
}

/// One row of a tabular statement, column name -> cell value, in column order.
pub type TabularRecord = Map<String, Value>;

/// The JSON array handed to the advice client.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum StructuredPayload {
    Transactions(Vec<Transaction>),
    Records(Vec<TabularRecord>),
}

impl StructuredPayload {
    pub fn len(&self) -> usize {
        match self {
            StructuredPayload::Transactions(t) => t.len(),
            StructuredPayload::Records(r) => r.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Compact JSON array of objects.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatementFormat {
    Pdf,
    Csv,
}

impl StatementFormat {
    /// Case-insensitive match on the file extension.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            "pdf" => Ok(StatementFormat::Pdf),
            "csv" => Ok(StatementFormat::Csv),
            _ => Err(IngestError::UnsupportedFormat(path.display().to_string())),
        }
    }

    /// Upload widgets report a MIME type rather than a file name.
    pub fn from_mime(mime: &str) -> Result<Self> {
        let essence = mime.split(';').next().unwrap_or("").trim().to_ascii_lowercase();
        match essence.as_str() {
            "application/pdf" => Ok(StatementFormat::Pdf),
            "text/csv" => Ok(StatementFormat::Csv),
            _ => Err(IngestError::UnsupportedFormat(mime.to_string())),
        }
    }
}
