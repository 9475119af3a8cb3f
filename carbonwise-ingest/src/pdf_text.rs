//! Raw text extraction from PDF statements.
//!
//! Pages are concatenated in page order. Image-only pages carry no text layer
//! and simply contribute nothing; there is no OCR.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{IngestError, Result};

/// Extract the full text of an in-memory PDF.
pub fn extract_pdf_text(bytes: &[u8]) -> Result<String> {
    // pdf-extract panics on some malformed documents instead of returning an error.
    let extracted = std::panic::catch_unwind(|| pdf_extract::extract_text_from_mem(bytes))
        .map_err(|_| IngestError::Extraction("PDF text extraction aborted".to_string()))?;

    let text = extracted.map_err(|e| IngestError::Extraction(e.to_string()))?;
    debug!(bytes = bytes.len(), chars = text.len(), "extracted PDF text");
    Ok(text)
}

pub fn extract_pdf_text_from_path(path: impl AsRef<Path>) -> Result<String> {
    let bytes = fs::read(path.as_ref())?;
    extract_pdf_text(&bytes)
}
