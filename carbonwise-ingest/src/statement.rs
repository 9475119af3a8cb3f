//! One entry point from an uploaded statement to the advice payload.

use std::fs;
use std::path::Path;

use tracing::info;

use crate::error::Result;
use crate::parsers::{parse_with_policy, AmountPolicy, RejectedLine};
use crate::pdf_text::extract_pdf_text;
use crate::tabular::load_tabular;
use crate::types::{StatementFormat, StructuredPayload};

#[derive(Debug, Clone, PartialEq)]
pub struct LoadedStatement {
    pub format: StatementFormat,
    pub payload: StructuredPayload,
    /// Lines skipped under [`AmountPolicy::Skip`]; always empty for CSV input.
    pub rejected: Vec<RejectedLine>,
}

/// Load a statement from memory.
///
/// PDFs go through text extraction and the line parser; CSVs through the
/// tabular loader, where `policy` has no effect.
pub fn load_statement_bytes(
    bytes: &[u8],
    format: StatementFormat,
    policy: AmountPolicy,
) -> Result<LoadedStatement> {
    let loaded = match format {
        StatementFormat::Pdf => {
            let text = extract_pdf_text(bytes)?;
            let report = parse_with_policy(&text, policy)?;
            LoadedStatement {
                format,
                payload: StructuredPayload::Transactions(report.transactions),
                rejected: report.rejected,
            }
        }
        StatementFormat::Csv => LoadedStatement {
            format,
            payload: StructuredPayload::Records(load_tabular(bytes)?),
            rejected: Vec::new(),
        },
    };

    info!(
        ?format,
        items = loaded.payload.len(),
        rejected = loaded.rejected.len(),
        "statement loaded"
    );
    Ok(loaded)
}

/// Load a statement file, detecting the format from its extension unless given.
pub fn load_statement(
    path: impl AsRef<Path>,
    format: Option<StatementFormat>,
    policy: AmountPolicy,
) -> Result<LoadedStatement> {
    let path = path.as_ref();
    let format = match format {
        Some(f) => f,
        None => StatementFormat::from_path(path)?,
    };
    let bytes = fs::read(path)?;
    load_statement_bytes(&bytes, format, policy)
}
