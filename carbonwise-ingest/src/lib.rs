//! carbonwise-ingest: statement ingestion (PDF text, CSV rows) into the advice payload.

pub mod error;
pub mod parsers;
pub mod pdf_text;
pub mod statement;
pub mod tabular;
pub mod types;

pub use error::{IngestError, Result};
pub use parsers::{AmountPolicy, LineReport, RejectedLine, parse_statement_text, parse_statement_text_lenient};
pub use pdf_text::{extract_pdf_text, extract_pdf_text_from_path};
pub use statement::{LoadedStatement, load_statement, load_statement_bytes};
pub use tabular::{load_tabular, load_tabular_path, tabular_to_json};
pub use types::{StatementFormat, StructuredPayload, TabularRecord, Transaction};
