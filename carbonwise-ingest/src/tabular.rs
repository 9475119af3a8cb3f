//! Load delimited statement exports into ordered row records.
//!
//! Expected shape: a header row, then one row per transaction, e.g.
//!   date,description,amount
//!   2024-01-05,Rent,1200.00
//! Cell values are kept as read; nothing is coerced to numbers.

use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde_json::Value;
use tracing::debug;

use crate::error::{IngestError, Result};
use crate::types::TabularRecord;

/// Repeated column names get `.1`, `.2`, ... suffixes so no column is lost.
fn unique_headers<'a>(raw: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut out = Vec::new();

    for name in raw {
        let mut candidate = name.to_string();
        let mut n = 1;
        while seen.contains(&candidate) {
            candidate = format!("{name}.{n}");
            n += 1;
        }
        seen.insert(candidate.clone());
        out.push(candidate);
    }

    out
}

fn cell_value(cell: &str) -> Value {
    if cell.is_empty() {
        Value::Null
    } else {
        Value::String(cell.to_string())
    }
}

/// Parse a comma-delimited file with a header row.
///
/// Rows with a different number of fields than the header fail the whole load.
pub fn load_tabular<R: Read>(reader: R) -> Result<Vec<TabularRecord>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(false)
        .from_reader(reader);

    let headers = rdr.headers()?;
    if headers.is_empty() {
        return Err(IngestError::Parse("no header row".to_string()));
    }
    let columns = unique_headers(headers.iter());

    let mut rows = Vec::new();
    for result in rdr.records() {
        let record = result?;
        let row: TabularRecord = columns
            .iter()
            .zip(record.iter())
            .map(|(col, cell)| (col.clone(), cell_value(cell)))
            .collect();
        rows.push(row);
    }

    debug!(columns = columns.len(), rows = rows.len(), "loaded tabular statement");
    Ok(rows)
}

pub fn load_tabular_path(path: impl AsRef<Path>) -> Result<Vec<TabularRecord>> {
    let file = File::open(path.as_ref())?;
    load_tabular(file)
}

/// JSON array of objects, one per row, keys in column order.
pub fn tabular_to_json(records: &[TabularRecord]) -> Result<String> {
    Ok(serde_json::to_string(records)?)
}
