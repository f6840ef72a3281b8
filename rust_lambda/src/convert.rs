use csv::{ReaderBuilder, StringRecord};
use lambda_runtime::tracing;
use serde_json::{Map, Value};

use crate::error::TransformError;

const BYTE_ORDER_MARK: char = '\u{feff}';

/// Key that collects the cells of a row longer than the header.
pub const OVERFLOW_KEY: &str = "null";

/// Converts CSV text (header row first) into a compact JSON array of objects.
///
/// Every cell stays a string. Rows are zipped against the header by position:
/// a short row gets `null` for each missing column, a long row keeps its
/// surplus cells as an array under [`OVERFLOW_KEY`]. A repeated header name
/// keeps its first position and takes the value of its last column.
pub fn csv_to_json(text: &str) -> Result<String, TransformError> {
    let rows = parse_rows(text)?;
    tracing::info!(rows = rows.len(), "Parsed CSV rows");
    Ok(serde_json::to_string(&rows)?)
}

pub fn parse_rows(text: &str) -> Result<Vec<Map<String, Value>>, TransformError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());
    let headers = header_names(text, reader.headers()?);

    let mut rows = Vec::new();
    for record in reader.records() {
        rows.push(zip_row(&headers, &record?));
    }
    Ok(rows)
}

/// Header names exactly as written, including a leading byte-order mark
/// that the reader strips.
fn header_names(text: &str, record: &StringRecord) -> Vec<String> {
    let mut names: Vec<String> = record.iter().map(str::to_string).collect();
    if text.starts_with(BYTE_ORDER_MARK) {
        if let Some(first) = names.first_mut() {
            if !first.starts_with(BYTE_ORDER_MARK) {
                first.insert(0, BYTE_ORDER_MARK);
            }
        }
    }
    names
}

fn zip_row(headers: &[String], record: &StringRecord) -> Map<String, Value> {
    let mut row = Map::with_capacity(headers.len());
    for (index, name) in headers.iter().enumerate() {
        let cell = record
            .get(index)
            .map(|value| Value::String(value.to_string()))
            .unwrap_or(Value::Null);
        row.insert(name.clone(), cell);
    }
    if record.len() > headers.len() {
        let surplus = record
            .iter()
            .skip(headers.len())
            .map(|value| Value::String(value.to_string()))
            .collect();
        row.insert(OVERFLOW_KEY.to_string(), Value::Array(surplus));
    }
    row
}
