//! CSV decoding.

use crate::error::{ErrorKind, Result};
use crate::headers::Headers;
use crate::models::{Cell, RowRecord};
use ::csv::ReaderBuilder;
use exn::ResultExt;

const BOM: char = '\u{feff}';

/// Decode a comma-delimited UTF-8 table. The first record is the header row.
pub(crate) fn decode(bytes: &[u8]) -> Result<Vec<RowRecord>> {
    let text = std::str::from_utf8(bytes).or_raise(|| ErrorKind::InvalidFile("CSV is not valid UTF-8"))?;
    let text = text.strip_prefix(BOM).unwrap_or(text);
    let mut reader = ReaderBuilder::new()
        // Headers are read by hand so they get the same normalization as workbook headers.
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());
    let mut records = reader.records();
    let Some(header) = records.next() else {
        return Ok(Vec::new());
    };
    let header = header.or_raise(|| ErrorKind::InvalidFile("malformed CSV header"))?;
    let headers = Headers::new(header.iter().map(|name| Some(name.to_string())));
    let mut rows = Vec::new();
    for record in records {
        let record = record.or_raise(|| ErrorKind::InvalidFile("malformed CSV record"))?;
        if let Some(row) = headers.row(record.iter().map(Cell::from)) {
            rows.push(row);
        }
    }
    Ok(rows)
}
