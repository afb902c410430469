//! XLSX decoding.

use crate::error::{ErrorKind, Result};
use crate::headers::Headers;
use crate::models::{Cell, RowRecord};
use calamine::{Data, Reader, Xlsx};
use exn::{OptionExt, ResultExt};
use std::io::Cursor;

/// Decode the first worksheet (in declaration order) of an XLSX workbook. The
/// first row of the sheet's used range is the header row.
pub(crate) fn decode(bytes: &[u8]) -> Result<Vec<RowRecord>> {
    let mut workbook: Xlsx<_> =
        Xlsx::new(Cursor::new(bytes)).or_raise(|| ErrorKind::InvalidFile("unreadable XLSX workbook"))?;
    let sheet = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_raise(|| ErrorKind::InvalidFile("workbook has no sheets"))?;
    tracing::trace!(sheet = %sheet, "Reading first worksheet");
    let range = workbook.worksheet_range(&sheet).or_raise(|| ErrorKind::InvalidFile("unreadable worksheet"))?;
    let mut rows = range.rows();
    let Some(header) = rows.next() else {
        return Ok(Vec::new());
    };
    // A header cell that can't be turned into text is as good as blank.
    let headers = Headers::new(header.iter().map(|data| Cell::from(data).to_text().ok().flatten()));
    Ok(rows.filter_map(|row| headers.row(row.iter().map(Cell::from))).collect())
}

impl From<&Data> for Cell {
    fn from(data: &Data) -> Self {
        match data {
            Data::Empty => Self::Empty,
            Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => Self::Text(s.clone()),
            Data::Int(i) => Self::Int(*i),
            Data::Float(f) => Self::Float(*f),
            Data::Bool(b) => Self::Bool(*b),
            Data::DateTime(dt) => Self::Float(dt.as_f64()),
            Data::Error(e) => Self::Error(e.to_string()),
        }
    }
}
