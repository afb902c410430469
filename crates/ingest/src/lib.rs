//! Decoding of uploaded spreadsheets into rows.
//!
//! An upload is a blob of bytes plus the media type the client declared for
//! it. Two encodings are understood:
//! - **CSV** (`text/csv`): UTF-8, comma-delimited, first record is the header.
//! - **XLSX**: only the first worksheet is read, first row is the header.
//!
//! Each following row becomes a [`RowRecord`] keyed by header name. Rows with
//! no values at all are dropped. Nothing else is validated at this stage; see
//! [`Cell::to_text`] for how typed cells are coerced later on.

mod delimited;
pub mod error;
mod headers;
mod media;
pub mod models;
mod workbook;

use tracing::instrument;

use crate::error::Result;
pub use crate::media::MediaType;
pub use crate::models::{BookRecord, Cell, RowRecord};

/// Decode an upload according to its declared media type.
///
/// Fails with [`UnsupportedMediaType`](error::ErrorKind::UnsupportedMediaType)
/// before looking at a single byte if the type isn't supported, and with
/// [`InvalidFile`](error::ErrorKind::InvalidFile) if the payload doesn't decode.
#[instrument(skip(bytes), fields(size = bytes.as_ref().len()))]
pub fn decode(bytes: impl AsRef<[u8]>, media_type: &str) -> Result<Vec<RowRecord>> {
    let media_type: MediaType = media_type.parse()?;
    decode_as(bytes, media_type)
}

/// Decode an upload whose media type has already been resolved.
pub fn decode_as(bytes: impl AsRef<[u8]>, media_type: MediaType) -> Result<Vec<RowRecord>> {
    let bytes = bytes.as_ref();
    let rows = match media_type {
        MediaType::Csv => delimited::decode(bytes)?,
        MediaType::Xlsx => workbook::decode(bytes)?,
    };
    tracing::debug!(%media_type, rows = rows.len(), "Decoded upload");
    Ok(rows)
}
