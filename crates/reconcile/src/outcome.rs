use bookshelf_ingest::{BookRecord, RowRecord};
use derive_more::Display;
use serde::Serialize;

/// Why a row produced no operation.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SkipReason {
    /// `bookNum` or `name` is absent or empty.
    #[display("missing required fields")]
    #[serde(rename = "missing required fields")]
    MissingRequiredFields,
    /// The catalog already holds exactly these values.
    #[display("no changes detected")]
    #[serde(rename = "no changes detected")]
    NoChangesDetected,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Skipped {
    pub row: RowRecord,
    pub reason: SkipReason,
}

/// A row that faulted during classification. It is left out of the batch;
/// the rest of the upload carries on.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowError {
    pub row: RowRecord,
    pub error: String,
}

/// Per-upload report of what happened to every row.
///
/// Every decoded row lands in exactly one of the four lists, and each list
/// keeps upload order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Outcome {
    pub inserted: Vec<BookRecord>,
    pub updated: Vec<BookRecord>,
    pub skipped: Vec<Skipped>,
    pub errors: Vec<RowError>,
    /// Set when classification finished but the batch write did not; nothing
    /// listed under `inserted` or `updated` was persisted.
    pub batch_write_failed: bool,
}
impl Outcome {
    /// Number of rows accounted for.
    pub fn total(&self) -> usize {
        self.inserted.len() + self.updated.len() + self.skipped.len() + self.errors.len()
    }

    pub(crate) fn skip(&mut self, row: RowRecord, reason: SkipReason) {
        self.skipped.push(Skipped { row, reason });
    }
}
