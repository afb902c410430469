//! Row reconciliation against the book catalog.
//!
//! Given the rows of one upload and a snapshot of the catalog entries those
//! rows refer to, [`reconcile`] classifies every row and builds the batch of
//! writes that brings the catalog in line with the upload:
//!
//! | Row                                            | Result                          |
//! |------------------------------------------------|---------------------------------|
//! | `bookNum` or `name` missing/empty              | skipped, "missing required fields" |
//! | `bookNum` not in snapshot                      | inserted, [`Operation::Insert`] |
//! | `bookNum` in snapshot, `name`/`description` differ | updated, [`Operation::Update`] |
//! | `bookNum` in snapshot, identical               | skipped, "no changes detected"  |
//! | a field can't be coerced to text               | errors                          |
//!
//! Classification is pure: it never touches storage and the snapshot is not
//! updated while rows are processed. A `bookNum` that appears twice in one
//! upload is classified twice against the same snapshot, so both rows may emit
//! an operation; the store applies them in order.

mod outcome;

use bookshelf_ingest::error::Result as IngestResult;
use bookshelf_ingest::models::fields;
use bookshelf_ingest::{BookRecord, RowRecord};
use std::collections::{BTreeSet, HashMap};
use tracing::instrument;

pub use crate::outcome::{Outcome, RowError, SkipReason, Skipped};

/// Catalog entries relevant to an upload, keyed by `bookNum`.
pub type Snapshot = HashMap<String, BookRecord>;

/// A single write in the batch produced by [`reconcile`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    /// Create a new book.
    Insert(BookRecord),
    /// Overwrite `name` and `description` of the book with the same `bookNum`.
    Update(BookRecord),
}
impl Operation {
    pub fn book(&self) -> &BookRecord {
        match self {
            Self::Insert(book) | Self::Update(book) => book,
        }
    }
}

/// The batch of writes to apply, plus the report for the caller.
#[derive(Debug, Default)]
pub struct Reconciliation {
    pub operations: Vec<Operation>,
    pub outcome: Outcome,
}

enum Classification {
    Missing,
    Unchanged,
    Insert(BookRecord),
    Update(BookRecord),
}

/// Identifiers to look up before reconciling: every non-empty `bookNum` in the
/// upload, de-duplicated. Rows whose `bookNum` can't be coerced are left out;
/// they fault during [`reconcile`] anyway.
pub fn collect_book_nums<'a>(rows: impl IntoIterator<Item = &'a RowRecord>) -> BTreeSet<String> {
    rows.into_iter()
        .filter_map(|row| text(row, fields::BOOK_NUM).ok().flatten())
        .filter(|book_num| !book_num.is_empty())
        .collect()
}

/// Classify every row against `existing` and build the write batch.
#[instrument(skip_all, fields(existing = existing.len()))]
pub fn reconcile(rows: impl IntoIterator<Item = RowRecord>, existing: &Snapshot) -> Reconciliation {
    let mut result = Reconciliation::default();
    for row in rows {
        match classify(&row, existing) {
            Ok(Classification::Missing) => result.outcome.skip(row, SkipReason::MissingRequiredFields),
            Ok(Classification::Unchanged) => result.outcome.skip(row, SkipReason::NoChangesDetected),
            Ok(Classification::Insert(book)) => {
                result.outcome.inserted.push(book.clone());
                result.operations.push(Operation::Insert(book));
            },
            Ok(Classification::Update(book)) => {
                result.outcome.updated.push(book.clone());
                result.operations.push(Operation::Update(book));
            },
            Err(err) => {
                let error = (*err).to_string();
                tracing::debug!(%error, "Row failed classification");
                result.outcome.errors.push(RowError { row, error });
            },
        }
    }
    tracing::debug!(
        operations = result.operations.len(),
        inserted = result.outcome.inserted.len(),
        updated = result.outcome.updated.len(),
        skipped = result.outcome.skipped.len(),
        errors = result.outcome.errors.len(),
        "Reconciled rows"
    );
    result
}

fn classify(row: &RowRecord, existing: &Snapshot) -> IngestResult<Classification> {
    let book_num = text(row, fields::BOOK_NUM)?;
    let name = text(row, fields::NAME)?;
    let (Some(book_num), Some(name)) = (book_num.filter(|s| !s.is_empty()), name.filter(|s| !s.is_empty())) else {
        return Ok(Classification::Missing);
    };
    // Only looked at once the row is known to be complete.
    let description = text(row, fields::DESCRIPTION)?;
    Ok(match existing.get(&book_num) {
        None => Classification::Insert(BookRecord::new(book_num, name, description)),
        Some(current) if current.same_content(&name, description.as_deref()) => Classification::Unchanged,
        Some(_) => Classification::Update(BookRecord::new(book_num, name, description)),
    })
}

fn text(row: &RowRecord, header: &str) -> IngestResult<Option<String>> {
    match row.get(header) {
        Some(cell) => cell.to_text(),
        None => Ok(None),
    }
}
