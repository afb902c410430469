//! The catalog interface the service layer talks to.

use crate::error::Result;
use async_trait::async_trait;
use bookshelf_ingest::BookRecord;
use bookshelf_reconcile::Operation;
use std::collections::BTreeSet;

/// Batch-capable access to the persisted book catalog.
///
/// # Examples
///
/// ```
/// use bookshelf_catalog::{CatalogStore, error::Result};
/// use std::collections::BTreeSet;
///
/// async fn known_names(catalog: &dyn CatalogStore, ids: &BTreeSet<String>) -> Result<Vec<String>> {
///     let books = catalog.find_by_ids(ids).await?;
///     Ok(books.into_iter().map(|book| book.name).collect())
/// }
/// ```
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Every book in the catalog, ordered by `bookNum`.
    async fn find_all(&self) -> Result<Vec<BookRecord>>;

    /// Books whose `bookNum` is in `ids`, ordered by `bookNum`.
    ///
    /// Identifiers that aren't in the catalog are simply missing from the
    /// result.
    async fn find_by_ids(&self, ids: &BTreeSet<String>) -> Result<Vec<BookRecord>>;

    /// Apply a batch of writes, in order, as a single unit: either every
    /// operation is persisted or none are. An empty batch is a no-op.
    ///
    /// An [`Insert`](Operation::Insert) for a `bookNum` that already exists
    /// overwrites it; an [`Update`](Operation::Update) for a `bookNum` that
    /// doesn't exist changes nothing.
    async fn apply_batch(&self, operations: &[Operation]) -> Result<()>;
}
