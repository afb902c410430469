//! SQLite implementation of the catalog.

use crate::Database;
use crate::error::{ErrorKind, Result};
use crate::models::BookRow;
use crate::store::CatalogStore;
use async_trait::async_trait;
use bookshelf_ingest::BookRecord;
use bookshelf_reconcile::Operation;
use exn::ResultExt;
use sqlx::SqlitePool;
use std::collections::BTreeSet;
use tracing::instrument;

/// Repository for book records in the catalog database.
///
/// Uniqueness of `book_num` is enforced by the schema; concurrent uploads
/// racing on the same book number are settled by SQLite, not here.
#[derive(Debug, Clone)]
pub struct Repository {
    pool: SqlitePool,
}
impl From<&Database> for Repository {
    fn from(db: &Database) -> Self {
        Self { pool: db.pool().clone() }
    }
}

#[async_trait]
impl CatalogStore for Repository {
    #[instrument(skip(self))]
    async fn find_all(&self) -> Result<Vec<BookRecord>> {
        let rows: Vec<BookRow> = sqlx::query_as(include_str!("../queries/find_all.sql"))
            .fetch_all(&self.pool)
            .await
            .or_raise(|| ErrorKind::Database)?;
        Ok(rows.into_iter().map(BookRecord::from).collect())
    }

    #[instrument(skip_all, fields(ids = ids.len()))]
    async fn find_by_ids(&self, ids: &BTreeSet<String>) -> Result<Vec<BookRecord>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        // One bound JSON array instead of building an `IN (?, ?, ...)` list
        // sized to the upload.
        let ids = serde_json::to_string(ids).or_raise(|| ErrorKind::InvalidData("book numbers"))?;
        let rows: Vec<BookRow> = sqlx::query_as(include_str!("../queries/find_by_ids.sql"))
            .bind(ids)
            .fetch_all(&self.pool)
            .await
            .or_raise(|| ErrorKind::Database)?;
        Ok(rows.into_iter().map(BookRecord::from).collect())
    }

    #[instrument(skip_all, fields(operations = operations.len()))]
    async fn apply_batch(&self, operations: &[Operation]) -> Result<()> {
        if operations.is_empty() {
            return Ok(());
        }
        let mut tx = self.pool.begin().await.or_raise(|| ErrorKind::Database)?;
        for operation in operations {
            let query = match operation {
                Operation::Insert(_) => include_str!("../queries/insert_book.sql"),
                Operation::Update(_) => include_str!("../queries/update_book.sql"),
            };
            let book = operation.book();
            sqlx::query(query)
                .bind(book.book_num.as_str())
                .bind(book.name.as_str())
                .bind(book.description.as_deref())
                .execute(&mut *tx)
                .await
                .or_raise(|| ErrorKind::Database)?;
        }
        tx.commit().await.or_raise(|| ErrorKind::Database)?;
        tracing::debug!(operations = operations.len(), "Applied catalog batch");
        Ok(())
    }
}
