//! The service facade: decode, look up, reconcile, write.

use crate::error::{ErrorKind, Result};
use bookshelf_catalog::CatalogHandle;
use bookshelf_ingest::BookRecord;
use bookshelf_reconcile::{Outcome, Reconciliation, Snapshot, collect_book_nums, reconcile};
use exn::ResultExt;
use tracing::instrument;

/// Orchestrates an upload from raw bytes to persisted books.
///
/// Holds the catalog handle it was constructed with; there is no other shared
/// state, so the service is cheap to clone into every request.
#[derive(Clone)]
pub struct BookService {
    catalog: CatalogHandle,
}
impl BookService {
    pub fn new(catalog: CatalogHandle) -> Self {
        Self { catalog }
    }

    /// Every book in the catalog.
    #[instrument(skip(self))]
    pub async fn list_all(&self) -> Result<Vec<BookRecord>> {
        self.catalog.find_all().await.or_raise(|| ErrorKind::Catalog)
    }

    /// Decode an uploaded spreadsheet, reconcile its rows against the catalog
    /// and write the resulting batch.
    ///
    /// 1. Decode (fails before reading anything on an unsupported media type).
    /// 2. One bulk lookup for every `bookNum` in the upload.
    /// 3. Classify rows against that snapshot.
    /// 4. One batch write for all inserts and updates.
    ///
    /// A failed lookup fails the request. A failed batch write does not: the
    /// outcome is returned with [`batch_write_failed`](Outcome::batch_write_failed)
    /// set, so the caller still learns what the upload would have done.
    #[instrument(skip(self, bytes), fields(size = bytes.len()))]
    pub async fn process_upload(&self, bytes: &[u8], media_type: &str) -> Result<Outcome> {
        let rows = bookshelf_ingest::decode(bytes, media_type).map_err(ErrorKind::decode)?;
        let ids = collect_book_nums(&rows);
        let snapshot: Snapshot = self
            .catalog
            .find_by_ids(&ids)
            .await
            .or_raise(|| ErrorKind::Catalog)?
            .into_iter()
            .map(|book| (book.book_num.clone(), book))
            .collect();
        let Reconciliation { operations, mut outcome } = reconcile(rows, &snapshot);
        if let Err(err) = self.catalog.apply_batch(&operations).await {
            tracing::error!(error = ?err, operations = operations.len(), "Batch write failed; nothing was persisted");
            outcome.batch_write_failed = true;
        }
        tracing::info!(
            inserted = outcome.inserted.len(),
            updated = outcome.updated.len(),
            skipped = outcome.skipped.len(),
            errors = outcome.errors.len(),
            batch_write_failed = outcome.batch_write_failed,
            "Processed upload"
        );
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bookshelf_catalog::{CatalogStore, Database, MockCatalog, Repository};
    use bookshelf_ingest::RowRecord;
    use bookshelf_reconcile::{SkipReason, Skipped};
    use std::sync::Arc;

    const CSV: &str = "text/csv";
    const SCENARIO: &str = "bookNum,name,description\n1,Dune,sci-fi\n2,Hobbit,\n";

    fn book(book_num: &str, name: &str, description: Option<&str>) -> BookRecord {
        BookRecord::new(book_num, name, description.map(str::to_string))
    }

    fn service(catalog: Arc<MockCatalog>) -> BookService {
        BookService::new(catalog)
    }

    #[tokio::test]
    async fn test_upload_into_empty_catalog() {
        let catalog = Arc::new(MockCatalog::default());
        let outcome = service(catalog.clone()).process_upload(SCENARIO.as_bytes(), CSV).await.unwrap();
        let expected = vec![book("1", "Dune", Some("sci-fi")), book("2", "Hobbit", Some(""))];
        assert_eq!(outcome.inserted, expected);
        assert!(outcome.updated.is_empty() && outcome.skipped.is_empty() && outcome.errors.is_empty());
        assert!(!outcome.batch_write_failed);
        assert_eq!(catalog.find_all().await.unwrap(), expected);
    }

    #[tokio::test]
    async fn test_second_upload_is_idempotent() {
        let catalog = Arc::new(MockCatalog::default());
        let service = service(catalog.clone());
        service.process_upload(SCENARIO.as_bytes(), CSV).await.unwrap();
        let outcome = service.process_upload(SCENARIO.as_bytes(), CSV).await.unwrap();
        assert!(outcome.inserted.is_empty() && outcome.updated.is_empty() && outcome.errors.is_empty());
        assert_eq!(outcome.skipped, vec![
            Skipped {
                row: RowRecord::new().with("bookNum", "1").with("name", "Dune").with("description", "sci-fi"),
                reason: SkipReason::NoChangesDetected,
            },
            Skipped {
                row: RowRecord::new().with("bookNum", "2").with("name", "Hobbit").with("description", ""),
                reason: SkipReason::NoChangesDetected,
            },
        ]);
        // Only the first upload wrote anything.
        assert_eq!(catalog.batches_applied(), 1);
    }

    #[tokio::test]
    async fn test_changed_name_is_updated() {
        let catalog = Arc::new(MockCatalog::with_books([book("1", "Dune", None)]));
        let outcome = service(catalog.clone()).process_upload(b"bookNum,name\n1,Dune Messiah\n", CSV).await.unwrap();
        assert_eq!(outcome.updated, vec![book("1", "Dune Messiah", None)]);
        assert_eq!(catalog.find_all().await.unwrap(), vec![book("1", "Dune Messiah", None)]);
    }

    #[tokio::test]
    async fn test_unsupported_media_type() {
        let catalog = Arc::new(MockCatalog::default());
        let err = service(catalog.clone()).process_upload(b"%PDF-1.7", "application/pdf").await.unwrap_err();
        assert!(matches!(&*err, ErrorKind::UnsupportedMediaType(t) if t == "application/pdf"));
        assert_eq!(catalog.batches_applied(), 0);
    }

    #[tokio::test]
    async fn test_batch_write_failure_still_reports() {
        let catalog = Arc::new(MockCatalog::default().failing_writes());
        let outcome = service(catalog.clone()).process_upload(SCENARIO.as_bytes(), CSV).await.unwrap();
        assert!(outcome.batch_write_failed);
        assert_eq!(outcome.inserted.len(), 2);
        assert!(catalog.find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_round_trip_through_sqlite() {
        let db = Database::connect_in_memory().await.unwrap();
        let service = BookService::new(Arc::new(Repository::from(&db)));
        let first = service.process_upload(SCENARIO.as_bytes(), CSV).await.unwrap();
        assert_eq!(first.inserted.len(), 2);
        let second = service.process_upload(SCENARIO.as_bytes(), CSV).await.unwrap();
        assert!(second.inserted.is_empty());
        assert!(second.skipped.iter().all(|s| s.reason == SkipReason::NoChangesDetected));
        assert_eq!(service.list_all().await.unwrap(), vec![
            book("1", "Dune", Some("sci-fi")),
            book("2", "Hobbit", Some("")),
        ]);
        db.close().await;
    }
}
