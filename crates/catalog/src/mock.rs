//! In-memory catalog for testing.

use crate::error::{ErrorKind, Result};
use crate::store::CatalogStore;
use async_trait::async_trait;
use bookshelf_ingest::BookRecord;
use bookshelf_reconcile::Operation;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tokio::sync::RwLock;

/// In-memory catalog for testing.
///
/// Books are stored in a `BTreeMap` behind a [`RwLock`], so all trait methods
/// can operate on `&self` without external synchronisation. Batch writes can
/// be made to fail on demand to exercise error paths.
#[derive(Debug, Default)]
pub struct MockCatalog {
    books: RwLock<BTreeMap<String, BookRecord>>,
    fail_writes: AtomicBool,
    batches: AtomicUsize,
}

impl MockCatalog {
    /// Create a mock catalog pre-populated with books.
    pub fn with_books(books: impl IntoIterator<Item = BookRecord>) -> Self {
        let books = books.into_iter().map(|book| (book.book_num.clone(), book)).collect();
        Self {
            books: RwLock::new(books),
            ..Self::default()
        }
    }

    /// Make every subsequent non-empty [`apply_batch`](CatalogStore::apply_batch) fail.
    pub fn failing_writes(self) -> Self {
        self.fail_writes.store(true, Ordering::SeqCst);
        self
    }

    /// Number of non-empty batches that were successfully applied.
    pub fn batches_applied(&self) -> usize {
        self.batches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CatalogStore for MockCatalog {
    async fn find_all(&self) -> Result<Vec<BookRecord>> {
        Ok(self.books.read().await.values().cloned().collect())
    }

    async fn find_by_ids(&self, ids: &BTreeSet<String>) -> Result<Vec<BookRecord>> {
        let books = self.books.read().await;
        Ok(ids.iter().filter_map(|id| books.get(id).cloned()).collect())
    }

    async fn apply_batch(&self, operations: &[Operation]) -> Result<()> {
        if operations.is_empty() {
            return Ok(());
        }
        if self.fail_writes.load(Ordering::SeqCst) {
            exn::bail!(ErrorKind::Database);
        }
        let mut books = self.books.write().await;
        for operation in operations {
            match operation {
                Operation::Insert(book) => {
                    books.insert(book.book_num.clone(), book.clone());
                },
                Operation::Update(book) => {
                    if let Some(existing) = books.get_mut(&book.book_num) {
                        existing.name.clone_from(&book.name);
                        existing.description.clone_from(&book.description);
                    }
                },
            }
        }
        self.batches.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
