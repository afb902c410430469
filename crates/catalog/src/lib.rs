//! Persisted book catalog.
//!
//! The catalog holds one [`BookRecord`] per `bookNum`; the schema enforces
//! uniqueness. It is reached through the [`CatalogStore`] trait, which offers
//! exactly what reconciliation needs: a full listing, a bulk lookup by a set
//! of identifiers, and an all-or-nothing batch write.
//!
//! [`Repository`] is the SQLite implementation, built from a [`Database`]
//! pool. With the `mock` feature, [`MockCatalog`] provides an in-memory
//! stand-in for tests.
//!
//! [`BookRecord`]: bookshelf_ingest::BookRecord

mod db;
pub mod error;
#[cfg(any(test, feature = "mock"))]
mod mock;
mod models;
mod repo;
mod store;

pub use crate::db::Database;
#[cfg(any(test, feature = "mock"))]
pub use crate::mock::MockCatalog;
pub use crate::repo::Repository;
pub use crate::store::CatalogStore;
use std::sync::Arc;

/// Shared handle to whichever catalog implementation the process runs with.
pub type CatalogHandle = Arc<dyn CatalogStore>;
