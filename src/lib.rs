//! Book catalog ingestion service.
//!
//! Accepts a CSV or XLSX upload, reconciles every row against the persisted
//! catalog by `bookNum` and writes all inserts and updates as one batch. The
//! per-row outcome is returned to the caller.
//!
//! The heavy lifting lives in the workspace crates:
//! - [`bookshelf_ingest`] decodes uploads into rows,
//! - [`bookshelf_reconcile`] classifies rows against a catalog snapshot,
//! - [`bookshelf_catalog`] persists books in SQLite,
//! - [`bookshelf_config`] loads process configuration.
//!
//! This crate wires them together behind [`BookService`] and exposes the
//! service over HTTP via [`http::router`].

pub mod error;
pub mod http;
pub mod service;

pub use crate::service::BookService;
