//! Service Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.

use bookshelf_ingest::error::{Error as IngestError, ErrorKind as IngestErrorKind};
use derive_more::{Display, Error};

/// A service error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for service operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error)]
pub enum ErrorKind {
    /// The upload request carried no `file` field.
    #[display("File is required")]
    MissingFile,
    /// The declared type of the uploaded file is not CSV or XLSX.
    #[display("unsupported media type: {_0}")]
    UnsupportedMediaType(#[error(not(source))] String),
    /// The uploaded file doesn't decode as its declared type.
    #[display("invalid file: {_0}")]
    InvalidFile(#[error(not(source))] &'static str),
    /// The request body itself is malformed (broken multipart).
    #[display("malformed request")]
    MalformedRequest,
    /// The request body exceeds the configured upload limit.
    #[display("upload exceeds the size limit")]
    PayloadTooLarge,
    /// Reading from the catalog failed.
    #[display("catalog unavailable")]
    Catalog,
    /// Configuration could not be loaded.
    #[display("configuration error")]
    Config,
    /// The server could not be started or stopped cleanly.
    #[display("server error")]
    Server,
}

impl ErrorKind {
    /// Convert a decoding error into a service error, keeping the ingest
    /// crate's `Exn` frame as a child in the error tree.
    #[track_caller]
    pub fn decode(err: IngestError) -> Error {
        let kind = match &*err {
            IngestErrorKind::UnsupportedMediaType(media_type) => Self::UnsupportedMediaType(media_type.clone()),
            IngestErrorKind::InvalidFile(reason) => Self::InvalidFile(*reason),
            // Cell faults are per row and never escape the reconciler.
            IngestErrorKind::CellError(_) | IngestErrorKind::NonFiniteNumber => Self::InvalidFile("unreadable cell"),
        };
        err.raise(kind)
    }

    /// Returns `true` if the caller sent something that can't be processed,
    /// as opposed to the service failing.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::MissingFile
                | Self::UnsupportedMediaType(_)
                | Self::InvalidFile(_)
                | Self::MalformedRequest
                | Self::PayloadTooLarge
        )
    }

    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Catalog)
    }
}
