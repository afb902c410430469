//! Ingest Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.

use derive_more::{Display, Error};

/// An ingest error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for ingest operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// The declared media type is neither CSV nor an OOXML spreadsheet. The
    /// upload should be rejected before any of it is read.
    #[display("unsupported media type: {_0}")]
    UnsupportedMediaType(#[error(not(source))] String),
    /// The payload could not be decoded as the declared media type.
    #[display("invalid file: {_0}")]
    InvalidFile(#[error(not(source))] &'static str),
    /// A cell holds a spreadsheet error value (`#DIV/0!`, `#REF!`, ...) and
    /// has no meaningful text form.
    #[display("cell contains spreadsheet error {_0}")]
    CellError(#[error(not(source))] String),
    /// A numeric cell is NaN or infinite.
    #[display("cell contains a non-finite number")]
    NonFiniteNumber,
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        // Same bytes, same result.
        false
    }
}
