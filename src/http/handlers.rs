//! Request handlers.

use super::error::ApiError;
use crate::error::{ErrorKind, Result as ServiceResult};
use crate::service::BookService;
use axum::Json;
use axum::extract::multipart::MultipartError;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use bookshelf_ingest::BookRecord;
use bookshelf_reconcile::Outcome;
use exn::ResultExt;
use serde::Serialize;

/// Name of the multipart field carrying the uploaded spreadsheet.
pub const FILE_FIELD: &str = "file";

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub data: Outcome,
}

/// `GET /all`
pub async fn list_all(State(service): State<BookService>) -> Result<Json<Vec<BookRecord>>, ApiError> {
    Ok(Json(service.list_all().await?))
}

/// `POST /excel`
///
/// Reads the first multipart field named `file`; any other fields are ignored.
/// The field's declared content type decides how it is decoded.
pub async fn upload(
    State(service): State<BookService>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    while let Some(field) = multipart_read(multipart.next_field().await)? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let media_type = field.content_type().unwrap_or_default().to_string();
        let bytes = multipart_read(field.bytes().await)?;
        tracing::debug!(%media_type, size = bytes.len(), "Received upload");
        let outcome = service.process_upload(&bytes, &media_type).await?;
        return Ok(Json(UploadResponse { data: outcome }));
    }
    Err(ApiError(exn::Exn::from(ErrorKind::MissingFile)))
}

/// Hitting the body limit mid-stream surfaces as a multipart error; it keeps
/// its own kind so the client sees 413 rather than a generic 400.
fn multipart_read<T>(result: Result<T, MultipartError>) -> ServiceResult<T> {
    let too_large = matches!(&result, Err(err) if err.status() == StatusCode::PAYLOAD_TOO_LARGE);
    result.or_raise(|| {
        if too_large {
            ErrorKind::PayloadTooLarge
        } else {
            ErrorKind::MalformedRequest
        }
    })
}

/// `GET /health`
pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}
