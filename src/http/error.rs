//! HTTP error mapping.

use crate::error::{Error, ErrorKind};
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Error wrapper for converting service errors to HTTP responses.
///
/// Error responses have the format:
/// ```json
/// { "status": "error", "message": "..." }
/// ```
pub struct ApiError(pub Error);

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &*self.0 {
            ErrorKind::UnsupportedMediaType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            ErrorKind::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            kind if kind.is_client_error() => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = (*self.0).to_string();
        if status.is_server_error() {
            tracing::error!(error = ?self.0, "Request failed");
        } else {
            tracing::debug!(%message, "Request rejected");
        }
        let body = serde_json::json!({
            "status": "error",
            "message": message,
        });
        (status, Json(body)).into_response()
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        ApiError(err)
    }
}
