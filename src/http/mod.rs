//! HTTP surface: `GET /all`, `POST /excel` and `GET /health`.

mod error;
mod handlers;

pub use self::error::ApiError;
pub use self::handlers::{FILE_FIELD, UploadResponse};
use crate::service::BookService;
use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use tokio::signal;
use tower_http::trace::TraceLayer;

/// Build the application router.
///
/// `max_upload_bytes` caps the request body; larger uploads are rejected
/// before they reach the decoder.
pub fn router(service: BookService, max_upload_bytes: usize) -> Router {
    Router::new()
        .route("/all", get(handlers::list_all))
        .route("/excel", post(handlers::upload))
        .route("/health", get(handlers::health))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(service)
}

/// Resolves on SIGINT (Ctrl+C) or SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::error!(error = %err, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            },
            Err(err) => {
                tracing::error!(error = %err, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received SIGINT, starting graceful shutdown"),
        _ = terminate => tracing::info!("Received SIGTERM, starting graceful shutdown"),
    }
}
