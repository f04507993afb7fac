//! Error types for the HTTP server.

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use folio_content::StoreError;
use folio_site::PreviewError;

/// Server error type.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// No page at the requested path. Carries the rendered 404 document.
    #[error("Page not found: {path}")]
    PageNotFound { path: String, html: String },

    /// Static file not found.
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// Preview request could not be resolved.
    #[error("Preview error: {0}")]
    Preview(#[from] PreviewError),

    /// Preview secret missing or wrong.
    #[error("Invalid preview secret")]
    InvalidSecret,

    /// Content store failure.
    #[error("Content store error: {0}")]
    Store(#[from] StoreError),

    /// Blocking render task panicked or was cancelled.
    #[error("Render task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        match self {
            Self::PageNotFound { html, .. } => (StatusCode::NOT_FOUND, Html(html)).into_response(),
            Self::FileNotFound(_) => (StatusCode::NOT_FOUND, "Not found").into_response(),
            Self::Preview(PreviewError::Store(e)) | Self::Store(e) => {
                tracing::error!(error = %e, retryable = e.is_retryable(), "Content store request failed");
                (StatusCode::BAD_GATEWAY, "Content unavailable").into_response()
            }
            Self::Preview(e) => {
                let status = match e {
                    PreviewError::NotFound { .. } => StatusCode::NOT_FOUND,
                    _ => StatusCode::BAD_REQUEST,
                };
                (status, e.to_string()).into_response()
            }
            Self::InvalidSecret => (StatusCode::UNAUTHORIZED, "Invalid token").into_response(),
            Self::Task(e) => {
                tracing::error!(error = %e, "Render task failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
            }
            Self::Io(e) => {
                tracing::error!(error = %e, "I/O error");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
            }
        }
    }
}
