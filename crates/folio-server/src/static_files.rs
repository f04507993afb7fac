//! Static file serving from the site's static directory.

use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use axum::extract::{Path as UrlPath, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};

use crate::error::ServerError;
use crate::state::AppState;

/// Handle GET /static/{path}.
pub(crate) async fn serve_static(
    State(state): State<Arc<AppState>>,
    UrlPath(path): UrlPath<String>,
) -> Result<Response, ServerError> {
    let Some(file) = resolve(&state.static_dir, &path) else {
        tracing::debug!(path = %path, "Rejected static path");
        return Err(ServerError::FileNotFound(path));
    };

    let content = match tokio::fs::read(&file).await {
        Ok(content) => content,
        Err(e) if matches!(e.kind(), std::io::ErrorKind::NotFound | std::io::ErrorKind::IsADirectory) => {
            return Err(ServerError::FileNotFound(path));
        }
        Err(e) => return Err(e.into()),
    };

    let mime = mime_guess::from_path(&file).first_or_octet_stream();
    Ok((
        [
            (header::CONTENT_TYPE, mime.to_string()),
            (header::CACHE_CONTROL, "public, max-age=3600".to_owned()),
        ],
        content,
    )
        .into_response())
}

/// Map a request path to a file under `root`.
///
/// Only plain relative paths are accepted; `..`, absolute paths and empty
/// paths are rejected.
fn resolve(root: &Path, path: &str) -> Option<PathBuf> {
    let relative = Path::new(path);
    let mut components = relative.components().peekable();
    components.peek()?;
    if components.all(|c| matches!(c, Component::Normal(_))) {
        Some(root.join(relative))
    } else {
        None
    }
}
