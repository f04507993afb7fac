//! Page routes.
//!
//! Resolves the request path through [`Site`](folio_site::Site) and returns
//! the rendered HTML document.

use std::sync::Arc;

use axum::extract::{Path, RawQuery, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{Html, IntoResponse, Response};
use folio_site::{CategoryFilter, SiteError};
use md5::{Digest, Md5};

use crate::draft;
use crate::error::ServerError;
use crate::state::AppState;

/// Handle GET / (English home).
pub(crate) async fn get_root_page(
    State(state): State<Arc<AppState>>,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
) -> Result<Response, ServerError> {
    get_page_impl("/".to_owned(), query, state, headers).await
}

/// Handle GET /{path}.
pub(crate) async fn get_page(
    Path(path): Path<String>,
    State(state): State<Arc<AppState>>,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
) -> Result<Response, ServerError> {
    get_page_impl(format!("/{path}"), query, state, headers).await
}

/// Shared implementation for page rendering.
#[allow(clippy::needless_pass_by_value)]
async fn get_page_impl(
    path: String,
    query: Option<String>,
    state: Arc<AppState>,
    headers: HeaderMap,
) -> Result<Response, ServerError> {
    let draft = draft::is_draft(&headers, &state.draft_token);
    let filter = CategoryFilter::from_query(query.as_deref().unwrap_or_default());

    // Store backends block, so resolve and render off the async workers
    let render_state = Arc::clone(&state);
    let render_path = path.clone();
    let result = tokio::task::spawn_blocking(move || {
        render_state
            .site
            .render_filtered(&render_path, draft, &filter)
            .map_err(|e| match e {
                SiteError::NotFound { path, language } => {
                    tracing::debug!(path = %path, language = %language, "Page not found");
                    let html = render_state.site.render_not_found(language).html;
                    ServerError::PageNotFound { path, html }
                }
                SiteError::Store(e) => ServerError::Store(e),
            })
    })
    .await??;

    // Log warnings in verbose mode
    if state.verbose && !result.warnings.is_empty() {
        for warning in &result.warnings {
            tracing::warn!(path = %path, warning = %warning, "Page render warning");
        }
    }

    if draft {
        return Ok((
            [(header::CACHE_CONTROL, "no-store")],
            Html(result.html),
        )
            .into_response());
    }

    let etag = compute_etag(&state.version, &result.html);

    // Check If-None-Match header for conditional request
    if let Some(if_none_match) = headers.get(header::IF_NONE_MATCH)
        && if_none_match.as_bytes() == etag.as_bytes()
    {
        return Ok(StatusCode::NOT_MODIFIED.into_response());
    }

    Ok((
        [
            (header::ETAG, etag),
            (header::CACHE_CONTROL, "private, max-age=60".to_owned()),
        ],
        Html(result.html),
    )
        .into_response())
}

/// Compute `ETag` from version and content.
///
/// Uses MD5 hash truncated to 64 bits (16 hex chars).
fn compute_etag(version: &str, content: &str) -> String {
    let hash = Md5::digest(format!("{version}:{content}").as_bytes());
    format!("\"{}\"", &hex::encode(hash)[..16])
}
