//! Draft preview endpoints.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::header;
use axum::response::{IntoResponse, Redirect, Response};
use folio_site::PreviewError;
use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use serde::Deserialize;

use crate::draft;
use crate::error::ServerError;
use crate::state::AppState;

/// Characters escaped in redirect paths. `/` is kept as the segment separator.
const PATH_ENCODE_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Query parameters of GET /api/preview.
#[derive(Debug, Deserialize)]
pub(crate) struct PreviewParams {
    slug: Option<String>,
    collection: Option<String>,
    secret: Option<String>,
}

/// Handle GET /api/preview.
///
/// Enables draft mode and redirects to the page showing the document.
pub(crate) async fn enter_preview(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PreviewParams>,
) -> Result<Response, ServerError> {
    if params
        .slug
        .as_deref()
        .filter(|slug| !slug.trim().is_empty())
        .is_none()
    {
        return Err(PreviewError::MissingSlug.into());
    }

    if let Some(expected) = &state.preview_secret
        && params.secret.as_deref() != Some(expected.as_str())
    {
        tracing::warn!("Preview request with invalid secret");
        return Err(ServerError::InvalidSecret);
    }

    let lookup_state = Arc::clone(&state);
    let target = tokio::task::spawn_blocking(move || {
        lookup_state
            .site
            .preview_target(params.slug.as_deref(), params.collection.as_deref())
    })
    .await??;

    tracing::debug!(url = %target, "Entering draft mode");

    let location = utf8_percent_encode(&target, PATH_ENCODE_SET).to_string();
    Ok((
        [(header::SET_COOKIE, draft::enable_cookie(&state.draft_token))],
        Redirect::temporary(&location),
    )
        .into_response())
}

/// Handle GET /api/exit-preview.
pub(crate) async fn exit_preview() -> Response {
    (
        [(header::SET_COOKIE, draft::clear_cookie())],
        Redirect::temporary("/"),
    )
        .into_response()
}
