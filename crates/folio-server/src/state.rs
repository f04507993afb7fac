//! Application state.
//!
//! Shared state for all request handlers.

use std::path::PathBuf;
use std::sync::Arc;

use folio_site::Site;

/// Application state shared across all handlers.
pub(crate) struct AppState {
    /// Page resolver and renderer.
    pub(crate) site: Arc<Site>,
    /// Directory served under `/static/`.
    pub(crate) static_dir: PathBuf,
    /// Secret the preview endpoint requires, if any.
    pub(crate) preview_secret: Option<String>,
    /// Expected value of the draft-mode cookie.
    pub(crate) draft_token: String,
    /// Enable verbose output (log render warnings).
    pub(crate) verbose: bool,
    /// Application version for cache invalidation.
    pub(crate) version: String,
}
