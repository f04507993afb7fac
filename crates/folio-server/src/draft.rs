//! Draft-mode cookie.
//!
//! The preview endpoint sets the cookie; page handlers honor it only when its
//! value matches the token derived from the preview secret.

use axum::http::HeaderMap;
use axum::http::header::COOKIE;
use md5::{Digest, Md5};

/// Cookie name.
pub(crate) const DRAFT_COOKIE: &str = "folio_draft";

/// Cookie value for a preview secret.
///
/// Without a secret any client may enter draft mode, so the value is a fixed
/// marker.
pub(crate) fn draft_token(secret: Option<&str>) -> String {
    match secret {
        Some(secret) => hex::encode(Md5::digest(format!("draft:{secret}").as_bytes())),
        None => "1".to_owned(),
    }
}

/// Whether the request carries a valid draft cookie.
pub(crate) fn is_draft(headers: &HeaderMap, token: &str) -> bool {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .any(|(name, value)| name == DRAFT_COOKIE && value == token)
}

/// `Set-Cookie` value enabling draft mode.
pub(crate) fn enable_cookie(token: &str) -> String {
    format!("{DRAFT_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax")
}

/// `Set-Cookie` value clearing draft mode.
pub(crate) fn clear_cookie() -> String {
    format!("{DRAFT_COOKIE}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
}
