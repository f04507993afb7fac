//! Payload CMS REST API content store.
//!
//! Provides [`PayloadStore`], a synchronous [`ContentStore`] that translates
//! [`Query`] values into `GET /api/{collection}` requests and decodes the
//! `{ "docs": [...] }` envelope.
//!
//! # Example
//!
//! ```ignore
//! use std::time::Duration;
//! use folio_content::{Collection, ContentStore, Query};
//! use folio_payload::PayloadStore;
//!
//! let store = PayloadStore::new("https://cms.example.com", Duration::from_secs(10))
//!     .with_api_key("secret");
//! let posts = store.find(&Query::new(Collection::Posts).limit(100))?;
//! ```

use std::time::Duration;

use folio_content::{ContentStore, ErrorStatus, Query, StoreError, StoreErrorKind};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde::Deserialize;
use serde_json::Value;
use ureq::Agent;

/// Backend identifier for error messages.
const BACKEND: &str = "Payload";

/// Default HTTP timeout in seconds.
pub const DEFAULT_TIMEOUT: u64 = 10;

/// Unreserved characters: A-Z a-z 0-9 - . _ ~
const QUERY_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Percent-encode a query component.
fn encode(input: &str) -> String {
    utf8_percent_encode(input, QUERY_ENCODE_SET).to_string()
}

/// Response envelope of collection queries.
#[derive(Debug, Deserialize)]
struct FindResponse {
    #[serde(default)]
    docs: Vec<Value>,
}

/// Content store backed by the Payload REST API.
pub struct PayloadStore {
    agent: Agent,
    base_url: String,
    api_key: Option<String>,
}

impl PayloadStore {
    /// Create a store for the CMS at `base_url`.
    #[must_use]
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        let agent = Agent::config_builder()
            .timeout_global(Some(timeout))
            .http_status_as_error(false)
            .build()
            .into();

        Self {
            agent,
            base_url: base_url.trim_end_matches('/').to_owned(),
            api_key: None,
        }
    }

    /// Authenticate requests with an API key of the `users` collection.
    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into()).filter(|key| !key.is_empty());
        self
    }

    /// Full request URL for a query.
    #[must_use]
    pub fn url_for(&self, query: &Query) -> String {
        format!(
            "{}/api/{}?{}",
            self.base_url,
            query.collection.slug(),
            query_string(query)
        )
    }
}

/// Encode a query in the CMS's bracketed query-string syntax.
///
/// Queries without a limit disable pagination so every match is returned.
fn query_string(query: &Query) -> String {
    let mut params = Vec::new();

    for filter in &query.filters {
        params.push(format!(
            "where[{}][equals]={}",
            encode(&filter.field),
            encode(&param_value(&filter.value))
        ));
    }
    if let Some(sort) = &query.sort {
        params.push(format!("sort={}", encode(&sort.to_string())));
    }
    params.push(format!("depth={}", query.depth));
    match query.limit {
        Some(limit) => params.push(format!("limit={limit}")),
        None => params.push("pagination=false".to_owned()),
    }
    if query.draft {
        params.push("draft=true".to_owned());
    }

    params.join("&")
}

fn param_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Map an error status code to a store error.
fn status_error(status: u16, body: &str) -> StoreError {
    let (kind, retry) = match status {
        400 => (StoreErrorKind::InvalidQuery, ErrorStatus::Permanent),
        401 | 403 => (StoreErrorKind::PermissionDenied, ErrorStatus::Permanent),
        404 => (StoreErrorKind::NotFound, ErrorStatus::Permanent),
        408 => (StoreErrorKind::Timeout, ErrorStatus::Temporary),
        429 => (StoreErrorKind::RateLimited, ErrorStatus::Persistent),
        500..=599 => (StoreErrorKind::Unavailable, ErrorStatus::Persistent),
        _ => (StoreErrorKind::Other, ErrorStatus::Permanent),
    };
    let message = if body.trim().is_empty() {
        format!("HTTP {status}")
    } else {
        format!("HTTP {status}: {}", body.trim())
    };
    StoreError::new(kind)
        .with_status(retry)
        .with_source(std::io::Error::other(message))
        .with_backend(BACKEND)
}

/// Map a transport failure to a store error.
fn transport_error(err: ureq::Error) -> StoreError {
    let kind = match &err {
        ureq::Error::Timeout(_) => StoreErrorKind::Timeout,
        _ => StoreErrorKind::Unavailable,
    };
    StoreError::new(kind)
        .with_status(ErrorStatus::Temporary)
        .with_source(err)
        .with_backend(BACKEND)
}

impl ContentStore for PayloadStore {
    fn find(&self, query: &Query) -> Result<Vec<Value>, StoreError> {
        let url = self.url_for(query);
        let collection = query.collection.slug();

        tracing::debug!(%url, "Payload query");

        let mut request = self.agent.get(&url).header("Accept", "application/json");
        if let Some(key) = &self.api_key {
            request = request.header("Authorization", &format!("users API-Key {key}"));
        }
        let response = request
            .call()
            .map_err(|e| transport_error(e).with_collection(collection))?;

        let status = response.status().as_u16();
        let mut body = response.into_body();

        if status >= 400 {
            let error_body = body
                .read_to_string()
                .unwrap_or_else(|_| "(unable to read error body)".to_owned());
            tracing::warn!(status, collection, "Payload request failed");
            return Err(status_error(status, &error_body).with_collection(collection));
        }

        let envelope: FindResponse = body.read_json().map_err(|e| {
            StoreError::new(StoreErrorKind::Malformed)
                .with_source(e)
                .with_collection(collection)
                .with_backend(BACKEND)
        })?;
        Ok(envelope.docs)
    }
}

#[cfg(test)]
mod tests {
    use folio_content::Collection;
    use pretty_assertions::assert_eq;

    use super::*;

    fn store() -> PayloadStore {
        PayloadStore::new("https://cms.example.com/", Duration::from_secs(DEFAULT_TIMEOUT))
    }

    #[test]
    fn test_url_for_home_query() {
        let query = Query::new(Collection::Posts)
            .where_equals("_status", "published")
            .where_equals("language", "de")
            .limit(100);

        assert_eq!(
            store().url_for(&query),
            "https://cms.example.com/api/posts?where[_status][equals]=published&where[language][equals]=de&depth=2&limit=100"
        );
    }

    #[test]
    fn test_query_string_sort_and_draft() {
        let query = Query::new(Collection::News)
            .where_equals("language", "en")
            .sort_by("-date")
            .draft(true);

        assert_eq!(
            query_string(&query),
            "where[language][equals]=en&sort=-date&depth=2&pagination=false&draft=true"
        );
    }

    #[test]
    fn test_query_string_encodes_values() {
        let query = Query::new(Collection::Posts)
            .where_equals("slug", "a b&c=d")
            .depth(0)
            .limit(1);

        assert_eq!(
            query_string(&query),
            "where[slug][equals]=a%20b%26c%3Dd&depth=0&limit=1"
        );
    }

    #[test]
    fn test_query_string_numeric_value() {
        let query = Query::new(Collection::Categories).where_equals("id", 7).limit(1);

        assert_eq!(
            query_string(&query),
            "where[id][equals]=7&depth=2&limit=1"
        );
    }

    #[test]
    fn test_status_error_mapping() {
        let cases = [
            (400, StoreErrorKind::InvalidQuery, ErrorStatus::Permanent),
            (401, StoreErrorKind::PermissionDenied, ErrorStatus::Permanent),
            (403, StoreErrorKind::PermissionDenied, ErrorStatus::Permanent),
            (404, StoreErrorKind::NotFound, ErrorStatus::Permanent),
            (429, StoreErrorKind::RateLimited, ErrorStatus::Persistent),
            (502, StoreErrorKind::Unavailable, ErrorStatus::Persistent),
            (418, StoreErrorKind::Other, ErrorStatus::Permanent),
        ];
        for (status, kind, retry) in cases {
            let err = status_error(status, "");
            assert_eq!(err.kind, kind, "status {status}");
            assert_eq!(err.status, retry, "status {status}");
        }
    }

    #[test]
    fn test_status_error_display() {
        let err = status_error(404, "{\"errors\":[]}").with_collection("news");

        assert_eq!(
            err.to_string(),
            "[Payload] Not found: HTTP 404: {\"errors\":[]} (collection: news)"
        );
    }

    #[test]
    fn test_empty_api_key_ignored() {
        let store = store().with_api_key("");
        assert!(store.api_key.is_none());
    }
}
