//! Content store trait and error types.
//!
//! Provides the [`ContentStore`] trait for querying CMS collections, along with
//! [`StoreError`] for unified error handling across backends.

use std::path::PathBuf;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::query::Query;

/// Semantic error categories.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[non_exhaustive]
pub enum StoreErrorKind {
    /// Collection or document does not exist.
    NotFound,
    /// Credentials missing or rejected.
    PermissionDenied,
    /// Query the backend refused to evaluate.
    InvalidQuery,
    /// Backend is temporarily unavailable.
    Unavailable,
    /// Too many requests.
    RateLimited,
    /// Operation timed out.
    Timeout,
    /// Backend returned data that could not be decoded.
    Malformed,
    /// Other/unknown error category.
    Other,
}

/// Retry guidance.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub enum ErrorStatus {
    /// Don't retry (bad query, not found, malformed data).
    #[default]
    Permanent,
    /// Retry immediately (timeout, connection reset).
    Temporary,
    /// Retry with backoff (rate limited, service unavailable).
    Persistent,
}

/// Store error with semantic kind and backend-specific source.
#[derive(Debug)]
pub struct StoreError {
    /// Semantic error category.
    pub kind: StoreErrorKind,
    /// Retry guidance.
    pub status: ErrorStatus,
    /// Collection context (if applicable).
    pub collection: Option<String>,
    /// File path context (if applicable).
    pub path: Option<PathBuf>,
    /// Backend identifier (e.g., "Fs", "Payload", "Mock").
    pub backend: Option<&'static str>,
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl StoreError {
    /// Create a new store error.
    #[must_use]
    pub fn new(kind: StoreErrorKind) -> Self {
        Self {
            kind,
            status: ErrorStatus::Permanent,
            collection: None,
            path: None,
            backend: None,
            source: None,
        }
    }

    /// Attach collection context.
    #[must_use]
    pub fn with_collection(mut self, collection: impl Into<String>) -> Self {
        self.collection = Some(collection.into());
        self
    }

    /// Attach file path context.
    #[must_use]
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Attach backend identifier.
    #[must_use]
    pub fn with_backend(mut self, backend: &'static str) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Set retry status.
    #[must_use]
    pub fn with_status(mut self, status: ErrorStatus) -> Self {
        self.status = status;
        self
    }

    /// Attach the underlying error source.
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Downcast the source error to a concrete type.
    #[must_use]
    pub fn downcast_source<E: std::error::Error + 'static>(&self) -> Option<&E> {
        self.source.as_ref()?.downcast_ref()
    }

    /// Create a not found error for a collection.
    #[must_use]
    pub fn not_found(collection: impl Into<String>) -> Self {
        Self::new(StoreErrorKind::NotFound).with_collection(collection)
    }

    /// Create a malformed-data error from a decode failure.
    #[must_use]
    pub fn malformed(err: serde_json::Error) -> Self {
        Self::new(StoreErrorKind::Malformed).with_source(err)
    }

    /// Create a store error from an I/O error.
    #[must_use]
    pub fn io(err: std::io::Error, path: Option<PathBuf>) -> Self {
        let kind = match err.kind() {
            std::io::ErrorKind::NotFound => StoreErrorKind::NotFound,
            std::io::ErrorKind::PermissionDenied => StoreErrorKind::PermissionDenied,
            std::io::ErrorKind::TimedOut => StoreErrorKind::Timeout,
            _ => StoreErrorKind::Other,
        };
        let status = match err.kind() {
            std::io::ErrorKind::TimedOut => ErrorStatus::Temporary,
            _ => ErrorStatus::Permanent,
        };
        let mut error = Self::new(kind).with_status(status).with_source(err);
        if let Some(p) = path {
            error = error.with_path(p);
        }
        error
    }

    /// Whether retrying the same request may succeed.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        self.status != ErrorStatus::Permanent
    }
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Format: "[Backend] Kind: message (collection: posts, path: /foo/bar)"
        if let Some(backend) = self.backend {
            write!(f, "[{backend}] ")?;
        }

        let kind_str = match self.kind {
            StoreErrorKind::NotFound => "Not found",
            StoreErrorKind::PermissionDenied => "Permission denied",
            StoreErrorKind::InvalidQuery => "Invalid query",
            StoreErrorKind::Unavailable => "Unavailable",
            StoreErrorKind::RateLimited => "Rate limited",
            StoreErrorKind::Timeout => "Timeout",
            StoreErrorKind::Malformed => "Malformed data",
            StoreErrorKind::Other => "Error",
        };

        write!(f, "{kind_str}")?;

        if let Some(source) = &self.source {
            write!(f, ": {source}")?;
        }

        match (&self.collection, &self.path) {
            (Some(collection), Some(path)) => {
                write!(f, " (collection: {collection}, path: {})", path.display())?;
            }
            (Some(collection), None) => write!(f, " (collection: {collection})")?,
            (None, Some(path)) => write!(f, " (path: {})", path.display())?,
            (None, None) => {}
        }

        Ok(())
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|s| s.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Read access to CMS collections.
///
/// Backends return raw JSON documents with relations populated to the
/// query's depth. Implementations are synchronous; async callers run them on
/// a blocking pool.
pub trait ContentStore: Send + Sync {
    /// Run a query and return matching documents in result order.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backend cannot be reached, rejects the
    /// query, or returns data that is not a document list.
    fn find(&self, query: &Query) -> Result<Vec<Value>, StoreError>;
}

impl dyn ContentStore {
    /// Run a query and decode the results.
    ///
    /// Documents that fail to decode are skipped with a warning rather than
    /// failing the whole query.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the underlying [`find`](ContentStore::find)
    /// fails.
    pub fn find_as<T: DeserializeOwned>(&self, query: &Query) -> Result<Vec<T>, StoreError> {
        let docs = self.find(query)?;
        let collection = query.collection;
        Ok(docs
            .into_iter()
            .filter_map(|doc| match serde_json::from_value(doc) {
                Ok(typed) => Some(typed),
                Err(e) => {
                    tracing::warn!(%collection, error = %e, "Skipping undecodable document");
                    None
                }
            })
            .collect())
    }
}
