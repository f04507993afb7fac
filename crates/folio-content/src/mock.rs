//! Mock content store for testing.
//!
//! Provides [`MockStore`] for unit testing without filesystem or network
//! access.

use std::collections::HashMap;
use std::sync::RwLock;

use serde_json::Value;

use crate::query::{Collection, Query};
use crate::store::{ContentStore, ErrorStatus, StoreError, StoreErrorKind};

/// In-memory content store.
///
/// Documents are stored as given (relations already expanded) and queries
/// are evaluated with [`Query::apply`]. Every query is recorded so tests can
/// assert on what was asked.
///
/// # Example
///
/// ```ignore
/// use folio_content::{Collection, ContentStore, MockStore, Query};
/// use serde_json::json;
///
/// let store = MockStore::new()
///     .with_document(Collection::Posts, json!({"slug": "a", "language": "en"}));
///
/// let docs = store.find(&Query::new(Collection::Posts)).unwrap();
/// assert_eq!(store.queries().len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct MockStore {
    documents: RwLock<HashMap<Collection, Vec<Value>>>,
    queries: RwLock<Vec<Query>>,
    failure: RwLock<Option<StoreErrorKind>>,
}

impl MockStore {
    /// Create a new empty mock store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a document to a collection.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_document(self, collection: Collection, doc: Value) -> Self {
        self.documents
            .write()
            .unwrap()
            .entry(collection)
            .or_default()
            .push(doc);
        self
    }

    /// Add several documents to a collection.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_documents(self, collection: Collection, docs: impl IntoIterator<Item = Value>) -> Self {
        self.documents
            .write()
            .unwrap()
            .entry(collection)
            .or_default()
            .extend(docs);
        self
    }

    /// Make every query fail with the given error kind.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_failure(self, kind: StoreErrorKind) -> Self {
        *self.failure.write().unwrap() = Some(kind);
        self
    }

    /// Queries issued so far, in order.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn queries(&self) -> Vec<Query> {
        self.queries.read().unwrap().clone()
    }

    /// Queries issued against one collection.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn queries_for(&self, collection: Collection) -> Vec<Query> {
        self.queries
            .read()
            .unwrap()
            .iter()
            .filter(|query| query.collection == collection)
            .cloned()
            .collect()
    }
}

impl ContentStore for MockStore {
    fn find(&self, query: &Query) -> Result<Vec<Value>, StoreError> {
        self.queries.write().unwrap().push(query.clone());

        if let Some(kind) = *self.failure.read().unwrap() {
            return Err(StoreError::new(kind)
                .with_status(ErrorStatus::Persistent)
                .with_collection(query.collection.slug())
                .with_backend("Mock"));
        }

        let documents = self.documents.read().unwrap();
        let docs = documents
            .get(&query.collection)
            .map(|docs| query.apply(docs))
            .unwrap_or_default();
        Ok(docs)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_mock_records_queries() {
        let store = MockStore::new()
            .with_document(Collection::Posts, json!({"slug": "a", "language": "en"}))
            .with_document(Collection::Posts, json!({"slug": "b", "language": "de"}));

        let query = Query::new(Collection::Posts).where_equals("language", "de");
        let docs = store.find(&query).unwrap();

        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0]["slug"], "b");
        assert_eq!(store.queries(), vec![query]);
    }

    #[test]
    fn test_mock_empty_collection() {
        let store = MockStore::new();

        let docs = store.find(&Query::new(Collection::Info)).unwrap();

        assert!(docs.is_empty());
        assert_eq!(store.queries_for(Collection::Info).len(), 1);
        assert!(store.queries_for(Collection::News).is_empty());
    }

    #[test]
    fn test_mock_failure() {
        let store = MockStore::new().with_failure(StoreErrorKind::Unavailable);

        let err = store.find(&Query::new(Collection::News)).unwrap_err();

        assert_eq!(err.kind, StoreErrorKind::Unavailable);
        assert_eq!(err.to_string(), "[Mock] Unavailable (collection: news)");
    }

    #[test]
    fn test_mock_hides_drafts() {
        let store = MockStore::new().with_documents(
            Collection::News,
            [json!({"headline": "a", "_status": "draft"}), json!({"headline": "b"})],
        );

        let docs = store.find(&Query::new(Collection::News)).unwrap();

        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0]["headline"], "b");
    }
}
