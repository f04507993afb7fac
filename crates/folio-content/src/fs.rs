//! Filesystem content store.
//!
//! Provides [`FsStore`], which reads collections from JSON files laid out as
//! `<root>/<collection>/*.json`. Each file holds one document or an array of
//! documents. Files are read in name order, which is also the stored order of
//! the collection.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::model::DocId;
use crate::populate::Populator;
use crate::query::{Collection, Query};
use crate::schema::Schema;
use crate::store::{ContentStore, StoreError, StoreErrorKind};

/// Backend identifier for error messages.
const BACKEND: &str = "Fs";

/// JSON-file content store.
///
/// Evaluates queries in memory and populates relations with the configured
/// [`Schema`]. A missing collection directory is an empty collection.
///
/// # Example
///
/// ```ignore
/// use folio_content::{Collection, ContentStore, FsStore, Query};
///
/// let store = FsStore::new("content");
/// let news = store.find(&Query::new(Collection::News).sort_by("-date"))?;
/// ```
pub struct FsStore {
    /// Root directory holding one subdirectory per collection.
    root: PathBuf,
    schema: Schema,
}

impl FsStore {
    /// Create a store over `root` with the portfolio schema.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            schema: Schema::portfolio(),
        }
    }

    /// Replace the schema used for relation population.
    #[must_use]
    pub fn with_schema(mut self, schema: Schema) -> Self {
        self.schema = schema;
        self
    }

    /// Root directory of the store.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Load every document of a collection in stored order.
    ///
    /// Documents without an `id` get their file stem (suffixed with the array
    /// index for multi-document files).
    fn load(&self, collection: Collection) -> Result<Vec<Value>, StoreError> {
        let dir = self.root.join(collection.slug());
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(%collection, dir = %dir.display(), "Collection directory missing");
                return Ok(Vec::new());
            }
            Err(e) => {
                return Err(StoreError::io(e, Some(dir))
                    .with_collection(collection.slug())
                    .with_backend(BACKEND));
            }
        };

        let mut files: Vec<PathBuf> = entries
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
            .filter(|path| {
                !path
                    .file_name()
                    .is_some_and(|name| name.to_string_lossy().starts_with('.'))
            })
            .collect();
        files.sort();

        let mut docs = Vec::new();
        for path in files {
            let content = fs::read_to_string(&path).map_err(|e| {
                StoreError::io(e, Some(path.clone()))
                    .with_collection(collection.slug())
                    .with_backend(BACKEND)
            })?;
            let parsed: Value = serde_json::from_str(&content).map_err(|e| {
                StoreError::malformed(e)
                    .with_collection(collection.slug())
                    .with_path(&path)
                    .with_backend(BACKEND)
            })?;
            let stem = path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();

            match parsed {
                Value::Array(items) => {
                    for (index, doc) in items.into_iter().enumerate() {
                        docs.push(with_default_id(doc, || format!("{stem}-{index}")));
                    }
                }
                doc @ Value::Object(_) => docs.push(with_default_id(doc, || stem.clone())),
                _ => {
                    return Err(StoreError::new(StoreErrorKind::Malformed)
                        .with_collection(collection.slug())
                        .with_path(&path)
                        .with_backend(BACKEND));
                }
            }
        }
        Ok(docs)
    }
}

fn with_default_id(mut doc: Value, id: impl FnOnce() -> String) -> Value {
    if let Some(object) = doc.as_object_mut()
        && !object.contains_key("id")
    {
        object.insert("id".to_owned(), Value::String(id()));
    }
    doc
}

impl ContentStore for FsStore {
    fn find(&self, query: &Query) -> Result<Vec<Value>, StoreError> {
        let docs = self.load(query.collection)?;
        let mut results = query.apply(&docs);

        if query.depth > 0 {
            let mut cache: HashMap<Collection, Vec<Value>> = HashMap::new();
            cache.insert(query.collection, docs);
            let draft = query.draft;

            let mut populator = Populator::new(&self.schema, |collection, id: &DocId| {
                let docs = cache.entry(collection).or_insert_with(|| {
                    self.load(collection).unwrap_or_else(|e| {
                        tracing::warn!(%collection, error = %e, "Failed to load related collection");
                        Vec::new()
                    })
                });
                let visible = Query::new(collection).draft(draft);
                docs.iter()
                    .find(|doc| DocId::from_value(doc).as_ref() == Some(id) && visible.matches(doc))
                    .cloned()
            });
            for doc in &mut results {
                populator.populate(query.collection, doc, query.depth);
            }
        }

        tracing::debug!(
            collection = %query.collection,
            results = results.len(),
            "Fs query"
        );
        Ok(results)
    }
}
